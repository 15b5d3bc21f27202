//! BitReader: reads a packed MSB-first bitstream from any I/O source that supports read().
//!
//! The reader pulls `capacity` bytes at a time from the source and walks each byte with a
//! one-bit cursor mask. End of data is reported as `None` so the caller can decide whether
//! that is a clean end or a truncated stream.
//!

use std::io::{self, ErrorKind, Read};

use log::trace;

use super::TOP_BIT;

/// Reads a huffpack bitstream.
#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    /// Index of the next unread byte in the buffer.
    cursor: usize,
    /// Number of valid bytes in the buffer.
    filled: usize,
    /// Byte currently being read.
    byte: u8,
    /// Buffer index `byte` was taken from. A refill moves `cursor` but not this.
    at: usize,
    /// Cursor into the current byte. Zero means the next bit needs a new byte.
    mask: u8,
    source: R,
}

impl<R: Read> BitReader<R> {
    /// Creates a new BitReader which refills `capacity` bytes at a time.
    pub fn new(source: R, capacity: usize) -> Self {
        Self {
            buffer: vec![0; capacity.max(1)],
            cursor: 0,
            filled: 0,
            byte: 0,
            at: 0,
            mask: 0,
            source,
        }
    }

    /// Check (and refill) buffer. Returns true if we have an unread byte, false if there is no more.
    pub fn have_data(&mut self) -> io::Result<bool> {
        if self.cursor < self.filled {
            return Ok(true);
        }
        loop {
            match self.source.read(&mut self.buffer) {
                Ok(size) => {
                    trace!("BitReader refilled {} bytes", size);
                    self.filled = size;
                    self.cursor = 0;
                    return Ok(size > 0);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Return the next bit as Some(true) for 1 and Some(false) for 0, or None if there is no
    /// more data to read.
    pub fn bit(&mut self) -> io::Result<Option<bool>> {
        if self.mask == 0 {
            if !self.have_data()? {
                return Ok(None);
            }
            self.byte = self.buffer[self.cursor];
            self.at = self.cursor;
            self.cursor += 1;
            self.mask = TOP_BIT;
        }
        let bit = (self.byte & self.mask) != 0;
        self.mask >>= 1;
        Ok(Some(bit))
    }

    /// Return the next n bits (n <= 32), most significant first, or None if the data ran out
    /// part way through.
    pub fn bint(&mut self, n: u32) -> io::Result<Option<u32>> {
        assert!(n <= 32, "bint can read at most 32 bits");
        let mut result = 0_u32;
        for _ in 0..n {
            match self.bit()? {
                Some(bit) => result = (result << 1) | bit as u32,
                None => return Ok(None),
            }
        }
        Ok(Some(result))
    }

    /// Returns a byte, or None if there is no more data to read. This is
    /// a convenience function, and calls bint(8).
    pub fn byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.bint(8)?.map(|byte| byte as u8))
    }

    /// Debugging function. Report current position as [byte.bit] within the buffer.
    pub fn loc(&self) -> String {
        let bit = if self.mask == 0 {
            0
        } else {
            self.mask.leading_zeros()
        };
        let byte = if self.mask == 0 { self.cursor } else { self.at };
        format!("[{}.{}]", byte, bit)
    }
}

#[cfg(test)]
mod test {
    use super::BitReader;

    #[test]
    fn basic_test() {
        let x = [0b10000001_u8].as_slice();
        let mut br = BitReader::new(x, 16);
        assert_eq!(br.bit().unwrap(), Some(true));
        for _ in 0..6 {
            assert_eq!(br.bit().unwrap(), Some(false));
        }
        assert_eq!(br.bit().unwrap(), Some(true));
        assert_eq!(br.bit().unwrap(), None);
    }

    #[test]
    fn bint_test() {
        let x = [0b00011011].as_slice();
        let mut br = BitReader::new(x, 16);
        assert_eq!(br.bint(5).unwrap(), Some(3));
        assert_eq!(br.bint(1).unwrap(), Some(0));
        assert_eq!(br.bint(2).unwrap(), Some(3));
        assert_eq!(br.bint(1).unwrap(), None);
    }

    #[test]
    fn bint_32_test() {
        let x = [0x12, 0x34, 0x56, 0x78].as_slice();
        let mut br = BitReader::new(x, 3);
        assert_eq!(br.bint(32).unwrap(), Some(0x1234_5678));
    }

    #[test]
    fn short_bint_test() {
        let x = [0xff, 0xff].as_slice();
        let mut br = BitReader::new(x, 16);
        assert_eq!(br.bint(32).unwrap(), None);
    }

    #[test]
    fn byte_test() {
        let x = "Hello, world!".as_bytes();
        // A one byte buffer forces a refill for every byte
        let mut br = BitReader::new(x, 1);
        assert_eq!(br.byte().unwrap(), Some(b'H'));
        assert_eq!(br.byte().unwrap(), Some(b'e'));
        assert_eq!(br.byte().unwrap(), Some(b'l'));
        assert_eq!(br.byte().unwrap(), Some(b'l'));
    }

    #[test]
    fn unaligned_byte_test() {
        let x = [0b1010_1010, 0b1000_0000].as_slice();
        let mut br = BitReader::new(x, 16);
        assert_eq!(br.bit().unwrap(), Some(true));
        assert_eq!(br.byte().unwrap(), Some(0b0101_0101));
    }

    #[test]
    fn loc_test() {
        let x = "Hello, world!".as_bytes();
        let mut br = BitReader::new(x, 16);
        for _ in 0..5 {
            br.byte().unwrap();
        }
        br.bit().unwrap();
        assert_eq!(br.loc(), "[5.1]");
    }

    #[test]
    fn loc_after_refill_test() {
        // Checking for data part way through a byte refills the buffer under the current byte
        let x = [0xAA, 0x55].as_slice();
        let mut br = BitReader::new(x, 1);
        assert_eq!(br.bit().unwrap(), Some(true));
        assert!(br.have_data().unwrap());
        assert_eq!(br.loc(), "[0.1]");
        // The rest of the first byte is still read before the refilled one
        assert_eq!(br.bint(7).unwrap(), Some(0b010_1010));
        assert_eq!(br.byte().unwrap(), Some(0x55));
        assert_eq!(br.loc(), "[1.0]");
    }

    #[test]
    fn empty_source_test() {
        let x: &[u8] = &[];
        let mut br = BitReader::new(x, 16);
        assert!(!br.have_data().unwrap());
        assert_eq!(br.bit().unwrap(), None);
    }
}
