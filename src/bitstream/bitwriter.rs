//! BitWriter: packs single bits, codes and fixed-width fields into bytes and hands them to a sink.

use std::io::{self, Write};

use log::trace;

use super::TOP_BIT;

/// Writes a bitstream to any sink that supports write_all().
pub struct BitWriter<W> {
    /// Output buffer holding completed bytes until it is flushed to the sink.
    output: Vec<u8>,
    /// Maximum number of bytes held in the output buffer.
    capacity: usize,
    /// Byte currently being assembled.
    byte: u8,
    /// Cursor into the byte being assembled. Zero means the byte is full.
    mask: u8,
    /// Total bytes handed to the sink so far.
    written: u64,
    /// Handle to the output stream
    sink: W,
}

impl<W: Write> BitWriter<W> {
    /// Create a new BitWriter which flushes to the sink every `capacity` bytes.
    pub fn new(sink: W, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            output: Vec::with_capacity(capacity),
            capacity,
            byte: 0,
            mask: TOP_BIT,
            written: 0,
            sink,
        }
    }

    /// Put a single bit on the stream. Zero bits only advance the cursor.
    pub fn out_bit(&mut self, bit: bool) -> io::Result<()> {
        if bit {
            self.byte |= self.mask;
        }
        self.mask >>= 1;
        if self.mask == 0 {
            self.push_byte()?;
        }
        Ok(())
    }

    /// Put a variable-length code on the stream. `marker` is a single set bit marking the most
    /// significant bit of the code; bits are written from the marker down to bit 0.
    pub fn out_code(&mut self, code: u64, mut marker: u64) -> io::Result<()> {
        debug_assert_eq!(marker.count_ones(), 1, "code marker must be one-hot");
        while marker != 0 {
            self.out_bit((code & marker) != 0)?;
            marker >>= 1;
        }
        Ok(())
    }

    /// Put a byte on the stream, most significant bit first.
    pub fn out8(&mut self, data: u8) -> io::Result<()> {
        self.out_code(data as u64, 1 << 7)
    }

    /// Put a u32 on the stream, most significant bit first.
    pub fn out32(&mut self, data: u32) -> io::Result<()> {
        self.out_code(data as u64, 1 << 31)
    }

    /// Move the completed byte into the output buffer, flushing the buffer when it is full.
    fn push_byte(&mut self) -> io::Result<()> {
        self.output.push(self.byte);
        self.byte = 0;
        self.mask = TOP_BIT;
        if self.output.len() >= self.capacity {
            self.drain()?;
        }
        Ok(())
    }

    /// Write the buffered bytes to the sink.
    fn drain(&mut self) -> io::Result<()> {
        if !self.output.is_empty() {
            trace!("BitWriter flushing {} bytes", self.output.len());
            self.sink.write_all(&self.output)?;
            self.written += self.output.len() as u64;
            self.output.clear();
        }
        Ok(())
    }

    /// Flushes the remaining bits (1-7) of a partial byte, padding with 0s in the least
    /// significant bits, then writes everything buffered to the sink. Flush MUST be called
    /// before the writer is dropped or data may be left in the buffer.
    pub fn flush(&mut self) -> io::Result<()> {
        if self.mask != TOP_BIT {
            self.push_byte()?;
        }
        self.drain()?;
        self.sink.flush()
    }

    /// Number of bytes handed to the sink so far (not counting anything still buffered).
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush and give back the sink.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.flush()?;
        Ok(self.sink)
    }
}

#[cfg(test)]
mod test {
    use super::BitWriter;

    #[test]
    fn out8_test() {
        let mut bw = BitWriter::new(Vec::new(), 16);
        bw.out8(b'x').unwrap();
        let out = bw.into_inner().unwrap();
        assert_eq!(out, "x".as_bytes());
    }

    #[test]
    fn single_bits_test() {
        let mut bw = BitWriter::new(Vec::new(), 16);
        for bit in [true, false, false, false, false, false, false, true] {
            bw.out_bit(bit).unwrap();
        }
        assert_eq!(bw.into_inner().unwrap(), vec![0b1000_0001]);
    }

    #[test]
    fn last_bits_test() {
        let mut bw = BitWriter::new(Vec::new(), 16);
        bw.out8(255).unwrap();
        bw.out_bit(true).unwrap();
        bw.out_bit(true).unwrap();
        bw.out_bit(false).unwrap();
        bw.out_bit(true).unwrap();
        let out = bw.into_inner().unwrap();
        // Trailing partial byte is zero padded in the low bits
        assert_eq!(out, vec![0b1111_1111, 0b1101_0000]);
    }

    #[test]
    fn out32_test() {
        let mut bw = BitWriter::new(Vec::new(), 16);
        bw.out32(0x1234_5678).unwrap();
        assert_eq!(bw.into_inner().unwrap(), vec![0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn unaligned_out32_test() {
        let mut bw = BitWriter::new(Vec::new(), 16);
        bw.out_bit(true).unwrap();
        bw.out32(0).unwrap();
        bw.out_bit(true).unwrap();
        assert_eq!(
            bw.into_inner().unwrap(),
            vec![0b1000_0000, 0, 0, 0, 0b0100_0000]
        );
    }

    #[test]
    fn out_code_test() {
        let mut bw = BitWriter::new(Vec::new(), 16);
        // code 101 with its marker on bit 2, then code 0 with marker on bit 0
        bw.out_code(0b101, 0b100).unwrap();
        bw.out_code(0, 1).unwrap();
        assert_eq!(bw.into_inner().unwrap(), vec![0b1010_0000]);
    }

    #[test]
    fn small_buffer_flushes_test() {
        let mut bw = BitWriter::new(Vec::new(), 1);
        for b in b"Hello" {
            bw.out8(*b).unwrap();
        }
        // Every completed byte already went to the sink
        assert_eq!(bw.written(), 5);
        assert_eq!(bw.into_inner().unwrap(), b"Hello".to_vec());
    }

    #[test]
    fn empty_flush_test() {
        let mut bw = BitWriter::new(Vec::new(), 4);
        bw.flush().unwrap();
        assert_eq!(bw.written(), 0);
        assert!(bw.into_inner().unwrap().is_empty());
    }
}
