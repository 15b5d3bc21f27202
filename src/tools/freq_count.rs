use std::io::{ErrorKind, Read};

use log::{debug, info};

use crate::error::{HuffError, Result};
use crate::ALPHABET_SIZE;

/// Frequency table with one u32 slot per byte value.
pub type Weights = [u32; ALPHABET_SIZE];

/// Adds the byte counts of `data` into `freqs`.
pub fn freqs(data: &[u8], freqs: &mut Weights) {
    data.iter().for_each(|&el| freqs[el as usize] += 1);
}

/// Reads the whole source through a `buffer_size` staging buffer and counts every byte value.
/// Returns None if the source had no data at all.
pub fn read_freqs<R: Read>(source: &mut R, buffer_size: usize) -> Result<Option<Weights>> {
    let mut buf = vec![0_u8; buffer_size.max(1)];
    let mut weights = [0_u32; ALPHABET_SIZE];
    let mut total: u64 = 0;

    loop {
        let read = match source.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        // The symbol count goes on the stream as a u32. Check before counting so no slot wraps.
        total += read as u64;
        if total > u32::MAX as u64 {
            return Err(HuffError::InputTooLarge(total));
        }
        freqs(&buf[..read], &mut weights);
    }

    if total == 0 {
        info!("Input is empty, nothing to compress");
        return Ok(None);
    }
    debug!(
        "Counted {} bytes over {} distinct symbols",
        total,
        weights.iter().filter(|&&w| w > 0).count()
    );
    Ok(Some(weights))
}
