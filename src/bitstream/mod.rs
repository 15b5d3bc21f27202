//! The bitstream module forms the I/O subsystem for huffpack.
//!
//! Both halves track their position inside the current byte with a one-bit cursor mask that starts
//! at the top bit (0b1000_0000) and walks right, so bits are always packed MSB-first. Whole bytes
//! move through a bounded buffer that is flushed to the sink (or refilled from the source) when it
//! is exhausted.
//!
//! Every cursor lives inside its own BitWriter or BitReader, so independent compress/decompress
//! calls never share state.
//!
pub mod bitreader;
pub mod bitwriter;

/// Cursor mask for the most significant bit of a byte. Every new byte starts here.
pub(crate) const TOP_BIT: u8 = 0b1000_0000;
