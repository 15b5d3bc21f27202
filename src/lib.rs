//! Static Huffman compression of byte streams.
//!
//! huffpack counts the byte frequencies of its input, builds one optimal prefix code for the
//! whole stream and writes a self-describing result: the code tree, the symbol count and the
//! packed payload. Decompression rebuilds the tree from the stream and reproduces the input
//! exactly.
//!
//! ```
//! use huffpack::{compress_bytes, decompress_bytes};
//!
//! let packed = compress_bytes(b"AAAB")?;
//! assert_eq!(decompress_bytes(&packed)?, b"AAAB");
//! # Ok::<(), huffpack::HuffError>(())
//! ```
//!
//! Basic usage of the binary is as follows:
//!
//! `$> huffpack -z notes.txt notes.huf`
//!
//! Without -z or -d the first byte of the input file picks the mode: `c` compresses the rest of
//! the file, anything else decompresses it.
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

/// One symbol slot per possible byte value.
pub const ALPHABET_SIZE: usize = 256;

pub use compression::compress::{compress, compress_bytes};
pub use compression::decompress::{decompress, decompress_bytes};
pub use error::{HuffError, Result};
pub use tools::cli::CodecOpts;
