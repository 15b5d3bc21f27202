//! Error types for the huffpack codec.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, HuffError>;

/// Everything that can go wrong while compressing or decompressing a stream.
#[derive(Debug, Error)]
pub enum HuffError {
    /// I/O error from the underlying source or sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The serialized tree at the head of the stream is malformed.
    #[error("corrupt tree: {0}")]
    CorruptTree(&'static str),

    /// The payload bits do not describe a valid path through the tree.
    #[error("corrupt payload: {0}")]
    CorruptPayload(&'static str),

    /// The payload ended before the declared number of symbols was decoded.
    #[error("truncated stream: expected {expected} symbols, decoded {decoded}")]
    Truncated { expected: u32, decoded: u32 },

    /// The symbol count header is 32 bits wide.
    #[error("input of {0} bytes is too large, the limit is 4294967295")]
    InputTooLarge(u64),

    /// The second pass over the source did not see what the first pass counted.
    #[error("source changed between the analysis and encoding passes")]
    SourceChanged,
}
