//! Error types for erasure coding operations

use thiserror::Error;

/// Errors that can occur during erasure coding operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// More shards than GF(2^8) can address
    #[error("too many shards: {data_shards} data + {parity_shards} parity exceeds 256")]
    TooManyShards {
        data_shards: usize,
        parity_shards: usize,
    },

    /// Shard counts or matrix dimensions that cannot form a code
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// Argument rejected by the shared validator before any work
    #[error("invalid argument: {0}")]
    ArgumentInvalid(String),

    /// Scratch buffer shorter than the processing window
    #[error("temp buffer has {length} bytes, need at least {required}")]
    BufferTooSmall { length: usize, required: usize },

    /// Fewer surviving shards than data shards
    #[error("not enough shards present: {present} of {total}, need at least {required}")]
    InsufficientShards {
        present: usize,
        total: usize,
        required: usize,
    },

    /// Matrix has no inverse
    #[error("matrix is singular")]
    Singular,

    /// Matrix dimensions do not conform for the requested operation
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Row or column index outside the matrix
    #[error("index out of range: {0}")]
    IndexOutOfRange(String),

    /// Division by zero in GF(2^8)
    #[error("division by zero in GF(2^8)")]
    DivisionByZero,
}

/// Type alias for Result with the crate error
pub type Result<T> = std::result::Result<T, Error>;
