//! Systematic Reed-Solomon erasure coding over GF(2^8)
//!
//! K data shards plus M parity shards, any K of the K+M recover everything.
//! The data shards pass through the encoding unchanged.

pub mod args;
pub mod coding_loop;
pub mod error;
pub mod galois;
pub mod matrix;
pub mod reed_solomon;

pub use coding_loop::{CodingLoop, ALL_CODING_LOOPS, DEFAULT_CODING_LOOP};
pub use error::{Error, Result};
pub use matrix::Matrix;
pub use reed_solomon::ReedSolomon;
