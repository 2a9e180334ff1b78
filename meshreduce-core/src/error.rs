//! Error types for meshreduce

use thiserror::Error;

/// Main error type for meshreduce operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
