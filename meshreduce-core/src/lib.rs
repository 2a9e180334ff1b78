//! Core data structures for meshreduce
//!
//! This crate provides the plain indexed triangle mesh exchanged with
//! collaborators, point and vector aliases, and the shared error type.

pub mod point;
pub mod mesh;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix3};

/// Common result type for meshreduce operations
pub type Result<T> = std::result::Result<T, Error>;
