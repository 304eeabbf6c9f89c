//! dynamic-matrix: owned dynamic vectors and square matrices.
//!
//! The crate provides `DynamicVector<T>` and `DynamicMatrix<T>` with checked
//! indexing, element-wise and product arithmetic, and whitespace-delimited
//! text I/O. Every fallible operation returns [`error::Result`]; size bounds
//! come from a [`config::Limits`] value supplied at construction.
pub mod config;
pub mod error;
pub mod io;
pub mod math;

pub use config::{Limits, MAX_MATRIX_SIZE, MAX_VECTOR_SIZE};
pub use error::{LinalgError, Result};
pub use io::TokenReader;
pub use math::{DynamicMatrix, DynamicVector, RowMut};
