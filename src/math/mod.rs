//! Heap-backed containers: `DynamicVector` (1D) and `DynamicMatrix`
//! (square 2D, stored as a vector of row vectors).
pub mod matrix;
pub mod vector;

pub use matrix::{DynamicMatrix, RowMut};
pub use vector::DynamicVector;
