use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::{LinalgError, Result};

/// Largest vector length accepted by the default limits.
pub const MAX_VECTOR_SIZE: usize = 100_000_000;

/// Largest matrix dimension accepted by the default limits.
pub const MAX_MATRIX_SIZE: usize = 10_000;

/// Size bounds enforced by every vector and matrix constructor.
///
/// The defaults are [`MAX_VECTOR_SIZE`] and [`MAX_MATRIX_SIZE`]. A custom
/// `Limits` is built once (or loaded from JSON) and handed to the
/// `with_limits` constructors; it is never stored globally. Every way of
/// building one (`new`, `Default`, deserialization) goes through
/// [`Limits::validate`].
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "LimitsDocument")]
pub struct Limits {
    max_vector_size: usize,
    max_matrix_size: usize,
}

/// Unchecked form of [`Limits`] as it appears in a JSON document.
#[derive(Deserialize)]
#[serde(default)]
struct LimitsDocument {
    max_vector_size: usize,
    max_matrix_size: usize,
}

impl Default for LimitsDocument {
    fn default() -> Self {
        Self {
            max_vector_size: MAX_VECTOR_SIZE,
            max_matrix_size: MAX_MATRIX_SIZE,
        }
    }
}

impl TryFrom<LimitsDocument> for Limits {
    type Error = LinalgError;

    fn try_from(doc: LimitsDocument) -> Result<Self> {
        Limits::new(doc.max_vector_size, doc.max_matrix_size)
    }
}

impl Limits {
    pub fn new(max_vector_size: usize, max_matrix_size: usize) -> Result<Self> {
        let limits = Self {
            max_vector_size,
            max_matrix_size,
        };
        limits.validate()?;
        Ok(limits)
    }

    pub fn max_vector_size(&self) -> usize {
        self.max_vector_size
    }

    pub fn max_matrix_size(&self) -> usize {
        self.max_matrix_size
    }

    /// Check that both bounds are usable and that a matrix row of the
    /// maximum dimension is itself a valid vector.
    pub fn validate(&self) -> Result<()> {
        if self.max_vector_size == 0 || self.max_matrix_size == 0 {
            return Err(LinalgError::Config(
                "size limits must be greater than zero".to_string(),
            ));
        }
        if self.max_matrix_size > self.max_vector_size {
            return Err(LinalgError::Config(format!(
                "max_matrix_size ({}) exceeds max_vector_size ({})",
                self.max_matrix_size, self.max_vector_size
            )));
        }
        Ok(())
    }

    /// Parse limits from a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let limits: Limits = serde_json::from_str(json)
            .map_err(|e| LinalgError::Config(format!("Failed to parse limits: {}", e)))?;
        log::debug!(
            "Loaded limits: max_vector_size={}, max_matrix_size={}",
            limits.max_vector_size,
            limits.max_matrix_size
        );
        Ok(limits)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Self::from_json_str(&json)
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_vector_size: MAX_VECTOR_SIZE,
            max_matrix_size: MAX_MATRIX_SIZE,
        }
    }
}
