use thiserror::Error;

/// Errors raised by vector and matrix construction, access and arithmetic.
#[derive(Debug, Error)]
pub enum LinalgError {
    /// Requested length is zero or above the configured maximum.
    #[error("Invalid size {size}: {reason} (maximum is {max})")]
    InvalidSize {
        size: usize,
        max: usize,
        reason: &'static str,
    },

    /// Checked access past the end of a container.
    #[error("Index out of range: {index} is out of bounds for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Operands of a binary operation have incompatible dimensions.
    #[error("Size mismatch: left operand has size {lhs}, right operand has size {rhs}")]
    SizeMismatch { lhs: usize, rhs: usize },

    /// Caller-supplied buffer does not satisfy the constructor's precondition.
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    /// Text input ended before every element was read.
    #[error("Unexpected end of input: expected {expected} tokens, found {found}")]
    UnexpectedEof { expected: usize, found: usize },

    #[error("Failed to parse token {token:?} at position {position}: {message}")]
    Parse {
        position: usize,
        token: String,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Limits document is malformed or inconsistent.
    #[error("Invalid limits configuration: {0}")]
    Config(String),
}

impl LinalgError {
    pub(crate) fn too_small(size: usize, max: usize) -> Self {
        LinalgError::InvalidSize {
            size,
            max,
            reason: "size must be greater than zero",
        }
    }

    pub(crate) fn too_large(size: usize, max: usize) -> Self {
        LinalgError::InvalidSize {
            size,
            max,
            reason: "size is too large",
        }
    }
}

/// Result type for vector and matrix operations
pub type Result<T> = std::result::Result<T, LinalgError>;

/// Validate a requested container length against `max`.
pub(crate) fn check_size(size: usize, max: usize) -> Result<()> {
    if size == 0 {
        return Err(LinalgError::too_small(size, max));
    }
    if size > max {
        return Err(LinalgError::too_large(size, max));
    }
    Ok(())
}

pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(LinalgError::IndexOutOfRange { index, len });
    }
    Ok(())
}
