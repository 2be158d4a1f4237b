//! Error types for Reed-Solomon encoding and decoding

use crate::field::FieldError;
use crate::matrix::MatrixError;
use thiserror::Error;

/// Precondition and arithmetic failures of the codec
///
/// An uncorrectable codeword is not an error; see [`DecodeFailure`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RsError {
    /// Message or ECC length is zero, or their sum overflows
    #[error("Invalid message or ECC length: message_len={message_len}, ecc_len={ecc_len}")]
    InvalidLengths { message_len: usize, ecc_len: usize },

    #[error("Invalid message length: expected {expected}, got {actual}")]
    MessageLength { expected: usize, actual: usize },

    #[error("Invalid codeword length: expected {expected}, got {actual}")]
    CodewordLength { expected: usize, actual: usize },

    #[error("Number of errors to correct is out of range: {requested} (max {max})")]
    CorrectionBudget { requested: usize, max: usize },

    #[error("Field error: {0}")]
    Field(#[from] FieldError),

    #[error("Matrix error: {0}")]
    Matrix(#[from] MatrixError),
}

/// Result type for Reed-Solomon operations
pub type RsResult<T> = Result<T, RsError>;

/// Why a codeword could not be decoded
///
/// These are routine outcomes once the number of corrupted values exceeds the
/// correction budget, so they are returned as values rather than errors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeFailure {
    /// Syndromes are non-zero but the correction budget is zero
    #[error("errors detected but correction is disabled")]
    CorrectionDisabled,

    /// The error locator system has no solution
    #[error("error locator system is inconsistent")]
    InconsistentLocator,

    /// The locator polynomial has more roots than the correction budget
    #[error("error locator has too many roots")]
    TooManyRoots,

    /// The locator polynomial has no roots among the codeword positions
    #[error("error locator has no roots")]
    NoRoots,

    /// The error value system has no solution
    #[error("error value system is inconsistent")]
    InconsistentErrorValues,

    /// The error value system has no unique solution
    #[error("error value system is under-determined")]
    UnderdeterminedErrorValues,
}
