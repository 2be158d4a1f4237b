//! Randomized exercise harness for the Reed-Solomon codec
//!
//! Three drivers, all over a [`BinaryField`](crate::field::BinaryField):
//!
//! - [`show_example`]: encode one random message, corrupt it, decode it
//! - [`run_trials`]: repeat decode attempts with an exact error count
//! - [`stress`]: random code parameters per round, rounds run on a rayon pool
//!
//! Any wrong or failed decode with no more errors than the correction
//! budget is a codec bug and is reported as [`DemoError::GuaranteeViolated`].

pub mod config;
pub mod trial;

pub use config::{DemoConfig, StressConfig};
pub use trial::*;

use crate::field::FieldError;
use crate::reed_solomon::RsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("Codec error: {0}")]
    Codec(#[from] RsError),

    #[error("Field error: {0}")]
    Field(#[from] FieldError),

    #[error(
        "Decoding should have succeeded: message_len={message_len}, ecc_len={ecc_len}, errors={num_errors}"
    )]
    GuaranteeViolated {
        message_len: usize,
        ecc_len: usize,
        num_errors: usize,
    },

    #[error("Error count {num_errors} exceeds codeword length {codeword_len}")]
    TooManyErrors {
        num_errors: usize,
        codeword_len: usize,
    },

    /// No codeword of length 2 or more fits in the field
    #[error("Field of size {size} is too small for stress rounds (max codeword length {limit})")]
    FieldTooSmall { size: u32, limit: usize },

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type DemoResult<T> = Result<T, DemoError>;
