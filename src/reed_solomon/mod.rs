//! Reed-Solomon Error Correction Module
//!
//! Systematic Reed-Solomon codes over any [`Field`](crate::field::Field).
//! Encoding is polynomial division by the generator polynomial; decoding
//! computes syndromes and solves two linear systems with
//! [`Matrix`](crate::matrix::Matrix) to locate and repair corrupted values.

pub mod codec;
pub mod error;
pub mod polynomial;

pub use codec::*;
pub use error::*;
