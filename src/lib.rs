pub mod args;
pub mod demo;
pub mod field;
pub mod matrix;
pub mod reed_solomon;

pub use args::{build_cli, parse_args};
pub use field::{BinaryField, Field, FieldError, FieldResult, PrimeField};
pub use matrix::{Matrix, MatrixError, MatrixResult};
pub use reed_solomon::{DecodeFailure, DecodeOutcome, ReedSolomon, RsError, RsResult};
