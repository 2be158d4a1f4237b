//! Finite field abstraction
//!
//! ## Field Contract
//!
//! Every [`Field`] implementation must satisfy the field axioms for all valid
//! elements `x`, `y`, `z`:
//!
//! - `0 + x = x` and `1 * x = x`, with `0 != 1`
//! - addition and multiplication are commutative and associative
//! - `x * (y + z) = x * y + x * z`
//! - every `x` has an additive inverse `-x`, every `x != 0` has a reciprocal
//!
//! None of this is verified at runtime. A field whose modulus is not prime
//! (or not irreducible) only shows up later, when `reciprocal` fails to reach
//! a gcd of one.
//!
//! ## Element Validity
//!
//! Elements are plain values (`u64` for [`PrimeField`], `u32` for
//! [`BinaryField`]) that only have meaning relative to the field that produced
//! them. Every operation range-checks its arguments and fails with
//! [`FieldError::NotAnElement`] instead of silently reducing out-of-range input.

pub mod binary;
pub mod prime;

pub use binary::BinaryField;
pub use prime::PrimeField;

use std::fmt::Debug;
use thiserror::Error;

/// Errors raised by field arithmetic
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Argument lies outside the field's element range
    #[error("Not an element of this field: {value} (field size {size})")]
    NotAnElement { value: u64, size: u64 },

    /// Reciprocal (or division) by the additive identity
    #[error("Division by zero")]
    DivisionByZero,

    /// Extended Euclid ended with gcd != 1 for a prime field
    #[error("Field modulus {0} is not prime")]
    ModulusNotPrime(u64),

    /// Extended Euclid ended with gcd != 1 for a binary field
    #[error("Field modulus {0:#x} is not irreducible")]
    ModulusNotIrreducible(u32),

    /// Modulus rejected at construction
    #[error("Invalid field modulus: {0}")]
    InvalidModulus(String),
}

/// Result type for field operations
pub type FieldResult<T> = Result<T, FieldError>;

/// A field in abstract algebra, operating on elements of type [`Field::Elem`]
///
/// Fields are stateless once constructed and are shared by reference between
/// every matrix and codec that computes with them.
pub trait Field {
    type Elem: Clone + Debug;

    /// Additive identity
    fn zero(&self) -> Self::Elem;

    /// Multiplicative identity
    fn one(&self) -> Self::Elem;

    /// Tests two elements for equality under this field.
    ///
    /// Elements are not required to implement `PartialEq` consistently with the
    /// field, so callers compare through here.
    fn equals(&self, x: &Self::Elem, y: &Self::Elem) -> FieldResult<bool>;

    /// Checks that `x` belongs to this field
    fn validate(&self, x: &Self::Elem) -> FieldResult<()> {
        self.equals(x, x).map(|_| ())
    }

    fn negate(&self, x: &Self::Elem) -> FieldResult<Self::Elem>;

    fn add(&self, x: &Self::Elem, y: &Self::Elem) -> FieldResult<Self::Elem>;

    fn subtract(&self, x: &Self::Elem, y: &Self::Elem) -> FieldResult<Self::Elem> {
        let neg = self.negate(y)?;
        self.add(x, &neg)
    }

    fn multiply(&self, x: &Self::Elem, y: &Self::Elem) -> FieldResult<Self::Elem>;

    /// Multiplicative inverse. Fails with [`FieldError::DivisionByZero`] for zero.
    fn reciprocal(&self, x: &Self::Elem) -> FieldResult<Self::Elem>;

    fn divide(&self, x: &Self::Elem, y: &Self::Elem) -> FieldResult<Self::Elem> {
        let rec = self.reciprocal(y)?;
        self.multiply(x, &rec)
    }

    fn is_zero(&self, x: &Self::Elem) -> FieldResult<bool> {
        self.equals(x, &self.zero())
    }

    /// Raises `base` to a non-negative power by square-and-multiply
    fn pow(&self, base: &Self::Elem, mut exp: u64) -> FieldResult<Self::Elem> {
        self.validate(base)?;
        let mut result = self.one();
        let mut square = base.clone();
        while exp != 0 {
            if exp & 1 != 0 {
                result = self.multiply(&result, &square)?;
            }
            exp >>= 1;
            if exp != 0 {
                square = self.multiply(&square, &square)?;
            }
        }
        Ok(result)
    }
}

/// Tests whether every value in `values` equals the field's zero
pub fn all_zero<F: Field>(field: &F, values: &[F::Elem]) -> FieldResult<bool> {
    for val in values {
        if !field.is_zero(val)? {
            return Ok(false);
        }
    }
    Ok(true)
}
