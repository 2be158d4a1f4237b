//! Prime field Z_p
//!
//! Elements are integers in `[0, p)`. Products are formed in `u128`, so any
//! modulus that fits in a `u64` works without overflow.

use super::{Field, FieldError, FieldResult};

/// A finite field of the form Z_p, where p is a prime number
///
/// Primality is not checked by the constructor. A composite modulus makes
/// `reciprocal` fail with [`FieldError::ModulusNotPrime`] for some inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimeField {
    modulus: u64,
}

impl PrimeField {
    pub fn new(modulus: u64) -> FieldResult<Self> {
        if modulus < 2 {
            return Err(FieldError::InvalidModulus(format!(
                "prime modulus must be at least 2, got {}",
                modulus
            )));
        }
        Ok(Self { modulus })
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Number of elements, equal to the modulus
    pub fn size(&self) -> u64 {
        self.modulus
    }

    /// Validates a raw integer as an element of this field
    pub fn element(&self, value: u64) -> FieldResult<u64> {
        self.check(value)
    }

    #[inline]
    fn check(&self, x: u64) -> FieldResult<u64> {
        if x < self.modulus {
            Ok(x)
        } else {
            Err(FieldError::NotAnElement {
                value: x,
                size: self.modulus,
            })
        }
    }
}

impl Field for PrimeField {
    type Elem = u64;

    fn zero(&self) -> u64 {
        0
    }

    fn one(&self) -> u64 {
        1
    }

    fn equals(&self, x: &u64, y: &u64) -> FieldResult<bool> {
        Ok(self.check(*x)? == self.check(*y)?)
    }

    fn validate(&self, x: &u64) -> FieldResult<()> {
        self.check(*x).map(|_| ())
    }

    fn negate(&self, x: &u64) -> FieldResult<u64> {
        let x = self.check(*x)?;
        Ok(if x == 0 { 0 } else { self.modulus - x })
    }

    fn add(&self, x: &u64, y: &u64) -> FieldResult<u64> {
        let sum = self.check(*x)? as u128 + self.check(*y)? as u128;
        Ok((sum % self.modulus as u128) as u64)
    }

    fn subtract(&self, x: &u64, y: &u64) -> FieldResult<u64> {
        let (x, y) = (self.check(*x)?, self.check(*y)?);
        Ok(if x >= y { x - y } else { self.modulus - (y - x) })
    }

    fn multiply(&self, x: &u64, y: &u64) -> FieldResult<u64> {
        let product = self.check(*x)? as u128 * self.check(*y)? as u128;
        Ok((product % self.modulus as u128) as u64)
    }

    fn reciprocal(&self, w: &u64) -> FieldResult<u64> {
        let w = self.check(*w)?;
        if w == 0 {
            return Err(FieldError::DivisionByZero);
        }

        // Extended Euclidean algorithm, keeping a * w == x (mod p)
        let modulus = self.modulus as i128;
        let (mut x, mut y) = (modulus, w as i128);
        let (mut a, mut b) = (0i128, 1i128);
        while y != 0 {
            let (q, r) = (x / y, x % y);
            let c = a - q * b;
            x = y;
            y = r;
            a = b;
            b = c;
        }

        if x == 1 {
            Ok(a.rem_euclid(modulus) as u64)
        } else {
            Err(FieldError::ModulusNotPrime(self.modulus))
        }
    }
}
