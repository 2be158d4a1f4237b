//! Binary extension field GF(2^n)
//!
//! Each element is a polynomial over GF(2) of degree less than n, packed as
//! bits in natural order: bit k is the coefficient of x^k. The modulus is
//! packed the same way, so x^8 + x^4 + x^3 + x^2 + 1 is `0x11D`.
//!
//! Addition is XOR. Multiplication is shift-and-add with a fold by the
//! modulus whenever the running multiplicand reaches degree n. Reciprocals
//! use the extended Euclidean algorithm on polynomials.

use super::{Field, FieldError, FieldResult};

/// A Galois field of the form GF(2^n / modulus)
///
/// The modulus must be irreducible over GF(2); that is not checked here and
/// surfaces as [`FieldError::ModulusNotIrreducible`] from `reciprocal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinaryField {
    modulus: u32,
    size: u32,
}

impl BinaryField {
    /// Creates a field from a modulus of degree 1 to 31
    pub fn new(modulus: u32) -> FieldResult<Self> {
        match modulus {
            0 => Err(FieldError::InvalidModulus(
                "division by zero modulus".to_string(),
            )),
            1 => Err(FieldError::InvalidModulus("degenerate field".to_string())),
            _ => {
                let degree = 31 - modulus.leading_zeros();
                Ok(Self {
                    modulus,
                    size: 1 << degree,
                })
            }
        }
    }

    pub fn modulus(&self) -> u32 {
        self.modulus
    }

    /// Number of elements, 2^degree
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn degree(&self) -> u32 {
        self.size.trailing_zeros()
    }

    #[inline]
    fn check(&self, x: u32) -> FieldResult<u32> {
        if x < self.size {
            Ok(x)
        } else {
            Err(FieldError::NotAnElement {
                value: x as u64,
                size: self.size as u64,
            })
        }
    }

    // Both arguments must already be in range
    #[inline]
    fn multiply_raw(&self, mut x: u32, mut y: u32) -> u32 {
        let mut result = 0;
        while y != 0 {
            if y & 1 != 0 {
                result ^= x;
            }
            x <<= 1;
            if x >= self.size {
                x ^= self.modulus;
            }
            y >>= 1;
        }
        result
    }
}

/// Polynomial long division over GF(2), returning (x div y, x mod y)
fn divide_and_remainder(mut x: u32, y: u32) -> (u32, u32) {
    debug_assert!(y != 0);
    let ylen = 32 - y.leading_zeros();
    let xlen = 32 - x.leading_zeros();
    if xlen < ylen {
        return (0, x);
    }

    let mut quotient = 0;
    for i in (0..=(xlen - ylen)).rev() {
        if 32 - x.leading_zeros() == ylen + i {
            x ^= y << i;
            quotient |= 1 << i;
        }
    }
    (quotient, x)
}

impl Field for BinaryField {
    type Elem = u32;

    fn zero(&self) -> u32 {
        0
    }

    fn one(&self) -> u32 {
        1
    }

    fn equals(&self, x: &u32, y: &u32) -> FieldResult<bool> {
        Ok(self.check(*x)? == self.check(*y)?)
    }

    fn validate(&self, x: &u32) -> FieldResult<()> {
        self.check(*x).map(|_| ())
    }

    fn negate(&self, x: &u32) -> FieldResult<u32> {
        self.check(*x)
    }

    fn add(&self, x: &u32, y: &u32) -> FieldResult<u32> {
        Ok(self.check(*x)? ^ self.check(*y)?)
    }

    fn subtract(&self, x: &u32, y: &u32) -> FieldResult<u32> {
        self.add(x, y)
    }

    fn multiply(&self, x: &u32, y: &u32) -> FieldResult<u32> {
        Ok(self.multiply_raw(self.check(*x)?, self.check(*y)?))
    }

    fn reciprocal(&self, w: &u32) -> FieldResult<u32> {
        let w = self.check(*w)?;
        if w == 0 {
            return Err(FieldError::DivisionByZero);
        }

        let (mut x, mut y) = (self.modulus, w);
        let (mut a, mut b) = (0u32, 1u32);
        while y != 0 {
            let (mut q, r) = divide_and_remainder(x, y);
            // Only possible on the first step, when y == 1; the modulus is zero in the field
            if q == self.modulus {
                q = 0;
            }
            let c = a ^ self.multiply_raw(q, b);
            x = y;
            y = r;
            a = b;
            b = c;
        }

        if x == 1 {
            Ok(a)
        } else {
            Err(FieldError::ModulusNotIrreducible(self.modulus))
        }
    }
}
