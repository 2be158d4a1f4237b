//! Polynomial helpers over an arbitrary field
//!
//! Polynomials are coefficient slices in little endian order: `poly[i]` is
//! the coefficient of x^i.

use crate::field::{Field, FieldResult};

/// Evaluates `poly(point)` by Horner's method
pub fn evaluate<F: Field>(field: &F, poly: &[F::Elem], point: &F::Elem) -> FieldResult<F::Elem> {
    let mut result = field.zero();
    for coef in poly.iter().rev() {
        result = field.multiply(point, &result)?;
        result = field.add(coef, &result)?;
    }
    Ok(result)
}

/// Builds `(x - g^0) * (x - g^1) * ... * (x - g^(degree-1))`
///
/// The monic x^degree coefficient is omitted, so the result has exactly
/// `degree` coefficients.
pub fn generator_polynomial<F: Field>(
    field: &F,
    generator: &F::Elem,
    degree: usize,
) -> FieldResult<Vec<F::Elem>> {
    let mut result = vec![field.zero(); degree];
    if degree == 0 {
        return Ok(result);
    }
    result[0] = field.one();

    let mut gen_pow = field.one();
    for _ in 0..degree {
        // Multiply the running product by (x - gen_pow)
        let neg = field.negate(&gen_pow)?;
        for j in (0..degree).rev() {
            result[j] = field.multiply(&neg, &result[j])?;
            if j >= 1 {
                result[j] = field.add(&result[j - 1], &result[j])?;
            }
        }
        gen_pow = field.multiply(generator, &gen_pow)?;
    }
    Ok(result)
}
