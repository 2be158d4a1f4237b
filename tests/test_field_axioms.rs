//! Field axiom tests for the prime and binary fields
//!
//! Both fields are exercised through the generic [`Field`] trait, so the same
//! property bodies run against GF(p) and GF(2^n). Properties cover the
//! additive and multiplicative group laws, distributivity, and the checked
//! operations' behavior on values outside the field.

use fieldrs::field::{BinaryField, Field, FieldError, PrimeField};
use proptest::prelude::*;

// ============================================================================
// Generic checks
// ============================================================================

fn check_ring_laws<F: Field>(f: &F, a: &F::Elem, b: &F::Elem, c: &F::Elem) {
    let eq = |x: &F::Elem, y: &F::Elem| f.equals(x, y).unwrap();

    // Commutativity
    assert!(eq(&f.add(a, b).unwrap(), &f.add(b, a).unwrap()));
    assert!(eq(&f.multiply(a, b).unwrap(), &f.multiply(b, a).unwrap()));

    // Associativity
    let ab_c = f.add(&f.add(a, b).unwrap(), c).unwrap();
    let a_bc = f.add(a, &f.add(b, c).unwrap()).unwrap();
    assert!(eq(&ab_c, &a_bc));
    let ab_c = f.multiply(&f.multiply(a, b).unwrap(), c).unwrap();
    let a_bc = f.multiply(a, &f.multiply(b, c).unwrap()).unwrap();
    assert!(eq(&ab_c, &a_bc));

    // Distributivity
    let lhs = f.multiply(a, &f.add(b, c).unwrap()).unwrap();
    let rhs = f
        .add(&f.multiply(a, b).unwrap(), &f.multiply(a, c).unwrap())
        .unwrap();
    assert!(eq(&lhs, &rhs));

    // Identities and additive inverse
    assert!(eq(&f.add(a, &f.zero()).unwrap(), a));
    assert!(eq(&f.multiply(a, &f.one()).unwrap(), a));
    assert!(f.is_zero(&f.add(a, &f.negate(a).unwrap()).unwrap()).unwrap());
    assert!(eq(&f.subtract(&f.add(a, b).unwrap(), b).unwrap(), a));
}

fn check_division<F: Field>(f: &F, a: &F::Elem, b: &F::Elem) {
    if f.is_zero(b).unwrap() {
        assert!(matches!(f.reciprocal(b), Err(FieldError::DivisionByZero)));
        assert!(matches!(f.divide(a, b), Err(FieldError::DivisionByZero)));
        return;
    }
    let inv = f.reciprocal(b).unwrap();
    assert!(f.equals(&f.multiply(b, &inv).unwrap(), &f.one()).unwrap());
    let q = f.divide(a, b).unwrap();
    assert!(f.equals(&f.multiply(&q, b).unwrap(), a).unwrap());
}

// ============================================================================
// Fixed cases
// ============================================================================

#[test]
fn test_prime_field_small_exhaustive() {
    let f = PrimeField::new(7).unwrap();
    for a in 0..7 {
        for b in 0..7 {
            check_division(&f, &a, &b);
            for c in 0..7 {
                check_ring_laws(&f, &a, &b, &c);
            }
        }
    }
}

#[test]
fn test_binary_field_gf16_exhaustive() {
    // x^4 + x + 1
    let f = BinaryField::new(0b1_0011).unwrap();
    for a in 0..16 {
        for b in 0..16 {
            check_division(&f, &a, &b);
            for c in 0..16 {
                check_ring_laws(&f, &a, &b, &c);
            }
        }
    }
}

#[test]
fn test_fermat_little_theorem() {
    let f = PrimeField::new(257).unwrap();
    for a in 1..257 {
        assert_eq!(f.pow(&a, 256).unwrap(), 1);
    }
}

#[test]
fn test_generator_order_gf256() {
    let f = BinaryField::new(0x11D).unwrap();
    // 2 generates the multiplicative group of GF(2^8 / 0x11D)
    let mut seen = std::collections::HashSet::new();
    let mut x = 1;
    for _ in 0..255 {
        assert!(seen.insert(x));
        x = f.multiply(&x, &2).unwrap();
    }
    assert_eq!(x, 1);
}

#[test]
fn test_out_of_range_inputs_rejected() {
    let p = PrimeField::new(13).unwrap();
    assert!(matches!(
        p.add(&13, &0),
        Err(FieldError::NotAnElement { value: 13, size: 13 })
    ));
    assert!(p.negate(&100).is_err());
    assert!(p.equals(&0, &13).is_err());

    let b = BinaryField::new(0b1011).unwrap();
    assert!(matches!(
        b.multiply(&1, &8),
        Err(FieldError::NotAnElement { value: 8, size: 8 })
    ));
    assert!(b.reciprocal(&9).is_err());
}

// ============================================================================
// Property-based tests
// ============================================================================

proptest! {
    /// **Property: GF(p) Ring Laws**
    ///
    /// For a large prime near 2^61, addition and multiplication satisfy
    /// commutativity, associativity, distributivity and identity laws. Large
    /// operands exercise the widened intermediate products.
    #[test]
    fn prop_prime_field_ring_laws(
        a in 0u64..2_305_843_009_213_693_951,
        b in 0u64..2_305_843_009_213_693_951,
        c in 0u64..2_305_843_009_213_693_951,
    ) {
        let f = PrimeField::new(2_305_843_009_213_693_951).unwrap();
        check_ring_laws(&f, &a, &b, &c);
    }

    /// **Property: GF(p) Division**
    ///
    /// (a / b) * b = a for all b != 0
    #[test]
    fn prop_prime_field_division(
        a in 0u64..1_000_000_007,
        b in 0u64..1_000_000_007,
    ) {
        let f = PrimeField::new(1_000_000_007).unwrap();
        check_division(&f, &a, &b);
    }

    /// **Property: GF(2^16) Ring Laws**
    #[test]
    fn prop_binary_field_ring_laws(
        a in 0u32..65536,
        b in 0u32..65536,
        c in 0u32..65536,
    ) {
        // x^16 + x^12 + x^3 + x + 1
        let f = BinaryField::new(0x1100B).unwrap();
        check_ring_laws(&f, &a, &b, &c);
    }

    /// **Property: GF(2^16) Division**
    #[test]
    fn prop_binary_field_division(a in 0u32..65536, b in 0u32..65536) {
        let f = BinaryField::new(0x1100B).unwrap();
        check_division(&f, &a, &b);
    }

    /// **Property: Binary Addition Is XOR**
    ///
    /// Every element is its own additive inverse.
    #[test]
    fn prop_binary_field_characteristic_two(a in 0u32..256, b in 0u32..256) {
        let f = BinaryField::new(0x11D).unwrap();
        prop_assert_eq!(f.add(&a, &b).unwrap(), a ^ b);
        prop_assert_eq!(f.add(&a, &a).unwrap(), 0);
    }

    /// **Property: Power Adds Exponents**
    ///
    /// a^m * a^n = a^(m+n)
    #[test]
    fn prop_pow_adds_exponents(a in 0u32..256, m in 0u64..600, n in 0u64..600) {
        let f = BinaryField::new(0x11D).unwrap();
        let lhs = f.multiply(&f.pow(&a, m).unwrap(), &f.pow(&a, n).unwrap()).unwrap();
        prop_assert_eq!(lhs, f.pow(&a, m + n).unwrap());
    }
}
