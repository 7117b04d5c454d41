use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Error, Result};
use crate::field::PrimeField;

/// An element of a [`PrimeField`], always held as its canonical residue in `[0, order)`.
///
/// Elements are immutable; every operation returns a new element. Mixing
/// elements of different fields is a programming error and is caught by
/// debug assertions.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FieldElement {
    field: PrimeField,
    value: BigUint,
}

impl FieldElement {
    /// `value` must already be reduced.
    pub(crate) fn from_parts(field: PrimeField, value: BigUint) -> Self {
        debug_assert!(value < *field.order());
        Self { field, value }
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.value.is_one()
    }

    /// Multiplicative inverse via the extended Euclidean algorithm.
    pub fn inverse(&self) -> Result<Self> {
        if self.value.is_zero() {
            return Err(Error::NoInverse(format!("0 in {}", self.field)));
        }
        let (gcd, inv) = self.extended_gcd();
        if !gcd.is_one() {
            return Err(Error::NoInverse(format!(
                "{} in {} (gcd {gcd})",
                self.value, self.field
            )));
        }
        Ok(inv)
    }

    /// Runs Euclid on `(order, value)` and tracks the Bezout coefficient of
    /// `value` as a field element, so it never goes negative.
    /// Returns `(gcd, t)` with `gcd ≡ t * value (mod order)`.
    fn extended_gcd(&self) -> (BigUint, Self) {
        let mut r0 = self.field.order().clone();
        let mut r1 = self.value.clone();
        let mut t0 = self.field.zero();
        let mut t1 = self.field.one();

        while !r1.is_zero() {
            let (quotient, remainder) = r0.div_rem(&r1);
            r0 = std::mem::replace(&mut r1, remainder);

            let quotient = self.field.element_from_biguint(quotient);
            let t = &t0 - &(&quotient * &t1);
            t0 = std::mem::replace(&mut t1, t);
        }

        (r0, t0)
    }

    pub fn try_div(&self, rhs: &Self) -> Result<Self> {
        Ok(self * &rhs.inverse()?)
    }

    /// Square-and-multiply; `pow(0)` is one.
    pub fn pow(&self, exp: impl Into<BigUint>) -> Self {
        let exp = exp.into();
        let mut result = self.field.one();
        let mut base = self.clone();
        for i in 0..exp.bits() {
            if exp.bit(i) {
                result = result * &base;
            }
            base = &base * &base;
        }
        result
    }

    pub fn to_hex(&self) -> String {
        format!("{:#x}", self.value)
    }

    /// Big-endian bytes, left-padded to the byte width of the field order.
    pub fn to_be_bytes_padded(&self) -> Vec<u8> {
        let width = self.field.order_bytes();
        let bytes = self.value.to_bytes_be();
        let mut out = vec![0u8; width];
        out[width - bytes.len()..].copy_from_slice(&bytes);
        out
    }

    fn assert_same_field(&self, rhs: &Self) {
        debug_assert_eq!(
            self.field, rhs.field,
            "operands belong to different fields"
        );
    }
}

impl Add<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn add(self, rhs: &FieldElement) -> FieldElement {
        self.assert_same_field(rhs);
        self.field.element_from_biguint(&self.value + &rhs.value)
    }
}

impl Add<&FieldElement> for FieldElement {
    type Output = Self;

    fn add(self, rhs: &Self) -> Self {
        &self + rhs
    }
}

impl Sub<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn sub(self, rhs: &FieldElement) -> FieldElement {
        self.assert_same_field(rhs);
        let value = if self.value >= rhs.value {
            &self.value - &rhs.value
        } else {
            &self.value + (self.field.order() - &rhs.value)
        };
        FieldElement::from_parts(self.field.clone(), value)
    }
}

impl Sub<&FieldElement> for FieldElement {
    type Output = Self;

    fn sub(self, rhs: &Self) -> Self {
        &self - rhs
    }
}

impl Mul<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: &FieldElement) -> FieldElement {
        self.assert_same_field(rhs);
        self.field.element_from_biguint(&self.value * &rhs.value)
    }
}

impl Mul<&FieldElement> for FieldElement {
    type Output = Self;

    fn mul(self, rhs: &Self) -> Self {
        &self * rhs
    }
}

impl Neg for &FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        if self.value.is_zero() {
            return self.clone();
        }
        FieldElement::from_parts(self.field.clone(), self.field.order() - &self.value)
    }
}

impl Neg for FieldElement {
    type Output = Self;

    fn neg(self) -> Self {
        -&self
    }
}

impl PartialEq<BigUint> for FieldElement {
    fn eq(&self, other: &BigUint) -> bool {
        self.value == other % self.field.order()
    }
}

impl PartialEq<u64> for FieldElement {
    fn eq(&self, other: &u64) -> bool {
        *self == BigUint::from(*other)
    }
}

impl PartialEq<i64> for FieldElement {
    fn eq(&self, other: &i64) -> bool {
        *self == self.field.element(BigInt::from(*other))
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({} mod {})", self.value, self.field.order())
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::LowerHex for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::LowerHex::fmt(&self.value, f)
    }
}

impl fmt::UpperHex for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::UpperHex::fmt(&self.value, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn field(p: u64) -> PrimeField {
        PrimeField::new(p).unwrap()
    }

    // Helper: convert a u64 to an element of GF(7) quickly
    fn fe7(x: u64) -> FieldElement {
        field(7).element(x)
    }

    fn fe31(x: u64) -> FieldElement {
        field(31).element(x)
    }

    #[test]
    fn test_gf23_example() {
        let f = field(23);
        let n = f.element(1);
        let m = f.element(9);
        assert_eq!(&n + &m, 10u64);
        assert_eq!(&n - &m, 15u64);
        assert_eq!(&n * &m, 9u64);
        assert_eq!(n.try_div(&m).unwrap(), 18u64);
        assert_eq!(n.pow(5u32), 1u64);
        assert_eq!(-&n, 22u64);
        assert_eq!(n.inverse().unwrap(), 1u64);
    }

    #[test]
    fn test_div_mod31() {
        assert_eq!(fe31(3).try_div(&fe31(24)).unwrap(), fe31(4));

        let a_inv = fe31(17).inverse().unwrap();
        assert_eq!(&a_inv * &a_inv * &a_inv, fe31(29));

        let a_inv = fe31(4).inverse().unwrap();
        assert_eq!(&a_inv * &a_inv * &a_inv * &a_inv * &fe31(11), fe31(13));
    }

    #[test]
    fn test_add() {
        assert_eq!(fe7(3) + &fe7(5), fe7(1)); // 3 + 5 = 8 ≡ 1 (mod 7)
        assert_eq!(fe7(6) + &fe7(1), fe7(0));
        assert_eq!(fe31(10) + &fe31(26), fe31(5));
    }

    #[test]
    fn test_sub() {
        assert_eq!(fe7(3) - &fe7(5), fe7(5)); // 3 - 5 ≡ -2 ≡ 5 (mod 7)
        assert_eq!(fe7(2) - &fe7(2), fe7(0));
        assert_eq!(fe7(0) - &fe7(1), fe7(6));
    }

    #[test]
    fn test_mul() {
        assert_eq!(fe7(3) * &fe7(5), fe7(1));
        assert_eq!(fe7(6) * &fe7(2), fe7(5));
    }

    #[test]
    fn test_neg() {
        assert_eq!(-fe7(0), fe7(0));
        assert_eq!((-fe7(0)).value(), &BigUint::zero());
        assert_eq!(-fe7(3), fe7(4));
    }

    #[test]
    fn test_invert() {
        assert_eq!(fe7(3).inverse().unwrap(), fe7(5));
        assert_eq!(fe7(5).inverse().unwrap(), fe7(3));
    }

    #[test]
    fn test_invert_zero_fails() {
        assert!(matches!(fe7(0).inverse(), Err(Error::NoInverse(_))));
        assert!(matches!(fe7(4).try_div(&fe7(0)), Err(Error::NoInverse(_))));
    }

    #[test]
    fn test_invert_non_prime_modulus() {
        let f = field(15);
        assert!(matches!(f.element(6).inverse(), Err(Error::NoInverse(_))));
        assert_eq!(f.element(7).inverse().unwrap(), f.element(13));
    }

    #[test]
    fn test_pow() {
        assert_eq!(fe7(3).pow(0u32), fe7(1));
        assert_eq!(fe7(0).pow(0u32), fe7(1));
        assert_eq!(fe7(3).pow(6u32), fe7(1));
        assert_eq!(fe31(2).pow(10u32), fe31(1024 % 31));
    }

    #[test]
    fn test_raw_equality() {
        let f = field(23);
        assert_eq!(f.element(5), 5u64);
        assert_eq!(f.element(5), 28u64);
        assert_eq!(f.element(22), -1i64);
        assert_eq!(f.element(5), BigUint::from(51u32));
        assert_ne!(f.element(5), 6u64);
    }

    #[test]
    fn test_rendering() {
        let f = field(223);
        let e = f.element(171);
        assert_eq!(e.to_string(), "171");
        assert_eq!(format!("{e:x}"), "ab");
        assert_eq!(format!("{e:X}"), "AB");
        assert_eq!(e.to_hex(), "0xab");
        assert_eq!(field(257).element(5).to_be_bytes_padded(), vec![0, 5]);
    }

    fn biguint_256bit_strategy() -> impl Strategy<Value = BigUint> {
        // Generate 32 bytes (256 bits) and convert to BigUint
        prop::array::uniform32(any::<u8>()).prop_map(|bytes| BigUint::from_bytes_be(&bytes))
    }

    fn secp256k1_base() -> PrimeField {
        PrimeField::from_hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F")
            .unwrap()
    }

    proptest! {
        #[test]
        fn closure(a in biguint_256bit_strategy(), b in biguint_256bit_strategy()) {
            let f = secp256k1_base();
            let (a, b) = (f.element_from_biguint(a), f.element_from_biguint(b));
            prop_assert!((&a + &b).value() < f.order());
            prop_assert!((&a - &b).value() < f.order());
            prop_assert!((&a * &b).value() < f.order());
            prop_assert!((-&a).value() < f.order());
            prop_assume!(!b.is_zero());
            prop_assert_eq!(a.try_div(&b).unwrap() * &b, a);
        }

        #[test]
        fn inverse_law(x in biguint_256bit_strategy()) {
            let fe = secp256k1_base().element_from_biguint(x);
            prop_assume!(!fe.is_zero());
            prop_assert!((&fe * &fe.inverse().unwrap()).is_one());
        }

        #[test]
        fn inverse_mod31(x in 1u64..31) {
            let a = fe31(x);
            prop_assert_eq!(a.try_div(&a).unwrap(), fe31(1));
        }
    }
}
