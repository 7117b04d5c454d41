//! Algebraic extensions GF(p^k) = GF(p)[x] / (m(x)) for an irreducible m of degree k.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::sync::Arc;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;
use rand::RngCore;

use crate::error::{Error, Result};
use crate::field::PrimeField;
use crate::field_element::FieldElement;
use crate::polynomial::Polynomial;

/// An extension of a prime field by an irreducible polynomial.
///
/// Irreducibility is the caller's responsibility; a reducible modulus shows
/// up later as [`Error::NoInverse`] for some elements.
#[derive(Clone)]
pub struct FieldExtension {
    inner: Arc<Inner>,
}

struct Inner {
    modulus: Polynomial,
    /// inverse of the modulus' leading coefficient
    lead_inv: FieldElement,
}

impl FieldExtension {
    pub fn new(modulus: Polynomial) -> Result<Self> {
        if modulus.degree() == 0 {
            return Err(Error::InvalidParameter(format!(
                "extension modulus must have degree >= 1, got {modulus}"
            )));
        }
        let lead_inv = modulus.lead().inverse()?;
        Ok(Self {
            inner: Arc::new(Inner { modulus, lead_inv }),
        })
    }

    pub fn base_field(&self) -> &PrimeField {
        self.inner.modulus.field()
    }

    pub fn modulus(&self) -> &Polynomial {
        &self.inner.modulus
    }

    pub fn degree(&self) -> usize {
        self.inner.modulus.degree()
    }

    /// `p^k`
    pub fn order(&self) -> BigUint {
        self.base_field().order().pow(self.degree() as u32)
    }

    pub fn characteristic(&self) -> &BigUint {
        self.base_field().order()
    }

    /// The residue class of `value` modulo the defining polynomial.
    pub fn element(&self, value: Polynomial) -> ExtensionElement {
        debug_assert_eq!(value.field(), self.base_field());
        let value = self.reduce(value);
        ExtensionElement {
            extension: self.clone(),
            value,
        }
    }

    /// Shorthand for `element(base_field().polynomial(coeffs))`.
    pub fn element_from_coeffs<T, I>(&self, coeffs: I) -> ExtensionElement
    where
        T: Into<num_bigint::BigInt>,
        I: IntoIterator<Item = T>,
    {
        self.element(self.base_field().polynomial(coeffs))
    }

    pub fn zero(&self) -> ExtensionElement {
        self.element(Polynomial::zero(self.base_field()))
    }

    pub fn one(&self) -> ExtensionElement {
        self.element(Polynomial::constant(self.base_field().one()))
    }

    pub fn random<R: RngCore + ?Sized>(&self, rng: &mut R) -> ExtensionElement {
        self.element(Polynomial::random(self.base_field(), self.degree(), rng))
    }

    /// Every element, enumerated by reading `0..order` as base-p digit
    /// strings (least significant digit = constant coefficient).
    pub fn elements(&self) -> ExtensionElements {
        ExtensionElements {
            extension: self.clone(),
            next: BigUint::zero(),
            order: self.order(),
        }
    }

    fn reduce(&self, value: Polynomial) -> Polynomial {
        if value.is_zero() || value.degree() < self.degree() {
            return value;
        }
        value
            .long_division(&self.inner.modulus, &self.inner.lead_inv)
            .1
    }
}

impl PartialEq for FieldExtension {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner.modulus == other.inner.modulus
    }
}

impl Eq for FieldExtension {}

impl fmt::Debug for FieldExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldExtension({self})")
    }
}

impl fmt::Display for FieldExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[x]/({})", self.base_field(), self.inner.modulus)
    }
}

/// An element of a [`FieldExtension`]: a polynomial of degree below the extension degree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionElement {
    extension: FieldExtension,
    value: Polynomial,
}

impl ExtensionElement {
    pub fn extension(&self) -> &FieldExtension {
        &self.extension
    }

    pub fn value(&self) -> &Polynomial {
        &self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Inverse via the polynomial extended Euclidean algorithm on `(modulus, value)`.
    pub fn inverse(&self) -> Result<Self> {
        let field = self.extension.base_field();
        let mut r0 = self.extension.modulus().clone();
        let mut r1 = self.value.clone();
        let mut t0 = Polynomial::zero(field);
        let mut t1 = Polynomial::constant(field.one());

        while !r1.is_zero() {
            let (quotient, remainder) = r0.quot_rem(&r1)?;
            r0 = std::mem::replace(&mut r1, remainder);
            let t = &t0 - &(&quotient * &t1);
            t0 = std::mem::replace(&mut t1, t);
        }

        // r0 is gcd(modulus, value) up to a unit
        if r0.is_zero() || r0.degree() > 0 {
            return Err(Error::NoInverse(format!("{self} in {}", self.extension)));
        }
        let lead_inv = r0.lead().inverse()?;
        Ok(self.extension.element(t0.scale(&lead_inv)))
    }

    pub fn try_div(&self, rhs: &Self) -> Result<Self> {
        Ok(self * &rhs.inverse()?)
    }

    /// Square-and-multiply using extension multiplication.
    pub fn pow(&self, exp: impl Into<BigUint>) -> Self {
        let exp = exp.into();
        let mut result = self.extension.one();
        let mut base = self.clone();
        for i in 0..exp.bits() {
            if exp.bit(i) {
                result = &result * &base;
            }
            base = &base * &base;
        }
        result
    }

    fn assert_same_extension(&self, rhs: &Self) {
        debug_assert_eq!(
            self.extension, rhs.extension,
            "operands belong to different extensions"
        );
    }
}

impl Add<&ExtensionElement> for &ExtensionElement {
    type Output = ExtensionElement;

    fn add(self, rhs: &ExtensionElement) -> ExtensionElement {
        self.assert_same_extension(rhs);
        self.extension.element(&self.value + &rhs.value)
    }
}

impl Sub<&ExtensionElement> for &ExtensionElement {
    type Output = ExtensionElement;

    fn sub(self, rhs: &ExtensionElement) -> ExtensionElement {
        self.assert_same_extension(rhs);
        self.extension.element(&self.value - &rhs.value)
    }
}

impl Mul<&ExtensionElement> for &ExtensionElement {
    type Output = ExtensionElement;

    fn mul(self, rhs: &ExtensionElement) -> ExtensionElement {
        self.assert_same_extension(rhs);
        self.extension.element(&self.value * &rhs.value)
    }
}

impl Neg for &ExtensionElement {
    type Output = ExtensionElement;

    fn neg(self) -> ExtensionElement {
        self.extension.element(-&self.value)
    }
}

impl fmt::Display for ExtensionElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Iterator over all elements of a [`FieldExtension`].
#[derive(Debug, Clone)]
pub struct ExtensionElements {
    extension: FieldExtension,
    next: BigUint,
    order: BigUint,
}

impl Iterator for ExtensionElements {
    type Item = ExtensionElement;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.order {
            return None;
        }
        let field = self.extension.base_field();
        let mut n = self.next.clone();
        let mut coeffs = Vec::with_capacity(self.extension.degree());
        for _ in 0..self.extension.degree() {
            let (quotient, digit) = n.div_rem(field.order());
            coeffs.push(field.element_from_biguint(digit));
            n = quotient;
        }
        self.next += 1u32;
        Some(self.extension.element(Polynomial::new(field, coeffs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn gf3_i() -> FieldExtension {
        let f = PrimeField::new(3u32).unwrap();
        FieldExtension::new(f.polynomial([1, 0, 1])).unwrap()
    }

    #[test]
    fn gf9_arithmetic() {
        let ext = gf3_i();
        let p = ext.element_from_coeffs([0, 2]);
        let q = ext.element_from_coeffs([1, 2]);

        assert!((&p + &q).value().eq_coeffs(&[1, 1]));
        assert!((&p - &q).value().eq_coeffs(&[2]));
        assert!((-&p).value().eq_coeffs(&[0, 1]));
        // 2x(1 + 2x) = 2x + 4x^2 ≡ 2x - 1
        assert!((&p * &q).value().eq_coeffs(&[2, 2]));
        assert!(p.inverse().unwrap().value().eq_coeffs(&[0, 1]));
        assert_eq!(&p * &p.inverse().unwrap(), ext.one());
        assert_eq!(p.try_div(&p).unwrap(), ext.one());
        assert_eq!(&p + &ext.zero(), p);
        assert_eq!(&p - &p, ext.zero());
        // (2x)^2 = 4x^2 = -4 = 2, so (2x)^4 = 1
        assert_eq!(p.pow(4u32), ext.one());
        assert_eq!(p.pow(5u32), p);
    }

    #[test]
    fn construction_reduces() {
        let ext = gf3_i();
        // x^2 ≡ -1
        let e = ext.element_from_coeffs([0, 0, 1]);
        assert!(e.value().eq_coeffs(&[2]));
        assert!(e.value().degree() < ext.degree());
    }

    #[test]
    fn every_result_stays_reduced() {
        let ext = gf3_i();
        let all: Vec<_> = ext.elements().collect();
        for a in &all {
            for b in &all {
                for r in [a + b, a - b, a * b] {
                    assert!(r.is_zero() || r.value().degree() < ext.degree());
                }
            }
        }
    }

    #[test]
    fn enumeration_covers_the_field() {
        let ext = gf3_i();
        assert_eq!(ext.order(), BigUint::from(9u32));
        assert_eq!(ext.characteristic(), &BigUint::from(3u32));
        let all: Vec<_> = ext.elements().collect();
        assert_eq!(all.len(), 9);
        let distinct: HashSet<String> = all.iter().map(|e| e.to_string()).collect();
        assert_eq!(distinct.len(), 9);
        assert!(all[0].is_zero());
        // 5 = 1*3 + 2  ->  2 + x
        assert!(all[5].value().eq_coeffs(&[2, 1]));
        assert_eq!(ext.elements().count(), 9);
    }

    #[test]
    fn every_non_zero_element_is_invertible() {
        let ext = gf3_i();
        for e in ext.elements().filter(|e| !e.is_zero()) {
            assert_eq!(&e * &e.inverse().unwrap(), ext.one());
        }
        assert!(matches!(ext.zero().inverse(), Err(Error::NoInverse(_))));
    }

    #[test]
    fn reducible_modulus_surfaces_as_no_inverse() {
        let f = PrimeField::new(3u32).unwrap();
        // x^2 - 1 = (x - 1)(x + 1)
        let ext = FieldExtension::new(f.polynomial([-1, 0, 1])).unwrap();
        let e = ext.element_from_coeffs([-1, 1]);
        assert!(matches!(e.inverse(), Err(Error::NoInverse(_))));
    }

    #[test]
    fn gf8_extension() {
        // x^3 + x + 1 is irreducible over GF(2)
        let f = PrimeField::new(2u32).unwrap();
        let modulus = f.polynomial([1, 1, 0, 1]);
        assert!(modulus.is_irreducible());
        let ext = FieldExtension::new(modulus).unwrap();
        assert_eq!(ext.order(), BigUint::from(8u32));
        let x = ext.element_from_coeffs([0, 1]);
        // multiplicative group has order 7
        assert_eq!(x.pow(7u32), ext.one());
        assert_ne!(x.pow(1u32), ext.one());
    }

    #[test]
    fn rejects_constant_modulus() {
        let f = PrimeField::new(3u32).unwrap();
        assert!(matches!(
            FieldExtension::new(f.polynomial([2])),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn display() {
        let ext = gf3_i();
        assert_eq!(ext.to_string(), "GF(3)[x]/(x^2 + 1)");
        assert_eq!(ext.element_from_coeffs([1, 2]).to_string(), "2x + 1");
    }
}
