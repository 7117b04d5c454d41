use std::fmt;
use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{Num, One, Zero};
use rand::RngCore;

use crate::error::{Error, Result};
use crate::field_element::FieldElement;
use crate::polynomial::Polynomial;

/// A prime field GF(p).
///
/// The order is assumed to be prime; primality is not checked. Cloning is
/// cheap, the modulus is shared between the field and all of its elements.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PrimeField {
    order: Arc<BigUint>,
}

impl PrimeField {
    /// A field with the given order, which must be larger than 1.
    pub fn new(order: impl Into<BigUint>) -> Result<Self> {
        let order = order.into();
        if order <= BigUint::one() {
            return Err(Error::InvalidParameter(format!(
                "field order must be larger than 1, got {order}"
            )));
        }
        Ok(Self {
            order: Arc::new(order),
        })
    }

    /// Parse the order from a hex string (no `0x` prefix).
    pub fn from_hex(order: &str) -> Result<Self> {
        let order = BigUint::from_str_radix(order, 16)
            .map_err(|e| Error::InvalidParameter(format!("bad field order {order:?}: {e}")))?;
        Self::new(order)
    }

    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// Equal to the order for a prime field.
    pub fn characteristic(&self) -> &BigUint {
        &self.order
    }

    /// Minimum number of bytes needed to hold any residue.
    pub fn order_bytes(&self) -> usize {
        self.order.bits().div_ceil(8) as usize
    }

    /// The residue of `n` (which may be negative) modulo the order.
    pub fn element(&self, n: impl Into<BigInt>) -> FieldElement {
        let order = BigInt::from((*self.order).clone());
        let (_, value) = n.into().mod_floor(&order).into_parts();
        FieldElement::from_parts(self.clone(), value)
    }

    pub fn element_from_biguint(&self, n: BigUint) -> FieldElement {
        FieldElement::from_parts(self.clone(), n % &*self.order)
    }

    /// Interpret big-endian bytes as an integer and reduce it.
    pub fn element_from_be_bytes(&self, bytes: &[u8]) -> FieldElement {
        self.element_from_biguint(BigUint::from_bytes_be(bytes))
    }

    pub fn element_from_hex(&self, s: &str) -> Result<FieldElement> {
        let s = s.trim_start_matches("0x");
        let value = BigUint::from_str_radix(s, 16)
            .map_err(|e| Error::InvalidEncoding(format!("{s:?} is not a hex integer: {e}")))?;
        Ok(self.element_from_biguint(value))
    }

    pub fn zero(&self) -> FieldElement {
        FieldElement::from_parts(self.clone(), BigUint::zero())
    }

    pub fn one(&self) -> FieldElement {
        FieldElement::from_parts(self.clone(), BigUint::one())
    }

    /// A polynomial over this field, coefficients in ascending order of power.
    pub fn polynomial<T, I>(&self, coeffs: I) -> Polynomial
    where
        T: Into<BigInt>,
        I: IntoIterator<Item = T>,
    {
        Polynomial::new(self, coeffs.into_iter().map(|c| self.element(c)).collect())
    }

    /// Fill `order_bytes()` random bytes and reduce them mod the order.
    ///
    /// The result is slightly biased unless the order is close to a power of
    /// two; callers needing exact uniformity must reject and resample.
    pub fn random<R: RngCore + ?Sized>(&self, rng: &mut R) -> FieldElement {
        let mut buf = vec![0u8; self.order_bytes()];
        rng.fill_bytes(&mut buf);
        self.element_from_be_bytes(&buf)
    }

    /// All elements `0, 1, ..., order - 1` in ascending order.
    pub fn elements(&self) -> Elements {
        Elements {
            field: self.clone(),
            next: BigUint::zero(),
        }
    }
}

impl fmt::Debug for PrimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrimeField({})", self.order)
    }
}

impl fmt::Display for PrimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GF({})", self.order)
    }
}

/// Iterator over the residues of a [`PrimeField`].
#[derive(Debug, Clone)]
pub struct Elements {
    field: PrimeField,
    next: BigUint,
}

impl Iterator for Elements {
    type Item = FieldElement;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= *self.field.order {
            return None;
        }
        let value = self.next.clone();
        self.next += 1u32;
        Some(FieldElement::from_parts(self.field.clone(), value))
    }
}

impl<'a> IntoIterator for &'a PrimeField {
    type Item = FieldElement;
    type IntoIter = Elements;

    fn into_iter(self) -> Elements {
        self.elements()
    }
}
