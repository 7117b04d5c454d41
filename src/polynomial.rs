use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use rand::RngCore;

use crate::error::{Error, Result};
use crate::field::PrimeField;
use crate::field_element::FieldElement;

/// A univariate polynomial f(x) = a0 + a1*x + ... + an*x^n over a prime field.
///
/// Trailing zero coefficients are always trimmed, so the last stored
/// coefficient is the non-zero leading one. The zero polynomial has no
/// coefficients.
#[derive(Debug, Clone)]
pub struct Polynomial {
    field: PrimeField,
    /// Coefficients a0, a1, ..., an
    coeffs: Vec<FieldElement>,
}

impl Polynomial {
    /// Construct a polynomial from explicit coefficients, lowest power first.
    pub fn new(field: &PrimeField, mut coeffs: Vec<FieldElement>) -> Self {
        while coeffs.last().is_some_and(FieldElement::is_zero) {
            coeffs.pop();
        }
        Polynomial {
            field: field.clone(),
            coeffs,
        }
    }

    pub fn zero(field: &PrimeField) -> Self {
        Polynomial::new(field, Vec::new())
    }

    /// The constant polynomial `c`.
    pub fn constant(c: FieldElement) -> Self {
        let field = c.field().clone();
        Polynomial::new(&field, vec![c])
    }

    /// A polynomial with `n` coefficients, each drawn like [`PrimeField::random`].
    pub fn random<R: RngCore + ?Sized>(field: &PrimeField, n: usize, rng: &mut R) -> Self {
        let coeffs = (0..n).map(|_| field.random(rng)).collect();
        Polynomial::new(field, coeffs)
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    pub fn coeffs(&self) -> &[FieldElement] {
        &self.coeffs
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Degree of the polynomial; the zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Leading coefficient, zero for the zero polynomial.
    pub fn lead(&self) -> FieldElement {
        self.coeffs
            .last()
            .cloned()
            .unwrap_or_else(|| self.field.zero())
    }

    fn coeff(&self, i: usize) -> FieldElement {
        self.coeffs
            .get(i)
            .cloned()
            .unwrap_or_else(|| self.field.zero())
    }

    /// Multiply every coefficient by `s`.
    pub fn scale(&self, s: &FieldElement) -> Self {
        let coeffs = self.coeffs.iter().map(|c| c * s).collect();
        Polynomial::new(&self.field, coeffs)
    }

    /// Evaluate the polynomial at x using Horner's method.
    pub fn eval(&self, x: &FieldElement) -> FieldElement {
        let mut result = self.field.zero();
        for coeff in self.coeffs.iter().rev() {
            result = result * x + coeff;
        }
        result
    }

    /// Long division, returning `(quotient, remainder)`.
    ///
    /// Fails with [`Error::NoInverse`] if `divisor` is the zero polynomial.
    pub fn quot_rem(&self, divisor: &Polynomial) -> Result<(Polynomial, Polynomial)> {
        if divisor.is_zero() {
            return Err(Error::NoInverse(format!(
                "the zero polynomial over {}",
                self.field
            )));
        }
        let lead_inv = divisor.lead().inverse()?;
        Ok(self.long_division(divisor, &lead_inv))
    }

    /// Long division with the inverse of the divisor's leading coefficient
    /// already known. `divisor` must be non-zero.
    pub(crate) fn long_division(
        &self,
        divisor: &Polynomial,
        lead_inv: &FieldElement,
    ) -> (Polynomial, Polynomial) {
        self.assert_same_field(divisor);
        let mut rem = self.coeffs.clone();
        if rem.len() < divisor.coeffs.len() {
            return (Polynomial::zero(&self.field), self.clone());
        }

        let shift = rem.len() - divisor.coeffs.len();
        let mut quot = vec![self.field.zero(); shift + 1];
        for k in (0..=shift).rev() {
            // the coefficient being eliminated sits at k + deg(divisor)
            let q = &rem[k + divisor.degree()] * lead_inv;
            for (i, d) in divisor.coeffs.iter().enumerate() {
                rem[k + i] = &rem[k + i] - &(d * &q);
            }
            quot[k] = q;
        }

        (
            Polynomial::new(&self.field, quot),
            Polynomial::new(&self.field, rem),
        )
    }

    pub fn try_div(&self, divisor: &Polynomial) -> Result<Polynomial> {
        Ok(self.quot_rem(divisor)?.0)
    }

    pub fn rem(&self, divisor: &Polynomial) -> Result<Polynomial> {
        Ok(self.quot_rem(divisor)?.1)
    }

    /// Compare against a raw coefficient list, lowest power first.
    /// Trailing zeros on either side are ignored.
    pub fn eq_coeffs<T: Into<BigInt> + Clone>(&self, coeffs: &[T]) -> bool {
        *self == self.field.polynomial(coeffs.iter().cloned())
    }

    /// Naive test. Constants are not irreducible and linear polynomials
    /// always are; otherwise checks that the polynomial has no root in the
    /// field.
    ///
    /// The root check is only conclusive for degree 2 and 3, and walks every
    /// field element, so keep it to small fields.
    pub fn is_irreducible(&self) -> bool {
        match self.degree() {
            0 => return false,
            1 => return true,
            _ => {}
        }
        self.field.elements().all(|x| !self.eval(&x).is_zero())
    }

    fn assert_same_field(&self, rhs: &Self) {
        debug_assert_eq!(
            self.field, rhs.field,
            "polynomials over different fields"
        );
    }
}

impl PartialEq for Polynomial {
    fn eq(&self, other: &Self) -> bool {
        fn trimmed(coeffs: &[FieldElement]) -> &[FieldElement] {
            let end = coeffs
                .iter()
                .rposition(|c| !c.is_zero())
                .map_or(0, |i| i + 1);
            &coeffs[..end]
        }
        self.field == other.field && trimmed(&self.coeffs) == trimmed(&other.coeffs)
    }
}

impl Eq for Polynomial {}

impl Add<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        self.assert_same_field(rhs);
        let len = self.coeffs.len().max(rhs.coeffs.len());
        let coeffs = (0..len).map(|i| self.coeff(i) + &rhs.coeff(i)).collect();
        Polynomial::new(&self.field, coeffs)
    }
}

impl Add<&Polynomial> for Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        &self + rhs
    }
}

impl Sub<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        self.assert_same_field(rhs);
        let len = self.coeffs.len().max(rhs.coeffs.len());
        let coeffs = (0..len).map(|i| self.coeff(i) - &rhs.coeff(i)).collect();
        Polynomial::new(&self.field, coeffs)
    }
}

impl Sub<&Polynomial> for Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        &self - rhs
    }
}

impl Mul<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        self.assert_same_field(rhs);
        if self.is_zero() || rhs.is_zero() {
            return Polynomial::zero(&self.field);
        }
        let mut ans = vec![self.field.zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                ans[i + j] = &ans[i + j] + &(a * b);
            }
        }
        Polynomial::new(&self.field, ans)
    }
}

impl Mul<&Polynomial> for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        &self * rhs
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        Polynomial::new(&self.field, self.coeffs.iter().map(|c| -c).collect())
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        -&self
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        for (degree, coeff) in self.coeffs.iter().enumerate().rev() {
            if coeff.is_zero() {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;

            if degree == 0 || !coeff.is_one() {
                write!(f, "{coeff}")?;
            }
            if degree > 0 {
                write!(f, "x")?;
                if degree > 1 {
                    write!(f, "^{degree}")?;
                }
            }
        }
        Ok(())
    }
}
