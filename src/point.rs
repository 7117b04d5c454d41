use std::fmt;
use std::ops::Neg;

use num_bigint::BigUint;

use crate::curve::{Curve, CurveForm};
use crate::error::{Error, Result};
use crate::field_element::FieldElement;

/// A point on a [`Curve`], or its identity.
///
/// Short Weierstrass and Montgomery identities are the point at infinity,
/// flagged by `infinity` with zero coordinates as placeholders. Twisted
/// Edwards curves use the finite point `(0, 1)` and never set the flag.
#[derive(Clone)]
pub struct CurvePoint {
    curve: Curve,
    x: FieldElement,
    y: FieldElement,
    infinity: bool,
}

impl CurvePoint {
    /// The caller guarantees `(x, y)` is on `curve` unless `infinity` is set.
    pub(crate) fn from_parts(curve: Curve, x: FieldElement, y: FieldElement, infinity: bool) -> Self {
        Self {
            curve,
            x,
            y,
            infinity,
        }
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn x(&self) -> &FieldElement {
        &self.x
    }

    pub fn y(&self) -> &FieldElement {
        &self.y
    }

    pub fn is_identity(&self) -> bool {
        match self.curve.form() {
            CurveForm::TwistedEdwards { .. } => self.x.is_zero() && self.y.is_one(),
            _ => self.infinity,
        }
    }

    fn finite(&self, x: FieldElement, y: FieldElement) -> Self {
        debug_assert!(self.curve.satisfies(&x, &y), "({x}, {y}) left {}", self.curve);
        Self::from_parts(self.curve.clone(), x, y, false)
    }

    /// P + P.
    ///
    /// Fails with [`Error::VerticalTangent`] on a short Weierstrass or
    /// Montgomery point with `y = 0`.
    pub fn double(&self) -> Result<Self> {
        let field = self.curve.base_field();
        match self.curve.form() {
            CurveForm::TwistedEdwards { a, d } => self.edwards_add(self, a, d),
            _ if self.infinity => Ok(self.clone()),
            _ if self.y.is_zero() => Err(Error::VerticalTangent {
                x: self.x.to_string(),
            }),
            CurveForm::ShortWeierstrass { a, .. } => {
                // t = (3x^2 + a) / 2y
                let three_x_sq = field.element(3) * &(&self.x * &self.x);
                let t = (three_x_sq + a).try_div(&(&self.y + &self.y))?;
                let x = &t * &t - &(&self.x + &self.x);
                let y = t * &(&self.x - &x) - &self.y;
                Ok(self.finite(x, y))
            }
            CurveForm::Montgomery { a, b } => {
                // t = (3x^2 + 2Ax + 1) / 2By
                let xx = &self.x * &self.x;
                let num = field.element(3) * &xx + &(field.element(2) * &(a * &self.x)) + &field.one();
                let den = field.element(2) * &(b * &self.y);
                let t = num.try_div(&den)?;
                let x = b * &(&t * &t) - &(&self.x + &self.x) - a;
                let y = t * &(&self.x - &x) - &self.y;
                Ok(self.finite(x, y))
            }
        }
    }

    /// P + Q under the group law of the curve.
    pub fn add_point(&self, other: &Self) -> Result<Self> {
        debug_assert_eq!(self.curve, other.curve, "points on different curves");
        match self.curve.form() {
            CurveForm::TwistedEdwards { a, d } => self.edwards_add(other, a, d),
            CurveForm::ShortWeierstrass { .. } | CurveForm::Montgomery { .. } => {
                self.chord_add(other)
            }
        }
    }

    pub fn sub_point(&self, other: &Self) -> Result<Self> {
        self.add_point(&-other)
    }

    fn chord_add(&self, other: &Self) -> Result<Self> {
        if self.infinity {
            return Ok(other.clone());
        }
        if other.infinity {
            return Ok(self.clone());
        }
        if self == other {
            return self.double();
        }
        if self.x == other.x {
            // same x on a valid curve means other = -self
            if self.y == -&other.y {
                return Ok(self.curve.identity());
            }
            return Err(Error::InvalidOperand(format!(
                "{self} and {other} share x but are neither equal nor opposite"
            )));
        }

        // t = (y2 - y1) / (x2 - x1)
        let t = (&other.y - &self.y).try_div(&(&other.x - &self.x))?;
        let x = match self.curve.form() {
            CurveForm::Montgomery { a, b } => {
                b * &(&t * &t) - &self.x - &other.x - a
            }
            _ => &t * &t - &self.x - &other.x,
        };
        let y = t * &(&self.x - &x) - &self.y;
        Ok(self.finite(x, y))
    }

    /// Unified twisted Edwards addition; complete when `d` is a non-square.
    fn edwards_add(&self, other: &Self, a: &FieldElement, d: &FieldElement) -> Result<Self> {
        let field = self.curve.base_field();
        let (x1, y1, x2, y2) = (&self.x, &self.y, &other.x, &other.y);
        let dxy = d * &(x1 * x2) * &(y1 * y2);
        let x = (x1 * y2 + &(y1 * x2)).try_div(&(field.one() + &dxy))?;
        let y = (y1 * y2 - &(a * &(x1 * x2))).try_div(&(field.one() - &dxy))?;
        Ok(self.finite(x, y))
    }

    /// `k * P` by double-and-add, with `k` first reduced modulo the scalar
    /// order when the curve has one. `scale(0)` is the identity.
    ///
    /// Not constant-time; do not use with secret scalars.
    pub fn scale(&self, k: impl Into<BigUint>) -> Result<Self> {
        let mut k = k.into();
        if let Some(scalars) = self.curve.scalar_field() {
            k %= scalars.order();
        }

        let mut result = self.curve.identity();
        let mut current = self.clone();
        let bits = k.bits();
        for i in 0..bits {
            if k.bit(i) {
                result = result.group_add(&current)?;
            }
            if i + 1 < bits {
                current = current.group_double()?;
            }
        }
        Ok(result)
    }

    /// Doubling where a vertical tangent yields the identity, as in the group.
    fn group_double(&self) -> Result<Self> {
        match self.double() {
            Err(Error::VerticalTangent { .. }) => Ok(self.curve.identity()),
            other => other,
        }
    }

    fn group_add(&self, other: &Self) -> Result<Self> {
        if self == other {
            self.group_double()
        } else {
            self.add_point(other)
        }
    }

    /// SEC1 compressed form `02|03 || x`, or `00` for the identity.
    pub fn to_compressed_hex(&self) -> Result<String> {
        self.ensure_sec1()?;
        if self.infinity {
            return Ok("00".into());
        }
        let prefix = if self.y.value().bit(0) { "03" } else { "02" };
        Ok(format!("{prefix}{}", hex::encode(self.x.to_be_bytes_padded())))
    }

    /// SEC1 uncompressed form `04 || x || y`, or `00` for the identity.
    pub fn to_uncompressed_hex(&self) -> Result<String> {
        self.ensure_sec1()?;
        if self.infinity {
            return Ok("00".into());
        }
        Ok(format!(
            "04{}{}",
            hex::encode(self.x.to_be_bytes_padded()),
            hex::encode(self.y.to_be_bytes_padded())
        ))
    }

    fn ensure_sec1(&self) -> Result<()> {
        if self.curve.is_short_weierstrass() {
            Ok(())
        } else {
            Err(Error::InvalidOperand(format!(
                "SEC1 encoding is only defined for short Weierstrass curves, not {}",
                self.curve.form().name()
            )))
        }
    }
}

impl PartialEq for CurvePoint {
    fn eq(&self, other: &Self) -> bool {
        if self.curve != other.curve {
            return false;
        }
        match (self.is_identity(), other.is_identity()) {
            (true, true) => true,
            (false, false) => self.x == other.x && self.y == other.y,
            _ => false,
        }
    }
}

impl Eq for CurvePoint {}

impl Neg for &CurvePoint {
    type Output = CurvePoint;

    fn neg(self) -> CurvePoint {
        if self.infinity {
            return self.clone();
        }
        let (x, y) = match self.curve.form() {
            CurveForm::TwistedEdwards { .. } => (-&self.x, self.y.clone()),
            _ => (self.x.clone(), -&self.y),
        };
        CurvePoint::from_parts(self.curve.clone(), x, y, false)
    }
}

impl Neg for CurvePoint {
    type Output = CurvePoint;

    fn neg(self) -> CurvePoint {
        -&self
    }
}

impl fmt::Debug for CurvePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurvePoint{self} on {}", self.curve)
    }
}

impl fmt::Display for CurvePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.infinity {
            write!(f, "inf")
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}
