//! Elliptic curves over prime fields in three affine forms.

use std::fmt;
use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use rand::Rng;
use tracing::{debug, trace, warn};

use crate::config::SamplingConfig;
use crate::error::{Error, Result};
use crate::field::PrimeField;
use crate::field_element::FieldElement;
use crate::point::CurvePoint;

/// The defining equation of a curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurveForm {
    /// `y^2 = x^3 + a*x + b`
    ShortWeierstrass { a: FieldElement, b: FieldElement },
    /// `B*y^2 = x^3 + A*x^2 + x`
    Montgomery { a: FieldElement, b: FieldElement },
    /// `a*x^2 + y^2 = 1 + d*x^2*y^2`
    ///
    /// The addition law is only complete when `d` is a non-square.
    TwistedEdwards { a: FieldElement, d: FieldElement },
}

impl CurveForm {
    pub fn name(&self) -> &'static str {
        match self {
            CurveForm::ShortWeierstrass { .. } => "short Weierstrass",
            CurveForm::Montgomery { .. } => "Montgomery",
            CurveForm::TwistedEdwards { .. } => "twisted Edwards",
        }
    }
}

/// An elliptic curve with its base field and, optionally, the order of the
/// subgroup used for scalars and a generator of it.
///
/// Cheap to clone; every point keeps a handle to its curve. Two curves are
/// equal when base field and equation agree, regardless of scalar order or
/// generator.
#[derive(Clone)]
pub struct Curve {
    inner: Arc<Inner>,
}

#[derive(Clone)]
struct Inner {
    field: PrimeField,
    form: CurveForm,
    scalar_field: Option<PrimeField>,
    generator: Option<(FieldElement, FieldElement)>,
}

impl Curve {
    /// Build a curve from parameters that already live in `field`.
    ///
    /// Rejects singular equations: `4a^3 + 27b^2 = 0` for short Weierstrass,
    /// `B = 0` for Montgomery and `a = 0` or `d = 0` for twisted Edwards.
    pub fn new(field: &PrimeField, form: CurveForm) -> Result<Self> {
        let (p, q) = match &form {
            CurveForm::ShortWeierstrass { a, b } => (a, b),
            CurveForm::Montgomery { a, b } => (a, b),
            CurveForm::TwistedEdwards { a, d } => (a, d),
        };
        if p.field() != field || q.field() != field {
            return Err(Error::InvalidParameter(format!(
                "curve parameters must be elements of {field}"
            )));
        }

        match &form {
            CurveForm::ShortWeierstrass { a, b } => {
                let disc = field.element(4) * &a.pow(3u32) + &(field.element(27) * &(b * b));
                if disc.is_zero() {
                    return Err(Error::InvalidParameter(format!(
                        "singular curve: 4a^3 + 27b^2 = 0 for a = {a}, b = {b}"
                    )));
                }
            }
            CurveForm::Montgomery { b, .. } => {
                if b.is_zero() {
                    return Err(Error::InvalidParameter(
                        "Montgomery coefficient B must be non-zero".into(),
                    ));
                }
            }
            CurveForm::TwistedEdwards { a, d } => {
                if a.is_zero() || d.is_zero() {
                    return Err(Error::InvalidParameter(format!(
                        "twisted Edwards coefficients must be non-zero, got a = {a}, d = {d}"
                    )));
                }
            }
        }

        Ok(Self {
            inner: Arc::new(Inner {
                field: field.clone(),
                form,
                scalar_field: None,
                generator: None,
            }),
        })
    }

    pub fn short_weierstrass(
        field: &PrimeField,
        a: impl Into<BigInt>,
        b: impl Into<BigInt>,
    ) -> Result<Self> {
        let form = CurveForm::ShortWeierstrass {
            a: field.element(a),
            b: field.element(b),
        };
        Self::new(field, form)
    }

    pub fn montgomery(
        field: &PrimeField,
        a: impl Into<BigInt>,
        b: impl Into<BigInt>,
    ) -> Result<Self> {
        let form = CurveForm::Montgomery {
            a: field.element(a),
            b: field.element(b),
        };
        Self::new(field, form)
    }

    pub fn twisted_edwards(
        field: &PrimeField,
        a: impl Into<BigInt>,
        d: impl Into<BigInt>,
    ) -> Result<Self> {
        let form = CurveForm::TwistedEdwards {
            a: field.element(a),
            d: field.element(d),
        };
        Self::new(field, form)
    }

    /// Attach the order of the scalar group; scalars are reduced modulo it.
    pub fn with_scalar_order(mut self, order: impl Into<BigUint>) -> Result<Self> {
        let scalar_field = PrimeField::new(order)?;
        Arc::make_mut(&mut self.inner).scalar_field = Some(scalar_field);
        Ok(self)
    }

    /// Attach a generator, which must lie on the curve.
    pub fn with_generator(mut self, x: FieldElement, y: FieldElement) -> Result<Self> {
        let g = self.point_from_elements(x, y)?;
        Arc::make_mut(&mut self.inner).generator = Some((g.x().clone(), g.y().clone()));
        Ok(self)
    }

    pub fn base_field(&self) -> &PrimeField {
        &self.inner.field
    }

    pub fn scalar_field(&self) -> Option<&PrimeField> {
        self.inner.scalar_field.as_ref()
    }

    pub fn form(&self) -> &CurveForm {
        &self.inner.form
    }

    pub fn is_short_weierstrass(&self) -> bool {
        matches!(self.inner.form, CurveForm::ShortWeierstrass { .. })
    }

    pub fn generator(&self) -> Option<CurvePoint> {
        self.inner
            .generator
            .as_ref()
            .map(|(x, y)| CurvePoint::from_parts(self.clone(), x.clone(), y.clone(), false))
    }

    /// Whether `(x, y)` satisfies the curve equation.
    pub fn satisfies(&self, x: &FieldElement, y: &FieldElement) -> bool {
        let field = self.base_field();
        match self.form() {
            CurveForm::ShortWeierstrass { a, b } => {
                y * y == x.pow(3u32) + &(a * x) + b
            }
            CurveForm::Montgomery { a, b } => {
                b * &(y * y) == x.pow(3u32) + &(a * &(x * x)) + x
            }
            CurveForm::TwistedEdwards { a, d } => {
                let xx = x * x;
                let yy = y * y;
                a * &xx + &yy == field.one() + &(d * &(&xx * &yy))
            }
        }
    }

    /// The point `(x, y)`, or [`Error::NotOnCurve`].
    pub fn point(&self, x: impl Into<BigInt>, y: impl Into<BigInt>) -> Result<CurvePoint> {
        let field = self.base_field();
        self.point_from_elements(field.element(x), field.element(y))
    }

    pub fn point_from_elements(&self, x: FieldElement, y: FieldElement) -> Result<CurvePoint> {
        if !self.satisfies(&x, &y) {
            return Err(Error::NotOnCurve {
                x: x.to_string(),
                y: y.to_string(),
                curve: self.to_string(),
            });
        }
        Ok(CurvePoint::from_parts(self.clone(), x, y, false))
    }

    /// The neutral element: the point at infinity for short Weierstrass and
    /// Montgomery curves, `(0, 1)` for twisted Edwards.
    pub fn identity(&self) -> CurvePoint {
        let field = self.base_field();
        match self.form() {
            CurveForm::TwistedEdwards { .. } => {
                CurvePoint::from_parts(self.clone(), field.zero(), field.one(), false)
            }
            _ => CurvePoint::from_parts(self.clone(), field.zero(), field.zero(), true),
        }
    }

    /// `y^2` as a function of `x`, or `None` when no finite point has this x.
    pub(crate) fn y_squared(&self, x: &FieldElement) -> Result<Option<FieldElement>> {
        let field = self.base_field();
        match self.form() {
            CurveForm::ShortWeierstrass { a, b } => Ok(Some(x.pow(3u32) + &(a * x) + b)),
            CurveForm::Montgomery { a, b } => {
                let rhs = x.pow(3u32) + &(a * &(x * x)) + x;
                Ok(Some(rhs.try_div(b)?))
            }
            CurveForm::TwistedEdwards { a, d } => {
                let xx = x * x;
                let den = field.one() - &(d * &xx);
                if den.is_zero() {
                    return Ok(None);
                }
                let num = field.one() - &(a * &xx);
                Ok(Some(num.try_div(&den)?))
            }
        }
    }

    /// A random finite point, using the thread-local RNG.
    pub fn random_point(&self) -> Result<CurvePoint> {
        self.random_point_with(&mut rand::rng(), &SamplingConfig::default().from_env())
    }

    /// Sample x, solve the equation for y and pick one of the two roots by
    /// a coin flip. x values without a root are redrawn, at most
    /// `config.max_attempts` times.
    pub fn random_point_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        config: &SamplingConfig,
    ) -> Result<CurvePoint> {
        let field = self.base_field();
        for attempt in 1..=config.max_attempts {
            let x = field.random(rng);
            let Some(rhs) = self.y_squared(&x)? else {
                trace!(attempt, %x, "no finite point for candidate");
                continue;
            };
            let y = if rhs.is_zero() {
                rhs
            } else {
                match rhs.sqrt_with(rng, config)? {
                    Some((r0, r1)) => {
                        if rng.random_bool(0.5) {
                            r0
                        } else {
                            r1
                        }
                    }
                    None => {
                        trace!(attempt, %x, "rejected x without a square root");
                        continue;
                    }
                }
            };
            debug!(attempt, %x, %y, "sampled random point");
            return self.point_from_elements(x, y);
        }
        warn!(attempts = config.max_attempts, curve = %self, "random point search exhausted");
        Err(Error::SamplingExhausted {
            attempts: config.max_attempts,
        })
    }

    /// Decode a SEC1 point: `00` (identity), `02`/`03` + x (compressed) or
    /// `04` + x + y (uncompressed), coordinates padded to the field width.
    ///
    /// Only short Weierstrass curves have this encoding.
    pub fn point_from_sec1_hex(&self, s: &str) -> Result<CurvePoint> {
        let config = SamplingConfig::default().from_env();
        self.point_from_sec1_hex_with(s, &mut rand::rng(), &config)
    }

    /// [`Curve::point_from_sec1_hex`] with an explicit randomness source for
    /// decompression.
    pub fn point_from_sec1_hex_with<R: Rng + ?Sized>(
        &self,
        s: &str,
        rng: &mut R,
        config: &SamplingConfig,
    ) -> Result<CurvePoint> {
        if !self.is_short_weierstrass() {
            return Err(Error::InvalidOperand(format!(
                "SEC1 encoding is only defined for short Weierstrass curves, not {}",
                self.form().name()
            )));
        }
        let bytes = hex::decode(s.trim_start_matches("0x"))?;
        let field = self.base_field();
        let width = field.order_bytes();
        let Some((&tag, body)) = bytes.split_first() else {
            return Err(Error::InvalidEncoding("empty point encoding".into()));
        };

        match (tag, body.len()) {
            (0x00, 0) => Ok(self.identity()),
            (0x04, n) if n == 2 * width => {
                let x = field.element_from_be_bytes(&body[..width]);
                let y = field.element_from_be_bytes(&body[width..]);
                self.point_from_elements(x, y)
            }
            (0x02 | 0x03, n) if n == width => {
                let x = field.element_from_be_bytes(body);
                let Some(rhs) = self.y_squared(&x)? else {
                    return Err(Error::InvalidEncoding(format!("no point with x = {x}")));
                };
                let want_odd = tag == 0x03;
                let y = if rhs.is_zero() {
                    if want_odd {
                        return Err(Error::InvalidEncoding(format!(
                            "y = 0 at x = {x} must be tagged 02"
                        )));
                    }
                    rhs
                } else {
                    let Some((r0, r1)) = rhs.sqrt_with(rng, config)? else {
                        return Err(Error::NotOnCurve {
                            x: x.to_string(),
                            y: "?".into(),
                            curve: self.to_string(),
                        });
                    };
                    // exactly one of r, p - r is odd
                    if r0.value().bit(0) == want_odd {
                        r0
                    } else {
                        r1
                    }
                };
                self.point_from_elements(x, y)
            }
            _ => Err(Error::InvalidEncoding(format!(
                "unexpected tag {tag:#04x} with {} body bytes (field width {width})",
                body.len()
            ))),
        }
    }
}

impl PartialEq for Curve {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
            || (self.inner.field == other.inner.field && self.inner.form == other.inner.form)
    }
}

impl Eq for Curve {}

impl fmt::Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curve")
            .field("field", &self.inner.field)
            .field("form", &self.inner.form)
            .field("scalar_field", &self.inner.scalar_field)
            .finish()
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.form() {
            CurveForm::ShortWeierstrass { a, b } => write!(f, "y^2 = x^3 + {a}x + {b}")?,
            CurveForm::Montgomery { a, b } => write!(f, "{b}y^2 = x^3 + {a}x^2 + x")?,
            CurveForm::TwistedEdwards { a, d } => write!(f, "{a}x^2 + y^2 = 1 + {d}x^2y^2")?,
        }
        write!(f, " over {}", self.base_field())
    }
}
