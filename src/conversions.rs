//! Birational maps between the short Weierstrass, Montgomery and twisted
//! Edwards forms, for curves and for their points.
//!
//! Curve conversions keep the scalar order and carry the generator across.

use num_traits::Zero;
use rand::Rng;
use tracing::debug;

use crate::config::SamplingConfig;
use crate::curve::{Curve, CurveForm};
use crate::error::{Error, Result};
use crate::field_element::FieldElement;
use crate::point::CurvePoint;

fn wrong_form(curve: &Curve, expected: &str) -> Error {
    Error::InvalidParameter(format!(
        "expected a {expected} curve, got the {} curve {curve}",
        curve.form().name()
    ))
}

/// Copy the scalar order of `source` to `target` and map its generator.
fn carry_over<F>(source: &Curve, mut target: Curve, map: F) -> Result<Curve>
where
    F: Fn(&CurvePoint, &Curve) -> Result<CurvePoint>,
{
    if let Some(scalars) = source.scalar_field() {
        target = target.with_scalar_order(scalars.order().clone())?;
    }
    if let Some(g) = source.generator() {
        let mapped = map(&g, &target)?;
        target = target.with_generator(mapped.x().clone(), mapped.y().clone())?;
    }
    Ok(target)
}

/// `y^2 = x^3 + ax + b` to `By^2 = x^3 + Ax^2 + x`, given a root `z0` of
/// `x^3 + ax + b`.
///
/// The curve must carry a scalar order divisible by 4. With
/// `s = sqrt(3z0^2 + a)` (the smaller root), `B = 1/s` and `A = 3z0/s`.
pub fn short_weierstrass_to_montgomery(curve: &Curve, z0: &FieldElement) -> Result<Curve> {
    let config = SamplingConfig::default().from_env();
    short_weierstrass_to_montgomery_with(curve, z0, &mut rand::rng(), &config)
}

/// [`short_weierstrass_to_montgomery`] with an explicit randomness source for
/// the square root.
pub fn short_weierstrass_to_montgomery_with<R: Rng + ?Sized>(
    curve: &Curve,
    z0: &FieldElement,
    rng: &mut R,
    config: &SamplingConfig,
) -> Result<Curve> {
    let CurveForm::ShortWeierstrass { a, b } = curve.form() else {
        return Err(wrong_form(curve, "short Weierstrass"));
    };
    let field = curve.base_field();

    let Some(scalars) = curve.scalar_field() else {
        return Err(Error::InvalidParameter(format!(
            "{curve} has no scalar order; the Montgomery form needs it"
        )));
    };
    if !(scalars.order() % 4u32).is_zero() {
        return Err(Error::NotConvertible(format!(
            "scalar order {} is not divisible by 4",
            scalars.order()
        )));
    }
    if !(z0.pow(3u32) + &(a * z0) + b).is_zero() {
        return Err(Error::InvalidParameter(format!(
            "{z0} is not a root of x^3 + {a}x + {b}"
        )));
    }

    let Some((s, _)) = (field.element(3) * &(z0 * z0) + a).sqrt_with(rng, config)? else {
        return Err(Error::Structural(format!(
            "3*{z0}^2 + {a} is not a square in {field}"
        )));
    };
    let b_mont = s.inverse()?;
    let a_mont = (field.element(3) * z0).try_div(&s)?;
    debug!(%curve, a = %a_mont, b = %b_mont, "converted short Weierstrass to Montgomery");

    let target = Curve::new(field, CurveForm::Montgomery { a: a_mont, b: b_mont })?;
    carry_over(curve, target, |p, t| map_short_weierstrass_to_montgomery(p, t, z0))
}

/// `By^2 = x^3 + Ax^2 + x` to `y^2 = x^3 + ax + b` with
/// `a = (3 - A^2) / 3B^2` and `b = (2A^3 - 9A) / 27B^3`.
pub fn montgomery_to_short_weierstrass(curve: &Curve) -> Result<Curve> {
    let CurveForm::Montgomery { a, b } = curve.form() else {
        return Err(wrong_form(curve, "Montgomery"));
    };
    let field = curve.base_field();
    let e = |n: i32| field.element(n);

    let a_sw = (e(3) - &(a * a)).try_div(&(e(3) * &(b * b)))?;
    let b_sw = (e(2) * &a.pow(3u32) - &(e(9) * a)).try_div(&(e(27) * &b.pow(3u32)))?;
    debug!(%curve, a = %a_sw, b = %b_sw, "converted Montgomery to short Weierstrass");

    let target = Curve::new(field, CurveForm::ShortWeierstrass { a: a_sw, b: b_sw })?;
    carry_over(curve, target, map_montgomery_to_short_weierstrass)
}

/// `By^2 = x^3 + Ax^2 + x` to `ax^2 + y^2 = 1 + dx^2y^2` with
/// `a = (A + 2) / B` and `d = (A - 2) / B`. Requires `A^2 != 4`.
pub fn montgomery_to_twisted_edwards(curve: &Curve) -> Result<Curve> {
    let CurveForm::Montgomery { a, b } = curve.form() else {
        return Err(wrong_form(curve, "Montgomery"));
    };
    let field = curve.base_field();
    if b.is_zero() || a * a == field.element(4) {
        return Err(Error::NotConvertible(format!(
            "{curve} needs B != 0 and A^2 != 4"
        )));
    }

    let two = field.element(2);
    let a_te = (a + &two).try_div(b)?;
    let d_te = (a - &two).try_div(b)?;
    debug!(%curve, a = %a_te, d = %d_te, "converted Montgomery to twisted Edwards");

    let target = Curve::new(field, CurveForm::TwistedEdwards { a: a_te, d: d_te })?;
    carry_over(curve, target, map_montgomery_to_twisted_edwards)
}

/// `ax^2 + y^2 = 1 + dx^2y^2` to `By^2 = x^3 + Ax^2 + x` with
/// `B = 4 / (a - d)` and `A = 2(a + d) / (a - d)`. Requires `a != d`.
pub fn twisted_edwards_to_montgomery(curve: &Curve) -> Result<Curve> {
    let target = montgomery_equation(curve)?;
    debug!(%curve, %target, "converted twisted Edwards to Montgomery");
    carry_over(curve, target, map_twisted_edwards_to_montgomery)
}

/// The Montgomery curve birationally equivalent to a twisted Edwards curve,
/// without scalar order or generator.
fn montgomery_equation(curve: &Curve) -> Result<Curve> {
    let CurveForm::TwistedEdwards { a, d } = curve.form() else {
        return Err(wrong_form(curve, "twisted Edwards"));
    };
    let field = curve.base_field();
    if a == d {
        return Err(Error::NotConvertible(format!("{curve} has a = d")));
    }

    let diff = a - d;
    let b_mont = field.element(4).try_div(&diff)?;
    let a_mont = (field.element(2) * &(a + d)).try_div(&diff)?;
    Curve::new(field, CurveForm::Montgomery { a: a_mont, b: b_mont })
}

/// Through the Montgomery form; see [`short_weierstrass_to_montgomery`].
pub fn short_weierstrass_to_twisted_edwards(curve: &Curve, z0: &FieldElement) -> Result<Curve> {
    let config = SamplingConfig::default().from_env();
    short_weierstrass_to_twisted_edwards_with(curve, z0, &mut rand::rng(), &config)
}

/// [`short_weierstrass_to_twisted_edwards`] with an explicit randomness source
/// for the square root.
pub fn short_weierstrass_to_twisted_edwards_with<R: Rng + ?Sized>(
    curve: &Curve,
    z0: &FieldElement,
    rng: &mut R,
    config: &SamplingConfig,
) -> Result<Curve> {
    let mont = short_weierstrass_to_montgomery_with(curve, z0, rng, config)?;
    montgomery_to_twisted_edwards(&mont)
}

/// Through the Montgomery form.
pub fn twisted_edwards_to_short_weierstrass(curve: &Curve) -> Result<Curve> {
    montgomery_to_short_weierstrass(&twisted_edwards_to_montgomery(curve)?)
}

/// `(x, y) -> ((x - z0)B, yB)`, where `B` is the coefficient of `target`.
pub fn map_short_weierstrass_to_montgomery(
    p: &CurvePoint,
    target: &Curve,
    z0: &FieldElement,
) -> Result<CurvePoint> {
    let CurveForm::Montgomery { b, .. } = target.form() else {
        return Err(wrong_form(target, "Montgomery"));
    };
    if p.is_identity() {
        return Ok(target.identity());
    }
    target.point_from_elements((p.x() - z0) * b, p.y() * b)
}

/// `(u, v) -> ((3u + A) / 3B, v / B)` using the coefficients of the source curve.
pub fn map_montgomery_to_short_weierstrass(p: &CurvePoint, target: &Curve) -> Result<CurvePoint> {
    let CurveForm::Montgomery { a, b } = p.curve().form() else {
        return Err(wrong_form(p.curve(), "Montgomery"));
    };
    if p.is_identity() {
        return Ok(target.identity());
    }
    let three = p.curve().base_field().element(3);
    let x = (&three * p.x() + a).try_div(&(three * b))?;
    let y = p.y().try_div(b)?;
    target.point_from_elements(x, y)
}

/// `(u, v) -> (u / v, (u - 1) / (u + 1))`.
///
/// The identity goes to `(0, 1)` and `(0, 0)` to `(0, -1)`. Other points with
/// `v = 0` or `u = -1` have no affine image and fail with
/// [`Error::NotConvertible`].
pub fn map_montgomery_to_twisted_edwards(p: &CurvePoint, target: &Curve) -> Result<CurvePoint> {
    let field = target.base_field();
    if p.is_identity() {
        return Ok(target.identity());
    }
    let (u, v) = (p.x(), p.y());
    if u.is_zero() && v.is_zero() {
        return target.point_from_elements(field.zero(), -field.one());
    }
    let u_plus_one = u + &field.one();
    if v.is_zero() || u_plus_one.is_zero() {
        return Err(Error::NotConvertible(format!(
            "{p} has no affine twisted Edwards image"
        )));
    }
    let x = u.try_div(v)?;
    let y = (u - &field.one()).try_div(&u_plus_one)?;
    target.point_from_elements(x, y)
}

/// `(x, y) -> ((1 + y) / (1 - y), u / x)`, inverse of
/// [`map_montgomery_to_twisted_edwards`].
pub fn map_twisted_edwards_to_montgomery(p: &CurvePoint, target: &Curve) -> Result<CurvePoint> {
    let field = target.base_field();
    if p.is_identity() {
        return Ok(target.identity());
    }
    let (x, y) = (p.x(), p.y());
    if x.is_zero() {
        // the only other point with x = 0 is (0, -1)
        return target.point_from_elements(field.zero(), field.zero());
    }
    let u = (field.one() + y).try_div(&(field.one() - y))?;
    let v = u.try_div(x)?;
    target.point_from_elements(u, v)
}

/// The intermediate Montgomery curve is recovered from `target`.
pub fn map_short_weierstrass_to_twisted_edwards(
    p: &CurvePoint,
    target: &Curve,
    z0: &FieldElement,
) -> Result<CurvePoint> {
    let mont = montgomery_equation(target)?;
    let q = map_short_weierstrass_to_montgomery(p, &mont, z0)?;
    map_montgomery_to_twisted_edwards(&q, target)
}

pub fn map_twisted_edwards_to_short_weierstrass(
    p: &CurvePoint,
    target: &Curve,
) -> Result<CurvePoint> {
    let mont = montgomery_equation(p.curve())?;
    let q = map_twisted_edwards_to_montgomery(p, &mont)?;
    map_montgomery_to_short_weierstrass(&q, target)
}
