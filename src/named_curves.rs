//! Standard curve parameters, plus the TinyJubJub toy curve over GF(13) in
//! all three forms.

use num_bigint::BigUint;
use num_traits::Num;

use crate::curve::{Curve, CurveForm};
use crate::error::{Error, Result};
use crate::field::PrimeField;

fn biguint(hex: &str) -> Result<BigUint> {
    BigUint::from_str_radix(hex, 16)
        .map_err(|e| Error::InvalidParameter(format!("bad constant {hex:?}: {e}")))
}

/// `y^2 = x^3 + 7` over the secp256k1 base field.
pub fn secp256k1() -> Result<Curve> {
    let field =
        PrimeField::from_hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F")?;
    let gx = field.element_from_hex(
        "79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798",
    )?;
    let gy = field.element_from_hex(
        "483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8",
    )?;
    Curve::short_weierstrass(&field, 0, 7)?
        .with_scalar_order(biguint(
            "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141",
        )?)?
        .with_generator(gx, gy)
}

/// `-x^2 + y^2 = 1 + dx^2y^2` over GF(2^255 - 19).
pub fn ed25519() -> Result<Curve> {
    let field =
        PrimeField::from_hex("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed")?;
    let d = field.element_from_hex(
        "52036cee2b6ffe738cc740797779e89800700a4d4141d8ab75eb4dca135978a3",
    )?;
    let gx = field.element_from_hex(
        "216936d3cd6e53fec0a4e231fdd6dc5c692cc7609525a7b2c9562d608f25d51a",
    )?;
    let gy = field.element_from_hex(
        "6666666666666666666666666666666666666666666666666666666666666658",
    )?;
    let form = CurveForm::TwistedEdwards {
        a: field.element(-1),
        d,
    };
    Curve::new(&field, form)?
        .with_scalar_order(biguint(
            "1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed",
        )?)?
        .with_generator(gx, gy)
}

/// The Barreto-Naehrig curve `y^2 = x^3 + 2` with generator `(-1, 1)`.
pub fn bn254() -> Result<Curve> {
    let field =
        PrimeField::from_hex("2523648240000001ba344d80000000086121000000000013a700000000000013")?;
    let (gx, gy) = (field.element(-1), field.one());
    Curve::short_weierstrass(&field, 0, 2)?
        .with_scalar_order(biguint(
            "2523648240000001ba344d8000000007ff9f800000000010a10000000000000d",
        )?)?
        .with_generator(gx, gy)
}

const TINY_JUBJUB_ORDER: u32 = 20;

fn gf13() -> Result<PrimeField> {
    PrimeField::new(13u32)
}

/// TinyJubJub as `y^2 = x^3 + 8x + 8` over GF(13), generator `(9, 9)`.
pub fn tiny_jubjub_short_weierstrass() -> Result<Curve> {
    let field = gf13()?;
    Curve::short_weierstrass(&field, 8, 8)?
        .with_scalar_order(TINY_JUBJUB_ORDER)?
        .with_generator(field.element(9), field.element(9))
}

/// TinyJubJub as `7y^2 = x^3 + 6x^2 + x` over GF(13), generator `(9, 11)`.
pub fn tiny_jubjub_montgomery() -> Result<Curve> {
    let field = gf13()?;
    Curve::montgomery(&field, 6, 7)?
        .with_scalar_order(TINY_JUBJUB_ORDER)?
        .with_generator(field.element(9), field.element(11))
}

/// TinyJubJub as `3x^2 + y^2 = 1 + 8x^2y^2` over GF(13), generator `(2, 6)`.
pub fn tiny_jubjub_twisted_edwards() -> Result<Curve> {
    let field = gf13()?;
    Curve::twisted_edwards(&field, 3, 8)?
        .with_scalar_order(TINY_JUBJUB_ORDER)?
        .with_generator(field.element(2), field.element(6))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversions;

    fn check_generator_order(c: &Curve) {
        let g = c.generator().unwrap();
        let n = c.scalar_field().unwrap().order();
        // scalars reduce mod n, so check (n - 1)G = -G instead of nG
        assert_eq!(g.scale(n - 1u32).unwrap(), -&g, "{c}");
        assert!(g.scale(n.clone()).unwrap().is_identity());
    }

    #[test]
    fn secp256k1_generator() {
        let c = secp256k1().unwrap();
        assert_eq!(c.base_field().order_bytes(), 32);
        check_generator_order(&c);
    }

    #[test]
    fn ed25519_generator() {
        check_generator_order(&ed25519().unwrap());
    }

    #[test]
    fn bn254_generator() {
        check_generator_order(&bn254().unwrap());
    }

    #[test]
    fn tiny_jubjub_forms_agree() {
        let sw = tiny_jubjub_short_weierstrass().unwrap();
        let mont = tiny_jubjub_montgomery().unwrap();
        let te = tiny_jubjub_twisted_edwards().unwrap();
        for c in [&sw, &mont, &te] {
            check_generator_order(c);
        }

        let z0 = sw.base_field().element(4);
        let converted = conversions::short_weierstrass_to_montgomery(&sw, &z0).unwrap();
        assert_eq!(converted, mont);
        assert_eq!(converted.generator(), mont.generator());
        let converted = conversions::montgomery_to_twisted_edwards(&mont).unwrap();
        assert_eq!(converted.generator(), te.generator());
    }
}
