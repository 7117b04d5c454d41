// secp256k1 scalar multiplication, checked against known vectors and the
// libsecp256k1 bindings
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::Num;
use secp256k1::{PublicKey, Secp256k1, SecretKey};

use field_curves::named_curves;
use field_curves::{CurvePoint, Error};

fn public_key(k: &str) -> PublicKey {
    let secp = Secp256k1::new();
    let sk = SecretKey::from_str(k).unwrap();
    PublicKey::from_secret_key(&secp, &sk)
}

fn mul_g(k: &str) -> CurvePoint {
    let curve = named_curves::secp256k1().unwrap();
    let k = BigUint::from_str_radix(k, 16).unwrap();
    curve.generator().unwrap().scale(k).unwrap()
}

#[test]
fn test_scalar_mul() {
    let one = BigUint::from(1u8);
    let points = vec![
        (
            BigUint::from(7u8),
            "5cbdf0646e5db4eaa398f365f2ea7a0e3d419b7e0330e39ce92bddedcac4f9bc",
            "6aebca40ba255960a3178d6d861a54dba813d0b813fde7b5a5082628087264da",
        ),
        (
            BigUint::from(1485u32),
            "c982196a7466fbbbb0e27a940b6af926c1a74d5ad07128c82824a11b5398afda",
            "7a91f9eae64438afb9ce6448a1c133db2d8fb9254e4546b6f001637d50901f55",
        ),
        (
            one.clone() << 128,
            "8f68b9d2f63b5f339239c1ad981f162ee88c5678723ea3351b7b444c9ec4c0da",
            "662a9f2dba063986de1d90c2b6be215dbbea2cfe95510bfdf23cbf79501fff82",
        ),
        (
            (one.clone() << 240) + &(one << 31),
            "9577ff57c8234558f293df502ca4f09cbc65a6572c842b39b366f21717945116",
            "10b49c67fa9365ad7b90dab070be339a1daf9052373ec30ffae4f72d5e66d053",
        ),
    ];

    let curve = named_curves::secp256k1().unwrap();
    let g = curve.generator().unwrap();
    for (i, (k, x, y)) in points.into_iter().enumerate() {
        let p = g.scale(k).unwrap();
        assert_eq!(hex::encode(p.x().to_be_bytes_padded()), x, "at {i}");
        assert_eq!(hex::encode(p.y().to_be_bytes_padded()), y, "at {i}");

        let f = curve.base_field();
        let expected = curve
            .point_from_elements(f.element_from_hex(x).unwrap(), f.element_from_hex(y).unwrap())
            .unwrap();
        assert_eq!(p, expected, "at {i}");
    }
}

#[test]
fn test_order() {
    let curve = named_curves::secp256k1().unwrap();
    let g = curve.generator().unwrap();
    let n = curve.scalar_field().unwrap().order();
    assert_eq!(g.scale(n - 1u8).unwrap(), -&g);
    assert!(g.scale(n.clone()).unwrap().is_identity());
}

#[test]
fn matches_libsecp256k1_encodings() {
    let keys = [
        "0000000000000000000000000000000000000000000000000000000000000005",
        "0000000000000000000000000000000000000000000000000000000000000003",
        "b7e151628aed2a6abf7158809cf4f3c762e7160f38b4da56a784d9045190cfef",
        "c90fdaa22168c234c4c6628b80dc1cd129024e088a67cc74020bbea63b14e5c9",
    ];
    for k in keys {
        let expected = public_key(k);
        let p = mul_g(k);
        assert_eq!(
            p.to_uncompressed_hex().unwrap(),
            hex::encode(expected.serialize_uncompressed()),
            "uncompressed for {k}"
        );
        assert_eq!(
            p.to_compressed_hex().unwrap(),
            hex::encode(expected.serialize()),
            "compressed for {k}"
        );
    }
}

#[test]
fn decodes_libsecp256k1_encodings() {
    let curve = named_curves::secp256k1().unwrap();
    let k = "0000000000000000000000000000000000000000000000000000000000000005";
    let expected = public_key(k);
    let p = mul_g(k);

    let compressed = hex::encode(expected.serialize());
    assert_eq!(curve.point_from_sec1_hex(&compressed).unwrap(), p);
    let uncompressed = hex::encode(expected.serialize_uncompressed());
    assert_eq!(curve.point_from_sec1_hex(&uncompressed).unwrap(), p);

    // truncated x coordinate
    assert!(matches!(
        curve.point_from_sec1_hex(&compressed[..64]),
        Err(Error::InvalidEncoding(_))
    ));
}
