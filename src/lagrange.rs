//! Lagrange interpolation over a prime field.

use crate::error::{Error, Result};
use crate::field::PrimeField;
use crate::field_element::FieldElement;
use crate::polynomial::Polynomial;

/// Lagrange coefficient λ_i at zero for the node `xs[i]`.
///
/// # Formula
/// For distinct nodes x_0, ..., x_k the coefficient of x_i is
/// ```text
/// λ_i = ∏_{j ≠ i} (0 - x_j) / (x_i - x_j)
/// ```
/// These satisfy ∑ λ_i · f(x_i) = f(0) for any f of degree at most k.
///
/// Fails with [`Error::NoInverse`] if two nodes coincide.
pub fn lagrange_coefficient(i: usize, xs: &[FieldElement]) -> Result<FieldElement> {
    let xi = xs.get(i).ok_or_else(|| {
        Error::InvalidParameter(format!("node index {i} out of range for {} nodes", xs.len()))
    })?;
    let field = xi.field();
    let mut num = field.one();
    let mut den = field.one();
    for (j, xj) in xs.iter().enumerate() {
        if j == i {
            continue;
        }
        num = num * &-xj;
        den = den * &(xi - xj);
    }
    num.try_div(&den)
}

/// All coefficients λ_i for the nodes `xs`, in order.
pub fn lagrange_coefficients(xs: &[FieldElement]) -> Result<Vec<FieldElement>> {
    (0..xs.len()).map(|i| lagrange_coefficient(i, xs)).collect()
}

/// f(0) for the unique polynomial of minimal degree through `points`.
pub fn interpolate_at_zero(points: &[(FieldElement, FieldElement)]) -> Result<FieldElement> {
    let Some((x0, _)) = points.first() else {
        return Err(Error::InvalidParameter("no points to interpolate".into()));
    };
    let xs: Vec<_> = points.iter().map(|(x, _)| x.clone()).collect();
    let lambdas = lagrange_coefficients(&xs)?;
    Ok(points
        .iter()
        .zip(&lambdas)
        .fold(x0.field().zero(), |acc, ((_, y), l)| acc + &(l * y)))
}

/// The unique polynomial of degree below `points.len()` through every point.
///
/// An empty point set yields the zero polynomial.
pub fn interpolate(field: &PrimeField, points: &[(FieldElement, FieldElement)]) -> Result<Polynomial> {
    let mut result = Polynomial::zero(field);
    for (i, (xi, yi)) in points.iter().enumerate() {
        // basis polynomial l_i(x) = ∏_{j ≠ i} (x - x_j) / (x_i - x_j)
        let mut basis = Polynomial::constant(field.one());
        let mut den = field.one();
        for (j, (xj, _)) in points.iter().enumerate() {
            if j == i {
                continue;
            }
            basis = basis * &Polynomial::new(field, vec![-xj, field.one()]);
            den = den * &(xi - xj);
        }
        let scale = yi.try_div(&den)?;
        result = result + &basis.scale(&scale);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secp256k1_scalars() -> PrimeField {
        PrimeField::from_hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141")
            .unwrap()
    }

    #[test]
    fn lagrange_sum_identity() {
        // f(x) = 3 + 5x + 7x^2, f(0) = 3
        let n = secp256k1_scalars();
        let f = n.polynomial([3, 5, 7]);
        let xs: Vec<_> = [1, 2, 4].into_iter().map(|x| n.element(x)).collect();
        let lambdas = lagrange_coefficients(&xs).unwrap();
        let mut sum = n.zero();
        for (x, l) in xs.iter().zip(&lambdas) {
            sum = sum + &(l * &f.eval(x));
        }
        assert_eq!(sum, n.element(3));
    }

    #[test]
    fn sum_of_lagrange_equals_one() {
        let n = secp256k1_scalars();
        let xs: Vec<_> = [3, 5, 7].into_iter().map(|x| n.element(x)).collect();
        let sum = lagrange_coefficients(&xs)
            .unwrap()
            .iter()
            .fold(n.zero(), |acc, l| acc + l);
        assert!(sum.is_one());
    }

    #[test]
    fn interpolate_gf13() {
        let f = PrimeField::new(13u32).unwrap();
        let points: Vec<_> = [(0, 4), (-2, 1), (2, 3)]
            .into_iter()
            .map(|(x, y)| (f.element(x), f.element(y)))
            .collect();
        let poly = interpolate(&f, &points).unwrap();
        assert!(poly.eq_coeffs(&[4, 7, 6]));
        for (x, y) in &points {
            assert_eq!(&poly.eval(x), y);
        }
        assert_eq!(interpolate_at_zero(&points).unwrap(), f.element(4));
    }

    #[test]
    fn repeated_nodes_fail() {
        let f = PrimeField::new(13u32).unwrap();
        let points = vec![(f.element(1), f.element(2)), (f.element(14), f.element(5))];
        assert!(matches!(interpolate(&f, &points), Err(Error::NoInverse(_))));
        assert!(matches!(interpolate_at_zero(&points), Err(Error::NoInverse(_))));
    }

    #[test]
    fn degenerate_inputs() {
        let f = PrimeField::new(13u32).unwrap();
        assert!(interpolate(&f, &[]).unwrap().is_zero());
        assert!(matches!(
            interpolate_at_zero(&[]),
            Err(Error::InvalidParameter(_))
        ));
        let single = [(f.element(5), f.element(9))];
        assert!(interpolate(&f, &single).unwrap().eq_coeffs(&[9]));
    }
}
