//! Quadratic residuosity and modular square roots over a prime field.

use num_bigint::BigUint;
use num_traits::One;
use rand::Rng;
use tracing::{debug, trace, warn};

use crate::config::SamplingConfig;
use crate::error::{Error, Result};
use crate::field::PrimeField;
use crate::field_element::FieldElement;

/// Classification of a field element by its Legendre symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Legendre {
    Zero,
    Residue,
    NonResidue,
}

impl Legendre {
    /// The symbol as the integer `0`, `1` or `-1`.
    pub fn as_i8(self) -> i8 {
        match self {
            Legendre::Zero => 0,
            Legendre::Residue => 1,
            Legendre::NonResidue => -1,
        }
    }
}

impl FieldElement {
    /// Euler's criterion, `n^((p-1)/2)`. Only meaningful for an odd prime order.
    pub fn legendre(&self) -> Legendre {
        if self.is_zero() {
            return Legendre::Zero;
        }
        let exp: BigUint = (self.field().order() - 1u32) >> 1;
        if self.pow(exp).is_one() {
            Legendre::Residue
        } else {
            Legendre::NonResidue
        }
    }

    /// Both square roots `(r, -r)`, smaller residue first, or `None` if this
    /// is not a quadratic residue.
    ///
    /// Uses the thread-local RNG to find a non-residue; see [`Self::sqrt_with`].
    pub fn sqrt(&self) -> Result<Option<(FieldElement, FieldElement)>> {
        self.sqrt_with(&mut rand::rng(), &SamplingConfig::default().from_env())
    }

    /// Tonelli-Shanks with an explicit randomness source.
    ///
    /// Fails only if no non-residue turns up within `config.max_attempts` draws.
    pub fn sqrt_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        config: &SamplingConfig,
    ) -> Result<Option<(FieldElement, FieldElement)>> {
        if self.legendre() != Legendre::Residue {
            return Ok(None);
        }

        let field = self.field();
        let p_minus_one: BigUint = field.order() - 1u32;

        // GF(2): the only residue is 1.
        if p_minus_one.is_one() {
            return Ok(Some((self.clone(), self.clone())));
        }
        // p - 1 = 2^s * q with q odd
        let s = p_minus_one.trailing_zeros().unwrap_or(0);
        let q: BigUint = &p_minus_one >> s;

        let z = non_residue(field, rng, config)?;

        let mut m = s;
        let mut c = z.pow(q.clone());
        let mut t = self.pow(q.clone());
        let mut r = self.pow((q + 1u32) >> 1);

        while !t.is_one() {
            // least i with t^(2^i) = 1
            let mut i = 0u64;
            let mut tt = t.clone();
            while !tt.is_one() {
                tt = &tt * &tt;
                i += 1;
                if i == m {
                    return Ok(None);
                }
            }

            let mut b = c.clone();
            for _ in 0..(m - i - 1) {
                b = &b * &b;
            }
            let bb = &b * &b;

            m = i;
            t = t * &bb;
            r = r * &b;
            c = bb;
        }

        if &r * &r != *self {
            warn!(n = %self, root = %r, "tonelli-shanks produced a wrong root");
            return Ok(None);
        }

        let neg = -&r;
        if r.value() <= neg.value() {
            Ok(Some((r, neg)))
        } else {
            Ok(Some((neg, r)))
        }
    }
}

/// Draw random elements until one is a quadratic non-residue.
pub fn non_residue<R: Rng + ?Sized>(
    field: &PrimeField,
    rng: &mut R,
    config: &SamplingConfig,
) -> Result<FieldElement> {
    for attempt in 1..=config.max_attempts {
        let z = field.random(rng);
        if z.legendre() == Legendre::NonResidue {
            debug!(attempt, "found quadratic non-residue");
            return Ok(z);
        }
        trace!(attempt, candidate = %z, "rejected non-residue candidate");
    }
    warn!(attempts = config.max_attempts, %field, "non-residue search exhausted");
    Err(Error::SamplingExhausted {
        attempts: config.max_attempts,
    })
}
