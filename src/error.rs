//! Error types shared by fields, polynomials and curves.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the arithmetic core can report to its caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Construction with an order <= 1, a singular curve, or a malformed argument.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Point coordinates do not satisfy the curve equation.
    #[error("({x}, {y}) is not on the curve {curve}")]
    NotOnCurve { x: String, y: String, curve: String },

    /// Inversion of zero, of a value sharing a factor with the modulus, or
    /// division by the zero polynomial.
    #[error("{0} has no multiplicative inverse")]
    NoInverse(String),

    /// Doubling a point whose y-coordinate is zero.
    #[error("vertical tangent at ({x}, 0)")]
    VerticalTangent { x: String },

    /// Two points share an x-coordinate without being equal or negations of each other.
    #[error("invalid operand: {0}")]
    InvalidOperand(String),

    #[error("curve cannot be converted: {0}")]
    NotConvertible(String),

    #[error("structural precondition failed: {0}")]
    Structural(String),

    /// A bounded rejection-sampling loop ran out of attempts.
    #[error("no suitable sample found after {attempts} attempts")]
    SamplingExhausted { attempts: usize },

    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}
