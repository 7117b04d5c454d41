pub mod config;
pub mod conversions;
pub mod curve;
pub mod error;
pub mod extension;
pub mod field;
pub mod field_element;
pub mod lagrange;
pub mod named_curves;
pub mod point;
pub mod polynomial;
pub mod sqrt;

pub use config::SamplingConfig;
pub use curve::{Curve, CurveForm};
pub use error::{Error, Result};
pub use extension::{ExtensionElement, FieldExtension};
pub use field::PrimeField;
pub use field_element::FieldElement;
pub use point::CurvePoint;
pub use polynomial::Polynomial;
pub use sqrt::Legendre;
