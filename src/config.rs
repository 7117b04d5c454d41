//! Tuning for the randomized routines.
//!
//! Non-residue search (Tonelli-Shanks) and random point sampling are
//! rejection loops that terminate with probability 1 but have no
//! deterministic bound. `SamplingConfig` caps them.

use std::env;

/// Environment variable overriding [`SamplingConfig::max_attempts`].
pub const MAX_ATTEMPTS_ENV: &str = "FIELD_CURVES_MAX_ATTEMPTS";

/// Default number of candidates drawn before a rejection loop gives up.
/// Each draw succeeds with probability close to 1/2.
pub const DEFAULT_MAX_ATTEMPTS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingConfig {
    /// Maximum number of candidates a rejection loop may draw.
    pub max_attempts: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl SamplingConfig {
    pub fn new(max_attempts: usize) -> Self {
        Self { max_attempts }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Apply overrides from the environment. Unparsable or zero values are ignored.
    pub fn from_env(self) -> Self {
        self.with_override(env::var(MAX_ATTEMPTS_ENV).ok())
    }

    fn with_override(mut self, value: Option<String>) -> Self {
        if let Some(val) = value {
            match val.trim().parse::<usize>() {
                Ok(num) if num > 0 => self.max_attempts = num,
                _ => tracing::warn!(value = %val, "ignoring invalid {}", MAX_ATTEMPTS_ENV),
            }
        }
        self
    }
}
