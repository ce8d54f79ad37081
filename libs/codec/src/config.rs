//! Decode configuration.
//!
//! Controls how invariant violations propagate: stop at the first bad
//! record, or keep scanning and hand back everything that decoded plus
//! the full violation list for diagnostics.

use serde::{Deserialize, Serialize};

/// How table decoding and catalog cross-validation react to violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Stop at the first violation and return it. The right mode for
    /// migrations that must not proceed on doubtful input.
    #[default]
    Strict,
    /// Continue past record-level violations, returning every record
    /// that decoded cleanly plus the aggregated violations keyed by
    /// record index. Header-level violations stay fatal in both modes
    /// since a bad header leaves no trustworthy record count.
    Permissive,
}

/// Decode configuration for a whole catalog/quote decode pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecodeConfig {
    pub policy: ValidationPolicy,
}

impl DecodeConfig {
    /// Fail-fast configuration (the default).
    pub fn strict() -> Self {
        Self {
            policy: ValidationPolicy::Strict,
        }
    }

    /// Collect-all-violations configuration for diagnostic runs.
    pub fn permissive() -> Self {
        Self {
            policy: ValidationPolicy::Permissive,
        }
    }

    /// Load configuration from environment variables with fallback to
    /// defaults. `MSTK_VALIDATION_POLICY=permissive` selects permissive
    /// decoding; any other value keeps strict.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(val) = std::env::var("MSTK_VALIDATION_POLICY") {
            if val.eq_ignore_ascii_case("permissive") {
                config.policy = ValidationPolicy::Permissive;
            }
        }
        config
    }
}
