//! Environment-variable key synthesis.
//!
//! Keys are derived from the detection rule id and the offending file's
//! base name, so re-running remediation on an already-fixed file lands on
//! the same key and becomes a no-op.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SweepError};
use crate::visibility::Visibility;

/// Prefix a bundler recognizes as safe to expose to browser code.
pub const PUBLIC_MARKER: &str = "NEXT_PUBLIC_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvKey {
    pub raw: String,
    pub visibility: Visibility,
}

impl EnvKey {
    /// Derive a key from `(rule_id, file_path, visibility)`. Deterministic:
    /// identical inputs always yield the identical key.
    pub fn synthesize(rule_id: &str, file_path: &str, visibility: Visibility) -> Self {
        let norm = file_path.replace('\\', "/");
        let basename = norm.rsplit('/').next().unwrap_or(&norm);
        let mut raw: String = format!("{rule_id}_{basename}")
            .chars()
            .map(|c| {
                let upper = c.to_ascii_uppercase();
                if upper.is_ascii_uppercase() || upper.is_ascii_digit() {
                    upper
                } else {
                    '_'
                }
            })
            .collect();
        // Env identifiers must not start with a digit.
        if raw.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            raw.insert(0, '_');
        }
        Self { raw, visibility }
    }

    /// The final identifier: `raw`, public-prefixed when the finding is in
    /// browser-visible code and the marker is not already present.
    pub fn key(&self) -> String {
        match self.visibility {
            Visibility::Public if !self.raw.starts_with(PUBLIC_MARKER) => {
                format!("{PUBLIC_MARKER}{}", self.raw)
            }
            _ => self.raw.clone(),
        }
    }

    /// Validate that `key` is a legal environment-variable identifier.
    pub fn validate(key: &str) -> Result<()> {
        let mut chars = key.chars();
        let valid_first = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        let valid_rest = key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if valid_first && valid_rest {
            Ok(())
        } else {
            Err(SweepError::InvalidKey(key.to_string()))
        }
    }
}
