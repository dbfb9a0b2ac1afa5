//! Reconciler settings.
//!
//! ```toml
//! horizon_days = 365
//! boundary = "strictly-after"   # or "at-or-after"
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AvailabilityError, Result};

/// Lookahead used when no horizon is configured.
pub const DEFAULT_HORIZON_DAYS: i64 = 365;

/// Which visits count as "after" the moment a caregiver becomes unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryPolicy {
    /// Only visits starting strictly after `effective_from` are unassigned.
    /// A visit starting at exactly `effective_from` keeps its caregiver.
    #[default]
    StrictlyAfter,
    /// Visits starting at or after `effective_from` are unassigned.
    AtOrAfter,
}

impl BoundaryPolicy {
    pub fn affects(self, visit_start: DateTime<Utc>, effective_from: DateTime<Utc>) -> bool {
        match self {
            BoundaryPolicy::StrictlyAfter => visit_start > effective_from,
            BoundaryPolicy::AtOrAfter => visit_start >= effective_from,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReconcilerConfig {
    /// Visits starting further than this past `effective_from` are not reconciled.
    pub horizon_days: i64,
    pub boundary: BoundaryPolicy,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            boundary: BoundaryPolicy::default(),
        }
    }
}

impl ReconcilerConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: ReconcilerConfig =
            toml::from_str(raw).map_err(|e| AvailabilityError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AvailabilityError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.horizon_days <= 0 {
            return Err(AvailabilityError::Config(format!(
                "horizon_days must be positive, got {}",
                self.horizon_days
            )));
        }
        Ok(())
    }
}
