use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::Severity;

/// Deduction multiplier per severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityMultipliers {
    pub critical: u32,
    pub major: u32,
    pub minor: u32,
    pub cosmetic: u32,
}

impl SeverityMultipliers {
    pub fn multiplier(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Critical => self.critical,
            Severity::Major => self.major,
            Severity::Minor => self.minor,
            Severity::Cosmetic => self.cosmetic,
        }
    }
}

impl Default for SeverityMultipliers {
    fn default() -> Self {
        Self {
            critical: defaults::DEFAULT_CRITICAL_MULTIPLIER,
            major: defaults::DEFAULT_MAJOR_MULTIPLIER,
            minor: defaults::DEFAULT_MINOR_MULTIPLIER,
            cosmetic: defaults::DEFAULT_COSMETIC_MULTIPLIER,
        }
    }
}

/// Scoring subsystem configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub severity_multipliers: SeverityMultipliers,
}
