//! Server-side propagation threshold for reported events.

use crate::alert::RiskLevel;
use crate::error::CoreError;

/// Default minimum model score for non-RED events.
pub const DEFAULT_MIN_SCORE: f64 = 0.75;

/// Reject scores outside `[0.0, 1.0]`, naming the offending field.
///
/// `NaN` fails the check.
pub fn ensure_score(value: f64, field: &str) -> Result<(), CoreError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{field} must be within [0, 1], got {value}"
        )))
    }
}

/// Decides whether a reported event warrants notifying trusted contacts.
///
/// RED events always pass; everything else needs `model_score >= min_score`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdGate {
    min_score: f64,
}

impl ThresholdGate {
    pub fn new(min_score: f64) -> Result<Self, CoreError> {
        ensure_score(min_score, "min_score")?;
        Ok(Self { min_score })
    }

    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    pub fn allows(&self, model_score: f64, risk_level: RiskLevel) -> bool {
        risk_level == RiskLevel::Red || model_score >= self.min_score
    }
}

impl Default for ThresholdGate {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}
