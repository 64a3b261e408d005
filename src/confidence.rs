//! # Confidence Tiering
//!
//! Maps the analysis engine's confidence in [0, 1] to a discrete tier used
//! for badges and indicator styling. Boundary values belong to the higher
//! tier: 0.70 is High, 0.40 is Medium.

use serde::{Deserialize, Serialize};

/// High tier starts here (inclusive).
pub const HIGH_MIN: f64 = 0.70;
/// Medium tier starts here (inclusive); below is Low.
pub const MEDIUM_MIN: f64 = 0.40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    /// Tier for a confidence value. Ties resolve toward the more
    /// confident tier.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= HIGH_MIN {
            Self::High
        } else if confidence >= MEDIUM_MIN {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Badge text shown next to the percentage.
    pub fn badge_label(&self) -> &'static str {
        match self {
            Self::High => "High Confidence",
            Self::Medium => "Medium Confidence",
            Self::Low => "Low Confidence",
        }
    }
}

/// Sanitize a confidence value coming off the wire.
///
/// Missing or NaN → 0.0; out-of-range values clamp into [0, 1]. The API
/// contract says values outside [0, 1] are not expected, but a bad value
/// must never break rendering.
pub fn sanitize_confidence(raw: Option<f64>) -> f64 {
    match raw {
        Some(c) if c.is_finite() => c.clamp(0.0, 1.0),
        _ => 0.0,
    }
}

/// Display percentage via `round(confidence * 100)`.
///
/// Uses `f64::round` (half away from zero); inputs here are non-negative,
/// so .005 boundaries round UP: `percent(0.745) == 75`.
pub fn percent(confidence: f64) -> u8 {
    (confidence.clamp(0.0, 1.0) * 100.0).round() as u8
}
