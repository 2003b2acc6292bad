use std::fmt;

use serde::{Deserialize, Serialize};

/// A probability-like score, always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    pub const ZERO: Confidence = Confidence(0.0);
    pub const NEUTRAL: Confidence = Confidence(0.5);

    /// Clamps into range. NaN becomes zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Reads a provider-reported score. Values in `(1, 100]` are percentages.
    pub fn from_reported(value: Option<f64>, fallback: Confidence) -> Self {
        match value {
            Some(v) if v.is_finite() && v > 1.0 && v <= 100.0 => Self::new(v / 100.0),
            Some(v) if v.is_finite() => Self::new(v),
            _ => fallback,
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn as_percent(&self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(value: Confidence) -> Self {
        value.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}
