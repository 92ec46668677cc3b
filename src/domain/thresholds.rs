//! Threshold domain types
//!
//! Provides validated normal bands for each vital kind.

use super::VitalKind;
use crate::error::DomainError;
use serde::Serialize;
use std::fmt;

/// Inclusive normal band for one vital kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdRange {
    min: f64,
    max: f64,
}

impl ThresholdRange {
    /// Create a new range, requiring `min < max`
    pub fn new(min: f64, max: f64) -> Result<Self, DomainError> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(DomainError::InvalidThreshold { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound of the normal band
    #[inline]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound of the normal band
    #[inline]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Check if a value is inside the band (inclusive)
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Band widened by `buffer` on both sides
    pub fn buffered(&self, buffer: f64) -> Self {
        Self {
            min: self.min - buffer,
            max: self.max + buffer,
        }
    }
}

impl fmt::Display for ThresholdRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Normal bands for all vital kinds
///
/// Loaded once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdSettings {
    pub heart_rate: ThresholdRange,
    pub body_temperature: ThresholdRange,
}

impl ThresholdSettings {
    /// Create settings from two validated ranges
    pub fn new(heart_rate: ThresholdRange, body_temperature: ThresholdRange) -> Self {
        Self {
            heart_rate,
            body_temperature,
        }
    }

    /// Look up the band for a vital kind
    pub fn get(&self, kind: VitalKind) -> &ThresholdRange {
        match kind {
            VitalKind::HeartRate => &self.heart_rate,
            VitalKind::BodyTemperature => &self.body_temperature,
        }
    }
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            heart_rate: ThresholdRange { min: 60.0, max: 100.0 },
            body_temperature: ThresholdRange { min: 97.0, max: 99.0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_validation() {
        assert!(ThresholdRange::new(60.0, 100.0).is_ok());
        assert!(matches!(
            ThresholdRange::new(100.0, 60.0),
            Err(DomainError::InvalidThreshold { .. })
        ));
        assert!(ThresholdRange::new(60.0, 60.0).is_err());
        assert!(ThresholdRange::new(f64::NAN, 60.0).is_err());
    }

    #[test]
    fn test_range_contains_is_inclusive() {
        let range = ThresholdRange::new(97.0, 99.0).unwrap();
        assert!(range.contains(97.0));
        assert!(range.contains(99.0));
        assert!(!range.contains(96.9));
        assert!(!range.contains(99.1));
    }

    #[test]
    fn test_buffered_range() {
        let range = ThresholdRange::new(60.0, 100.0).unwrap().buffered(5.0);
        assert_eq!(range.min(), 55.0);
        assert_eq!(range.max(), 105.0);
    }

    #[test]
    fn test_default_settings() {
        let settings = ThresholdSettings::default();
        assert_eq!(settings.get(VitalKind::HeartRate).to_string(), "60-100");
        assert_eq!(settings.get(VitalKind::BodyTemperature).to_string(), "97-99");
    }
}
