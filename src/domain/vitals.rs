//! Vital sign domain types
//!
//! Provides the vital kinds and the immutable reading type delivered by feeds.

use crate::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Kind of vital sign tracked per subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VitalKind {
    /// Heart rate in beats per minute
    HeartRate,
    /// Body temperature in degrees Fahrenheit
    BodyTemperature,
}

impl VitalKind {
    /// All kinds, in classification order
    pub const ALL: [VitalKind; 2] = [VitalKind::HeartRate, VitalKind::BodyTemperature];

    /// Margin beyond the normal band before a reading becomes dangerous
    pub const fn buffer(&self) -> f64 {
        match self {
            Self::HeartRate => 5.0,
            Self::BodyTemperature => 0.5,
        }
    }

    /// Unit suffix used in messages
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::HeartRate => " bpm",
            Self::BodyTemperature => "°F",
        }
    }

    /// Capitalized label used in notification titles
    pub const fn label(&self) -> &'static str {
        match self {
            Self::HeartRate => "Heart rate",
            Self::BodyTemperature => "Body temperature",
        }
    }
}

impl fmt::Display for VitalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeartRate => write!(f, "heart rate"),
            Self::BodyTemperature => write!(f, "body temperature"),
        }
    }
}

/// One timestamped vital sample for a monitored device
///
/// Readings are immutable once built; fields are only exposed through getters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalReading {
    #[serde(alias = "macAddress")]
    device_id: String,
    heart_rate: f64,
    body_temperature: f64,
    timestamp: DateTime<Utc>,
}

impl VitalReading {
    /// Create a reading, rejecting non-finite values
    pub fn new(
        device_id: impl Into<String>,
        heart_rate: f64,
        body_temperature: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        for (kind, value) in [
            (VitalKind::HeartRate, heart_rate),
            (VitalKind::BodyTemperature, body_temperature),
        ] {
            if !value.is_finite() {
                return Err(DomainError::InvalidVital {
                    kind: kind.to_string(),
                    value,
                });
            }
        }

        Ok(Self {
            device_id: device_id.into(),
            heart_rate,
            body_temperature,
            timestamp,
        })
    }

    /// Create a reading stamped with the current time
    pub fn now(
        device_id: impl Into<String>,
        heart_rate: f64,
        body_temperature: f64,
    ) -> Result<Self, DomainError> {
        Self::new(device_id, heart_rate, body_temperature, Utc::now())
    }

    /// Device identifier the reading was taken from
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Heart rate in bpm
    #[inline]
    pub fn heart_rate(&self) -> f64 {
        self.heart_rate
    }

    /// Body temperature in °F
    #[inline]
    pub fn body_temperature(&self) -> f64 {
        self.body_temperature
    }

    /// When the reading was taken
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Value for one vital kind
    pub fn value(&self, kind: VitalKind) -> f64 {
        match kind {
            VitalKind::HeartRate => self.heart_rate,
            VitalKind::BodyTemperature => self.body_temperature,
        }
    }

    /// Comparator ordering readings by timestamp
    pub fn by_timestamp(a: &Self, b: &Self) -> Ordering {
        a.timestamp.cmp(&b.timestamp)
    }
}
