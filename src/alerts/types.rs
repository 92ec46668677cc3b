//! Alert system domain types
//!
//! Defines alert levels and the rendered notification handed to notifiers.

use crate::domain::{ThresholdRange, ThresholdSettings, VitalKind, VitalReading};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::classifier::out_of_range_vital;

/// Severity of a vital reading
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    /// All vitals inside their normal band
    #[default]
    Normal,
    /// Outside the normal band, within the buffer
    Warning,
    /// Beyond the buffer
    Danger,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Warning => write!(f, "WARNING"),
            Self::Danger => write!(f, "DANGER"),
        }
    }
}

/// How insistently a notification should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Medium,
    High,
}

impl Urgency {
    /// How long a notification of this urgency stays visible
    pub const fn display_duration(&self) -> Duration {
        match self {
            Self::Medium => Duration::from_secs(5),
            Self::High => Duration::from_secs(10),
        }
    }
}

/// A user-facing notification about one out-of-range vital
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VitalAlert {
    pub level: AlertLevel,
    pub urgency: Urgency,
    /// Vital the message is about
    pub kind: VitalKind,
    /// Display name of the subject
    pub subject: String,
    /// Observed value
    pub value: f64,
    /// Normal band the value was compared against
    pub range: ThresholdRange,
    pub title: String,
    pub message: String,
    pub display_for: Duration,
    /// Timestamp of the reading that raised the alert
    pub observed_at: DateTime<Utc>,
}

impl VitalAlert {
    /// Render the notification for a reading at the given level
    ///
    /// Returns `None` for `Normal`, and when no vital is outside its
    /// unbuffered band.
    pub fn from_reading(
        reading: &VitalReading,
        subject: &str,
        level: AlertLevel,
        thresholds: &ThresholdSettings,
    ) -> Option<Self> {
        let urgency = match level {
            AlertLevel::Normal => return None,
            AlertLevel::Warning => Urgency::Medium,
            AlertLevel::Danger => Urgency::High,
        };

        let kind = out_of_range_vital(reading, thresholds)?;
        let value = reading.value(kind);
        let range = *thresholds.get(kind);

        let title = match level {
            AlertLevel::Danger => format!("ALERT: {} abnormal!", kind.label()),
            _ => format!("WARNING: {} borderline", kind.label()),
        };
        let message = format!(
            "{}'s {} is {}{} (normal: {})",
            subject,
            kind,
            value,
            kind.unit(),
            range
        );

        Some(Self {
            level,
            urgency,
            kind,
            subject: subject.to_string(),
            value,
            range,
            title,
            message,
            display_for: urgency.display_duration(),
            observed_at: reading.timestamp(),
        })
    }
}

impl fmt::Display for VitalAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
