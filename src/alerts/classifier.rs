//! Vital sign classification
//!
//! Maps readings onto alert levels using the threshold table and the
//! per-kind buffers.

use super::types::AlertLevel;
use crate::domain::{ThresholdSettings, VitalKind, VitalReading};

/// Classify a single vital value against its band
pub fn level_for(kind: VitalKind, value: f64, thresholds: &ThresholdSettings) -> AlertLevel {
    let range = thresholds.get(kind);
    let outer = range.buffered(kind.buffer());

    if !outer.contains(value) {
        AlertLevel::Danger
    } else if !range.contains(value) {
        AlertLevel::Warning
    } else {
        AlertLevel::Normal
    }
}

/// Classify a reading
///
/// Heart rate is evaluated first and any non-normal heart rate level is
/// returned as-is. Temperature is only consulted when heart rate is normal,
/// so a warning heart rate masks a dangerous temperature.
pub fn classify(reading: &VitalReading, thresholds: &ThresholdSettings) -> AlertLevel {
    for kind in VitalKind::ALL {
        let level = level_for(kind, reading.value(kind), thresholds);
        if level != AlertLevel::Normal {
            return level;
        }
    }
    AlertLevel::Normal
}

/// First vital outside its unbuffered band, heart rate taking precedence
pub fn out_of_range_vital(
    reading: &VitalReading,
    thresholds: &ThresholdSettings,
) -> Option<VitalKind> {
    VitalKind::ALL
        .into_iter()
        .find(|&kind| !thresholds.get(kind).contains(reading.value(kind)))
}
