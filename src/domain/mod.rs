//! Domain models for vitalwatch
//!
//! This module contains all domain types with validation.
//! Types are validated on construction (fail-fast pattern).

pub mod profile;
pub mod thresholds;
pub mod vitals;

pub use profile::{Gender, NewProfile, Profile, ProfileStatus};
pub use thresholds::{ThresholdRange, ThresholdSettings};
pub use vitals::{VitalKind, VitalReading};
