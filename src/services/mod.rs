//! Service layer for vital monitoring
//!
//! Services encapsulate the monitoring state machine and access to the
//! profile roster.

pub mod monitor;
pub mod profiles;

pub use monitor::{MonitorConfig, MonitorSnapshot, MonitorState, VitalMonitor};
pub use profiles::{InMemoryProfileStore, ProfileStore};
