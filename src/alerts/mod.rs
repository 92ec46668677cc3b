//! Alert classification and notification
//!
//! Classifies vital readings into alert levels and renders notifications
//! for the configured channels.

mod classifier;
mod notifier;
mod types;

pub use classifier::{classify, level_for, out_of_range_vital};
pub use notifier::{MemoryNotifier, NotificationManager, Notifier, TerminalNotifier};
pub use types::{AlertLevel, Urgency, VitalAlert};
