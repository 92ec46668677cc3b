//! Vital feed abstraction layer
//!
//! Trait-based sources of vital readings, so the monitor can run against a
//! simulated backend, a scripted replay, or a test double.

pub mod manual;
pub mod simulated;
pub mod subscription;
pub mod traits;

pub use manual::ManualFeed;
pub use simulated::SimulatedFeed;
pub use subscription::Subscription;
pub use traits::{ReadingSink, VitalFeed};
