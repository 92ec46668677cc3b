//! Trait definitions for vital feeds
//!
//! These traits abstract over the backend that produces readings.

use super::Subscription;
use crate::domain::VitalReading;
use crate::error::FeedError;

/// Callback receiving live readings from a subscription
pub type ReadingSink = Box<dyn FnMut(VitalReading) + Send>;

/// Source of vital readings for monitored devices
pub trait VitalFeed: Send + Sync {
    /// Fetch up to `count` past readings, oldest first
    fn fetch_history(&self, device_id: &str, count: usize) -> Result<Vec<VitalReading>, FeedError>;

    /// Push live readings for a device into `sink` until the returned
    /// handle is released
    ///
    /// Readings are delivered in generation order on a single path per
    /// subscription.
    fn subscribe(&self, device_id: &str, sink: ReadingSink) -> Result<Subscription, FeedError>;
}
