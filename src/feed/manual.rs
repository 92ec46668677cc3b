//! Caller-driven vital feed
//!
//! Deliveries happen synchronously when the owner pushes a reading, which
//! makes replays and tests deterministic.

use super::{ReadingSink, Subscription, VitalFeed};
use crate::domain::VitalReading;
use crate::error::FeedError;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Sink shared between the feed state and an in-progress `push`
type SharedSink = Arc<Mutex<ReadingSink>>;

#[derive(Default)]
struct ManualState {
    next_id: u64,
    /// Live subscribers keyed by subscription id, in subscription order
    subscribers: BTreeMap<u64, (String, SharedSink)>,
    history: HashMap<String, Vec<VitalReading>>,
    /// When set, every subscribe call fails with this reason
    subscribe_failure: Option<String>,
    /// When set, every history fetch fails with this reason
    history_failure: Option<String>,
}

/// Feed driven by explicit `push` calls
///
/// Clones share state, so a caller can keep one handle to push readings
/// while a monitor owns another.
#[derive(Clone, Default)]
pub struct ManualFeed {
    state: Arc<Mutex<ManualState>>,
}

impl ManualFeed {
    /// Create an empty feed
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Builder: register history returned by `fetch_history`
    pub fn with_history(self, device_id: &str, mut readings: Vec<VitalReading>) -> Self {
        readings.sort_by(VitalReading::by_timestamp);
        self.lock().history.insert(device_id.to_string(), readings);
        self
    }

    /// Make subsequent `subscribe` calls fail (or succeed again with `None`)
    pub fn fail_subscriptions(&self, reason: Option<&str>) {
        self.lock().subscribe_failure = reason.map(str::to_string);
    }

    /// Make subsequent `fetch_history` calls fail (or succeed again with `None`)
    pub fn fail_history(&self, reason: Option<&str>) {
        self.lock().history_failure = reason.map(str::to_string);
    }

    /// Deliver a reading to every live subscriber of `device_id`
    ///
    /// Sinks run without the feed lock held, so a sink may release its own
    /// subscription or call back into the feed. A subscriber released by an
    /// earlier sink during the same push is skipped.
    ///
    /// Returns the number of subscribers that received it.
    pub fn push(&self, device_id: &str, reading: VitalReading) -> usize {
        let targets: Vec<(u64, SharedSink)> = self
            .lock()
            .subscribers
            .iter()
            .filter(|(_, (subscribed_to, _))| subscribed_to == device_id)
            .map(|(id, (_, sink))| (*id, Arc::clone(sink)))
            .collect();

        let mut delivered = 0;
        for (id, sink) in targets {
            if !self.lock().subscribers.contains_key(&id) {
                continue;
            }

            let mut sink = sink.lock().unwrap_or_else(PoisonError::into_inner);
            (*sink)(reading.clone());
            delivered += 1;
        }

        log::trace!("Pushed reading for {} to {} subscriber(s)", device_id, delivered);
        delivered
    }

    /// Number of live subscriptions for a device
    pub fn subscriber_count(&self, device_id: &str) -> usize {
        self.lock()
            .subscribers
            .values()
            .filter(|(subscribed_to, _)| subscribed_to == device_id)
            .count()
    }
}

impl VitalFeed for ManualFeed {
    fn fetch_history(&self, device_id: &str, count: usize) -> Result<Vec<VitalReading>, FeedError> {
        let state = self.lock();
        if let Some(reason) = &state.history_failure {
            return Err(FeedError::HistoryUnavailable {
                device_id: device_id.to_string(),
                reason: reason.clone(),
            });
        }
        let readings = state.history.get(device_id).map(Vec::as_slice).unwrap_or(&[]);
        let skip = readings.len().saturating_sub(count);
        Ok(readings[skip..].to_vec())
    }

    fn subscribe(&self, device_id: &str, sink: ReadingSink) -> Result<Subscription, FeedError> {
        let mut state = self.lock();

        if let Some(reason) = &state.subscribe_failure {
            return Err(FeedError::SubscribeFailed {
                device_id: device_id.to_string(),
                reason: reason.clone(),
            });
        }

        let id = state.next_id;
        state.next_id += 1;
        state
            .subscribers
            .insert(id, (device_id.to_string(), Arc::new(Mutex::new(sink))));

        let shared = Arc::clone(&self.state);
        Ok(Subscription::new(device_id, move || {
            shared
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .subscribers
                .remove(&id);
        }))
    }
}
