//! Simulated vital feed
//!
//! Stand-in backend producing random readings on a background thread.

use super::{ReadingSink, Subscription, VitalFeed};
use crate::domain::VitalReading;
use crate::error::FeedError;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// Default delay between live readings
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5000);

/// Spacing between generated history samples
const HISTORY_SPACING_MINUTES: i64 = 5;

/// Feed generating random vitals
///
/// Heart rate is drawn from 60..110 bpm and body temperature from
/// 96.0..100.0 °F, rounded to one decimal.
#[derive(Debug, Clone)]
pub struct SimulatedFeed {
    interval: Duration,
}

impl SimulatedFeed {
    /// Create a feed with the default 5 second interval
    pub fn new() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
        }
    }

    /// Builder: set the delivery interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Get the delivery interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    fn random_reading(device_id: &str, at: DateTime<Utc>) -> Result<VitalReading, FeedError> {
        let mut rng = rand::rng();
        let heart_rate = rng.random_range(60..110) as f64;
        let body_temperature = (rng.random_range(96.0..100.0_f64) * 10.0).round() / 10.0;

        Self::reading(device_id, heart_rate, body_temperature, at)
    }

    fn reading(
        device_id: &str,
        heart_rate: f64,
        body_temperature: f64,
        at: DateTime<Utc>,
    ) -> Result<VitalReading, FeedError> {
        VitalReading::new(device_id, heart_rate, body_temperature, at).map_err(|e| {
            FeedError::InvalidReading {
                device_id: device_id.to_string(),
                reason: e.to_string(),
            }
        })
    }
}

impl Default for SimulatedFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl VitalFeed for SimulatedFeed {
    fn fetch_history(&self, device_id: &str, count: usize) -> Result<Vec<VitalReading>, FeedError> {
        let now = Utc::now();
        let mut history = (0..count)
            .map(|i| {
                let at = now - chrono::Duration::minutes(HISTORY_SPACING_MINUTES * i as i64);
                Self::random_reading(device_id, at)
            })
            .collect::<Result<Vec<_>, _>>()?;

        history.sort_by(VitalReading::by_timestamp);
        Ok(history)
    }

    fn subscribe(&self, device_id: &str, mut sink: ReadingSink) -> Result<Subscription, FeedError> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let interval = self.interval;
        let id = device_id.to_string();

        let handle = thread::Builder::new()
            .name(format!("feed-{}", device_id))
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => match Self::random_reading(&id, Utc::now()) {
                        Ok(reading) => sink(reading),
                        Err(e) => log::warn!("Dropping simulated reading: {}", e),
                    },
                    // Sender dropped: the subscription was released
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })
            .map_err(|e| FeedError::WorkerSpawn(e.to_string()))?;

        log::debug!("Simulated feed started for {} ({:?})", device_id, interval);

        Ok(Subscription::new(device_id, move || {
            drop(stop_tx);
            if handle.thread().id() != thread::current().id() {
                let _ = handle.join();
            }
        }))
    }
}
