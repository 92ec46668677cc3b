//! Vital monitoring session
//!
//! Watches one profile at a time: subscribes to its device feed,
//! classifies every delivered reading, and notifies only when the alert
//! level changes.

use crate::alerts::{classify, AlertLevel, NotificationManager};
use crate::domain::{Profile, ThresholdSettings, VitalReading};
use crate::feed::{Subscription, VitalFeed};
use serde::Serialize;
use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

/// Configuration for the monitor
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Threshold table used for classification
    pub thresholds: ThresholdSettings,
    /// Whether level changes raise notifications
    pub alerts_enabled: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            thresholds: ThresholdSettings::default(),
            alerts_enabled: true,
        }
    }
}

/// Lifecycle state of the monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorState {
    /// No subject, or the subject is inactive
    Idle,
    /// Subscribed, waiting for the first reading
    Loading,
    /// At least one reading received in the current session
    Live,
}

impl fmt::Display for MonitorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::Live => write!(f, "live"),
        }
    }
}

/// What the presentation layer renders
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorSnapshot {
    pub reading: Option<VitalReading>,
    pub alert_level: AlertLevel,
    pub is_loading: bool,
}

/// An open subscription for one subject
struct Session {
    id: u64,
    profile_id: String,
    device_id: String,
    subject_name: String,
    subscription: Subscription,
}

/// Reading tagged with the session it was produced for
type Delivery = (u64, VitalReading);

/// Vital monitor
///
/// Owns at most one live subscription. Feed callbacks only forward
/// readings over a channel; all state changes happen on the owner's
/// thread through [`VitalMonitor::pump`] or
/// [`VitalMonitor::wait_for_reading`]. Readings tagged with a session that
/// has been torn down are discarded.
pub struct VitalMonitor<F: VitalFeed> {
    feed: F,
    config: MonitorConfig,
    notifications: NotificationManager,
    session: Option<Session>,
    next_session_id: u64,
    latest_reading: Option<VitalReading>,
    alert_level: AlertLevel,
    is_loading: bool,
    deliveries_tx: Sender<Delivery>,
    deliveries_rx: Receiver<Delivery>,
}

impl<F: VitalFeed> VitalMonitor<F> {
    /// Create an idle monitor
    pub fn new(feed: F, config: MonitorConfig, notifications: NotificationManager) -> Self {
        let (deliveries_tx, deliveries_rx) = mpsc::channel();

        Self {
            feed,
            config,
            notifications,
            session: None,
            next_session_id: 0,
            latest_reading: None,
            alert_level: AlertLevel::Normal,
            is_loading: false,
            deliveries_tx,
            deliveries_rx,
        }
    }

    /// Begin watching a profile
    ///
    /// Any previous session is released first. An inactive profile leaves
    /// the monitor idle with no reading and a normal level.
    pub fn start(&mut self, profile: &Profile) -> MonitorState {
        self.teardown();
        self.latest_reading = None;
        self.alert_level = AlertLevel::Normal;

        if !profile.is_active() {
            log::info!(
                "Profile {} ({}) is inactive, not monitoring",
                profile.id,
                profile.display_name()
            );
            return self.state();
        }

        let session_id = self.next_session_id;
        self.next_session_id += 1;

        let tx = self.deliveries_tx.clone();
        let sink = Box::new(move |reading: VitalReading| {
            // The receiver lives as long as the monitor; a failed send only
            // means the monitor is gone.
            let _ = tx.send((session_id, reading));
        });

        match self.feed.subscribe(&profile.device_id, sink) {
            Ok(subscription) => {
                log::info!(
                    "Monitoring {} on {} (session {})",
                    profile.display_name(),
                    profile.device_id,
                    session_id
                );
                self.session = Some(Session {
                    id: session_id,
                    profile_id: profile.id.clone(),
                    device_id: profile.device_id.clone(),
                    subject_name: profile.display_name(),
                    subscription,
                });
                self.is_loading = true;
            }
            Err(e) => {
                log::error!(
                    "Failed to subscribe to vitals for {}: {}",
                    profile.display_name(),
                    e
                );
            }
        }

        self.state()
    }

    /// Stop watching, keeping the last reading and level for display
    pub fn stop(&mut self) {
        self.teardown();
    }

    /// Follow the currently selected profile
    ///
    /// Keeps the session when the same active profile is passed again,
    /// tears it down when the profile goes away or becomes inactive, and
    /// restarts when the profile identity changes.
    pub fn sync(&mut self, profile: Option<&Profile>) -> MonitorState {
        match profile {
            None => self.teardown(),
            Some(p) if self.is_watching(p) => {
                if p.is_active() {
                    if let Some(session) = self.session.as_mut() {
                        session.subject_name = p.display_name();
                    }
                } else {
                    log::info!("Profile {} became inactive", p.id);
                    self.teardown();
                }
            }
            Some(p) => {
                self.start(p);
            }
        }

        self.state()
    }

    /// Check if the current session belongs to this profile
    pub fn is_watching(&self, profile: &Profile) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.profile_id == profile.id && s.device_id == profile.device_id)
    }

    /// Apply all readings delivered so far
    ///
    /// Returns how many readings belonged to the current session.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(delivery) = self.deliveries_rx.try_recv() {
            if self.apply(delivery) {
                applied += 1;
            }
        }
        applied
    }

    /// Block until the current session receives a reading or `timeout`
    /// elapses
    pub fn wait_for_reading(&mut self, timeout: Duration) -> bool {
        if self.session.is_none() {
            return false;
        }

        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.deliveries_rx.recv_timeout(remaining) {
                Ok(delivery) => {
                    if self.apply(delivery) {
                        return true;
                    }
                }
                Err(_) => return false,
            }
        }
    }

    fn apply(&mut self, (session_id, reading): Delivery) -> bool {
        let subject = match &self.session {
            Some(session) if session.id == session_id => session.subject_name.clone(),
            _ => {
                log::debug!(
                    "Discarding reading from torn-down session {} ({})",
                    session_id,
                    reading.device_id()
                );
                return false;
            }
        };

        self.is_loading = false;

        // Always compare against the level stored on the monitor, never a
        // copy taken when the subscription was opened.
        let level = classify(&reading, &self.config.thresholds);
        log::debug!(
            "{}: hr={} temp={} -> {}",
            subject,
            reading.heart_rate(),
            reading.body_temperature(),
            level
        );

        if level != self.alert_level {
            log::info!("{}: alert level {} -> {}", subject, self.alert_level, level);
            self.alert_level = level;

            if self.config.alerts_enabled && level != AlertLevel::Normal {
                self.notifications
                    .dispatch(&reading, &subject, level, &self.config.thresholds);
            }
        }

        self.latest_reading = Some(reading);
        true
    }

    fn teardown(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.subscription.release();
            log::info!(
                "Stopped monitoring {} (session {})",
                session.subject_name,
                session.id
            );
        }
        self.is_loading = false;
    }

    /// Current lifecycle state
    pub fn state(&self) -> MonitorState {
        match (&self.session, self.is_loading) {
            (None, _) => MonitorState::Idle,
            (Some(_), true) => MonitorState::Loading,
            (Some(_), false) => MonitorState::Live,
        }
    }

    /// Current reading, level and loading flag
    pub fn snapshot(&self) -> MonitorSnapshot {
        MonitorSnapshot {
            reading: self.latest_reading.clone(),
            alert_level: self.alert_level,
            is_loading: self.is_loading,
        }
    }

    /// Profile id of the active session
    pub fn subject_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.profile_id.as_str())
    }

    /// Enable or disable notifications
    pub fn set_alerts_enabled(&mut self, enabled: bool) {
        self.config.alerts_enabled = enabled;
    }

    /// Check if notifications are enabled
    pub fn alerts_enabled(&self) -> bool {
        self.config.alerts_enabled
    }

    /// Threshold table in use
    pub fn thresholds(&self) -> &ThresholdSettings {
        &self.config.thresholds
    }

    /// Get the feed
    pub fn feed(&self) -> &F {
        &self.feed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::MemoryNotifier;
    use crate::domain::ProfileStatus;
    use crate::feed::ManualFeed;
    use crate::mock::profile;

    const JANE_DEVICE: &str = "AA:BB:CC:DD:EE:02";
    const JOHN_DEVICE: &str = "AA:BB:CC:DD:EE:01";

    fn jane() -> Profile {
        profile("2", "Jane", "Smith", JANE_DEVICE, ProfileStatus::Active)
    }

    fn john() -> Profile {
        profile("1", "John", "Doe", JOHN_DEVICE, ProfileStatus::Active)
    }

    fn reading(device: &str, hr: f64, temp: f64) -> VitalReading {
        VitalReading::now(device, hr, temp).unwrap()
    }

    fn monitor() -> (VitalMonitor<ManualFeed>, ManualFeed, MemoryNotifier) {
        let feed = ManualFeed::new();
        let recorder = MemoryNotifier::new();
        let notifications = NotificationManager::new().with_notifier(Box::new(recorder.clone()));
        let monitor = VitalMonitor::new(feed.clone(), MonitorConfig::default(), notifications);
        (monitor, feed, recorder)
    }

    fn deliver(monitor: &mut VitalMonitor<ManualFeed>, feed: &ManualFeed, hr: f64, temp: f64) {
        feed.push(JANE_DEVICE, reading(JANE_DEVICE, hr, temp));
        monitor.pump();
    }

    #[test]
    fn test_new_monitor_is_idle() {
        let (monitor, _, _) = monitor();
        assert_eq!(monitor.state(), MonitorState::Idle);
        assert_eq!(
            monitor.snapshot(),
            MonitorSnapshot {
                reading: None,
                alert_level: AlertLevel::Normal,
                is_loading: false,
            }
        );
    }

    #[test]
    fn test_inactive_profile_never_subscribes() {
        let (mut monitor, feed, _) = monitor();
        let inactive = profile(
            "3",
            "Michael",
            "Johnson",
            "AA:BB:CC:DD:EE:03",
            ProfileStatus::Inactive,
        );

        assert_eq!(monitor.start(&inactive), MonitorState::Idle);
        assert_eq!(feed.subscriber_count("AA:BB:CC:DD:EE:03"), 0);

        let snapshot = monitor.snapshot();
        assert!(snapshot.reading.is_none());
        assert_eq!(snapshot.alert_level, AlertLevel::Normal);
        assert!(!snapshot.is_loading);
    }

    #[test]
    fn test_active_profile_loads_then_goes_live() {
        let (mut monitor, feed, recorder) = monitor();

        assert_eq!(monitor.start(&jane()), MonitorState::Loading);
        assert!(monitor.snapshot().is_loading);
        assert_eq!(feed.subscriber_count(JANE_DEVICE), 1);
        assert_eq!(monitor.subject_id(), Some("2"));

        deliver(&mut monitor, &feed, 72.0, 98.2);

        assert_eq!(monitor.state(), MonitorState::Live);
        let snapshot = monitor.snapshot();
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.alert_level, AlertLevel::Normal);
        assert_eq!(snapshot.reading.unwrap().heart_rate(), 72.0);
        assert!(recorder.alerts().is_empty());
    }

    #[test]
    fn test_sustained_warning_notifies_once() {
        let (mut monitor, feed, recorder) = monitor();
        monitor.start(&jane());

        for _ in 0..4 {
            deliver(&mut monitor, &feed, 58.0, 98.2);
        }

        assert_eq!(monitor.snapshot().alert_level, AlertLevel::Warning);
        assert_eq!(recorder.alerts().len(), 1);
    }

    #[test]
    fn test_each_level_change_is_evaluated() {
        let (mut monitor, feed, recorder) = monitor();
        monitor.start(&jane());

        deliver(&mut monitor, &feed, 58.0, 98.2); // warning
        deliver(&mut monitor, &feed, 45.0, 98.2); // danger
        deliver(&mut monitor, &feed, 72.0, 98.2); // normal, silent
        deliver(&mut monitor, &feed, 72.0, 99.3); // warning (temperature)

        let levels: Vec<_> = recorder.alerts().iter().map(|a| a.level).collect();
        assert_eq!(
            levels,
            vec![AlertLevel::Warning, AlertLevel::Danger, AlertLevel::Warning]
        );
        assert_eq!(monitor.snapshot().alert_level, AlertLevel::Warning);
    }

    #[test]
    fn test_alerts_disabled_still_tracks_level() {
        let (mut monitor, feed, recorder) = monitor();
        monitor.set_alerts_enabled(false);
        assert!(!monitor.alerts_enabled());
        monitor.start(&jane());

        deliver(&mut monitor, &feed, 45.0, 98.2);

        assert_eq!(monitor.snapshot().alert_level, AlertLevel::Danger);
        assert!(recorder.alerts().is_empty());
    }

    #[test]
    fn test_switching_subject_releases_previous_subscription() {
        let (mut monitor, feed, _) = monitor();
        monitor.start(&jane());
        monitor.start(&john());

        assert_eq!(feed.subscriber_count(JANE_DEVICE), 0);
        assert_eq!(feed.subscriber_count(JOHN_DEVICE), 1);
        assert_eq!(monitor.subject_id(), Some("1"));
    }

    #[test]
    fn test_restarting_same_subject_keeps_one_handle() {
        let (mut monitor, feed, _) = monitor();
        monitor.start(&jane());
        monitor.start(&jane());
        assert_eq!(feed.subscriber_count(JANE_DEVICE), 1);
    }

    #[test]
    fn test_stop_retains_last_values() {
        let (mut monitor, feed, _) = monitor();
        monitor.start(&jane());
        deliver(&mut monitor, &feed, 58.0, 98.2);

        monitor.stop();
        monitor.stop();

        assert_eq!(monitor.state(), MonitorState::Idle);
        assert_eq!(feed.subscriber_count(JANE_DEVICE), 0);
        let snapshot = monitor.snapshot();
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.alert_level, AlertLevel::Warning);
        assert_eq!(snapshot.reading.unwrap().heart_rate(), 58.0);
    }

    #[test]
    fn test_in_flight_reading_after_stop_is_ignored() {
        let (mut monitor, feed, recorder) = monitor();
        monitor.start(&jane());
        deliver(&mut monitor, &feed, 72.0, 98.2);

        // Delivered by the feed but not yet applied when the session ends
        feed.push(JANE_DEVICE, reading(JANE_DEVICE, 45.0, 98.2));
        monitor.stop();

        assert_eq!(monitor.pump(), 0);
        assert_eq!(monitor.snapshot().alert_level, AlertLevel::Normal);
        assert_eq!(monitor.snapshot().reading.unwrap().heart_rate(), 72.0);
        assert!(recorder.alerts().is_empty());
    }

    #[test]
    fn test_stale_reading_from_previous_subject_is_ignored() {
        let (mut monitor, feed, _) = monitor();
        monitor.start(&jane());
        feed.push(JANE_DEVICE, reading(JANE_DEVICE, 45.0, 98.2));

        monitor.start(&john());
        assert_eq!(monitor.pump(), 0);
        assert_eq!(monitor.state(), MonitorState::Loading);
        assert!(monitor.snapshot().reading.is_none());
    }

    #[test]
    fn test_subscribe_failure_settles_idle() {
        let (mut monitor, feed, _) = monitor();
        feed.fail_subscriptions(Some("backend offline"));

        assert_eq!(monitor.start(&jane()), MonitorState::Idle);
        assert!(!monitor.snapshot().is_loading);

        // Caller may retry by starting again
        feed.fail_subscriptions(None);
        assert_eq!(monitor.start(&jane()), MonitorState::Loading);
    }

    #[test]
    fn test_sync_keeps_session_for_same_profile() {
        let (mut monitor, feed, _) = monitor();
        monitor.sync(Some(&jane()));
        deliver(&mut monitor, &feed, 58.0, 98.2);

        assert_eq!(monitor.sync(Some(&jane())), MonitorState::Live);
        assert_eq!(feed.subscriber_count(JANE_DEVICE), 1);
        assert_eq!(monitor.snapshot().alert_level, AlertLevel::Warning);
    }

    #[test]
    fn test_sync_tears_down_when_profile_goes_inactive() {
        let (mut monitor, feed, _) = monitor();
        monitor.sync(Some(&jane()));
        deliver(&mut monitor, &feed, 72.0, 98.2);

        let mut inactive = jane();
        inactive.status = ProfileStatus::Inactive;

        assert_eq!(monitor.sync(Some(&inactive)), MonitorState::Idle);
        assert_eq!(feed.subscriber_count(JANE_DEVICE), 0);
        assert!(monitor.snapshot().reading.is_some());
    }

    #[test]
    fn test_sync_none_stops() {
        let (mut monitor, feed, _) = monitor();
        monitor.sync(Some(&jane()));
        assert_eq!(monitor.sync(None), MonitorState::Idle);
        assert_eq!(feed.subscriber_count(JANE_DEVICE), 0);
    }

    #[test]
    fn test_sync_restarts_on_device_change() {
        let (mut monitor, feed, _) = monitor();
        monitor.sync(Some(&jane()));

        let mut moved = jane();
        moved.device_id = "AA:BB:CC:DD:EE:09".to_string();
        monitor.sync(Some(&moved));

        assert_eq!(feed.subscriber_count(JANE_DEVICE), 0);
        assert_eq!(feed.subscriber_count("AA:BB:CC:DD:EE:09"), 1);
    }

    #[test]
    fn test_wait_for_reading_times_out_when_idle() {
        let (mut monitor, _, _) = monitor();
        assert!(!monitor.wait_for_reading(Duration::from_millis(10)));
    }

    #[test]
    fn test_wait_for_reading_applies_delivery() {
        let (mut monitor, feed, _) = monitor();
        monitor.start(&jane());
        feed.push(JANE_DEVICE, reading(JANE_DEVICE, 72.0, 98.2));

        assert!(monitor.wait_for_reading(Duration::from_millis(10)));
        assert_eq!(monitor.state(), MonitorState::Live);
    }
}
