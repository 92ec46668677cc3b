//! Alert notification system
//!
//! Provides notification channels for vital alerts.

use super::types::{AlertLevel, Urgency, VitalAlert};
use crate::domain::{ThresholdSettings, VitalReading};
use crate::error::Result;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Notification channel trait
pub trait Notifier: Send + Sync {
    /// Send a notification for an alert
    fn notify(&self, alert: &VitalAlert) -> Result<()>;

    /// Channel name for identification
    fn name(&self) -> &str;
}

/// Terminal/console notifier
///
/// Outputs alerts to stdout/stderr with colored formatting
pub struct TerminalNotifier {
    /// Use stderr instead of stdout
    use_stderr: bool,
    /// Use colors (ANSI escape codes)
    use_colors: bool,
}

impl TerminalNotifier {
    /// Create a new terminal notifier
    pub fn new() -> Self {
        Self {
            use_stderr: true,
            use_colors: Self::supports_color(),
        }
    }

    /// Create a notifier that uses stdout
    pub fn stdout() -> Self {
        Self {
            use_stderr: false,
            use_colors: Self::supports_color(),
        }
    }

    /// Create a notifier without colors
    pub fn no_color() -> Self {
        Self {
            use_stderr: true,
            use_colors: false,
        }
    }

    /// Override color usage
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors && Self::supports_color();
        self
    }

    fn supports_color() -> bool {
        std::env::var("TERM")
            .map(|term| term != "dumb")
            .unwrap_or(false)
    }

    fn format_alert(&self, alert: &VitalAlert) -> String {
        format!(
            "[{}] {} {}",
            alert.observed_at.format("%H:%M:%S"),
            self.format_title(alert),
            alert.message
        )
    }

    fn format_title(&self, alert: &VitalAlert) -> String {
        if !self.use_colors {
            return alert.title.clone();
        }

        let color_code = match alert.urgency {
            Urgency::Medium => "\x1b[33m",       // Yellow
            Urgency::High => "\x1b[31m\x1b[1m", // Bold Red
        };

        format!("{}{}\x1b[0m", color_code, alert.title)
    }
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, alert: &VitalAlert) -> Result<()> {
        let message = self.format_alert(alert);

        if self.use_stderr {
            let stderr = io::stderr();
            let mut handle = stderr.lock();
            writeln!(handle, "{}", message)?;
        } else {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", message)?;
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "terminal"
    }
}

/// In-memory notifier
///
/// Keeps every alert it receives. Clones share the same buffer, so one
/// handle can be registered with a manager while another reads it back.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    alerts: Arc<Mutex<Vec<VitalAlert>>>,
}

impl MemoryNotifier {
    /// Create an empty notifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Alerts received so far, oldest first
    pub fn alerts(&self) -> Vec<VitalAlert> {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, alert: &VitalAlert) -> Result<()> {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(alert.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Notification manager
///
/// Fans a vital alert out to every registered channel. Delivery is best
/// effort: a failing channel is logged and skipped.
pub struct NotificationManager {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotificationManager {
    /// Create a new notification manager
    pub fn new() -> Self {
        Self {
            notifiers: Vec::new(),
        }
    }

    /// Add a notifier
    pub fn add_notifier(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Builder: add a notifier
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.add_notifier(notifier);
        self
    }

    /// Send notification to all channels
    pub fn notify_all(&self, alert: &VitalAlert) {
        for notifier in &self.notifiers {
            if let Err(e) = notifier.notify(alert) {
                log::warn!("Failed to notify via {}: {}", notifier.name(), e);
            }
        }
    }

    /// Render and send the notification for a reading
    ///
    /// Does nothing for `Normal`. Returns the alert that was sent, if any.
    pub fn dispatch(
        &self,
        reading: &VitalReading,
        subject: &str,
        level: AlertLevel,
        thresholds: &ThresholdSettings,
    ) -> Option<VitalAlert> {
        let alert = VitalAlert::from_reading(reading, subject, level, thresholds)?;
        log::debug!("Dispatching {} alert for {}", alert.level, subject);
        self.notify_all(&alert);
        Some(alert)
    }

    /// Get number of active notifiers
    pub fn notifier_count(&self) -> usize {
        self.notifiers.len()
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        let mut manager = Self::new();
        manager.add_notifier(Box::new(TerminalNotifier::new()));
        manager
    }
}
