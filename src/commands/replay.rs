//! Replay command implementation
//!
//! Feeds recorded readings through a monitor so alert behaviour can be
//! checked without live hardware.

use super::find_active_profile;
use crate::alerts::{MemoryNotifier, NotificationManager};
use crate::cli::args::{OutputFormat, ReplayArgs};
use crate::cli::output::{print_output, ReadingEntry, ReplaySummary};
use crate::config::Config;
use crate::domain::VitalReading;
use crate::error::{AppError, Result};
use crate::feed::ManualFeed;
use crate::services::VitalMonitor;

use std::path::Path;

/// Load a JSON array of readings
pub fn load_readings(path: &Path) -> Result<Vec<VitalReading>> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| AppError::ReadingsFile {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Execute the replay command
pub fn run_replay(args: &ReplayArgs, format: OutputFormat, config: &Config) -> Result<()> {
    let store = config.profile_store()?;
    let profile = find_active_profile(&store, &args.id)?;
    let readings = load_readings(&args.file)?;

    let monitor_config = config.monitor_config()?;

    let recorder = MemoryNotifier::new();
    let notifications = NotificationManager::new().with_notifier(Box::new(recorder.clone()));

    let feed = ManualFeed::new();
    let mut monitor = VitalMonitor::new(feed.clone(), monitor_config, notifications);
    monitor.start(&profile);

    let mut entries = Vec::with_capacity(readings.len());
    for reading in readings {
        if reading.device_id() != profile.device_id {
            log::warn!(
                "Skipping reading for {} (watching {})",
                reading.device_id(),
                profile.device_id
            );
            continue;
        }

        feed.push(&profile.device_id, reading);
        if monitor.pump() > 0 {
            let snapshot = monitor.snapshot();
            if let Some(reading) = snapshot.reading {
                entries.push(ReadingEntry {
                    reading,
                    level: snapshot.alert_level,
                });
            }
        }
    }

    let final_level = monitor.snapshot().alert_level;
    monitor.stop();

    let summary = ReplaySummary {
        profile_id: profile.id.clone(),
        name: profile.display_name(),
        readings: entries,
        alerts: recorder.alerts(),
        final_level,
    };
    print_output(&summary, format)?;

    Ok(())
}
