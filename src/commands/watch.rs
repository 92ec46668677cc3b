//! Watch command implementation
//!
//! Runs a live monitoring session against the simulated feed.

use super::find_active_profile;
use crate::alerts::{NotificationManager, TerminalNotifier};
use crate::cli::args::{OutputFormat, WatchArgs};
use crate::cli::output::{print_output, Message, ReadingEntry};
use crate::config::Config;
use crate::error::{ConfigError, FeedError, Result};
use crate::feed::SimulatedFeed;
use crate::services::{MonitorState, VitalMonitor};

/// How many intervals to wait for a reading before warning
const MISSED_INTERVALS: u32 = 3;

/// Execute the watch command
pub fn run_watch(args: &WatchArgs, format: OutputFormat, config: &Config) -> Result<()> {
    let store = config.profile_store()?;
    let profile = find_active_profile(&store, &args.id)?;

    let interval = config.refresh_interval();
    if interval.is_zero() {
        return Err(ConfigError::InvalidValue {
            key: "general.refresh_interval_ms".to_string(),
            message: "must be greater than zero".to_string(),
        }
        .into());
    }
    let monitor_config = config.monitor_config()?;

    let notifications = NotificationManager::new()
        .with_notifier(Box::new(TerminalNotifier::new().with_colors(config.alerts.use_colors)));

    let feed = SimulatedFeed::new().with_interval(interval);
    let mut monitor = VitalMonitor::new(feed, monitor_config, notifications);

    if monitor.start(&profile) == MonitorState::Idle {
        return Err(FeedError::SubscribeFailed {
            device_id: profile.device_id.clone(),
            reason: "no session was opened".to_string(),
        }
        .into());
    }

    log::info!("Watching {}", profile.display_name());
    log::info!("  Device: {}", profile.device_id);
    log::info!("  Interval: {:?}", interval);
    log::info!("  Alerts: {}", monitor.alerts_enabled());

    if matches!(format, OutputFormat::Table) {
        println!(
            "Watching {} ({}) every {:?}",
            profile.display_name(),
            profile.device_id,
            interval
        );
    }

    let mut received = 0u64;
    while args.ticks.map_or(true, |ticks| received < ticks) {
        if !monitor.wait_for_reading(interval * MISSED_INTERVALS) {
            log::warn!(
                "No reading for {} within {:?}",
                profile.display_name(),
                interval * MISSED_INTERVALS
            );
            continue;
        }

        received += 1;
        let snapshot = monitor.snapshot();
        if let Some(reading) = snapshot.reading {
            let entry = ReadingEntry {
                reading,
                level: snapshot.alert_level,
            };
            print_output(&entry, format)?;
        }
    }

    let final_level = monitor.snapshot().alert_level;
    monitor.stop();

    let msg = Message {
        message: format!(
            "Stopped watching {} after {} readings (last level: {})",
            profile.display_name(),
            received,
            final_level
        ),
        success: true,
    };
    print_output(&msg, format)?;

    Ok(())
}
