//! History command implementation
//!
//! Fetches recent readings for a profile and classifies each one.

use super::find_profile;
use crate::alerts::classify;
use crate::cli::args::{HistoryArgs, OutputFormat};
use crate::cli::output::{print_output, HistoryOutput, ReadingEntry};
use crate::config::Config;
use crate::error::Result;
use crate::feed::{SimulatedFeed, VitalFeed};

/// Execute the history command
pub fn run_history(args: &HistoryArgs, format: OutputFormat, config: &Config) -> Result<()> {
    let store = config.profile_store()?;
    let profile = find_profile(&store, &args.id)?;
    let thresholds = config.threshold_settings()?;
    let count = config.general.history_count;

    let feed = SimulatedFeed::new();
    let readings = feed.fetch_history(&profile.device_id, count)?;
    log::debug!(
        "Fetched {} readings for {} ({})",
        readings.len(),
        profile.display_name(),
        profile.device_id
    );

    let output = HistoryOutput {
        profile_id: profile.id.clone(),
        name: profile.display_name(),
        readings: readings
            .into_iter()
            .map(|reading| ReadingEntry {
                level: classify(&reading, &thresholds),
                reading,
            })
            .collect(),
    };
    print_output(&output, format)?;

    Ok(())
}
