//! Classify command implementation
//!
//! Classifies a single pair of vitals against the configured thresholds.

use crate::alerts::{classify, VitalAlert};
use crate::cli::args::{ClassifyArgs, OutputFormat};
use crate::cli::output::{print_output, Classification};
use crate::config::Config;
use crate::domain::VitalReading;
use crate::error::Result;

/// Subject name used in the rendered notification
const SUBJECT: &str = "Subject";

/// Execute the classify command
pub fn run_classify(args: &ClassifyArgs, format: OutputFormat, config: &Config) -> Result<()> {
    let thresholds = config.threshold_settings()?;
    let reading = VitalReading::now("cli", args.heart_rate, args.temperature)?;

    let level = classify(&reading, &thresholds);
    let alert = VitalAlert::from_reading(&reading, SUBJECT, level, &thresholds);
    log::debug!("Classified hr={} temp={} as {}", args.heart_rate, args.temperature, level);

    let classification = Classification {
        heart_rate: reading.heart_rate(),
        body_temperature: reading.body_temperature(),
        level,
        alert,
    };
    print_output(&classification, format)?;

    Ok(())
}
