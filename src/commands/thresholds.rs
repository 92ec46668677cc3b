//! Thresholds command implementation

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, ThresholdTable};
use crate::config::Config;
use crate::error::Result;

/// Execute the thresholds command
pub fn run_thresholds(format: OutputFormat, config: &Config) -> Result<()> {
    let settings = config.threshold_settings()?;
    print_output(&ThresholdTable::from(&settings), format)?;
    Ok(())
}
