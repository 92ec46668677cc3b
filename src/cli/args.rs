//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Vital-sign monitoring tool
///
/// Watch heart rate and body temperature readings for monitored profiles
/// and raise alerts when they leave their normal bands.
#[derive(Parser, Debug)]
#[command(name = "vitalwatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "VITALWATCH_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect monitored profiles
    Profiles(ProfilesArgs),

    /// Show the active threshold table
    Thresholds,

    /// Classify a single pair of vitals
    Classify(ClassifyArgs),

    /// Show recent readings for a profile
    History(HistoryArgs),

    /// Watch live readings for a profile
    Watch(WatchArgs),

    /// Replay recorded readings through a monitor
    Replay(ReplayArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for profile commands
#[derive(Parser, Debug)]
pub struct ProfilesArgs {
    #[command(subcommand)]
    pub command: ProfilesCommands,
}

/// Profile subcommands
#[derive(Subcommand, Debug)]
pub enum ProfilesCommands {
    /// List all profiles
    List {
        /// Only show active profiles
        #[arg(long)]
        active: bool,

        /// Filter by name, location or device id (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one profile
    Show {
        /// Profile id
        id: String,
    },
}

/// Arguments for the classify command
#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// Heart rate in bpm
    #[arg(long, allow_negative_numbers = true)]
    pub heart_rate: f64,

    /// Body temperature in °F
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: f64,
}

/// Arguments for the history command
#[derive(Parser, Debug)]
pub struct HistoryArgs {
    /// Profile id
    pub id: String,

    /// Number of readings to fetch (defaults to the configured count)
    #[arg(short = 'n', long)]
    pub count: Option<usize>,
}

/// Arguments for the watch command
#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Profile id
    pub id: String,

    /// Delay between readings in milliseconds
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(10..))]
    pub interval_ms: Option<u64>,

    /// Stop after this many readings (runs until interrupted otherwise)
    #[arg(short, long)]
    pub ticks: Option<u64>,

    /// Do not raise notifications on level changes
    #[arg(long)]
    pub no_alerts: bool,
}

/// Arguments for the replay command
#[derive(Parser, Debug)]
pub struct ReplayArgs {
    /// Profile id
    pub id: String,

    /// JSON file holding an array of readings
    pub file: PathBuf,

    /// Do not raise notifications on level changes
    #[arg(long)]
    pub no_alerts: bool,
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_thresholds() {
        let args = Cli::try_parse_from(["vitalwatch", "thresholds"]).unwrap();
        assert!(matches!(args.command, Commands::Thresholds));
    }

    #[test]
    fn test_cli_parse_verbose() {
        let args = Cli::try_parse_from(["vitalwatch", "-v", "thresholds"]).unwrap();
        assert!(args.verbose);
    }

    #[test]
    fn test_cli_parse_profiles_show() {
        let args = Cli::try_parse_from(["vitalwatch", "profiles", "show", "2"]).unwrap();
        if let Commands::Profiles(profiles) = args.command {
            if let ProfilesCommands::Show { id } = profiles.command {
                assert_eq!(id, "2");
            } else {
                panic!("Expected Show command");
            }
        } else {
            panic!("Expected Profiles command");
        }
    }

    #[test]
    fn test_cli_parse_profiles_list_search() {
        let args = Cli::try_parse_from([
            "vitalwatch",
            "profiles",
            "list",
            "--active",
            "--search",
            "building b",
        ])
        .unwrap();

        if let Commands::Profiles(profiles) = args.command {
            if let ProfilesCommands::List { active, search } = profiles.command {
                assert!(active);
                assert_eq!(search.as_deref(), Some("building b"));
            } else {
                panic!("Expected List command");
            }
        } else {
            panic!("Expected Profiles command");
        }
    }

    #[test]
    fn test_cli_parse_classify() {
        let args = Cli::try_parse_from([
            "vitalwatch",
            "classify",
            "--heart-rate",
            "58",
            "--temperature",
            "103.5",
        ])
        .unwrap();

        if let Commands::Classify(classify) = args.command {
            assert_eq!(classify.heart_rate, 58.0);
            assert_eq!(classify.temperature, 103.5);
        } else {
            panic!("Expected Classify command");
        }
    }

    #[test]
    fn test_cli_classify_requires_both_vitals() {
        let result = Cli::try_parse_from(["vitalwatch", "classify", "--heart-rate", "72"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_watch_args() {
        let args = Cli::try_parse_from([
            "vitalwatch",
            "watch",
            "2",
            "--interval-ms",
            "250",
            "--ticks",
            "4",
            "--no-alerts",
        ])
        .unwrap();

        if let Commands::Watch(watch) = args.command {
            assert_eq!(watch.id, "2");
            assert_eq!(watch.interval_ms, Some(250));
            assert_eq!(watch.ticks, Some(4));
            assert!(watch.no_alerts);
        } else {
            panic!("Expected Watch command");
        }
    }

    #[test]
    fn test_cli_watch_interval_validation() {
        let result = Cli::try_parse_from(["vitalwatch", "watch", "2", "--interval-ms", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_replay() {
        let args =
            Cli::try_parse_from(["vitalwatch", "--format", "json", "replay", "1", "r.json"])
                .unwrap();
        assert!(matches!(args.format, OutputFormat::Json));
        if let Commands::Replay(replay) = args.command {
            assert_eq!(replay.file, PathBuf::from("r.json"));
        } else {
            panic!("Expected Replay command");
        }
    }
}
