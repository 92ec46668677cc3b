//! vitalwatch - vital-sign monitoring tool
//!
//! A command-line tool for watching heart rate and body temperature
//! readings and raising alerts when they leave their normal bands.

use clap::Parser;
use vitalwatch::cli::args::{generate_completions, Cli, Commands};
use vitalwatch::commands::{
    run_classify, run_history, run_profiles, run_replay, run_thresholds, run_watch,
};
use vitalwatch::config::{Config, ConfigBuilder};
use vitalwatch::error::{AppError, ConfigError};
use vitalwatch::logging;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Logging depends on the merged verbose setting
    let config = load_config(&cli);
    let verbose = config
        .as_ref()
        .map_or(cli.verbose, |config| config.general.verbose);
    logging::init(verbose);

    // Run the appropriate command
    let result = config.and_then(|config| {
        if let Some(path) = &config.source {
            log::info!("Loaded config from {}", path.display());
        }
        run(&cli, &config)
    });

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<Config, AppError> {
    let (interval_ms, history_count, no_alerts) = match &cli.command {
        Commands::Watch(args) => (args.interval_ms, None, args.no_alerts),
        Commands::History(args) => (None, args.count, false),
        Commands::Replay(args) => (None, None, args.no_alerts),
        _ => (None, None, false),
    };

    let config = ConfigBuilder::new()
        .with_file(cli.config.as_deref())?
        .with_verbose(cli.verbose.then_some(true))
        .with_interval_ms(interval_ms)
        .with_history_count(history_count)
        .with_alerts_enabled(no_alerts.then_some(false))
        .build();

    Ok(config)
}

fn run(cli: &Cli, config: &Config) -> Result<(), AppError> {
    match &cli.command {
        Commands::Profiles(args) => run_profiles(&args.command, cli.format, config),

        Commands::Thresholds => run_thresholds(cli.format, config),

        Commands::Classify(args) => run_classify(args, cli.format, config),

        Commands::History(args) => run_history(args, cli.format, config),

        Commands::Watch(args) => run_watch(args, cli.format, config),

        Commands::Replay(args) => run_replay(args, cli.format, config),

        Commands::Completions { shell } => {
            generate_completions(*shell);
            Ok(())
        }
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::ProfileNotFound(_) => {
            eprintln!();
            eprintln!("Hint: Run 'vitalwatch profiles list' to see available ids.");
        }
        AppError::ProfileInactive(_) => {
            eprintln!();
            eprintln!("Hint: Only active profiles can be monitored.");
            eprintln!("      Set status = \"active\" for the profile in your config.");
        }
        AppError::Config(ConfigError::Parse { .. }) => {
            eprintln!();
            eprintln!("Hint: Fix or remove the file named above; see README.md for the format.");
        }
        AppError::Config(ConfigError::FileNotFound(_)) => {
            eprintln!();
            eprintln!("Hint: Check the --config path or the VITALWATCH_CONFIG variable.");
        }
        AppError::Config(ConfigError::InvalidValue { .. }) => {
            eprintln!();
            eprintln!("Hint: Fix the named key in your config file. Threshold ranges");
            eprintln!("      need min below max, e.g. [thresholds.heart_rate] min = 60.0, max = 100.0");
        }
        _ => {}
    }
}
