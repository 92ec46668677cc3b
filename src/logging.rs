//! Logging setup
//!
//! `RUST_LOG` controls the filter, defaulting to `warn`. Verbose mode
//! raises the default level to `debug`.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Logger builder for the given verbosity
pub fn builder(verbose: bool) -> Builder {
    builder_from_env(Env::default(), verbose)
}

fn builder_from_env(env: Env<'_>, verbose: bool) -> Builder {
    let mut builder = Builder::from_env(env.default_filter_or("warn"));
    builder.format_timestamp(None);

    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }

    builder
}

/// Install the global logger
pub fn init(verbose: bool) {
    builder(verbose).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Metadata};

    const UNSET_FILTER: &str = "VITALWATCH_TEST_UNSET_LOG_FILTER";

    fn debug_metadata() -> Metadata<'static> {
        Metadata::builder()
            .level(Level::Debug)
            .target("vitalwatch::services::monitor")
            .build()
    }

    #[test]
    fn test_default_filter_is_warn() {
        let logger = builder_from_env(Env::new().filter(UNSET_FILTER), false).build();
        assert_eq!(logger.filter(), LevelFilter::Warn);
        assert!(!logger.enabled(&debug_metadata()));
    }

    #[test]
    fn test_verbose_enables_debug_records() {
        let logger = builder_from_env(Env::new().filter(UNSET_FILTER), true).build();
        assert_eq!(logger.filter(), LevelFilter::Debug);
        assert!(logger.enabled(&debug_metadata()));
    }
}
