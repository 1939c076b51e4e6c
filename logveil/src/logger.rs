// logveil/src/logger.rs
//! Logger initialization for the logveil CLI.

use log::LevelFilter;

/// Initializes env_logger, honoring `RUST_LOG` unless an explicit level
/// override is supplied. Log output goes to stderr so masked log text on
/// stdout stays clean for piping.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
    if let Some(level) = level {
        builder.filter_level(level);
    }
    // A second init (e.g. in tests) is not an error worth failing over.
    let _ = builder.format_timestamp_secs().try_init();
}
