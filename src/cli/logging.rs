//! Logger initialisation
//!
//! `RUST_LOG` wins when set; otherwise `-v` flags pick the level.

use log::LevelFilter;

/// Map the `-v` count to a level filter
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger. Later calls are ignored.
pub fn init_logger(verbose: u8) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for_verbosity(verbose))
        .format_timestamp_millis()
        .parse_default_env();

    if builder.try_init().is_err() {
        log::debug!("logger already initialised");
    }
}
