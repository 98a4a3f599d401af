//! Logger setup shared by the binaries.

use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;
use std::time::Instant;

/// Builds the logger using the environment variable `RUST_LOG` to determine the log level. Uses
/// `level` if the environment variable is not set. Every record is prefixed with the seconds
/// elapsed since the logger was built.
pub fn build_logger_for_level(level: LevelFilter) {
    let start_time = Instant::now();

    let env = Env::default().default_filter_or(level.as_str());
    let mut builder = Builder::from_env(env);
    builder
        .format(move |buf, record| {
            let elapsed = start_time.elapsed().as_millis();
            writeln!(
                buf,
                "% {:>6}.{:03} [{}] - {}",
                elapsed / 1000,
                elapsed % 1000,
                record.level(),
                record.args()
            )
        })
        .init();
}

/// Like `build_logger_for_level`, but raises `default_level` by `verbosity` many levels.
pub fn build_logger_for_verbosity(default_level: LevelFilter, verbosity: usize) {
    build_logger_for_level(level_from_verbosity(default_level, verbosity));
}

fn level_from_verbosity(default_level: LevelFilter, verbosity: usize) -> LevelFilter {
    let levels = [
        LevelFilter::Off,
        LevelFilter::Error,
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ];
    let start = levels.iter().position(|level| *level == default_level).unwrap_or(0);
    levels.get(start + verbosity).copied().unwrap_or(LevelFilter::Trace)
}
