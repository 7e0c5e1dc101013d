//! Logger setup: env_logger with a timestamped single-line format.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Local;
use log::LevelFilter;

use crate::error::CliError;

/// Pick the level filter: the first candidate that parses, then `RUST_LOG`,
/// then info. Unparseable candidates are skipped.
pub fn resolve_level(candidates: &[Option<&str>]) -> LevelFilter {
    candidates
        .iter()
        .flatten()
        .find_map(|l| l.parse::<LevelFilter>().ok())
        .or_else(|| std::env::var("RUST_LOG").ok().and_then(|v| v.parse().ok()))
        .unwrap_or(LevelFilter::Info)
}

/// Install the global logger, appending to `log_file` when given.
pub fn init_logging(log_level: LevelFilter, log_file: Option<&Path>) -> Result<(), CliError> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log_level).format(|buf, record| {
        writeln!(
            buf,
            "{} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.args()
        )
    });

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| CliError::LogFile {
                path: path.display().to_string(),
                source,
            })?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;
    log::info!("Logger initialized (level: {})", log_level);
    Ok(())
}
