use chrono::Local;
use env_logger::fmt::Formatter;
use log::{Level, LevelFilter, Record};
use owo_colors::OwoColorize;
use anyhow::{Context, Result};
use std::io::Write;

/// Install the global logger. `RUST_LOG` still wins over `level`.
pub fn init_logger(level: LevelFilter) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()));
    builder.format(format_log);

    // The HTTP stack is noisy below warn
    builder.filter(Some("reqwest"), LevelFilter::Warn);
    builder.filter(Some("hyper"), LevelFilter::Warn);

    builder.try_init().context("Failed to install the logger")
}

/// Pick the effective level: `-v` flags win, the config level applies otherwise.
///
/// One `-v` means error, five or more mean trace.
pub fn resolve_level(config_level: &str, verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => config_level.parse().unwrap_or(LevelFilter::Info),
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn format_log(buf: &mut Formatter, record: &Record) -> std::io::Result<()> {
    let level = match record.level() {
        Level::Error => "ERROR".red().to_string(),
        Level::Warn => "WARN".yellow().to_string(),
        Level::Info => "INFO".cyan().to_string(),
        Level::Debug => "DEBUG".magenta().to_string(),
        Level::Trace => "TRACE".bright_black().to_string(),
    };

    writeln!(
        buf,
        "{} [{}] {} - {}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        level,
        record.target(),
        record.args()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_overrides_config() {
        assert_eq!(resolve_level("debug", 1), LevelFilter::Error);
        assert_eq!(resolve_level("error", 4), LevelFilter::Debug);
        assert_eq!(resolve_level("info", 9), LevelFilter::Trace);
    }

    #[test]
    fn test_second_install_reports_error() {
        // The first call may or may not win; either way a logger is installed afterwards
        let _ = init_logger(LevelFilter::Info);
        let err = init_logger(LevelFilter::Debug).unwrap_err();
        assert!(err.to_string().contains("Failed to install the logger"));
    }

    #[test]
    fn test_config_level_without_flags() {
        assert_eq!(resolve_level("warn", 0), LevelFilter::Warn);
        assert_eq!(resolve_level("TRACE", 0), LevelFilter::Trace);
        assert_eq!(resolve_level("loud", 0), LevelFilter::Info);
    }
}
