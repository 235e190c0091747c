//! Logging module
//!
//! Sinks for injected, leveled logging plus process-wide `env_logger` setup
//! for the binary.

pub mod sink;

pub use sink::{LogEvent, LogFacade, LogLevel, LogSink, MemorySink, NoopSink, CRITICAL_TARGET};

use crate::config::LoggingConfig;
use std::fs::OpenOptions;
use std::io::{self, Write};

/// Install the global logger described by `config`
///
/// `RUST_LOG` takes precedence over the configured level. Output goes to the
/// configured file (appending) when one is set, otherwise to stderr; with no
/// file and `console` disabled, logging is switched off. A second call leaves
/// the first logger in place.
pub fn init_logger(config: &LoggingConfig) -> io::Result<()> {
    let default_filter = config.level.as_level_filter().to_string().to_lowercase();
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));

    builder.format(|buf, record| {
        let level = if record.target() == CRITICAL_TARGET {
            "CRITICAL"
        } else {
            match record.level() {
                log::Level::Warn => "WARNING",
                log::Level::Error => "ERROR",
                log::Level::Info => "INFO",
                log::Level::Debug | log::Level::Trace => "DEBUG",
            }
        };
        writeln!(
            buf,
            "{} [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            level,
            record.args()
        )
    });

    if let Some(path) = &config.file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    } else if !config.console {
        builder.filter_level(log::LevelFilter::Off);
    }

    if builder.try_init().is_err() {
        log::debug!("Logger already initialized, keeping existing one");
    }
    Ok(())
}
