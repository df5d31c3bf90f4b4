#![cfg(feature = "std")]

//! Console backend for the `log` facade. Warnings and errors go to stderr,
//! everything else to stdout, one line per record.

use std::env;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Environment variable holding the log level filter.
pub const LOG_ENV: &str = "TICTACTOE_LOG";

const CRATE_PREFIX: &str = concat!(env!("CARGO_CRATE_NAME"), "::");

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record);
        match record.level() {
            Level::Error | Level::Warn => eprintln!("{}", line),
            _ => println!("{}", line),
        }
    }

    fn flush(&self) {}
}

/// Render `record` as `LEVEL module: message`. Targets inside this crate
/// lose their crate prefix.
pub fn format_record(record: &Record) -> String {
    let target = record.target();
    let module = target.strip_prefix(CRATE_PREFIX).unwrap_or(target);
    format!("{:<5} {}: {}", record.level(), module, record.args())
}

/// Parse a level name, falling back to `info` for anything unrecognised.
pub fn level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the console logger at `level`. Only the first installation
/// wins; later calls just adjust the level.
pub fn init_logging_with(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("Logger already installed");
    }
    log::set_max_level(level);
}

/// Install the console logger at the level named by `TICTACTOE_LOG`.
pub fn init_logging() {
    init_logging_with(level_from(env::var(LOG_ENV).ok().as_deref()));
}
