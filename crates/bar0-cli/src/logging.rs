//! Minimal stderr sink for the `log` facade.

use log::{LevelFilter, Log, Metadata, Record};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", format_record(record));
        }
    }

    fn flush(&self) {}
}

/// Maximum level for a run: debug with `--verbose`, warnings otherwise.
#[must_use]
pub const fn level_filter(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Formats one log line as `LEVEL target: message`.
#[must_use]
pub fn format_record(record: &Record<'_>) -> String {
    let (level, target) = (record.level(), record.target());
    format!("{level:<5} {target}: {}", record.args())
}

/// Installs the stderr logger. A logger installed earlier is left in place.
pub fn init(verbose: bool) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level_filter(verbose));
    }
}
