#![cfg(feature = "std")]

//! Stderr logger for the service binaries. Stdout is left to command output
//! such as the `analyze` grid and the simulator's JSON line.

use log::{self, LevelFilter, Metadata, Record};
use std::env;
use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

/// Environment variable holding the log level.
pub const LOG_ENV: &str = "ADVISOR_LOG";

struct AdvisorLogger {
    started: OnceLock<Instant>,
}

impl log::Log for AdvisorLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.started.get_or_init(Instant::now).elapsed();
        let _ = writeln!(
            std::io::stderr().lock(),
            "{:>9.3}s {:<5} [{}] {}",
            elapsed.as_secs_f64(),
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: AdvisorLogger = AdvisorLogger {
    started: OnceLock::new(),
};

/// Level named by `value`, or `Info` when it is missing or not a level.
pub fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the logger with the level from `ADVISOR_LOG`. Calling it again is
/// a no-op.
pub fn init_logging() {
    let level = parse_level(env::var(LOG_ENV).ok().as_deref());
    LOGGER.started.get_or_init(Instant::now);
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}
