use log::{Level, LevelFilter, Log, Metadata, Record};
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Global debug flag
static DEBUG_MODE: AtomicBool = AtomicBool::new(false);

pub fn enable_debug() {
    DEBUG_MODE.store(true, Ordering::Relaxed);
}

pub fn is_debug_enabled() -> bool {
    DEBUG_MODE.load(Ordering::Relaxed)
}

/// Destination for user-facing messages.
pub trait Logger: Send + Sync {
    fn log(&self, level: Level, message: String);
}

/// Only info goes to stdout so that `--json` output stays parseable.
pub struct ConsoleLogger;

fn writes_to_stderr(level: Level) -> bool {
    level != Level::Info
}

impl Logger for ConsoleLogger {
    fn log(&self, level: Level, message: String) {
        if writes_to_stderr(level) {
            eprintln!("{}", message);
        } else {
            println!("{}", message);
        }
    }
}

static GLOBAL_LOGGER: OnceCell<Arc<dyn Logger>> = OnceCell::new();

pub fn log(level: Level, message: String) {
    if let Some(logger) = GLOBAL_LOGGER.get() {
        logger.log(level, message);
    } else {
        ConsoleLogger.log(level, message);
    }
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::logger::log(log::Level::Warn, format!("⚠️  {}", format!($($arg)*)))
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::logger::log(log::Level::Error, format!("❌ {}", format!($($arg)*)))
    };
}

/// Only emitted with `--debug`.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        if $crate::logger::is_debug_enabled() {
            $crate::logger::log(log::Level::Debug, format!("DEBUG: {}", format!($($arg)*)))
        }
    };
}

pub fn console_logger() -> Arc<dyn Logger> {
    Arc::new(ConsoleLogger)
}

/// Routes `log` crate records (including the library's) to our logger.
struct LogBridge {
    logger: Arc<dyn Logger>,
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level_prefix = match record.level() {
            Level::Error => "❌",
            Level::Warn => "⚠️",
            Level::Info => "ℹ️",
            Level::Debug => "🔍",
            Level::Trace => "🔬",
        };
        let message = format!("{} [{}] {}", level_prefix, record.target(), record.args());
        self.logger.log(record.level(), message);
    }

    fn flush(&self) {}
}

pub fn level_filter() -> LevelFilter {
    if is_debug_enabled() {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Call once at startup, after the debug flag is known.
pub fn init_logger_with_log_bridge(logger: Arc<dyn Logger>) {
    GLOBAL_LOGGER.set(logger.clone()).ok();

    let bridge = LogBridge { logger };
    log::set_boxed_logger(Box::new(bridge)).ok();
    log::set_max_level(level_filter());
}
