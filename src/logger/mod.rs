use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::appender::Appender;
use crate::diagnostic::{mdc, ndc};
use crate::layout::Error;
use crate::location::{Callsite, Locate};
use crate::record::Record;
use crate::severity::Level;
use crate::throwable::Throwable;

const LEVELS: [Level; 6] = [
    Level::Trace,
    Level::Debug,
    Level::Info,
    Level::Warn,
    Level::Error,
    Level::Fatal,
];

/// Blocking thread-safe reloadable logger.
///
/// Handles incoming records by sequentially iterating through its appenders. Clones share both
/// appenders and threshold, so reconfiguring one of them reconfigures all.
///
/// By reloading we mean that appenders can be safely replaced in runtime, while events being
/// appended concurrently finish with the appenders they started with.
#[derive(Clone)]
pub struct Logger {
    name: Arc<str>,
    threshold: Arc<AtomicUsize>,
    appenders: Arc<Mutex<Arc<Vec<Arc<dyn Appender>>>>>,
}

impl Logger {
    pub fn new<N: Into<String>>(name: N, appenders: Vec<Box<dyn Appender>>) -> Logger {
        let name: String = name.into();

        Logger {
            name: Arc::from(name),
            threshold: Arc::new(AtomicUsize::new(Level::Trace as usize)),
            appenders: Arc::new(Mutex::new(Arc::new(into_shared(appenders)))),
        }
    }

    /// Constructs a logger named `root` without appenders.
    pub fn root() -> Logger {
        Logger::new("root", Vec::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn threshold(&self) -> Level {
        LEVELS[self.threshold.load(Ordering::Relaxed)]
    }

    /// Sets the least severe level this logger lets through.
    pub fn set_threshold(&self, level: Level) {
        self.threshold.store(level as usize, Ordering::Relaxed);
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        level as usize >= self.threshold.load(Ordering::Relaxed)
    }

    /// Replaces all appenders with the given ones.
    pub fn reset(&self, appenders: Vec<Box<dyn Appender>>) {
        let appenders = Arc::new(into_shared(appenders));

        match self.appenders.lock() {
            Ok(mut current) => *current = appenders,
            Err(poisoned) => *poisoned.into_inner() = appenders,
        }
    }

    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        let mut current = match self.appenders.lock() {
            Ok(current) => current,
            Err(poisoned) => poisoned.into_inner(),
        };

        let mut appenders = Vec::clone(&current);
        appenders.push(Arc::from(appender));
        *current = Arc::new(appenders);
    }

    /// Passes the record to every appender, unless it's filtered out by the threshold.
    ///
    /// A failing appender doesn't prevent others from receiving the record, the first error is
    /// returned after all of them were tried.
    pub fn try_log(&self, rec: &Record) -> Result<(), Error> {
        if !self.is_enabled(rec.level()) {
            return Ok(());
        }

        let appenders = self.snapshot();

        let mut res = Ok(());
        for appender in appenders.iter() {
            if let Err(err) = appender.append(rec) {
                if res.is_ok() {
                    res = Err(err);
                }
            }
        }

        res
    }

    /// Same as `try_log`, but reports failures to the standard error instead.
    pub fn log(&self, rec: &Record) {
        if let Err(err) = self.try_log(rec) {
            eprintln!("failed to append event to logger \"{}\": {}", self.name, err);
        }
    }

    /// Builds a record stamped with the current diagnostic contexts and logs it.
    ///
    /// This is what the `stashlog!` macro expands to.
    pub fn log_message(&self, level: Level, message: Option<&str>, throwable: Option<&Throwable>,
        location: &dyn Locate)
    {
        if !self.is_enabled(level) {
            return;
        }

        let rec = Record::new(level, &self.name, message)
            .with_throwable(throwable)
            .with_ndc(ndc::snapshot())
            .with_mdc(mdc::snapshot())
            .with_location(location);

        self.log(&rec);
    }

    fn snapshot(&self) -> Arc<Vec<Arc<dyn Appender>>> {
        match self.appenders.lock() {
            Ok(appenders) => appenders.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

fn into_shared(appenders: Vec<Box<dyn Appender>>) -> Vec<Arc<dyn Appender>> {
    appenders.into_iter().map(Arc::from).collect()
}

/// Bridges the `log` facade, using record targets as logger names.
impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.is_enabled(metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        let level = Level::from(record.level());
        if !self.is_enabled(level) {
            return;
        }

        let message = record.args().to_string();
        let location = Callsite::module(
            record.module_path_static().unwrap_or("?"),
            record.file_static().unwrap_or("?"),
            record.line().unwrap_or(0),
        );

        let rec = Record::new(level, record.target(), Some(message.as_str()))
            .with_ndc(ndc::snapshot())
            .with_mdc(mdc::snapshot())
            .with_location(&location);

        Logger::log(self, &rec);
    }

    fn flush(&self) {}
}

/// Installs the logger as the `log` facade backend.
pub fn init(logger: Logger) -> Result<(), log::SetLoggerError> {
    let max = match logger.threshold() {
        Level::Trace => log::LevelFilter::Trace,
        Level::Debug => log::LevelFilter::Debug,
        Level::Info => log::LevelFilter::Info,
        Level::Warn => log::LevelFilter::Warn,
        Level::Error | Level::Fatal => log::LevelFilter::Error,
    };

    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(max);

    Ok(())
}

/// Logs a formatted message, capturing the call site.
///
/// ```
/// #[macro_use] extern crate stashlog;
///
/// use stashlog::{Level, Logger, Throwable};
///
/// fn main() {
///     let log = Logger::root();
///
///     stashlog!(log, Level::Info, "file does not exist: /var/www/favicon.ico");
///     stashlog!(log, Level::Info, "file does not exist: {}", "/var/www/favicon.ico");
///
///     let err = Throwable::new("IoError").with_message("not found");
///     stashlog!(log, Level::Error, throwable: &err, "failed to open {}", "/var/www/favicon.ico");
/// }
/// ```
#[macro_export]
macro_rules! stashlog (
    ($log:expr, $level:expr, throwable: $t:expr, $($args:tt)+) => {{
        let log = &$log;
        let level = $level;
        if log.is_enabled(level) {
            let message = format!($($args)+);
            let throwable: &$crate::Throwable = $t;
            log.log_message(level, Some(message.as_str()), Some(throwable), &$crate::callsite!());
        }
    }};
    ($log:expr, $level:expr, $($args:tt)+) => {{
        let log = &$log;
        let level = $level;
        if log.is_enabled(level) {
            let message = format!($($args)+);
            log.log_message(level, Some(message.as_str()), None, &$crate::callsite!());
        }
    }};
);
