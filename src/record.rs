use std::time::{SystemTime, UNIX_EPOCH};

use crate::location::{Locate, Location};
use crate::severity::Level;
use crate::thread;
use crate::throwable::Throwable;

/// Logging event.
///
/// Records are built by loggers and passed by reference through appenders and layouts. All
/// per-event state is either owned or borrowed for the duration of a single logging call, so
/// layouts can't retain it beyond that.
pub struct Record<'a> {
    level: Level,
    logger: &'a str,
    thread: String,
    timestamp: i64,
    message: Option<&'a str>,
    throwable: Option<&'a Throwable>,
    ndc: Vec<String>,
    mdc: Vec<(String, String)>,
    location: Option<&'a dyn Locate>,
}

impl<'a> Record<'a> {
    /// Constructs a new record, stamping it with the current time and thread name.
    pub fn new(level: Level, logger: &'a str, message: Option<&'a str>) -> Record<'a> {
        Record {
            level: level,
            logger: logger,
            thread: thread::name(),
            timestamp: now(),
            message: message,
            throwable: None,
            ndc: Vec::new(),
            mdc: Vec::new(),
            location: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Record<'a> {
        self.timestamp = timestamp;
        self
    }

    pub fn with_thread<T: Into<String>>(mut self, thread: T) -> Record<'a> {
        self.thread = thread.into();
        self
    }

    pub fn with_throwable(mut self, throwable: Option<&'a Throwable>) -> Record<'a> {
        self.throwable = throwable;
        self
    }

    pub fn with_ndc(mut self, ndc: Vec<String>) -> Record<'a> {
        self.ndc = ndc;
        self
    }

    pub fn with_mdc(mut self, mdc: Vec<(String, String)>) -> Record<'a> {
        self.mdc = mdc;
        self
    }

    pub fn with_location(mut self, location: &'a dyn Locate) -> Record<'a> {
        self.location = Some(location);
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn logger(&self) -> &str {
        self.logger
    }

    pub fn thread(&self) -> &str {
        &self.thread
    }

    /// Returns the event time in milliseconds since the epoch.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn message(&self) -> Option<&str> {
        self.message
    }

    pub fn throwable(&self) -> Option<&Throwable> {
        self.throwable
    }

    pub fn ndc(&self) -> &[String] {
        &self.ndc
    }

    pub fn mdc(&self) -> &[(String, String)] {
        &self.mdc
    }

    /// Resolves the source location, if the record carries one.
    ///
    /// Resolution happens on each call.
    pub fn location(&self) -> Option<Location> {
        self.location.map(|location| location.locate())
    }
}

fn now() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_millis() as i64,
        Err(err) => -(err.duration().as_millis() as i64),
    }
}
