//! Structured logging with Logstash compatible JSON output.
//!
//! Loggers pass records to appenders, each of which formats records with a layout and writes them
//! into an output. The main layout is `LogstashLayout`, emitting every event as a single line
//! Logstash v1 JSON object.

#[macro_use] extern crate quick_error;
#[macro_use] extern crate log;

pub mod appender;
pub mod diagnostic;
mod factory;
pub mod host;
pub mod json;
pub mod layout;
mod location;
pub mod logger;
pub mod output;
mod record;
mod registry;
mod severity;
mod thread;
mod throwable;
pub mod timestamp;

pub use self::appender::{Appender, HasFile};
pub use self::factory::Factory;
pub use self::layout::{Layout, LayoutConfig, LogstashLayout, SimpleLayout};
pub use self::location::{Callsite, Locate, Location, ModuleCallsite};
pub use self::logger::Logger;
pub use self::output::Output;
pub use self::record::Record;
pub use self::registry::{Config, Registry};
pub use self::severity::{Level, ParseLevelError};
pub use self::throwable::{StackFrame, Throwable};
