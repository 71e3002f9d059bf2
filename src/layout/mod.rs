use std::io::Write;

use crate::appender::Appender;
use crate::record::Record;

pub mod logstash;
mod simple;

pub use self::logstash::{LayoutConfig, LogstashLayout};
pub use self::simple::SimpleLayout;

quick_error! {
    #[derive(Debug)]
    pub enum Error {
        /// The sink failed while a formatted event was written into it.
        MalformedOutput(err: ::std::io::Error) {
            from()
            display("failed to write formatted event: {}", err)
            source(err)
        }
        ConfigInvalid(reason: String) {
            display("invalid layout configuration: {}", reason)
        }
        NotActivated {
            display("layout must be activated before formatting events")
        }
    }
}

/// Layouts are responsible for turning records into bytes.
///
/// A layout is owned by an appender. The host configures it, activates it once, and from then on
/// the layout may be asked to format events from any number of threads concurrently.
pub trait Layout: Send + Sync {
    /// Validates and freezes the configuration.
    ///
    /// Activating an already active layout applies the configuration changes made since the
    /// previous activation.
    fn activate(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// Formats the given record into the writer.
    ///
    /// The appender is the one owning this layout, some layouts query it for capabilities.
    fn format(&self, rec: &Record, appender: &dyn Appender, wr: &mut dyn Write) -> Result<(), Error>;

    /// Returns true if the layout renders throwables itself, so the appender must not append a
    /// separate stack trace.
    fn handles_throwable(&self) -> bool {
        false
    }

    /// Returns true if every formatted event is a single line terminated by `\n`.
    fn is_line_oriented(&self) -> bool {
        true
    }

    fn content_type(&self) -> &'static str {
        "text/plain"
    }
}
