//! Appenders glue a layout to an output.

use std::error;
use std::path::Path;

use crate::factory::Factory;
use crate::layout::{Error, Layout};
use crate::output::Output;
use crate::record::Record;
use crate::registry::{Config, Registry};

/// Implemented by appenders and outputs writing into a file.
pub trait HasFile {
    fn file(&self) -> &Path;
}

/// Appenders are responsible for delivering records to their destinations.
pub trait Appender: Send + Sync {
    fn name(&self) -> &str;

    fn append(&self, rec: &Record) -> Result<(), Error>;

    /// Returns the file capability, if this appender writes into a file.
    fn as_file(&self) -> Option<&dyn HasFile> {
        None
    }
}

/// Appender formatting records with a layout and writing them into an output.
///
/// ```
/// use stashlog::{Appender, Level, LogstashLayout, Record};
/// use stashlog::appender::OutputAppender;
/// use stashlog::output::MemoryOutput;
///
/// let out = MemoryOutput::new();
/// let mut appender = OutputAppender::new("memory", Box::new(LogstashLayout::new()), Box::new(out.clone()));
/// appender.activate().unwrap();
///
/// appender.append(&Record::new(Level::Info, "root", Some("Hello World"))).unwrap();
///
/// assert!(out.lines()[0].contains(r#""message":"Hello World""#));
/// ```
pub struct OutputAppender {
    name: String,
    layout: Box<dyn Layout>,
    output: Box<dyn Output>,
}

impl OutputAppender {
    pub fn new<N: Into<String>>(name: N, layout: Box<dyn Layout>, output: Box<dyn Output>) -> OutputAppender {
        OutputAppender {
            name: name.into(),
            layout: layout,
            output: output,
        }
    }

    /// Activates the underlying layout.
    pub fn activate(&mut self) -> Result<(), Error> {
        self.layout.activate()
    }

    pub fn layout(&self) -> &dyn Layout {
        &*self.layout
    }
}

impl Appender for OutputAppender {
    fn name(&self) -> &str {
        &self.name
    }

    fn append(&self, rec: &Record) -> Result<(), Error> {
        let mut wr = Vec::with_capacity(512);
        self.layout.format(rec, self, &mut wr)?;

        if !self.layout.handles_throwable() {
            if let Some(throwable) = rec.throwable() {
                wr.extend_from_slice(throwable.render().as_bytes());
                wr.push(b'\n');
            }
        }

        self.output.write(&wr)?;

        Ok(())
    }

    fn as_file(&self) -> Option<&dyn HasFile> {
        self.output.as_file()
    }
}

/// Builds output appenders from `{"name": ..., "layout": {...}, "output": {...}}`.
pub struct OutputAppenderFactory;

impl Factory for OutputAppenderFactory {
    type Item = dyn Appender;

    fn ty() -> &'static str {
        "output"
    }

    fn from(&self, cfg: &Config, registry: &Registry) -> Result<Box<dyn Appender>, Box<dyn error::Error>> {
        let name = match cfg.get("name") {
            Some(name) => name.as_str().ok_or("field \"name\" must be a string")?,
            None => "default",
        };

        let layout = registry.layout(cfg.get("layout").ok_or("section \"layout\" is required")?)?;
        let output = registry.output(cfg.get("output").ok_or("section \"output\" is required")?)?;

        let mut appender = OutputAppender::new(name, layout, output);
        appender.activate()?;

        Ok(Box::new(appender))
    }
}
