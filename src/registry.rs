//! Configuration driven construction of loggers.
//!
//! Every component is configured with a JSON object, whose `"type"` field selects the factory.
//!
//! ```
//! use stashlog::Registry;
//!
//! let cfg = serde_json::json!({
//!     "name": "app",
//!     "level": "info",
//!     "appenders": [{
//!         "name": "console",
//!         "layout": {"type": "logstash", "tags": "json"},
//!         "output": {"type": "null"}
//!     }]
//! });
//!
//! let log = Registry::new().logger(&cfg).unwrap();
//! assert_eq!("app", log.name());
//! ```

use std::collections::HashMap;
use std::error::Error;

use serde_json::Value;

use crate::appender::{Appender, OutputAppenderFactory};
use crate::factory::Factory;
use crate::layout::{Layout, LogstashLayout, SimpleLayout};
use crate::logger::Logger;
use crate::output::{FileOutputFactory, NullOutput, Output, Term};
use crate::severity::Level;

pub type Config = Value;

#[derive(Default)]
pub struct Registry {
    layouts: HashMap<&'static str, Box<dyn Factory<Item = dyn Layout>>>,
    outputs: HashMap<&'static str, Box<dyn Factory<Item = dyn Output>>>,
    appenders: HashMap<&'static str, Box<dyn Factory<Item = dyn Appender>>>,
}

impl Registry {
    /// Constructs a registry with all built-in components registered.
    pub fn new() -> Registry {
        let mut res = Registry::default();

        res.add_layout(LogstashLayout::new());
        res.add_layout(SimpleLayout);

        res.add_output(Term);
        res.add_output(FileOutputFactory);
        res.add_output(NullOutput);

        res.add_appender(OutputAppenderFactory);

        res
    }

    pub fn add_layout<T>(&mut self, factory: T)
        where T: Factory<Item = dyn Layout> + 'static
    {
        self.layouts.insert(T::ty(), Box::new(factory));
    }

    pub fn add_output<T>(&mut self, factory: T)
        where T: Factory<Item = dyn Output> + 'static
    {
        self.outputs.insert(T::ty(), Box::new(factory));
    }

    pub fn add_appender<T>(&mut self, factory: T)
        where T: Factory<Item = dyn Appender> + 'static
    {
        self.appenders.insert(T::ty(), Box::new(factory));
    }

    pub fn layout(&self, cfg: &Config) -> Result<Box<dyn Layout>, Box<dyn Error>> {
        let ty = ty(cfg)?;

        self.layouts.get(ty)
            .ok_or_else(|| format!("layout \"{}\" not found", ty))?
            .from(cfg, self)
    }

    pub fn output(&self, cfg: &Config) -> Result<Box<dyn Output>, Box<dyn Error>> {
        let ty = ty(cfg)?;

        self.outputs.get(ty)
            .ok_or_else(|| format!("output \"{}\" not found", ty))?
            .from(cfg, self)
    }

    /// Constructs an appender, the type defaults to `"output"`.
    pub fn appender(&self, cfg: &Config) -> Result<Box<dyn Appender>, Box<dyn Error>> {
        let ty = match cfg.get("type") {
            Some(..) => ty(cfg)?,
            None => "output",
        };

        self.appenders.get(ty)
            .ok_or_else(|| format!("appender \"{}\" not found", ty))?
            .from(cfg, self)
    }

    /// Constructs a logger from `{"name": ..., "level": ..., "appenders": [...]}`.
    ///
    /// The name defaults to `"root"`, the level to `"trace"`.
    pub fn logger(&self, cfg: &Config) -> Result<Logger, Box<dyn Error>> {
        let name = match cfg.get("name") {
            Some(name) => name.as_str().ok_or("field \"name\" must be a string")?,
            None => "root",
        };

        let level = match cfg.get("level") {
            Some(level) => {
                level.as_str()
                    .ok_or("field \"level\" must be a string")?
                    .parse::<Level>()?
            }
            None => Level::Trace,
        };

        let appenders = cfg.get("appenders")
            .ok_or("section \"appenders\" is required")?
            .as_array()
            .ok_or("section \"appenders\" must be an array")?
            .iter()
            .map(|cfg| self.appender(cfg))
            .collect::<Result<Vec<_>, _>>()?;

        let log = Logger::new(name, appenders);
        log.set_threshold(level);

        Ok(log)
    }
}

fn ty(cfg: &Config) -> Result<&str, Box<dyn Error>> {
    let ty = cfg.get("type")
        .ok_or("field \"type\" is required")?
        .as_str()
        .ok_or("field \"type\" must be a string")?;

    Ok(ty)
}
