use std::error;
use std::io::{self, Write};

use crate::factory::Factory;
use crate::output::Output;
use crate::registry::{Config, Registry};

/// Writes events into the standard output.
pub struct Term;

impl Output for Term {
    fn write(&self, message: &[u8]) -> Result<(), io::Error> {
        let stdout = io::stdout();
        let mut wr = stdout.lock();
        wr.write_all(message)?;
        wr.flush()
    }
}

impl Factory for Term {
    type Item = dyn Output;

    fn ty() -> &'static str {
        "term"
    }

    fn from(&self, _cfg: &Config, _registry: &Registry) -> Result<Box<dyn Output>, Box<dyn error::Error>> {
        Ok(Box::new(Term))
    }
}
