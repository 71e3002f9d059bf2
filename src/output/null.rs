use std::error;
use std::io;

use crate::factory::Factory;
use crate::output::Output;
use crate::registry::{Config, Registry};

/// A null output merely exists, it never outputs a message to any device.
///
/// It never fails, because it does nothing.
///
/// ```
/// use stashlog::Output;
/// use stashlog::output::NullOutput;
///
/// assert!(NullOutput.write(b"{}\n").is_ok());
/// ```
pub struct NullOutput;

impl Output for NullOutput {
    fn write(&self, _message: &[u8]) -> Result<(), io::Error> {
        Ok(())
    }
}

impl Factory for NullOutput {
    type Item = dyn Output;

    fn ty() -> &'static str {
        "null"
    }

    fn from(&self, _cfg: &Config, _registry: &Registry) -> Result<Box<dyn Output>, Box<dyn error::Error>> {
        Ok(Box::new(NullOutput))
    }
}
