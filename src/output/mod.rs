//! Outputs are byte sinks formatted events end up in.

use std::io;

use crate::appender::HasFile;

mod file;
mod memory;
mod null;
mod term;

pub use self::file::{FileOutput, FileOutputFactory};
pub use self::memory::MemoryOutput;
pub use self::null::NullOutput;
pub use self::term::Term;

/// Outputs are responsible for delivering formatted log events to their destination.
///
/// Every call receives exactly one complete event.
pub trait Output: Send + Sync {
    fn write(&self, message: &[u8]) -> Result<(), io::Error>;

    /// Returns the file this output writes into, if any.
    fn as_file(&self) -> Option<&dyn HasFile> {
        None
    }
}
