use std::io;
use std::sync::{Arc, Mutex};

use crate::output::Output;

/// Collects events in memory.
///
/// Clones share the same buffer, so one clone may be handed to an appender while another one is
/// kept for inspection.
#[derive(Clone, Default)]
pub struct MemoryOutput {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MemoryOutput {
    pub fn new() -> MemoryOutput {
        MemoryOutput::default()
    }

    /// Returns everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        match self.buf.lock() {
            Ok(buf) => buf.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Returns written events as lines, without their terminators.
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.contents())
            .lines()
            .map(ToOwned::to_owned)
            .collect()
    }
}

impl Output for MemoryOutput {
    fn write(&self, message: &[u8]) -> Result<(), io::Error> {
        let mut buf = self.buf.lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory output is poisoned"))?;
        buf.extend_from_slice(message);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_buffer() {
        let out = MemoryOutput::new();
        let clone = out.clone();

        clone.write(b"first\n").unwrap();
        clone.write(b"second\n").unwrap();

        assert_eq!(b"first\nsecond\n".to_vec(), out.contents());
        assert_eq!(vec!["first", "second"], out.lines());
    }
}
