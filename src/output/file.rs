use std::error;
use std::fs::{File, OpenOptions};
use std::io::{self, LineWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::appender::HasFile;
use crate::factory::Factory;
use crate::output::Output;
use crate::registry::{Config, Registry};

/// Appends events into a file, creating it if required.
///
/// The file is opened lazily on the first write, so configuring a logger never touches the
/// filesystem.
pub struct FileOutput {
    path: PathBuf,
    file: Mutex<Option<LineWriter<File>>>,
}

impl FileOutput {
    pub fn new<P: Into<PathBuf>>(path: P) -> FileOutput {
        FileOutput {
            path: path.into(),
            file: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HasFile for FileOutput {
    fn file(&self) -> &Path {
        &self.path
    }
}

impl Output for FileOutput {
    fn write(&self, message: &[u8]) -> Result<(), io::Error> {
        let mut file = self.file.lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "file output is poisoned"))?;

        if file.is_none() {
            let f = OpenOptions::new().append(true).create(true).open(&self.path)?;
            *file = Some(LineWriter::new(f));
        }

        match *file {
            Some(ref mut wr) => {
                wr.write_all(message)?;
                wr.flush()
            }
            None => Ok(()),
        }
    }

    fn as_file(&self) -> Option<&dyn HasFile> {
        Some(self)
    }
}

/// Builds file outputs from `{"type": "file", "path": ...}`.
pub struct FileOutputFactory;

impl Factory for FileOutputFactory {
    type Item = dyn Output;

    fn ty() -> &'static str {
        "file"
    }

    fn from(&self, cfg: &Config, _registry: &Registry) -> Result<Box<dyn Output>, Box<dyn error::Error>> {
        let path = cfg.get("path")
            .ok_or("field \"path\" is required")?
            .as_str()
            .ok_or("field \"path\" must be a string")?;

        Ok(Box::new(FileOutput::new(path)))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn append_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let out = FileOutput::new(&path);

        assert!(!path.exists());

        out.write(b"first\n").unwrap();
        out.write(b"second\n").unwrap();

        assert_eq!("first\nsecond\n", fs::read_to_string(&path).unwrap());
    }

    #[test]
    fn append_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "old\n").unwrap();

        FileOutput::new(&path).write(b"new\n").unwrap();

        assert_eq!("old\nnew\n", fs::read_to_string(&path).unwrap());
    }

    #[test]
    fn exposes_file() {
        let out = FileOutput::new("/var/log/app.log");

        assert_eq!(Path::new("/var/log/app.log"), out.as_file().unwrap().file());
    }

    #[test]
    fn fail_write_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = FileOutput::new(dir.path().join("missing").join("app.log"));

        assert!(out.write(b"event\n").is_err());
    }
}
