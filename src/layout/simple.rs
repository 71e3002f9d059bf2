use std::error;
use std::io::Write;

use crate::appender::Appender;
use crate::factory::Factory;
use crate::record::Record;
use crate::registry::{Config, Registry};

use super::{Error, Layout};

/// Plain text layout, writing `LEVEL - message` lines.
///
/// Throwables are left to the appender.
#[derive(Debug, Copy, Clone, Default)]
pub struct SimpleLayout;

impl Layout for SimpleLayout {
    fn format(&self, rec: &Record, _appender: &dyn Appender, wr: &mut dyn Write) -> Result<(), Error> {
        writeln!(wr, "{} - {}", rec.level(), rec.message().unwrap_or(""))?;
        Ok(())
    }
}

impl Factory for SimpleLayout {
    type Item = dyn Layout;

    fn ty() -> &'static str {
        "simple"
    }

    fn from(&self, _cfg: &Config, _registry: &Registry) -> Result<Box<dyn Layout>, Box<dyn error::Error>> {
        Ok(Box::new(SimpleLayout))
    }
}

#[cfg(test)]
mod tests {
    use std::str::from_utf8;

    use crate::output::NullOutput;
    use crate::appender::OutputAppender;
    use crate::severity::Level;

    use super::*;

    #[test]
    fn format() {
        let appender = OutputAppender::new("null", Box::new(SimpleLayout), Box::new(NullOutput));
        let layout = SimpleLayout;
        let mut wr = Vec::new();

        layout.format(&Record::new(Level::Debug, "root", Some("le message")), &appender, &mut wr)
            .unwrap();

        assert_eq!("DEBUG - le message\n", from_utf8(&wr[..]).unwrap());
        assert!(!layout.handles_throwable());
        assert_eq!("text/plain", layout.content_type());
    }
}
