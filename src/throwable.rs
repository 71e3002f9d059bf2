//! Error model carried by log records.
//!
//! A `Throwable` is a snapshot of an error: its class (type name), message, stack frames and the
//! chain of causes. Layouts render it either as a structured value or via the conventional
//! textual form produced by `Throwable::render`.

use std::any;
use std::error::Error;
use std::fmt::{self, Display, Formatter, Write};
use std::io;
use std::num;
use std::path::Path;
use std::str;
use std::string;

use backtrace::Backtrace;

/// Single stack frame.
#[derive(Debug, Clone, PartialEq)]
pub struct StackFrame {
    pub class: String,
    pub method: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl StackFrame {
    pub fn new<C, M>(class: C, method: M) -> StackFrame
        where C: Into<String>,
              M: Into<String>
    {
        StackFrame {
            class: class.into(),
            method: method.into(),
            file: None,
            line: None,
        }
    }

    /// Attaches source file and line information.
    pub fn at<F: Into<String>>(mut self, file: F, line: u32) -> StackFrame {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }
}

impl Display for StackFrame {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        write!(fmt, "{}.{}(", self.class, self.method)?;
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(fmt, "{}:{}", file, line)?,
            (Some(file), None) => fmt.write_str(file)?,
            (None, _) => fmt.write_str("Unknown Source")?,
        }
        fmt.write_str(")")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Throwable {
    class: String,
    message: Option<String>,
    frames: Vec<StackFrame>,
    cause: Option<Box<Throwable>>,
    suppressed: Vec<Throwable>,
}

impl Throwable {
    pub fn new<C: Into<String>>(class: C) -> Throwable {
        Throwable {
            class: class.into(),
            message: None,
            frames: Vec::new(),
            cause: None,
            suppressed: Vec::new(),
        }
    }

    /// Snapshots the given error and its `source()` chain.
    ///
    /// Common standard library errors are named by their public path, like `std::io::Error`.
    /// Otherwise the outermost error's class is its Rust type name, its frames are the stack of
    /// the calling thread. Sources are only known as trait objects and get the first token of
    /// their `Debug` representation. Sources carry no frames, the stack they were created on is
    /// long gone.
    pub fn from_error<E: Error + 'static>(err: &E) -> Throwable {
        let class = known_class(err).unwrap_or_else(any::type_name::<E>);
        let mut result = Throwable::new(class)
            .with_message(err.to_string())
            .with_frames(capture());
        result.cause = err.source().map(|source| Box::new(Throwable::from_dyn(source)));
        result
    }

    fn from_dyn(err: &(dyn Error + 'static)) -> Throwable {
        let mut result = Throwable::new(class_of(err)).with_message(err.to_string());
        result.cause = err.source().map(|source| Box::new(Throwable::from_dyn(source)));
        result
    }

    pub fn with_message<M: Into<String>>(mut self, message: M) -> Throwable {
        self.message = Some(message.into());
        self
    }

    pub fn with_frame(mut self, frame: StackFrame) -> Throwable {
        self.frames.push(frame);
        self
    }

    pub fn with_frames<I>(mut self, frames: I) -> Throwable
        where I: IntoIterator<Item = StackFrame>
    {
        self.frames.extend(frames);
        self
    }

    pub fn with_cause(mut self, cause: Throwable) -> Throwable {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn with_suppressed(mut self, suppressed: Throwable) -> Throwable {
        self.suppressed.push(suppressed);
        self
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(|m| &m[..])
    }

    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    pub fn cause(&self) -> Option<&Throwable> {
        self.cause.as_ref().map(|c| &**c)
    }

    pub fn suppressed(&self) -> &[Throwable] {
        &self.suppressed
    }

    /// Renders the throwable chain in its conventional multi-line textual form.
    ///
    /// ```text
    /// app::Error: connection refused
    /// 	at app::net.connect(net.rs:42)
    /// Caused by: std::io::Error: os error 111
    /// 	at std::net.connect(Unknown Source)
    /// ```
    ///
    /// Rendering never fails: should writing the chain fail, only the header line is returned.
    pub fn render(&self) -> String {
        let mut buf = String::with_capacity(256);
        match self.render_into(&mut buf, "", "") {
            Ok(()) => buf,
            Err(fmt::Error) => self.header(),
        }
    }

    fn header(&self) -> String {
        match self.message {
            Some(ref message) => format!("{}: {}", self.class, message),
            None => self.class.clone(),
        }
    }

    fn render_into(&self, buf: &mut String, caption: &str, indent: &str) -> fmt::Result {
        write!(buf, "{}{}{}", indent, caption, self.header())?;

        for frame in &self.frames {
            write!(buf, "\n{}\tat {}", indent, frame)?;
        }

        let nested = format!("{}\t", indent);
        for suppressed in &self.suppressed {
            buf.push('\n');
            suppressed.render_into(buf, "Suppressed: ", &nested)?;
        }

        if let Some(ref cause) = self.cause {
            buf.push('\n');
            cause.render_into(buf, "Caused by: ", indent)?;
        }

        Ok(())
    }
}

fn known_class(err: &(dyn Error + 'static)) -> Option<&'static str> {
    macro_rules! known {
        ($($ty:ty => $name:expr,)*) => {
            $(
                if err.is::<$ty>() {
                    return Some($name);
                }
            )*
        };
    }

    known! {
        io::Error => "std::io::Error",
        fmt::Error => "std::fmt::Error",
        num::ParseIntError => "std::num::ParseIntError",
        num::ParseFloatError => "std::num::ParseFloatError",
        str::Utf8Error => "std::str::Utf8Error",
        string::FromUtf8Error => "std::string::FromUtf8Error",
    }

    None
}

fn class_of(err: &(dyn Error + 'static)) -> String {
    if let Some(class) = known_class(err) {
        return class.to_owned();
    }

    let debug = format!("{:?}", err);
    debug
        .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == ':'))
        .next()
        .filter(|class| !class.is_empty())
        .unwrap_or("Error")
        .to_owned()
}

/// Captures the stack of the calling thread, innermost frame first.
///
/// Frames of the capturing machinery itself are skipped, as are symbols that can't be resolved.
fn capture() -> Vec<StackFrame> {
    let backtrace = Backtrace::new();

    let frames: Vec<StackFrame> = backtrace.frames()
        .iter()
        .flat_map(|frame| frame.symbols())
        .filter_map(|symbol| {
            let name = format!("{:#}", symbol.name()?);
            let mut frame = split_symbol(&name);
            if let (Some(file), Some(line)) = (symbol.filename(), symbol.lineno()) {
                frame = frame.at(basename(file), line);
            }
            Some(frame)
        })
        .collect();

    // Optimized builds may inline the capturing frames, then the whole stack is kept.
    let start = frames.iter()
        .position(|frame| frame.class.ends_with("throwable") && frame.method == "capture")
        .map(|pos| pos + 1)
        .unwrap_or(0);

    frames.into_iter()
        .skip(start)
        .skip_while(|frame| frame.class.ends_with("throwable::Throwable"))
        .collect()
}

/// Splits a demangled symbol like `app::net::connect::{{closure}}` into `app::net` and `connect`.
fn split_symbol(name: &str) -> StackFrame {
    let segments: Vec<&str> = name.split("::")
        .filter(|s| *s != "{{closure}}")
        .collect();

    match segments.split_last() {
        Some((method, class)) if !class.is_empty() => StackFrame::new(class.join("::"), *method),
        Some((method, _)) => StackFrame::new("?", *method),
        None => StackFrame::new("?", name),
    }
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

impl Display for Throwable {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        fmt.write_str(&self.header())
    }
}
