#[macro_use] extern crate stashlog;

use stashlog::appender::OutputAppender;
use stashlog::diagnostic::{mdc, ndc};
use stashlog::output::Term;
use stashlog::{Level, Logger, LogstashLayout, StackFrame, Throwable};

fn main() {
    let mut layout = LogstashLayout::new();
    layout.set_tags("json,logstash");
    layout.set_fields("type:demo");
    layout.set_included_fields("location");

    let mut appender = OutputAppender::new("console", Box::new(layout), Box::new(Term));
    if let Err(err) = appender.activate() {
        eprintln!("{}", err);
        return;
    }

    let log = Logger::new("root", vec![Box::new(appender)]);

    ndc::push("request-42");
    mdc::put("user", "esafronov");

    stashlog!(log, Level::Info, "Hello World");

    let err = Throwable::new("IoError")
        .with_message("connection reset")
        .with_frame(StackFrame::new("hello", "main").at("hello.rs", 33));
    stashlog!(log, Level::Error, throwable: &err, "failed to send {} bytes", 1024);
}
