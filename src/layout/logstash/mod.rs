//! Logstash v1 JSON layout.
//!
//! Every event becomes a single line JSON object, like:
//!
//! ```text
//! {"@timestamp":"2024-01-02T03:04:05.678+0000","@version":"1","source_host":"host.example",
//!  "message":"Hello World","level":"INFO","logger":"root","thread":"main","tags":["json"]}
//! ```
//!
//! Which fields are emitted is controlled by `included_fields` and `excluded_fields`, static
//! decorations by `tags` and `fields`. Fields without a value for a particular event, like `ndc`
//! when the diagnostic stack is empty, are omitted instead of being emitted as `null`.

use std::collections::HashMap;
use std::env;
use std::error;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::appender::Appender;
use crate::factory::Factory;
use crate::host;
use crate::json::{ObjectEncoder, Error as EncodeError};
use crate::location::Location;
use crate::record::Record;
use crate::registry::{Config, Registry};
use crate::timestamp::{Timezone, TimestampFormat, DEFAULT_PATTERN};

use super::{Error, Layout};

mod decoration;
mod schema;

pub use self::decoration::Decorations;
pub use self::schema::{Field, Schema, Slot, DEFAULT, OPTIONAL};

/// Option names accepted by `LogstashLayout::set_option`.
pub const OPTIONS: [&str; 7] = [
    "source_host",
    "included_fields",
    "excluded_fields",
    "tags",
    "fields",
    "date_format",
    "timezone",
];

/// Raw, not yet validated layout options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutConfig {
    pub source_host: Option<String>,
    pub included_fields: Option<String>,
    pub excluded_fields: Option<String>,
    pub tags: Option<String>,
    pub fields: Option<String>,
    pub date_format: Option<String>,
    pub timezone: Option<String>,
}

/// Configuration frozen by activation.
#[derive(Debug, Clone, PartialEq)]
struct Active {
    schema: Schema,
    host: String,
    tags: Vec<String>,
    timestamp: TimestampFormat,
}

/// Formats records as Logstash v1 JSON events.
///
/// The layout must be activated before use. Setters change the pending configuration only,
/// which takes effect on the next activation.
///
/// ```
/// use stashlog::{Layout, Level, LogstashLayout, Record};
/// use stashlog::appender::OutputAppender;
/// use stashlog::output::NullOutput;
///
/// let mut layout = LogstashLayout::new();
/// layout.set_tags("json,logstash");
/// layout.set_source_host("host.example");
/// layout.activate().unwrap();
///
/// let appender = OutputAppender::new("console", Box::new(LogstashLayout::new()), Box::new(NullOutput));
/// let rec = Record::new(Level::Info, "root", Some("Hello World"));
/// let line = layout.format_to_string(&rec, &appender).unwrap();
///
/// assert!(line.contains(r#""tags":["json","logstash"]"#));
/// assert!(line.ends_with("}\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LogstashLayout {
    config: LayoutConfig,
    resolved_host: Option<String>,
    active: Option<Active>,
    source_paths: SourcePaths,
}

impl LogstashLayout {
    pub fn new() -> LogstashLayout {
        LogstashLayout::default()
    }

    pub fn with_config(config: LayoutConfig) -> LogstashLayout {
        LogstashLayout {
            config: config,
            resolved_host: None,
            active: None,
            source_paths: SourcePaths::default(),
        }
    }

    /// Returns the pending configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn set_source_host(&mut self, value: &str) {
        self.config.source_host = Some(value.to_owned());
    }

    pub fn set_included_fields(&mut self, value: &str) {
        self.config.included_fields = Some(value.to_owned());
    }

    pub fn set_excluded_fields(&mut self, value: &str) {
        self.config.excluded_fields = Some(value.to_owned());
    }

    pub fn set_tags(&mut self, value: &str) {
        self.config.tags = Some(value.to_owned());
    }

    pub fn set_fields(&mut self, value: &str) {
        self.config.fields = Some(value.to_owned());
    }

    pub fn set_date_format(&mut self, value: &str) {
        self.config.date_format = Some(value.to_owned());
    }

    pub fn set_timezone(&mut self, value: &str) {
        self.config.timezone = Some(value.to_owned());
    }

    /// Sets an option by its configuration name, see `OPTIONS`.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), Error> {
        match name {
            "source_host" => self.set_source_host(value),
            "included_fields" => self.set_included_fields(value),
            "excluded_fields" => self.set_excluded_fields(value),
            "tags" => self.set_tags(value),
            "fields" => self.set_fields(value),
            "date_format" => self.set_date_format(value),
            "timezone" => self.set_timezone(value),
            name => return Err(Error::ConfigInvalid(format!(r#"unknown option "{}""#, name))),
        }

        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Returns the effective schema, if activated.
    pub fn schema(&self) -> Option<&Schema> {
        self.active.as_ref().map(|active| &active.schema)
    }

    /// Returns the host name events are stamped with, if activated.
    pub fn source_host(&self) -> Option<&str> {
        self.active.as_ref().map(|active| &active.host[..])
    }

    /// Formats the record into a JSON line, including the trailing `\n`.
    pub fn format_to_string(&self, rec: &Record, appender: &dyn Appender) -> Result<String, Error> {
        let active = self.active.as_ref().ok_or(Error::NotActivated)?;

        let mut buf = Vec::with_capacity(512);
        project(active, &self.source_paths, rec, appender, &mut buf)?;

        // The encoder writes valid UTF-8 only.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    fn build(&mut self) -> Result<Active, Error> {
        let config = &self.config;

        let decorations = Decorations::parse(
            config.tags.as_deref().unwrap_or(""),
            config.fields.as_deref().unwrap_or(""),
        )?;

        let schema = Schema::new(
            config.included_fields.as_deref().unwrap_or(""),
            config.excluded_fields.as_deref().unwrap_or(""),
            &decorations.fields,
        );

        let timezone = match config.timezone {
            Some(ref timezone) => timezone.parse::<Timezone>().map_err(Error::ConfigInvalid)?,
            None => Timezone::default(),
        };

        let pattern = config.date_format.as_deref().unwrap_or(DEFAULT_PATTERN);
        let timestamp = TimestampFormat::new(pattern, timezone).map_err(|err| {
            Error::ConfigInvalid(format!(r#"invalid date format "{}": {}"#, pattern, err))
        })?;

        let host = match config.source_host {
            Some(ref host) => host.clone(),
            None if schema.contains(Field::SourceHost) => {
                self.resolved_host.get_or_insert_with(host::resolve_or_unknown).clone()
            }
            None => host::UNKNOWN.to_owned(),
        };

        let active = Active {
            schema: schema,
            host: host,
            tags: decorations.tags,
            timestamp: timestamp,
        };

        Ok(active)
    }
}

impl Layout for LogstashLayout {
    fn activate(&mut self) -> Result<(), Error> {
        let active = self.build()?;
        debug!("activated logstash layout with {} fields", active.schema.slots().len());
        self.active = Some(active);
        self.source_paths.clear();

        Ok(())
    }

    fn format(&self, rec: &Record, appender: &dyn Appender, wr: &mut dyn Write) -> Result<(), Error> {
        let active = self.active.as_ref().ok_or(Error::NotActivated)?;

        // Format into a buffer first, so a sink never sees a partial event.
        let mut buf = Vec::with_capacity(512);
        project(active, &self.source_paths, rec, appender, &mut buf)?;
        wr.write_all(&buf)?;

        Ok(())
    }

    fn handles_throwable(&self) -> bool {
        true
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}

/// Builds an activated layout from options given as strings, or arrays of strings for the
/// comma-separated ones.
///
/// ```json
/// {"type": "logstash", "tags": ["json", "logstash"], "fields": "type:log4j"}
/// ```
impl Factory for LogstashLayout {
    type Item = dyn Layout;

    fn ty() -> &'static str {
        "logstash"
    }

    fn from(&self, cfg: &Config, _registry: &Registry) -> Result<Box<dyn Layout>, Box<dyn error::Error>> {
        let cfg = cfg.as_object().ok_or("layout config must be an object")?;

        let mut layout = LogstashLayout::new();
        for (name, value) in cfg {
            if name == "type" {
                continue;
            }

            let value = match *value {
                Config::String(ref value) => value.clone(),
                Config::Array(ref values) => {
                    let values = values.iter()
                        .map(|value| value.as_str())
                        .collect::<Option<Vec<&str>>>()
                        .ok_or_else(|| format!(r#"field "{}" must contain strings only"#, name))?;
                    values.join(",")
                }
                _ => return Err(format!(r#"field "{}" must be a string"#, name).into()),
            };

            layout.set_option(name, &value)?;
        }

        layout.activate()?;

        Ok(Box::new(layout))
    }
}

fn project<W: Write + ?Sized>(active: &Active, paths: &SourcePaths, rec: &Record,
    appender: &dyn Appender, wr: &mut W) -> Result<(), EncodeError>
{
    let mut object = ObjectEncoder::new(&mut *wr)?;

    for slot in active.schema.slots() {
        match *slot {
            Slot::Builtin { field, ref fallback } => {
                let emitted = emit(active, paths, field, rec, appender, &mut object)?;

                if let (false, Some(fallback)) = (emitted, fallback.as_ref()) {
                    object.field(field.name(), fallback)?;
                }
            }
            Slot::User { ref name, ref value } => {
                object.field(name, value)?;
            }
        }
    }

    object.finish()?;
    wr.write_all(b"\n")
}

/// Emits a built-in field, returns false if the record has no value for it.
fn emit<W: Write + ?Sized>(active: &Active, paths: &SourcePaths, field: Field, rec: &Record,
    appender: &dyn Appender, object: &mut ObjectEncoder<W>) -> Result<bool, EncodeError>
{
    let name = field.name();

    match field {
        Field::Timestamp => object.field(name, &active.timestamp.format(rec.timestamp()))?,
        Field::Version => object.field(name, "1")?,
        Field::SourceHost => object.field(name, &active.host)?,
        Field::SourcePath => {
            match appender.as_file() {
                Some(file) => object.field(name, &paths.resolve(file.file()))?,
                None => return Ok(false),
            }
        }
        Field::Message => {
            match rec.message() {
                Some(message) => object.field(name, message)?,
                None => return Ok(false),
            }
        }
        Field::Level => object.field(name, rec.level().as_str())?,
        Field::Logger => object.field(name, rec.logger())?,
        Field::Thread => object.field(name, rec.thread())?,
        Field::Ndc => {
            if rec.ndc().is_empty() {
                return Ok(false);
            }
            object.field(name, &rec.ndc().join(" "))?
        }
        Field::Mdc => {
            if rec.mdc().is_empty() {
                return Ok(false);
            }

            let mut mdc = object.object(name)?;
            for &(ref key, ref value) in rec.mdc() {
                mdc.field(key, value)?;
            }
            mdc.finish()?
        }
        Field::Tags => {
            if active.tags.is_empty() {
                return Ok(false);
            }

            let mut tags = object.array(name)?;
            for tag in &active.tags {
                tags.element(tag)?;
            }
            tags.finish()?
        }
        Field::Exception => {
            let throwable = match rec.throwable() {
                Some(throwable) => throwable,
                None => return Ok(false),
            };

            let mut exception = object.object(name)?;
            exception.field("class", throwable.class())?;
            if let Some(message) = throwable.message() {
                exception.field("message", message)?;
            }
            exception.field("stacktrace", &throwable.render())?;
            exception.finish()?
        }
        Field::Location => {
            let location = rec.location().unwrap_or_else(Location::unknown);

            let mut loc = object.object(name)?;
            loc.field("class", &location.class)?;
            loc.field("method", &location.method)?;
            loc.field("file", &location.file)?;
            loc.field("line", &location.line)?;
            loc.finish()?
        }
    }

    Ok(true)
}

/// Canonical paths of the files events were appended to.
///
/// A path is resolved through the filesystem until that succeeds, which usually happens on the
/// first event, since file outputs create their file before writing. Clones start empty.
#[derive(Debug, Default)]
struct SourcePaths {
    resolved: Mutex<HashMap<PathBuf, String>>,
}

impl SourcePaths {
    fn resolve(&self, path: &Path) -> String {
        let mut resolved = match self.resolved.lock() {
            Ok(resolved) => resolved,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(canonical) = resolved.get(path) {
            return canonical.clone();
        }

        match fs::canonicalize(path) {
            Ok(canonical) => {
                let canonical = canonical.to_string_lossy().into_owned();
                resolved.insert(path.to_path_buf(), canonical.clone());
                canonical
            }
            Err(..) => absolute_path(path).to_string_lossy().into_owned(),
        }
    }

    fn clear(&self) {
        match self.resolved.lock() {
            Ok(mut resolved) => resolved.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.resolved.lock().map(|resolved| resolved.len()).unwrap_or(0)
    }
}

impl Clone for SourcePaths {
    fn clone(&self) -> SourcePaths {
        SourcePaths::default()
    }
}

/// Paths of files that don't exist (yet) can't be resolved, they are made absolute instead.
fn absolute_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map(|dir| dir.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io;
    use std::path::{Path, PathBuf};

    use serde_json::Value;

    use crate::appender::{Appender, HasFile};
    use crate::layout::{Error, Layout};
    use crate::location::{Callsite, Location};
    use crate::record::Record;
    use crate::severity::Level;
    use crate::throwable::{StackFrame, Throwable};

    use super::*;

    struct Console;

    impl Appender for Console {
        fn name(&self) -> &str {
            "console"
        }

        fn append(&self, _rec: &Record) -> Result<(), Error> {
            Ok(())
        }
    }

    struct File(PathBuf);

    impl HasFile for File {
        fn file(&self) -> &Path {
            &self.0
        }
    }

    impl Appender for File {
        fn name(&self) -> &str {
            "file"
        }

        fn append(&self, _rec: &Record) -> Result<(), Error> {
            Ok(())
        }

        fn as_file(&self) -> Option<&dyn HasFile> {
            Some(self)
        }
    }

    fn layout(options: &[(&str, &str)]) -> LogstashLayout {
        let mut layout = LogstashLayout::new();
        layout.set_source_host("host.example");
        layout.set_timezone("utc");
        for &(name, value) in options {
            layout.set_option(name, value).unwrap();
        }
        layout.activate().unwrap();
        layout
    }

    fn format(layout: &LogstashLayout, rec: &Record) -> Value {
        let line = layout.format_to_string(rec, &Console).unwrap();

        assert!(line.ends_with('\n'));
        assert_eq!(1, line.matches('\n').count());

        serde_json::from_str(&line).unwrap()
    }

    fn format_with(layout: &LogstashLayout, appender: &dyn Appender) -> Value {
        serde_json::from_str(&layout.format_to_string(&record(""), appender).unwrap()).unwrap()
    }

    fn record(message: &str) -> Record {
        Record::new(Level::Info, "root", Some(message))
            .with_timestamp(1704164645678)
            .with_thread("main")
    }

    #[test]
    fn default_fields() {
        let value = format(&layout(&[]), &record("Hello World"));

        assert_eq!("2024-01-02T03:04:05.678+0000", value["@timestamp"]);
        assert_eq!("1", value["@version"]);
        assert_eq!("host.example", value["source_host"]);
        assert_eq!("Hello World", value["message"]);
        assert_eq!("INFO", value["level"]);
        assert_eq!("root", value["logger"]);
        assert_eq!("main", value["thread"]);

        for absent in &["source_path", "ndc", "mdc", "tags", "exception", "location"] {
            assert!(value.get(absent).is_none(), "{} must be absent", absent);
        }
    }

    #[test]
    fn exact_line() {
        let line = layout(&[("tags", "json")])
            .format_to_string(&record("hi"), &Console)
            .unwrap();

        assert_eq!(concat!(
            r#"{"@timestamp":"2024-01-02T03:04:05.678+0000","@version":"1","#,
            r#""source_host":"host.example","message":"hi","level":"INFO","logger":"root","#,
            r#""thread":"main","tags":["json"]}"#, "\n"), line);
    }

    #[test]
    fn deterministic_order() {
        let layout = layout(&[("fields", "type:log4j")]);

        let first = layout.format_to_string(&record("a"), &Console).unwrap();
        let second = layout.format_to_string(&record("b"), &Console).unwrap();

        assert_eq!(first.replace(r#""message":"a""#, r#""message":"b""#), second);
    }

    #[test]
    fn ndc_and_mdc() {
        let rec = record("")
            .with_ndc(vec!["ndc_1".into(), "ndc_2".into(), "ndc_3".into()])
            .with_mdc(vec![("b".into(), "1".into()), ("a".into(), "2".into())]);

        let line = layout(&[]).format_to_string(&rec, &Console).unwrap();

        assert!(line.contains(r#""ndc":"ndc_1 ndc_2 ndc_3""#));
        assert!(line.contains(r#""mdc":{"b":"1","a":"2"}"#));
    }

    #[test]
    fn exception() {
        let err = Throwable::new("RuntimeError")
            .with_message("Hello World Exception")
            .with_frame(StackFrame::new("app::main", "run").at("main.rs", 10));
        let rec = record("Hello World").with_throwable(Some(&err));

        let value = format(&layout(&[]), &rec);

        assert_eq!("RuntimeError", value["exception"]["class"]);
        assert_eq!("Hello World Exception", value["exception"]["message"]);
        assert_eq!("RuntimeError: Hello World Exception\n\tat app::main.run(main.rs:10)",
            value["exception"]["stacktrace"]);
    }

    #[test]
    fn exception_without_message() {
        let err = Throwable::new("RuntimeError");
        let rec = record("").with_throwable(Some(&err));

        let value = format(&layout(&[]), &rec);

        assert!(value["exception"].get("message").is_none());
    }

    #[test]
    fn location_included() {
        let site = Callsite::new("app::server::serve", "src/server.rs", 42);
        let rec = record("").with_location(&site);

        let value = format(&layout(&[("included_fields", "location")]), &rec);

        assert_eq!("app::server", value["location"]["class"]);
        assert_eq!("serve", value["location"]["method"]);
        assert_eq!("server.rs", value["location"]["file"]);
        assert_eq!(42, value["location"]["line"]);
    }

    #[test]
    fn location_unknown_without_callsite() {
        let value = format(&layout(&[("included_fields", "location")]), &record(""));

        assert_eq!("?", value["location"]["class"]);
        assert_eq!("?", value["location"]["method"]);
        assert_eq!("?", value["location"]["file"]);
        assert_eq!(0, value["location"]["line"]);
    }

    #[test]
    fn location_not_resolved_unless_selected() {
        let calls = Cell::new(0);
        let locate = || {
            calls.set(calls.get() + 1);
            Location { class: "a".into(), method: "b".into(), file: "c".into(), line: 1 }
        };
        let rec = record("").with_location(&locate);

        format(&layout(&[]), &rec);
        assert_eq!(0, calls.get());

        format(&layout(&[("included_fields", "location"), ("excluded_fields", "location")]), &rec);
        assert_eq!(0, calls.get());

        format(&layout(&[("included_fields", "location")]), &rec);
        assert_eq!(1, calls.get());
    }

    #[test]
    fn absent_message_omitted() {
        let rec = Record::new(Level::Warn, "root", None);

        let value = format(&layout(&[]), &rec);

        assert!(value.get("message").is_none());
        assert_eq!("WARN", value["level"]);
    }

    #[test]
    fn source_path_from_file_appender() {
        let dir = env::temp_dir();
        let appender = File(dir.join(".").join("missing-stashlog.log"));

        let value: Value = serde_json::from_str(
            &layout(&[]).format_to_string(&record(""), &appender).unwrap()
        ).unwrap();

        // The file doesn't exist, so the path is only made absolute.
        let path = PathBuf::from(value["source_path"].as_str().unwrap());
        assert!(path.is_absolute());
        assert!(path.ends_with("missing-stashlog.log"));
    }

    #[test]
    fn source_path_excluded() {
        let appender = File(env::temp_dir().join("stashlog.log"));

        let value: Value = serde_json::from_str(
            &layout(&[("excluded_fields", "source_path")])
                .format_to_string(&record(""), &appender)
                .unwrap()
        ).unwrap();

        assert!(value.get("source_path").is_none());
    }

    #[test]
    fn source_path_resolves_dots() {
        let dir = env::temp_dir();
        let paths = SourcePaths::default();

        assert_eq!(fs::canonicalize(&dir).unwrap().to_string_lossy(), paths.resolve(&dir.join(".")));
    }

    #[test]
    fn source_path_resolved_once_per_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".").join("app.log");
        fs::write(&path, b"").unwrap();
        let appender = File(path.clone());
        let layout = layout(&[]);

        let first = format_with(&layout, &appender);
        assert_eq!(1, layout.source_paths.len());

        // Resolved paths are served from the cache, even once the file is gone.
        fs::remove_file(&path).unwrap();
        let second = format_with(&layout, &appender);

        assert_eq!(first["source_path"], second["source_path"]);
        assert_eq!(fs::canonicalize(dir.path()).unwrap().join("app.log").to_string_lossy(),
            first["source_path"].as_str().unwrap());
    }

    #[test]
    fn source_path_missing_file_not_cached() {
        let layout = layout(&[]);
        let appender = File(env::temp_dir().join("missing-stashlog.log"));

        format_with(&layout, &appender);

        assert_eq!(0, layout.source_paths.len());
    }

    #[test]
    fn reactivation_drops_resolved_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, b"").unwrap();
        let mut layout = layout(&[]);

        format_with(&layout, &File(path));
        assert_eq!(1, layout.source_paths.len());

        layout.activate().unwrap();
        assert_eq!(0, layout.source_paths.len());
    }

    #[test]
    fn user_fields_and_fallback() {
        let layout = layout(&[("fields", "type:log4j, ndc:none")]);

        let value = format(&layout, &record(""));
        assert_eq!("log4j", value["type"]);
        assert_eq!("none", value["ndc"]);

        let rec = record("").with_ndc(vec!["ctx".into()]);
        let value = format(&layout, &rec);
        assert_eq!("ctx", value["ndc"]);
    }

    #[test]
    fn excluded_user_field() {
        let value = format(&layout(&[("fields", "type:log4j"), ("excluded_fields", "type")]),
            &record(""));

        assert!(value.get("type").is_none());
    }

    #[test]
    fn exclude_everything() {
        let all = "@timestamp,@version,source_host,source_path,message,level,logger,thread,\
                   ndc,mdc,tags,exception,location";

        let line = layout(&[("excluded_fields", all)]).format_to_string(&record(""), &Console)
            .unwrap();

        assert_eq!("{}\n", line);
    }

    #[test]
    fn custom_date_format() {
        let value = format(&layout(&[("date_format", "yyyy-MM-dd HH:mm:ss")]), &record(""));

        assert_eq!("2024-01-02 03:04:05", value["@timestamp"]);
    }

    #[test]
    fn fail_format_inactive() {
        let layout = LogstashLayout::new();

        match layout.format_to_string(&record(""), &Console) {
            Err(Error::NotActivated) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn fail_activate_malformed_fields() {
        let mut layout = LogstashLayout::new();
        layout.set_fields("type:log4j,shipper");

        match layout.activate() {
            Err(Error::ConfigInvalid(..)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!layout.is_active());
    }

    #[test]
    fn fail_activate_invalid_date_format() {
        let mut layout = LogstashLayout::new();
        layout.set_date_format("yyyy-QQ");

        assert!(layout.activate().is_err());
    }

    #[test]
    fn fail_activate_invalid_timezone() {
        let mut layout = LogstashLayout::new();
        layout.set_timezone("mars");

        assert!(layout.activate().is_err());
    }

    #[test]
    fn fail_unknown_option() {
        assert!(LogstashLayout::new().set_option("pattern", "%m").is_err());
    }

    #[test]
    fn setters_after_activation_apply_on_reactivation() {
        let mut layout = layout(&[]);
        layout.set_tags("late");

        assert!(format(&layout, &record("")).get("tags").is_none());

        layout.activate().unwrap();
        assert_eq!("late", format(&layout, &record(""))["tags"][0]);
    }

    #[test]
    fn activate_idempotent() {
        let mut layout = layout(&[("fields", "type:log4j"), ("tags", "a,b")]);
        let schema = layout.schema().unwrap().clone();
        let first = layout.format_to_string(&record("x"), &Console).unwrap();

        layout.activate().unwrap();

        assert_eq!(&schema, layout.schema().unwrap());
        assert_eq!(first, layout.format_to_string(&record("x"), &Console).unwrap());
    }

    #[test]
    fn resolved_host_cached_across_activations() {
        let mut layout = LogstashLayout::new();
        layout.activate().unwrap();
        let host = layout.source_host().unwrap().to_owned();

        layout.activate().unwrap();

        assert_eq!(host, layout.source_host().unwrap());
        assert_eq!(Some(&host), layout.resolved_host.as_ref());
    }

    #[test]
    fn declarations() {
        let layout = LogstashLayout::new();

        assert!(layout.handles_throwable());
        assert!(layout.is_line_oriented());
        assert_eq!("application/json", layout.content_type());
    }

    #[test]
    fn fail_format_into_small_buffer() {
        let layout = layout(&[]);
        let mut buf = [0u8; 8];

        match layout.format(&record(""), &Console, &mut &mut buf[..]) {
            Err(Error::MalformedOutput(err)) => assert_eq!(io::ErrorKind::WriteZero, err.kind()),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
