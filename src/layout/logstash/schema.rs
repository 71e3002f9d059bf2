//! Effective field selection.

/// Built-in event field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Timestamp,
    Version,
    SourceHost,
    SourcePath,
    Message,
    Level,
    Logger,
    Thread,
    Ndc,
    Mdc,
    Tags,
    Exception,
    Location,
}

/// Fields emitted unless excluded, in emission order.
pub const DEFAULT: [Field; 12] = [
    Field::Timestamp,
    Field::Version,
    Field::SourceHost,
    Field::SourcePath,
    Field::Message,
    Field::Level,
    Field::Logger,
    Field::Thread,
    Field::Ndc,
    Field::Mdc,
    Field::Tags,
    Field::Exception,
];

/// Fields emitted only when included.
pub const OPTIONAL: [Field; 1] = [Field::Location];

impl Field {
    pub fn name(&self) -> &'static str {
        match *self {
            Field::Timestamp  => "@timestamp",
            Field::Version    => "@version",
            Field::SourceHost => "source_host",
            Field::SourcePath => "source_path",
            Field::Message    => "message",
            Field::Level      => "level",
            Field::Logger     => "logger",
            Field::Thread     => "thread",
            Field::Ndc        => "ndc",
            Field::Mdc        => "mdc",
            Field::Tags       => "tags",
            Field::Exception  => "exception",
            Field::Location   => "location",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        DEFAULT.iter()
            .chain(OPTIONAL.iter())
            .find(|field| field.name() == name)
            .cloned()
    }
}

/// Single member of the emitted JSON object.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// Built-in field, with an optional user value emitted for events lacking the field.
    Builtin {
        field: Field,
        fallback: Option<String>,
    },
    /// Static user field.
    User {
        name: String,
        value: String,
    },
}

/// Ordered set of slots every event is projected onto.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    slots: Vec<Slot>,
}

impl Schema {
    /// Computes the effective schema.
    ///
    /// Starts with the default fields, adds recognized included ones and user fields, then
    /// removes every excluded name. Exclusion always wins. Unknown names are ignored.
    ///
    /// A user field named after a selected built-in field doesn't get its own slot, it becomes
    /// the built-in's fallback value instead.
    pub fn new(included: &str, excluded: &str, user: &[(String, String)]) -> Schema {
        let included = split(included);
        let excluded = split(excluded);

        for name in &included {
            if Field::from_name(name).is_none() {
                debug!("ignoring unknown included field \"{}\"", name);
            }
        }
        for name in &excluded {
            if Field::from_name(name).is_none() && !user.iter().any(|field| field.0 == *name) {
                debug!("ignoring unknown excluded field \"{}\"", name);
            }
        }

        let mut slots: Vec<Slot> = DEFAULT.iter()
            .chain(OPTIONAL.iter().filter(|field| included.contains(&field.name())))
            .filter(|field| !excluded.contains(&field.name()))
            .map(|&field| Slot::Builtin { field: field, fallback: None })
            .collect();

        for &(ref name, ref value) in user {
            if excluded.contains(&&name[..]) {
                continue;
            }

            let pos = slots.iter().position(|slot| match *slot {
                Slot::Builtin { field, .. } => field.name() == name.as_str(),
                Slot::User { .. } => false,
            });

            match pos {
                Some(pos) => {
                    if let Slot::Builtin { ref mut fallback, .. } = slots[pos] {
                        *fallback = Some(value.clone());
                    }
                }
                None => slots.push(Slot::User { name: name.clone(), value: value.clone() }),
            }
        }

        Schema {
            slots: slots,
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn contains(&self, field: Field) -> bool {
        self.slots.iter().any(|slot| match *slot {
            Slot::Builtin { field: f, .. } => f == field,
            Slot::User { .. } => false,
        })
    }
}

fn split(value: &str) -> Vec<&str> {
    value.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}
