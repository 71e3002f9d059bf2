use std::path::Path;

/// Resolved source location of a logging call.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Module path of the calling function.
    pub class: String,
    /// Calling function name.
    pub method: String,
    /// Source file base name.
    pub file: String,
    pub line: u32,
}

impl Location {
    /// Location of a call site nothing is known about, every part is `?` and the line is 0.
    pub fn unknown() -> Location {
        Location {
            class: "?".to_owned(),
            method: "?".to_owned(),
            file: "?".to_owned(),
            line: 0,
        }
    }
}

/// Lazily resolves a source location.
///
/// Resolving may be expensive, that's why records carry a resolver instead of a ready location
/// and layouts call it only when they actually need it.
pub trait Locate {
    fn locate(&self) -> Location;
}

impl<F> Locate for F
    where F: Fn() -> Location
{
    fn locate(&self) -> Location {
        self()
    }
}

/// Static call site information captured by the `callsite!` macro.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Callsite {
    function: &'static str,
    file: &'static str,
    line: u32,
}

impl Callsite {
    /// Constructs a call site from a fully qualified function path, like `app::net::connect`.
    pub fn new(function: &'static str, file: &'static str, line: u32) -> Callsite {
        Callsite {
            function: function,
            file: file,
            line: line,
        }
    }

    /// Constructs a call site for which only the module path is known.
    pub fn module(module: &'static str, file: &'static str, line: u32) -> ModuleCallsite {
        ModuleCallsite {
            module: module,
            file: file,
            line: line,
        }
    }
}

impl Locate for Callsite {
    fn locate(&self) -> Location {
        let mut segments: Vec<&str> = self.function.split("::")
            .filter(|s| *s != "{{closure}}")
            .collect();
        let method = segments.pop().unwrap_or("?");

        Location {
            class: segments.join("::"),
            method: method.to_owned(),
            file: basename(self.file),
            line: self.line,
        }
    }
}

/// Call site for which the enclosing function is unknown, for example records bridged from the
/// `log` facade.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ModuleCallsite {
    module: &'static str,
    file: &'static str,
    line: u32,
}

impl Locate for ModuleCallsite {
    fn locate(&self) -> Location {
        Location {
            class: self.module.to_owned(),
            method: "?".to_owned(),
            file: basename(self.file),
            line: self.line,
        }
    }
}

fn basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_owned())
}

/// Expands to the fully qualified path of the enclosing function.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_path {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        &name[..name.len() - 3]
    }};
}

/// Captures the current call site.
///
/// ```
/// #[macro_use] extern crate stashlog;
///
/// use stashlog::Locate;
///
/// fn main() {
///     let location = callsite!().locate();
///
///     assert_eq!("main", location.method);
/// }
/// ```
#[macro_export]
macro_rules! callsite {
    () => {
        $crate::Callsite::new($crate::__function_path!(), file!(), line!())
    };
}
