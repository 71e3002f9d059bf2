//! Local host name resolution.

use std::ffi::OsString;
use std::io;

quick_error! {
    #[derive(Debug)]
    pub enum Error {
        ResolutionFailed(err: io::Error) {
            display("failed to resolve local host name: {}", err)
            source(err)
        }
    }
}

/// Host name used when resolution fails.
pub const UNKNOWN: &str = "unknown";

/// Resolves the local host name.
pub fn resolve() -> Result<String, Error> {
    from_raw(gethostname::gethostname())
}

fn from_raw(raw: OsString) -> Result<String, Error> {
    let host = raw.to_string_lossy().into_owned();

    if host.is_empty() {
        let err = io::Error::new(io::ErrorKind::NotFound, "empty host name");
        return Err(Error::ResolutionFailed(err));
    }

    Ok(host)
}

/// Resolves the local host name, demoting failures to `unknown`.
pub fn resolve_or_unknown() -> String {
    match resolve() {
        Ok(host) => host,
        Err(err) => {
            warn!("{}, falling back to \"{}\"", err, UNKNOWN);
            UNKNOWN.to_owned()
        }
    }
}
