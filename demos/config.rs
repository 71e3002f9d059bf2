#[macro_use] extern crate stashlog;

use serde_json::json;

use stashlog::{Level, Registry};

fn main() {
    let cfg = json!({
        "name": "app",
        "level": "info",
        "appenders": [{
            "name": "console",
            "layout": {"type": "logstash", "tags": ["json"], "timezone": "utc"},
            "output": {"type": "term"}
        }]
    });

    let log = match Registry::new().logger(&cfg) {
        Ok(log) => log,
        Err(err) => {
            eprintln!("invalid config: {}", err);
            return;
        }
    };

    stashlog!(log, Level::Debug, "never shown");
    stashlog!(log, Level::Info, "configured from {}", "json");

    if let Err(err) = stashlog::logger::init(log) {
        eprintln!("{}", err);
        return;
    }

    log::warn!("bridged through the log facade");
}
