use colog::format::CologStyle;
use colored::Colorize;
use log::{Level, LevelFilter};

/// Crates under reqwest that log every connection.
const TRANSPORT_CRATES: [&str; 3] = ["h2", "hyper", "reqwest"];

/// Prefixes every line with the local time of day, to the millisecond.
pub struct RequestClock;

impl RequestClock {
    fn clock(&self) -> String {
        chrono::Local::now().format("%H:%M:%S%.3f").to_string()
    }
}

impl CologStyle for RequestClock {
    fn prefix_token(&self, level: &Level) -> String {
        format!(
            "{} {}",
            self.clock().dimmed(),
            self.level_color(level, self.level_token(level))
        )
    }
}

/// Install the logger. `RUST_LOG` wins over the `info` default and over
/// the quieter transport crates.
pub fn init() {
    let mut builder = colog::basic_builder();
    builder.format(colog::formatter(RequestClock));
    for name in TRANSPORT_CRATES {
        builder.filter_module(name, LevelFilter::Warn);
    }
    builder.parse_env(env_logger::Env::default().default_filter_or("info"));
    builder.init();
}
