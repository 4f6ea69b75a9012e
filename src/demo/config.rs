use crate::session::ClientConfig;
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::{error, warn};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Config file filename (with path)
    #[arg(short, long, default_value = "classcharts.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show who is logged in
    Info,
    /// Print the timetable of one day
    Timetable {
        /// YYYY-MM-DD, today if left out
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Print every activity point between two dates
    Activity {
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },
    /// List homework
    Homework,
    /// List the pupils of a parent account
    Pupils,
}

#[derive(Deserialize, Debug)]
pub struct Config {
    /// Overrides the default ClassCharts origin
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub account: Account,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Account {
    Parent { email: String, password: String },
    Student { code: String, date_of_birth: String },
}

const DEFAULT_CONFIG: &str = r#"
# Leave out to use https://www.classcharts.com
# base_url="https://www.classcharts.com"

# Give up on a request after this many seconds
# timeout_secs=30

[account]
# "parent" logs in with email and password,
# "student" with the student code and date of birth.
role="parent"
email="parent@example.com"
password="change me"

# role="student"
# code="ABCDEF1234"
# date_of_birth="01/01/2010"
"#;

impl Config {
    /// Read the config file. If there is none, write a commented default
    /// and fail so it can be filled in.
    pub fn parse(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        match std::fs::read_to_string(path) {
            Ok(config) => toml::from_str(&config)
                .with_context(|| format!("Invalid config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Config file {} not found, creating default", path.display());
                if let Err(e) = std::fs::write(path, DEFAULT_CONFIG.trim()) {
                    error!("Failed to write default config file: {e}");
                }
                bail!(
                    "No config file at {}, fill in the default one and run again",
                    path.display()
                )
            }
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read config file {}", path.display()))
            }
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default();
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        config.timeout = self.timeout_secs.map(Duration::from_secs);
        config
    }
}
