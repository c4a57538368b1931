use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use serde::{Deserialize, de::DeserializeOwned};

/// The env vars the watcher reads, all optional. Defaults match the page
/// and paths the watcher has always used.
#[derive(Debug, Deserialize)]
struct WatchEnv {
    #[serde(default = "default_url")]
    watch_url: String,
    #[serde(default = "default_csv_path")]
    watch_csv_path: PathBuf,
    #[serde(default = "default_html_path")]
    watch_html_path: PathBuf,
    #[serde(default = "default_fetch_timeout_secs")]
    watch_fetch_timeout_secs: u64,
}

fn default_url() -> String {
    "https://www.dumscala.cz/cs/".to_owned()
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("data/offices.csv")
}

fn default_html_path() -> PathBuf {
    PathBuf::from("docs/index.html")
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

#[derive(Debug)]
pub struct WatchConfig {
    pub url: String,
    pub csv_path: PathBuf,
    pub html_path: PathBuf,
    pub fetch_timeout: Duration,
}

impl WatchConfig {
    pub fn new() -> anyhow::Result<Self> {
        let watch_env = WatchEnv::load_from_env()?;
        Ok(Self {
            url: watch_env.watch_url,
            csv_path: watch_env.watch_csv_path,
            html_path: watch_env.watch_html_path,
            fetch_timeout: Duration::from_secs(watch_env.watch_fetch_timeout_secs),
        })
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config =
            envy::from_env::<Self>().context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}
