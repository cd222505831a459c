// File: ./src/config.rs
use anyhow::{Context, Result};
use chrono_tz::Tz;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://better-admin.org.uk";
pub const DEFAULT_ORIGIN: &str = "https://bookings.better.org.uk";
pub const DEFAULT_TIMEZONE: &str = "Europe/London";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    /// Sent as the `Origin` header; the API 404s without it.
    pub origin: String,
    pub timezone: String,
    pub category_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            category_concurrency: 4,
        }
    }
}

impl Config {
    pub fn get_path() -> Option<PathBuf> {
        // Tests and packagers can point us elsewhere
        if let Ok(dir) = env::var("BETTER_TIMES_CONFIG_DIR") {
            return Some(PathBuf::from(dir).join("config.toml"));
        }
        ProjectDirs::from("uk", "better-times", "better-times")
            .map(|proj| proj.config_dir().join("config.toml"))
    }

    /// Loads the config file, falling back to defaults when there is none.
    pub fn load() -> Result<Self> {
        match Self::get_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.tz()?;
        if self.category_concurrency == 0 {
            anyhow::bail!("category_concurrency must be at least 1");
        }
        Ok(())
    }

    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("unknown timezone {:?}: {}", self.timezone, e))
    }
}
