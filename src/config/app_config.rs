use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides `database_path`.
pub const DATABASE_ENV: &str = "HEARTH_DB";

/// Environment variable holding log directives; takes precedence over `log_level`.
pub const LOG_ENV: &str = "RUST_LOG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file holding the persisted search term
    pub database_path: String,

    /// Simulated latency of the listing fetch (in milliseconds)
    pub load_delay_ms: u64,

    /// Optional JSON file with `{ "data": { "houses": [...] } }` to serve instead of the built-in listings
    pub seed_file: Option<PathBuf>,

    /// Default log level when RUST_LOG is not set
    pub log_level: String,

    /// Keep state in memory only; nothing survives a restart
    pub ephemeral: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: "hearth.db".to_string(),
            load_delay_ms: 2000,
            seed_file: None,
            log_level: "info".to_string(),
            ephemeral: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the user config directory, writing defaults on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
            default_config
        };
        config.apply_env();
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        info!("Configuration saved to: {:?}", path);
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("hearth").join("config.toml"))
    }

    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }

    /// Log filter from `RUST_LOG`-style directives, else `log_level`, else `info`.
    pub fn log_filter(&self, directives: Option<String>) -> EnvFilter {
        directives
            .and_then(|d| EnvFilter::try_new(d).ok())
            .or_else(|| EnvFilter::try_new(&self.log_level).ok())
            .unwrap_or_else(|| EnvFilter::new("info"))
    }

    fn apply_env(&mut self) {
        if let Ok(path) = std::env::var(DATABASE_ENV) {
            if !path.trim().is_empty() {
                self.database_path = path;
            }
        }
    }
}
