use std::path::Path;
use std::sync::OnceLock;

use anyhow::Context;
use serde::Deserialize;

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "flybg.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Booking site root, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Site language id sent with every request (2 = English)
    #[serde(default = "default_language")]
    pub language: u32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory for rolling log files; console only when unset
    #[serde(default)]
    pub log_dir: Option<String>,
}

fn default_base_url() -> String {
    "http://www.flybulgarien.dk".to_string()
}

fn default_language() -> u32 {
    2
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 flybg-scraper/0.1".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            language: default_language(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl ScraperConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: ScraperConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Same config pointed at another host, used against mock servers
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

pub static CONFIG: OnceLock<ScraperConfig> = OnceLock::new();

/// Load the config once for the whole process.
///
/// An explicit `path` must exist. Without one, `flybg.toml` is used when it
/// is present in the working directory, and built-in defaults otherwise.
pub fn read_config(path: Option<&Path>) -> anyhow::Result<&'static ScraperConfig> {
    let config = match path {
        Some(path) => ScraperConfig::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            ScraperConfig::from_file(DEFAULT_CONFIG_PATH)?
        }
        None => ScraperConfig::default(),
    };

    Ok(CONFIG.get_or_init(|| config))
}
