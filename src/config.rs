use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// JSON catalog replacing the built-in question bank. Empty means built-in.
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Thresholds and weights for a scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_top_gift_count")]
    pub top_gift_count: usize,
    #[serde(default = "default_gift_bonus_weight")]
    pub gift_bonus_weight: f64,
    #[serde(default = "default_primary_limit")]
    pub primary_limit: usize,
    #[serde(default = "default_primary_threshold")]
    pub primary_threshold: f64,
    #[serde(default = "default_growth_threshold")]
    pub growth_threshold: f64,
    #[serde(default = "default_trait_threshold")]
    pub trait_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default)]
    pub webhook_url: String,
    #[serde(default = "default_true")]
    pub enable_stdout: bool,
    #[serde(default)]
    pub rules: NotificationRulesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRulesConfig {
    #[serde(default = "default_true")]
    pub survey_completed: bool,
    #[serde(default = "default_true")]
    pub primary_match_gained: bool,
    #[serde(default = "default_true")]
    pub primary_match_lost: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub db_path: Option<String>,
    pub catalog_path: Option<String>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/ministry-path/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(db_path) = overrides.db_path {
            self.storage.db_path = db_path;
        }
        if let Some(catalog_path) = overrides.catalog_path {
            self.catalog.path = catalog_path;
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }

    pub fn resolved_catalog_path(&self) -> Option<PathBuf> {
        let trimmed = self.catalog.path.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(expand_tilde(trimmed))
        }
    }

    pub fn default_template() -> String {
        let template = r#"[storage]
db_path = "~/.local/share/ministry-path/ministry-path.db"

[catalog]
# JSON file replacing the built-in question bank and ministry catalog.
path = ""

[server]
host = "127.0.0.1"
port = 3001

[scoring]
top_gift_count = 5
gift_bonus_weight = 0.5
primary_limit = 5
primary_threshold = 0.3
growth_threshold = 0.5
trait_threshold = 0.2

[logging]
level = "info"

[notifications]
webhook_url = ""
enable_stdout = true

[notifications.rules]
survey_completed = true
primary_match_gained = true
primary_match_lost = true
"#;
        template.to_string()
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            top_gift_count: default_top_gift_count(),
            gift_bonus_weight: default_gift_bonus_weight(),
            primary_limit: default_primary_limit(),
            primary_threshold: default_primary_threshold(),
            growth_threshold: default_growth_threshold(),
            trait_threshold: default_trait_threshold(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            enable_stdout: default_true(),
            rules: NotificationRulesConfig::default(),
        }
    }
}

impl Default for NotificationRulesConfig {
    fn default() -> Self {
        Self {
            survey_completed: true,
            primary_match_gained: true,
            primary_match_lost: true,
        }
    }
}

fn default_db_path() -> String {
    "~/.local/share/ministry-path/ministry-path.db".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_top_gift_count() -> usize {
    5
}

fn default_gift_bonus_weight() -> f64 {
    0.5
}

fn default_primary_limit() -> usize {
    5
}

fn default_primary_threshold() -> f64 {
    0.3
}

fn default_growth_threshold() -> f64 {
    0.5
}

fn default_trait_threshold() -> f64 {
    0.2
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
