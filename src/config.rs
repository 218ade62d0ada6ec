//! Configuration module for the bulletin core.

use serde::Deserialize;
use std::path::Path;

use crate::{BulletinError, Result};

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/bulletin.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/bulletin.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Board-count thresholds for automatic grade promotion.
#[derive(Debug, Clone, Deserialize)]
pub struct GradeConfig {
    /// Authored boards needed to reach GOLD.
    #[serde(default = "default_gold_threshold")]
    pub gold_threshold: i64,
    /// Authored boards needed to reach RED.
    #[serde(default = "default_red_threshold")]
    pub red_threshold: i64,
}

fn default_gold_threshold() -> i64 {
    5
}

fn default_red_threshold() -> i64 {
    10
}

impl Default for GradeConfig {
    fn default() -> Self {
        Self {
            gold_threshold: default_gold_threshold(),
            red_threshold: default_red_threshold(),
        }
    }
}

/// Pagination limits for list operations.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    /// Page size used when the caller does not ask for one.
    #[serde(default = "default_page_size")]
    pub default_page_size: i64,
    /// Upper bound for any requested page size.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: i64,
}

fn default_page_size() -> i64 {
    10
}

fn default_max_page_size() -> i64 {
    100
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

/// Bootstrap administrator account.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Login id of the administrator.
    #[serde(default = "default_admin_login_id")]
    pub login_id: String,
    /// Initial password (only used when the account is created).
    #[serde(default)]
    pub password: String,
    /// Display name.
    #[serde(default = "default_admin_nickname")]
    pub nickname: String,
}

fn default_admin_login_id() -> String {
    "admin".to_string()
}

fn default_admin_nickname() -> String {
    "Administrator".to_string()
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            login_id: default_admin_login_id(),
            password: String::new(),
            nickname: default_admin_nickname(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Grade thresholds.
    #[serde(default)]
    pub grade: GradeConfig,
    /// Pagination limits.
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Bootstrap administrator.
    #[serde(default)]
    pub admin: AdminConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BulletinError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| BulletinError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `BULLETIN_ADMIN_PASSWORD`: Override the bootstrap admin password
    pub fn apply_env_overrides(&mut self) {
        if let Ok(password) = std::env::var("BULLETIN_ADMIN_PASSWORD") {
            if !password.is_empty() {
                self.admin.password = password;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - grade thresholds are not positive and strictly increasing
    /// - page sizes are not positive, or the default exceeds the maximum
    pub fn validate(&self) -> Result<()> {
        let grade = &self.grade;
        if grade.gold_threshold <= 0 || grade.red_threshold <= grade.gold_threshold {
            return Err(BulletinError::Config(format!(
                "grade thresholds must be positive and increasing (gold={}, red={})",
                grade.gold_threshold, grade.red_threshold
            )));
        }

        let page = &self.pagination;
        if page.default_page_size <= 0 || page.max_page_size <= 0 {
            return Err(BulletinError::Config(
                "page sizes must be positive".to_string(),
            ));
        }
        if page.default_page_size > page.max_page_size {
            return Err(BulletinError::Config(format!(
                "default_page_size ({}) exceeds max_page_size ({})",
                page.default_page_size, page.max_page_size
            )));
        }
        Ok(())
    }
}
