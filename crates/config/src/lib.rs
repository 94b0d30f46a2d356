//! Configuration loading, validation, and management for Enrollwise.
//!
//! Loads configuration from `~/.enrollwise/config.toml` with environment
//! variable overrides. Everything the pipeline would otherwise read from
//! process-wide constants (the date, the campus map, the schedule) lives
//! here and is injected at construction time.

pub mod catalog;

use chrono::NaiveDate;
use enrollwise_core::ContactRequirement;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use catalog::{
    CampusInfo, CourseStart, PriceEntry, ProgramCampusMap, ProgramEntry, SchoolCatalog,
};

/// The root configuration structure.
///
/// Maps directly to `~/.enrollwise/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollConfig {
    /// Recent turns kept verbatim by the history compactor
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    /// Passages kept after filtering
    #[serde(default = "default_max_passages")]
    pub max_passages: usize,

    /// Passages requested from the retriever
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Older turns beyond this are ignored at ingestion
    #[serde(default = "default_max_history_turns")]
    pub max_history_turns: usize,

    /// Ask the summarizer to condense older turns (otherwise local compaction)
    #[serde(default = "default_true")]
    pub use_summarizer: bool,

    #[serde(default = "default_summarizer_timeout_ms")]
    pub summarizer_timeout_ms: u64,

    #[serde(default = "default_retriever_timeout_ms")]
    pub retriever_timeout_ms: u64,

    /// Character budget of the local compaction fallback
    #[serde(default = "default_fallback_char_budget")]
    pub fallback_char_budget: usize,

    /// Per-passage character cap
    #[serde(default = "default_max_passage_chars")]
    pub max_passage_chars: usize,

    /// Minimum Spanish score before Spanish can win
    #[serde(default = "default_spanish_min_score")]
    pub spanish_min_score: u32,

    /// Messages longer than this are not scanned for names
    #[serde(default = "default_name_scan_max_words")]
    pub name_scan_max_words: usize,

    #[serde(default)]
    pub contact_requirement: ContactRequirement,

    /// Drop passage lines that start with a past date
    #[serde(default = "default_true")]
    pub strip_stale_dates: bool,

    /// Upcoming course starts listed in the instructions
    #[serde(default = "default_schedule_preview_limit")]
    pub schedule_preview_limit: usize,

    /// Fixed "today" (otherwise the local date at request time)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today: Option<NaiveDate>,

    #[serde(default)]
    pub catalog: SchoolCatalog,
}

fn default_window_size() -> usize {
    6
}
fn default_max_passages() -> usize {
    3
}
fn default_top_k() -> usize {
    8
}
fn default_max_history_turns() -> usize {
    50
}
fn default_true() -> bool {
    true
}
fn default_summarizer_timeout_ms() -> u64 {
    8_000
}
fn default_retriever_timeout_ms() -> u64 {
    30_000
}
fn default_fallback_char_budget() -> usize {
    800
}
fn default_max_passage_chars() -> usize {
    2_500
}
fn default_spanish_min_score() -> u32 {
    2
}
fn default_name_scan_max_words() -> usize {
    8
}
fn default_schedule_preview_limit() -> usize {
    6
}

impl Default for EnrollConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            max_passages: default_max_passages(),
            top_k: default_top_k(),
            max_history_turns: default_max_history_turns(),
            use_summarizer: true,
            summarizer_timeout_ms: default_summarizer_timeout_ms(),
            retriever_timeout_ms: default_retriever_timeout_ms(),
            fallback_char_budget: default_fallback_char_budget(),
            max_passage_chars: default_max_passage_chars(),
            spanish_min_score: default_spanish_min_score(),
            name_scan_max_words: default_name_scan_max_words(),
            contact_requirement: ContactRequirement::default(),
            strip_stale_dates: true,
            schedule_preview_limit: default_schedule_preview_limit(),
            today: None,
            catalog: SchoolCatalog::default(),
        }
    }
}

impl EnrollConfig {
    /// Load configuration from the default path (~/.enrollwise/config.toml).
    ///
    /// Environment overrides (applied after the file):
    /// - `ENROLLWISE_WINDOW_SIZE`
    /// - `ENROLLWISE_MAX_PASSAGES`
    /// - `ENROLLWISE_USE_SUMMARIZER`
    /// - `ENROLLWISE_TODAY` (YYYY-MM-DD)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env(&Self::config_dir().join("config.toml"))
    }

    /// Load from `path`, then apply environment overrides and re-validate.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".enrollwise")
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(v) = std::env::var("ENROLLWISE_WINDOW_SIZE") {
            self.window_size = parse_env("ENROLLWISE_WINDOW_SIZE", &v)?;
        }
        if let Ok(v) = std::env::var("ENROLLWISE_MAX_PASSAGES") {
            self.max_passages = parse_env("ENROLLWISE_MAX_PASSAGES", &v)?;
        }
        if let Ok(v) = std::env::var("ENROLLWISE_USE_SUMMARIZER") {
            self.use_summarizer = parse_env("ENROLLWISE_USE_SUMMARIZER", &v)?;
        }
        if let Ok(v) = std::env::var("ENROLLWISE_TODAY") {
            self.today = Some(parse_env("ENROLLWISE_TODAY", &v)?);
        }
        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("window_size", self.window_size as u64),
            ("max_passages", self.max_passages as u64),
            ("top_k", self.top_k as u64),
            ("max_history_turns", self.max_history_turns as u64),
            ("summarizer_timeout_ms", self.summarizer_timeout_ms),
            ("retriever_timeout_ms", self.retriever_timeout_ms),
            ("fallback_char_budget", self.fallback_char_budget as u64),
            ("max_passage_chars", self.max_passage_chars as u64),
            ("spanish_min_score", self.spanish_min_score as u64),
            ("name_scan_max_words", self.name_scan_max_words as u64),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, v)| *v == 0) {
            return Err(ConfigError::ValidationError(format!("{name} must be > 0")));
        }

        if self.top_k < self.max_passages {
            return Err(ConfigError::ValidationError(format!(
                "top_k ({}) must be >= max_passages ({})",
                self.top_k, self.max_passages
            )));
        }

        if self.max_history_turns < self.window_size {
            return Err(ConfigError::ValidationError(format!(
                "max_history_turns ({}) must be >= window_size ({})",
                self.max_history_turns, self.window_size
            )));
        }

        self.catalog.validate()
    }

    /// The configured date, or the local date.
    pub fn effective_today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        Self::default().to_toml()
    }

    /// Render this configuration as TOML.
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::ValidationError(format!("{name}='{value}': {e}")))
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("Catalog is inconsistent: {0}")]
    CatalogError(String),
}
