//! Runtime configuration.
//!
//! Values come from the process environment (optionally seeded from a `.env`
//! file by `main`). [`OcrConfig::from_lookup`] takes the lookup as a closure
//! so tests never touch the real environment.

use crate::error::ConfigError;
use std::time::Duration;

pub const ENV_BASE_URL: &str = "QALAM_API_BASE_URL";
pub const ENV_DOC_TYPE: &str = "QALAM_DOC_TYPE";
pub const ENV_LANG: &str = "QALAM_LANG";
pub const ENV_TIMEOUT_MS: &str = "QALAM_TIMEOUT_MS";
pub const ENV_MAX_CONCURRENT: &str = "QALAM_MAX_CONCURRENT_UPLOADS";
pub const ENV_EXPORT_MODE: &str = "QALAM_EXPORT_MODE";

/// What the Export button produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportMode {
    /// Pretty-printed JSON of the displayed result.
    #[default]
    ExtractedJson,
    /// A copy of every intake file under its original name.
    OriginalFiles,
}

impl ExportMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::ExtractedJson),
            "files" => Some(Self::OriginalFiles),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrConfig {
    pub base_url: String,
    pub doc_type: String,
    pub lang: String,
    /// `0` disables the timeout.
    pub timeout_ms: u64,
    /// `0` means every file uploads at once.
    pub max_concurrent_uploads: usize,
    pub export_mode: ExportMode,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:1331".to_string(),
            doc_type: "ocr".to_string(),
            lang: "auto".to_string(),
            timeout_ms: 120_000,
            max_concurrent_uploads: 4,
            export_mode: ExportMode::ExtractedJson,
        }
    }
}

impl OcrConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_BASE_URL) {
            let url = url.trim().trim_end_matches('/').to_string();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl {
                    key: ENV_BASE_URL,
                    value: url,
                });
            }
            config.base_url = url;
        }
        if let Some(doc_type) = get(ENV_DOC_TYPE) {
            config.doc_type = doc_type.trim().to_string();
        }
        if let Some(lang) = get(ENV_LANG) {
            config.lang = lang.trim().to_string();
        }
        if let Some(value) = get(ENV_TIMEOUT_MS) {
            config.timeout_ms = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber {
                    key: ENV_TIMEOUT_MS,
                    value,
                })?;
        }
        if let Some(value) = get(ENV_MAX_CONCURRENT) {
            config.max_concurrent_uploads =
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber {
                        key: ENV_MAX_CONCURRENT,
                        value,
                    })?;
        }
        if let Some(value) = get(ENV_EXPORT_MODE) {
            config.export_mode =
                ExportMode::parse(&value).ok_or(ConfigError::InvalidExportMode {
                    key: ENV_EXPORT_MODE,
                    value,
                })?;
        }

        Ok(config)
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/v1/ocr", self.base_url)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    pub fn concurrency_limit(&self) -> Option<usize> {
        (self.max_concurrent_uploads > 0).then_some(self.max_concurrent_uploads)
    }
}
