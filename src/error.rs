//! Error types for Qalam Vision.
//!
//! Upload failures never reach the user beyond the `Error` badge, so
//! [`UploadError`] mostly exists to give the logs something precise to say.
//! Export and configuration problems are shown in the footer.

use std::path::PathBuf;
use thiserror::Error;

/// Why a single file's upload failed.
#[derive(Debug, Clone, Error)]
pub enum UploadError {
    /// The dropped entry carried neither a path nor bytes.
    #[error("Invalid file object for '{name}': no path or contents available")]
    InvalidInput { name: String },

    #[error("Failed to read '{path}': {reason}")]
    Read { path: PathBuf, reason: String },

    /// Connection refused, DNS failure, reset, ...
    #[error("Failed to send request: {0}")]
    Transport(String),

    #[error("Request timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// The endpoint answered with a non-2xx status.
    #[error("Upload failed with status: {status}")]
    Status { status: u16, body: String },

    #[error("Failed to parse OCR response: {0}")]
    Decode(String),
}

/// Invalid values found in the environment at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a non-negative integer, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key} must be one of 'json' or 'files', got '{value}'")]
    InvalidExportMode { key: &'static str, value: String },

    #[error("{key} must be an http(s) URL, got '{value}'")]
    InvalidUrl { key: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("'{name}' has no readable source to export")]
    MissingSource { name: String },

    #[error("Failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_code() {
        let e = UploadError::Status {
            status: 500,
            body: "boom".into(),
        };
        assert!(e.to_string().contains("500"), "got: {e}");
    }

    #[test]
    fn invalid_input_names_the_file() {
        let e = UploadError::InvalidInput {
            name: "scan.png".into(),
        };
        assert!(e.to_string().contains("scan.png"));
    }

    #[test]
    fn config_error_names_the_variable() {
        let e = ConfigError::InvalidNumber {
            key: "QALAM_TIMEOUT_MS",
            value: "soon".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("QALAM_TIMEOUT_MS") && msg.contains("soon"));
    }
}
