//! Writing results (or the original files) back to disk.
//!
//! The app picks destinations with native dialogs; these functions only do
//! the writing so they can be tested against a temp directory.

use crate::error::ExportError;
use crate::intake::{DocumentSource, IntakeFile};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_EXPORT_NAME: &str = "extracted_data.json";
pub const EXPORT_MIME: &str = "application/json";

/// Writes `result` as 2-space pretty JSON. Without a result nothing is
/// written and `Ok(None)` comes back.
pub fn export_json(result: Option<&Value>, path: &Path) -> Result<Option<PathBuf>, ExportError> {
    let Some(value) = result else {
        return Ok(None);
    };
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Exported {} to {}", EXPORT_MIME, path.display());
    Ok(Some(path.to_path_buf()))
}

/// Copies every intake file into `dir` under its original name.
pub fn export_originals(files: &[IntakeFile], dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let target = dir.join(sanitize_name(&file.name));
        let io_err = |source| ExportError::Io {
            path: target.clone(),
            source,
        };
        match &file.source {
            Some(DocumentSource::Path(path)) => {
                fs::copy(path, &target).map_err(io_err)?;
            }
            Some(DocumentSource::Bytes(bytes)) => {
                fs::write(&target, bytes).map_err(io_err)?;
            }
            None => {
                return Err(ExportError::MissingSource {
                    name: file.name.clone(),
                })
            }
        }
        written.push(target);
    }
    info!("Exported {} original file(s) to {}", written.len(), dir.display());
    Ok(written)
}

/// Dropped names come from outside; keep only the final path component.
fn sanitize_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "unnamed".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::files_from_paths;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn no_result_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_NAME);

        assert!(export_json(None, &path).unwrap().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn exported_json_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_NAME);
        let result = json!({"pages": 2, "text": "..."});

        let written = export_json(Some(&result), &path).unwrap();
        assert_eq!(written.as_deref(), Some(path.as_path()));

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"pages\": 2"), "got: {text}");
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn write_failure_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join(DEFAULT_EXPORT_NAME);

        let err = export_json(Some(&json!({})), &path).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
        assert!(err.to_string().contains("missing-dir"));
    }

    #[test]
    fn originals_keep_their_names() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let pdf = src.path().join("invoice.pdf");
        fs::write(&pdf, b"%PDF-1.7").unwrap();

        let mut files = files_from_paths(vec![pdf]);
        files.push(IntakeFile {
            name: "../scan.png".into(),
            source: Some(DocumentSource::Bytes(Arc::from(&b"png"[..]))),
            size: Some(3),
            kind: crate::intake::DocumentKind::Image,
            preview: None,
        });

        let written = export_originals(&files, out.path()).unwrap();
        assert_eq!(written, [out.path().join("invoice.pdf"), out.path().join("scan.png")]);
        assert_eq!(fs::read(&written[0]).unwrap(), b"%PDF-1.7");
        assert_eq!(fs::read(&written[1]).unwrap(), b"png");
    }

    #[test]
    fn originals_without_source_fail() {
        let out = tempfile::tempdir().unwrap();
        let files = vec![IntakeFile {
            name: "ghost.pdf".into(),
            source: None,
            size: None,
            kind: crate::intake::DocumentKind::Pdf,
            preview: None,
        }];
        assert!(matches!(
            export_originals(&files, out.path()).unwrap_err(),
            ExportError::MissingSource { .. }
        ));
    }
}
