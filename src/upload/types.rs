use crate::error::UploadError;
use crate::intake::DocumentSource;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    Pending,
    Uploading,
    Completed,
    Error,
}

#[derive(Debug, Clone)]
pub enum Transition {
    Uploading,
    Completed(Value),
    Failed(UploadError),
}

#[derive(Debug, Clone)]
pub struct StatusEvent {
    pub name: String,
    pub transition: Transition,
}

impl StatusEvent {
    pub fn status(&self) -> UploadStatus {
        match self.transition {
            Transition::Uploading => UploadStatus::Uploading,
            Transition::Completed(_) => UploadStatus::Completed,
            Transition::Failed(_) => UploadStatus::Error,
        }
    }
}

/// What a dispatcher task needs to send one file.
#[derive(Debug, Clone)]
pub struct UploadDocument {
    pub name: String,
    pub source: Option<DocumentSource>,
}

impl UploadDocument {
    pub fn mime_type(&self) -> &'static str {
        let ext = self
            .name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => "application/pdf",
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            _ => "application/octet-stream",
        }
    }
}
