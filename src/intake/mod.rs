//! File intake: turns drops and dialog picks into the tracked file list.
//!
//! Nothing here validates type or size. The "PDF, PNG, JPG (up to 10MB)"
//! hint in the drop zone is advisory; [`DocumentKind`] only picks an icon,
//! a preview strategy, and a MIME type.

mod preview;

pub use preview::Preview;

use crate::upload::UploadDocument;
use derivative::Derivative;
use eframe::egui::{self, DroppedFile};
use preview::MAX_PREVIEW_BYTES;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Extensions offered by the picker filter.
pub const ADVERTISED_EXTENSIONS: [&str; 4] = ["pdf", "png", "jpg", "jpeg"];

#[derive(Debug, Clone)]
pub enum DocumentSource {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Image,
    Other,
}

impl DocumentKind {
    pub fn from_name(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("pdf") => Self::Pdf,
            Some("png" | "jpg" | "jpeg") => Self::Image,
            _ => Self::Other,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Pdf => "📄",
            Self::Image => "🖼",
            Self::Other => "📎",
        }
    }
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct IntakeFile {
    pub name: String,
    pub source: Option<DocumentSource>,
    pub size: Option<u64>,
    pub kind: DocumentKind,
    #[derivative(Debug = "ignore")]
    pub preview: Option<Preview>,
}

impl IntakeFile {
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let size = std::fs::metadata(&path).ok().map(|m| m.len());
        Self {
            kind: DocumentKind::from_name(&name),
            name,
            source: Some(DocumentSource::Path(path)),
            size,
            preview: None,
        }
    }

    /// Native drops carry a path; web-style drops carry bytes and a name.
    /// An entry with neither is kept so its upload can fail visibly.
    pub fn from_dropped(dropped: &DroppedFile) -> Self {
        if let Some(path) = &dropped.path {
            let mut file = Self::from_path(path.clone());
            if !dropped.name.is_empty() {
                file.name = dropped.name.clone();
            }
            return file;
        }

        let name = if dropped.name.is_empty() {
            "unnamed".to_string()
        } else {
            dropped.name.clone()
        };
        let size = dropped.bytes.as_ref().map(|b| b.len() as u64);
        if dropped.bytes.is_none() {
            warn!("Dropped entry '{}' has no path or contents", name);
        }
        Self {
            kind: DocumentKind::from_name(&name),
            name,
            source: dropped.bytes.clone().map(DocumentSource::Bytes),
            size,
            preview: None,
        }
    }

    pub fn is_advertised_type(&self) -> bool {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| ADVERTISED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
    }

    pub fn to_document(&self) -> UploadDocument {
        UploadDocument {
            name: self.name.clone(),
            source: self.source.clone(),
        }
    }

    /// Decodes a thumbnail for image files. PDFs are shown by icon only.
    pub fn load_preview(&mut self, ctx: &egui::Context) {
        if self.kind != DocumentKind::Image || self.preview.is_some() {
            return;
        }
        if let Some(bytes) = self.preview_bytes() {
            self.preview = Preview::load(ctx, &self.name, &bytes);
        }
    }

    /// Contents to decode for a preview. Oversized or unsized files are
    /// never read.
    fn preview_bytes(&self) -> Option<Cow<'_, [u8]>> {
        match self.size {
            Some(size) if size <= MAX_PREVIEW_BYTES as u64 => {}
            Some(size) => {
                warn!("Skipping preview for '{}': {} bytes", self.name, size);
                return None;
            }
            None => return None,
        }
        match self.source.as_ref()? {
            DocumentSource::Path(path) => match std::fs::read(path) {
                Ok(bytes) => Some(Cow::Owned(bytes)),
                Err(e) => {
                    warn!("No preview for '{}': {}", self.name, e);
                    None
                }
            },
            DocumentSource::Bytes(bytes) => Some(Cow::Borrowed(&bytes[..])),
        }
    }
}

pub fn files_from_dropped(dropped: &[DroppedFile]) -> Vec<IntakeFile> {
    dropped.iter().map(IntakeFile::from_dropped).collect()
}

pub fn files_from_paths(paths: Vec<PathBuf>) -> Vec<IntakeFile> {
    paths.into_iter().map(IntakeFile::from_path).collect()
}

/// The files currently shown in the status card.
#[derive(Debug, Default)]
pub struct IntakeList {
    files: Vec<IntakeFile>,
}

impl IntakeList {
    /// Swaps in a new set; the previous files and their previews are dropped.
    pub fn replace(&mut self, files: Vec<IntakeFile>) {
        info!("Accepted files: {:?}", files.iter().map(|f| &f.name).collect::<Vec<_>>());
        self.files = files;
    }

    pub fn remove(&mut self, index: usize) -> Option<IntakeFile> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn files(&self) -> &[IntakeFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.name.as_str())
    }

    pub fn documents(&self) -> Vec<UploadDocument> {
        self.files.iter().map(IntakeFile::to_document).collect()
    }

    pub fn load_previews(&mut self, ctx: &egui::Context) {
        for file in &mut self.files {
            file.load_preview(ctx);
        }
    }
}
