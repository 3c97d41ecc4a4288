use crate::config::ExportMode;
use crate::intake::{IntakeFile, IntakeList};
use crate::results::ResultStore;
use crate::upload::{StatusBoard, StatusEvent, Transition, UploadDocument, UploadStatus};
use std::path::PathBuf;

/// Everything the window shows. Only touched from the UI thread.
#[derive(Debug, Default)]
pub struct ViewState {
    pub files: IntakeList,
    pub board: StatusBoard,
    pub results: ResultStore,
    pub is_dragging: bool,
    pub error_message: Option<String>,
    pub last_export: Option<PathBuf>,
}

impl ViewState {
    /// Replaces the file list and returns what needs uploading. A new batch
    /// always drops the pin so its responses reach the viewer.
    pub fn accept(&mut self, files: Vec<IntakeFile>) -> Vec<UploadDocument> {
        for file in &files {
            self.board.reset(&file.name);
        }
        self.results.pin(None);
        self.files.replace(files);
        self.error_message = None;
        self.files.documents()
    }

    pub fn apply_event(&mut self, event: StatusEvent) {
        self.board.apply(&event);
        if let Transition::Completed(value) = event.transition {
            self.results.record(&event.name, value);
        }
    }

    pub fn remove_file(&mut self, index: usize) {
        if let Some(file) = self.files.remove(index) {
            if self.results.pinned() == Some(file.name.as_str()) {
                self.results.pin(None);
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn can_export(&self, mode: ExportMode) -> bool {
        match mode {
            ExportMode::ExtractedJson => self.results.has_result(),
            ExportMode::OriginalFiles => !self.files.is_empty(),
        }
    }

    pub fn uploads_in_flight(&self) -> bool {
        self.files
            .names()
            .any(|name| self.board.status_of(name) == UploadStatus::Uploading)
    }
}
