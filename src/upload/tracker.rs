use crate::upload::types::{StatusEvent, Transition, UploadStatus};
use crate::utils::color::ColorExt;
use eframe::egui::Color32;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub label: &'static str,
    pub color: Color32,
}

impl UploadStatus {
    pub fn badge(self) -> Badge {
        let (label, hex) = match self {
            UploadStatus::Uploading => ("Uploading...", "#ffc107"),
            UploadStatus::Completed => ("Processed", "#198754"),
            UploadStatus::Error => ("Error", "#dc3545"),
            UploadStatus::Pending => ("Pending", "#6c757d"),
        };
        Badge {
            label,
            color: Color32::from_hex_code(hex).unwrap_or(Color32::GRAY),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatusSummary {
    pub pending: usize,
    pub uploading: usize,
    pub completed: usize,
    pub failed: usize,
}

/// Upload status per file name. Two files with the same name share a slot.
#[derive(Debug, Default)]
pub struct StatusBoard {
    statuses: HashMap<String, UploadStatus>,
    errors: HashMap<String, String>,
}

impl StatusBoard {
    pub fn status_of(&self, name: &str) -> UploadStatus {
        self.statuses.get(name).copied().unwrap_or_default()
    }

    /// Last failure message for `name`, shown as hover text on the badge.
    pub fn error_of(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn apply(&mut self, event: &StatusEvent) {
        let status = event.status();
        debug!("'{}' -> {:?}", event.name, status);
        match &event.transition {
            Transition::Failed(e) => {
                self.errors.insert(event.name.clone(), e.to_string());
            }
            _ => {
                self.errors.remove(&event.name);
            }
        }
        self.statuses.insert(event.name.clone(), status);
    }

    pub fn reset(&mut self, name: &str) {
        self.statuses.insert(name.to_string(), UploadStatus::Pending);
        self.errors.remove(name);
    }

    /// Counts over `names`, so files no longer listed are ignored.
    pub fn summary<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> StatusSummary {
        let mut summary = StatusSummary::default();
        for name in names {
            match self.status_of(name) {
                UploadStatus::Pending => summary.pending += 1,
                UploadStatus::Uploading => summary.uploading += 1,
                UploadStatus::Completed => summary.completed += 1,
                UploadStatus::Error => summary.failed += 1,
            }
        }
        summary
    }
}
