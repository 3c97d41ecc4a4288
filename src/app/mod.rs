mod state;
mod ui;

use crate::config::{ExportMode, OcrConfig};
use crate::intake::{files_from_dropped, files_from_paths, IntakeFile, ADVERTISED_EXTENSIONS};
use crate::results::{export_json, export_originals, DEFAULT_EXPORT_NAME};
use crate::upload::{HttpOcrClient, StatusEvent, StatusSink, UploadDispatcher};
use eframe::{egui, App};
use rfd::FileDialog;
use state::ViewState;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{error, info};

pub struct QalamVision {
    config: OcrConfig,
    state: ViewState,
    dispatcher: UploadDispatcher,
    status_receiver: Receiver<StatusEvent>,
}

impl QalamVision {
    pub fn new(cc: &eframe::CreationContext<'_>, config: OcrConfig, runtime: Handle) -> Self {
        info!("Initializing Qalam Vision against {}", config.endpoint());
        let (sender, status_receiver) = mpsc::channel();
        let sink = StatusSink::new(sender, Some(cc.egui_ctx.clone()));
        let dispatcher = UploadDispatcher::new(
            Arc::new(HttpOcrClient::new(config.clone())),
            runtime,
            config.concurrency_limit(),
            sink,
        );
        Self {
            config,
            state: ViewState::default(),
            dispatcher,
            status_receiver,
        }
    }

    /// Takes a fresh set of files, shows them, and starts their uploads.
    pub fn intake(&mut self, ctx: &egui::Context, files: Vec<IntakeFile>) {
        if files.is_empty() {
            return;
        }
        let documents = self.state.accept(files);
        self.state.files.load_previews(ctx);
        // Uploads run detached; results come back through the status channel.
        drop(self.dispatcher.dispatch(documents));
    }

    pub fn browse(&mut self, ctx: &egui::Context) {
        if let Some(paths) = FileDialog::new()
            .add_filter("Documents", &ADVERTISED_EXTENSIONS)
            .pick_files()
        {
            self.intake(ctx, files_from_paths(paths));
        }
    }

    pub fn export(&mut self) {
        if !self.state.can_export(self.config.export_mode) {
            return;
        }
        self.state.error_message = None;
        let outcome = match self.config.export_mode {
            ExportMode::ExtractedJson => {
                let Some(path) = FileDialog::new()
                    .set_file_name(DEFAULT_EXPORT_NAME)
                    .add_filter("JSON", &["json"])
                    .save_file()
                else {
                    return;
                };
                export_json(self.state.results.displayed(), &path)
            }
            ExportMode::OriginalFiles => {
                let Some(dir) = FileDialog::new().pick_folder() else {
                    return;
                };
                export_originals(self.state.files.files(), &dir).map(|_| Some(dir))
            }
        };

        match outcome {
            Ok(written) => self.state.last_export = written,
            Err(e) => {
                error!("Export failed: {}", e);
                self.state.error_message = Some(e.to_string());
            }
        }
    }

    pub fn update_state(&mut self) {
        while let Ok(event) = self.status_receiver.try_recv() {
            self.state.apply_event(event);
        }
    }

    fn handle_file_drops(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
            )
        });
        self.state.is_dragging = hovering;
        if !dropped.is_empty() {
            self.intake(ctx, files_from_dropped(&dropped));
        }
    }
}

impl App for QalamVision {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state();
        self.handle_file_drops(ctx);
        self.render(ctx);
    }
}
