use super::QalamVision;
use crate::config::ExportMode;
use crate::results::ResultStore;
use crate::upload::UploadStatus;
use crate::utils::color::primary;
use crate::utils::file_size::{format_size, over_advisory_limit};
use eframe::egui::{self, Align, Color32, Layout, RichText, Stroke};
use tracing::warn;

const ERROR_RED: Color32 = Color32::from_rgb(220, 53, 69);

impl QalamVision {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("navbar")
            .exact_height(64.0)
            .show(ctx, |ui| self.render_navbar(ui));

        egui::TopBottomPanel::bottom("footer")
            .show_separator_line(false)
            .show(ctx, |ui| self.render_footer(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(16.0);
                ui.columns(2, |columns| {
                    self.render_results(&mut columns[0]);
                    self.render_upload_area(&mut columns[1]);
                    columns[1].add_space(16.0);
                    self.render_status(&mut columns[1]);
                });
            });
        });
    }

    fn render_navbar(&self, ui: &mut egui::Ui) {
        ui.horizontal_centered(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("ق").size(36.0).color(primary()).strong());
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.add_space(8.0);
                ui.vertical(|ui| {
                    ui.add_space(6.0);
                    ui.label(RichText::new("Qalam Vision 📄").size(20.0).color(primary()));
                    ui.label(
                        RichText::new("Arabic Document Intelligence")
                            .small()
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                });
            });
        });
    }

    fn render_results(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.heading("Extracted Data");
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let label = match self.config.export_mode {
                        ExportMode::ExtractedJson => "Export Results 📄",
                        ExportMode::OriginalFiles => "Export Files 📄",
                    };
                    let can_export = self.state.can_export(self.config.export_mode);
                    if ui.add_enabled(can_export, egui::Button::new(label)).clicked() {
                        self.export();
                    }
                });
            });
            ui.separator();

            let Some(value) = self.state.results.displayed() else {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.label(RichText::new("📄").size(48.0).weak());
                    ui.add_space(8.0);
                    ui.weak("Upload a document to see extracted data");
                    ui.add_space(40.0);
                });
                return;
            };

            let text = ResultStore::pretty(value);
            if let Some(name) = self.state.results.displayed_name() {
                let note = if self.state.results.pinned() == Some(name) {
                    format!("Showing: {name} (pinned)")
                } else {
                    format!("Showing latest: {name}")
                };
                ui.weak(note);
            }
            egui::Frame::none()
                .fill(ui.visuals().extreme_bg_color)
                .rounding(6.0)
                .inner_margin(12.0)
                .show(ui, |ui| {
                    egui::ScrollArea::vertical()
                        .id_source("extracted_json")
                        .max_height(480.0)
                        .show(ui, |ui| {
                            ui.add(egui::Label::new(RichText::new(text).monospace()).wrap(true));
                        });
                });
        });
    }

    fn render_upload_area(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.heading("Upload Documents");
            ui.separator();

            let (stroke, fill) = if self.state.is_dragging {
                (Stroke::new(2.0, primary()), primary().gamma_multiply(0.1))
            } else {
                (
                    Stroke::new(1.5, ui.visuals().weak_text_color()),
                    Color32::TRANSPARENT,
                )
            };

            egui::Frame::none()
                .stroke(stroke)
                .fill(fill)
                .rounding(10.0)
                .inner_margin(32.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new("⬆").size(40.0).color(primary().gamma_multiply(0.5)));
                        ui.add_space(8.0);
                        ui.label(RichText::new("Drag & drop files here").size(16.0).strong());
                        ui.weak("Support for PDF, PNG, JPG (up to 10MB)");
                        ui.add_space(12.0);
                        let button = egui::Button::new(RichText::new("Or click to browse").color(primary()))
                            .stroke(Stroke::new(1.0, primary()));
                        if ui.add(button).clicked() {
                            let ctx = ui.ctx().clone();
                            self.browse(&ctx);
                        }
                    });
                });
        });
    }

    fn render_status(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.heading("Processing Status");
                if !self.state.files.is_empty() {
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("🗑 Clear All").clicked() {
                            self.state.clear();
                        }
                    });
                }
            });
            ui.separator();

            if self.state.files.is_empty() {
                ui.weak("No files uploaded yet");
                return;
            }

            let summary = self.state.board.summary(self.state.files.names());
            ui.label(format!(
                "⏳ Pending: {} | 📤 Uploading: {} | ✅ Processed: {} | ❌ Error: {}",
                summary.pending, summary.uploading, summary.completed, summary.failed
            ));
            ui.add_space(8.0);

            let mut remove = None;
            let mut pin = None;
            for (index, file) in self.state.files.files().iter().enumerate() {
                let status = self.state.board.status_of(&file.name);
                ui.horizontal(|ui| {
                    match &file.preview {
                        Some(preview) => {
                            ui.image((preview.texture().id(), preview.fit(24.0)));
                        }
                        None => {
                            ui.label(file.kind.icon());
                        }
                    }

                    let pinned = self.state.results.pinned() == Some(file.name.as_str());
                    let has_result = self.state.results.result_for(&file.name).is_some();
                    let name = ui
                        .add_enabled(has_result, egui::SelectableLabel::new(pinned, file.name.as_str()))
                        .on_hover_text("Show this file's extracted data");
                    if name.clicked() {
                        pin = Some(if pinned { None } else { Some(file.name.clone()) });
                    }

                    if let Some(size) = file.size {
                        ui.weak(format_size(size));
                        if over_advisory_limit(size) {
                            ui.label("⚠").on_hover_text("Larger than the advertised 10MB");
                        }
                    }
                    if !file.is_advertised_type() {
                        ui.label("⚠").on_hover_text("Not a PDF, PNG or JPG file");
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.small_button("✕").on_hover_text("Remove").clicked() {
                            remove = Some(index);
                        }
                        let badge = status.badge();
                        let response = ui.label(
                            RichText::new(format!(" {} ", badge.label))
                                .color(Color32::WHITE)
                                .background_color(badge.color)
                                .small(),
                        );
                        if let Some(err) = self.state.board.error_of(&file.name) {
                            response.on_hover_text(err);
                        }
                        if status == UploadStatus::Uploading {
                            ui.spinner();
                        }
                    });
                });
                ui.add_space(4.0);
            }

            if let Some(pin) = pin {
                self.state.results.pin(pin.as_deref());
            }
            if let Some(index) = remove {
                self.state.remove_file(index);
            }
        });
    }

    fn render_footer(&self, ui: &mut egui::Ui) {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if let Some(error) = &self.state.error_message {
                ui.colored_label(ERROR_RED, error);
            } else if let Some(path) = &self.state.last_export {
                ui.label(format!("Saved to {}", path.display()));
                if ui.link("Open").clicked() {
                    if let Err(e) = open::that(path) {
                        warn!("Failed to open {}: {}", path.display(), e);
                    }
                }
            }
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if self.state.uploads_in_flight() {
                    ui.spinner();
                }
                ui.weak(self.config.endpoint());
            });
        });
        ui.add_space(4.0);
    }
}
