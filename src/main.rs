mod app;
mod config;
mod error;
mod intake;
mod results;
mod upload;
mod utils;

use anyhow::Context;
use app::QalamVision;
use config::OcrConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("qalam_vision=info")),
        )
        .init();

    let config = OcrConfig::from_env().context("Invalid configuration")?;
    info!(
        "OCR endpoint: {} (timeout: {}ms, max concurrent uploads: {}, export: {:?})",
        config.endpoint(),
        config.timeout_ms,
        config.max_concurrent_uploads,
        config.export_mode
    );

    // Uploads run here; the runtime must outlive the window.
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([720.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Qalam Vision",
        options,
        Box::new(move |cc| Box::new(QalamVision::new(cc, config, handle))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to open window: {e}"))?;

    drop(runtime);
    Ok(())
}
