use crate::error::UploadError;
use crate::upload::client::OcrClient;
use crate::upload::types::{StatusEvent, Transition, UploadDocument};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Delivers status events to the UI thread and wakes it up.
#[derive(Clone)]
pub struct StatusSink {
    sender: Sender<StatusEvent>,
    repaint: Option<eframe::egui::Context>,
}

impl StatusSink {
    pub fn new(sender: Sender<StatusEvent>, repaint: Option<eframe::egui::Context>) -> Self {
        Self { sender, repaint }
    }

    pub fn send(&self, name: &str, transition: Transition) {
        let event = StatusEvent {
            name: name.to_string(),
            transition,
        };
        // The receiver only goes away when the window closes.
        let _ = self.sender.send(event);
        if let Some(ctx) = &self.repaint {
            ctx.request_repaint();
        }
    }
}

/// Fires one background task per file. Tasks are independent: no ordering
/// between files and no cancellation once started.
#[derive(Clone)]
pub struct UploadDispatcher {
    client: Arc<dyn OcrClient>,
    runtime: Handle,
    limit: Option<Arc<Semaphore>>,
    sink: StatusSink,
}

impl UploadDispatcher {
    pub fn new(
        client: Arc<dyn OcrClient>,
        runtime: Handle,
        max_concurrent: Option<usize>,
        sink: StatusSink,
    ) -> Self {
        Self {
            client,
            runtime,
            limit: max_concurrent.map(|n| Arc::new(Semaphore::new(n))),
            sink,
        }
    }

    pub fn dispatch(&self, batch: Vec<UploadDocument>) -> Vec<JoinHandle<()>> {
        info!("Dispatching {} file(s)", batch.len());
        batch
            .into_iter()
            .map(|document| {
                let client = Arc::clone(&self.client);
                let limit = self.limit.clone();
                let sink = self.sink.clone();
                self.runtime
                    .spawn(async move { upload_one(client, limit, sink, document).await })
            })
            .collect()
    }
}

async fn upload_one(
    client: Arc<dyn OcrClient>,
    limit: Option<Arc<Semaphore>>,
    sink: StatusSink,
    document: UploadDocument,
) {
    // Queued files stay Pending until a slot frees up.
    let _permit = match limit {
        Some(semaphore) => match semaphore.acquire_owned().await {
            Ok(permit) => Some(permit),
            Err(_) => return,
        },
        None => None,
    };

    sink.send(&document.name, Transition::Uploading);

    match client.recognize(&document).await {
        Ok(value) => {
            info!("Processed '{}'", document.name);
            sink.send(&document.name, Transition::Completed(value));
        }
        Err(e) => {
            error!("Upload error for '{}': {}", document.name, e);
            if let UploadError::Status { body, .. } = &e {
                if !body.is_empty() {
                    error!("Response data: {}", body);
                }
            }
            sink.send(&document.name, Transition::Failed(e));
        }
    }
}
