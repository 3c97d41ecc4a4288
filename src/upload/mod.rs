mod client;
mod dispatcher;
mod tracker;
mod types;

pub use client::HttpOcrClient;
pub use dispatcher::{StatusSink, UploadDispatcher};
pub use tracker::StatusBoard;
pub use types::{StatusEvent, Transition, UploadDocument, UploadStatus};
