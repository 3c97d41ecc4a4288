mod export;
mod store;

pub use export::{export_json, export_originals, DEFAULT_EXPORT_NAME};
pub use store::ResultStore;
