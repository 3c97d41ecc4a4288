use serde_json::Value;
use std::collections::HashMap;

/// Extracted results received from the OCR endpoint.
///
/// `latest` always follows whichever response resolved last, so with several
/// uploads in flight the viewer shows the last one to finish, not the last
/// one dropped. Per-file results are kept alongside so a file can be pinned.
#[derive(Debug, Default)]
pub struct ResultStore {
    by_file: HashMap<String, Value>,
    latest: Option<String>,
    pinned: Option<String>,
}

impl ResultStore {
    pub fn record(&mut self, name: &str, value: Value) {
        self.by_file.insert(name.to_string(), value);
        self.latest = Some(name.to_string());
    }

    pub fn result_for(&self, name: &str) -> Option<&Value> {
        self.by_file.get(name)
    }

    pub fn pin(&mut self, name: Option<&str>) {
        self.pinned = name.map(str::to_string);
    }

    pub fn pinned(&self) -> Option<&str> {
        self.pinned.as_deref()
    }

    /// Name of the file whose result is on screen.
    pub fn displayed_name(&self) -> Option<&str> {
        match &self.pinned {
            Some(name) if self.by_file.contains_key(name) => Some(name.as_str()),
            _ => self.latest.as_deref(),
        }
    }

    pub fn displayed(&self) -> Option<&Value> {
        self.displayed_name().and_then(|name| self.by_file.get(name))
    }

    pub fn has_result(&self) -> bool {
        self.displayed().is_some()
    }

    pub fn pretty(value: &Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    }
}
