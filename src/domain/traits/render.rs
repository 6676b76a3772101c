use chrono::{DateTime, Utc};

/// Display record produced for every processed message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEntry {
    pub timestamp: DateTime<Utc>,
    pub sender: String,
    pub content: String,
    pub matched: bool,
}

/// Turns a display record into one console line
pub trait Render: Send + Sync {
    fn render(&self, entry: &DisplayEntry) -> String;
}
