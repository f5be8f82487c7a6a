use serde::{Deserialize, Serialize};

/// A stored paste row. Immutable after creation; there is no update or
/// delete path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paste {
    pub id: String,
    pub content: String,
    pub ip_address: String,
}

/// Row shape returned by the history lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub content: String,
}
