use chrono::{DateTime, Utc};
use serde::Serialize;

/// Default display color: opaque material blue.
pub const DEFAULT_COLOR: u32 = 0xFF21_96F3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeFlowItem {
    pub id: i64,            // ⇔ timeflow_items.id (0 = not yet persisted)
    pub title: String,      // ⇔ timeflow_items.title
    pub from_instant: DateTime<Utc>, // ⇔ timeflow_items.from_instant (epoch millis)
    pub to_instant: DateTime<Utc>,   // ⇔ timeflow_items.to_instant (epoch millis)
    pub color: u32,         // ⇔ timeflow_items.color (packed ARGB, opaque to the engine)
}

impl TimeFlowItem {
    /// High-level constructor for items created from the CLI / ViewModel.
    /// Leaves `id = 0`; the store assigns the real id on insert.
    pub fn new(title: &str, from_instant: DateTime<Utc>, to_instant: DateTime<Utc>, color: u32) -> Self {
        Self {
            id: 0,
            title: title.to_string(),
            from_instant,
            to_instant,
            color,
        }
    }
}
