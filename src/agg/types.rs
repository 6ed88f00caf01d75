use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
pub struct TickSummary {
    pub feed_id: Uuid,
    pub feed: String,
    pub items: usize,
    pub inserted: usize,
    pub skipped: usize,
}
