use atena_core::Flashcard;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize)]
pub struct DeckOut {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub card_count: usize,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct DueOut {
    pub deck_id: Uuid,
    pub deck_title: String,
    pub card: Flashcard,
}

#[derive(Deserialize)]
pub struct ReviewIn {
    pub deck_id: Uuid,
    pub card_id: Uuid,
    /// 1..=5
    pub rating: u8,
}

#[derive(Serialize)]
pub struct ReviewOut {
    pub streak: u32,
    pub interval_days: u32,
    pub next_review: DateTime<Utc>,
}
