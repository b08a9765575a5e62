use crate::{Difficulty, Flashcard};
use chrono::NaiveDate;

pub fn filter_by_text(cards: &[Flashcard], query: &str) -> Vec<Flashcard> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return cards.to_vec();
    }
    cards
        .iter()
        .filter(|c| c.front.to_lowercase().contains(&q) || c.back.to_lowercase().contains(&q))
        .cloned()
        .collect()
}

pub fn filter_by_difficulty(cards: &[Flashcard], difficulty: Difficulty) -> Vec<Flashcard> {
    cards
        .iter()
        .filter(|c| c.difficulty == difficulty)
        .cloned()
        .collect()
}

pub fn filter_due(cards: &[Flashcard], today: NaiveDate) -> Vec<Flashcard> {
    cards.iter().filter(|c| c.is_due(today)).cloned().collect()
}
