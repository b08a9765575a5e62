use crate::{Deck, DeckId, Flashcard};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DeckStats {
    pub total_cards: usize,
    pub mastered_cards: usize,
    pub cards_to_review: usize,
    /// Rounded percentage of mastered cards, 0 for an empty deck.
    pub mastery: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct DueCard {
    pub deck_id: DeckId,
    pub deck_title: String,
    pub card: Flashcard,
}

pub fn deck_stats(deck: &Deck, today: NaiveDate) -> DeckStats {
    let total = deck.cards.len();
    let mastered = deck.cards.iter().filter(|c| c.is_mastered()).count();
    let to_review = deck.cards.iter().filter(|c| c.is_due(today)).count();
    let mastery = if total == 0 {
        0
    } else {
        (mastered as f64 / total as f64 * 100.0).round() as u32
    };
    DeckStats {
        total_cards: total,
        mastered_cards: mastered,
        cards_to_review: to_review,
        mastery,
    }
}

/// Flattened due view across all decks, in deck iteration order.
pub fn due_cards(decks: &[Deck], today: NaiveDate) -> Vec<DueCard> {
    let mut due = Vec::new();
    for deck in decks {
        for card in deck.cards.iter().filter(|c| c.is_due(today)) {
            due.push(DueCard {
                deck_id: deck.id,
                deck_title: deck.title.clone(),
                card: card.clone(),
            });
        }
    }
    due
}
