use crate::scheduler::ReviewOutcome;
use crate::stats::{deck_stats, due_cards, DeckStats, DueCard};
use crate::storage::Storage;
use crate::{CardId, Deck, DeckId, Difficulty, Flashcard};
use chrono::{DateTime, Local, NaiveDate, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

/// Fixed key the whole deck collection is persisted under.
pub const STORAGE_KEY: &str = "atena.decks";

/// Field merge for `update_deck`. `id`, `created_at` and `cards` are not
/// reachable through this type.
#[derive(Clone, Debug, Default)]
pub struct DeckPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// Field merge for `update_flashcard`, including the scheduler outcome
/// written back after a review.
#[derive(Clone, Debug, Default)]
pub struct CardPatch {
    pub front: Option<String>,
    pub back: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub streak: Option<u32>,
    pub last_reviewed: Option<DateTime<Utc>>,
    pub next_review: Option<DateTime<Utc>>,
}

impl CardPatch {
    pub fn from_outcome(outcome: &ReviewOutcome, reviewed_at: DateTime<Utc>) -> Self {
        Self {
            streak: Some(outcome.streak),
            last_reviewed: Some(reviewed_at),
            next_review: Some(outcome.next_review),
            ..Self::default()
        }
    }
}

/// CRUD over the deck collection plus derived statistics, persisted as one
/// JSON record through an injected [`Storage`]. Every write is a full
/// load-modify-save of the collection, so readers observe either the old or
/// the new collection, never a mix.
///
/// Lookups return `None` / `false` for unknown ids; nothing here errors.
/// The store does not validate text fields (empty deck titles are the
/// caller's contract to reject).
pub struct DeckStore {
    storage: Arc<dyn Storage>,
    // Serializes the read-modify-write cycles of concurrent writers.
    write_lock: Mutex<()>,
}

impl DeckStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Vec<Deck> {
        let Some(raw) = self.storage.get(STORAGE_KEY) else {
            return Vec::new();
        };
        // A corrupt record reads the same as no record.
        serde_json::from_str(&raw).unwrap_or_default()
    }

    fn save(&self, decks: &[Deck]) {
        let json = serde_json::to_string(decks).expect("serialize");
        self.storage.set(STORAGE_KEY, &json);
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    pub fn create_deck(&self, title: &str, description: &str, category: &str) -> Deck {
        let _guard = self.write_lock.lock();
        let mut decks = self.load();
        let deck = Deck::new(title, description, category);
        decks.push(deck.clone());
        self.save(&decks);
        deck
    }

    pub fn list_decks(&self) -> Vec<Deck> {
        self.load()
    }

    pub fn get_deck(&self, id: DeckId) -> Option<Deck> {
        self.load().into_iter().find(|d| d.id == id)
    }

    pub fn update_deck(&self, id: DeckId, patch: DeckPatch) -> Option<Deck> {
        let _guard = self.write_lock.lock();
        let mut decks = self.load();
        let deck = decks.iter_mut().find(|d| d.id == id)?;
        if let Some(title) = patch.title {
            deck.title = title;
        }
        if let Some(description) = patch.description {
            deck.description = description;
        }
        if let Some(category) = patch.category {
            deck.category = category;
        }
        deck.updated_at = Utc::now();
        let updated = deck.clone();
        self.save(&decks);
        Some(updated)
    }

    pub fn delete_deck(&self, id: DeckId) -> bool {
        let _guard = self.write_lock.lock();
        let mut decks = self.load();
        let before = decks.len();
        decks.retain(|d| d.id != id);
        if decks.len() == before {
            return false;
        }
        self.save(&decks);
        true
    }

    pub fn add_flashcard(
        &self,
        deck_id: DeckId,
        front: &str,
        back: &str,
        difficulty: Difficulty,
    ) -> Option<Flashcard> {
        let _guard = self.write_lock.lock();
        let mut decks = self.load();
        let deck = decks.iter_mut().find(|d| d.id == deck_id)?;
        let card = Flashcard::new(front, back, difficulty);
        deck.cards.push(card.clone());
        deck.updated_at = Utc::now();
        self.save(&decks);
        Some(card)
    }

    pub fn update_flashcard(
        &self,
        deck_id: DeckId,
        card_id: CardId,
        patch: CardPatch,
    ) -> Option<Flashcard> {
        let _guard = self.write_lock.lock();
        let mut decks = self.load();
        let deck = decks.iter_mut().find(|d| d.id == deck_id)?;
        let now = Utc::now();
        let updated = {
            let card = deck.cards.iter_mut().find(|c| c.id == card_id)?;
            if let Some(front) = patch.front {
                card.front = front;
            }
            if let Some(back) = patch.back {
                card.back = back;
            }
            if let Some(difficulty) = patch.difficulty {
                card.difficulty = difficulty;
            }
            if let Some(streak) = patch.streak {
                card.streak = streak;
            }
            if let Some(at) = patch.last_reviewed {
                card.last_reviewed = Some(at);
            }
            if let Some(at) = patch.next_review {
                card.next_review = Some(at);
            }
            card.updated_at = now;
            card.clone()
        };
        deck.updated_at = now;
        self.save(&decks);
        Some(updated)
    }

    pub fn delete_flashcard(&self, deck_id: DeckId, card_id: CardId) -> bool {
        let _guard = self.write_lock.lock();
        let mut decks = self.load();
        let Some(deck) = decks.iter_mut().find(|d| d.id == deck_id) else {
            return false;
        };
        let before = deck.cards.len();
        deck.cards.retain(|c| c.id != card_id);
        if deck.cards.len() == before {
            return false;
        }
        deck.updated_at = Utc::now();
        self.save(&decks);
        true
    }

    pub fn deck_stats(&self, deck_id: DeckId) -> Option<DeckStats> {
        let deck = self.get_deck(deck_id)?;
        Some(deck_stats(&deck, Self::today()))
    }

    pub fn cards_to_review(&self) -> Vec<DueCard> {
        due_cards(&self.load(), Self::today())
    }
}
