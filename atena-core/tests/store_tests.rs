use atena_core::{
    calculate_next_review, CardPatch, Deck, DeckPatch, DeckStats, DeckStore, Difficulty,
    MemoryStorage, Rating, Storage, STORAGE_KEY,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

fn store() -> DeckStore {
    DeckStore::new(Arc::new(MemoryStorage::new()))
}

#[test]
fn create_then_get_is_idempotent() {
    let s = store();
    let deck = s.create_deck("Spanish", "daily vocab", "language");

    let a = s.get_deck(deck.id).unwrap();
    let b = s.get_deck(deck.id).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.title, "Spanish");
    assert!(a.cards.is_empty());
}

#[test]
fn update_deck_merges_fields() {
    let s = store();
    let deck = s.create_deck("Spanish", "daily vocab", "language");
    s.add_flashcard(deck.id, "hola", "hello", Difficulty::Easy)
        .unwrap();

    let patch = DeckPatch {
        title: Some("Spanish A1".into()),
        ..DeckPatch::default()
    };
    let updated = s.update_deck(deck.id, patch).unwrap();

    assert_eq!(updated.title, "Spanish A1");
    assert_eq!(updated.description, "daily vocab");
    assert_eq!(updated.id, deck.id);
    assert_eq!(updated.created_at, deck.created_at);
    assert_eq!(updated.cards.len(), 1);
    assert!(updated.updated_at >= deck.updated_at);
}

#[test]
fn update_unknown_deck_returns_none() {
    let s = store();
    assert!(s.update_deck(Uuid::new_v4(), DeckPatch::default()).is_none());
}

#[test]
fn delete_unknown_deck_is_a_noop() {
    let s = store();
    s.create_deck("Biology", "", "science");

    assert!(!s.delete_deck(Uuid::new_v4()));
    assert_eq!(s.list_decks().len(), 1);
}

#[test]
fn delete_deck_takes_its_cards_with_it() {
    let s = store();
    let deck = s.create_deck("Biology", "", "science");
    s.add_flashcard(deck.id, "mitochondria", "powerhouse", Difficulty::Medium)
        .unwrap();

    assert!(s.delete_deck(deck.id));
    assert!(s.list_decks().is_empty());
    assert!(s.cards_to_review().is_empty());
}

#[test]
fn new_card_starts_unscheduled() {
    let s = store();
    let deck = s.create_deck("Spanish", "", "language");
    let card = s
        .add_flashcard(deck.id, "hola", "hello", Difficulty::Hard)
        .unwrap();

    assert_eq!(card.streak, 0);
    assert_eq!(card.last_reviewed, None);
    assert_eq!(card.next_review, None);
    assert_eq!(card.difficulty, Difficulty::Hard);
}

#[test]
fn add_card_to_unknown_deck_creates_nothing() {
    let s = store();
    assert!(s
        .add_flashcard(Uuid::new_v4(), "q", "a", Difficulty::Medium)
        .is_none());
    assert!(s.list_decks().is_empty());
}

#[test]
fn review_outcome_persists_through_patch() {
    let s = store();
    let deck = s.create_deck("Spanish", "", "language");
    let card = s
        .add_flashcard(deck.id, "hola", "hello", Difficulty::Medium)
        .unwrap();

    let now = Utc::now();
    let outcome = calculate_next_review(card.streak, Rating::Easy, now);
    let reviewed = s
        .update_flashcard(deck.id, card.id, CardPatch::from_outcome(&outcome, now))
        .unwrap();

    assert_eq!(reviewed.streak, 1);
    assert_eq!(reviewed.last_reviewed, Some(now));
    assert_eq!(reviewed.next_review, Some(outcome.next_review));

    // and the write stuck
    let stored = s.get_deck(deck.id).unwrap();
    assert_eq!(stored.card(card.id).unwrap(), &reviewed);
    assert!(stored.updated_at >= deck.updated_at);
}

#[test]
fn update_card_in_unknown_deck_returns_none() {
    let s = store();
    let deck = s.create_deck("Spanish", "", "language");
    let card = s
        .add_flashcard(deck.id, "hola", "hello", Difficulty::Medium)
        .unwrap();

    assert!(s
        .update_flashcard(Uuid::new_v4(), card.id, CardPatch::default())
        .is_none());
    assert!(s
        .update_flashcard(deck.id, Uuid::new_v4(), CardPatch::default())
        .is_none());
}

#[test]
fn delete_card_reports_whether_anything_went() {
    let s = store();
    let deck = s.create_deck("Spanish", "", "language");
    let card = s
        .add_flashcard(deck.id, "hola", "hello", Difficulty::Medium)
        .unwrap();

    assert!(!s.delete_flashcard(deck.id, Uuid::new_v4()));
    assert!(s.delete_flashcard(deck.id, card.id));
    assert!(!s.delete_flashcard(deck.id, card.id));
    assert!(s.get_deck(deck.id).unwrap().cards.is_empty());
}

#[test]
fn empty_deck_stats_are_zero() {
    let s = store();
    let deck = s.create_deck("Empty", "", "");

    assert_eq!(s.deck_stats(deck.id), Some(DeckStats::default()));
    assert!(s.deck_stats(Uuid::new_v4()).is_none());
}

#[test]
fn corrupt_record_reads_as_empty() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(STORAGE_KEY, "{definitely not json");
    let s = DeckStore::new(storage);

    assert!(s.list_decks().is_empty());

    // the next write replaces the corrupt record
    s.create_deck("Fresh", "", "");
    assert_eq!(s.list_decks().len(), 1);
}

#[test]
fn collection_round_trips_through_json() {
    let storage = Arc::new(MemoryStorage::new());
    let s = DeckStore::new(storage.clone());
    let deck = s.create_deck("Spanish", "daily vocab", "language");
    let card = s
        .add_flashcard(deck.id, "hola", "hello", Difficulty::Easy)
        .unwrap();
    let now = Utc::now();
    let outcome = calculate_next_review(card.streak, Rating::Perfect, now);
    s.update_flashcard(deck.id, card.id, CardPatch::from_outcome(&outcome, now))
        .unwrap();

    let raw = storage.get(STORAGE_KEY).unwrap();
    let parsed: Vec<Deck> = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, s.list_decks());

    // timestamps survive as the identical instant
    let reparsed = parsed[0].card(card.id).unwrap();
    assert_eq!(reparsed.last_reviewed, Some(now));
}
