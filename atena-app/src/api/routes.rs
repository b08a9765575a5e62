use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use atena_core::{calculate_next_review, CardPatch, DeckStats, DeckStore, Rating};
use chrono::Utc;
use uuid::Uuid;

use crate::api::dto::{DeckOut, DueOut, ReviewIn, ReviewOut};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DeckStore>,
}

pub async fn list_decks(State(st): State<Arc<AppState>>) -> Json<Vec<DeckOut>> {
    let mut decks = st.store.list_decks();
    decks.sort_by_key(|d| d.created_at);
    Json(
        decks
            .into_iter()
            .map(|d| DeckOut {
                id: d.id,
                title: d.title,
                description: d.description,
                category: d.category,
                card_count: d.cards.len(),
                created_at: d.created_at,
            })
            .collect(),
    )
}

pub async fn deck_stats(
    State(st): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeckStats>, StatusCode> {
    st.store.deck_stats(id).map(Json).ok_or(StatusCode::NOT_FOUND)
}

pub async fn due_cards(State(st): State<Arc<AppState>>) -> Json<Vec<DueOut>> {
    Json(
        st.store
            .cards_to_review()
            .into_iter()
            .map(|d| DueOut {
                deck_id: d.deck_id,
                deck_title: d.deck_title,
                card: d.card,
            })
            .collect(),
    )
}

pub async fn post_review(
    State(st): State<Arc<AppState>>,
    Json(body): Json<ReviewIn>,
) -> Result<Json<ReviewOut>, StatusCode> {
    let rating = Rating::from_score(body.rating).ok_or(StatusCode::BAD_REQUEST)?;
    let deck = st.store.get_deck(body.deck_id).ok_or(StatusCode::NOT_FOUND)?;
    let card = deck.card(body.card_id).ok_or(StatusCode::NOT_FOUND)?;

    let now = Utc::now();
    let outcome = calculate_next_review(card.streak, rating, now);
    st.store
        .update_flashcard(body.deck_id, body.card_id, CardPatch::from_outcome(&outcome, now))
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(ReviewOut {
        streak: outcome.streak,
        interval_days: outcome.interval_days,
        next_review: outcome.next_review,
    }))
}
