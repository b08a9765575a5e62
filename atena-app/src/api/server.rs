use axum::{
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::routes::{deck_stats, due_cards, list_decks, post_review, AppState};
use atena_core::DeckStore;

pub async fn run(store: DeckStore, addr: SocketAddr) -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        store: Arc::new(store),
    });

    let app = Router::new()
        .route("/decks", get(list_decks))
        .route("/decks/:id/stats", get(deck_stats))
        .route("/due", get(due_cards))
        .route("/review", post(post_review))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    info!(%addr, "serving atena api");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
