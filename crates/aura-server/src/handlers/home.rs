//! Landing page and the login stub.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use tracing::warn;

use aura_core::EpisodeStats;

use crate::server::AppState;
use crate::views;

/// `GET /` — dashboard. Storage trouble degrades to zeroed stats rather
/// than taking down the landing page.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let stats = state.store.stats().unwrap_or_else(|err| {
        warn!(error = %err, "stats unavailable, rendering zeros");
        EpisodeStats::default()
    });
    Html(views::home::page(&stats))
}

/// `GET /login` — authentication is not implemented; always 401.
pub async fn login() -> (StatusCode, &'static str) {
    (StatusCode::UNAUTHORIZED, "Unauthorized")
}
