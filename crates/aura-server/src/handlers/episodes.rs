//! Episode CRUD handlers.
//!
//! A successful create or delete redirects to the list, a successful
//! update redirects to the episode's detail page.

use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum_extra::extract::Form;

use crate::error::AppError;
use crate::forms::EpisodeForm;
use crate::server::AppState;
use crate::views;

/// `GET /episodes` — newest first, capped at the list limit.
pub async fn list(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let episodes = state.store.list_episodes()?;
    Ok(Html(views::episodes::list_page(&episodes)))
}

/// `GET /episodes/new` — blank form with all reference options.
pub async fn new_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let options = state.store.form_options()?;
    Ok(Html(views::episodes::new_page(&options)))
}

/// `POST /episodes/create`
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<EpisodeForm>,
) -> Result<Redirect, AppError> {
    let input = form.into_input()?;
    let _ = state.store.create_episode(&input)?;
    Ok(Redirect::to("/episodes"))
}

/// `GET /episodes/{id}` — detail with all four association lists.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let detail = state.store.episode_detail(id)?;
    Ok(Html(views::episodes::detail_page(&detail)))
}

/// `GET /episodes/{id}/edit` — form pre-filled with the stored state.
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let view = state.store.episode_edit_view(id)?;
    Ok(Html(views::episodes::edit_page(&view)))
}

/// `POST /episodes/{id}/update` — full replace, association sets included.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<EpisodeForm>,
) -> Result<Redirect, AppError> {
    let input = form.into_input()?;
    state.store.update_episode(id, &input)?;
    Ok(Redirect::to(&format!("/episodes/{id}")))
}

/// `POST /episodes/{id}/delete` — idempotent, always back to the list.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let _ = state.store.delete_episode(id)?;
    Ok(Redirect::to("/episodes"))
}
