//! Handlers shared by the four name-only reference kinds.
//!
//! The kinds differ only in table name and wording, so one set of handlers
//! takes [`LookupKind`] as a parameter and [`routes`] binds it into the
//! closures axum sees, once per kind.

use axum::Router;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum_extra::extract::Form;

use aura_store::LookupKind;

use crate::error::AppError;
use crate::forms::LookupForm;
use crate::server::AppState;
use crate::views;

/// Build the six routes for one lookup kind under `/{table}`.
pub fn routes(kind: LookupKind) -> Router<AppState> {
    let base = format!("/{}", kind.table());
    Router::new()
        .route(&base, get(move |state: State<AppState>| list(state, kind)))
        .route(&format!("{base}/new"), get(move || new_form(kind)))
        .route(
            &format!("{base}/create"),
            post(move |state: State<AppState>, form: Form<LookupForm>| create(state, form, kind)),
        )
        .route(
            &format!("{base}/{{id}}/edit"),
            get(move |state: State<AppState>, path: Path<i64>| edit_form(state, path, kind)),
        )
        .route(
            &format!("{base}/{{id}}/update"),
            post(
                move |state: State<AppState>, path: Path<i64>, form: Form<LookupForm>| {
                    update(state, path, form, kind)
                },
            ),
        )
        .route(
            &format!("{base}/{{id}}/delete"),
            post(move |state: State<AppState>, path: Path<i64>| delete(state, path, kind)),
        )
}

async fn list(State(state): State<AppState>, kind: LookupKind) -> Result<Html<String>, AppError> {
    let items = state.store.lookup_list(kind)?;
    Ok(Html(views::lookups::list_page(kind, &items)))
}

async fn new_form(kind: LookupKind) -> Html<String> {
    Html(views::lookups::form_page(kind, None))
}

async fn create(
    State(state): State<AppState>,
    Form(form): Form<LookupForm>,
    kind: LookupKind,
) -> Result<Redirect, AppError> {
    let input = form.into_input()?;
    let _ = state.store.lookup_create(kind, &input)?;
    Ok(Redirect::to(&format!("/{}", kind.table())))
}

async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    kind: LookupKind,
) -> Result<Html<String>, AppError> {
    let item = state.store.lookup_get(kind, id)?;
    Ok(Html(views::lookups::form_page(kind, Some(&item))))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<LookupForm>,
    kind: LookupKind,
) -> Result<Redirect, AppError> {
    let input = form.into_input()?;
    state.store.lookup_update(kind, id, &input)?;
    Ok(Redirect::to(&format!("/{}", kind.table())))
}

async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    kind: LookupKind,
) -> Result<Redirect, AppError> {
    let _ = state.store.lookup_delete(kind, id)?;
    Ok(Redirect::to(&format!("/{}", kind.table())))
}
