//! Read-only schema browser handlers.
//!
//! Table names coming off the URL are checked against the storage layer's
//! allow-list; anything else is a 404.

use axum::extract::{Path, State};
use axum::response::Html;

use aura_core::constants::ROW_PREVIEW_LIMIT;

use crate::error::AppError;
use crate::server::AppState;
use crate::views;

/// `GET /tables`
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let names = state.store.table_names()?;
    Ok(Html(views::tables::index_page(&names)))
}

/// `GET /describe/{table}`
pub async fn describe(
    State(state): State<AppState>,
    Path(table): Path<String>,
) -> Result<Html<String>, AppError> {
    let columns = state.store.table_columns(&table)?;
    Ok(Html(views::tables::describe_page(&table, &columns)))
}

/// `GET /view/{table}`
pub async fn view(
    State(state): State<AppState>,
    Path(table): Path<String>,
) -> Result<Html<String>, AppError> {
    let preview = state.store.table_preview(&table)?;
    Ok(Html(views::tables::view_page(
        &table,
        &preview,
        ROW_PREVIEW_LIMIT,
    )))
}
