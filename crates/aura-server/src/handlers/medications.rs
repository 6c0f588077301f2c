//! Medication CRUD handlers.

use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum_extra::extract::Form;

use crate::error::AppError;
use crate::forms::MedicationForm;
use crate::server::AppState;
use crate::views;

/// `GET /medications`
pub async fn list(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let medications = state.store.medication_list()?;
    Ok(Html(views::medications::list_page(&medications)))
}

/// `GET /medications/new`
pub async fn new_form() -> Html<String> {
    Html(views::medications::form_page(None))
}

/// `POST /medications/create`
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<MedicationForm>,
) -> Result<Redirect, AppError> {
    let input = form.into_input()?;
    let _ = state.store.medication_create(&input)?;
    Ok(Redirect::to("/medications"))
}

/// `GET /medications/{id}/edit`
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let medication = state.store.medication_get(id)?;
    Ok(Html(views::medications::form_page(Some(&medication))))
}

/// `POST /medications/{id}/update`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<MedicationForm>,
) -> Result<Redirect, AppError> {
    let input = form.into_input()?;
    state.store.medication_update(id, &input)?;
    Ok(Redirect::to("/medications"))
}

/// `POST /medications/{id}/delete`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let _ = state.store.medication_delete(id)?;
    Ok(Redirect::to("/medications"))
}
