//! Record page handlers.
//!
//! Each handler loads the full set, changes its local copy, and writes the
//! whole set back. Nothing is locked: concurrent writers can lose updates.

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;
use tracing::{debug, info};

use service::records::{self, Record};

use crate::errors::AppError;
use crate::state::AppState;
use crate::views;

#[derive(Deserialize, Debug)]
pub struct AddForm {
    pub name: String,
    pub value: String,
}

#[derive(Deserialize, Debug)]
pub struct EditForm {
    pub value: String,
}

pub async fn list(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let records = state.store.load_all().await?;
    debug!(count = records.len(), "listing records");
    Ok(Html(views::index_page(&records)))
}

/// Append without a duplicate check; an existing name yields a second record.
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddForm>,
) -> Result<Redirect, AppError> {
    let mut all = state.store.load_all().await?;
    info!(name = %form.name, "adding record");
    all.push(Record::new(form.name, form.value));
    state.store.save_all(&all).await?;
    Ok(Redirect::to("/"))
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Html<String>, AppError> {
    let all = state.store.load_all().await?;
    let record = records::find(&all, &name).ok_or(AppError::NotFound)?;
    Ok(Html(views::edit_page(&record.value)))
}

/// Updates the first case-insensitive match only.
pub async fn edit(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Form(form): Form<EditForm>,
) -> Result<Redirect, AppError> {
    let mut all = state.store.load_all().await?;
    let record = records::find_mut(&mut all, &name).ok_or(AppError::NotFound)?;
    info!(name = %record.name, "updating record value");
    record.value = form.value;
    state.store.save_all(&all).await?;
    Ok(Redirect::to("/"))
}

/// Removes every case-insensitive match; saves even when nothing matched.
pub async fn delete(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Redirect, AppError> {
    let mut all = state.store.load_all().await?;
    let removed = records::remove_all(&mut all, &name);
    info!(%name, removed, "deleting records");
    state.store.save_all(&all).await?;
    Ok(Redirect::to("/"))
}
