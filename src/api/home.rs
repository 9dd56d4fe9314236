//! Catalog home page

use axum::{extract::State, response::Html};
use serde_json::json;

use crate::{error::AppResult, views, AppState};

/// Record counts; a failed count is shown as an error next to the others
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let data = state.services.stats.counts().await;
    views::render("index", &json!({ "title": "Local Library Home", "data": data }))
}
