//! Genre pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_json::json;

use super::{entity_id, CatalogForm};
use crate::{
    error::AppResult,
    models::{FormErrors, GenreForm},
    services::{genres::GenreWithBooks, DeleteOutcome},
    views::{self, BookView, GenreView},
    AppState,
};

#[derive(Deserialize)]
pub struct DeleteGenreForm {
    #[serde(default)]
    pub genreid: String,
}

fn render_form(title: &str, form: &GenreForm, errors: &FormErrors) -> AppResult<Html<String>> {
    views::render(
        "genre_form",
        &json!({ "title": title, "genre": form, "errors": errors }),
    )
}

fn render_delete(ctx: &GenreWithBooks) -> AppResult<Html<String>> {
    let books: Vec<BookView> = ctx.books.iter().map(BookView::from).collect();
    views::render(
        "genre_delete",
        &json!({
            "title": "Delete Genre",
            "genre": GenreView::from(&ctx.genre),
            "genre_books": books,
        }),
    )
}

pub async fn genre_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let genres = state.services.genres.list().await?;
    let genre_list: Vec<GenreView> = genres.iter().map(GenreView::from).collect();
    views::render(
        "genre_list",
        &json!({ "title": "Genre List", "genre_list": genre_list }),
    )
}

pub async fn genre_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = entity_id(&id, "Genre")?;
    let detail = state.services.genres.detail(id).await?;
    let books: Vec<BookView> = detail.books.iter().map(BookView::from).collect();
    views::render(
        "genre_detail",
        &json!({
            "title": "Genre Detail",
            "genre": GenreView::from(&detail.genre),
            "genre_books": books,
        }),
    )
}

pub async fn genre_create_get() -> AppResult<Html<String>> {
    render_form("Create Genre", &GenreForm::default(), &FormErrors::default())
}

pub async fn genre_create_post(
    State(state): State<AppState>,
    CatalogForm(form): CatalogForm<GenreForm>,
) -> AppResult<Response> {
    let form = form.sanitize();
    let data = match form.to_data() {
        Ok(data) => data,
        Err(errors) => return Ok(render_form("Create Genre", &form, &errors)?.into_response()),
    };
    let genre = state.services.genres.create(&data).await?.into_inner();
    Ok(Redirect::to(&genre.url()).into_response())
}

pub async fn genre_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = entity_id(&id, "Genre")?;
    match state.services.genres.delete_context(id).await? {
        Some(ctx) => Ok(render_delete(&ctx)?.into_response()),
        None => Ok(Redirect::to("/catalog/genres").into_response()),
    }
}

pub async fn genre_delete_post(
    State(state): State<AppState>,
    CatalogForm(form): CatalogForm<DeleteGenreForm>,
) -> AppResult<Response> {
    let id = entity_id(&form.genreid, "Genre")?;
    match state.services.genres.delete(id).await? {
        DeleteOutcome::Blocked(ctx) => Ok(render_delete(&ctx)?.into_response()),
        DeleteOutcome::Deleted | DeleteOutcome::Missing => {
            Ok(Redirect::to("/catalog/genres").into_response())
        }
    }
}

pub async fn genre_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = entity_id(&id, "Genre")?;
    let genre = state.services.genres.get(id).await?;
    render_form("Update Genre", &GenreForm::from(&genre), &FormErrors::default())
}

pub async fn genre_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CatalogForm(form): CatalogForm<GenreForm>,
) -> AppResult<Response> {
    let id = entity_id(&id, "Genre")?;
    let form = form.sanitize();
    let data = match form.to_data() {
        Ok(data) => data,
        Err(errors) => {
            state.services.genres.get(id).await?;
            return Ok(render_form("Update Genre", &form, &errors)?.into_response());
        }
    };
    let genre = state.services.genres.update(id, &data).await?;
    Ok(Redirect::to(&genre.url()).into_response())
}
