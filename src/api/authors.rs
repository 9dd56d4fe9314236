//! Author pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_json::json;

use super::{entity_id, CatalogForm};
use crate::{
    error::AppResult,
    models::{AuthorForm, FormErrors},
    services::{authors::AuthorWithBooks, DeleteOutcome},
    views::{self, AuthorView, BookView},
    AppState,
};

#[derive(Deserialize)]
pub struct DeleteAuthorForm {
    #[serde(default)]
    pub authorid: String,
}

fn render_form(title: &str, form: &AuthorForm, errors: &FormErrors) -> AppResult<Html<String>> {
    views::render(
        "author_form",
        &json!({ "title": title, "author": form, "errors": errors }),
    )
}

fn render_delete(ctx: &AuthorWithBooks) -> AppResult<Html<String>> {
    let books: Vec<BookView> = ctx.books.iter().map(BookView::from).collect();
    views::render(
        "author_delete",
        &json!({
            "title": "Delete Author",
            "author": AuthorView::from(&ctx.author),
            "author_books": books,
        }),
    )
}

/// List all authors
pub async fn author_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let authors = state.services.authors.list().await?;
    let author_list: Vec<AuthorView> = authors.iter().map(AuthorView::from).collect();
    views::render(
        "author_list",
        &json!({ "title": "Author List", "author_list": author_list }),
    )
}

/// Author with their books
pub async fn author_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = entity_id(&id, "Author")?;
    let detail = state.services.authors.detail(id).await?;
    let books: Vec<BookView> = detail.books.iter().map(BookView::from).collect();
    views::render(
        "author_detail",
        &json!({
            "title": "Author Detail",
            "author": AuthorView::from(&detail.author),
            "author_books": books,
        }),
    )
}

pub async fn author_create_get() -> AppResult<Html<String>> {
    render_form("Create Author", &AuthorForm::default(), &FormErrors::default())
}

/// Create an author, or redirect to the one that already has this name
pub async fn author_create_post(
    State(state): State<AppState>,
    CatalogForm(form): CatalogForm<AuthorForm>,
) -> AppResult<Response> {
    let form = form.sanitize();
    let data = match form.to_data() {
        Ok(data) => data,
        Err(errors) => return Ok(render_form("Create Author", &form, &errors)?.into_response()),
    };
    let author = state.services.authors.create(&data).await?.into_inner();
    Ok(Redirect::to(&author.url()).into_response())
}

pub async fn author_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = entity_id(&id, "Author")?;
    match state.services.authors.delete_context(id).await? {
        Some(ctx) => Ok(render_delete(&ctx)?.into_response()),
        None => Ok(Redirect::to("/catalog/authors").into_response()),
    }
}

/// Delete the author named in the form body, unless books still reference it
pub async fn author_delete_post(
    State(state): State<AppState>,
    CatalogForm(form): CatalogForm<DeleteAuthorForm>,
) -> AppResult<Response> {
    let id = entity_id(&form.authorid, "Author")?;
    match state.services.authors.delete(id).await? {
        DeleteOutcome::Blocked(ctx) => Ok(render_delete(&ctx)?.into_response()),
        DeleteOutcome::Deleted | DeleteOutcome::Missing => {
            Ok(Redirect::to("/catalog/authors").into_response())
        }
    }
}

pub async fn author_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = entity_id(&id, "Author")?;
    let author = state.services.authors.get(id).await?;
    render_form("Update Author", &AuthorForm::from(&author), &FormErrors::default())
}

pub async fn author_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CatalogForm(form): CatalogForm<AuthorForm>,
) -> AppResult<Response> {
    let id = entity_id(&id, "Author")?;
    let form = form.sanitize();
    let data = match form.to_data() {
        Ok(data) => data,
        Err(errors) => {
            state.services.authors.get(id).await?;
            return Ok(render_form("Update Author", &form, &errors)?.into_response());
        }
    };
    let author = state.services.authors.update(id, &data).await?;
    Ok(Redirect::to(&author.url()).into_response())
}
