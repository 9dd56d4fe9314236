//! Book pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_json::json;

use super::{entity_id, CatalogForm};
use crate::{
    error::AppResult,
    models::{BookForm, FormErrors},
    services::{
        books::{BookChoices, BookWithInstances},
        DeleteOutcome,
    },
    views::{self, author_choices, genre_choices, BookInstanceView, BookView, GenreView},
    AppState,
};

#[derive(Deserialize)]
pub struct DeleteBookForm {
    #[serde(default)]
    pub bookid: String,
}

/// Render the book form with the selected author and genres marked
fn render_form(
    title: &str,
    form: &BookForm,
    choices: &BookChoices,
    errors: &FormErrors,
) -> AppResult<Html<String>> {
    views::render(
        "book_form",
        &json!({
            "title": title,
            "book": form,
            "authors": author_choices(&choices.authors, &form.author),
            "genres": genre_choices(&choices.genres, |id| form.is_genre_selected(id)),
            "errors": errors,
        }),
    )
}

fn render_delete(ctx: &BookWithInstances) -> AppResult<Html<String>> {
    let instances: Vec<BookInstanceView> =
        ctx.instances.iter().map(BookInstanceView::from).collect();
    views::render(
        "book_delete",
        &json!({
            "title": "Delete Book",
            "book": BookView::from(&ctx.book),
            "book_instances": instances,
        }),
    )
}

/// List all books with their authors
pub async fn book_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.books.list().await?;
    let book_list: Vec<BookView> = books
        .iter()
        .map(|entry| BookView::new(&entry.book, entry.author.as_ref()))
        .collect();
    views::render(
        "book_list",
        &json!({ "title": "Book List", "book_list": book_list }),
    )
}

/// Book with its author, genres and copies
pub async fn book_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = entity_id(&id, "Book")?;
    let detail = state.services.books.detail(id).await?;
    let genres: Vec<GenreView> = detail.genres.iter().map(GenreView::from).collect();
    let instances: Vec<BookInstanceView> =
        detail.instances.iter().map(BookInstanceView::from).collect();
    views::render(
        "book_detail",
        &json!({
            "title": detail.book.title,
            "book": BookView::new(&detail.book, detail.author.as_ref()),
            "genres": genres,
            "book_instances": instances,
        }),
    )
}

pub async fn book_create_get(State(state): State<AppState>) -> AppResult<Html<String>> {
    let choices = state.services.books.choices().await?;
    render_form("Create Book", &BookForm::default(), &choices, &FormErrors::default())
}

pub async fn book_create_post(
    State(state): State<AppState>,
    CatalogForm(form): CatalogForm<BookForm>,
) -> AppResult<Response> {
    let form = form.sanitize();
    let data = match form.to_data() {
        Ok(data) => data,
        Err(errors) => {
            let choices = state.services.books.choices().await?;
            return Ok(render_form("Create Book", &form, &choices, &errors)?.into_response());
        }
    };
    let book = state.services.books.create(&data).await?;
    Ok(Redirect::to(&book.url()).into_response())
}

pub async fn book_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = entity_id(&id, "Book")?;
    match state.services.books.delete_context(id).await? {
        Some(ctx) => Ok(render_delete(&ctx)?.into_response()),
        None => Ok(Redirect::to("/catalog/books").into_response()),
    }
}

/// Delete the book named in the form body, unless copies of it remain
pub async fn book_delete_post(
    State(state): State<AppState>,
    CatalogForm(form): CatalogForm<DeleteBookForm>,
) -> AppResult<Response> {
    let id = entity_id(&form.bookid, "Book")?;
    match state.services.books.delete(id).await? {
        DeleteOutcome::Blocked(ctx) => Ok(render_delete(&ctx)?.into_response()),
        DeleteOutcome::Deleted | DeleteOutcome::Missing => {
            Ok(Redirect::to("/catalog/books").into_response())
        }
    }
}

pub async fn book_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = entity_id(&id, "Book")?;
    let (book, choices) = state.services.books.edit(id).await?;
    render_form("Update Book", &BookForm::from(&book), &choices, &FormErrors::default())
}

pub async fn book_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CatalogForm(form): CatalogForm<BookForm>,
) -> AppResult<Response> {
    let id = entity_id(&id, "Book")?;
    let form = form.sanitize();
    let data = match form.to_data() {
        Ok(data) => data,
        Err(errors) => {
            let (_, choices) = state.services.books.edit(id).await?;
            return Ok(render_form("Update Book", &form, &choices, &errors)?.into_response());
        }
    };
    let book = state.services.books.update(id, &data).await?;
    Ok(Redirect::to(&book.url()).into_response())
}
