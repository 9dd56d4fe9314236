//! Book copy pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_json::json;

use super::{entity_id, CatalogForm};
use crate::{
    error::AppResult,
    models::{Book, BookInstanceForm, FormErrors},
    views::{self, book_choices, status_choices, BookInstanceView},
    AppState,
};

#[derive(Deserialize)]
pub struct DeleteBookInstanceForm {
    #[serde(default)]
    pub instanceid: String,
}

fn render_form(
    title: &str,
    form: &BookInstanceForm,
    books: &[Book],
    errors: &FormErrors,
) -> AppResult<Html<String>> {
    views::render(
        "bookinstance_form",
        &json!({
            "title": title,
            "bookinstance": form,
            "book_list": book_choices(books, &form.book),
            "statuses": status_choices(&form.status),
            "errors": errors,
        }),
    )
}

pub async fn bookinstance_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let instances = state.services.book_instances.list().await?;
    let list: Vec<BookInstanceView> = instances
        .iter()
        .map(|entry| BookInstanceView::new(&entry.instance, entry.book.as_ref()))
        .collect();
    views::render(
        "bookinstance_list",
        &json!({ "title": "Book Instance List", "bookinstance_list": list }),
    )
}

pub async fn bookinstance_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = entity_id(&id, "Book copy")?;
    let detail = state.services.book_instances.detail(id).await?;
    views::render(
        "bookinstance_detail",
        &json!({
            "title": "Book",
            "bookinstance": BookInstanceView::new(&detail.instance, detail.book.as_ref()),
        }),
    )
}

pub async fn bookinstance_create_get(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.book_instances.choices().await?;
    render_form(
        "Create BookInstance",
        &BookInstanceForm::default(),
        &books,
        &FormErrors::default(),
    )
}

pub async fn bookinstance_create_post(
    State(state): State<AppState>,
    CatalogForm(form): CatalogForm<BookInstanceForm>,
) -> AppResult<Response> {
    let form = form.sanitize();
    let data = match form.to_data() {
        Ok(data) => data,
        Err(errors) => {
            let books = state.services.book_instances.choices().await?;
            return Ok(render_form("Create BookInstance", &form, &books, &errors)?.into_response());
        }
    };
    let instance = state.services.book_instances.create(&data).await?;
    Ok(Redirect::to(&instance.url()).into_response())
}

pub async fn bookinstance_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = entity_id(&id, "Book copy")?;
    match state.services.book_instances.delete_context(id).await? {
        Some(ctx) => Ok(views::render(
            "bookinstance_delete",
            &json!({
                "title": "Delete BookInstance",
                "bookinstance": BookInstanceView::new(&ctx.instance, ctx.book.as_ref()),
            }),
        )?
        .into_response()),
        None => Ok(Redirect::to("/catalog/bookinstances").into_response()),
    }
}

/// Copies have no dependents; the delete always goes through
pub async fn bookinstance_delete_post(
    State(state): State<AppState>,
    CatalogForm(form): CatalogForm<DeleteBookInstanceForm>,
) -> AppResult<Response> {
    let id = entity_id(&form.instanceid, "Book copy")?;
    state.services.book_instances.delete(id).await?;
    Ok(Redirect::to("/catalog/bookinstances").into_response())
}

pub async fn bookinstance_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = entity_id(&id, "Book copy")?;
    let (instance, books) = state.services.book_instances.edit(id).await?;
    render_form(
        "Update BookInstance",
        &BookInstanceForm::from(&instance),
        &books,
        &FormErrors::default(),
    )
}

pub async fn bookinstance_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CatalogForm(form): CatalogForm<BookInstanceForm>,
) -> AppResult<Response> {
    let id = entity_id(&id, "Book copy")?;
    let form = form.sanitize();
    let data = match form.to_data() {
        Ok(data) => data,
        Err(errors) => {
            let (_, books) = state.services.book_instances.edit(id).await?;
            return Ok(render_form("Update BookInstance", &form, &books, &errors)?.into_response());
        }
    };
    let instance = state.services.book_instances.update(id, &data).await?;
    Ok(Redirect::to(&instance.url()).into_response())
}
