//! HTTP handlers for the catalog pages

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod home;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    response::Redirect,
    routing::get,
    Router,
};
use axum_extra::extract::Form;
use serde::de::DeserializeOwned;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::form::parse_id,
    AppState,
};

/// Parse an identity taken from the URL or a form body. Anything that is
/// not an identity cannot name an existing document.
pub(crate) fn entity_id(raw: &str, entity: &str) -> AppResult<Uuid> {
    parse_id(raw).ok_or_else(|| AppError::NotFound(format!("{} not found", entity)))
}

/// URL-encoded form body. Repeated keys collect into a `Vec`, and a body
/// that cannot be decoded is a bad request rendered by the error view.
pub struct CatalogForm<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for CatalogForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        Ok(CatalogForm(value))
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/catalog") }))
        .route("/catalog", get(home::index))
        .route("/catalog/", get(home::index))
        // Books
        .route("/catalog/book/create", get(books::book_create_get).post(books::book_create_post))
        .route("/catalog/books", get(books::book_list))
        .route("/catalog/book/:id", get(books::book_detail))
        .route("/catalog/book/:id/delete", get(books::book_delete_get).post(books::book_delete_post))
        .route("/catalog/book/:id/update", get(books::book_update_get).post(books::book_update_post))
        // Authors
        .route("/catalog/author/create", get(authors::author_create_get).post(authors::author_create_post))
        .route("/catalog/authors", get(authors::author_list))
        .route("/catalog/author/:id", get(authors::author_detail))
        .route("/catalog/author/:id/delete", get(authors::author_delete_get).post(authors::author_delete_post))
        .route("/catalog/author/:id/update", get(authors::author_update_get).post(authors::author_update_post))
        // Genres
        .route("/catalog/genre/create", get(genres::genre_create_get).post(genres::genre_create_post))
        .route("/catalog/genres", get(genres::genre_list))
        .route("/catalog/genre/:id", get(genres::genre_detail))
        .route("/catalog/genre/:id/delete", get(genres::genre_delete_get).post(genres::genre_delete_post))
        .route("/catalog/genre/:id/update", get(genres::genre_update_get).post(genres::genre_update_post))
        // Book instances
        .route(
            "/catalog/bookinstance/create",
            get(book_instances::bookinstance_create_get).post(book_instances::bookinstance_create_post),
        )
        .route("/catalog/bookinstances", get(book_instances::bookinstance_list))
        .route("/catalog/bookinstance/:id", get(book_instances::bookinstance_detail))
        .route(
            "/catalog/bookinstance/:id/delete",
            get(book_instances::bookinstance_delete_get).post(book_instances::bookinstance_delete_post),
        )
        .route(
            "/catalog/bookinstance/:id/update",
            get(book_instances::bookinstance_update_get).post(book_instances::bookinstance_update_post),
        )
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
