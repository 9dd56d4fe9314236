//! Genre service

use std::sync::Arc;

use uuid::Uuid;

use super::{Created, DeleteOutcome};
use crate::{
    error::{AppError, AppResult},
    models::{Book, Genre, GenreData},
    repository::CatalogStore,
};

#[derive(Debug, Clone, PartialEq)]
pub struct GenreWithBooks {
    pub genre: Genre,
    pub books: Vec<Book>,
}

#[derive(Clone)]
pub struct GenresService {
    store: Arc<dyn CatalogStore>,
}

impl GenresService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.store.list_genres().await
    }

    async fn with_books(&self, id: Uuid) -> AppResult<(Option<Genre>, Vec<Book>)> {
        tokio::try_join!(self.store.get_genre(id), self.store.books_by_genre(id))
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<GenreWithBooks> {
        match self.with_books(id).await? {
            (Some(genre), books) => Ok(GenreWithBooks { genre, books }),
            (None, _) => Err(AppError::NotFound("Genre not found".to_string())),
        }
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Genre> {
        self.store
            .get_genre(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))
    }

    /// Insert unless a genre with exactly this name exists
    pub async fn create(&self, data: &GenreData) -> AppResult<Created<Genre>> {
        if let Some(existing) = self.store.find_genre_by_name(&data.name).await? {
            tracing::info!("Genre create: reusing existing genre id={}", existing.id);
            return Ok(Created::Existing(existing));
        }
        let genre = self.store.insert_genre(data).await?;
        tracing::info!("Genre create: inserted id={}", genre.id);
        Ok(Created::Inserted(genre))
    }

    pub async fn update(&self, id: Uuid, data: &GenreData) -> AppResult<Genre> {
        let genre = self
            .store
            .replace_genre(id, data)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
        tracing::info!("Genre update: id={}", id);
        Ok(genre)
    }

    pub async fn delete_context(&self, id: Uuid) -> AppResult<Option<GenreWithBooks>> {
        let (genre, books) = self.with_books(id).await?;
        Ok(genre.map(|genre| GenreWithBooks { genre, books }))
    }

    /// Delete only when no book is filed under the genre
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<GenreWithBooks>> {
        let (genre, books) = self.with_books(id).await?;
        let Some(genre) = genre else {
            return Ok(DeleteOutcome::Missing);
        };
        if !books.is_empty() {
            tracing::info!(
                "Genre delete refused: id={} still has {} book(s)",
                id,
                books.len()
            );
            return Ok(DeleteOutcome::Blocked(GenreWithBooks { genre, books }));
        }
        if self.store.delete_genre(id).await? {
            tracing::info!("Genre delete: id={}", id);
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::Missing)
        }
    }
}
