//! Author service

use std::sync::Arc;

use uuid::Uuid;

use super::{Created, DeleteOutcome};
use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorData, Book},
    repository::CatalogStore,
};

/// An author together with the books that reference it
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorWithBooks {
    pub author: Author,
    pub books: Vec<Book>,
}

#[derive(Clone)]
pub struct AuthorsService {
    store: Arc<dyn CatalogStore>,
}

impl AuthorsService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.store.list_authors().await
    }

    async fn with_books(&self, id: Uuid) -> AppResult<(Option<Author>, Vec<Book>)> {
        tokio::try_join!(self.store.get_author(id), self.store.books_by_author(id))
    }

    /// Author and its books; NotFound when the author does not exist
    pub async fn detail(&self, id: Uuid) -> AppResult<AuthorWithBooks> {
        match self.with_books(id).await? {
            (Some(author), books) => Ok(AuthorWithBooks { author, books }),
            (None, _) => Err(AppError::NotFound("Author not found".to_string())),
        }
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Author> {
        self.store
            .get_author(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))
    }

    /// Insert unless an author with the same first and family name exists
    pub async fn create(&self, data: &AuthorData) -> AppResult<Created<Author>> {
        if let Some(existing) = self
            .store
            .find_author_by_name(&data.first_name, &data.family_name)
            .await?
        {
            tracing::info!("Author create: reusing existing author id={}", existing.id);
            return Ok(Created::Existing(existing));
        }
        let author = self.store.insert_author(data).await?;
        tracing::info!("Author create: inserted id={}", author.id);
        Ok(Created::Inserted(author))
    }

    pub async fn update(&self, id: Uuid, data: &AuthorData) -> AppResult<Author> {
        let author = self
            .store
            .replace_author(id, data)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
        tracing::info!("Author update: id={}", id);
        Ok(author)
    }

    /// Data for the delete confirmation page; `None` if the author is gone
    pub async fn delete_context(&self, id: Uuid) -> AppResult<Option<AuthorWithBooks>> {
        let (author, books) = self.with_books(id).await?;
        Ok(author.map(|author| AuthorWithBooks { author, books }))
    }

    /// Delete only when no book references the author
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<AuthorWithBooks>> {
        let (author, books) = self.with_books(id).await?;
        let Some(author) = author else {
            return Ok(DeleteOutcome::Missing);
        };
        if !books.is_empty() {
            tracing::info!(
                "Author delete refused: id={} still has {} book(s)",
                id,
                books.len()
            );
            return Ok(DeleteOutcome::Blocked(AuthorWithBooks { author, books }));
        }
        if self.store.delete_author(id).await? {
            tracing::info!("Author delete: id={}", id);
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::Missing)
        }
    }
}
