//! Business logic services

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod stats;

use std::sync::Arc;

use crate::repository::CatalogStore;

/// Result of a create that checks a natural key first
#[derive(Debug, Clone, PartialEq)]
pub enum Created<T> {
    /// A new document was inserted
    Inserted(T),
    /// A document with the same natural key already existed; nothing was inserted
    Existing(T),
}

impl<T> Created<T> {
    pub fn into_inner(self) -> T {
        match self {
            Created::Inserted(v) | Created::Existing(v) => v,
        }
    }
}

/// Result of a delete submission
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome<T> {
    Deleted,
    /// Nothing to delete under that identity
    Missing,
    /// Dependents still reference the document; it was kept
    Blocked(T),
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub genres: genres::GenresService,
    pub book_instances: book_instances::BookInstancesService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services over the given store
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            authors: authors::AuthorsService::new(store.clone()),
            books: books::BooksService::new(store.clone()),
            genres: genres::GenresService::new(store.clone()),
            book_instances: book_instances::BookInstancesService::new(store.clone()),
            stats: stats::StatsService::new(store),
        }
    }
}
