//! Repository layer: document-store abstraction and its implementations

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod memory;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        Author, AuthorData, Book, BookData, BookInstance, BookInstanceData, Genre, GenreData,
        InstanceStatus,
    },
};

pub use memory::MemoryStore;

/// Storage operations over the four catalog collections.
///
/// Lookups by identity return `None` when the document is missing; only
/// genuine storage failures are errors. Listings are sorted: authors by
/// family then first name, genres by name, books by title, instances by
/// book then imprint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_authors(&self) -> AppResult<Vec<Author>>;
    async fn get_author(&self, id: Uuid) -> AppResult<Option<Author>>;
    async fn find_author_by_name(
        &self,
        first_name: &str,
        family_name: &str,
    ) -> AppResult<Option<Author>>;
    async fn insert_author(&self, data: &AuthorData) -> AppResult<Author>;
    /// Replace every field of an existing author. `None` if it does not exist.
    async fn replace_author(&self, id: Uuid, data: &AuthorData) -> AppResult<Option<Author>>;
    async fn delete_author(&self, id: Uuid) -> AppResult<bool>;
    async fn count_authors(&self) -> AppResult<i64>;

    async fn list_genres(&self) -> AppResult<Vec<Genre>>;
    async fn get_genre(&self, id: Uuid) -> AppResult<Option<Genre>>;
    async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>>;
    /// Genres among `ids`, sorted by name. Unknown ids are skipped.
    async fn genres_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>>;
    async fn insert_genre(&self, data: &GenreData) -> AppResult<Genre>;
    async fn replace_genre(&self, id: Uuid, data: &GenreData) -> AppResult<Option<Genre>>;
    async fn delete_genre(&self, id: Uuid) -> AppResult<bool>;
    async fn count_genres(&self) -> AppResult<i64>;

    async fn list_books(&self) -> AppResult<Vec<Book>>;
    async fn get_book(&self, id: Uuid) -> AppResult<Option<Book>>;
    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>>;
    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>>;
    async fn insert_book(&self, data: &BookData) -> AppResult<Book>;
    async fn replace_book(&self, id: Uuid, data: &BookData) -> AppResult<Option<Book>>;
    async fn delete_book(&self, id: Uuid) -> AppResult<bool>;
    async fn count_books(&self) -> AppResult<i64>;

    async fn list_instances(&self) -> AppResult<Vec<BookInstance>>;
    async fn get_instance(&self, id: Uuid) -> AppResult<Option<BookInstance>>;
    async fn instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>>;
    async fn insert_instance(&self, data: &BookInstanceData) -> AppResult<BookInstance>;
    async fn replace_instance(
        &self,
        id: Uuid,
        data: &BookInstanceData,
    ) -> AppResult<Option<BookInstance>>;
    async fn delete_instance(&self, id: Uuid) -> AppResult<bool>;
    /// Count copies, optionally only those with the given status
    async fn count_instances(&self, status: Option<InstanceStatus>) -> AppResult<i64>;
}

/// PostgreSQL-backed store holding the connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.authors_list().await
    }

    async fn get_author(&self, id: Uuid) -> AppResult<Option<Author>> {
        self.authors_get_by_id(id).await
    }

    async fn find_author_by_name(
        &self,
        first_name: &str,
        family_name: &str,
    ) -> AppResult<Option<Author>> {
        self.authors_find_by_name(first_name, family_name).await
    }

    async fn insert_author(&self, data: &AuthorData) -> AppResult<Author> {
        self.authors_create(data).await
    }

    async fn replace_author(&self, id: Uuid, data: &AuthorData) -> AppResult<Option<Author>> {
        self.authors_update(id, data).await
    }

    async fn delete_author(&self, id: Uuid) -> AppResult<bool> {
        self.authors_delete(id).await
    }

    async fn count_authors(&self) -> AppResult<i64> {
        self.authors_count().await
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.genres_list().await
    }

    async fn get_genre(&self, id: Uuid) -> AppResult<Option<Genre>> {
        self.genres_get_by_id(id).await
    }

    async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        self.genres_find_by_name(name).await
    }

    async fn genres_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        self.genres_get_many(ids).await
    }

    async fn insert_genre(&self, data: &GenreData) -> AppResult<Genre> {
        self.genres_create(data).await
    }

    async fn replace_genre(&self, id: Uuid, data: &GenreData) -> AppResult<Option<Genre>> {
        self.genres_update(id, data).await
    }

    async fn delete_genre(&self, id: Uuid) -> AppResult<bool> {
        self.genres_delete(id).await
    }

    async fn count_genres(&self) -> AppResult<i64> {
        self.genres_count().await
    }

    async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.books_list().await
    }

    async fn get_book(&self, id: Uuid) -> AppResult<Option<Book>> {
        self.books_get_by_id(id).await
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        self.books_for_author(author_id).await
    }

    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        self.books_for_genre(genre_id).await
    }

    async fn insert_book(&self, data: &BookData) -> AppResult<Book> {
        self.books_create(data).await
    }

    async fn replace_book(&self, id: Uuid, data: &BookData) -> AppResult<Option<Book>> {
        self.books_update(id, data).await
    }

    async fn delete_book(&self, id: Uuid) -> AppResult<bool> {
        self.books_delete(id).await
    }

    async fn count_books(&self) -> AppResult<i64> {
        self.books_count().await
    }

    async fn list_instances(&self) -> AppResult<Vec<BookInstance>> {
        self.instances_list().await
    }

    async fn get_instance(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        self.instances_get_by_id(id).await
    }

    async fn instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        self.instances_for_book(book_id).await
    }

    async fn insert_instance(&self, data: &BookInstanceData) -> AppResult<BookInstance> {
        self.instances_create(data).await
    }

    async fn replace_instance(
        &self,
        id: Uuid,
        data: &BookInstanceData,
    ) -> AppResult<Option<BookInstance>> {
        self.instances_update(id, data).await
    }

    async fn delete_instance(&self, id: Uuid) -> AppResult<bool> {
        self.instances_delete(id).await
    }

    async fn count_instances(&self, status: Option<InstanceStatus>) -> AppResult<i64> {
        self.instances_count(status).await
    }
}
