//! Book service, including the form choice lists

use std::{collections::HashMap, sync::Arc};

use uuid::Uuid;

use super::DeleteOutcome;
use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, BookData, BookInstance, Genre},
    repository::CatalogStore,
};

/// A book with its author reference resolved
#[derive(Debug, Clone, PartialEq)]
pub struct BookWithAuthor {
    pub book: Book,
    pub author: Option<Author>,
}

/// Book with author, genres and copies
#[derive(Debug, Clone, PartialEq)]
pub struct BookDetail {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookWithInstances {
    pub book: Book,
    pub instances: Vec<BookInstance>,
}

/// Every author and genre, to drive the book form selections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookChoices {
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
}

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn CatalogStore>,
}

impl BooksService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// All books by title, each with its author
    pub async fn list(&self) -> AppResult<Vec<BookWithAuthor>> {
        let (books, authors) = tokio::try_join!(self.store.list_books(), self.store.list_authors())?;
        let by_id: HashMap<Uuid, Author> = authors.into_iter().map(|a| (a.id, a)).collect();
        Ok(books
            .into_iter()
            .map(|book| {
                let author = by_id.get(&book.author_id).cloned();
                BookWithAuthor { book, author }
            })
            .collect())
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<BookDetail> {
        let (book, instances) =
            tokio::try_join!(self.store.get_book(id), self.store.instances_by_book(id))?;
        let book = book.ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        let (author, genres) = tokio::try_join!(
            self.store.get_author(book.author_id),
            self.store.genres_by_ids(&book.genre_ids)
        )?;
        Ok(BookDetail {
            book,
            author,
            genres,
            instances,
        })
    }

    pub async fn choices(&self) -> AppResult<BookChoices> {
        let (authors, genres) =
            tokio::try_join!(self.store.list_authors(), self.store.list_genres())?;
        Ok(BookChoices { authors, genres })
    }

    /// The stored book plus choice lists for the edit form
    pub async fn edit(&self, id: Uuid) -> AppResult<(Book, BookChoices)> {
        let (book, authors, genres) = tokio::try_join!(
            self.store.get_book(id),
            self.store.list_authors(),
            self.store.list_genres()
        )?;
        let book = book.ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        Ok((book, BookChoices { authors, genres }))
    }

    /// Books are not de-duplicated; every valid submission is inserted
    pub async fn create(&self, data: &BookData) -> AppResult<Book> {
        let book = self.store.insert_book(data).await?;
        tracing::info!("Book create: inserted id={}", book.id);
        Ok(book)
    }

    pub async fn update(&self, id: Uuid, data: &BookData) -> AppResult<Book> {
        let book = self
            .store
            .replace_book(id, data)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        tracing::info!("Book update: id={}", id);
        Ok(book)
    }

    async fn with_instances(&self, id: Uuid) -> AppResult<(Option<Book>, Vec<BookInstance>)> {
        tokio::try_join!(self.store.get_book(id), self.store.instances_by_book(id))
    }

    pub async fn delete_context(&self, id: Uuid) -> AppResult<Option<BookWithInstances>> {
        let (book, instances) = self.with_instances(id).await?;
        Ok(book.map(|book| BookWithInstances { book, instances }))
    }

    /// Delete only when no copy of the book exists
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<BookWithInstances>> {
        let (book, instances) = self.with_instances(id).await?;
        let Some(book) = book else {
            return Ok(DeleteOutcome::Missing);
        };
        if !instances.is_empty() {
            tracing::info!(
                "Book delete refused: id={} still has {} copy(ies)",
                id,
                instances.len()
            );
            return Ok(DeleteOutcome::Blocked(BookWithInstances { book, instances }));
        }
        if self.store.delete_book(id).await? {
            tracing::info!("Book delete: id={}", id);
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::Missing)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCatalogStore;

    fn book(id: Uuid, author_id: Uuid, genre_ids: Vec<Uuid>) -> Book {
        Book {
            id,
            title: "Foundation".to_string(),
            author_id,
            summary: "Psychohistory".to_string(),
            isbn: "9780553293357".to_string(),
            genre_ids,
        }
    }

    #[tokio::test]
    async fn test_detail_resolves_references() {
        let id = Uuid::new_v4();
        let author_id = Uuid::new_v4();
        let genre_id = Uuid::new_v4();

        let mut store = MockCatalogStore::new();
        store
            .expect_get_book()
            .returning(move |_| Ok(Some(book(id, author_id, vec![genre_id]))));
        store.expect_instances_by_book().returning(|_| Ok(vec![]));
        store.expect_get_author().returning(move |aid| {
            Ok(Some(Author {
                id: aid,
                first_name: "Isaac".to_string(),
                family_name: "Asimov".to_string(),
                date_of_birth: None,
                date_of_death: None,
            }))
        });
        store.expect_genres_by_ids().returning(|ids| {
            Ok(ids
                .iter()
                .map(|gid| Genre {
                    id: *gid,
                    name: "Science Fiction".to_string(),
                })
                .collect())
        });

        let service = BooksService::new(Arc::new(store));
        let detail = service.detail(id).await.unwrap();
        assert_eq!(detail.author.map(|a| a.id), Some(author_id));
        assert_eq!(detail.genres.len(), 1);
        assert_eq!(detail.genres[0].id, genre_id);
        assert!(detail.instances.is_empty());
    }

    #[tokio::test]
    async fn test_edit_missing_book_is_not_found() {
        let mut store = MockCatalogStore::new();
        store.expect_get_book().returning(|_| Ok(None));
        store.expect_list_authors().returning(|| Ok(vec![]));
        store.expect_list_genres().returning(|| Ok(vec![]));

        let service = BooksService::new(Arc::new(store));
        let err = service.edit(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_blocked_by_copies() {
        let id = Uuid::new_v4();
        let mut store = MockCatalogStore::new();
        store
            .expect_get_book()
            .returning(move |_| Ok(Some(book(id, Uuid::new_v4(), vec![]))));
        store.expect_instances_by_book().returning(move |_| {
            Ok(vec![BookInstance {
                id: Uuid::new_v4(),
                book_id: id,
                imprint: "Gnome Press".to_string(),
                status: crate::models::InstanceStatus::Available,
                due_back: None,
            }])
        });
        store.expect_delete_book().never();

        let service = BooksService::new(Arc::new(store));
        assert!(matches!(
            service.delete(id).await.unwrap(),
            DeleteOutcome::Blocked(_)
        ));
    }
}
