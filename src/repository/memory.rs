//! In-process document store, used for local runs and tests

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::CatalogStore;
use crate::{
    error::AppResult,
    models::{
        Author, AuthorData, Book, BookData, BookInstance, BookInstanceData, Genre, GenreData,
        InstanceStatus,
    },
};

#[derive(Default)]
struct Collections {
    authors: HashMap<Uuid, Author>,
    genres: HashMap<Uuid, Genre>,
    books: HashMap<Uuid, Book>,
    instances: HashMap<Uuid, BookInstance>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_authors<'a>(it: impl Iterator<Item = &'a Author>) -> Vec<Author> {
    let mut out: Vec<Author> = it.cloned().collect();
    out.sort_by(|a, b| {
        (&a.family_name, &a.first_name).cmp(&(&b.family_name, &b.first_name))
    });
    out
}

fn sorted_genres<'a>(it: impl Iterator<Item = &'a Genre>) -> Vec<Genre> {
    let mut out: Vec<Genre> = it.cloned().collect();
    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

fn sorted_books<'a>(it: impl Iterator<Item = &'a Book>) -> Vec<Book> {
    let mut out: Vec<Book> = it.cloned().collect();
    out.sort_by(|a, b| a.title.cmp(&b.title));
    out
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        let db = self.inner.read().await;
        Ok(sorted_authors(db.authors.values()))
    }

    async fn get_author(&self, id: Uuid) -> AppResult<Option<Author>> {
        Ok(self.inner.read().await.authors.get(&id).cloned())
    }

    async fn find_author_by_name(
        &self,
        first_name: &str,
        family_name: &str,
    ) -> AppResult<Option<Author>> {
        let db = self.inner.read().await;
        Ok(db
            .authors
            .values()
            .find(|a| a.first_name == first_name && a.family_name == family_name)
            .cloned())
    }

    async fn insert_author(&self, data: &AuthorData) -> AppResult<Author> {
        let author = Author::from_data(Uuid::new_v4(), data.clone());
        self.inner
            .write()
            .await
            .authors
            .insert(author.id, author.clone());
        Ok(author)
    }

    async fn replace_author(&self, id: Uuid, data: &AuthorData) -> AppResult<Option<Author>> {
        let mut db = self.inner.write().await;
        Ok(db.authors.get_mut(&id).map(|slot| {
            *slot = Author::from_data(id, data.clone());
            slot.clone()
        }))
    }

    async fn delete_author(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.inner.write().await.authors.remove(&id).is_some())
    }

    async fn count_authors(&self) -> AppResult<i64> {
        Ok(self.inner.read().await.authors.len() as i64)
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        let db = self.inner.read().await;
        Ok(sorted_genres(db.genres.values()))
    }

    async fn get_genre(&self, id: Uuid) -> AppResult<Option<Genre>> {
        Ok(self.inner.read().await.genres.get(&id).cloned())
    }

    async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let db = self.inner.read().await;
        Ok(db.genres.values().find(|g| g.name == name).cloned())
    }

    async fn genres_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        let db = self.inner.read().await;
        Ok(sorted_genres(ids.iter().filter_map(|id| db.genres.get(id))))
    }

    async fn insert_genre(&self, data: &GenreData) -> AppResult<Genre> {
        let genre = Genre {
            id: Uuid::new_v4(),
            name: data.name.clone(),
        };
        self.inner
            .write()
            .await
            .genres
            .insert(genre.id, genre.clone());
        Ok(genre)
    }

    async fn replace_genre(&self, id: Uuid, data: &GenreData) -> AppResult<Option<Genre>> {
        let mut db = self.inner.write().await;
        Ok(db.genres.get_mut(&id).map(|slot| {
            slot.name = data.name.clone();
            slot.clone()
        }))
    }

    async fn delete_genre(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.inner.write().await.genres.remove(&id).is_some())
    }

    async fn count_genres(&self) -> AppResult<i64> {
        Ok(self.inner.read().await.genres.len() as i64)
    }

    async fn list_books(&self) -> AppResult<Vec<Book>> {
        let db = self.inner.read().await;
        Ok(sorted_books(db.books.values()))
    }

    async fn get_book(&self, id: Uuid) -> AppResult<Option<Book>> {
        Ok(self.inner.read().await.books.get(&id).cloned())
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let db = self.inner.read().await;
        Ok(sorted_books(
            db.books.values().filter(|b| b.author_id == author_id),
        ))
    }

    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        let db = self.inner.read().await;
        Ok(sorted_books(
            db.books.values().filter(|b| b.genre_ids.contains(&genre_id)),
        ))
    }

    async fn insert_book(&self, data: &BookData) -> AppResult<Book> {
        let book = Book::from_data(Uuid::new_v4(), data.clone());
        self.inner.write().await.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn replace_book(&self, id: Uuid, data: &BookData) -> AppResult<Option<Book>> {
        let mut db = self.inner.write().await;
        Ok(db.books.get_mut(&id).map(|slot| {
            *slot = Book::from_data(id, data.clone());
            slot.clone()
        }))
    }

    async fn delete_book(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.inner.write().await.books.remove(&id).is_some())
    }

    async fn count_books(&self) -> AppResult<i64> {
        Ok(self.inner.read().await.books.len() as i64)
    }

    async fn list_instances(&self) -> AppResult<Vec<BookInstance>> {
        let db = self.inner.read().await;
        let mut out: Vec<BookInstance> = db.instances.values().cloned().collect();
        out.sort_by(|a, b| {
            let title_a = db.books.get(&a.book_id).map(|book| book.title.as_str());
            let title_b = db.books.get(&b.book_id).map(|book| book.title.as_str());
            (title_a, &a.imprint).cmp(&(title_b, &b.imprint))
        });
        Ok(out)
    }

    async fn get_instance(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        Ok(self.inner.read().await.instances.get(&id).cloned())
    }

    async fn instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let db = self.inner.read().await;
        let mut out: Vec<BookInstance> = db
            .instances
            .values()
            .filter(|i| i.book_id == book_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.imprint.cmp(&b.imprint));
        Ok(out)
    }

    async fn insert_instance(&self, data: &BookInstanceData) -> AppResult<BookInstance> {
        let instance = BookInstance::from_data(Uuid::new_v4(), data.clone());
        self.inner
            .write()
            .await
            .instances
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn replace_instance(
        &self,
        id: Uuid,
        data: &BookInstanceData,
    ) -> AppResult<Option<BookInstance>> {
        let mut db = self.inner.write().await;
        Ok(db.instances.get_mut(&id).map(|slot| {
            *slot = BookInstance::from_data(id, data.clone());
            slot.clone()
        }))
    }

    async fn delete_instance(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.inner.write().await.instances.remove(&id).is_some())
    }

    async fn count_instances(&self, status: Option<InstanceStatus>) -> AppResult<i64> {
        let db = self.inner.read().await;
        let count = match status {
            Some(status) => db.instances.values().filter(|i| i.status == status).count(),
            None => db.instances.len(),
        };
        Ok(count as i64)
    }
}
