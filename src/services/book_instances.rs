//! Book instance (copy) service

use std::{collections::HashMap, sync::Arc};

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookInstance, BookInstanceData},
    repository::CatalogStore,
};

/// A copy with its book reference resolved
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceWithBook {
    pub instance: BookInstance,
    pub book: Option<Book>,
}

#[derive(Clone)]
pub struct BookInstancesService {
    store: Arc<dyn CatalogStore>,
}

impl BookInstancesService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<InstanceWithBook>> {
        let (instances, books) =
            tokio::try_join!(self.store.list_instances(), self.store.list_books())?;
        let by_id: HashMap<Uuid, Book> = books.into_iter().map(|b| (b.id, b)).collect();
        Ok(instances
            .into_iter()
            .map(|instance| {
                let book = by_id.get(&instance.book_id).cloned();
                InstanceWithBook { instance, book }
            })
            .collect())
    }

    async fn find(&self, id: Uuid) -> AppResult<Option<InstanceWithBook>> {
        let Some(instance) = self.store.get_instance(id).await? else {
            return Ok(None);
        };
        let book = self.store.get_book(instance.book_id).await?;
        Ok(Some(InstanceWithBook { instance, book }))
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<InstanceWithBook> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))
    }

    /// Books to choose from on the copy form, by title
    pub async fn choices(&self) -> AppResult<Vec<Book>> {
        self.store.list_books().await
    }

    pub async fn edit(&self, id: Uuid) -> AppResult<(BookInstance, Vec<Book>)> {
        let (instance, books) =
            tokio::try_join!(self.store.get_instance(id), self.store.list_books())?;
        let instance =
            instance.ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;
        Ok((instance, books))
    }

    pub async fn create(&self, data: &BookInstanceData) -> AppResult<BookInstance> {
        let instance = self.store.insert_instance(data).await?;
        tracing::info!(
            "Book copy create: inserted id={} for book id={}",
            instance.id,
            instance.book_id
        );
        Ok(instance)
    }

    pub async fn update(&self, id: Uuid, data: &BookInstanceData) -> AppResult<BookInstance> {
        let instance = self
            .store
            .replace_instance(id, data)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;
        tracing::info!("Book copy update: id={} status={}", id, instance.status);
        Ok(instance)
    }

    pub async fn delete_context(&self, id: Uuid) -> AppResult<Option<InstanceWithBook>> {
        self.find(id).await
    }

    /// Copies have no dependents; removal is unconditional
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if self.store.delete_instance(id).await? {
            tracing::info!("Book copy delete: id={}", id);
        }
        Ok(())
    }
}
