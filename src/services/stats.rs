//! Statistics service for the catalog home page

use std::sync::Arc;

use serde::Serialize;

use crate::{error::AppResult, models::InstanceStatus, repository::CatalogStore};

/// Home page counts. Each count is independent: a failed one is `None`
/// and the failure is reported in `error`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub book_count: Option<i64>,
    pub bookinstance_count: Option<i64>,
    pub bookinstance_available_count: Option<i64>,
    pub author_count: Option<i64>,
    pub genre_count: Option<i64>,
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct StatsService {
    store: Arc<dyn CatalogStore>,
}

impl StatsService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Fetch all counts concurrently. Never fails as a whole.
    pub async fn counts(&self) -> CatalogCounts {
        let (books, instances, available, authors, genres) = tokio::join!(
            self.store.count_books(),
            self.store.count_instances(None),
            self.store.count_instances(Some(InstanceStatus::Available)),
            self.store.count_authors(),
            self.store.count_genres()
        );

        let mut failures = Vec::new();
        let mut keep = |result: AppResult<i64>| match result {
            Ok(count) => Some(count),
            Err(e) => {
                tracing::error!("Catalog count failed: {}", e);
                failures.push(e.to_string());
                None
            }
        };

        let mut counts = CatalogCounts {
            book_count: keep(books),
            bookinstance_count: keep(instances),
            bookinstance_available_count: keep(available),
            author_count: keep(authors),
            genre_count: keep(genres),
            error: None,
        };
        if !failures.is_empty() {
            counts.error = Some(failures.join("; "));
        }
        counts
    }
}
