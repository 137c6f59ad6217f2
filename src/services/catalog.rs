//! Book catalog service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookQuery, CreateBook, UpdateBook},
        pagination::PaginatedResponse,
    },
    repository::BookStore,
};

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn BookStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// Create a new book
    pub async fn create_book(&self, data: &CreateBook) -> AppResult<Book> {
        data.validate()?;
        let book = self.store.create(data).await?;
        tracing::info!("Book created: id={} title={:?}", book.id(), book.title);
        Ok(book)
    }

    /// List books matching the query, one page at a time
    pub async fn list_books(&self, query: &BookQuery) -> AppResult<PaginatedResponse<Book>> {
        query.validate()?;
        let filter = query.filter();
        let params = query.page_params();

        let total = self.store.count(&filter).await?;
        let window = params.window(total);
        let items = self.store.list(&filter, window.skip, window.limit).await?;

        Ok(PaginatedResponse::new(items, total, params))
    }

    /// Get an active book by ID
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.store.get(id).await
    }

    /// Apply a partial update to an active book
    pub async fn update_book(&self, id: i32, data: &UpdateBook) -> AppResult<Book> {
        data.validate()?;
        let book = self.store.update(id, data).await?;
        tracing::info!("Book updated: id={}", id);
        Ok(book)
    }

    /// Soft delete an active book
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.store.soft_delete(id).await?;
        tracing::info!("Book soft-deleted: id={}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        models::{book::BookFilter, record::Record},
        repository::books::MockBookStore,
    };
    use chrono::Utc;

    fn sample_book(id: i32, title: &str, author: &str) -> Book {
        let now = Utc::now();
        Book {
            record: Record {
                id,
                created_at: now,
                updated_at: now,
                is_active: true,
            },
            title: title.to_string(),
            author: author.to_string(),
            source_url: "https://example.com".to_string(),
            curation_status: "pending".to_string(),
        }
    }

    fn service(store: MockBookStore) -> CatalogService {
        CatalogService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn create_rejects_invalid_input_before_reaching_store() {
        // No expectations: any store call would panic.
        let catalog = service(MockBookStore::new());
        let data = CreateBook {
            title: String::new(),
            author: "Jane Doe".to_string(),
            source_url: "https://example.com".to_string(),
        };

        let err = catalog.create_book(&data).await.unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("title"), "{}", msg),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn create_returns_persisted_record() {
        let mut store = MockBookStore::new();
        store
            .expect_create()
            .times(1)
            .returning(|data| Ok(sample_book(1, &data.title, &data.author)));

        let data = CreateBook {
            title: "Clean Code".to_string(),
            author: "Robert C. Martin".to_string(),
            source_url: "https://example.com".to_string(),
        };
        let book = service(store).create_book(&data).await.unwrap();
        assert_eq!(book.id(), 1);
        assert_eq!(book.title, "Clean Code");
        assert_eq!(book.curation_status, "pending");
    }

    #[tokio::test]
    async fn list_translates_page_into_skip_and_limit() {
        let mut store = MockBookStore::new();
        store
            .expect_count()
            .withf(|filter: &BookFilter| filter.search.as_deref() == Some("prag") && filter.is_active)
            .times(1)
            .returning(|_| Ok(12));
        store
            .expect_list()
            .withf(|_, skip: &i64, limit: &i64| *skip == 5 && *limit == 5)
            .times(1)
            .returning(|_, _, _| {
                Ok((6..=10)
                    .map(|id| sample_book(id, "The Pragmatic Programmer", "Andrew Hunt"))
                    .collect())
            });

        let query = BookQuery {
            search: Some("prag".to_string()),
            page: 2,
            size: 5,
            ..Default::default()
        };
        let page = service(store).list_books(&query).await.unwrap();
        assert_eq!(page.total, 12);
        assert_eq!(page.page, 2);
        assert_eq!(page.size, 5);
        assert_eq!(page.pages, 3);
        assert_eq!(page.items.len(), 5);
    }

    #[tokio::test]
    async fn list_of_empty_catalog_has_zero_pages() {
        let mut store = MockBookStore::new();
        store.expect_count().returning(|_| Ok(0));
        store
            .expect_list()
            .withf(|_, skip: &i64, limit: &i64| *skip == 0 && *limit == 10)
            .returning(|_, _, _| Ok(vec![]));

        let page = service(store)
            .list_books(&BookQuery::default())
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.pages, 0);
    }

    #[tokio::test]
    async fn list_rejects_oversized_page() {
        let catalog = service(MockBookStore::new());
        let query = BookQuery {
            size: 101,
            ..Default::default()
        };
        assert!(matches!(
            catalog.list_books(&query).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn list_rejects_page_beyond_addressable_offset() {
        // No expectations: the store must not be counted or listed.
        let catalog = service(MockBookStore::new());
        let query = BookQuery {
            page: i64::MAX,
            ..Default::default()
        };
        match catalog.list_books(&query).await {
            Err(AppError::Validation(msg)) => assert!(msg.contains("page"), "{}", msg),
            other => panic!("unexpected result {:?}", other.map(|p| p.total)),
        }
    }

    #[tokio::test]
    async fn update_propagates_not_found() {
        let mut store = MockBookStore::new();
        store
            .expect_update()
            .returning(|id, _| Err(AppError::NotFound(format!("Book {} not found", id))));

        let data = UpdateBook {
            curation_status: Some("approved".to_string()),
            ..Default::default()
        };
        let err = service(store).update_book(42, &data).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Book 42 not found"));
    }

    #[tokio::test]
    async fn update_rejects_invalid_patch_before_reaching_store() {
        let catalog = service(MockBookStore::new());
        let data = UpdateBook {
            source_url: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            catalog.update_book(1, &data).await,
            Err(AppError::Validation(msg)) if msg.contains("source_url")
        ));
    }

    #[tokio::test]
    async fn delete_then_get_reports_not_found() {
        let mut store = MockBookStore::new();
        store.expect_soft_delete().times(1).returning(|_| Ok(()));
        store
            .expect_get()
            .returning(|id| Err(AppError::NotFound(format!("Book {} not found", id))));

        let catalog = service(store);
        catalog.delete_book(3).await.unwrap();
        assert!(matches!(
            catalog.get_book(3).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn storage_failures_surface_unchanged() {
        let mut store = MockBookStore::new();
        store
            .expect_get()
            .returning(|_| Err(AppError::StorageUnavailable(sqlx::Error::PoolTimedOut)));

        let err = service(store).get_book(1).await.unwrap_err();
        assert!(err.is_connectivity());
    }
}
