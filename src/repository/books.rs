//! Books repository for database operations.
//!
//! Every operation is a single statement, so each one commits atomically in
//! PostgreSQL's implicit transaction. Reads by id, updates and soft deletes
//! only ever see active rows; an inactive book behaves as if it did not exist.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookFilter, CreateBook, UpdateBook, DEFAULT_CURATION_STATUS},
};

/// Storage capability the catalog service depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert a new active book with the default curation status
    async fn create(&self, data: &CreateBook) -> AppResult<Book>;

    /// Books matching `filter`, ordered by id, starting at `skip`
    async fn list(&self, filter: &BookFilter, skip: i64, limit: i64) -> AppResult<Vec<Book>>;

    /// Number of books matching `filter`
    async fn count(&self, filter: &BookFilter) -> AppResult<i64>;

    /// Active book by id
    async fn get(&self, id: i32) -> AppResult<Book>;

    /// Overwrite the fields present in `data` on an active book
    async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<Book>;

    /// Mark an active book as inactive
    async fn soft_delete(&self, id: i32) -> AppResult<()>;
}

/// Keeps `updated_at` strictly increasing even when two writes land within
/// the clock's resolution.
const TOUCH_UPDATED_AT: &str = "updated_at = GREATEST($1, updated_at + INTERVAL '1 microsecond')";

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}

/// Escape LIKE metacharacters and wrap the term for substring matching
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// WHERE clause for `filter`, with the next free placeholder index.
///
/// Placeholders are numbered in the order `bind_filter!` binds them.
fn filter_clause(filter: &BookFilter) -> (String, usize) {
    let mut conditions = vec!["is_active = $1".to_string()];
    let mut idx = 2;

    if filter.curation_status.is_some() {
        conditions.push(format!("curation_status = ${}", idx));
        idx += 1;
    }

    if filter.search.is_some() {
        conditions.push(format!("(title ILIKE ${i} OR author ILIKE ${i})", i = idx));
        idx += 1;
    }

    (conditions.join(" AND "), idx)
}

macro_rules! bind_filter {
    ($builder:expr, $filter:expr) => {{
        let mut builder = $builder.bind($filter.is_active);
        if let Some(ref status) = $filter.curation_status {
            builder = builder.bind(status.clone());
        }
        if let Some(ref search) = $filter.search {
            builder = builder.bind(like_pattern(search));
        }
        builder
    }};
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, source_url, curation_status, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, TRUE, $5, $5)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.source_url)
        .bind(DEFAULT_CURATION_STATUS)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list(&self, filter: &BookFilter, skip: i64, limit: i64) -> AppResult<Vec<Book>> {
        let (where_clause, idx) = filter_clause(filter);
        let query = format!(
            "SELECT * FROM books WHERE {} ORDER BY id LIMIT ${} OFFSET ${}",
            where_clause,
            idx,
            idx + 1
        );

        let rows = bind_filter!(sqlx::query_as::<_, Book>(&query), filter)
            .bind(limit)
            .bind(skip)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn count(&self, filter: &BookFilter) -> AppResult<i64> {
        let (where_clause, _) = filter_clause(filter);
        let query = format!("SELECT COUNT(*) FROM books WHERE {}", where_clause);

        let total: i64 = bind_filter!(sqlx::query_scalar::<_, i64>(&query), filter)
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn get(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1 AND is_active = TRUE")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<Book> {
        let now = Utc::now();
        let mut sets = vec![TOUCH_UPDATED_AT.to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.title, "title");
        add_field!(data.author, "author");
        add_field!(data.source_url, "source_url");
        add_field!(data.curation_status, "curation_status");

        let query = format!(
            "UPDATE books SET {} WHERE id = ${} AND is_active = TRUE RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Book>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.title);
        bind_field!(data.author);
        bind_field!(data.source_url);
        bind_field!(data.curation_status);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn soft_delete(&self, id: i32) -> AppResult<()> {
        let query = format!(
            "UPDATE books SET is_active = FALSE, {} WHERE id = $2 AND is_active = TRUE",
            TOUCH_UPDATED_AT
        );
        let result = sqlx::query(&query)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_only_sees_active_rows() {
        let (clause, next) = filter_clause(&BookFilter::default());
        assert_eq!(clause, "is_active = $1");
        assert_eq!(next, 2);
    }

    #[test]
    fn search_matches_title_or_author_with_one_placeholder() {
        let filter = BookFilter {
            search: Some("prag".to_string()),
            ..Default::default()
        };
        let (clause, next) = filter_clause(&filter);
        assert_eq!(clause, "is_active = $1 AND (title ILIKE $2 OR author ILIKE $2)");
        assert_eq!(next, 3);
    }

    #[test]
    fn placeholders_follow_bind_order() {
        let filter = BookFilter {
            curation_status: Some("approved".to_string()),
            search: Some("doe".to_string()),
            is_active: false,
        };
        let (clause, next) = filter_clause(&filter);
        assert_eq!(
            clause,
            "is_active = $1 AND curation_status = $2 AND (title ILIKE $3 OR author ILIKE $3)"
        );
        assert_eq!(next, 4);
    }

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("prag"), "%prag%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
        assert_eq!(like_pattern(""), "%%");
    }
}
