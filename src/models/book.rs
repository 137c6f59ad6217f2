//! Book model and its request/query contracts

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::pagination::{default_page, default_size, PageParams, MAX_PAGE};
use super::record::Record;

/// Curation status assigned to every new book.
///
/// Other values (approved, rejected, archived, ...) are accepted as free
/// strings on update and never checked against a closed set.
pub const DEFAULT_CURATION_STATUS: &str = "pending";

/// Book record (DB + API)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub record: Record,
    #[schema(example = "The Pragmatic Programmer")]
    pub title: String,
    #[schema(example = "Andrew Hunt, David Thomas")]
    pub author: String,
    /// URL where the book can be found
    pub source_url: String,
    /// Status of the curation process
    #[schema(example = "pending")]
    pub curation_status: String,
}

impl Book {
    pub fn id(&self) -> i32 {
        self.record.id
    }
}

/// Create book request. Surrounding whitespace is stripped before validation.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    #[schema(example = "The Pragmatic Programmer")]
    pub title: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    #[schema(example = "Andrew Hunt, David Thomas")]
    pub author: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 500, message = "must be between 1 and 500 characters"))]
    #[schema(example = "https://pragprog.com/titles/tpp20/")]
    pub source_url: String,
}

/// Update book request. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(min = 1, max = 500, message = "must be between 1 and 500 characters"))]
    pub source_url: Option<String>,
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(min = 1, max = 50, message = "must be between 1 and 50 characters"))]
    pub curation_status: Option<String>,
}

/// Book listing query parameters
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Exact curation status match
    pub curation_status: Option<String>,
    /// Case-insensitive substring of title or author
    pub search: Option<String>,
    /// Active (default) or soft-deleted books
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Page number (1-based)
    #[serde(default = "default_page")]
    #[validate(range(min = 1, max = MAX_PAGE, message = "page out of range"))]
    pub page: i64,
    /// Items per page (max 100)
    #[serde(default = "default_size")]
    #[validate(range(min = 1, max = 100, message = "size must be between 1 and 100"))]
    pub size: i64,
}

impl BookQuery {
    pub fn filter(&self) -> BookFilter {
        BookFilter {
            curation_status: self.curation_status.clone(),
            search: self.search.clone(),
            is_active: self.is_active,
        }
    }

    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            size: self.size,
        }
    }
}

impl Default for BookQuery {
    fn default() -> Self {
        Self {
            curation_status: None,
            search: None,
            is_active: true,
            page: default_page(),
            size: default_size(),
        }
    }
}

/// Row filter applied by the store when listing and counting
#[derive(Debug, Clone, PartialEq)]
pub struct BookFilter {
    pub curation_status: Option<String>,
    pub search: Option<String>,
    pub is_active: bool,
}

impl Default for BookFilter {
    fn default() -> Self {
        Self {
            curation_status: None,
            search: None,
            is_active: true,
        }
    }
}

fn default_active() -> bool {
    true
}

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.trim().to_string())
}

fn trimmed_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|s| s.map(|s| s.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn create_strips_surrounding_whitespace() {
        let data: CreateBook = serde_json::from_value(json!({
            "title": "  Clean Code  ",
            "author": "\tRobert C. Martin\n",
            "source_url": " https://example.com/clean-code "
        }))
        .unwrap();

        assert_eq!(data.title, "Clean Code");
        assert_eq!(data.author, "Robert C. Martin");
        assert_eq!(data.source_url, "https://example.com/clean-code");
        assert!(data.validate().is_ok());
    }

    #[test]
    fn create_rejects_blank_title() {
        let data: CreateBook = serde_json::from_value(json!({
            "title": "   ",
            "author": "Jane Doe",
            "source_url": "https://example.com"
        }))
        .unwrap();

        let errors = data.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn create_enforces_max_lengths() {
        let data = CreateBook {
            title: "t".repeat(255),
            author: "a".repeat(256),
            source_url: "u".repeat(501),
        };
        let errors = data.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(!fields.contains_key("title"));
        assert!(fields.contains_key("author"));
        assert!(fields.contains_key("source_url"));
    }

    #[test]
    fn create_requires_every_field() {
        let result = serde_json::from_value::<CreateBook>(json!({
            "title": "Refactoring",
            "author": "Martin Fowler"
        }));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("source_url"), "{}", message);
    }

    #[test]
    fn update_keeps_absent_fields_absent_and_ignores_unknown() {
        let data: UpdateBook = serde_json::from_value(json!({
            "curation_status": " approved ",
            "id": 99,
            "is_active": true,
            "publisher": "ignored"
        }))
        .unwrap();

        assert_eq!(
            data,
            UpdateBook {
                curation_status: Some("approved".to_string()),
                ..Default::default()
            }
        );
        assert!(data.validate().is_ok());
    }

    #[test]
    fn update_validates_present_fields() {
        let data: UpdateBook = serde_json::from_value(json!({ "author": "" })).unwrap();
        assert!(data.validate().unwrap_err().field_errors().contains_key("author"));

        let data = UpdateBook {
            curation_status: Some("x".repeat(51)),
            ..Default::default()
        };
        assert!(data.validate().is_err());
    }

    #[test]
    fn curation_status_is_not_a_closed_set() {
        let data = UpdateBook {
            curation_status: Some("needs-second-opinion".to_string()),
            ..Default::default()
        };
        assert!(data.validate().is_ok());
    }

    #[test]
    fn response_exposes_server_assigned_fields() {
        let now = Utc::now();
        let book = Book {
            record: Record {
                id: 7,
                created_at: now,
                updated_at: now,
                is_active: true,
            },
            title: "The Pragmatic Programmer".to_string(),
            author: "Andrew Hunt".to_string(),
            source_url: "https://pragprog.com".to_string(),
            curation_status: DEFAULT_CURATION_STATUS.to_string(),
        };

        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["curation_status"], "pending");
        assert_eq!(value["is_active"], true);
        assert!(value["created_at"].is_string());
        assert!(value["updated_at"].is_string());
        assert!(value.get("record").is_none());
    }

    #[test]
    fn query_defaults_to_active_first_page() {
        let query: BookQuery = serde_json::from_value(json!({})).unwrap();
        assert!(query.is_active);
        assert_eq!(query.page, 1);
        assert_eq!(query.size, 10);
        assert_eq!(query.filter(), BookFilter::default());

        let query: BookQuery =
            serde_json::from_value(json!({ "search": "prag", "is_active": false, "size": 0 }))
                .unwrap();
        assert!(!query.filter().is_active);
        assert_eq!(query.filter().search.as_deref(), Some("prag"));
        assert!(query.validate().is_err());
    }
}
