//! Fields shared by every persisted record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Identity, timestamps and soft-delete flag, embedded into entity rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Record {
    /// Server-assigned identifier, never reused
    pub id: i32,
    /// Set once on insertion
    pub created_at: DateTime<Utc>,
    /// Refreshed by every mutation, including soft delete
    pub updated_at: DateTime<Utc>,
    /// Soft delete flag: inactive records are hidden from normal reads
    pub is_active: bool,
}

impl Record {
    pub fn is_deleted(&self) -> bool {
        !self.is_active
    }
}
