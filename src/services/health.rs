//! Database health service

use crate::{error::AppResult, repository::Repository};

/// Facts reported by the database health endpoint
#[derive(Debug, Clone)]
pub struct DatabaseInfo {
    pub version: String,
    pub table_count: i64,
}

#[derive(Clone)]
pub struct HealthService {
    repository: Repository,
}

impl HealthService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Check the database answers a trivial query
    pub async fn check_database(&self) -> AppResult<()> {
        self.repository.ping().await
    }

    /// Server version and a sample statistics query
    pub async fn database_info(&self) -> AppResult<DatabaseInfo> {
        let version = self.repository.server_version().await?;
        let table_count = self.repository.count_tables().await?;
        Ok(DatabaseInfo {
            version,
            table_count,
        })
    }
}
