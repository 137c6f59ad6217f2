//! Connectivity probes on Repository

use super::Repository;
use crate::error::AppResult;

impl Repository {
    /// Round-trip a trivial statement to prove the database answers
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// PostgreSQL server version string
    pub async fn server_version(&self) -> AppResult<String> {
        let version: String = sqlx::query_scalar("SELECT version()")
            .fetch_one(&self.pool)
            .await?;
        Ok(version)
    }

    /// Number of tables visible to the connection
    pub async fn count_tables(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM information_schema.tables")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
