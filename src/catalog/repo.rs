use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::catalog::repo_types::{CatalogEntry, NewCatalogEntry};
use crate::error::StoreError;

/// Storage for the scraped catalog.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list(&self) -> Result<Vec<CatalogEntry>, StoreError>;

    /// Replace every stored entry with `entries` as one atomic step.
    /// On error the previous catalog stays visible.
    async fn replace_all(&self, entries: &[NewCatalogEntry]) -> Result<usize, StoreError>;
}

#[derive(Clone)]
pub struct PgCatalogStore {
    db: PgPool,
}

impl PgCatalogStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn list(&self) -> Result<Vec<CatalogEntry>, StoreError> {
        let rows = sqlx::query_as::<_, CatalogEntry>(
            r#"
            SELECT id, "type", mutability, description, syntax_examples
            FROM collected_data
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn replace_all(&self, entries: &[NewCatalogEntry]) -> Result<usize, StoreError> {
        // Dropping `tx` without commit rolls back.
        let mut tx = self.db.begin().await?;

        let deleted = sqlx::query("DELETE FROM collected_data")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        debug!(deleted, "old catalog rows removed");

        for entry in entries {
            sqlx::query(
                r#"
                INSERT INTO collected_data ("type", mutability, description, syntax_examples)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(&entry.type_name)
            .bind(&entry.mutability)
            .bind(&entry.description)
            .bind(&entry.syntax_examples)
            .execute(&mut *tx)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    StoreError::DuplicateType(entry.type_name.clone())
                }
                other => StoreError::Database(other),
            })?;
        }

        tx.commit().await?;
        Ok(entries.len())
    }
}
