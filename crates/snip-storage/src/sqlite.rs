use async_trait::async_trait;
use snip_core::{LinkRecord, LinkStore, ShortId, StoreError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::debug;

/// Type alias for store results.
pub type Result<T> = std::result::Result<T, StoreError>;

/// SQLite bind parameters are capped (999 on older builds); batches are
/// chunked well below that.
const MAX_BATCH_ROWS: usize = 400;

/// SQLite implementation of the store contract.
///
/// The schema is the two-column table `links(id TEXT PRIMARY KEY,
/// url TEXT NOT NULL)`. The primary key is what actually enforces id
/// uniqueness: a duplicate insert surfaces as [`StoreError::Conflict`]
/// and feeds the engine's collision handling.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a store from an existing SQLite connection pool.
    ///
    /// The schema must already exist; use [`SqliteStore::connect`] to
    /// have it created.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a store by opening a new SQLite pool, creating the
    /// database file and schema if missing.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(map_sqlx_error)?
            .create_if_missing(true);

        // A `:memory:` database lives and dies with its connection, so
        // the pool must hold exactly one for every query to see the
        // same schema.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        let store = Self::new(pool);
        store.init_schema().await?;
        debug!(database_url, "sqlite store ready");
        Ok(store)
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS links (
                id  TEXT PRIMARY KEY,
                url TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StoreError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StoreError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StoreError::InvalidData(message),
        _ => StoreError::Query(message),
    }
}

#[async_trait]
impl LinkStore for SqliteStore {
    async fn get(&self, id: &ShortId) -> Result<Option<String>> {
        let row = sqlx::query(
            r#"
            SELECT url
            FROM links
            WHERE id = ?
            LIMIT 1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(|row| row.try_get("url").map_err(map_sqlx_error))
            .transpose()
    }

    async fn insert(&self, id: &ShortId, url: &str) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO links (id, url)
            VALUES (?, ?)
            "#,
        )
        .bind(id.as_str())
        .bind(url)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(StoreError::Conflict(id.to_string())),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn upsert_many(&self, records: &[LinkRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        for chunk in records.chunks(MAX_BATCH_ROWS) {
            let mut sql = String::from("INSERT INTO links (id, url) VALUES ");
            sql.push_str(&vec!["(?, ?)"; chunk.len()].join(", "));
            sql.push_str(" ON CONFLICT(id) DO UPDATE SET url = excluded.url");

            let mut query = sqlx::query(&sql);
            for record in chunk {
                query = query.bind(record.id.as_str()).bind(record.url.as_str());
            }

            query.execute(&self.pool).await.map_err(map_sqlx_error)?;
        }

        Ok(())
    }

    async fn delete(&self, id: &ShortId) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM links
            WHERE id = ?
            "#,
        )
        .bind(id.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, ids: &[ShortId]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut removed = 0;
        for chunk in ids.chunks(MAX_BATCH_ROWS) {
            let mut sql = String::from("DELETE FROM links WHERE id IN (");
            sql.push_str(&vec!["?"; chunk.len()].join(", "));
            sql.push(')');

            let mut query = sqlx::query(&sql);
            for id in chunk {
                query = query.bind(id.as_str());
            }

            let result = query.execute(&self.pool).await.map_err(map_sqlx_error)?;
            removed += result.rows_affected();
        }

        Ok(removed)
    }

    async fn all(&self) -> Result<Vec<LinkRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, url
            FROM links
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter()
            .map(|row| {
                let id: String = row.try_get("id").map_err(map_sqlx_error)?;
                let url: String = row.try_get("url").map_err(map_sqlx_error)?;
                Ok(LinkRecord::new(ShortId::new_unchecked(id), url))
            })
            .collect()
    }
}
