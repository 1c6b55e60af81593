pub mod admin_users;
pub mod companies;
pub mod jobs;
pub mod migrations;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_POOL_SIZE: u32 = 8;

#[derive(Clone)]
pub struct AsyncDbConnection {
    pool: Arc<Pool<SqliteConnectionManager>>,
}

impl AsyncDbConnection {
    pub fn new(pool: Pool<SqliteConnectionManager>) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Checks a connection out of the pool. Fails with an `r2d2::Error` when
    /// the pool times out, which callers report as the store being unavailable.
    pub async fn lock(&self) -> anyhow::Result<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }
}

pub struct Database {
    pub async_connection: AsyncDbConnection,
}

impl Database {
    /// Create a new database connection and run migrations
    pub fn new(db_path: &Path) -> anyhow::Result<Self> {
        Self::with_pool_size(db_path, DEFAULT_POOL_SIZE)
    }

    pub fn with_pool_size(db_path: &Path, pool_size: u32) -> anyhow::Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Migrate on a plain connection before the pool opens
        {
            let conn = Connection::open(db_path)?;
            migrations::run_migrations(&conn)?;
        }

        let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
            conn.busy_timeout(Duration::from_secs(5))?;
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            Ok(())
        });

        let pool = Pool::builder().max_size(pool_size.max(1)).build(manager)?;

        Ok(Database {
            async_connection: AsyncDbConnection::new(pool),
        })
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        let conn = self.async_connection.lock().await?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }
}

/// Applies `changes` (column, value) to one row plus `updated_at`.
/// Returns the number of rows touched.
pub(crate) fn update_columns(
    conn: &Connection,
    table: &str,
    id: &str,
    changes: Vec<(&'static str, Value)>,
    now_ms: i64,
) -> anyhow::Result<usize> {
    let mut assignments = vec!["updated_at = ?".to_string()];
    let mut values = vec![Value::Integer(now_ms)];
    for (column, value) in changes {
        assignments.push(format!("{} = ?", column));
        values.push(value);
    }
    values.push(Value::Text(id.to_string()));

    let query = format!("UPDATE {} SET {} WHERE id = ?", table, assignments.join(", "));
    Ok(conn.execute(&query, params_from_iter(values))?)
}

pub(crate) fn text(value: impl Into<String>) -> Value {
    Value::Text(value.into())
}

/// Text, or NULL for a blank string.
pub(crate) fn nullable_text(value: &str) -> Value {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Value::Null
    } else {
        Value::Text(trimmed.to_string())
    }
}

/// Decodes a JSON text column inside a row mapper.
pub(crate) fn json_column<T: serde::de::DeserializeOwned>(
    row: &rusqlite::Row,
    idx: usize,
) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// True when the error chain holds an SQLite unique or primary key violation.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(e, _))
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

/// True when no pooled connection could be obtained.
pub fn is_pool_error(err: &anyhow::Error) -> bool {
    err.downcast_ref::<r2d2::Error>().is_some()
}

#[cfg(test)]
pub(crate) fn test_database() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(&dir.path().join("careers.sqlite3")).unwrap();
    (dir, db)
}
