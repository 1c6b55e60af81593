use std::path::PathBuf;
use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::database::Database;

/// Default location of the careers database
///
/// # Platform-specific paths
///
/// - **macOS**: `~/Library/Application Support/careers-builder/careers.sqlite3`
/// - **Linux**: `~/.local/share/careers-builder/careers.sqlite3`
/// - **Windows**: `%LOCALAPPDATA%\careers-builder\careers.sqlite3`
pub fn get_db_path() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(data_dir.join("careers-builder").join("careers.sqlite3"))
}

/// Opens (and migrates) the configured database. Returns `None` when the
/// database is disabled and the server runs on sample data only.
pub fn initialize_database(config: &DatabaseConfig) -> anyhow::Result<Option<Arc<Database>>> {
    if !config.enabled {
        return Ok(None);
    }

    let db_path = match &config.path {
        Some(path) => path.clone(),
        None => get_db_path()?,
    };
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db = Database::with_pool_size(&db_path, config.pool_size)?;
    tracing::info!("Database initialized at: {:?}", db_path);
    Ok(Some(Arc::new(db)))
}
