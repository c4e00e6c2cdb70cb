use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("database file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to open database {}: {source}", .path.display())]
    ConnectionFailure {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("category table missing from database: {table}")]
    MissingTable { table: String },

    #[error("unknown category \"{name}\"")]
    MalformedCategory { name: String },

    #[error("invalid config {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },

    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

pub type DashboardResult<T> = Result<T, DashboardError>;
