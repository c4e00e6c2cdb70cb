use std::path::Path;

use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use tracing::debug;

use crate::category::{Category, quote_ident};
use crate::error::{DashboardError, DashboardResult};

pub const PLACEMENTS_TABLE: &str = "veiculacoes";
pub const ADS_TABLE: &str = "anuncios";

pub fn open_read_only(path: &Path) -> DashboardResult<Connection> {
    if !path.exists() {
        return Err(DashboardError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let connection = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| DashboardError::ConnectionFailure {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), "opened database read-only");
    Ok(connection)
}

pub fn table_exists(connection: &Connection, table: &str) -> DashboardResult<bool> {
    let found = connection
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
            params![table],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

pub fn ensure_table(connection: &Connection, table: &str) -> DashboardResult<()> {
    if table_exists(connection, table)? {
        Ok(())
    } else {
        Err(DashboardError::MissingTable {
            table: table.to_string(),
        })
    }
}

pub fn ensure_category_table(connection: &Connection, category: Category) -> DashboardResult<()> {
    ensure_table(connection, category.table())
}

pub fn count_rows(connection: &Connection, table: &str) -> DashboardResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(table));
    let count = connection.query_row(&sql, [], |row| row.get(0))?;
    Ok(count)
}
