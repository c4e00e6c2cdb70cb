use std::fs;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::{info, warn};

use crate::category::Category;
use crate::cli::GlobalArgs;
use crate::db::{self, ADS_TABLE, PLACEMENTS_TABLE};
use crate::util::sha256_file;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStatus {
    pub table: &'static str,
    pub label: Option<&'static str>,
    pub rows: Option<i64>,
}

pub fn run(global: &GlobalArgs) -> Result<()> {
    let db_path = &global.db_path;
    info!(db_path = %db_path.display(), "status requested");

    if !db_path.exists() {
        warn!(path = %db_path.display(), "database file missing");
        return Ok(());
    }

    let size_bytes = fs::metadata(db_path)
        .with_context(|| format!("failed to inspect {}", db_path.display()))?
        .len();
    let sha256 = sha256_file(db_path)?;
    info!(
        path = %db_path.display(),
        size_bytes,
        sha256 = %sha256,
        "database file"
    );

    let connection = db::open_read_only(db_path)?;
    for status in table_statuses(&connection)? {
        match (status.label, status.rows) {
            (None, Some(rows)) => info!(table = status.table, rows, "core table"),
            (None, None) => warn!(table = status.table, "core table missing"),
            (Some(label), Some(rows)) => {
                info!(table = status.table, rows, label, "category table")
            }
            (Some(label), None) => warn!(table = status.table, label, "category table missing"),
        }
    }

    Ok(())
}

pub fn table_statuses(connection: &Connection) -> Result<Vec<TableStatus>> {
    let core = [PLACEMENTS_TABLE, ADS_TABLE].map(|table| (table, None));
    let categories = Category::ALL.map(|category| (category.table(), Some(category.label())));

    core.into_iter()
        .chain(categories)
        .map(|(table, label)| {
            let rows = if db::table_exists(connection, table)? {
                Some(db::count_rows(connection, table)?)
            } else {
                None
            };
            Ok(TableStatus { table, label, rows })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixture;

    fn seeded_database(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let db_path = dir.path().join("gold.sqlite");
        let writable = Connection::open(&db_path).unwrap();
        fixture::seed(&writable);
        db_path
    }

    #[test]
    fn table_statuses_count_every_present_table() {
        let connection = fixture::connection();
        let statuses = table_statuses(&connection).unwrap();

        let rows = statuses
            .iter()
            .map(|status| (status.table, status.rows))
            .collect::<Vec<_>>();
        assert_eq!(
            rows,
            vec![
                ("veiculacoes", Some(10)),
                ("anuncios", Some(4)),
                ("doenca_mencionada", Some(7)),
                ("substancias", Some(0)),
                ("responsavel_tecnico", Some(0)),
                ("autoridade_citada", Some(0)),
                ("autorizacoes", Some(0)),
                ("tipo_de_produto", Some(4)),
                ("variacao_tipografica", Some(4)),
                ("ilustracao", Some(0)),
                ("moldura", None),
            ]
        );
        assert_eq!(statuses[0].label, None);
        assert_eq!(statuses[10].label, Some(Category::Moldura.label()));
    }

    #[test]
    fn status_reads_a_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = seeded_database(&dir);

        run(&GlobalArgs {
            db_path: db_path.clone(),
            config_path: dir.path().join("dashboard.toml"),
        })
        .unwrap();

        let connection = db::open_read_only(&db_path).unwrap();
        let missing = table_statuses(&connection)
            .unwrap()
            .into_iter()
            .filter(|status| status.rows.is_none())
            .map(|status| status.table)
            .collect::<Vec<_>>();
        assert_eq!(missing, vec!["moldura"]);
    }

    #[test]
    fn status_tolerates_a_missing_database() {
        let dir = tempfile::tempdir().unwrap();
        run(&GlobalArgs {
            db_path: dir.path().join("absent.sqlite"),
            config_path: dir.path().join("dashboard.toml"),
        })
        .unwrap();
    }
}
