use rusqlite::Connection;

use crate::category::{Category, SentinelPolicy};
use crate::db::ensure_category_table;
use crate::error::DashboardResult;
use crate::model::PrevalenceRow;

pub fn describe_category(
    connection: &Connection,
    category: Category,
    sentinel: SentinelPolicy,
) -> DashboardResult<Vec<PrevalenceRow>> {
    ensure_category_table(connection, category)?;

    let table = category.table();
    let column = category.column();
    let sql = format!(
        "
        SELECT c.value,
               COUNT(DISTINCT c.Identificador) AS ads,
               COUNT(DISTINCT v.rowid) AS placements
        FROM (
          SELECT DISTINCT Identificador, CAST(\"{column}\" AS TEXT) AS value
          FROM \"{table}\"
          WHERE \"{column}\" IS NOT NULL
        ) AS c
        JOIN anuncios AS a ON a.Identificador = c.Identificador
        JOIN veiculacoes AS v ON v.Identificador = c.Identificador
        GROUP BY c.value
        "
    );

    let mut statement = connection.prepare(&sql)?;
    let counts = statement
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let rows = counts
        .into_iter()
        .filter(|(value, _, _)| sentinel.keeps(value))
        .map(|(value, ads, placements)| PrevalenceRow {
            value,
            ads,
            placements,
            prevalence: ads * placements,
            prevalence_score: 0.0,
        })
        .collect();

    Ok(normalize_prevalence(rows))
}

pub(super) fn normalize_prevalence(mut rows: Vec<PrevalenceRow>) -> Vec<PrevalenceRow> {
    let max = rows.iter().map(|row| row.prevalence).max().unwrap_or(0);

    for row in &mut rows {
        row.prevalence_score = if max == 0 {
            0.0
        } else if row.prevalence == max {
            100.0
        } else {
            row.prevalence as f64 * 100.0 / max as f64
        };
    }

    rows.sort_by(|a, b| {
        b.prevalence
            .cmp(&a.prevalence)
            .then_with(|| a.value.cmp(&b.value))
    });
    rows
}
