use rusqlite::Connection;
use tracing::debug;

use crate::category::{Basis, Category, SentinelPolicy};
use crate::db::ensure_category_table;
use crate::error::DashboardResult;
use crate::model::{CategoryAggregate, CategoryCount};

pub fn aggregate_category(
    connection: &Connection,
    category: Category,
    basis: Basis,
    sentinel: SentinelPolicy,
) -> DashboardResult<CategoryAggregate> {
    ensure_category_table(connection, category)?;

    let sql = category_count_sql(category, basis);
    let mut statement = connection.prepare(&sql)?;
    let groups = statement
        .query_map([], |row| {
            Ok((row.get::<_, Option<String>>(0)?, row.get::<_, i64>(1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let aggregate = summarize_groups(category, basis, sentinel, groups);
    debug!(
        category = %category,
        basis = basis.as_str(),
        groups = aggregate.rows.len(),
        grand_total = aggregate.grand_total,
        "aggregated category"
    );
    Ok(aggregate)
}

fn category_count_sql(category: Category, basis: Basis) -> String {
    let table = category.table();
    let column = category.column();

    match basis {
        Basis::Ads => format!(
            "
            SELECT CAST(c.\"{column}\" AS TEXT) AS value,
                   COUNT(DISTINCT c.Identificador) AS n
            FROM \"{table}\" AS c
            JOIN anuncios AS a ON a.Identificador = c.Identificador
            GROUP BY CAST(c.\"{column}\" AS TEXT)
            "
        ),
        Basis::Placements => format!(
            "
            SELECT c.value, COUNT(DISTINCT v.rowid) AS n
            FROM (
              SELECT DISTINCT Identificador, CAST(\"{column}\" AS TEXT) AS value
              FROM \"{table}\"
            ) AS c
            JOIN veiculacoes AS v ON v.Identificador = c.Identificador
            GROUP BY c.value
            "
        ),
    }
}

// Percentages use the total of every group, so filtered rows sum below 100.
pub(super) fn summarize_groups(
    category: Category,
    basis: Basis,
    sentinel: SentinelPolicy,
    groups: Vec<(Option<String>, i64)>,
) -> CategoryAggregate {
    let grand_total = groups.iter().map(|(_, count)| count).sum::<i64>();

    let mut rows = groups
        .into_iter()
        .filter_map(|(value, count)| value.map(|value| (value, count)))
        .filter(|(value, _)| sentinel.keeps(value))
        .map(|(value, count)| {
            let percent = percent_of(count, grand_total);
            CategoryCount {
                value,
                count,
                percent,
                percent_whole: percent.round() as i64,
                percent_label: format!("{percent:.2}%"),
            }
        })
        .collect::<Vec<CategoryCount>>();

    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    let filtered_total = rows.iter().map(|row| row.count).sum();

    CategoryAggregate {
        category,
        basis,
        sentinel,
        grand_total,
        filtered_total,
        rows,
    }
}

fn percent_of(count: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

pub fn top_k(rows: &[CategoryCount], k: Option<usize>) -> Vec<CategoryCount> {
    let mut selected = rows.to_vec();
    selected.sort_by(|a, b| b.count.cmp(&a.count));
    if let Some(k) = k {
        selected.truncate(k);
    }
    selected
}
