use rusqlite::{Connection, params};

use crate::category::{ABSENT, Category, SentinelPolicy};
use crate::db::ensure_category_table;
use crate::error::DashboardResult;
use crate::model::HistogramBucket;

pub fn mention_histogram(
    connection: &Connection,
    category: Category,
    sentinel: SentinelPolicy,
) -> DashboardResult<Vec<HistogramBucket>> {
    ensure_category_table(connection, category)?;

    let table = category.table();
    let column = category.column();
    let sql = format!(
        "
        SELECT mentions, COUNT(*) AS ads
        FROM (
          SELECT a.Identificador, COUNT(DISTINCT c.\"{column}\") AS mentions
          FROM anuncios AS a
          LEFT JOIN \"{table}\" AS c
            ON c.Identificador = a.Identificador
           AND c.\"{column}\" IS NOT NULL
           AND (?1 IS NULL OR c.\"{column}\" <> ?1)
          GROUP BY a.Identificador
        )
        GROUP BY mentions
        ORDER BY mentions
        "
    );

    let excluded = match sentinel {
        SentinelPolicy::Keep => None,
        SentinelPolicy::Exclude => Some(ABSENT),
    };

    let mut statement = connection.prepare(&sql)?;
    let buckets = statement
        .query_map(params![excluded], |row| {
            Ok(HistogramBucket {
                mentions: row.get(0)?,
                ads: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(buckets)
}
