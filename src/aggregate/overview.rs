use rusqlite::Connection;

use crate::error::DashboardResult;
use crate::model::{AdRow, EditionRow, Metrics, PageRow, YearCount, YearPageRow};

pub fn metrics(connection: &Connection) -> DashboardResult<Metrics> {
    let (editions, ads_placed, placements) = connection.query_row(
        "
        SELECT COUNT(DISTINCT ano_edicao), COUNT(DISTINCT Identificador), COUNT(*)
        FROM veiculacoes
        ",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;
    let ads_analyzed = connection.query_row(
        "SELECT COUNT(DISTINCT Identificador) FROM anuncios",
        [],
        |row| row.get(0),
    )?;

    Ok(Metrics {
        editions,
        ads_placed,
        ads_analyzed,
        placements,
    })
}

pub fn ads_table(connection: &Connection) -> DashboardResult<Vec<AdRow>> {
    let mut statement = connection.prepare(
        "
        SELECT v.Identificador,
               a.\"Produto ofertado (título completo)\",
               a.image_url,
               COUNT(*) AS placements
        FROM veiculacoes AS v
        LEFT JOIN anuncios AS a ON a.Identificador = v.Identificador
        GROUP BY v.Identificador
        ORDER BY placements DESC, v.Identificador
        ",
    )?;
    let rows = statement
        .query_map([], |row| {
            Ok(AdRow {
                identifier: row.get(0)?,
                title: row.get(1)?,
                image_url: row.get(2)?,
                placements: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn ads_by_edition(connection: &Connection) -> DashboardResult<Vec<EditionRow>> {
    let mut statement = connection.prepare(
        "
        SELECT CAST(Ano AS INTEGER) AS year,
               CAST(ano_edicao AS TEXT) AS edition,
               COUNT(*) AS placements,
               MIN(CAST(\"Página\" AS INTEGER)),
               MAX(CAST(\"Página\" AS INTEGER))
        FROM veiculacoes
        GROUP BY year, edition
        ORDER BY edition
        ",
    )?;
    let rows = statement
        .query_map([], |row| {
            Ok(EditionRow {
                year: row.get(0)?,
                edition: row.get(1)?,
                placements: row.get(2)?,
                first_ad_page: row.get(3)?,
                last_ad_page: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn ads_by_page(connection: &Connection) -> DashboardResult<Vec<PageRow>> {
    let mut statement = connection.prepare(
        "
        SELECT CAST(\"Página\" AS INTEGER) AS page, COUNT(*)
        FROM veiculacoes
        GROUP BY page
        ORDER BY page
        ",
    )?;
    let rows = statement
        .query_map([], |row| {
            Ok(PageRow {
                page: row.get(0)?,
                placements: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn placements_by_year_page(connection: &Connection) -> DashboardResult<Vec<YearPageRow>> {
    let mut statement = connection.prepare(
        "
        SELECT CAST(Ano AS INTEGER) AS year, CAST(\"Página\" AS INTEGER) AS page, COUNT(*)
        FROM veiculacoes
        GROUP BY year, page
        ORDER BY year, page
        ",
    )?;
    let rows = statement
        .query_map([], |row| {
            Ok(YearPageRow {
                year: row.get(0)?,
                page: row.get(1)?,
                placements: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn first_appearances_by_year(connection: &Connection) -> DashboardResult<Vec<YearCount>> {
    let mut statement = connection.prepare(
        "
        SELECT first_year, COUNT(*)
        FROM (
          SELECT Identificador, MIN(CAST(Ano AS INTEGER)) AS first_year
          FROM veiculacoes
          GROUP BY Identificador
        )
        GROUP BY first_year
        ORDER BY first_year
        ",
    )?;
    let rows = statement
        .query_map([], |row| {
            Ok(YearCount {
                year: row.get(0)?,
                ads: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
