use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::model::{CategoryAggregate, Metrics, PrevalenceRow};

pub fn write_json<W: Write, T: Serialize>(output: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *output, value).context("failed to serialize json output")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

pub fn write_metrics_text<W: Write>(output: &mut W, metrics: &Metrics) -> Result<()> {
    writeln!(output, "Edições:\t{}", metrics.editions)?;
    writeln!(output, "Anúncios Fármacos:\t{}", metrics.ads_placed)?;
    writeln!(output, "Anúncios Analisados:\t{}", metrics.ads_analyzed)?;
    writeln!(output, "Veiculações:\t{}", metrics.placements)?;
    output.flush()?;
    Ok(())
}

pub fn write_aggregate_text<W: Write>(
    output: &mut W,
    aggregate: &CategoryAggregate,
    rows_limit: Option<usize>,
) -> Result<()> {
    writeln!(
        output,
        "Category: {} ({})",
        aggregate.category,
        aggregate.category.label()
    )?;
    writeln!(
        output,
        "Basis: {} sentinel={:?} grand_total={} filtered_total={}",
        aggregate.basis.as_str(),
        aggregate.sentinel,
        aggregate.grand_total,
        aggregate.filtered_total,
    )?;

    let shown = rows_limit.unwrap_or(aggregate.rows.len());
    writeln!(output, "Rows: {} of {}", shown.min(aggregate.rows.len()), aggregate.rows.len())?;

    for (index, row) in aggregate.rows.iter().take(shown).enumerate() {
        writeln!(
            output,
            "{}.\t{}\t{}\t{}",
            index + 1,
            row.value,
            row.count,
            row.percent_label
        )?;
    }

    output.flush()?;
    Ok(())
}

pub fn write_prevalence_text<W: Write>(output: &mut W, rows: &[PrevalenceRow]) -> Result<()> {
    writeln!(output, "Rows: {}", rows.len())?;
    writeln!(output, "#\tvalue\tads\tplacements\tprevalence\tscore")?;

    for (index, row) in rows.iter().enumerate() {
        writeln!(
            output,
            "{}.\t{}\t{}\t{}\t{}\t{:.1}",
            index + 1,
            row.value,
            row.ads,
            row.placements,
            row.prevalence,
            row.prevalence_score
        )?;
    }

    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate_category, describe_category};
    use crate::category::{Basis, Category, SentinelPolicy};
    use crate::db::fixture;

    #[test]
    fn aggregate_text_lists_ranked_rows() {
        let connection = fixture::connection();
        let aggregate = aggregate_category(
            &connection,
            Category::TipoDeProduto,
            Basis::Ads,
            SentinelPolicy::Exclude,
        )
        .unwrap();

        let mut buffer = Vec::new();
        write_aggregate_text(&mut buffer, &aggregate, Some(2)).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("Category: tipo_de_produto (Tipo de produto)\n"));
        assert!(text.contains("Rows: 2 of 3\n"));
        assert!(text.contains("1.\tXarope\t2\t50.00%\n"));
        assert!(!text.contains("3.\t"));
    }

    #[test]
    fn prevalence_text_prints_scores() {
        let connection = fixture::connection();
        let rows = describe_category(
            &connection,
            Category::DoencaMencionada,
            SentinelPolicy::Exclude,
        )
        .unwrap();

        let mut buffer = Vec::new();
        write_prevalence_text(&mut buffer, &rows).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("1.\tFebre\t2\t9\t18\t100.0\n"));
        assert!(text.contains("2.\tTosse\t1\t3\t3\t16.7\n"));
    }

    #[test]
    fn json_output_ends_with_newline() {
        let mut buffer = Vec::new();
        write_json(
            &mut buffer,
            &Metrics {
                editions: 1,
                ads_placed: 2,
                ads_analyzed: 3,
                placements: 4,
            },
        )
        .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\"ads_analyzed\": 3"));
    }
}
