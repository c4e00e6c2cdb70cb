use std::io;

use anyhow::{Context, Result};
use tracing::info;

use crate::aggregate::{aggregate_category, top_k};
use crate::cli::{CategoryArgs, GlobalArgs, sentinel_policy};
use crate::db;
use crate::render::{write_aggregate_text, write_json};

pub fn run(global: &GlobalArgs, args: CategoryArgs) -> Result<()> {
    let connection = db::open_read_only(&global.db_path)?;
    let sentinel = sentinel_policy(args.include_absent);

    let mut aggregate = aggregate_category(&connection, args.category, args.basis, sentinel)
        .with_context(|| format!("failed to aggregate category {}", args.category))?;

    info!(
        category = %args.category,
        basis = args.basis.as_str(),
        values = aggregate.rows.len(),
        grand_total = aggregate.grand_total,
        filtered_total = aggregate.filtered_total,
        "category aggregated"
    );

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        aggregate.rows = top_k(&aggregate.rows, args.top_k);
        write_json(&mut output, &aggregate)
    } else {
        write_aggregate_text(&mut output, &aggregate, args.top_k)
    }
}
