use std::io;

use anyhow::{Context, Result};
use tracing::info;

use crate::aggregate::describe_category;
use crate::cli::{DescribeArgs, GlobalArgs, sentinel_policy};
use crate::db;
use crate::render::{write_json, write_prevalence_text};

pub fn run(global: &GlobalArgs, args: DescribeArgs) -> Result<()> {
    let connection = db::open_read_only(&global.db_path)?;
    let rows = describe_category(
        &connection,
        args.category,
        sentinel_policy(args.include_absent),
    )
    .with_context(|| format!("failed to describe category {}", args.category))?;

    info!(category = %args.category, values = rows.len(), "category described");

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        write_json(&mut output, &rows)
    } else {
        write_prevalence_text(&mut output, &rows)
    }
}
