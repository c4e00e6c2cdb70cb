use std::io;

use anyhow::Result;
use tracing::info;

use crate::aggregate;
use crate::cli::{GlobalArgs, SummaryArgs};
use crate::db;
use crate::render::{write_json, write_metrics_text};

pub fn run(global: &GlobalArgs, args: SummaryArgs) -> Result<()> {
    let connection = db::open_read_only(&global.db_path)?;
    let metrics = aggregate::metrics(&connection)?;

    info!(
        editions = metrics.editions,
        ads_placed = metrics.ads_placed,
        ads_analyzed = metrics.ads_analyzed,
        placements = metrics.placements,
        "summary computed"
    );

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        write_json(&mut output, &metrics)
    } else {
        write_metrics_text(&mut output, &metrics)
    }
}
