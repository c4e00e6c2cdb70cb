use std::io;

use anyhow::{Context, Result};
use tracing::info;

use crate::aggregate::aggregate_category;
use crate::chart::{ChartAxis, Orientation, category_bar_chart};
use crate::cli::{ChartArgs, GlobalArgs, OrientationArg, sentinel_policy};
use crate::config::load_config;
use crate::db;
use crate::render::write_json;
use crate::util::write_json_pretty;

pub fn run(global: &GlobalArgs, args: ChartArgs) -> Result<()> {
    let config = load_config(&global.config_path)?;
    let connection = db::open_read_only(&global.db_path)?;

    let aggregate = aggregate_category(
        &connection,
        args.category,
        args.basis,
        sentinel_policy(args.include_absent),
    )
    .with_context(|| format!("failed to aggregate category {}", args.category))?;

    let axis = ChartAxis::for_aggregate(&aggregate);
    let spec = category_bar_chart(
        &aggregate,
        &axis,
        args.top_k,
        orientation(args.orientation),
        &config.theme,
    );

    match args.out {
        Some(path) => {
            write_json_pretty(&path, &spec)?;
            info!(path = %path.display(), category = %args.category, "wrote chart spec");
            Ok(())
        }
        None => {
            let mut output = io::BufWriter::new(io::stdout().lock());
            write_json(&mut output, &spec)
        }
    }
}

fn orientation(arg: OrientationArg) -> Orientation {
    match arg {
        OrientationArg::Auto => Orientation::Auto,
        OrientationArg::Vertical => Orientation::Vertical,
        OrientationArg::Horizontal => Orientation::Horizontal,
    }
}
