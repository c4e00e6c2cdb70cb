use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::category::{Basis, Category, SentinelPolicy};
use crate::error::DashboardError;

pub const DEFAULT_DB_PATH: &str = "data/03_gold/monitor_campista_pharma_ads_1880_1884.sqlite";
pub const DEFAULT_CONFIG_PATH: &str = "config/dashboard.toml";

#[derive(Parser, Debug)]
#[command(
    name = "campista-ads",
    version,
    about = "Exploration of pharmaceutical ads printed in Monitor Campista (1880-1884)"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    #[arg(long, global = true, default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config_path: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Status,
    Summary(SummaryArgs),
    Category(CategoryArgs),
    Describe(DescribeArgs),
    Chart(ChartArgs),
    Dashboard(DashboardArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CategoryArgs {
    #[arg(long, value_parser = parse_category)]
    pub category: Category,

    #[arg(long, value_enum, default_value_t = Basis::Ads)]
    pub basis: Basis,

    #[arg(long)]
    pub top_k: Option<usize>,

    #[arg(long, default_value_t = false)]
    pub include_absent: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct DescribeArgs {
    #[arg(long, value_parser = parse_category)]
    pub category: Category,

    #[arg(long, default_value_t = false)]
    pub include_absent: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OrientationArg {
    Auto,
    Vertical,
    Horizontal,
}

#[derive(Args, Debug, Clone)]
pub struct ChartArgs {
    #[arg(long, value_parser = parse_category)]
    pub category: Category,

    #[arg(long, value_enum, default_value_t = Basis::Ads)]
    pub basis: Basis,

    #[arg(long)]
    pub top_k: Option<usize>,

    #[arg(long, value_enum, default_value_t = OrientationArg::Auto)]
    pub orientation: OrientationArg,

    #[arg(long, default_value_t = false)]
    pub include_absent: bool,

    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct DashboardArgs {
    #[arg(long, default_value = "target/dashboard/index.html")]
    pub out: PathBuf,

    #[arg(long, default_value_t = 15)]
    pub top_k: usize,

    #[arg(long, default_value_t = false)]
    pub include_absent: bool,
}

fn parse_category(name: &str) -> Result<Category, DashboardError> {
    name.parse()
}

pub fn sentinel_policy(include_absent: bool) -> SentinelPolicy {
    if include_absent {
        SentinelPolicy::Keep
    } else {
        SentinelPolicy::Exclude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_flag_accepts_both_spellings() {
        let cli = Cli::try_parse_from(["campista-ads", "describe", "--category", "doenca-mencionada"])
            .unwrap();
        match cli.command {
            Commands::Describe(args) => assert_eq!(args.category, Category::DoencaMencionada),
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from([
            "campista-ads",
            "chart",
            "--category",
            "tipo_de_produto",
            "--basis",
            "placements",
        ])
        .unwrap();
        match cli.command {
            Commands::Chart(args) => {
                assert_eq!(args.category, Category::TipoDeProduto);
                assert_eq!(args.basis, Basis::Placements);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_category_reports_malformed_category() {
        let err = Cli::try_parse_from(["campista-ads", "category", "--category", "nope"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("unknown category \"nope\""));
    }
}
