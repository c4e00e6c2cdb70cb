use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::{info, warn};

use crate::aggregate::{self, aggregate_category, describe_category, mention_histogram};
use crate::category::{Basis, Category, SentinelPolicy, Tab};
use crate::chart::{self, ChartAxis, Orientation};
use crate::cli::{DashboardArgs, GlobalArgs, sentinel_policy};
use crate::config::{DashboardConfig, load_config};
use crate::db;
use crate::error::DashboardError;
use crate::render::{DashboardPage, Panel, TabSection, render_dashboard};
use crate::util::{now_utc_string, write_text_file};

pub fn run(global: &GlobalArgs, args: DashboardArgs) -> Result<()> {
    let config = load_config(&global.config_path)?;
    let connection = db::open_read_only(&global.db_path)?;
    let sentinel = sentinel_policy(args.include_absent);

    let page = build_page(&connection, &config, args.top_k, sentinel)?;
    let html = render_dashboard(&page)?;
    write_text_file(&args.out, &html)?;

    info!(
        path = %args.out.display(),
        tabs = page.tabs.len(),
        bytes = html.len(),
        "wrote dashboard"
    );
    Ok(())
}

pub fn build_page<'a>(
    connection: &Connection,
    config: &'a DashboardConfig,
    top_k: usize,
    sentinel: SentinelPolicy,
) -> Result<DashboardPage<'a>> {
    let theme = &config.theme;

    let general = TabSection {
        id: "geral",
        label: "Geral",
        panels: vec![
            Panel::Metrics(aggregate::metrics(connection)?),
            Panel::AdsTable(aggregate::ads_table(connection)?),
            Panel::Chart(chart::ads_per_edition_chart(
                &aggregate::ads_by_edition(connection)?,
                theme,
            )),
            Panel::Chart(chart::placements_per_page_chart(
                &aggregate::placements_by_year_page(connection)?,
                theme,
            )),
        ],
    };

    let discourse = TabSection {
        id: "discurso",
        label: "Discurso",
        panels: category_panels(connection, config, Tab::Discourse, top_k, sentinel)?,
    };

    let design = TabSection {
        id: "design",
        label: "Design gráfico",
        panels: category_panels(connection, config, Tab::GraphicDesign, top_k, sentinel)?,
    };

    let mut extras_panels = vec![
        Panel::Chart(chart::first_appearances_chart(
            &aggregate::first_appearances_by_year(connection)?,
            theme,
        )),
        Panel::Chart(chart::placements_per_page_total_chart(
            &aggregate::ads_by_page(connection)?,
            theme,
        )),
    ];
    match aggregate_category(
        connection,
        Category::TipoDeProduto,
        Basis::Placements,
        sentinel,
    ) {
        Ok(product_types) => {
            let axis = ChartAxis::for_aggregate(&product_types);
            extras_panels.push(Panel::Chart(chart::category_bar_chart(
                &product_types,
                &axis,
                Some(top_k),
                Orientation::Auto,
                theme,
            )));
        }
        Err(DashboardError::MissingTable { table }) => {
            warn!(table = %table, "skipping extras panel");
        }
        Err(err) => return Err(err.into()),
    }
    let extras = TabSection {
        id: "extras",
        label: "Extras",
        panels: extras_panels,
    };

    let links = TabSection {
        id: "links",
        label: "Links",
        panels: if config.links.is_empty() {
            vec![Panel::Note("Nenhum link configurado.".to_string())]
        } else {
            vec![Panel::Links(config.links.clone())]
        },
    };

    Ok(DashboardPage {
        title: &config.title,
        generated_at: now_utc_string(),
        theme,
        tabs: vec![general, discourse, design, extras, links],
    })
}

fn category_panels(
    connection: &Connection,
    config: &DashboardConfig,
    tab: Tab,
    top_k: usize,
    sentinel: SentinelPolicy,
) -> Result<Vec<Panel>> {
    let mut panels = Vec::new();

    for category in Category::ALL.into_iter().filter(|c| c.tab() == tab) {
        match category_section(connection, config, category, top_k, sentinel) {
            Ok(section) => panels.extend(section),
            Err(DashboardError::MissingTable { table }) => {
                warn!(table = %table, label = category.label(), "category table missing, panel skipped");
                panels.push(Panel::Note(format!(
                    "{}: tabela ausente na base de dados.",
                    category.label()
                )));
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to build panels for {category}"));
            }
        }
    }

    Ok(panels)
}

fn category_section(
    connection: &Connection,
    config: &DashboardConfig,
    category: Category,
    top_k: usize,
    sentinel: SentinelPolicy,
) -> Result<Vec<Panel>, DashboardError> {
    let theme = &config.theme;
    let by_ads = aggregate_category(connection, category, Basis::Ads, sentinel)?;
    let axis = ChartAxis::for_aggregate(&by_ads);

    let mut panels = vec![Panel::Chart(chart::category_bar_chart(
        &by_ads,
        &axis,
        Some(top_k),
        Orientation::Auto,
        theme,
    ))];

    if category.is_multi_valued() {
        let buckets = mention_histogram(connection, category, sentinel)?;
        panels.push(Panel::Chart(chart::mention_histogram_chart(
            category.label(),
            &buckets,
            theme,
        )));
    }

    panels.push(Panel::Prevalence {
        title: category.label().to_string(),
        rows: describe_category(connection, category, sentinel)?,
    });

    Ok(panels)
}
