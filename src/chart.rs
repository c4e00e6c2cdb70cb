use serde_json::{Value, json};

use crate::aggregate::top_k;
use crate::config::Theme;
use crate::model::{
    CategoryAggregate, EditionRow, HistogramBucket, PageRow, YearCount, YearPageRow,
};

pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

pub const HORIZONTAL_DOMAIN_THRESHOLD: usize = 8;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Orientation {
    Auto,
    Vertical,
    Horizontal,
}

impl Orientation {
    fn is_horizontal(self, domain_size: usize) -> bool {
        match self {
            Self::Auto => domain_size > HORIZONTAL_DOMAIN_THRESHOLD,
            Self::Vertical => false,
            Self::Horizontal => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChartAxis {
    pub value_field: &'static str,
    pub count_field: &'static str,
    pub value_title: String,
    pub count_title: String,
}

impl ChartAxis {
    pub fn for_aggregate(aggregate: &CategoryAggregate) -> Self {
        Self {
            value_field: "value",
            count_field: "count",
            value_title: aggregate.category.label().to_string(),
            count_title: aggregate.basis.label().to_string(),
        }
    }
}

pub fn category_bar_chart(
    aggregate: &CategoryAggregate,
    axis: &ChartAxis,
    k: Option<usize>,
    orientation: Orientation,
    theme: &Theme,
) -> Value {
    let rows = top_k(&aggregate.rows, k);
    let horizontal = orientation.is_horizontal(rows.len());
    let label_angle = if horizontal { 0 } else { -40 };

    let value_encoding = |sort: &str| {
        json!({
            "field": axis.value_field,
            "type": "nominal",
            "title": axis.value_title,
            "sort": sort,
            "axis": { "labelLimit": 240, "labelAngle": label_angle },
        })
    };
    let count_encoding = json!({
        "field": axis.count_field,
        "type": "quantitative",
        "title": axis.count_title,
    });

    let (encoding, label_mark) = if horizontal {
        (
            json!({ "y": value_encoding("-x"), "x": count_encoding }),
            json!({ "type": "text", "align": "left", "baseline": "middle", "dx": 3 }),
        )
    } else {
        (
            json!({ "x": value_encoding("-y"), "y": count_encoding }),
            json!({ "type": "text", "align": "center", "baseline": "bottom", "dy": -3 }),
        )
    };

    json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": format!("{} por {}", axis.count_title, axis.value_title.to_lowercase()),
        "width": "container",
        "data": { "values": rows },
        "encoding": encoding,
        "layer": [
            {
                "mark": { "type": "bar", "color": theme.accent() },
                "encoding": {
                    "tooltip": [
                        { "field": axis.value_field, "type": "nominal", "title": axis.value_title },
                        { "field": axis.count_field, "type": "quantitative", "title": axis.count_title },
                        { "field": "percent_label", "type": "nominal", "title": "%" },
                    ],
                },
            },
            {
                "mark": label_mark,
                "encoding": { "text": { "field": "percent_label", "type": "nominal" } },
            },
        ],
    })
}

fn year_color(theme: &Theme) -> Value {
    json!({
        "field": "year",
        "type": "nominal",
        "title": "Ano",
        "scale": { "range": theme.colors },
    })
}

pub fn ads_per_edition_chart(rows: &[EditionRow], theme: &Theme) -> Value {
    json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": "Anúncios por Edição",
        "width": "container",
        "data": { "values": rows },
        "mark": { "type": "circle", "size": 60 },
        "encoding": {
            "x": { "field": "edition", "type": "ordinal", "title": "Edição", "axis": { "labels": false } },
            "y": { "field": "placements", "type": "quantitative", "title": "Contagem Anúncios" },
            "color": year_color(theme),
            "tooltip": [
                { "field": "edition", "type": "ordinal", "title": "Edição" },
                { "field": "placements", "type": "quantitative", "title": "Anúncios" },
                { "field": "first_ad_page", "type": "quantitative", "title": "Primeira página" },
                { "field": "last_ad_page", "type": "quantitative", "title": "Última página" },
            ],
        },
    })
}

pub fn placements_per_page_chart(rows: &[YearPageRow], theme: &Theme) -> Value {
    json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": "Veiculações por página",
        "width": "container",
        "data": { "values": rows },
        "mark": "bar",
        "encoding": {
            "x": { "field": "page", "type": "ordinal", "title": "Página", "axis": { "labelAngle": 0 } },
            "y": {
                "field": "placements",
                "type": "quantitative",
                "aggregate": "sum",
                "stack": "zero",
                "title": "Veiculações",
            },
            "color": year_color(theme),
        },
    })
}

pub fn placements_per_page_total_chart(rows: &[PageRow], theme: &Theme) -> Value {
    json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": "Veiculações por página (total)",
        "width": "container",
        "data": { "values": rows },
        "mark": { "type": "bar", "color": theme.accent() },
        "encoding": {
            "x": { "field": "page", "type": "ordinal", "title": "Página", "axis": { "labelAngle": 0 } },
            "y": { "field": "placements", "type": "quantitative", "title": "Veiculações" },
        },
    })
}

pub fn mention_histogram_chart(label: &str, buckets: &[HistogramBucket], theme: &Theme) -> Value {
    json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": format!("Anúncios por quantidade de menções: {}", label.to_lowercase()),
        "width": "container",
        "data": { "values": buckets },
        "mark": { "type": "bar", "color": theme.accent() },
        "encoding": {
            "x": { "field": "mentions", "type": "ordinal", "title": "Menções por anúncio", "axis": { "labelAngle": 0 } },
            "y": { "field": "ads", "type": "quantitative", "title": "Anúncios" },
        },
    })
}

pub fn first_appearances_chart(rows: &[YearCount], theme: &Theme) -> Value {
    json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": "Novos anúncios por ano",
        "width": "container",
        "data": { "values": rows },
        "mark": "bar",
        "encoding": {
            "x": { "field": "year", "type": "ordinal", "title": "Ano", "axis": { "labelAngle": 0 } },
            "y": { "field": "ads", "type": "quantitative", "title": "Anúncios" },
            "color": year_color(theme),
        },
    })
}
