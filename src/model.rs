use serde::Serialize;

use crate::category::{Basis, Category, SentinelPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub editions: i64,
    pub ads_placed: i64,
    pub ads_analyzed: i64,
    pub placements: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: i64,
    pub percent: f64,
    pub percent_whole: i64,
    pub percent_label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryAggregate {
    pub category: Category,
    pub basis: Basis,
    pub sentinel: SentinelPolicy,
    pub grand_total: i64,
    pub filtered_total: i64,
    pub rows: Vec<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrevalenceRow {
    pub value: String,
    pub ads: i64,
    pub placements: i64,
    pub prevalence: i64,
    pub prevalence_score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdRow {
    pub identifier: String,
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub placements: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditionRow {
    pub year: i64,
    pub edition: String,
    pub placements: i64,
    pub first_ad_page: i64,
    pub last_ad_page: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRow {
    pub page: i64,
    pub placements: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearPageRow {
    pub year: i64,
    pub page: i64,
    pub placements: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistogramBucket {
    pub mentions: i64,
    pub ads: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i64,
    pub ads: i64,
}
