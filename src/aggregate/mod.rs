mod category_counts;
mod histogram;
mod overview;
mod prevalence;

pub use category_counts::{aggregate_category, top_k};
pub use histogram::mention_histogram;
pub use overview::{
    ads_by_edition, ads_by_page, ads_table, first_appearances_by_year, metrics,
    placements_by_year_page,
};
pub use prevalence::describe_category;
