mod html;
mod text;

pub use html::{DashboardPage, Panel, TabSection, render_dashboard};
pub use text::{write_aggregate_text, write_json, write_metrics_text, write_prevalence_text};
