pub mod category;
pub mod chart;
pub mod dashboard;
pub mod describe;
pub mod status;
pub mod summary;
