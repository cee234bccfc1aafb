pub mod analytics;
pub mod explorer;
