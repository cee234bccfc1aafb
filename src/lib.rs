pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod pages;

pub use app::App;
pub use config::DashboardConfig;
pub use error::DashboardError;
