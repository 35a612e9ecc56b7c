pub mod api;
pub mod commands;
pub mod config;
pub mod database;
pub mod food;
pub mod workflow;

// Re-export commonly used items
pub use config::AppConfig;
pub use database::{SqliteWarehouse, Warehouse};
pub use food::FruitApiClient;
pub use workflow::{OrderRequest, OrderWorkflow, RunReport};
