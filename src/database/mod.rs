pub mod database;
#[cfg(test)]
pub mod mock;
pub mod schema;
pub mod traits;

pub use database::{DataAccessError, SqliteSession, SqliteWarehouse};
pub use schema::{TableNames, DEFAULT_FRUITS};
pub use traits::{Warehouse, WarehouseSession};
