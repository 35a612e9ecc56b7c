use async_trait::async_trait;

use super::database::DataAccessError;
use crate::workflow::{FruitOption, Order, OrderAck};

/// Source of warehouse sessions. Every workflow run opens its own session.
#[async_trait]
pub trait Warehouse: Send + Sync {
    async fn open(&self) -> Result<Box<dyn WarehouseSession>, DataAccessError>;
}

/// One open connection to the warehouse, serving as both catalog source and order sink.
#[async_trait]
pub trait WarehouseSession: Send + Sync {
    async fn list_fruit_options(&self) -> Result<Vec<FruitOption>, DataAccessError>;

    async fn submit_order(&self, order: &Order) -> Result<OrderAck, DataAccessError>;

    /// Releases the connection. Dropping the session without calling this
    /// still releases it, but any close error is lost.
    async fn close(self: Box<Self>) -> Result<(), DataAccessError>;
}
