//! In-memory [`Warehouse`] for tests, with switchable failures and counters
//! for opened and closed sessions.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::database::DataAccessError;
use super::traits::{Warehouse, WarehouseSession};
use crate::workflow::{FruitOption, Order, OrderAck};

#[derive(Default)]
struct Shared {
    orders: Mutex<Vec<Order>>,
    opened: AtomicUsize,
    closed: AtomicUsize,
}

#[derive(Clone, Default)]
pub struct MockWarehouse {
    catalog: Vec<FruitOption>,
    unreachable: bool,
    catalog_down: bool,
    orders_down: bool,
    shared: Arc<Shared>,
}

impl MockWarehouse {
    pub fn with_catalog(fruits: &[(&str, Option<&str>)]) -> Self {
        Self {
            catalog: fruits
                .iter()
                .map(|(name, alias)| FruitOption::new(*name, alias.map(str::to_string)))
                .collect(),
            ..Self::default()
        }
    }

    /// `open` itself fails.
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    pub fn catalog_down(mut self) -> Self {
        self.catalog_down = true;
        self
    }

    pub fn orders_down(mut self) -> Self {
        self.orders_down = true;
        self
    }

    pub fn orders(&self) -> Vec<Order> {
        self.shared.orders.lock().unwrap().clone()
    }

    pub fn opened(&self) -> usize {
        self.shared.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.shared.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Warehouse for MockWarehouse {
    async fn open(&self) -> Result<Box<dyn WarehouseSession>, DataAccessError> {
        if self.unreachable {
            return Err(DataAccessError::Connection("warehouse unreachable".to_string()));
        }
        self.shared.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockSession {
            warehouse: self.clone(),
        }))
    }
}

struct MockSession {
    warehouse: MockWarehouse,
}

#[async_trait]
impl WarehouseSession for MockSession {
    async fn list_fruit_options(&self) -> Result<Vec<FruitOption>, DataAccessError> {
        if self.warehouse.catalog_down {
            return Err(DataAccessError::Connection("catalog query failed".to_string()));
        }
        Ok(self.warehouse.catalog.clone())
    }

    async fn submit_order(&self, order: &Order) -> Result<OrderAck, DataAccessError> {
        if self.warehouse.orders_down {
            return Err(DataAccessError::Connection("insufficient privileges on orders".to_string()));
        }
        let mut orders = self.warehouse.shared.orders.lock().unwrap();
        orders.push(order.clone());
        Ok(OrderAck {
            order_id: orders.len() as i64,
            submitted_at: Utc::now(),
        })
    }

    async fn close(self: Box<Self>) -> Result<(), DataAccessError> {
        self.warehouse.shared.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
