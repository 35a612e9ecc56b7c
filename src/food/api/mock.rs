//! In-memory [`NutritionApi`] for tests. Records every call so tests can
//! assert on the order of lookups and on how often the bulk listing is hit.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{NutritionApi, NutritionError};

#[derive(Default)]
pub struct MockNutritionApi {
    exact: HashMap<String, Value>,
    listing: Option<Vec<Value>>,
    exact_down: bool,
    exact_calls: Mutex<Vec<String>>,
    listing_calls: AtomicUsize,
}

impl MockNutritionApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exact(mut self, term: &str, record: Value) -> Self {
        self.exact.insert(term.to_string(), record);
        self
    }

    /// Serves `fruits` from the bulk endpoint. Without this the bulk endpoint fails.
    pub fn with_listing(mut self, fruits: Vec<Value>) -> Self {
        self.listing = Some(fruits);
        self
    }

    /// Makes every exact lookup fail as if the host were unreachable.
    pub fn exact_down(mut self) -> Self {
        self.exact_down = true;
        self
    }

    pub fn exact_calls(&self) -> Vec<String> {
        self.exact_calls.lock().unwrap().clone()
    }

    pub fn listing_calls(&self) -> usize {
        self.listing_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NutritionApi for MockNutritionApi {
    async fn fetch_exact(&self, term: &str) -> Result<Option<Value>, NutritionError> {
        self.exact_calls.lock().unwrap().push(term.to_string());
        if self.exact_down {
            return Err(NutritionError::Payload("connection refused".to_string()));
        }
        Ok(self.exact.get(term).cloned())
    }

    async fn fetch_all(&self) -> Result<Vec<Value>, NutritionError> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        self.listing
            .clone()
            .ok_or_else(|| NutritionError::Payload("bulk listing offline".to_string()))
    }
}
