pub mod fruit;
#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

// Re-export common types
pub use fruit::FruitApiClient;

#[derive(Error, Debug)]
pub enum NutritionError {
    #[error("Failed to send request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API request failed with status: {0}")]
    Status(reqwest::StatusCode),
    #[error("Unexpected payload: {0}")]
    Payload(String),
}

/// Read-only access to a fruit nutrition API.
#[async_trait]
pub trait NutritionApi: Send + Sync {
    /// Exact-match lookup. `Ok(None)` means the API answered but has no such fruit.
    async fn fetch_exact(&self, term: &str) -> Result<Option<Value>, NutritionError>;

    /// Every fruit the API knows about.
    async fn fetch_all(&self) -> Result<Vec<Value>, NutritionError>;
}
