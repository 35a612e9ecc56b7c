use async_trait::async_trait;
use log::debug;
use serde_json::Value;

use super::{NutritionApi, NutritionError};
use crate::food::config::NutritionConfig;

/// Client for the `/api/fruit` nutrition endpoints.
#[derive(Debug, Clone)]
pub struct FruitApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl FruitApiClient {
    pub fn new(config: NutritionConfig) -> Result<Self, NutritionError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn fruit_url(&self, term: &str) -> String {
        format!("{}/api/fruit/{}", self.base_url, urlencoding::encode(term))
    }
}

#[async_trait]
impl NutritionApi for FruitApiClient {
    async fn fetch_exact(&self, term: &str) -> Result<Option<Value>, NutritionError> {
        let response = self.client.get(self.fruit_url(term)).send().await?;

        if !response.status().is_success() {
            debug!("No exact match for '{}': {}", term, response.status());
            return Ok(None);
        }

        let data: Value = response.json().await?;

        // Some deployments answer 200 with {"error": "Not found"}
        if data.get("error").is_some() && data.get("name").is_none() {
            debug!("No exact match for '{}': {}", term, data["error"]);
            return Ok(None);
        }

        if !data.is_object() {
            return Err(NutritionError::Payload(format!(
                "expected a JSON object for '{}'",
                term
            )));
        }

        Ok(Some(data))
    }

    async fn fetch_all(&self) -> Result<Vec<Value>, NutritionError> {
        let response = self.client.get(self.fruit_url("all")).send().await?;

        if !response.status().is_success() {
            return Err(NutritionError::Status(response.status()));
        }

        match response.json::<Value>().await? {
            Value::Array(fruits) => {
                debug!("Fetched {} fruits from bulk listing", fruits.len());
                Ok(fruits)
            }
            _ => Err(NutritionError::Payload(
                "expected a JSON array from the bulk listing".to_string(),
            )),
        }
    }
}
