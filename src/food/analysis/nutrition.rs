use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

use crate::food::api::NutritionApi;
use crate::workflow::FruitOption;

/// Which endpoint produced a nutrition record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NutritionSource {
    Exact,
    Listing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    Found {
        term: String,
        source: NutritionSource,
        record: Value,
    },
    NotFound {
        message: String,
    },
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found { .. })
    }
}

enum BulkListing {
    Pending,
    Loaded(Vec<Value>),
    Unavailable(String),
}

/// Lowercases `term` and removes all whitespace, e.g. "Dragon Fruit" -> "dragonfruit".
pub fn normalize_term(term: &str) -> String {
    term.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Case-insensitive scan of the bulk listing. Each candidate is tried against
/// the whole listing before moving on to the next one.
pub fn find_in_listing<'v>(listing: &'v [Value], candidates: &[&str]) -> Option<&'v Value> {
    candidates.iter().find_map(|candidate| {
        let candidate = candidate.to_lowercase();
        listing.iter().find(|fruit| {
            fruit
                .get("name")
                .and_then(Value::as_str)
                .map(|name| name.to_lowercase() == candidate)
                .unwrap_or(false)
        })
    })
}

/// Two-tier lookup for one workflow run: exact endpoint first, then the bulk
/// listing. The listing is requested at most once per resolver.
pub struct NutritionResolver<'a> {
    api: &'a dyn NutritionApi,
    listing: BulkListing,
}

impl<'a> NutritionResolver<'a> {
    pub fn new(api: &'a dyn NutritionApi) -> Self {
        Self {
            api,
            listing: BulkListing::Pending,
        }
    }

    pub async fn resolve(&mut self, fruit: &FruitOption) -> Resolution {
        let term = normalize_term(&fruit.search_alias);
        debug!("Looking up nutrition for {} as '{}'", fruit.name, term);

        let exact_failure = match self.api.fetch_exact(&term).await {
            Ok(Some(record)) => {
                return Resolution::Found {
                    term,
                    source: NutritionSource::Exact,
                    record,
                }
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Exact lookup for '{}' failed: {}", term, e);
                Some(e.to_string())
            }
        };

        let candidates = [term.as_str(), fruit.name.as_str()];
        let found = match self.listing().await {
            Ok(listing) => find_in_listing(listing, &candidates).cloned(),
            Err(reason) => {
                let mut message = format!(
                    "Nutrition data for {} is unavailable: {}",
                    fruit.name, reason
                );
                if let Some(exact) = exact_failure {
                    message.push_str(&format!(" (exact lookup: {})", exact));
                }
                return Resolution::NotFound { message };
            }
        };

        match found {
            Some(record) => Resolution::Found {
                term,
                source: NutritionSource::Listing,
                record,
            },
            None => Resolution::NotFound {
                message: format!(
                    "Sorry, {} was not found in the nutrition database (searched for '{}').",
                    fruit.name, term
                ),
            },
        }
    }

    async fn listing(&mut self) -> Result<&[Value], String> {
        if let BulkListing::Pending = self.listing {
            self.listing = match self.api.fetch_all().await {
                Ok(fruits) => BulkListing::Loaded(fruits),
                Err(e) => {
                    warn!("Bulk fruit listing failed: {}", e);
                    BulkListing::Unavailable(e.to_string())
                }
            };
        }

        match &self.listing {
            BulkListing::Loaded(fruits) => Ok(fruits.as_slice()),
            BulkListing::Unavailable(reason) => Err(reason.clone()),
            BulkListing::Pending => Err("bulk listing was not loaded".to_string()),
        }
    }
}

/// Flattens a nutrition record into (field, value) rows for tabular display.
/// Nested objects become dotted keys, e.g. `nutritions.sugar`.
pub fn flatten_record(record: &Value) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    flatten_into(&mut rows, None, record);
    rows
}

fn flatten_into(rows: &mut Vec<(String, String)>, prefix: Option<&str>, value: &Value) {
    match value {
        Value::Object(fields) => {
            for (key, field) in fields {
                let path = match prefix {
                    Some(prefix) => format!("{}.{}", prefix, key),
                    None => key.clone(),
                };
                flatten_into(rows, Some(&path), field);
            }
        }
        other => rows.push((
            prefix.unwrap_or("value").to_string(),
            display_scalar(other),
        )),
    }
}

fn display_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_scalar)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
