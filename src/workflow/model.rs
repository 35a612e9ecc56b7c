use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::selection::Selection;

/// One row of the fruit catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FruitOption {
    pub name: String,
    pub search_alias: String,
}

impl FruitOption {
    /// Builds an option from the raw catalog columns. A missing or blank
    /// `SEARCH_ON` value falls back to the fruit name.
    pub fn new(name: impl Into<String>, search_on: Option<String>) -> Self {
        let name = name.into();
        let search_alias = match search_on {
            Some(alias) if !alias.trim().is_empty() => alias,
            _ => name.clone(),
        };

        Self { name, search_alias }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub ingredients: String,
    pub name_on_order: String,
}

impl Order {
    pub fn new(selection: &Selection, name_on_order: impl Into<String>) -> Self {
        Self {
            ingredients: selection.ingredients_string(),
            name_on_order: name_on_order.into(),
        }
    }
}

/// Acknowledgement returned by the order sink for an appended row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAck {
    pub order_id: i64,
    pub submitted_at: DateTime<Utc>,
}
