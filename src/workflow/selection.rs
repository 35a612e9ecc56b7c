use serde::Serialize;
use thiserror::Error;

use super::model::FruitOption;

pub const MAX_SELECTIONS: usize = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("You can only choose up to {max} ingredients, '{fruit}' was not added")]
    LimitReached { fruit: String, max: usize },
    #[error("'{0}' is already in your smoothie")]
    Duplicate(String),
    #[error("'{0}' is not on the fruit list")]
    UnknownFruit(String),
}

/// Ordered set of chosen fruit names, bounded to [`MAX_SELECTIONS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    fruits: Vec<FruitOption>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name` if it is a catalog entry not chosen yet and the limit is not reached.
    pub fn add(&mut self, name: &str, catalog: &[FruitOption]) -> Result<(), SelectionError> {
        let option = catalog
            .iter()
            .find(|option| option.name == name)
            .ok_or_else(|| SelectionError::UnknownFruit(name.to_string()))?;

        if self.contains(name) {
            return Err(SelectionError::Duplicate(name.to_string()));
        }

        if self.fruits.len() >= MAX_SELECTIONS {
            return Err(SelectionError::LimitReached {
                fruit: name.to_string(),
                max: MAX_SELECTIONS,
            });
        }

        self.fruits.push(option.clone());
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fruits.iter().any(|fruit| fruit.name == name)
    }

    pub fn fruits(&self) -> &[FruitOption] {
        &self.fruits
    }

    pub fn names(&self) -> Vec<String> {
        self.fruits.iter().map(|fruit| fruit.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.fruits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fruits.is_empty()
    }

    /// Every chosen name followed by a single space, in selection order.
    pub fn ingredients_string(&self) -> String {
        let mut ingredients = String::new();
        for fruit in &self.fruits {
            ingredients.push_str(&fruit.name);
            ingredients.push(' ');
        }
        ingredients
    }
}
