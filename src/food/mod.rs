pub mod analysis;
pub mod api;
pub mod config;

pub use analysis::{NutritionResolver, Resolution};
pub use api::{FruitApiClient, NutritionApi, NutritionError};
pub use config::NutritionConfig;
