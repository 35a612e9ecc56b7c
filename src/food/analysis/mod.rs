pub mod nutrition;

pub use nutrition::{flatten_record, normalize_term, NutritionResolver, NutritionSource, Resolution};
