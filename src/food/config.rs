use std::time::Duration;

pub const DEFAULT_FRUIT_API_URL: &str = "https://my.smoothiefroot.com";

#[derive(Debug, Clone)]
pub struct NutritionConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl NutritionConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FRUIT_API_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}
