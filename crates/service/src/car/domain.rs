use serde::{Deserialize, Serialize};

/// Car fields accepted on create and update. Any `id` in the payload is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarInput {
    pub make: String,
    pub model: String,
    pub price_per_day: f64,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool { true }
