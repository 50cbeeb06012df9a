use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hardener {
    #[serde(default)]
    pub id: u64,
    pub ahew: f64,
    /// Dilution of the as-supplied hardener in percent.
    #[serde(default = "default_percent")]
    pub concentration: f64,
    #[serde(default)]
    pub weight_percentage: f64,
}

fn default_percent() -> f64 {
    100.0
}
