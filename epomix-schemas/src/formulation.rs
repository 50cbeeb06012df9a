use crate::{hardener::Hardener, resin::Resin};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formulation {
    pub formulation_id: String,
    pub formulation_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub resins: Vec<Resin>,
    pub hardeners: Vec<Hardener>,
    /// 1.0 is chemically balanced; above 1.0 doses the amine in excess,
    /// below 1.0 the epoxy.
    #[serde(default = "default_stoichiometry")]
    pub stoichiometry: f64,
}

fn default_stoichiometry() -> f64 {
    1.0
}
