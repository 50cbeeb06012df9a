use serde::{Deserialize, Serialize};

/// Basis on which the epoxy equivalent weight of a resin is reported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EewBasis {
    Solid,
    Solution,
}

impl EewBasis {
    pub fn toggled(self) -> Self {
        match self {
            EewBasis::Solid => EewBasis::Solution,
            EewBasis::Solution => EewBasis::Solid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resin {
    #[serde(default)]
    pub id: u64,
    pub eew: f64,
    /// Non-volatile content in percent. Only meaningful for `Solid` basis.
    #[serde(default = "default_percent")]
    pub nv: f64,
    #[serde(default)]
    pub weight_percentage: f64,
    pub basis: EewBasis,
}

fn default_percent() -> f64 {
    100.0
}
