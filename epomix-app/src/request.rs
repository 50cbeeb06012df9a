use serde::Deserialize;

/// A batch of calculations to run against the formulation library.
#[derive(Debug, Deserialize)]
pub struct CalculationRequest {
    pub runs: Vec<RunRequest>,
}

#[derive(Debug, Deserialize)]
pub struct RunRequest {
    pub formulation_id: String,
    /// Extra stoichiometry factors to tabulate alongside the formulation's
    /// own factor.
    #[serde(default)]
    pub stoichiometry_overrides: Vec<f64>,
}
