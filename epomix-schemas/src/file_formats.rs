use crate::formulation::Formulation;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct FormulationFile {
    pub schema_version: String,
    pub formulations: Vec<Formulation>,
}
