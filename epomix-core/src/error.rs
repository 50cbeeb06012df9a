use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormulaError {
    #[error("Component with id {0} not found in formulation")]
    ComponentNotFound(u64),

    #[error("Each part must keep at least one component")]
    LastComponent,

    #[error("At least one resin must be provided for the calculation")]
    NoResinProvided,

    #[error("At least one hardener must be provided for the calculation")]
    NoHardenerProvided,

    #[error("Stoichiometry factor must be positive, got {0}")]
    NonPositiveStoichiometry(f64),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to write CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),

    #[error("Failed to serialize result to JSON: {0}")]
    JsonExport(#[from] serde_json::Error),
}
