use crate::{error::FormulaError, formulation::state::FormulationState};
use epomix_schemas::{hardener::Hardener, resin::Resin};

/// A fluent builder for constructing a `FormulationState`.
///
/// Component ids from the input are ignored; the builder assigns fresh
/// unique ids so later edits can address components unambiguously.
#[derive(Default)]
pub struct FormulationBuilder {
    resins: Vec<Resin>,
    hardeners: Vec<Hardener>,
    stoichiometry: Option<f64>,
}

impl FormulationBuilder {
    /// Creates a new, empty `FormulationBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resin (part A) components.
    pub fn with_resins(mut self, resins: Vec<Resin>) -> Self {
        self.resins = resins;
        self
    }

    /// Sets the hardener (part B) components.
    pub fn with_hardeners(mut self, hardeners: Vec<Hardener>) -> Self {
        self.hardeners = hardeners;
        self
    }

    /// Sets the stoichiometry factor. Defaults to 1.0 (chemically balanced)
    /// when not called.
    pub fn with_stoichiometry(mut self, factor: f64) -> Self {
        self.stoichiometry = Some(factor);
        self
    }

    /// Consumes the builder and returns an editable formulation.
    ///
    /// # Errors
    ///
    /// Returns a `FormulaError` if either component list is empty or the
    /// stoichiometry factor is not positive.
    pub fn build(self) -> Result<FormulationState, FormulaError> {
        if self.resins.is_empty() {
            return Err(FormulaError::NoResinProvided);
        }
        if self.hardeners.is_empty() {
            return Err(FormulaError::NoHardenerProvided);
        }
        let stoichiometry = self.stoichiometry.unwrap_or(1.0);
        if stoichiometry <= 0.0 {
            return Err(FormulaError::NonPositiveStoichiometry(stoichiometry));
        }

        let mut next_id = 0;
        let resins = self
            .resins
            .into_iter()
            .map(|mut resin| {
                next_id += 1;
                resin.id = next_id;
                resin
            })
            .collect();
        let hardeners = self
            .hardeners
            .into_iter()
            .map(|mut hardener| {
                next_id += 1;
                hardener.id = next_id;
                hardener
            })
            .collect();

        Ok(FormulationState {
            resins,
            hardeners,
            stoichiometry,
            next_id,
        })
    }
}
