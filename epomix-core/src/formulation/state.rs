use crate::{
    error::FormulaError,
    formulation::engine::{self, CalculationResult},
};
use epomix_schemas::{
    command::FormulationEdit,
    formulation::Formulation,
    hardener::Hardener,
    resin::{EewBasis, Resin},
};

/// Editable formulation owned by the caller. The engine keeps no state of
/// its own; every recomputation reads the current lists wholesale.
#[derive(Debug, Clone)]
pub struct FormulationState {
    pub(super) resins: Vec<Resin>,
    pub(super) hardeners: Vec<Hardener>,
    pub(super) stoichiometry: f64,
    pub(super) next_id: u64,
}

impl FormulationState {
    /// Builds an editable state from a stored definition, assigning fresh
    /// component ids.
    pub fn from_definition(definition: Formulation) -> Result<Self, FormulaError> {
        super::builder::FormulationBuilder::new()
            .with_resins(definition.resins)
            .with_hardeners(definition.hardeners)
            .with_stoichiometry(definition.stoichiometry)
            .build()
    }

    pub fn resins(&self) -> &[Resin] {
        &self.resins
    }

    pub fn hardeners(&self) -> &[Hardener] {
        &self.hardeners
    }

    pub fn stoichiometry(&self) -> f64 {
        self.stoichiometry
    }

    /// Recomputes the full result record from the current inputs.
    pub fn calculate(&self) -> CalculationResult {
        engine::calculate(&self.resins, &self.hardeners, self.stoichiometry)
    }

    /// Applies one typed edit. Components are addressed by id, never by
    /// list position, and neither list can drop below one element.
    pub fn apply(&mut self, edit: FormulationEdit) -> Result<(), FormulaError> {
        match edit {
            FormulationEdit::AddResin => {
                let id = self.fresh_id();
                self.resins.push(Resin {
                    id,
                    eew: 0.0,
                    nv: 100.0,
                    weight_percentage: 0.0,
                    basis: EewBasis::Solution,
                });
            }
            FormulationEdit::RemoveResin { id } => {
                if self.resins.len() <= 1 {
                    return Err(FormulaError::LastComponent);
                }
                let index = self.resin_index(id)?;
                self.resins.remove(index);
            }
            FormulationEdit::SetResinEew { id, value } => self.resin_mut(id)?.eew = value,
            FormulationEdit::SetResinNv { id, value } => self.resin_mut(id)?.nv = value,
            FormulationEdit::SetResinWeight { id, value } => {
                self.resin_mut(id)?.weight_percentage = value
            }
            FormulationEdit::ToggleResinBasis { id } => {
                let resin = self.resin_mut(id)?;
                resin.basis = resin.basis.toggled();
            }
            FormulationEdit::AddHardener => {
                let id = self.fresh_id();
                self.hardeners.push(Hardener {
                    id,
                    ahew: 0.0,
                    concentration: 100.0,
                    weight_percentage: 0.0,
                });
            }
            FormulationEdit::RemoveHardener { id } => {
                if self.hardeners.len() <= 1 {
                    return Err(FormulaError::LastComponent);
                }
                let index = self.hardener_index(id)?;
                self.hardeners.remove(index);
            }
            FormulationEdit::SetHardenerAhew { id, value } => self.hardener_mut(id)?.ahew = value,
            FormulationEdit::SetHardenerConcentration { id, value } => {
                self.hardener_mut(id)?.concentration = value
            }
            FormulationEdit::SetHardenerWeight { id, value } => {
                self.hardener_mut(id)?.weight_percentage = value
            }
            FormulationEdit::SetStoichiometry { value } => {
                if value <= 0.0 {
                    return Err(FormulaError::NonPositiveStoichiometry(value));
                }
                self.stoichiometry = value;
            }
        }
        Ok(())
    }

    fn fresh_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn resin_index(&self, id: u64) -> Result<usize, FormulaError> {
        self.resins
            .iter()
            .position(|r| r.id == id)
            .ok_or(FormulaError::ComponentNotFound(id))
    }

    fn resin_mut(&mut self, id: u64) -> Result<&mut Resin, FormulaError> {
        self.resins
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(FormulaError::ComponentNotFound(id))
    }

    fn hardener_index(&self, id: u64) -> Result<usize, FormulaError> {
        self.hardeners
            .iter()
            .position(|h| h.id == id)
            .ok_or(FormulaError::ComponentNotFound(id))
    }

    fn hardener_mut(&mut self, id: u64) -> Result<&mut Hardener, FormulaError> {
        self.hardeners
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or(FormulaError::ComponentNotFound(id))
    }
}

impl Default for FormulationState {
    /// Seed formulation: one type-1 solid epoxy against a polyamide hardener.
    fn default() -> Self {
        Self {
            resins: vec![Resin {
                id: 1,
                eew: 475.0,
                nv: 75.0,
                weight_percentage: 100.0,
                basis: EewBasis::Solid,
            }],
            hardeners: vec![Hardener {
                id: 2,
                ahew: 105.0,
                concentration: 100.0,
                weight_percentage: 100.0,
            }],
            stoichiometry: 1.0,
            next_id: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_seed_matches_reference_formulation() {
        let result = FormulationState::default().calculate();
        assert!(result.weights_valid);
        assert!((result.final_phr - 16.58).abs() < 0.01);
    }

    #[test]
    fn edits_address_components_by_id() {
        let mut state = FormulationState::default();
        state.apply(FormulationEdit::AddResin).unwrap();
        let second_id = state.resins()[1].id;

        state
            .apply(FormulationEdit::SetResinWeight { id: second_id, value: 40.0 })
            .unwrap();
        assert_eq!(state.resins()[1].weight_percentage, 40.0);
        assert_eq!(state.resins()[0].weight_percentage, 100.0);
    }

    #[test]
    fn added_resin_uses_blank_solution_defaults() {
        let mut state = FormulationState::default();
        state.apply(FormulationEdit::AddResin).unwrap();

        let added = &state.resins()[1];
        assert_eq!(added.eew, 0.0);
        assert_eq!(added.nv, 100.0);
        assert_eq!(added.weight_percentage, 0.0);
        assert_eq!(added.basis, EewBasis::Solution);
        assert_ne!(added.id, state.resins()[0].id);
    }

    #[test]
    fn added_hardener_uses_undiluted_defaults() {
        let mut state = FormulationState::default();
        state.apply(FormulationEdit::AddHardener).unwrap();

        let added = &state.hardeners()[1];
        assert_eq!(added.ahew, 0.0);
        assert_eq!(added.concentration, 100.0);
        assert_eq!(added.weight_percentage, 0.0);
    }

    #[test]
    fn toggle_switches_basis_both_ways() {
        let mut state = FormulationState::default();
        let id = state.resins()[0].id;

        state.apply(FormulationEdit::ToggleResinBasis { id }).unwrap();
        assert_eq!(state.resins()[0].basis, EewBasis::Solution);
        state.apply(FormulationEdit::ToggleResinBasis { id }).unwrap();
        assert_eq!(state.resins()[0].basis, EewBasis::Solid);
    }

    #[test]
    fn each_list_keeps_at_least_one_component() {
        let mut state = FormulationState::default();
        let resin_id = state.resins()[0].id;
        let hardener_id = state.hardeners()[0].id;

        assert!(matches!(
            state.apply(FormulationEdit::RemoveResin { id: resin_id }),
            Err(FormulaError::LastComponent)
        ));
        assert!(matches!(
            state.apply(FormulationEdit::RemoveHardener { id: hardener_id }),
            Err(FormulaError::LastComponent)
        ));
    }

    #[test]
    fn unknown_id_is_reported() {
        let mut state = FormulationState::default();
        assert!(matches!(
            state.apply(FormulationEdit::SetResinEew { id: 999, value: 200.0 }),
            Err(FormulaError::ComponentNotFound(999))
        ));
    }

    #[test]
    fn rejects_non_positive_stoichiometry() {
        let mut state = FormulationState::default();
        assert!(matches!(
            state.apply(FormulationEdit::SetStoichiometry { value: 0.0 }),
            Err(FormulaError::NonPositiveStoichiometry(_))
        ));
        assert!(matches!(
            state.apply(FormulationEdit::SetStoichiometry { value: -1.0 }),
            Err(FormulaError::NonPositiveStoichiometry(_))
        ));
        assert_eq!(state.stoichiometry(), 1.0);
    }

    #[test]
    fn recomputes_wholesale_after_edit() {
        let mut state = FormulationState::default();
        state
            .apply(FormulationEdit::SetStoichiometry { value: 1.2 })
            .unwrap();

        let result = state.calculate();
        assert!((result.final_phr - 19.89).abs() < 0.01);
        assert!((result.mix_ratio - 5.03).abs() < 0.01);
    }
}
