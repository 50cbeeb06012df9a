use epomix_core::advice::{self, Advice, HardenerProfile, ResinProfile, StoichiometryBalance};
use epomix_core::error::FormulaError;
use epomix_core::formulation::state::FormulationState;
use epomix_core::logger::BreakdownLogger;
use epomix_schemas::command::FormulationEdit;
use epomix_schemas::formulation::Formulation;
use epomix_schemas::hardener::Hardener;
use epomix_schemas::resin::{EewBasis, Resin};

fn primer_definition() -> Formulation {
    Formulation {
        formulation_id: "primer".to_string(),
        formulation_name: "Solvent-borne epoxy primer".to_string(),
        description: None,
        resins: vec![Resin {
            id: 0,
            eew: 475.0,
            nv: 75.0,
            weight_percentage: 100.0,
            basis: EewBasis::Solid,
        }],
        hardeners: vec![Hardener {
            id: 0,
            ahew: 105.0,
            concentration: 100.0,
            weight_percentage: 100.0,
        }],
        stoichiometry: 1.0,
    }
}

#[test]
fn definition_to_advice_flow() {
    let mut state = FormulationState::from_definition(primer_definition()).unwrap();

    let result = state.calculate();
    assert!(result.weights_valid);
    assert!((result.final_phr - 16.58).abs() < 0.01);
    assert!((result.mix_ratio - 6.03).abs() < 0.01);

    // Shift the dose to 20% amine excess and recompute wholesale.
    state
        .apply(FormulationEdit::SetStoichiometry { value: 1.2 })
        .unwrap();
    let result = state.calculate();
    assert!((result.final_phr - 19.89).abs() < 0.01);

    match advice::classify(&result, state.resins(), state.hardeners(), state.stoichiometry()) {
        Advice::Report(profile) => {
            assert_eq!(profile.resin, Some(ResinProfile::StandardPrimer));
            assert_eq!(profile.hardener, Some(HardenerProfile::StandardPolyamide));
            assert_eq!(profile.stoichiometry, StoichiometryBalance::AmineExcess);
        }
        Advice::InvalidInput => panic!("expected a computable formulation"),
    }
}

#[test]
fn editing_keeps_lists_and_results_consistent() {
    let mut state = FormulationState::from_definition(primer_definition()).unwrap();

    state.apply(FormulationEdit::AddHardener).unwrap();
    let new_id = state.hardeners()[1].id;
    state
        .apply(FormulationEdit::SetHardenerAhew { id: new_id, value: 95.0 })
        .unwrap();
    state
        .apply(FormulationEdit::SetHardenerWeight { id: new_id, value: 50.0 })
        .unwrap();

    // 150% total on part B invalidates the result without erroring.
    let result = state.calculate();
    assert!(!result.weights_valid);
    assert_eq!(result.final_phr, 0.0);

    let first_id = state.hardeners()[0].id;
    state
        .apply(FormulationEdit::SetHardenerWeight { id: first_id, value: 50.0 })
        .unwrap();
    let result = state.calculate();
    assert!(result.weights_valid);
    assert!(result.final_phr > 0.0);

    state
        .apply(FormulationEdit::RemoveHardener { id: first_id })
        .unwrap();
    let removal = state.apply(FormulationEdit::RemoveHardener { id: new_id });
    assert!(matches!(removal, Err(FormulaError::LastComponent)));
}

#[test]
fn breakdown_logger_writes_component_rows() {
    let state = FormulationState::from_definition(primer_definition()).unwrap();
    let result = state.calculate();

    let path = std::env::temp_dir().join("epomix_breakdown_flow.csv");
    let path_str = path.to_str().unwrap();
    let mut logger = BreakdownLogger::new(path_str).unwrap();
    logger.log_result(&result).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("part,component,weight_percent"));
    assert!(written.contains("resin,1,"));
    assert!(written.contains("hardener,1,"));
    std::fs::remove_file(&path).ok();
}
