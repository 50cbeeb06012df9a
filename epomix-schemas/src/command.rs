use serde::Deserialize;

/// The closed set of edits a front end may apply to a formulation.
/// Components are addressed by id, never by list position.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormulationEdit {
    AddResin,
    RemoveResin {
        id: u64,
    },
    SetResinEew {
        id: u64,
        value: f64,
    },
    SetResinNv {
        id: u64,
        value: f64,
    },
    SetResinWeight {
        id: u64,
        value: f64,
    },
    ToggleResinBasis {
        id: u64,
    },
    AddHardener,
    RemoveHardener {
        id: u64,
    },
    SetHardenerAhew {
        id: u64,
        value: f64,
    },
    SetHardenerConcentration {
        id: u64,
        value: f64,
    },
    SetHardenerWeight {
        id: u64,
        value: f64,
    },
    SetStoichiometry {
        value: f64,
    },
}
