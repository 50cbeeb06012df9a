use crate::error::FormulaError;
use epomix_schemas::{
    hardener::Hardener,
    resin::{EewBasis, Resin},
};
use serde::Serialize;

/// One step of the equivalents derivation, kept structured so the
/// presentation layer decides how to display it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentLine {
    pub index: usize,
    pub weight_percent: f64,
    pub effective_equivalent_weight: f64,
    pub equivalents: f64,
}

impl ComponentLine {
    /// Renders the line with the equivalent weight always shown to two
    /// decimals. Used for the hardener side, which has no unusable case.
    pub fn render(&self, label: &str) -> String {
        format!(
            "{} {}: {:.1}% ÷ {:.2} = {:.4}",
            label, self.index, self.weight_percent, self.effective_equivalent_weight, self.equivalents
        )
    }

    /// Renders the line with an `N/A` marker when the effective equivalent
    /// weight is zero. Used for the resin side, where zero NV makes the
    /// entry unusable.
    pub fn render_or_na(&self, label: &str) -> String {
        let ew = if self.effective_equivalent_weight > 0.0 {
            format!("{:.2}", self.effective_equivalent_weight)
        } else {
            "N/A".to_string()
        };
        format!(
            "{} {}: {:.1}% ÷ {} = {:.4}",
            label, self.index, self.weight_percent, ew, self.equivalents
        )
    }
}

/// Totals for one side of the formulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideAggregate {
    pub total_weight: f64,
    pub sum_of_equivalents: f64,
    pub mixture_equivalent_weight: f64,
    pub lines: Vec<ComponentLine>,
}

/// The full result record. Rebuilt wholesale on every recomputation, never
/// patched in place. All ratio fields are zero whenever `weights_valid` is
/// false; consumers must gate on the flag, not on zero values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    pub total_resin_weight: f64,
    pub total_hardener_weight: f64,
    pub resin_breakdown: Vec<ComponentLine>,
    pub hardener_breakdown: Vec<ComponentLine>,
    pub resin_sum_of_equivalents: f64,
    pub hardener_sum_of_equivalents: f64,
    pub mixture_eew: f64,
    pub mixture_ahew: f64,
    pub weights_valid: bool,
    pub theoretical_phr: f64,
    pub final_phr: f64,
    pub mix_ratio: f64,
}

impl CalculationResult {
    pub fn to_json_pretty(&self) -> Result<String, FormulaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Equivalent weight of the resin as a whole solution. A solid-basis EEW is
/// grossed up by the solids content; zero NV marks the entry unusable
/// rather than dividing by zero.
pub fn effective_eew(resin: &Resin) -> f64 {
    let eew = positive_or_zero(resin.eew);
    match resin.basis {
        EewBasis::Solid => {
            let nv = positive_or_zero(resin.nv);
            if nv > 0.0 {
                eew / (nv / 100.0)
            } else {
                0.0
            }
        }
        EewBasis::Solution => eew,
    }
}

/// Equivalent weight of the hardener as supplied. Dilution below 100%
/// grosses up the AHEW; a missing concentration counts as undiluted.
pub fn effective_ahew(hardener: &Hardener) -> f64 {
    let ahew = positive_or_zero(hardener.ahew);
    let concentration = if hardener.concentration > 0.0 {
        hardener.concentration
    } else {
        100.0
    };
    if concentration < 100.0 {
        ahew / (concentration / 100.0)
    } else {
        ahew
    }
}

pub fn aggregate_resins(resins: &[Resin]) -> SideAggregate {
    aggregate(resins.iter().map(|r| (r.weight_percentage, effective_eew(r))))
}

pub fn aggregate_hardeners(hardeners: &[Hardener]) -> SideAggregate {
    aggregate(hardeners.iter().map(|h| (h.weight_percentage, effective_ahew(h))))
}

fn aggregate(components: impl Iterator<Item = (f64, f64)>) -> SideAggregate {
    let mut total_weight = 0.0;
    let mut sum_of_equivalents = 0.0;
    let mut lines = Vec::new();

    for (index, (raw_weight, effective_ew)) in components.enumerate() {
        // The displayed total keeps the raw entry; only the equivalents
        // computation clamps negatives to zero.
        total_weight += raw_weight;
        let weight = positive_or_zero(raw_weight);
        let equivalents = if effective_ew > 0.0 {
            weight / effective_ew
        } else {
            0.0
        };
        sum_of_equivalents += equivalents;
        lines.push(ComponentLine {
            index: index + 1,
            weight_percent: weight,
            effective_equivalent_weight: effective_ew,
            equivalents,
        });
    }

    // Equivalents add linearly across a blend, so the blend's equivalent
    // weight is the mass basis (100) over the total equivalents.
    let mixture_equivalent_weight = if sum_of_equivalents > 0.0 {
        100.0 / sum_of_equivalents
    } else {
        0.0
    };

    SideAggregate {
        total_weight,
        sum_of_equivalents,
        mixture_equivalent_weight,
        lines,
    }
}

fn positive_or_zero(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Computes the complete mixing-ratio record for the given component lists
/// and stoichiometry factor. Pure and total: the same inputs always produce
/// the identical record, and no input can make it panic.
pub fn calculate(resins: &[Resin], hardeners: &[Hardener], stoichiometry: f64) -> CalculationResult {
    let part_a = aggregate_resins(resins);
    let part_b = aggregate_hardeners(hardeners);

    let weights_valid =
        part_a.total_weight.round() == 100.0 && part_b.total_weight.round() == 100.0;

    let mut theoretical_phr = 0.0;
    let mut final_phr = 0.0;
    let mut mix_ratio = 0.0;

    if weights_valid
        && part_a.mixture_equivalent_weight > 0.0
        && part_b.mixture_equivalent_weight > 0.0
    {
        theoretical_phr =
            part_b.mixture_equivalent_weight * 100.0 / part_a.mixture_equivalent_weight;
        final_phr = theoretical_phr * stoichiometry;
        mix_ratio = if final_phr > 0.0 { 100.0 / final_phr } else { 0.0 };
    }

    CalculationResult {
        total_resin_weight: part_a.total_weight,
        total_hardener_weight: part_b.total_weight,
        resin_breakdown: part_a.lines,
        hardener_breakdown: part_b.lines,
        resin_sum_of_equivalents: part_a.sum_of_equivalents,
        hardener_sum_of_equivalents: part_b.sum_of_equivalents,
        mixture_eew: part_a.mixture_equivalent_weight,
        mixture_ahew: part_b.mixture_equivalent_weight,
        weights_valid,
        theoretical_phr,
        final_phr,
        mix_ratio,
    }
}
