use crate::formulation::engine::CalculationResult;
use epomix_schemas::{
    hardener::Hardener,
    resin::{EewBasis, Resin},
};

/// Qualitative resin profile, banded on the weight-averaged solid-basis EEW.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResinProfile {
    HighCrosslinkDensity,
    StandardPrimer,
    HighMolecularWeight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardenerProfile {
    HighReactivity,
    StandardPolyamide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoichiometryBalance {
    AmineExcess,
    Balanced,
    EpoxyExcess,
}

/// Structured verdict on a computable formulation. Band fields are `None`
/// when the averaged value falls outside every band; the stoichiometry
/// classification is exhaustive.
#[derive(Debug, Clone, PartialEq)]
pub struct FormulationProfile {
    pub resin: Option<ResinProfile>,
    pub hardener: Option<HardenerProfile>,
    pub stoichiometry: StoichiometryBalance,
    pub weighted_solid_eew: f64,
    pub weighted_ahew: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Advice {
    /// The inputs do not form a computable formulation yet.
    InvalidInput,
    Report(FormulationProfile),
}

/// Classifies the aggregate formulation into qualitative bands. Decision
/// logic only; mapping bands to display text is the presentation layer's
/// job.
pub fn classify(
    result: &CalculationResult,
    resins: &[Resin],
    hardeners: &[Hardener],
    stoichiometry: f64,
) -> Advice {
    if !result.weights_valid || result.mixture_eew <= 0.0 || result.mixture_ahew <= 0.0 {
        return Advice::InvalidInput;
    }

    let weighted_solid_eew = weighted_solid_eew(resins);
    let weighted_ahew = weighted_ahew(hardeners);

    Advice::Report(FormulationProfile {
        resin: resin_profile(weighted_solid_eew),
        hardener: hardener_profile(weighted_ahew),
        stoichiometry: stoichiometry_balance(stoichiometry),
        weighted_solid_eew,
        weighted_ahew,
    })
}

/// Weight-averaged EEW on a solids basis. Solution-basis entries are scaled
/// by their NV here, with unset NV counting as 100. This is a coarser
/// metric than the aggregator's solution-basis EEW and feeds the banding
/// only, not the mixing ratio.
pub fn weighted_solid_eew(resins: &[Resin]) -> f64 {
    resins
        .iter()
        .map(|resin| {
            let solid_eew = match resin.basis {
                EewBasis::Solid => resin.eew,
                EewBasis::Solution => {
                    let nv = if resin.nv > 0.0 { resin.nv } else { 100.0 };
                    resin.eew * (nv / 100.0)
                }
            };
            solid_eew * resin.weight_percentage
        })
        .sum::<f64>()
        / 100.0
}

/// Weight-averaged AHEW of the as-supplied hardeners, ignoring dilution.
pub fn weighted_ahew(hardeners: &[Hardener]) -> f64 {
    hardeners
        .iter()
        .map(|hardener| hardener.ahew * hardener.weight_percentage)
        .sum::<f64>()
        / 100.0
}

fn resin_profile(weighted_solid_eew: f64) -> Option<ResinProfile> {
    if weighted_solid_eew <= 0.0 {
        return None;
    }
    if weighted_solid_eew < 300.0 {
        Some(ResinProfile::HighCrosslinkDensity)
    } else if (450.0..=600.0).contains(&weighted_solid_eew) {
        Some(ResinProfile::StandardPrimer)
    } else if weighted_solid_eew > 700.0 {
        Some(ResinProfile::HighMolecularWeight)
    } else {
        // (300, 450) and (600, 700) carry no band.
        None
    }
}

fn hardener_profile(weighted_ahew: f64) -> Option<HardenerProfile> {
    if weighted_ahew <= 0.0 {
        return None;
    }
    if weighted_ahew < 100.0 {
        Some(HardenerProfile::HighReactivity)
    } else if weighted_ahew <= 250.0 {
        Some(HardenerProfile::StandardPolyamide)
    } else {
        None
    }
}

fn stoichiometry_balance(factor: f64) -> StoichiometryBalance {
    if factor > 1.05 {
        StoichiometryBalance::AmineExcess
    } else if factor < 0.95 {
        StoichiometryBalance::EpoxyExcess
    } else {
        StoichiometryBalance::Balanced
    }
}
