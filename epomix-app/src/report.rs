//! Presentation layer: turns result records and advice verdicts into text.
//! The engine never formats prose; everything user-facing lives here.

use anyhow::Result;
use epomix_core::advice::{Advice, HardenerProfile, ResinProfile, StoichiometryBalance};
use epomix_core::formulation::engine::{self, CalculationResult};
use epomix_schemas::{formulation::Formulation, hardener::Hardener, resin::Resin};
use serde::Serialize;
use std::path::PathBuf;

pub fn render_report(
    formulation: &Formulation,
    result: &CalculationResult,
    advice: &Advice,
    stoichiometry: f64,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n", formulation.formulation_name));
    if let Some(description) = &formulation.description {
        out.push_str(description);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&render_derivation(result, stoichiometry));
    out.push('\n');
    out.push_str(&render_advice(advice));
    out
}

/// The step-by-step calculation trace shown beneath the headline ratio.
pub fn render_derivation(result: &CalculationResult, stoichiometry: f64) -> String {
    if !result.weights_valid || result.mixture_eew <= 0.0 || result.mixture_ahew <= 0.0 {
        return "Waiting for valid input. The weight percentages of part A and part B must \
                each total 100%.\n"
            .to_string();
    }

    let mut out = String::new();
    out.push_str("Part A calculation:\n");
    for line in &result.resin_breakdown {
        out.push_str(&format!("  {}\n", line.render_or_na("Resin")));
    }
    out.push_str(&format!(
        "  Sum of part A equivalents = {:.4}\n",
        result.resin_sum_of_equivalents
    ));
    out.push_str(&format!(
        "  Mixture EEW = 100 ÷ {:.4} = {:.2}\n",
        result.resin_sum_of_equivalents, result.mixture_eew
    ));
    out.push('\n');

    out.push_str("Part B calculation:\n");
    for line in &result.hardener_breakdown {
        out.push_str(&format!("  {}\n", line.render("Hardener")));
    }
    out.push_str(&format!(
        "  Sum of part B equivalents = {:.4}\n",
        result.hardener_sum_of_equivalents
    ));
    out.push_str(&format!(
        "  Mixture AHEW = 100 ÷ {:.4} = {:.2}\n",
        result.hardener_sum_of_equivalents, result.mixture_ahew
    ));
    out.push('\n');

    out.push_str("Final ratio:\n");
    out.push_str(&format!(
        "  Theoretical PHR = ({:.2} ÷ {:.2}) × 100 = {:.2}\n",
        result.mixture_ahew, result.mixture_eew, result.theoretical_phr
    ));
    out.push_str(&format!(
        "  Adjusted PHR = {:.2} × {:.2} = {:.2}\n",
        result.theoretical_phr, stoichiometry, result.final_phr
    ));
    out.push('\n');

    out.push_str(&format!("Recommended mix (PHR)  100 : {:.1}\n", result.final_phr));
    out.push_str(&format!("Parts by weight        {:.2} : 1\n", result.mix_ratio));
    out
}

/// Maps the structured advice verdict to display text. Band thresholds live
/// in the classifier; only the wording lives here.
pub fn render_advice(advice: &Advice) -> String {
    let profile = match advice {
        Advice::InvalidInput => {
            return "## Expert advice\n\nEnter a valid formulation to run the analysis. Make \
                    sure the weight percentages of part A and part B each total 100%.\n"
                .to_string();
        }
        Advice::Report(profile) => profile,
    };

    let mut out = String::from("## Formulation analysis\n\n");
    if let Some(resin) = profile.resin {
        out.push_str(resin_text(resin));
        out.push_str("\n\n");
    }
    if let Some(hardener) = profile.hardener {
        out.push_str(hardener_text(hardener));
        out.push_str("\n\n");
    }
    out.push_str(stoichiometry_text(profile.stoichiometry));
    out.push_str("\n\n");

    out.push_str("## Equivalent weight primer\n\n");
    out.push_str(
        "**About EEW (epoxy equivalent weight):** the **smaller** the value, the **more** \
         reactive groups per unit mass and the denser the crosslinking (harder, more \
         brittle).\n\n",
    );
    out.push_str(
        "**About AHEW (active hydrogen equivalent weight):** the **smaller** the value, the \
         **higher** the amine concentration and the **faster** the reaction (shorter pot \
         life).\n",
    );
    out
}

fn resin_text(profile: ResinProfile) -> &'static str {
    match profile {
        ResinProfile::HighCrosslinkDensity => {
            "⚠️ **High crosslink density (liquid rich):** low epoxy equivalent weight, densely \
             packed reaction sites. Upside: **very high hardness and strong corrosion \
             resistance**; downside: **slow drying (no physical set)**, **hard to sand**, \
             **poor flexibility**."
        }
        ResinProfile::StandardPrimer => {
            "✅ **Standard primer type (solid type 1):** moderate epoxy equivalent weight. \
             Gives **fast physical drying (quick to touch-dry)** and is friendly to **sanding \
             and application**. Good balance of hardness and flexibility."
        }
        ResinProfile::HighMolecularWeight => {
            "ℹ️ **High molecular weight type:** high epoxy equivalent weight, few reaction \
             sites. Upside: **very fast drying and excellent flexibility**; downside: \
             **weaker solvent resistance and low crosslink density**."
        }
    }
}

fn hardener_text(profile: HardenerProfile) -> &'static str {
    match profile {
        HardenerProfile::HighReactivity => {
            "⚠️ **High-reactivity hardener:** low active hydrogen equivalent weight. **Very \
             fast reaction, short pot life**; watch the working time. Films tend to be hard \
             and brittle."
        }
        HardenerProfile::StandardPolyamide => {
            "✅ **Standard hardener:** typical of polyamides. **Moderate pot life (3-6 hr)**, \
             good **adhesion** to metal, well suited to spray application."
        }
    }
}

fn stoichiometry_text(balance: StoichiometryBalance) -> &'static str {
    match balance {
        StoichiometryBalance::AmineExcess => {
            "📈 **Stoichiometry (amine excess):** excess part B can **speed up drying** and \
             improve adhesion on damp substrates, but risks **amine blush** and yellowing."
        }
        StoichiometryBalance::EpoxyExcess => {
            "📉 **Stoichiometry (epoxy excess):** excess part A slows the reaction; films \
             come out **softer, tougher and glossier**, but under-cure and reduced chemical \
             resistance are possible."
        }
        StoichiometryBalance::Balanced => {
            "⚖️ **Stoichiometry (balanced):** a 1:1 reaction ratio gives the **best all-round \
             performance**, including chemical resistance and mechanical strength."
        }
    }
}

#[derive(Debug, Serialize)]
struct SweepRow {
    stoichiometry: f64,
    theoretical_phr: f64,
    final_phr: f64,
    mix_ratio: f64,
}

/// Tabulates the final ratio across stoichiometry factors into a CSV file.
/// Non-positive factors are skipped rather than fed to the engine.
pub fn write_stoichiometry_sweep(
    path: PathBuf,
    resins: &[Resin],
    hardeners: &[Hardener],
    factors: &[f64],
) -> Result<()> {
    let mut writer = csv::Writer::from_path(&path)?;
    for &factor in factors {
        if factor <= 0.0 {
            println!("Skipping non-positive stoichiometry factor {}", factor);
            continue;
        }
        let result = engine::calculate(resins, hardeners, factor);
        writer.serialize(SweepRow {
            stoichiometry: factor,
            theoretical_phr: result.theoretical_phr,
            final_phr: result.final_phr,
            mix_ratio: result.mix_ratio,
        })?;
    }
    writer.flush()?;
    Ok(())
}
