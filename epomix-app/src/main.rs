use anyhow::{Context, Result};
use clap::Parser;
use epomix_core::{advice, formulation::state::FormulationState, logger::BreakdownLogger};
use epomix_schemas::formulation::Formulation;
use std::fs;
use std::path::{Path, PathBuf};

mod config;
mod report;
mod request;

/// Batch mixing-ratio calculator for two-component epoxy formulations.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// YAML request file listing the formulations to compute.
    request: PathBuf,

    /// Directory holding the formulation library files.
    #[arg(long, default_value = "./data/formulations")]
    library: PathBuf,

    /// Directory that receives one timestamped folder per batch.
    #[arg(long, default_value = "./data/runs")]
    out: PathBuf,
}

fn main() -> Result<()> {
    println!("--- Epomix Formulation Calculator ---");
    let cli = Cli::parse();

    let request_str = fs::read_to_string(&cli.request)
        .with_context(|| format!("Failed to read request file {:?}", cli.request))?;
    let request: request::CalculationRequest =
        serde_yaml::from_str(&request_str).context("Failed to parse request file")?;

    let library = config::FormulationLibrary::load(&cli.library)?;

    let output_dir = cli
        .out
        .join(format!("batch_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S")));
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory {:?}", output_dir))?;

    // Copy the request file next to the results for traceability.
    fs::copy(&cli.request, output_dir.join("request.yaml"))?;

    for (index, run) in request.runs.iter().enumerate() {
        let formulation = library.get(&run.formulation_id).with_context(|| {
            format!("Formulation '{}' not found in library", run.formulation_id)
        })?;
        run_calculation(index + 1, formulation, run, &output_dir)?;
    }

    println!("\nBatch complete. Results are in '{}'", output_dir.display());
    Ok(())
}

/// Computes one run of the request: prints the report and writes the
/// result record, the breakdown CSV and, when requested, a stoichiometry
/// sweep table into the run's folder.
fn run_calculation(
    number: usize,
    formulation: &Formulation,
    run: &request::RunRequest,
    output_dir: &Path,
) -> Result<()> {
    println!("\n--- Computing: {} ---", formulation.formulation_name);

    let state = FormulationState::from_definition(formulation.clone())?;
    let result = state.calculate();
    let advice = advice::classify(&result, state.resins(), state.hardeners(), state.stoichiometry());

    println!(
        "{}",
        report::render_report(formulation, &result, &advice, state.stoichiometry())
    );

    let run_dir = output_dir.join(format!("{:02}_{}", number, run.formulation_id));
    fs::create_dir_all(&run_dir)?;

    fs::write(run_dir.join("result.json"), result.to_json_pretty()?)?;

    let breakdown_path = run_dir.join("breakdown.csv");
    let breakdown_path = breakdown_path
        .to_str()
        .context("Output path is not valid UTF-8")?;
    let mut logger = BreakdownLogger::new(breakdown_path)?;
    logger.log_result(&result)?;

    if !run.stoichiometry_overrides.is_empty() {
        report::write_stoichiometry_sweep(
            run_dir.join("stoichiometry_sweep.csv"),
            state.resins(),
            state.hardeners(),
            &run.stoichiometry_overrides,
        )?;
    }

    Ok(())
}
