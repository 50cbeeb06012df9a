use crate::{
    error::FormulaError,
    formulation::engine::{CalculationResult, ComponentLine},
};
use csv::Writer;
use serde::Serialize;
use std::fs;

#[derive(Debug, Serialize)]
struct BreakdownRow<'a> {
    part: &'a str,
    component: usize,
    weight_percent: f64,
    effective_equivalent_weight: f64,
    equivalents: f64,
}

/// Writes the per-component derivation of a result as CSV, one row per
/// breakdown line.
pub struct BreakdownLogger {
    path: String,
    writer: Writer<fs::File>,
}

impl BreakdownLogger {
    pub fn new(path: &str) -> Result<Self, FormulaError> {
        let writer =
            Writer::from_path(path).map_err(|e| FormulaError::CsvError(path.to_string(), e))?;
        Ok(Self {
            path: path.to_string(),
            writer,
        })
    }

    pub fn log_result(&mut self, result: &CalculationResult) -> Result<(), FormulaError> {
        for line in &result.resin_breakdown {
            self.write_line("resin", line)?;
        }
        for line in &result.hardener_breakdown {
            self.write_line("hardener", line)?;
        }
        self.writer
            .flush()
            .map_err(|e| FormulaError::FileIO(self.path.clone(), e))?;
        Ok(())
    }

    fn write_line(&mut self, part: &str, line: &ComponentLine) -> Result<(), FormulaError> {
        let row = BreakdownRow {
            part,
            component: line.index,
            weight_percent: line.weight_percent,
            effective_equivalent_weight: line.effective_equivalent_weight,
            equivalents: line.equivalents,
        };
        self.writer
            .serialize(row)
            .map_err(|e| FormulaError::CsvError(self.path.clone(), e))
    }
}
