use anyhow::{Context, Result};
use epomix_schemas::{file_formats::FormulationFile, formulation::Formulation};
use std::{collections::HashMap, fs, path::Path};

/// All formulation definitions available to a batch run, keyed by id.
pub struct FormulationLibrary {
    formulations: HashMap<String, Formulation>,
}

impl FormulationLibrary {
    /// Loads every YAML formulation file in the given directory.
    pub fn load(dir: &Path) -> Result<Self> {
        println!("Loading formulation library from '{}'...", dir.display());

        let mut formulations = HashMap::new();
        for entry in
            fs::read_dir(dir).with_context(|| format!("Failed to read directory: {:?}", dir))?
        {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && path.extension().map_or(false, |s| s == "yaml" || s == "yml") {
                let content = fs::read_to_string(&path)?;
                let file: FormulationFile = serde_yaml::from_str(&content)
                    .with_context(|| format!("Failed to parse YAML from {:?}", path))?;

                for formulation in file.formulations {
                    formulations.insert(formulation.formulation_id.clone(), formulation);
                }
            }
        }

        println!(
            "Formulation library loaded: {} formulation(s).",
            formulations.len()
        );
        Ok(Self { formulations })
    }

    pub fn get(&self, id: &str) -> Option<&Formulation> {
        self.formulations.get(id)
    }
}
