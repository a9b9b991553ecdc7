use std::{fs, path::Path};

use anyhow::{Context, Result};
use strata_core::WorldConstants;

/// Reads and validates world constants from a TOML file.
pub(crate) fn load_constants(path: &Path) -> Result<WorldConstants> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read world constants at {}", path.display()))?;
    parse_constants(&contents)
        .with_context(|| format!("invalid world constants in {}", path.display()))
}

fn parse_constants(contents: &str) -> Result<WorldConstants> {
    let constants: WorldConstants =
        toml::from_str(contents).context("failed to parse world constants toml")?;
    constants.validate()?;
    Ok(constants)
}
