//! Sub-command implementations.

pub(crate) mod activity;
pub(crate) mod info;
pub(crate) mod solve;

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sparsetone::config::RunConfig;
use sparsetone::driver::BlockSolution;

use crate::error::{CliError, Result};

/// Output of `solve`, input of `activity`.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SolveReport {
    /// Atom frequencies in dictionary order
    pub frequencies: Vec<f64>,
    pub group_size: usize,
    pub block_length: usize,
    pub blocks: Vec<BlockSolution>,
}

fn ensure_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.to_path_buf()));
    }
    Ok(())
}

/// Reads and parses a JSON file.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    ensure_file(path)?;
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Config file if given, defaults otherwise.
pub(crate) fn load_config(path: Option<&Path>) -> Result<RunConfig> {
    match path {
        Some(path) => {
            ensure_file(path)?;
            Ok(RunConfig::load(path)?)
        }
        None => Ok(RunConfig::default()),
    }
}

/// Pretty JSON to `output`, or stdout.
pub(crate) fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            fs::write(path, text)?;
            tracing::debug!(path = %path.display(), "wrote output");
        }
        None => println!("{text}"),
    }
    Ok(())
}
