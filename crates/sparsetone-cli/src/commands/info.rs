//! `info`: dictionary shape and step size for a configuration.

use std::path::Path;

use serde::Serialize;

use super::{load_config, write_json};
use crate::error::Result;

#[derive(Serialize)]
struct DictionaryInfo {
    block_length: usize,
    n_atoms: usize,
    n_coefficients: usize,
    group_size: usize,
    sample_rate: f64,
    lipschitz: f64,
    min_frequency: f64,
    max_frequency: f64,
}

pub(crate) fn run(config: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(config)?;
    let dict = config.dictionary.build_dictionary()?;
    let frequencies = config.dictionary.resolved_frequencies();

    let info = DictionaryInfo {
        block_length: dict.block_length(),
        n_atoms: dict.n_atoms(),
        n_coefficients: dict.n_coefficients(),
        group_size: dict.group_size(),
        sample_rate: config.dictionary.sample_rate,
        lipschitz: dict.lipschitz(),
        min_frequency: frequencies.iter().copied().fold(f64::INFINITY, f64::min),
        max_frequency: frequencies.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    };

    if json {
        return write_json(&info, None);
    }
    println!("Block length:   {}", info.block_length);
    println!("Atoms:          {}", info.n_atoms);
    println!("Coefficients:   {}", info.n_coefficients);
    println!("Group size:     {}", info.group_size);
    println!("Sample rate:    {} Hz", info.sample_rate);
    println!(
        "Frequencies:    {:.3} .. {:.3} Hz",
        info.min_frequency, info.max_frequency
    );
    println!("Lipschitz (L):  {:.6}", info.lipschitz);
    println!("Step (1/L):     {:.6e}", 1.0 / info.lipschitz);
    Ok(())
}
