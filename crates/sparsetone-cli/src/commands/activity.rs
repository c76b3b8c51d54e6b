//! `activity`: active atoms per block from a `solve` report.

use std::path::Path;

use serde::Serialize;
use sparsetone::spectrogram::ActivityMap;

use super::{read_json, write_json, SolveReport};
use crate::error::{CliError, Result};

#[derive(Serialize)]
struct ActiveAtom {
    atom: usize,
    frequency: f64,
    magnitude: f64,
}

/// One column of the map: a block, or one σ of a block's sweep.
#[derive(Serialize)]
struct ActivityColumn {
    block: usize,
    sigma_index: usize,
    feasible: bool,
    active: Vec<ActiveAtom>,
}

pub(crate) fn run(solutions: &Path, threshold: f64, json: bool) -> Result<()> {
    if threshold.is_nan() || threshold < 0.0 {
        return Err(CliError::InvalidInput(format!(
            "threshold must be >= 0, got {threshold}"
        )));
    }
    let report: SolveReport = read_json(solutions)?;

    // (block, sigma index, coefficients) per column
    let columns: Vec<_> = report
        .blocks
        .iter()
        .enumerate()
        .flat_map(|(block, solution)| {
            solution
                .coefficients()
                .into_iter()
                .enumerate()
                .map(move |(k, x)| (block, k, x))
        })
        .collect();
    let coefficients: Vec<_> = columns.iter().map(|&(_, _, x)| x).collect();
    let map = ActivityMap::from_coefficients(&coefficients, report.group_size)?;

    if map.n_atoms() > 0 && map.n_atoms() != report.frequencies.len() {
        return Err(CliError::InvalidInput(format!(
            "{} atoms in solutions but {} frequencies",
            map.n_atoms(),
            report.frequencies.len()
        )));
    }

    let rows: Vec<ActivityColumn> = map
        .active(threshold)
        .into_iter()
        .zip(&columns)
        .enumerate()
        .map(|(col, (atoms, &(block, sigma_index, x)))| ActivityColumn {
            block,
            sigma_index,
            feasible: x.is_some(),
            active: atoms
                .into_iter()
                .map(|atom| ActiveAtom {
                    atom,
                    frequency: report.frequencies[atom],
                    magnitude: map.magnitude(atom, col),
                })
                .collect(),
        })
        .collect();

    if json {
        return write_json(&rows, None);
    }
    for row in &rows {
        let label = format!("block {} [{}]", row.block, row.sigma_index);
        if !row.feasible {
            println!("{label}: infeasible");
            continue;
        }
        let atoms: Vec<String> = row
            .active
            .iter()
            .map(|a| format!("{:.2} Hz ({:.4})", a.frequency, a.magnitude))
            .collect();
        if atoms.is_empty() {
            println!("{label}: -");
        } else {
            println!("{label}: {}", atoms.join(", "));
        }
    }
    Ok(())
}
