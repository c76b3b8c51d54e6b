//! `solve`: run the block driver over a JSON block file.

use std::path::Path;

use serde::Deserialize;
use sparsetone::primitives::Vector;

use super::{load_config, read_json, write_json, SolveReport};
use crate::error::{CliError, Result};

/// Either pre-cut blocks or one long signal.
#[derive(Deserialize)]
#[serde(untagged)]
enum BlockInput {
    Blocks(Vec<Vec<f64>>),
    Signal(Vec<f64>),
}

/// Cuts a signal into consecutive blocks, zero-padding the last one.
fn split_signal(signal: &[f64], block_length: usize) -> Vec<Vector<f64>> {
    signal
        .chunks(block_length)
        .map(|chunk| {
            let mut block = chunk.to_vec();
            block.resize(block_length, 0.0);
            Vector::from_vec(block)
        })
        .collect()
}

pub(crate) fn run(
    config: Option<&Path>,
    blocks: &Path,
    output: Option<&Path>,
    parallel: bool,
) -> Result<()> {
    let mut config = load_config(config)?;
    config.parallel |= parallel;
    let dict = config.dictionary.build_dictionary()?;

    let blocks = match read_json::<BlockInput>(blocks)? {
        BlockInput::Blocks(blocks) => blocks.into_iter().map(Vector::from_vec).collect(),
        BlockInput::Signal(signal) => split_signal(&signal, dict.block_length()),
    };
    if blocks.is_empty() {
        return Err(CliError::InvalidInput("no signal blocks".to_string()));
    }
    tracing::info!(blocks = blocks.len(), atoms = dict.n_atoms(), "solving");

    let solutions = config.driver(&dict).solve_blocks(&blocks)?;
    let report = SolveReport {
        frequencies: config.dictionary.resolved_frequencies(),
        group_size: dict.group_size(),
        block_length: dict.block_length(),
        blocks: solutions,
    };
    write_json(&report, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_signal_pads_tail() {
        let blocks = split_signal(&[1.0, 2.0, 3.0, 4.0, 5.0], 2);
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[2].as_slice(), &[5.0, 0.0]);
    }

    #[test]
    fn test_block_input_shapes() {
        let nested: BlockInput = serde_json::from_str("[[1.0, 2.0], [3.0, 4.0]]").expect("nested");
        assert!(matches!(nested, BlockInput::Blocks(b) if b.len() == 2));
        let flat: BlockInput = serde_json::from_str("[1.0, 2.0, 3.0]").expect("flat");
        assert!(matches!(flat, BlockInput::Signal(s) if s.len() == 3));
    }
}
