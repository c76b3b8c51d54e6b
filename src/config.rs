//! Run configuration loaded from JSON.
//!
//! Every field has a default, so a partial file such as
//!
//! ```json
//! { "dictionary": { "sample_rate": 8000.0, "block_length": 256 },
//!   "mode": { "constrained": { "sigmas": [0.1] } } }
//! ```
//!
//! is a complete configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dictionary::{piano_frequencies, tonal_matrix, Dictionary};
use crate::driver::{BlockDriver, SolveMode};
use crate::error::Result;
use crate::optim::{Apgd, Lscgnm};

/// Tonal dictionary parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Atom frequencies in Hz; `None` selects the 88 piano keys
    pub frequencies: Option<Vec<f64>>,
    /// Sampling rate in Hz
    pub sample_rate: f64,
    /// Samples per block
    pub block_length: usize,
    /// Coefficients per group
    pub group_size: usize,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            frequencies: None,
            sample_rate: 44_100.0,
            block_length: 2048,
            group_size: 2,
        }
    }
}

impl DictionaryConfig {
    /// Frequencies the dictionary will be built from.
    #[must_use]
    pub fn resolved_frequencies(&self) -> Vec<f64> {
        self.frequencies.clone().unwrap_or_else(piano_frequencies)
    }

    /// Builds the dictionary and its Lipschitz constant.
    ///
    /// # Errors
    ///
    /// Invalid frequencies, sample rate, block length or group size.
    pub fn build_dictionary(&self) -> Result<Dictionary> {
        let matrix = tonal_matrix(
            &self.resolved_frequencies(),
            self.sample_rate,
            self.block_length,
        )?;
        Dictionary::new(matrix, self.group_size)
    }
}

/// Everything needed to run the block driver.
///
/// # Example
///
/// ```
/// use sparsetone::config::RunConfig;
/// use sparsetone::driver::SolveMode;
///
/// let config = RunConfig::from_json_str(
///     r#"{ "mode": { "penalized": { "gamma": 0.5 } }, "parallel": true }"#,
/// )
/// .expect("valid config");
///
/// assert_eq!(config.mode, SolveMode::Penalized { gamma: 0.5 });
/// assert!(config.parallel);
/// assert_eq!(config.apgd.max_iter(), 10_000);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub dictionary: DictionaryConfig,
    pub mode: SolveMode,
    /// Inner solver settings, shared by both modes
    pub apgd: Apgd,
    /// Search settings; its own `apgd` field is overridden by `apgd` above
    pub lscgnm: Lscgnm,
    /// Solve blocks on the rayon pool
    pub parallel: bool,
}

impl RunConfig {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// [`SparseToneError::Serialization`](crate::error::SparseToneError::Serialization)
    /// for malformed JSON or mistyped fields.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a configuration file.
    ///
    /// # Errors
    ///
    /// I/O failures or malformed JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded run config");
        Ok(config)
    }

    /// Writes the configuration as pretty JSON.
    ///
    /// # Errors
    ///
    /// I/O or serialization failures.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Driver over `dictionary` configured from this run.
    #[must_use]
    pub fn driver<'a>(&self, dictionary: &'a Dictionary) -> BlockDriver<'a> {
        BlockDriver::new(dictionary, self.mode.clone())
            .with_lscgnm(self.lscgnm.with_apgd(self.apgd))
            .with_parallel(self.parallel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SparseToneError;

    #[test]
    fn test_empty_json_is_default() {
        let config = RunConfig::from_json_str("{}").expect("empty object");
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.dictionary.group_size, 2);
        assert!(config.dictionary.frequencies.is_none());
    }

    #[test]
    fn test_partial_nested_fields() {
        let config = RunConfig::from_json_str(
            r#"{
                "dictionary": { "frequencies": [100.0, 200.0], "sample_rate": 1000.0, "block_length": 10 },
                "apgd": { "tol": 1e-9 },
                "lscgnm": { "warm_start": true },
                "mode": { "constrained": { "sigmas": [0.5, 1.0] } }
            }"#,
        )
        .expect("valid config");

        assert_eq!(config.apgd.max_iter(), 10_000);
        assert!((config.apgd.tol() - 1e-9).abs() < 1e-20);
        assert!(config.lscgnm.warm_start);
        assert!((config.lscgnm.tol() - 1e-4).abs() < 1e-15);

        let dict = config.dictionary.build_dictionary().expect("valid dictionary");
        assert_eq!(dict.matrix().shape(), (10, 4));
        assert!((dict.lipschitz() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_piano_default_frequencies() {
        let cfg = DictionaryConfig::default();
        assert_eq!(cfg.resolved_frequencies().len(), 88);
    }

    #[test]
    fn test_malformed_json() {
        let err = RunConfig::from_json_str(r#"{ "parallel": "yes" }"#).expect_err("bad type");
        assert!(matches!(err, SparseToneError::Serialization(_)));
    }

    #[test]
    fn test_bad_group_size() {
        let cfg = DictionaryConfig {
            frequencies: Some(vec![100.0]),
            sample_rate: 1000.0,
            block_length: 8,
            group_size: 3,
        };
        let err = cfg.build_dictionary().expect_err("2 columns, groups of 3");
        assert!(matches!(err, SparseToneError::InvalidGroupSize { .. }));
    }

    #[test]
    fn test_save_load_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("run.json");
        let config = RunConfig {
            parallel: true,
            mode: SolveMode::Penalized { gamma: 0.25 },
            ..RunConfig::default()
        };
        config.save(&path).expect("write");
        let back = RunConfig::load(&path).expect("read");
        assert_eq!(back, config);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = RunConfig::load(dir.path().join("absent.json")).expect_err("no file");
        assert!(matches!(err, SparseToneError::Io(_)));
    }

    #[test]
    fn test_driver_uses_top_level_apgd() {
        let dict = Dictionary::tonal(&[100.0], 1000.0, 10).expect("valid");
        let config = RunConfig {
            apgd: Apgd::new(0, 1e-6),
            ..RunConfig::default()
        };
        let out = config
            .driver(&dict)
            .solve_block(&crate::primitives::Vector::zeros(10))
            .expect("valid block");
        match out {
            crate::driver::BlockSolution::Penalized(r) => assert_eq!(r.iterations, 1),
            other => panic!("expected penalized, got {other:?}"),
        }
    }
}
