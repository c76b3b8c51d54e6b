//! Cosine/sine (tonal) dictionary construction.

use std::f64::consts::PI;

use crate::error::{Result, SparseToneError};
use crate::primitives::Matrix;

/// Fundamental of the lowest piano key (A0), in Hz.
pub const A0_HZ: f64 = 27.5;

/// Keys on a standard piano.
pub const PIANO_KEYS: usize = 88;

/// Equal-tempered piano fundamentals, `27.5 · 2^(i/12)` for `i = 0..88`.
///
/// # Example
///
/// ```
/// use sparsetone::dictionary::piano_frequencies;
///
/// let f = piano_frequencies();
/// assert_eq!(f.len(), 88);
/// assert!((f[48] - 440.0).abs() < 1e-9); // A4
/// ```
#[must_use]
pub fn piano_frequencies() -> Vec<f64> {
    (0..PIANO_KEYS)
        .map(|i| A0_HZ * 2f64.powf(i as f64 / 12.0))
        .collect()
}

/// Builds the `block_length × 2k` tonal matrix.
///
/// Column `2i` is `cos(2π f_i j / f_s)` and column `2i + 1` is
/// `sin(2π f_i j / f_s)` for sample `j = 0..block_length`, so each
/// frequency's cosine/sine pair is one contiguous coefficient group.
///
/// # Errors
///
/// [`SparseToneError::InvalidHyperparameter`] for an empty frequency list,
/// a negative or non-finite frequency, a non-positive sample rate, or a zero
/// block length.
pub fn tonal_matrix(
    frequencies: &[f64],
    sample_rate: f64,
    block_length: usize,
) -> Result<Matrix<f64>> {
    if frequencies.is_empty() {
        return Err(SparseToneError::InvalidHyperparameter {
            param: "frequencies".to_string(),
            value: "[]".to_string(),
            constraint: "at least one frequency".to_string(),
        });
    }
    if let Some(&bad) = frequencies.iter().find(|f| !f.is_finite() || **f < 0.0) {
        return Err(SparseToneError::invalid_hyperparameter(
            "frequency",
            bad,
            "finite and >= 0",
        ));
    }
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(SparseToneError::invalid_hyperparameter(
            "sample_rate",
            sample_rate,
            "finite and > 0",
        ));
    }
    if block_length == 0 {
        return Err(SparseToneError::invalid_hyperparameter(
            "block_length",
            0.0,
            "> 0",
        ));
    }

    let nyquist = sample_rate / 2.0;
    let aliased = frequencies.iter().filter(|&&f| f > nyquist).count();
    if aliased > 0 {
        tracing::warn!(aliased, nyquist, "frequencies above Nyquist will alias");
    }

    let cols = 2 * frequencies.len();
    let mut matrix = Matrix::zeros(block_length, cols);
    for (i, &f) in frequencies.iter().enumerate() {
        let omega = 2.0 * PI * f / sample_rate;
        for j in 0..block_length {
            let phase = omega * j as f64;
            matrix.set(j, 2 * i, phase.cos());
            matrix.set(j, 2 * i + 1, phase.sin());
        }
    }
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piano_range() {
        let f = piano_frequencies();
        assert!((f[0] - 27.5).abs() < 1e-12);
        assert!((f[87] - 4186.009).abs() < 1e-2); // C8
        assert!(f.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_column_layout() {
        let m = tonal_matrix(&[250.0], 1000.0, 4).expect("valid parameters");
        assert_eq!(m.shape(), (4, 2));
        // 250 Hz at 1 kHz: quarter turn per sample
        let cos: Vec<f64> = m.column(0).into_vec();
        let sin: Vec<f64> = m.column(1).into_vec();
        let want_cos = [1.0, 0.0, -1.0, 0.0];
        let want_sin = [0.0, 1.0, 0.0, -1.0];
        for j in 0..4 {
            assert!((cos[j] - want_cos[j]).abs() < 1e-12);
            assert!((sin[j] - want_sin[j]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_dc_frequency_has_zero_sine() {
        let m = tonal_matrix(&[0.0], 1000.0, 3).expect("valid parameters");
        assert!(m.column(0).iter().all(|&c| (c - 1.0).abs() < 1e-15));
        assert!(m.column(1).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(tonal_matrix(&[], 1000.0, 4).is_err());
        assert!(tonal_matrix(&[-1.0], 1000.0, 4).is_err());
        assert!(tonal_matrix(&[f64::NAN], 1000.0, 4).is_err());
        assert!(tonal_matrix(&[100.0], 0.0, 4).is_err());
        assert!(tonal_matrix(&[100.0], 1000.0, 0).is_err());
    }
}
