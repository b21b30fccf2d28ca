//! Scripted sampling of a target function into training pairs.

use rand::Rng;

use crate::error::{ensure_len, Result};

/// `x³ + 2x² + 10`, the default function the network learns to fit.
pub fn target_cubic(x: f64) -> f64 {
    x.powi(3) + 2.0 * x.powi(2) + 10.0
}

/// `n` evenly spaced points `start, start + step, ...`.
pub fn grid(start: f64, step: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Paired input and target vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub inputs: Vec<Vec<f64>>,
    pub targets: Vec<Vec<f64>>,
}

impl Dataset {
    pub fn new(inputs: Vec<Vec<f64>>, targets: Vec<Vec<f64>>) -> Result<Dataset> {
        ensure_len("Dataset targets", inputs.len(), targets.len())?;
        Ok(Dataset { inputs, targets })
    }

    /// One scalar sample per `x`, labelled with `f(x)`.
    pub fn from_fn<F: Fn(f64) -> f64>(xs: &[f64], f: F) -> Dataset {
        Dataset {
            inputs: xs.iter().map(|&x| vec![x]).collect(),
            targets: xs.iter().map(|&x| vec![f(x)]).collect(),
        }
    }

    /// `n` scalar samples with `x` drawn from U[0, 1).
    pub fn uniform<R: Rng + ?Sized, F: Fn(f64) -> f64>(n: usize, rng: &mut R, f: F) -> Dataset {
        let xs: Vec<f64> = (0..n).map(|_| rng.gen::<f64>()).collect();
        Dataset::from_fn(&xs, f)
    }

    /// A single sample whose input is `len` draws from U[0, 1) and whose
    /// target applies `f` to each entry. Fits with `input_size = output_size = len`.
    pub fn vector_sample<R: Rng + ?Sized, F: Fn(f64) -> f64>(len: usize, rng: &mut R, f: F) -> Dataset {
        let x: Vec<f64> = (0..len).map(|_| rng.gen::<f64>()).collect();
        let y = x.iter().map(|&v| f(v)).collect();
        Dataset { inputs: vec![x], targets: vec![y] }
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn cubic_matches_known_values() {
        assert_relative_eq!(target_cubic(0.0), 10.0);
        assert_relative_eq!(target_cubic(1.0), 13.0);
        assert_relative_eq!(target_cubic(-2.0), 10.0);
    }

    #[test]
    fn grid_is_evenly_spaced() {
        let xs = grid(0.1, 0.1, 10);
        assert_eq!(xs.len(), 10);
        assert_relative_eq!(xs[0], 0.1);
        assert_relative_eq!(xs[9], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn from_fn_labels_each_input() {
        let data = Dataset::from_fn(&[1.0, 2.0], |x| x * 10.0);
        assert_eq!(data.inputs, vec![vec![1.0], vec![2.0]]);
        assert_eq!(data.targets, vec![vec![10.0], vec![20.0]]);
    }

    #[test]
    fn vector_sample_is_one_wide_sample() {
        let data = Dataset::vector_sample(10, &mut StdRng::seed_from_u64(2), target_cubic);
        assert_eq!(data.len(), 1);
        assert_eq!(data.inputs[0].len(), 10);
        assert_relative_eq!(data.targets[0][3], target_cubic(data.inputs[0][3]));
    }

    #[test]
    fn uniform_samples_unit_interval() {
        let data = Dataset::uniform(20, &mut StdRng::seed_from_u64(5), |x| 2.0 * x);
        assert_eq!(data.len(), 20);
        assert!(data.inputs.iter().all(|x| (0.0..1.0).contains(&x[0])));
        assert_relative_eq!(data.targets[7][0], 2.0 * data.inputs[7][0]);
    }

    #[test]
    fn mismatched_pairs_are_rejected() {
        assert!(Dataset::new(vec![vec![1.0]], vec![]).is_err());
    }
}
