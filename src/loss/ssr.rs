use crate::error::{ensure_len, Result};

/// Sum of squared residuals, the training loss that seeds backpropagation.
pub struct SsrLoss;

impl SsrLoss {
    /// Scalar SSR: Σ (predicted - expected)²
    pub fn loss(predicted: &[f64], expected: &[f64]) -> Result<f64> {
        ensure_len("SsrLoss::loss", expected.len(), predicted.len())?;
        Ok(predicted.iter().zip(expected.iter())
            .map(|(p, t)| (p - t).powi(2))
            .sum())
    }

    /// Per-output gradient ∂L/∂predicted: -2 · (expected - predicted)
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Result<Vec<f64>> {
        ensure_len("SsrLoss::derivative", expected.len(), predicted.len())?;
        Ok(predicted.iter().zip(expected.iter())
            .map(|(p, t)| -2.0 * (t - p))
            .collect())
    }
}
