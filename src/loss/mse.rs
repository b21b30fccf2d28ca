use crate::error::{ensure_len, Result};

/// Mean squared error, reported per epoch for observability.
pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)²)
    pub fn loss(predicted: &[f64], expected: &[f64]) -> Result<f64> {
        ensure_len("MseLoss::loss", expected.len(), predicted.len())?;
        let n = predicted.len() as f64;
        Ok(predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>() / n)
    }
}
