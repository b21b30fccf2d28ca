use std::time::Instant;

use tracing::warn;

use crate::error::{ensure_len, NnError, Result};
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::observer::LossObserver;
use crate::train::train_config::TrainConfig;

/// Trains `network` for exactly `config.epochs` epochs and returns the
/// statistics of every epoch in order.
///
/// Each epoch walks the samples in their given order and performs one full
/// forward/backward/update step per sample. There is no shuffling, batching
/// or early stopping. Any error aborts the whole run.
pub fn train_loop(
    network: &mut Network,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
    config: &TrainConfig,
    observer: &mut dyn LossObserver,
) -> Result<Vec<EpochStats>> {
    if inputs.is_empty() {
        return Err(NnError::InvalidConfig("training set is empty".to_string()));
    }
    ensure_len("train_loop labels", inputs.len(), labels.len())?;

    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 0..config.epochs {
        let t_start = Instant::now();

        let mut total_loss = 0.0;
        for (input, expected) in inputs.iter().zip(labels) {
            total_loss += network.train_step(input, expected)?;
        }
        let train_loss = total_loss / inputs.len() as f64;

        if !train_loss.is_finite() {
            warn!(epoch, "training loss is no longer finite: {train_loss}");
        }

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        observer.observe(&stats);
        history.push(stats);
    }

    Ok(history)
}
