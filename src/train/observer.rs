use tracing::info;

use crate::train::epoch_stats::EpochStats;

/// Receives the loss of every completed epoch. Observers cannot alter the
/// training schedule.
pub trait LossObserver {
    fn observe(&mut self, stats: &EpochStats);
}

impl<F: FnMut(&EpochStats)> LossObserver for F {
    fn observe(&mut self, stats: &EpochStats) {
        self(stats)
    }
}

/// Logs the loss through `tracing` every `every` epochs and on the last epoch.
#[derive(Debug, Clone, Copy)]
pub struct TracingObserver {
    every: usize,
}

impl TracingObserver {
    pub fn new(every: usize) -> Self {
        TracingObserver { every }
    }

    fn should_log(&self, stats: &EpochStats) -> bool {
        self.every > 0 && (stats.epoch % self.every == 0 || stats.is_last())
    }
}

impl LossObserver for TracingObserver {
    fn observe(&mut self, stats: &EpochStats) {
        if self.should_log(stats) {
            info!(
                "Epoch {}/{}, Loss: {:.6} ({} ms)",
                stats.epoch, stats.total_epochs, stats.train_loss, stats.elapsed_ms
            );
        }
    }
}
