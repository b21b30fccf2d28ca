use serde::{Serialize, Deserialize};

fn default_log_every() -> usize {
    100
}

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`    — total number of full passes over the training data
/// - `log_every` — epoch interval for the default tracing observer; `0`
///                 disables periodic logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub epochs: usize,
    #[serde(default = "default_log_every")]
    pub log_every: usize,
}

impl TrainConfig {
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            log_every: default_log_every(),
        }
    }

    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }
}
