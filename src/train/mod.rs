pub mod epoch_stats;
pub mod loop_fn;
pub mod observer;
pub mod train_config;

pub use epoch_stats::EpochStats;
pub use loop_fn::train_loop;
pub use observer::{LossObserver, TracingObserver};
pub use train_config::TrainConfig;
