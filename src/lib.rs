pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod loss;
pub mod network;
pub mod train;
pub mod dataset;
pub mod pdb;

// Convenience re-exports
pub use error::{NnError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::{BiasInit, Dense, Downstream, HiddenLayer, Layer, OutputLayer};
pub use network::{Network, NetworkSpec};
pub use loss::{MseLoss, SsrLoss};
pub use train::{train_loop, EpochStats, LossObserver, TracingObserver, TrainConfig};
pub use dataset::{target_cubic, Dataset};
