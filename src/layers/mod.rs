//! Layer roles.
//!
//! Both roles share the [`Dense`] forward computation. They differ in the
//! gradient information their backward step consumes: the output layer reads
//! the loss gradient directly, the hidden layer reads the next layer's error
//! together with that layer's pre-update weights.

pub mod dense;
pub mod hidden;
pub mod output;

pub use dense::{ActivationCache, BiasInit, Dense};
pub use hidden::{Downstream, HiddenLayer};
pub use output::OutputLayer;

use crate::error::Result;

pub trait Layer {
    /// Gradient information consumed by `backward`.
    type Gradient<'g>;

    fn forward(&mut self, inputs: &[f64]) -> Result<Vec<f64>>;

    /// Updates this layer's parameters from the last forward pass and returns
    /// the error signal for the layer upstream of it.
    fn backward(&mut self, gradient: Self::Gradient<'_>, learning_rate: f64) -> Result<Vec<f64>>;

    fn dense(&self) -> &Dense;

    fn input_size(&self) -> usize {
        self.dense().input_size
    }

    fn output_size(&self) -> usize {
        self.dense().size
    }
}
