use rand::Rng;

use crate::activation::activation::ActivationFunction;
use crate::error::{ensure_len, Result};
use crate::layers::{dense::{BiasInit, Dense}, Layer};
use crate::math::matrix::Matrix;

/// What the hidden layer needs from the layer after it.
#[derive(Debug, Clone, Copy)]
pub struct Downstream<'g> {
    /// Delta of the next layer (its loss gradient times its activation derivative).
    pub error: &'g [f64],
    /// The next layer's weights as they were before its update.
    pub weights: &'g Matrix,
}

/// Internal layer. Its backward step projects the downstream error through
/// the next layer's weights before applying its own activation derivative.
#[derive(Debug)]
pub struct HiddenLayer {
    inner: Dense,
}

impl HiddenLayer {
    pub fn new<R: Rng + ?Sized>(
        input_size: usize,
        size: usize,
        activation: ActivationFunction,
        bias_init: BiasInit,
        rng: &mut R,
    ) -> HiddenLayer {
        HiddenLayer {
            inner: Dense::new("hidden", input_size, size, activation, bias_init, rng),
        }
    }

    pub fn dense_mut(&mut self) -> &mut Dense {
        &mut self.inner
    }
}

impl Layer for HiddenLayer {
    type Gradient<'g> = Downstream<'g>;

    fn forward(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.inner.feed_from(inputs)
    }

    /// Returns ∂L/∂input, the error at this layer's input boundary, computed
    /// with the weights from before this update.
    fn backward(&mut self, downstream: Downstream<'_>, learning_rate: f64) -> Result<Vec<f64>> {
        ensure_len("hidden backward: next layer fan-in", self.inner.size, downstream.weights.cols)?;
        // ∂L/∂a = Wnextᵀ · δnext
        let error = downstream.weights.transpose().mul_vec(downstream.error)?;

        let snapshot = self.inner.weights.transpose();
        let delta = self.inner.step(&error, learning_rate)?;
        snapshot.mul_vec(&delta)
    }

    fn dense(&self) -> &Dense {
        &self.inner
    }
}
