use rand::Rng;

use crate::activation::activation::ActivationFunction;
use crate::error::Result;
use crate::layers::{dense::{BiasInit, Dense}, Layer};
use crate::math::matrix::Matrix;

/// Terminal layer. Its backward step is seeded by the loss gradient.
#[derive(Debug)]
pub struct OutputLayer {
    inner: Dense,
}

impl OutputLayer {
    pub fn new<R: Rng + ?Sized>(
        input_size: usize,
        size: usize,
        activation: ActivationFunction,
        bias_init: BiasInit,
        rng: &mut R,
    ) -> OutputLayer {
        OutputLayer {
            inner: Dense::new("output", input_size, size, activation, bias_init, rng),
        }
    }

    /// The weight matrix the hidden layer projects this layer's error through.
    /// Take it before `backward` to get the pre-update weights.
    pub fn upstream_projection(&self) -> Matrix {
        self.inner.weights.clone()
    }

    pub fn dense_mut(&mut self) -> &mut Dense {
        &mut self.inner
    }
}

impl Layer for OutputLayer {
    /// ∂L/∂output, one entry per neuron.
    type Gradient<'g> = &'g [f64];

    fn forward(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.inner.feed_from(inputs)
    }

    /// Returns delta = ∂L/∂output ⊙ f'(z).
    fn backward(&mut self, loss_gradient: &[f64], learning_rate: f64) -> Result<Vec<f64>> {
        self.inner.step(loss_gradient, learning_rate)
    }

    fn dense(&self) -> &Dense {
        &self.inner
    }
}
