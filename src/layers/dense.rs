use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{ensure_len, NnError, Result};
use crate::math::matrix::{hadamard, Matrix};

/// How a layer's bias vector is initialised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasInit {
    /// U[0, 1), the same distribution as the weights.
    #[default]
    Random,
    Zero,
}

/// Values remembered from the last `feed_from` for the following backward step.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationCache {
    pub inputs: Vec<f64>,
    /// z = W·x + b
    pub pre_activation: Vec<f64>,
    /// a = f(z)
    pub output: Vec<f64>,
}

/// Affine transform followed by a fixed activation. Shared by both layer roles.
#[derive(Debug)]
pub struct Dense {
    pub name: &'static str,
    pub input_size: usize,
    pub size: usize,
    /// Shape (size × input_size).
    pub weights: Matrix,
    pub biases: Vec<f64>,
    pub activator: ActivationFunction,
    cache: Option<ActivationCache>,
}

impl Dense {
    pub fn new<R: Rng + ?Sized>(
        name: &'static str,
        input_size: usize,
        size: usize,
        activation: ActivationFunction,
        bias_init: BiasInit,
        rng: &mut R,
    ) -> Dense {
        let weights = Matrix::uniform(size, input_size, rng);
        let biases = match bias_init {
            BiasInit::Random => (0..size).map(|_| rng.gen::<f64>()).collect(),
            BiasInit::Zero => vec![0.0; size],
        };

        Dense {
            name,
            input_size,
            size,
            weights,
            biases,
            activator: activation,
            cache: None,
        }
    }

    /// Forward pass. Validates the input length before touching any state.
    pub fn feed_from(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        ensure_len(self.name, self.input_size, input.len())?;

        let z: Vec<f64> = self.weights.mul_vec(input)?
            .into_iter()
            .zip(&self.biases)
            .map(|(wx, b)| wx + b)
            .collect();
        let a: Vec<f64> = z.iter().map(|&x| self.activator.function(x)).collect();

        self.cache = Some(ActivationCache {
            inputs: input.to_vec(),
            pre_activation: z,
            output: a.clone(),
        });
        Ok(a)
    }

    pub fn cache(&self) -> Option<&ActivationCache> {
        self.cache.as_ref()
    }

    /// Computes gradient adjustments from the cached forward pass.
    /// `error` is ∂L/∂a for this layer. Returns (weights_grad, delta), where
    /// delta = error ⊙ f'(z) doubles as the biases gradient.
    pub fn compute_gradients(&self, error: &[f64]) -> Result<(Matrix, Vec<f64>)> {
        let cache = self.cache.as_ref()
            .ok_or(NnError::UninitializedState { layer: self.name })?;
        ensure_len(self.name, self.size, error.len())?;

        let act_derivative: Vec<f64> = cache.pre_activation.iter()
            .zip(&cache.output)
            .map(|(&z, &a)| self.activator.derivative(z, a))
            .collect();
        let delta = hadamard(error, &act_derivative)?;
        let weights_grad = Matrix::outer(&delta, &cache.inputs);

        Ok((weights_grad, delta))
    }

    /// Plain gradient descent: W -= lr·∇W, b -= lr·∇b.
    pub fn apply_gradients(&mut self, weights_grad: &Matrix, biases_grad: &[f64], lr: f64) -> Result<()> {
        ensure_len(self.name, self.size, biases_grad.len())?;
        self.weights.sub_scaled(weights_grad, lr)?;
        for (b, g) in self.biases.iter_mut().zip(biases_grad) {
            *b -= lr * g;
        }
        Ok(())
    }

    /// Computes and applies this layer's update, consuming the cache.
    /// Returns the local delta.
    pub(crate) fn step(&mut self, error: &[f64], lr: f64) -> Result<Vec<f64>> {
        let (weights_grad, delta) = self.compute_gradients(error)?;
        self.apply_gradients(&weights_grad, &delta, lr)?;
        self.cache = None;
        Ok(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    fn fixed_layer(activation: ActivationFunction) -> Dense {
        let mut layer = Dense::new("test", 2, 1, activation, BiasInit::Zero, &mut StdRng::seed_from_u64(0));
        layer.weights = Matrix::from_data(vec![vec![0.5, -1.0]]).unwrap();
        layer.biases = vec![0.25];
        layer
    }

    #[test]
    fn feed_from_applies_affine_then_activation() {
        let mut layer = fixed_layer(ActivationFunction::ReLU);
        assert_relative_eq!(layer.feed_from(&[2.0, 0.5]).unwrap()[0], 0.75);
        assert_eq!(layer.feed_from(&[0.0, 1.0]).unwrap()[0], 0.0);
    }

    #[test]
    fn cache_holds_last_forward() {
        let mut layer = fixed_layer(ActivationFunction::Identity);
        layer.feed_from(&[1.0, 1.0]).unwrap();
        layer.feed_from(&[2.0, 0.0]).unwrap();
        let cache = layer.cache().unwrap();
        assert_eq!(cache.inputs, vec![2.0, 0.0]);
        assert_relative_eq!(cache.pre_activation[0], 1.25);
    }

    #[test]
    fn zero_bias_init_starts_at_zero() {
        let layer = Dense::new("h", 3, 4, ActivationFunction::Sigmoid, BiasInit::Zero, &mut StdRng::seed_from_u64(1));
        assert_eq!(layer.biases, vec![0.0; 4]);
        assert_eq!((layer.weights.rows, layer.weights.cols), (4, 3));
    }

    #[test]
    fn gradients_without_forward_are_rejected() {
        let layer = fixed_layer(ActivationFunction::Sigmoid);
        let err = layer.compute_gradients(&[1.0]).unwrap_err();
        assert!(matches!(err, NnError::UninitializedState { layer: "test" }));
    }

    #[test]
    fn step_descends_and_clears_cache() {
        let mut layer = fixed_layer(ActivationFunction::Identity);
        layer.feed_from(&[1.0, 2.0]).unwrap();
        let delta = layer.step(&[2.0], 0.1).unwrap();
        assert_eq!(delta, vec![2.0]);
        assert_relative_eq!(layer.weights.data[0][0], 0.3, epsilon = 1e-12);
        assert_relative_eq!(layer.weights.data[0][1], -1.4, epsilon = 1e-12);
        assert_relative_eq!(layer.biases[0], 0.05, epsilon = 1e-12);
        assert!(layer.cache().is_none());
    }
}
