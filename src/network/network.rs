use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::error::{ensure_len, NnError, Result};
use crate::layers::{Downstream, HiddenLayer, Layer, OutputLayer};
use crate::loss::{mse::MseLoss, ssr::SsrLoss};
use crate::network::spec::NetworkSpec;
use crate::train::{
    epoch_stats::EpochStats,
    loop_fn::train_loop,
    observer::{LossObserver, TracingObserver},
    train_config::TrainConfig,
};

/// A hidden layer followed by an output layer, trained by plain gradient descent.
#[derive(Debug)]
pub struct Network {
    hidden: HiddenLayer,
    output: OutputLayer,
    learning_rate: f64,
}

impl Network {
    /// Builds a network from a validated spec. Uses `spec.seed` when set,
    /// otherwise seeds from OS entropy.
    pub fn new(spec: &NetworkSpec) -> Result<Network> {
        let mut rng = match spec.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Network::with_rng(spec, &mut rng)
    }

    /// Builds a network drawing its initial parameters from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(spec: &NetworkSpec, rng: &mut R) -> Result<Network> {
        spec.validate()?;
        let hidden = HiddenLayer::new(
            spec.input_size,
            spec.hidden_size,
            spec.hidden_activation,
            spec.bias_init,
            rng,
        );
        let output = OutputLayer::new(
            spec.hidden_size,
            spec.output_size,
            spec.output_activation,
            spec.bias_init,
            rng,
        );
        debug!(
            input = spec.input_size,
            hidden = spec.hidden_size,
            output = spec.output_size,
            "built {}-{} network",
            spec.hidden_activation.name(),
            spec.output_activation.name()
        );

        Ok(Network { hidden, output, learning_rate: spec.learning_rate })
    }

    /// Forward pass; stores activations in each layer for backprop.
    pub fn forward(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        let hidden_output = self.hidden.forward(inputs)?;
        self.output.forward(&hidden_output)
    }

    /// One gradient-descent step against `expected`, using the activations
    /// cached by the preceding `forward`. Returns ∂L/∂input.
    ///
    /// Both layers' caches are checked before either is updated, so an error
    /// leaves the parameters unchanged.
    pub fn backward(&mut self, expected: &[f64]) -> Result<Vec<f64>> {
        let predicted = &self.output.dense().cache()
            .ok_or(NnError::UninitializedState { layer: "output" })?
            .output;
        let seed = SsrLoss::derivative(predicted, expected)?;
        if self.hidden.dense().cache().is_none() {
            return Err(NnError::UninitializedState { layer: "hidden" });
        }

        let projection = self.output.upstream_projection();
        let output_delta = self.output.backward(&seed, self.learning_rate)?;
        self.hidden.backward(
            Downstream { error: &output_delta, weights: &projection },
            self.learning_rate,
        )
    }

    /// Forward, backward and update for one sample. Returns the MSE of the
    /// prediction made before the update.
    pub fn train_step(&mut self, inputs: &[f64], expected: &[f64]) -> Result<f64> {
        ensure_len("expected output", self.output_size(), expected.len())?;
        let predicted = self.forward(inputs)?;
        self.backward(expected)?;
        MseLoss::loss(&predicted, expected)
    }

    /// Trains for exactly `config.epochs` epochs, logging the loss through
    /// `tracing` every `config.log_every` epochs.
    pub fn train(
        &mut self,
        inputs: &[Vec<f64>],
        expected: &[Vec<f64>],
        config: &TrainConfig,
    ) -> Result<Vec<EpochStats>> {
        let mut observer = TracingObserver::new(config.log_every);
        train_loop(self, inputs, expected, config, &mut observer)
    }

    /// Like [`Network::train`], reporting each epoch to `observer` instead.
    pub fn train_with_observer(
        &mut self,
        inputs: &[Vec<f64>],
        expected: &[Vec<f64>],
        config: &TrainConfig,
        observer: &mut dyn LossObserver,
    ) -> Result<Vec<EpochStats>> {
        train_loop(self, inputs, expected, config, observer)
    }

    /// Runs `forward` on every sample.
    pub fn predict_all(&mut self, inputs: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        inputs.iter().map(|x| self.forward(x)).collect()
    }

    pub fn hidden(&self) -> &HiddenLayer {
        &self.hidden
    }

    pub fn output(&self) -> &OutputLayer {
        &self.output
    }

    pub fn hidden_mut(&mut self) -> &mut HiddenLayer {
        &mut self.hidden
    }

    pub fn output_mut(&mut self) -> &mut OutputLayer {
        &mut self.output
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn input_size(&self) -> usize {
        self.hidden.input_size()
    }

    pub fn output_size(&self) -> usize {
        self.output.output_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use approx::assert_relative_eq;

    fn small_network() -> Network {
        Network::new(&NetworkSpec::new(2, 3, 1).with_seed(11)).unwrap()
    }

    #[test]
    fn same_seed_builds_same_parameters() {
        let a = small_network();
        let b = small_network();
        assert_eq!(a.hidden().dense().weights, b.hidden().dense().weights);
        assert_eq!(a.output().dense().biases, b.output().dense().biases);
    }

    #[test]
    fn backward_without_forward_is_rejected() {
        let mut net = small_network();
        let err = net.backward(&[1.0]).unwrap_err();
        assert!(matches!(err, NnError::UninitializedState { layer: "output" }));
    }

    #[test]
    fn backward_with_stale_hidden_cache_changes_nothing() {
        let mut net = small_network();
        net.output_mut().forward(&[0.1, 0.2, 0.3]).unwrap();
        let output_w = net.output().dense().weights.clone();
        let output_b = net.output().dense().biases.clone();

        let err = net.backward(&[1.0]).unwrap_err();

        assert!(matches!(err, NnError::UninitializedState { layer: "hidden" }));
        assert_eq!(net.output().dense().weights, output_w);
        assert_eq!(net.output().dense().biases, output_b);
        assert!(net.output().dense().cache().is_some());
    }

    #[test]
    fn train_step_reports_pre_update_loss() {
        let mut net = small_network();
        let before = net.forward(&[0.2, 0.4]).unwrap();
        let loss = net.train_step(&[0.2, 0.4], &[3.0]).unwrap();
        assert_relative_eq!(loss, (before[0] - 3.0).powi(2), epsilon = 1e-12);
        let after = net.forward(&[0.2, 0.4]).unwrap();
        assert!((after[0] - 3.0).abs() < (before[0] - 3.0).abs());
    }

    #[test]
    fn train_step_rejects_wrong_target_length() {
        let mut net = small_network();
        let err = net.train_step(&[0.2, 0.4], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, NnError::ShapeMismatch { expected: 1, actual: 2, .. }));
    }

    #[test]
    fn relu_hidden_with_linear_output_is_expressible() {
        let spec = NetworkSpec::new(1, 4, 2)
            .with_activations(ActivationFunction::ReLU, ActivationFunction::Identity)
            .with_seed(5);
        let mut net = Network::new(&spec).unwrap();
        assert_eq!(net.forward(&[0.5]).unwrap().len(), 2);
        assert_eq!(net.output().dense().activator, ActivationFunction::Identity);
    }
}
