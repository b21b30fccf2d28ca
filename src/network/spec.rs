use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{NnError, Result};
use crate::layers::dense::BiasInit;

fn default_learning_rate() -> f64 {
    0.01
}

/// A serializable description of a two-layer network: sizes, per-layer
/// activations, learning rate and initialisation policy.
///
/// Only the architecture is stored; trained weights are never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
    pub hidden_activation: ActivationFunction,
    pub output_activation: ActivationFunction,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default)]
    pub bias_init: BiasInit,
    /// Seed for parameter initialisation. `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl NetworkSpec {
    /// Sigmoid hidden layer, ReLU output, learning rate 0.01, random biases.
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize) -> NetworkSpec {
        NetworkSpec {
            input_size,
            hidden_size,
            output_size,
            hidden_activation: ActivationFunction::Sigmoid,
            output_activation: ActivationFunction::ReLU,
            learning_rate: default_learning_rate(),
            bias_init: BiasInit::Random,
            seed: None,
        }
    }

    pub fn with_activations(mut self, hidden: ActivationFunction, output: ActivationFunction) -> Self {
        self.hidden_activation = hidden;
        self.output_activation = output;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_bias_init(mut self, bias_init: BiasInit) -> Self {
        self.bias_init = bias_init;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, size) in [
            ("input_size", self.input_size),
            ("hidden_size", self.hidden_size),
            ("output_size", self.output_size),
        ] {
            if size == 0 {
                return Err(NnError::InvalidConfig(format!("{name} must be at least 1")));
            }
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(NnError::InvalidConfig(format!(
                "learning_rate must be a positive finite number, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let spec: NetworkSpec = serde_json::from_reader(reader)?;
        spec.validate()?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sizes_are_rejected() {
        let err = NetworkSpec::new(1, 0, 1).validate().unwrap_err();
        assert!(matches!(err, NnError::InvalidConfig(msg) if msg.contains("hidden_size")));
    }

    #[test]
    fn learning_rate_must_be_positive_and_finite() {
        assert!(NetworkSpec::new(1, 1, 1).with_learning_rate(0.0).validate().is_err());
        assert!(NetworkSpec::new(1, 1, 1).with_learning_rate(f64::NAN).validate().is_err());
        assert!(NetworkSpec::new(1, 1, 1).with_learning_rate(0.5).validate().is_ok());
    }

    #[test]
    fn json_defaults_fill_optional_fields() {
        let json = r#"{
            "input_size": 1, "hidden_size": 2, "output_size": 1,
            "hidden_activation": "relu", "output_activation": "identity"
        }"#;
        let spec: NetworkSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.learning_rate, 0.01);
        assert_eq!(spec.bias_init, BiasInit::Random);
        assert_eq!(spec.seed, None);
        assert_eq!(spec.hidden_activation, ActivationFunction::ReLU);
    }

    #[test]
    fn save_then_load_preserves_spec() {
        let path = std::env::temp_dir().join(format!("backprop-nn-spec-{}.json", std::process::id()));
        let path = path.to_str().unwrap();
        let spec = NetworkSpec::new(3, 5, 2).with_bias_init(BiasInit::Zero).with_seed(9);
        spec.save_json(path).unwrap();
        assert_eq!(NetworkSpec::load_json(path).unwrap(), spec);
        std::fs::remove_file(path).unwrap();
    }
}
