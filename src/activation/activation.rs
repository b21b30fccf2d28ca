use serde::{Serialize, Deserialize};

/// Logistic sigmoid `1 / (1 + e^-x)`.
///
/// Evaluated on whichever side keeps the exponent non-positive, so very large
/// or very small inputs saturate to 1.0 or 0.0 instead of overflowing.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Sigmoid derivative expressed through the activation `a = sigmoid(x)`.
pub fn sigmoid_derivative(a: f64) -> f64 {
    a * (1.0 - a)
}

pub fn relu(x: f64) -> f64 {
    if x > 0.0 { x } else { 0.0 }
}

/// ReLU derivative evaluated at the pre-activation `x`. Zero at `x == 0`.
pub fn relu_derivative(x: f64) -> f64 {
    if x > 0.0 { 1.0 } else { 0.0 }
}

/// Vector softmax. The maximum is subtracted before exponentiating so large
/// logits do not overflow. Returns an empty vector for empty input.
pub fn softmax(xs: &[f64]) -> Vec<f64> {
    let max = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = xs.iter().map(|x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Per-layer activation choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    Sigmoid,
    #[serde(rename = "relu")]
    ReLU,
    /// Linear output, used for unbounded regression targets.
    Identity,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => sigmoid(x),
            ActivationFunction::ReLU => relu(x),
            ActivationFunction::Identity => x,
        }
    }

    /// Derivative of the activation for one neuron.
    ///
    /// Both the pre-activation `z` and the activation `a = f(z)` are passed
    /// because the conventions differ: sigmoid is differentiated through `a`,
    /// ReLU through `z`.
    pub fn derivative(&self, z: f64, a: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => sigmoid_derivative(a),
            ActivationFunction::ReLU => relu_derivative(z),
            ActivationFunction::Identity => 1.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActivationFunction::Sigmoid => "sigmoid",
            ActivationFunction::ReLU => "relu",
            ActivationFunction::Identity => "identity",
        }
    }
}

impl std::str::FromStr for ActivationFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sigmoid" => Ok(ActivationFunction::Sigmoid),
            "relu" => Ok(ActivationFunction::ReLU),
            "identity" | "linear" => Ok(ActivationFunction::Identity),
            other => Err(format!("unknown activation '{other}' (expected sigmoid, relu or identity)")),
        }
    }
}
