pub mod activation;

pub use activation::{relu, relu_derivative, sigmoid, sigmoid_derivative, softmax, ActivationFunction};
