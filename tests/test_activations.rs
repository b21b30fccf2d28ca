// Elementwise activation and loss primitives.

use approx::assert_relative_eq;
use backprop_nn::activation::{relu, relu_derivative, sigmoid, sigmoid_derivative, softmax};
use backprop_nn::SsrLoss;

#[test]
fn sigmoid_at_zero_is_one_half() {
    assert_eq!(sigmoid(0.0), 0.5);
}

#[test]
fn sigmoid_stays_inside_open_unit_interval() {
    for i in -300..=300 {
        let x = i as f64 / 10.0;
        let s = sigmoid(x);
        assert!(s > 0.0 && s < 1.0, "sigmoid({x}) = {s}");
    }
}

#[test]
fn sigmoid_saturates_exactly_at_extremes() {
    assert_eq!(sigmoid(40.0), 1.0);
    assert_eq!(sigmoid(1000.0), 1.0);
    assert_eq!(sigmoid(-800.0), 0.0);
    assert_eq!(sigmoid_derivative(sigmoid(40.0)), 0.0);
}

#[test]
fn relu_passes_positive_and_clamps_negative() {
    assert_eq!(relu(-5.0), 0.0);
    assert_eq!(relu(3.0), 3.0);
    assert_eq!(relu(0.0), 0.0);
    for x in [0.25, 1.0, 42.0] {
        assert_eq!(relu(x), x);
        assert_eq!(relu(-x), 0.0);
    }
}

#[test]
fn relu_derivative_is_a_step() {
    assert_eq!(relu_derivative(2.0), 1.0);
    assert_eq!(relu_derivative(0.0), 0.0);
    assert_eq!(relu_derivative(-2.0), 0.0);
}

#[test]
fn sigmoid_derivative_peaks_at_one_half() {
    assert_relative_eq!(sigmoid_derivative(0.5), 0.25);
    for i in 1..100 {
        let a = i as f64 / 100.0;
        assert_relative_eq!(sigmoid_derivative(a), a * (1.0 - a));
        assert!(sigmoid_derivative(a) <= 0.25);
    }
}

#[test]
fn sigmoid_derivative_matches_finite_difference() {
    let h = 1e-6;
    for x in [-3.0, -0.5, 0.0, 1.2, 4.0] {
        let numeric = (sigmoid(x + h) - sigmoid(x - h)) / (2.0 * h);
        assert_relative_eq!(sigmoid_derivative(sigmoid(x)), numeric, epsilon = 1e-8);
    }
}

#[test]
fn softmax_sums_to_one() {
    let p = softmax(&[1.0, 2.0, 3.0]);
    assert_relative_eq!(p.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    assert!(p[2] > p[1] && p[1] > p[0]);
}

#[test]
fn ssr_derivative_matches_finite_difference() {
    let predicted = [1.5, -0.5];
    let target = [1.0, 2.0];
    let analytic = SsrLoss::derivative(&predicted, &target).unwrap();
    let h = 1e-6;
    for i in 0..2 {
        let mut plus = predicted;
        let mut minus = predicted;
        plus[i] += h;
        minus[i] -= h;
        let numeric = (SsrLoss::loss(&plus, &target).unwrap() - SsrLoss::loss(&minus, &target).unwrap()) / (2.0 * h);
        assert_relative_eq!(analytic[i], numeric, epsilon = 1e-6);
    }
}
