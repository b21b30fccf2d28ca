use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use backprop_nn::dataset::{grid, target_cubic, Dataset};
use backprop_nn::pdb::{closest_distances, parse_pdb_file, DistanceSummary};
use backprop_nn::{ActivationFunction, BiasInit, Network, NetworkSpec, TrainConfig};

#[derive(Parser)]
#[command(name = "backprop-nn", about = "Two-layer neural network trained by hand-written backpropagation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fit x^3 + 2x^2 + 10 on an evenly spaced grid and print the predictions
    Fit {
        /// Network spec JSON; overrides the size and activation flags
        #[arg(long)]
        spec: Option<String>,
        #[arg(long, default_value_t = 2)]
        hidden: usize,
        #[arg(long, default_value = "sigmoid")]
        hidden_activation: ActivationFunction,
        #[arg(long, default_value = "relu")]
        output_activation: ActivationFunction,
        #[arg(long, default_value_t = 0.01)]
        learning_rate: f64,
        #[arg(long, default_value_t = 1000)]
        epochs: usize,
        /// Number of grid samples, starting at --step with spacing --step
        #[arg(long, default_value_t = 10)]
        samples: usize,
        #[arg(long, default_value_t = 0.1)]
        step: f64,
        #[arg(long)]
        seed: Option<u64>,
        /// Start biases at zero instead of U[0, 1)
        #[arg(long)]
        zero_bias: bool,
        /// Log the loss every N epochs (0 disables)
        #[arg(long, default_value_t = 100)]
        log_every: usize,
    },
    /// Report the distance from each water to its closest non-water atom
    Distances {
        pdb: String,
    },
    /// Write the default network spec as JSON
    Spec {
        path: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Command::Fit {
            spec,
            hidden,
            hidden_activation,
            output_activation,
            learning_rate,
            epochs,
            samples,
            step,
            seed,
            zero_bias,
            log_every,
        } => {
            let mut spec = match spec {
                Some(path) => NetworkSpec::load_json(&path)
                    .with_context(|| format!("failed to load network spec from {path}"))?,
                None => NetworkSpec::new(1, hidden, 1)
                    .with_activations(hidden_activation, output_activation)
                    .with_learning_rate(learning_rate),
            };
            if zero_bias {
                spec.bias_init = BiasInit::Zero;
            }
            if seed.is_some() {
                spec.seed = seed;
            }
            fit(&spec, &grid(step, step, samples), TrainConfig::new(epochs).with_log_every(log_every))
        }
        Command::Distances { pdb } => distances(&pdb),
        Command::Spec { path } => {
            NetworkSpec::new(1, 2, 1)
                .save_json(&path)
                .with_context(|| format!("failed to write {path}"))?;
            println!("Wrote default spec to {path}");
            Ok(())
        }
    }
}

fn fit(spec: &NetworkSpec, xs: &[f64], config: TrainConfig) -> Result<()> {
    let data = Dataset::from_fn(xs, target_cubic);
    let mut network = Network::new(spec)?;

    let history = network.train(&data.inputs, &data.targets, &config)?;
    if let (Some(first), Some(last)) = (history.first(), history.last()) {
        println!("Loss: {:.6} (epoch 0) -> {:.6} (epoch {})", first.train_loss, last.train_loss, last.epoch);
    }

    let predicted = network.predict_all(&data.inputs)?;
    println!("{:>8} {:>12} {:>12}", "x", "expected", "predicted");
    for ((x, y), p) in xs.iter().zip(&data.targets).zip(&predicted) {
        println!("{:>8.3} {:>12.4} {:>12.4}", x, y[0], p[0]);
    }
    Ok(())
}

fn distances(path: &str) -> Result<()> {
    let structure = parse_pdb_file(path).with_context(|| format!("failed to read {path}"))?;
    println!(
        "Found {} unique water molecules and {} non-water atoms (excluding hydrogens).",
        structure.waters.len(),
        structure.atoms.len()
    );

    let closest = closest_distances(&structure.waters, &structure.atoms);
    for (water, d) in structure.waters.iter().zip(&closest) {
        let seq = water.residue_seq.map_or_else(|| "?".to_string(), |n| n.to_string());
        println!("HOH {:>5}  {:.3} Å", seq, d);
    }
    if let Some(summary) = DistanceSummary::from_distances(&closest) {
        println!(
            "Average: {:.2} Å  Min: {:.2} Å  Max: {:.2} Å",
            summary.mean, summary.min, summary.max
        );
    }
    Ok(())
}
