use backprop_nn::dataset::target_cubic;
use backprop_nn::{Dataset, Network, NetworkSpec, TrainConfig};
use rand::{rngs::StdRng, SeedableRng};

// One wide sample: ten random inputs mapped element-wise through the cubic,
// learned by a 10-10-10 network.
fn main() -> backprop_nn::Result<()> {
    tracing_subscriber::fmt::init();

    let mut rng = StdRng::seed_from_u64(42);
    let train = Dataset::vector_sample(10, &mut rng, target_cubic);
    let test = Dataset::vector_sample(10, &mut rng, target_cubic);

    let mut network = Network::new(&NetworkSpec::new(10, 10, 10).with_seed(42))?;
    network.train(&train.inputs, &train.targets, &TrainConfig::new(1000))?;

    println!("expected output:\n{:?}", train.targets[0]);
    println!("trained output:\n{:?}", network.forward(&train.inputs[0])?);
    println!("trained output with test input:\n{:?}", network.forward(&test.inputs[0])?);
    Ok(())
}
