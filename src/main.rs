use log::info;
use rand::Rng;
use simple_logger::SimpleLogger;

use pan_rust::{ConstantFitness, PanConfig, PanNetwork};

fn main() {
    SimpleLogger::new().init().unwrap();

    info!("starting");

    let final_size = 1000;
    let mut seed = [0u8; 32];
    rand::thread_rng().fill(&mut seed);

    let config = PanConfig {
        out_degree: 1,
        capacity: final_size,
        seed: Some(seed),
    };
    let mut pan = match PanNetwork::new(config, Box::new(ConstantFitness::default())) {
        Ok(pan) => pan,
        Err(e) => {
            eprintln!("failed to build network: {:?}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = pan.grow_to_size(final_size) {
        eprintln!("growth failed: {:?}", e);
        std::process::exit(1);
    }

    let stats = pan
        .degrees()
        .iter()
        .fold((u64::MIN, u64::MAX, 0u64), |acc, &d| {
            (u64::max(acc.0, d), u64::min(acc.1, d), acc.2 + d)
        });

    info!(
        "Degrees ({} nodes): max: {} min: {} avg: {:.2}",
        pan.size(),
        stats.0,
        stats.1,
        stats.2 as f64 / pan.size() as f64
    );
    info!(
        "Edges: {} (degree sum {} = 2 * edges - m)",
        pan.total_edges(),
        stats.2
    );
    info!("let seed = {:?};", seed);
    info!("done");
}
