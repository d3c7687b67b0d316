// Fixed Seed Test Example
//
// Two runs with the same seed must produce identical graphs: same edges,
// same fitnesses, same degrees.

use pan_rust::{BetaFitness, PanConfig, PanNetwork};
use simple_logger::SimpleLogger;

fn build(seed: [u8; 32]) -> PanNetwork {
    let config = PanConfig {
        out_degree: 3,
        capacity: 2000,
        seed: Some(seed),
    };
    let sampler = Box::new(BetaFitness::new(1.0, 10.0).expect("valid beta parameters"));
    let mut pan = PanNetwork::new(config, sampler).expect("valid config");
    pan.grow_to_size(2000).expect("growth succeeds");
    pan
}

fn main() {
    SimpleLogger::new().init().unwrap();

    println!("╔════════════════════════════════════════════════════════╗");
    println!("║    Fixed Seed Determinism Test                         ║");
    println!("╚════════════════════════════════════════════════════════╝\n");

    let seed = [99u8; 32];
    println!("Growing two m=3 Beta(1,10) models to 2000 nodes, seed {:02x?}...", &seed[..4]);

    let a = build(seed);
    let b = build(seed);

    assert_eq!(a.degrees(), b.degrees(), "degrees diverged");
    assert_eq!(a.fitnesses(), b.fitnesses(), "fitnesses diverged");
    assert_eq!(a.edge_records(), b.edge_records(), "edge records diverged");
    println!("  identical degrees, fitnesses and edge records");

    let c = build([100u8; 32]);
    assert_ne!(a.edge_records(), c.edge_records(), "different seeds produced identical graphs");
    println!("  a different seed produced a different graph");

    println!("\n✓ Determinism test passed!");
}
