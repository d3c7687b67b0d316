// Degree Distribution Example
//
// Grows two m=5 models of the same size, one with flat fitness and one with
// Beta(1,10) fitness, and prints both degree summaries for comparison.

mod experiment;

use experiment::{ExperimentFile, ExperimentMeta, ExperimentRunner, FitnessConfig, ModelConfig};
use simple_logger::SimpleLogger;

const FINAL_SIZE: usize = 5000;

fn main() {
    SimpleLogger::new().init().unwrap();

    println!("╔════════════════════════════════════════════════════════╗");
    println!("║    Degree Distribution: flat vs Beta(1,10) fitness     ║");
    println!("╚════════════════════════════════════════════════════════╝\n");

    let seed = [17u8; 32];

    for fitness in [
        FitnessConfig::Constant { value: 1.0 },
        FitnessConfig::Beta { alpha: 1.0, beta: 10.0 },
    ] {
        let config = ExperimentFile {
            meta: ExperimentMeta {
                name: Some(format!("{} fitness", fitness.label())),
                ..ExperimentMeta::default()
            },
            model: ModelConfig {
                out_degree: 5,
                final_size: FINAL_SIZE,
                capacity: FINAL_SIZE,
                fitness,
            },
            catchup: None,
        };

        println!("Growing {} model to {} nodes...", config.model.fitness.label(), FINAL_SIZE);
        let runner = ExperimentRunner::new(config, Some(seed));
        match runner.run() {
            Ok(result) => result.print_summary(),
            Err(e) => {
                eprintln!("experiment failed: {:?}", e);
                std::process::exit(1);
            }
        }
    }

    println!("\n✓ Comparison complete!");
}
