// Catch-Up Demo Example
//
// Grows a Beta(1,10) fitness model and compares measured catch-up times of
// random valid pairs with the analytic prediction.

mod experiment;

use experiment::{
    CatchupConfig, ExperimentFile, ExperimentMeta, ExperimentRunner, FitnessConfig, ModelConfig,
};
use simple_logger::SimpleLogger;

fn main() {
    SimpleLogger::new().init().unwrap();

    println!("╔════════════════════════════════════════════════════════╗");
    println!("║    Catch-Up Times vs Analytic Prediction               ║");
    println!("╚════════════════════════════════════════════════════════╝\n");

    let config = ExperimentFile {
        meta: ExperimentMeta {
            name: Some("Beta(1,10) catch-up demo".to_string()),
            description: Some(
                "Younger, fitter nodes should overtake older, less fit ones \
                 roughly when the prediction says they do."
                    .to_string(),
            ),
            ..ExperimentMeta::default()
        },
        model: ModelConfig {
            out_degree: 5,
            final_size: 5000,
            capacity: 5000,
            fitness: FitnessConfig::Beta { alpha: 1.0, beta: 10.0 },
        },
        catchup: Some(CatchupConfig {
            num_samples: 25,
            max_attempts: 100_000,
        }),
    };

    let runner = ExperimentRunner::new(config, Some([29u8; 32]));
    match runner.run() {
        Ok(result) => {
            result.print_summary();
            println!("\n✓ Demo complete!");
        }
        Err(e) => {
            eprintln!("experiment failed: {:?}", e);
            std::process::exit(1);
        }
    }
}
