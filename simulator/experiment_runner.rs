// Experiment Runner - Load and execute experiment YAML files
//
// Usage:
//   cargo run --bin experiment_runner scenarios/beta_catchup.yaml
//   cargo run --bin experiment_runner scenarios/  (runs all .yaml files in directory)
//   cargo run --bin experiment_runner scenarios/beta_catchup.yaml --seed 0x1234...

mod experiment;

use experiment::{ExperimentFile, ExperimentRunner};
use simple_logger::SimpleLogger;
use std::env;
use std::fs;
use std::path::Path;

fn main() {
    SimpleLogger::new().init().unwrap();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <experiment.yaml | directory/> [--seed SEED_HEX]", args[0]);
        eprintln!("\nExamples:");
        eprintln!("  {} scenarios/beta_catchup.yaml", args[0]);
        eprintln!("  {} scenarios/", args[0]);
        eprintln!("  {} scenarios/beta_catchup.yaml --seed 0x123456...", args[0]);
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);

    // Parse optional seed
    let seed: Option<[u8; 32]> = if args.len() >= 4 && args[2] == "--seed" {
        Some(parse_seed_hex(&args[3]))
    } else {
        None
    };

    if path.is_file() {
        run_experiment_file(path, seed);
    } else if path.is_dir() {
        run_experiment_directory(path, seed);
    } else {
        eprintln!("Error: Path does not exist: {}", path.display());
        std::process::exit(1);
    }
}

fn run_experiment_directory(dir: &Path, seed: Option<[u8; 32]>) {
    let mut experiments = Vec::new();

    // Find all .yaml files
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("yaml")
                || path.extension().and_then(|s| s.to_str()) == Some("yml")
            {
                experiments.push(path);
            }
        }
    }

    experiments.sort();

    if experiments.is_empty() {
        eprintln!("No .yaml files found in {}", dir.display());
        std::process::exit(1);
    }

    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║  EXPERIMENT RUNNER - Multiple Experiments              ║");
    println!("╚════════════════════════════════════════════════════════╝\n");
    println!("Found {} experiment(s) to run\n", experiments.len());

    for (i, experiment_path) in experiments.iter().enumerate() {
        println!("\n{}/{} Running: {}\n", i + 1, experiments.len(), experiment_path.display());
        run_experiment_file(experiment_path, seed);
    }

    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║  All experiments complete!                             ║");
    println!("╚════════════════════════════════════════════════════════╝\n");
}

fn run_experiment_file(path: &Path, seed: Option<[u8; 32]>) {
    println!("Loading experiment from: {}", path.display());

    let yaml_content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", path.display(), e);
        std::process::exit(1);
    });

    let experiment: ExperimentFile = serde_yaml::from_str(&yaml_content).unwrap_or_else(|e| {
        eprintln!("Failed to parse {}: {}", path.display(), e);
        std::process::exit(1);
    });

    // Print experiment header
    println!("\n╔════════════════════════════════════════════════════════╗");
    if let Some(ref name) = experiment.meta.name {
        println!("║  {}  {}", name, " ".repeat(54_usize.saturating_sub(name.len())));
    } else {
        println!("║  Experiment: {}  ", path.file_stem().unwrap().to_str().unwrap());
    }
    println!("╚════════════════════════════════════════════════════════╝\n");

    if let Some(ref desc) = experiment.meta.description {
        println!("{}\n", desc);
    }

    if let Some(ref hypothesis) = experiment.meta.hypothesis {
        println!("Hypothesis:");
        println!("  {}\n", hypothesis);
    }

    println!("Configuration:");
    println!("  Final size: {}", experiment.model.final_size);
    println!("  Out-degree: {}", experiment.model.out_degree);
    println!("  Fitness: {}", experiment.model.fitness.label());
    if let Some(ref catchup) = experiment.catchup {
        println!("  Catch-up samples: {}", catchup.num_samples);
    }
    println!("\nStarting experiment...\n");

    let runner = ExperimentRunner::new(experiment, seed);
    let result = runner.run().unwrap_or_else(|e| {
        eprintln!("Experiment failed: {:?}", e);
        std::process::exit(1);
    });

    result.print_summary();

    println!("\n✓ Experiment complete!\n");
}

fn parse_seed_hex(hex: &str) -> [u8; 32] {
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    let mut seed = [0u8; 32];

    for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
        if i >= 32 {
            break;
        }
        let byte_str = std::str::from_utf8(chunk).unwrap();
        seed[i] = u8::from_str_radix(byte_str, 16).unwrap_or_else(|e| {
            eprintln!("Invalid hex seed: {}", e);
            std::process::exit(1);
        });
    }

    seed
}
