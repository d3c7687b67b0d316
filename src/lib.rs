//! # panRust - Preferential-Attachment Fitness Network Simulator
//!
//! A Rust implementation of a preferential-attachment random graph with
//! per-node fitness, plus catch-up-time analysis between node pairs: the
//! time step at which a younger, higher-fitness node's degree overtakes an
//! older, lower-fitness node's degree.
//!
//! ## Core Components
//!
//! - **PanNetwork**: Growth engine owning the evolving graph state
//!   (degrees, fitnesses, edge records, cumulative weights) with weighted
//!   attachment sampling
//! - **CatchupAnalyzer**: Read-only replay of the edge-arrival history
//!   computing catch-up times for one pair or a batch in a single pass
//! - **FitnessSampler**: Pluggable per-node fitness distributions
//!   (constant, Beta, exponential, Poisson, uniform, weighted choice)
//!
//! ## Headless Usage
//!
//! The library is fully headless: construct with explicit parameters, grow,
//! then analyze. Plotting and experiment orchestration are external callers
//! that only need the public operations and read-only accessors.
//!
//! ```no_run
//! use pan_rust::{BetaFitness, CatchupAnalyzer, PanConfig, PanNetwork};
//!
//! let config = PanConfig {
//!     out_degree: 5,
//!     capacity: 20_000,
//!     seed: Some([42u8; 32]),
//! };
//! let sampler = Box::new(BetaFitness::new(1.0, 10.0).unwrap());
//! let mut pan = PanNetwork::new(config, sampler).unwrap();
//! pan.grow_to_size(20_000).unwrap();
//!
//! let analyzer = CatchupAnalyzer::new(&pan);
//! if analyzer.is_valid_pair(1000, 10) {
//!     let t = analyzer.catchup_time(1000, 10);
//!     println!("catch-up: {:?}", t);
//! }
//! ```
//!
//! ## Experiments
//!
//! For batch experiment runs driven by YAML scenario files, see the
//! `experiment_runner` binary in `simulator/`.

// Core modules
pub mod pan_catchup;
pub mod pan_fitness;
pub mod pan_interface;
pub mod pan_network;

// Re-export commonly used types
pub use pan_catchup::CatchupAnalyzer;
pub use pan_fitness::{
    BetaFitness, ChoiceFitness, ConstantFitness, ExpFitness, FitnessSampler, PoissonFitness,
    UniformFitness,
};
pub use pan_interface::{
    CancelFlag, CatchupResult, NoOpProgress, NodeId, PanError, ProgressSink, TimeStep,
};
pub use pan_network::{PanConfig, PanNetwork};
