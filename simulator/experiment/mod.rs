// Experiment Driver Module

pub mod config;
pub mod runner;
pub mod stats;

// Re-export commonly used types
pub use config::{
    CatchupConfig,
    ExperimentFile,
    ExperimentMeta,
    FitnessConfig,
    ModelConfig,
};

pub use runner::ExperimentRunner;

pub use stats::{
    CatchupSummary,
    DegreeStats,
    ExperimentResult,
    PairOutcome,
};
