// Experiment Driver Configuration

use pan_rust::pan_fitness::{
    BetaFitness, ChoiceFitness, ConstantFitness, ExpFitness, FitnessSampler, PoissonFitness,
    UniformFitness,
};
use pan_rust::pan_interface::PanError;

// ============================================================================
// Experiment File Format
// ============================================================================

/// Top-level experiment file loaded from YAML
#[derive(Debug, serde::Deserialize)]
pub struct ExperimentFile {
    /// Experiment metadata
    #[serde(default)]
    pub meta: ExperimentMeta,

    /// Growth model configuration
    pub model: ModelConfig,

    /// Catch-up time sampling (optional; degree statistics only when absent)
    #[serde(default)]
    pub catchup: Option<CatchupConfig>,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct ExperimentMeta {
    pub name: Option<String>,
    pub description: Option<String>,
    pub hypothesis: Option<String>,
}

/// Growth model parameters
#[derive(Debug, serde::Deserialize)]
pub struct ModelConfig {
    /// Attachment edges per new node
    #[serde(default = "default_out_degree")]
    pub out_degree: usize,

    /// Number of nodes to grow to
    pub final_size: usize,

    /// Capacity hint for the backing arrays
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Fitness distribution
    pub fitness: FitnessConfig,
}

/// Catch-up time sampling parameters
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CatchupConfig {
    /// Number of random valid pairs to sample
    #[serde(default = "default_num_samples")]
    pub num_samples: usize,

    /// Resampling budget across all pairs. Constant-fitness models have no
    /// valid pairs at all, so sampling must be allowed to give up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

fn default_out_degree() -> usize {
    1
}

fn default_capacity() -> usize {
    1000
}

fn default_num_samples() -> usize {
    100
}

fn default_max_attempts() -> usize {
    100_000
}

// ============================================================================
// Fitness Distribution Configuration
// ============================================================================

/// Declarative fitness distribution, buildable into a sampler
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FitnessConfig {
    Constant {
        value: f64,
    },
    Beta {
        alpha: f64,
        beta: f64,
    },
    /// `scale` is the mean, as in the original model
    Exponential {
        scale: f64,
    },
    Poisson {
        mean: f64,
    },
    Uniform {
        low: f64,
        high: f64,
    },
    Choice {
        values: Vec<f64>,
        #[serde(default)]
        probs: Option<Vec<f64>>,
    },
}

impl FitnessConfig {
    /// Build the configured sampler.
    pub fn build(&self) -> Result<Box<dyn FitnessSampler>, PanError> {
        match self {
            FitnessConfig::Constant { value } => Ok(Box::new(ConstantFitness::new(*value))),
            FitnessConfig::Beta { alpha, beta } => {
                Ok(Box::new(BetaFitness::new(*alpha, *beta)?))
            }
            FitnessConfig::Exponential { scale } => Ok(Box::new(ExpFitness::new(*scale)?)),
            FitnessConfig::Poisson { mean } => Ok(Box::new(PoissonFitness::new(*mean)?)),
            FitnessConfig::Uniform { low, high } => {
                Ok(Box::new(UniformFitness::new(*low, *high)?))
            }
            FitnessConfig::Choice { values, probs } => {
                Ok(Box::new(ChoiceFitness::new(values.clone(), probs.clone())?))
            }
        }
    }

    /// Short human-readable label for summaries and legends.
    pub fn label(&self) -> String {
        match self {
            FitnessConfig::Constant { value } => format!("constant({})", value),
            FitnessConfig::Beta { alpha, beta } => format!("beta({}, {})", alpha, beta),
            FitnessConfig::Exponential { scale } => format!("exponential({})", scale),
            FitnessConfig::Poisson { mean } => format!("poisson({})", mean),
            FitnessConfig::Uniform { low, high } => format!("uniform({}, {})", low, high),
            FitnessConfig::Choice { values, .. } => format!("choice({} values)", values.len()),
        }
    }
}
