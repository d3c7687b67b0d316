// Pluggable fitness samplers.
//
// The growth engine only requires "a callable producing one sample"; every
// distribution family here is an interchangeable implementation of the
// `FitnessSampler` trait. Samplers carry distribution state only - the
// engine's RNG is passed in, so a single seed determines the whole run.

use crate::pan_interface::PanError;
use rand::distributions::{Distribution, Uniform, WeightedIndex};
use rand::RngCore;
use rand_distr::{Beta, Exp, Poisson};

/// Produces one fitness sample per call.
///
/// Fitness is drawn once per node at creation time and is immutable
/// thereafter. Samplers that can yield zero or negative values are accepted
/// here; the engine surfaces `PanError::DegenerateWeights` once the total
/// sampling weight stops being a valid probability mass.
pub trait FitnessSampler {
    fn sample(&mut self, rng: &mut dyn RngCore) -> f64;
}

/// Constant fitness (the plain Barabasi-Albert model when the value is 1.0).
pub struct ConstantFitness {
    value: f64,
}

impl ConstantFitness {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Default for ConstantFitness {
    fn default() -> Self {
        Self { value: 1.0 }
    }
}

impl FitnessSampler for ConstantFitness {
    fn sample(&mut self, _rng: &mut dyn RngCore) -> f64 {
        self.value
    }
}

/// Beta-distributed fitness on (0, 1).
pub struct BetaFitness {
    dist: Beta<f64>,
}

impl BetaFitness {
    /// # Errors
    /// `InvalidParameter` unless both shape parameters are positive and finite.
    pub fn new(alpha: f64, beta: f64) -> Result<Self, PanError> {
        let dist = Beta::new(alpha, beta)
            .map_err(|_| PanError::InvalidParameter("beta shapes must be positive and finite"))?;
        Ok(Self { dist })
    }
}

impl FitnessSampler for BetaFitness {
    fn sample(&mut self, rng: &mut dyn RngCore) -> f64 {
        self.dist.sample(rng)
    }
}

/// Exponentially-distributed fitness.
///
/// Parameterized by the scale (mean), not the rate, matching the original
/// model's `exponential(scale)` convention.
pub struct ExpFitness {
    dist: Exp<f64>,
}

impl ExpFitness {
    pub fn new(scale: f64) -> Result<Self, PanError> {
        if !(scale > 0.0 && scale.is_finite()) {
            return Err(PanError::InvalidParameter("exponential scale must be positive and finite"));
        }
        let dist = Exp::new(1.0 / scale)
            .map_err(|_| PanError::InvalidParameter("exponential scale must be positive and finite"))?;
        Ok(Self { dist })
    }
}

impl FitnessSampler for ExpFitness {
    fn sample(&mut self, rng: &mut dyn RngCore) -> f64 {
        self.dist.sample(rng)
    }
}

/// Poisson-distributed fitness.
///
/// Note that a Poisson sampler puts mass on 0: a graph whose every node drew
/// fitness 0 has no sampling mass left and the next attachment fails with
/// `DegenerateWeights`.
pub struct PoissonFitness {
    dist: Poisson<f64>,
}

impl PoissonFitness {
    pub fn new(mean: f64) -> Result<Self, PanError> {
        let dist = Poisson::new(mean)
            .map_err(|_| PanError::InvalidParameter("poisson mean must be positive and finite"))?;
        Ok(Self { dist })
    }
}

impl FitnessSampler for PoissonFitness {
    fn sample(&mut self, rng: &mut dyn RngCore) -> f64 {
        self.dist.sample(rng)
    }
}

/// Continuous uniform fitness on [low, high).
pub struct UniformFitness {
    dist: Uniform<f64>,
}

impl UniformFitness {
    pub fn new(low: f64, high: f64) -> Result<Self, PanError> {
        if !(low < high && low.is_finite() && high.is_finite()) {
            return Err(PanError::InvalidParameter("uniform range requires finite low < high"));
        }
        Ok(Self { dist: Uniform::new(low, high) })
    }
}

impl FitnessSampler for UniformFitness {
    fn sample(&mut self, rng: &mut dyn RngCore) -> f64 {
        self.dist.sample(rng)
    }
}

/// Discrete choice over a fixed set of fitness values, optionally weighted.
///
/// With `probs = None` every value is equally likely. Probabilities do not
/// need to sum to 1; they are relative weights.
pub struct ChoiceFitness {
    values: Vec<f64>,
    index: ChoiceIndex,
}

enum ChoiceIndex {
    Uniform(Uniform<usize>),
    Weighted(WeightedIndex<f64>),
}

impl ChoiceFitness {
    /// # Errors
    /// `InvalidParameter` when `values` is empty, when `probs` has a
    /// different length than `values`, or when the weights are unusable
    /// (negative, non-finite, or all zero).
    pub fn new(values: Vec<f64>, probs: Option<Vec<f64>>) -> Result<Self, PanError> {
        if values.is_empty() {
            return Err(PanError::InvalidParameter("choice requires at least one value"));
        }
        let index = match probs {
            None => ChoiceIndex::Uniform(Uniform::new(0, values.len())),
            Some(p) => {
                if p.len() != values.len() {
                    return Err(PanError::InvalidParameter(
                        "choice probabilities must match values in length",
                    ));
                }
                let dist = WeightedIndex::new(&p)
                    .map_err(|_| PanError::InvalidParameter("choice probabilities are unusable"))?;
                ChoiceIndex::Weighted(dist)
            }
        };
        Ok(Self { values, index })
    }
}

impl FitnessSampler for ChoiceFitness {
    fn sample(&mut self, rng: &mut dyn RngCore) -> f64 {
        let idx = match &self.index {
            ChoiceIndex::Uniform(dist) => dist.sample(rng),
            ChoiceIndex::Weighted(dist) => dist.sample(rng),
        };
        self.values[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::from_seed([7u8; 32])
    }

    #[test]
    fn test_constant_returns_value() {
        let mut sampler = ConstantFitness::new(2.5);
        let mut rng = rng();
        for _ in 0..10 {
            assert_eq!(sampler.sample(&mut rng), 2.5);
        }
    }

    #[test]
    fn test_beta_in_unit_interval() {
        let mut sampler = BetaFitness::new(1.0, 10.0).unwrap();
        let mut rng = rng();
        for _ in 0..100 {
            let f = sampler.sample(&mut rng);
            assert!((0.0..=1.0).contains(&f));
        }
    }

    #[test]
    fn test_beta_rejects_bad_shapes() {
        assert!(BetaFitness::new(0.0, 1.0).is_err());
        assert!(BetaFitness::new(1.0, -2.0).is_err());
    }

    #[test]
    fn test_exp_positive_samples() {
        let mut sampler = ExpFitness::new(3.0).unwrap();
        let mut rng = rng();
        for _ in 0..100 {
            assert!(sampler.sample(&mut rng) >= 0.0);
        }
        assert!(ExpFitness::new(0.0).is_err());
    }

    #[test]
    fn test_poisson_integral_samples() {
        let mut sampler = PoissonFitness::new(4.0).unwrap();
        let mut rng = rng();
        for _ in 0..100 {
            let f = sampler.sample(&mut rng);
            assert!(f >= 0.0);
            assert_eq!(f, f.trunc());
        }
        assert!(PoissonFitness::new(-1.0).is_err());
    }

    #[test]
    fn test_uniform_stays_in_range() {
        let mut sampler = UniformFitness::new(1.0, 2.0).unwrap();
        let mut rng = rng();
        for _ in 0..100 {
            let f = sampler.sample(&mut rng);
            assert!((1.0..2.0).contains(&f));
        }
        assert!(UniformFitness::new(2.0, 2.0).is_err());
    }

    #[test]
    fn test_choice_draws_from_values() {
        let values = vec![1.0, 2.0, 3.0];
        let mut sampler = ChoiceFitness::new(values.clone(), Some(vec![0.5, 0.3, 0.2])).unwrap();
        let mut rng = rng();
        for _ in 0..100 {
            assert!(values.contains(&sampler.sample(&mut rng)));
        }
    }

    #[test]
    fn test_choice_rejects_bad_input() {
        assert!(ChoiceFitness::new(vec![], None).is_err());
        assert!(ChoiceFitness::new(vec![1.0, 2.0], Some(vec![1.0])).is_err());
        assert!(ChoiceFitness::new(vec![1.0, 2.0], Some(vec![0.0, 0.0])).is_err());
    }

    #[test]
    fn test_same_seed_same_samples() {
        let mut a = BetaFitness::new(2.0, 5.0).unwrap();
        let mut b = BetaFitness::new(2.0, 5.0).unwrap();
        let mut rng_a = rng();
        let mut rng_b = rng();
        for _ in 0..20 {
            assert_eq!(a.sample(&mut rng_a), b.sample(&mut rng_b));
        }
    }
}
