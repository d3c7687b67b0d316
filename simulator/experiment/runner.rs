// Experiment Runner
//
// Grows one model from config, then samples random valid pairs and compares
// measured catch-up times with the analytic prediction
// `i * (i/j)^(1/(beta-1))` where `beta = fitness_i / fitness_j`.

use log::warn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pan_rust::pan_catchup::CatchupAnalyzer;
use pan_rust::pan_interface::{CatchupResult, PanError};
use pan_rust::pan_network::{PanConfig, PanNetwork};

use super::config::{CatchupConfig, ExperimentFile};
use super::stats::{CatchupSummary, ExperimentResult, PairOutcome};

pub struct ExperimentRunner {
    config: ExperimentFile,
    seed: [u8; 32],
}

impl ExperimentRunner {
    /// `seed = None` draws one from entropy; the seed used is always
    /// recorded in the result for reproduction.
    pub fn new(config: ExperimentFile, seed: Option<[u8; 32]>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let mut s = [0u8; 32];
            rand::thread_rng().fill(&mut s);
            s
        });
        Self { config, seed }
    }

    pub fn run(self) -> Result<ExperimentResult, PanError> {
        let model = &self.config.model;
        let sampler = model.fitness.build()?;
        let pan_config = PanConfig {
            out_degree: model.out_degree,
            capacity: model.capacity.max(model.final_size),
            seed: Some(self.seed),
        };
        let mut pan = PanNetwork::new(pan_config, sampler)?;
        pan.grow_to_size(model.final_size)?;

        let catchup = match &self.config.catchup {
            Some(cfg) => self.sample_catchup(&pan, cfg)?,
            None => None,
        };

        let summary = format!(
            "model = {}, m = {}, size = {}",
            model.fitness.label(),
            model.out_degree,
            model.final_size
        );
        Ok(ExperimentResult::collect(&pan, summary, self.seed, catchup))
    }

    /// Draw random pairs (uniform j, then uniform i > j), keep the valid
    /// ones, and resolve them all in one batch scan.
    fn sample_catchup(
        &self,
        pan: &PanNetwork,
        cfg: &CatchupConfig,
    ) -> Result<Option<CatchupSummary>, PanError> {
        let size = pan.size();
        if size < 2 || cfg.num_samples == 0 {
            return Ok(None);
        }

        let analyzer = CatchupAnalyzer::new(pan);
        let mut rng = StdRng::from_seed(self.seed);

        let mut i_s: Vec<usize> = Vec::with_capacity(cfg.num_samples);
        let mut j_s: Vec<usize> = Vec::with_capacity(cfg.num_samples);
        let mut attempts = 0usize;
        while i_s.len() < cfg.num_samples {
            let j = rng.gen_range(0..size - 1);
            let i = rng.gen_range(j + 1..size);
            attempts += 1;
            if analyzer.is_valid_pair(i, j) {
                i_s.push(i);
                j_s.push(j);
            } else if attempts >= cfg.max_attempts {
                // A constant-fitness model has no valid pairs at all.
                warn!(
                    "collected {} of {} valid pairs after {} attempts, giving up",
                    i_s.len(),
                    cfg.num_samples,
                    attempts
                );
                break;
            }
        }
        if i_s.is_empty() {
            return Ok(None);
        }

        let times = analyzer.catchup_times(&i_s, &j_s)?;

        let mut pairs = Vec::with_capacity(i_s.len());
        let mut caught_up = 0;
        let mut never = 0;
        for (k, (&i, &j)) in i_s.iter().zip(&j_s).enumerate() {
            let fitness_i = pan.fitness(i).unwrap_or(f64::NAN);
            let fitness_j = pan.fitness(j).unwrap_or(f64::NAN);
            let alpha = i as f64 / j as f64;
            let beta = fitness_i / fitness_j;
            // j = 0 makes alpha infinite; the clamp below also catches that.
            let mut predicted = i as f64 * alpha.powf(1.0 / (beta - 1.0));
            if !(predicted <= size as f64) {
                predicted = (size + 1) as f64;
            }
            let actual = match times[k] {
                CatchupResult::CaughtUp(t) => {
                    caught_up += 1;
                    t
                }
                _ => {
                    never += 1;
                    size + 1
                }
            };
            pairs.push(PairOutcome {
                i,
                j,
                fitness_i,
                fitness_j,
                predicted,
                result: times[k],
                actual,
            });
        }

        Ok(Some(CatchupSummary {
            requested: cfg.num_samples,
            pairs,
            caught_up,
            never,
        }))
    }
}
