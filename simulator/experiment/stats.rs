// Experiment Result Statistics

use indexmap::IndexMap;
use pan_rust::pan_interface::CatchupResult;
use pan_rust::pan_network::PanNetwork;

// ============================================================================
// Experiment Result
// ============================================================================

/// Complete experiment result
#[derive(Debug, Clone)]
pub struct ExperimentResult {
    /// Configuration summary
    pub config_summary: String,

    /// Random seed used
    pub seed_used: [u8; 32],

    /// Final graph size
    pub size: usize,

    /// Total edge endpoints created
    pub total_edges: u64,

    /// Attachment edges per node
    pub out_degree: usize,

    /// Degree distribution summary
    pub degree_stats: DegreeStats,

    /// Per-fitness-group degree stats, ascending by fitness value. Present
    /// only when the model has a small number of distinct fitness values
    /// (discrete-choice models).
    pub fitness_groups: Option<IndexMap<String, GroupStats>>,

    /// Catch-up time sampling results
    pub catchup: Option<CatchupSummary>,
}

// ============================================================================
// Degree Statistics
// ============================================================================

/// Degree distribution summary
#[derive(Debug, Clone)]
pub struct DegreeStats {
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub median: f64,

    /// Histogram of log-degrees (preferential attachment yields heavy
    /// tails, so the log scale is the readable one)
    pub log_histogram: Vec<LogDegreeBucket>,
}

/// One log-degree histogram bucket over [lower, upper)
#[derive(Debug, Clone)]
pub struct LogDegreeBucket {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Degree stats within one fitness group
#[derive(Debug, Clone)]
pub struct GroupStats {
    pub nodes: usize,
    pub min_degree: u64,
    pub max_degree: u64,
    pub mean_degree: f64,
}

// ============================================================================
// Catch-Up Summary
// ============================================================================

/// Catch-up sampling results for one experiment
#[derive(Debug, Clone)]
pub struct CatchupSummary {
    /// Pairs requested by the config
    pub requested: usize,

    /// Sampled pairs with measured and predicted times
    pub pairs: Vec<PairOutcome>,

    /// Pairs that caught up within the graph
    pub caught_up: usize,

    /// Pairs that never caught up
    pub never: usize,
}

/// One sampled pair: measured catch-up time vs analytic prediction
#[derive(Debug, Clone)]
pub struct PairOutcome {
    pub i: usize,
    pub j: usize,
    pub fitness_i: f64,
    pub fitness_j: f64,

    /// Analytic prediction `i * (i/j)^(1/(beta-1))`, clamped to size+1
    pub predicted: f64,

    /// Raw analyzer outcome
    pub result: CatchupResult,

    /// Measured time, with `Never` pinned to size+1
    pub actual: usize,
}

// ============================================================================
// Collection
// ============================================================================

const HISTOGRAM_BUCKETS: usize = 20;
const MAX_FITNESS_GROUPS: usize = 8;

impl ExperimentResult {
    /// Collect result statistics from a grown network.
    pub fn collect(
        pan: &PanNetwork,
        config_summary: String,
        seed_used: [u8; 32],
        catchup: Option<CatchupSummary>,
    ) -> Self {
        Self {
            config_summary,
            seed_used,
            size: pan.size(),
            total_edges: pan.total_edges(),
            out_degree: pan.out_degree(),
            degree_stats: degree_stats(pan.degrees()),
            fitness_groups: fitness_groups(pan),
            catchup,
        }
    }

    /// Print summary to console
    pub fn print_summary(&self) {
        println!("\n╔════════════════════════════════════════════════════════╗");
        println!("║    EXPERIMENT RESULTS                                  ║");
        println!("╚════════════════════════════════════════════════════════╝\n");

        println!("Configuration: {}", self.config_summary);
        println!("Size: {} nodes, {} edges (m = {})", self.size, self.total_edges, self.out_degree);
        println!();

        let stats = &self.degree_stats;
        println!("═══ Degree Distribution ═══");
        println!(
            "  min={}, max={}, mean={:.2}, median={:.1}",
            stats.min, stats.max, stats.mean, stats.median
        );
        println!("\n  log-degree histogram:");
        let peak = stats
            .log_histogram
            .iter()
            .map(|b| b.count)
            .max()
            .unwrap_or(1)
            .max(1);
        for bucket in &stats.log_histogram {
            let width = bucket.count * 40 / peak;
            println!(
                "    [{:5.2}-{:5.2}) {:6} {}",
                bucket.lower,
                bucket.upper,
                bucket.count,
                "#".repeat(width)
            );
        }
        println!();

        if let Some(ref groups) = self.fitness_groups {
            println!("═══ Degrees by Fitness Group ═══");
            for (label, group) in groups {
                println!(
                    "  {}: {} nodes, degree min={}, max={}, mean={:.2}",
                    label, group.nodes, group.min_degree, group.max_degree, group.mean_degree
                );
            }
            println!();
        }

        if let Some(ref catchup) = self.catchup {
            println!("═══ Catch-Up Times ═══");
            println!(
                "  sampled {} pairs ({} requested): {} caught up, {} never",
                catchup.pairs.len(),
                catchup.requested,
                catchup.caught_up,
                catchup.never
            );
            println!("  (never / out-of-range predictions are pinned to size+1 = {})", self.size + 1);
            println!("\n  {:>8} {:>8} {:>10} {:>12} {:>12}", "i", "j", "beta", "measured", "predicted");
            for pair in catchup.pairs.iter().take(20) {
                let measured = match pair.result {
                    CatchupResult::CaughtUp(t) => format!("{}", t),
                    _ => format!("{} (never)", pair.actual),
                };
                println!(
                    "  {:>8} {:>8} {:>10.3} {:>12} {:>12.1}",
                    pair.i,
                    pair.j,
                    pair.fitness_i / pair.fitness_j,
                    measured,
                    pair.predicted
                );
            }
            if catchup.pairs.len() > 20 {
                println!("  ... {} more pairs", catchup.pairs.len() - 20);
            }
            println!();
        }
    }
}

/// Summarize a degree array: order statistics plus a log-degree histogram.
fn degree_stats(degrees: &[u64]) -> DegreeStats {
    let mut sorted = degrees.to_vec();
    sorted.sort_unstable();

    let n = sorted.len();
    let min = sorted.first().copied().unwrap_or(0);
    let max = sorted.last().copied().unwrap_or(0);
    let mean = sorted.iter().sum::<u64>() as f64 / n.max(1) as f64;
    let median = if n == 0 {
        0.0
    } else if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0
    } else {
        sorted[n / 2] as f64
    };

    let log_min = (min.max(1) as f64).ln();
    let log_max = (max.max(1) as f64).ln();
    let span = (log_max - log_min).max(f64::EPSILON);
    let mut buckets: Vec<LogDegreeBucket> = (0..HISTOGRAM_BUCKETS)
        .map(|k| LogDegreeBucket {
            lower: log_min + span * k as f64 / HISTOGRAM_BUCKETS as f64,
            upper: log_min + span * (k + 1) as f64 / HISTOGRAM_BUCKETS as f64,
            count: 0,
        })
        .collect();
    for &d in degrees {
        let log_d = (d.max(1) as f64).ln();
        let idx = (((log_d - log_min) / span) * HISTOGRAM_BUCKETS as f64) as usize;
        buckets[idx.min(HISTOGRAM_BUCKETS - 1)].count += 1;
    }

    DegreeStats {
        min,
        max,
        mean,
        median,
        log_histogram: buckets,
    }
}

/// Per-group degree stats when the fitness values form a small discrete set,
/// ascending by fitness so the printout is stable.
fn fitness_groups(pan: &PanNetwork) -> Option<IndexMap<String, GroupStats>> {
    let mut distinct: Vec<f64> = Vec::new();
    for &f in pan.fitnesses() {
        if !distinct.iter().any(|&d| d == f) {
            distinct.push(f);
            if distinct.len() > MAX_FITNESS_GROUPS {
                return None;
            }
        }
    }
    if distinct.len() < 2 {
        return None;
    }
    distinct.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut groups = IndexMap::new();
    for &value in &distinct {
        let degrees: Vec<u64> = pan
            .fitnesses()
            .iter()
            .zip(pan.degrees())
            .filter(|(&f, _)| f == value)
            .map(|(_, &d)| d)
            .collect();
        let nodes = degrees.len();
        let min_degree = degrees.iter().copied().min().unwrap_or(0);
        let max_degree = degrees.iter().copied().max().unwrap_or(0);
        let mean_degree = degrees.iter().sum::<u64>() as f64 / nodes.max(1) as f64;
        groups.insert(
            format!("f={}", value),
            GroupStats {
                nodes,
                min_degree,
                max_degree,
                mean_degree,
            },
        );
    }
    Some(groups)
}
