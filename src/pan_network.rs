// Preferential-attachment growth engine.
//
// The graph starts with a single node and only ever grows. Each new node
// attaches `m` edges to existing nodes, drawn independently with replacement
// with probability proportional to `degree * fitness`, so multi-edges and
// (for node 0's initial record) self-loops are expected and counted with
// multiplicity.

use crate::pan_fitness::FitnessSampler;
use crate::pan_interface::{NoOpProgress, NodeId, PanError, ProgressSink};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Growth engine parameters.
///
/// `capacity` is purely a performance hint: backing storage is pre-sized to
/// it and re-reserved by `grow_to_size`, never observable in behavior.
#[derive(Debug, Clone)]
pub struct PanConfig {
    /// Number of attachment edges created by every new node (m >= 1).
    pub out_degree: usize,

    /// Initial capacity hint for the per-node arrays.
    pub capacity: usize,

    /// RNG seed; `None` seeds from entropy. The one RNG drives both target
    /// sampling and fitness draws, so a fixed seed reproduces the whole run.
    pub seed: Option<[u8; 32]>,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            out_degree: 1,
            capacity: 1000,
            seed: None,
        }
    }
}

/// Preferential-attachment network with per-node fitness.
///
/// State is owned exclusively by one instance; analysis passes borrow it
/// immutably (see `CatchupAnalyzer`), which statically rules out analysis
/// running concurrently with `add_node`.
///
/// # Example
/// ```
/// use pan_rust::pan_fitness::ConstantFitness;
/// use pan_rust::pan_network::{PanConfig, PanNetwork};
///
/// let config = PanConfig { seed: Some([1u8; 32]), ..PanConfig::default() };
/// let mut pan = PanNetwork::new(config, Box::new(ConstantFitness::default())).unwrap();
/// pan.grow_to_size(100).unwrap();
/// assert_eq!(pan.size(), 100);
/// assert_eq!(pan.total_edges(), 100);
/// ```
pub struct PanNetwork {
    m: usize,
    degs: Vec<u64>,
    fs: Vec<f64>,
    weights: Vec<f64>,
    edges: Vec<Vec<NodeId>>,
    size: usize,
    tot_edges: u64,
    tot_weight: KahanAccumulator,
    fitness: Box<dyn FitnessSampler>,
    rng: StdRng,
}

impl PanNetwork {
    /// Create a network with exactly one node: degree `m`, one fitness draw,
    /// and an initial edge record of `m` entries pointing at index 0.
    ///
    /// # Errors
    /// `InvalidParameter` when `out_degree` is 0.
    pub fn new(config: PanConfig, fitness: Box<dyn FitnessSampler>) -> Result<Self, PanError> {
        if config.out_degree < 1 {
            return Err(PanError::InvalidParameter("out-degree must be at least 1"));
        }
        let capacity = config.capacity.max(1);
        let mut rng = match config.seed {
            Some(seed) => StdRng::from_seed(seed),
            None => StdRng::from_entropy(),
        };
        let mut fitness = fitness;
        let m = config.out_degree;

        let first_fit = fitness.sample(&mut rng);
        let mut degs = Vec::with_capacity(capacity);
        let mut fs = Vec::with_capacity(capacity);
        let mut weights = Vec::with_capacity(capacity);
        let mut edges = Vec::with_capacity(capacity);
        degs.push(m as u64);
        fs.push(first_fit);
        weights.push(m as f64 * first_fit);
        edges.push(vec![0; m]);

        let mut tot_weight = KahanAccumulator::default();
        tot_weight.add(m as f64 * first_fit);

        Ok(Self {
            m,
            degs,
            fs,
            weights,
            edges,
            size: 1,
            tot_edges: m as u64,
            tot_weight,
            fitness,
            rng,
        })
    }

    /// Attach one new node.
    ///
    /// Draws `m` targets independently with replacement from the existing
    /// nodes, with probability `weight[k] / total_weight` for index `k`,
    /// then appends the new node with baseline degree `m` and credits each
    /// sampled target one degree (and one fitness worth of weight) per
    /// occurrence.
    ///
    /// # Returns
    /// The new node's index.
    ///
    /// # Errors
    /// `DegenerateWeights` when the sampling mass is no longer a valid
    /// probability distribution (zero/negative/non-finite total, or unusable
    /// per-node weights). This can only arise from samplers that yield
    /// non-positive fitness values.
    pub fn add_node(&mut self) -> Result<NodeId, PanError> {
        let size = self.size;
        let m = self.m;

        let total = self.tot_weight.value();
        if !(total > 0.0 && total.is_finite()) {
            return Err(PanError::DegenerateWeights);
        }

        // WeightedIndex validates every weight (rejects negatives, NaN and
        // an all-zero mass), backing up the total-weight check above.
        let dist = WeightedIndex::new(&self.weights[..size])
            .map_err(|_| PanError::DegenerateWeights)?;
        let targets: Vec<NodeId> = (0..m).map(|_| dist.sample(&mut self.rng)).collect();

        let new_fit = self.fitness.sample(&mut self.rng);
        self.degs.push(m as u64);
        self.fs.push(new_fit);
        self.weights.push(m as f64 * new_fit);
        self.tot_weight.add(m as f64 * new_fit);

        // Degree went up by one, so the weight delta is the target's own
        // fitness. Multiplicity is additive: a target drawn twice is
        // credited twice.
        for &t in &targets {
            self.degs[t] += 1;
            self.weights[t] += self.fs[t];
            self.tot_weight.add(self.fs[t]);
        }

        self.edges.push(targets);
        self.size += 1;
        self.tot_edges += m as u64;
        Ok(size)
    }

    /// Grow until the graph has `target` nodes.
    ///
    /// # Errors
    /// `InvalidParameter` when `target` is below the current size; any
    /// `add_node` error is propagated.
    pub fn grow_to_size(&mut self, target: usize) -> Result<(), PanError> {
        self.grow_to_size_with_progress(target, &mut NoOpProgress)
    }

    /// Grow to `target` nodes, reporting after every attachment through
    /// `sink`. Pre-reserves backing storage once when `target` exceeds the
    /// current capacity.
    pub fn grow_to_size_with_progress(
        &mut self,
        target: usize,
        sink: &mut dyn ProgressSink,
    ) -> Result<(), PanError> {
        if target < self.size {
            return Err(PanError::InvalidParameter("grow target below current size"));
        }
        if target > self.degs.capacity() {
            let extra = target - self.size;
            self.degs.reserve(extra);
            self.fs.reserve(extra);
            self.weights.reserve(extra);
            self.edges.reserve(extra);
        }
        while self.size < target {
            self.add_node()?;
            sink.on_progress(self.size, target);
            if self.size % 1000 == 0 {
                log::debug!("network grown to {} / {} nodes", self.size, target);
            }
        }
        Ok(())
    }

    /// Current number of nodes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Attachment edges per new node (m).
    pub fn out_degree(&self) -> usize {
        self.m
    }

    /// Total edge endpoints created so far (m per node, initial node
    /// included).
    pub fn total_edges(&self) -> u64 {
        self.tot_edges
    }

    /// Current total sampling weight, `sum(degree * fitness)` over all
    /// nodes, maintained with compensated summation.
    pub fn total_weight(&self) -> f64 {
        self.tot_weight.value()
    }

    pub fn degree(&self, node: NodeId) -> Option<u64> {
        self.degs.get(node).copied()
    }

    /// Degrees of all nodes, indexed by creation order.
    pub fn degrees(&self) -> &[u64] {
        &self.degs
    }

    pub fn fitness(&self, node: NodeId) -> Option<f64> {
        self.fs.get(node).copied()
    }

    /// Fitness values of all nodes, indexed by creation order.
    pub fn fitnesses(&self) -> &[f64] {
        &self.fs
    }

    /// The `m` targets node `t` attached to at its creation, in draw order.
    pub fn attachments(&self, t: NodeId) -> Option<&[NodeId]> {
        self.edges.get(t).map(|e| e.as_slice())
    }

    /// Full edge-record sequence indexed by creation time.
    pub fn edge_records(&self) -> &[Vec<NodeId>] {
        &self.edges
    }

    /// Build a network from an explicit edge history. Test-only: lets the
    /// catch-up scans run against handcrafted, fully known histories.
    #[cfg(test)]
    pub(crate) fn from_parts(m: usize, fs: Vec<f64>, edges: Vec<Vec<NodeId>>) -> Self {
        assert_eq!(fs.len(), edges.len());
        let size = fs.len();
        let mut degs = vec![m as u64; size];
        for (t, record) in edges.iter().enumerate().skip(1) {
            assert_eq!(record.len(), m);
            for &target in record {
                assert!(target < t);
                degs[target] += 1;
            }
        }
        let weights: Vec<f64> = degs.iter().zip(&fs).map(|(&d, &f)| d as f64 * f).collect();
        let mut tot_weight = KahanAccumulator::default();
        for &w in &weights {
            tot_weight.add(w);
        }
        Self {
            m,
            degs,
            fs,
            weights,
            edges,
            size,
            tot_edges: (m * size) as u64,
            tot_weight,
            fitness: Box::new(crate::pan_fitness::ConstantFitness::default()),
            rng: StdRng::from_seed([0u8; 32]),
        }
    }
}

// ============================================================================
// Compensated Summation
// ============================================================================

/// Kahan compensated accumulator for the running total weight.
///
/// The total absorbs millions of small increments over a long growth run;
/// naive sequential addition drifts, so each add carries the rounding error
/// forward into the next one.
#[derive(Debug, Clone, Copy, Default)]
struct KahanAccumulator {
    sum: f64,
    compensation: f64,
}

impl KahanAccumulator {
    fn add(&mut self, x: f64) {
        let y = x - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }

    fn value(&self) -> f64 {
        self.sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pan_fitness::{BetaFitness, ConstantFitness};

    fn flat_network(m: usize, seed: u8) -> PanNetwork {
        let config = PanConfig {
            out_degree: m,
            capacity: 16,
            seed: Some([seed; 32]),
        };
        PanNetwork::new(config, Box::new(ConstantFitness::default())).unwrap()
    }

    fn beta_network(m: usize, seed: u8) -> PanNetwork {
        let config = PanConfig {
            out_degree: m,
            capacity: 16,
            seed: Some([seed; 32]),
        };
        PanNetwork::new(config, Box::new(BetaFitness::new(1.0, 10.0).unwrap())).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let pan = flat_network(3, 1);
        assert_eq!(pan.size(), 1);
        assert_eq!(pan.out_degree(), 3);
        assert_eq!(pan.total_edges(), 3);
        assert_eq!(pan.degree(0), Some(3));
        assert_eq!(pan.attachments(0), Some(&[0usize, 0, 0][..]));
        assert_eq!(pan.fitness(0), Some(1.0));
    }

    #[test]
    fn test_rejects_zero_out_degree() {
        let config = PanConfig { out_degree: 0, ..PanConfig::default() };
        let result = PanNetwork::new(config, Box::new(ConstantFitness::default()));
        assert!(matches!(result, Err(PanError::InvalidParameter(_))));
    }

    #[test]
    fn test_add_node_counts() {
        let mut pan = beta_network(2, 2);
        for n in 1..=50 {
            let id = pan.add_node().unwrap();
            assert_eq!(id, n);
            assert_eq!(pan.size(), n + 1);
            assert_eq!(pan.total_edges(), 2 + n as u64 * 2);
        }
    }

    #[test]
    fn test_targets_strictly_older() {
        let mut pan = beta_network(3, 3);
        pan.grow_to_size(200).unwrap();
        for (t, record) in pan.edge_records().iter().enumerate().skip(1) {
            assert_eq!(record.len(), 3);
            assert!(record.iter().all(|&target| target < t));
        }
    }

    #[test]
    fn test_degree_conservation() {
        let mut pan = beta_network(2, 4);
        pan.grow_to_size(300).unwrap();

        // Node 0's initial self-records contribute one endpoint each, every
        // later attachment contributes two (baseline + target credit).
        let degree_sum: u64 = pan.degrees().iter().sum();
        assert_eq!(degree_sum, 2 * pan.total_edges() - pan.out_degree() as u64);

        // Per node: baseline m plus occurrences as a target in later records.
        let m = pan.out_degree() as u64;
        for node in 0..pan.size() {
            let occurrences: u64 = pan
                .edge_records()
                .iter()
                .skip(1)
                .map(|record| record.iter().filter(|&&t| t == node).count() as u64)
                .sum();
            assert_eq!(pan.degree(node), Some(m + occurrences));
        }
    }

    #[test]
    fn test_grow_to_size_and_invalid_target() {
        let mut pan = flat_network(1, 5);
        pan.grow_to_size(5).unwrap();
        assert_eq!(pan.size(), 5);
        assert_eq!(pan.total_edges(), 5);
        assert!(pan.degrees().iter().all(|&d| d >= 1));

        // Growing to the current size is a no-op, below it is an error.
        pan.grow_to_size(5).unwrap();
        assert_eq!(pan.size(), 5);
        assert!(matches!(pan.grow_to_size(4), Err(PanError::InvalidParameter(_))));
    }

    #[test]
    fn test_progress_sink_sees_every_step() {
        struct Recorder(Vec<(usize, usize)>);
        impl crate::pan_interface::ProgressSink for Recorder {
            fn on_progress(&mut self, current: usize, target: usize) {
                self.0.push((current, target));
            }
        }

        let mut pan = flat_network(1, 6);
        let mut recorder = Recorder(Vec::new());
        pan.grow_to_size_with_progress(6, &mut recorder).unwrap();
        assert_eq!(recorder.0, vec![(2, 6), (3, 6), (4, 6), (5, 6), (6, 6)]);
    }

    #[test]
    fn test_determinism_under_fixed_seed() {
        let mut a = beta_network(2, 9);
        let mut b = beta_network(2, 9);
        a.grow_to_size(200).unwrap();
        b.grow_to_size(200).unwrap();
        assert_eq!(a.degrees(), b.degrees());
        assert_eq!(a.fitnesses(), b.fitnesses());
        assert_eq!(a.edge_records(), b.edge_records());

        let mut c = beta_network(2, 10);
        c.grow_to_size(200).unwrap();
        assert_ne!(a.edge_records(), c.edge_records());
    }

    #[test]
    fn test_degrees_monotonic() {
        let mut pan = beta_network(1, 11);
        pan.grow_to_size(50).unwrap();
        let before = pan.degrees().to_vec();
        pan.grow_to_size(150).unwrap();
        for (node, &old) in before.iter().enumerate() {
            assert!(pan.degree(node).unwrap() >= old);
        }
    }

    #[test]
    fn test_beta_scenario_m5() {
        let mut pan = beta_network(5, 12);
        pan.grow_to_size(1000).unwrap();
        assert_eq!(pan.size(), 1000);
        assert_eq!(pan.total_edges(), 5000);
        let degree_sum: u64 = pan.degrees().iter().sum();
        assert_eq!(degree_sum, 2 * pan.total_edges() - 5);
        assert!(pan.degrees().iter().all(|&d| d >= 5));
    }

    #[test]
    fn test_zero_fitness_is_degenerate() {
        let config = PanConfig { seed: Some([13u8; 32]), ..PanConfig::default() };
        let mut pan = PanNetwork::new(config, Box::new(ConstantFitness::new(0.0))).unwrap();
        assert_eq!(pan.add_node(), Err(PanError::DegenerateWeights));
    }

    #[test]
    fn test_negative_fitness_is_degenerate() {
        let config = PanConfig { seed: Some([14u8; 32]), ..PanConfig::default() };
        let mut pan = PanNetwork::new(config, Box::new(ConstantFitness::new(-1.0))).unwrap();
        assert_eq!(pan.add_node(), Err(PanError::DegenerateWeights));
    }

    #[test]
    fn test_total_weight_tracks_degree_fitness_sum() {
        let mut pan = beta_network(3, 15);
        pan.grow_to_size(500).unwrap();
        let expected: f64 = pan
            .degrees()
            .iter()
            .zip(pan.fitnesses())
            .map(|(&d, &f)| d as f64 * f)
            .sum();
        assert!((pan.total_weight() - expected).abs() < 1e-6 * expected.abs());
    }

    #[test]
    fn test_kahan_compensates_small_increments() {
        // Increments below one ulp of the running sum are lost entirely by
        // naive sequential addition.
        let mut acc = KahanAccumulator::default();
        acc.add(1.0e8);
        for _ in 0..1_000_000 {
            acc.add(1.0e-8);
        }
        let expected = 1.0e8 + 1.0e-2;
        assert!((acc.value() - expected).abs() < 1e-6);
    }
}
