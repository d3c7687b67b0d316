// Catch-up time computation.
//
// A pair (i, j) asks: at which time step does the younger, fitter node i
// first accumulate at least as much degree as the older node j? The batch
// scan answers any number of pairs in a single replay of the edge-arrival
// history; the single-pair scan is the simple iterative form kept as a
// cross-check oracle.

use crate::pan_interface::{CancelFlag, CatchupResult, NodeId, PanError};
use crate::pan_network::PanNetwork;
use hashbrown::HashMap;

/// Read-only catch-up analysis over a network.
///
/// Borrows the network immutably for its lifetime, so analysis can never
/// interleave with `add_node` on the same graph: the edge-record sequence
/// and all degree/fitness values below the current size are stable for the
/// whole pass.
///
/// # Example
/// ```
/// use pan_rust::pan_catchup::CatchupAnalyzer;
/// use pan_rust::pan_fitness::BetaFitness;
/// use pan_rust::pan_network::{PanConfig, PanNetwork};
///
/// let config = PanConfig { out_degree: 5, seed: Some([3u8; 32]), ..PanConfig::default() };
/// let sampler = Box::new(BetaFitness::new(1.0, 10.0).unwrap());
/// let mut pan = PanNetwork::new(config, sampler).unwrap();
/// pan.grow_to_size(500).unwrap();
///
/// let analyzer = CatchupAnalyzer::new(&pan);
/// for i in 1..pan.size() {
///     if analyzer.is_valid_pair(i, 0) {
///         let _ = analyzer.catchup_time(i, 0);
///     }
/// }
/// ```
pub struct CatchupAnalyzer<'a> {
    network: &'a PanNetwork,
}

impl<'a> CatchupAnalyzer<'a> {
    pub fn new(network: &'a PanNetwork) -> Self {
        Self { network }
    }

    /// A pair (i, j) is valid iff `i` exists, is strictly younger than `j`
    /// (`i > j`) and strictly fitter (`fitness[i] > fitness[j]`). Fitness
    /// ties are simply invalid, not an error.
    pub fn is_valid_pair(&self, i: NodeId, j: NodeId) -> bool {
        if i >= self.network.size() || i <= j {
            return false;
        }
        match (self.network.fitness(i), self.network.fitness(j)) {
            (Some(fi), Some(fj)) => fi > fj,
            _ => false,
        }
    }

    /// A batch is valid iff the arrays have equal length and every pair is
    /// valid.
    pub fn is_valid_batch(&self, i_s: &[NodeId], j_s: &[NodeId]) -> bool {
        i_s.len() == j_s.len()
            && i_s.iter().zip(j_s).all(|(&i, &j)| self.is_valid_pair(i, j))
    }

    /// Catch-up time for a single pair.
    ///
    /// Scans times `j+1 ..= size-1`. Before the scan `j` already carries its
    /// baseline degree `m`; `i` is credited `m` at its own creation step.
    /// Each edge record credits a tracked node once per occurrence. The
    /// first step `T >= i` with `deg_i >= deg_j` resolves the pair.
    ///
    /// # Returns
    /// `CaughtUp(T)`, `Never` if the graph ends first, or `NotApplicable`
    /// for a pair failing the validity predicate.
    pub fn catchup_time(&self, i: NodeId, j: NodeId) -> CatchupResult {
        if !self.is_valid_pair(i, j) {
            return CatchupResult::NotApplicable;
        }
        let m = self.network.out_degree() as u64;
        let records = self.network.edge_records();
        let mut deg_i: u64 = 0;
        let mut deg_j: u64 = m;

        for t in (j + 1)..records.len() {
            if t == i {
                deg_i += m;
            }
            // Targets are strictly older than t, so i == target and t == i
            // never coincide; node 0's self-records are unreachable here
            // because the scan starts at j + 1 >= 1.
            for &target in &records[t] {
                if target == i {
                    deg_i += 1;
                } else if target == j {
                    deg_j += 1;
                }
            }
            if t >= i && deg_i >= deg_j {
                return CatchupResult::CaughtUp(t);
            }
        }
        CatchupResult::Never
    }

    /// Catch-up times for a batch of pairs in one pass over the history.
    ///
    /// The n-th result corresponds to the pair `(i_s[n], j_s[n])`. Unlike
    /// `catchup_time`, an invalid input is rejected up front instead of
    /// producing per-pair sentinels, so results only ever contain
    /// `CaughtUp` or `Never`.
    ///
    /// This is the canonical implementation: total work is bounded by one
    /// graph traversal regardless of how many pairs are queried, with an
    /// early exit once every pair has resolved.
    ///
    /// # Errors
    /// `LengthMismatch` for unequal arrays, `InvalidPair` naming the first
    /// offending index.
    pub fn catchup_times(
        &self,
        i_s: &[NodeId],
        j_s: &[NodeId],
    ) -> Result<Vec<CatchupResult>, PanError> {
        self.scan(i_s, j_s, None)
    }

    /// Like `catchup_times`, but polls `cancel` during the scan and returns
    /// `Cancelled` once the flag is set. Best-effort: a set flag is observed
    /// within one time step.
    pub fn catchup_times_cancellable(
        &self,
        i_s: &[NodeId],
        j_s: &[NodeId],
        cancel: &CancelFlag,
    ) -> Result<Vec<CatchupResult>, PanError> {
        self.scan(i_s, j_s, Some(cancel))
    }

    fn scan(
        &self,
        i_s: &[NodeId],
        j_s: &[NodeId],
        cancel: Option<&CancelFlag>,
    ) -> Result<Vec<CatchupResult>, PanError> {
        if i_s.len() != j_s.len() {
            return Err(PanError::LengthMismatch {
                left: i_s.len(),
                right: j_s.len(),
            });
        }
        for (index, (&i, &j)) in i_s.iter().zip(j_s).enumerate() {
            if !self.is_valid_pair(i, j) {
                return Err(PanError::InvalidPair { index });
            }
        }

        let n = i_s.len();
        let m = self.network.out_degree() as u64;
        let size = self.network.size();

        // Running degree tallies for every node appearing in either role.
        // Duplicate entries share a tally; a node used as both an i and a j
        // is tracked independently per role.
        let mut deg_i: HashMap<NodeId, u64> = i_s.iter().map(|&i| (i, 0)).collect();
        let mut deg_j: HashMap<NodeId, u64> = j_s.iter().map(|&j| (j, 0)).collect();

        let mut results: Vec<Option<NodeId>> = vec![None; n];
        let mut resolved = 0;

        for (t, record) in self.network.edge_records().iter().enumerate() {
            if let Some(flag) = cancel {
                if flag.is_cancelled() {
                    return Err(PanError::Cancelled);
                }
            }

            // Baseline degree m at the tracked node's own creation step.
            if let Some(d) = deg_i.get_mut(&t) {
                *d += m;
            }
            if let Some(d) = deg_j.get_mut(&t) {
                *d += m;
            }

            for &target in record {
                // A record entry equal to its own creation time is node 0's
                // initial self-record, already credited as baseline.
                if target == t {
                    continue;
                }
                if let Some(d) = deg_i.get_mut(&target) {
                    *d += 1;
                }
                if let Some(d) = deg_j.get_mut(&target) {
                    *d += 1;
                }
            }

            for k in 0..n {
                if results[k].is_none() && t >= i_s[k] && deg_i[&i_s[k]] >= deg_j[&j_s[k]] {
                    results[k] = Some(t);
                    resolved += 1;
                }
            }
            if resolved == n {
                break;
            }

            if t > 0 && t % 1000 == 0 {
                log::debug!("catch-up scan at step {} / {}", t, size);
            }
        }

        Ok(results
            .into_iter()
            .map(|r| r.map_or(CatchupResult::Never, CatchupResult::CaughtUp))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pan_fitness::BetaFitness;
    use crate::pan_network::PanConfig;

    /// m=1 history with fully known degrees:
    ///   t0: [0] (initial self-record), t1: [0], t2: [1], t3: [2], t4: [2]
    fn known_network() -> PanNetwork {
        PanNetwork::from_parts(
            1,
            vec![1.0, 2.0, 3.0, 0.5, 5.0],
            vec![vec![0], vec![0], vec![1], vec![2], vec![2]],
        )
    }

    #[test]
    fn test_validity_predicate() {
        let pan = known_network();
        let analyzer = CatchupAnalyzer::new(&pan);

        assert!(analyzer.is_valid_pair(1, 0));
        assert!(analyzer.is_valid_pair(4, 3));
        assert!(!analyzer.is_valid_pair(0, 0)); // i == j
        assert!(!analyzer.is_valid_pair(0, 1)); // i older than j
        assert!(!analyzer.is_valid_pair(3, 0)); // i less fit than j
        assert!(!analyzer.is_valid_pair(5, 0)); // i out of range
    }

    #[test]
    fn test_single_pair_known_history() {
        let pan = known_network();
        let analyzer = CatchupAnalyzer::new(&pan);

        assert_eq!(analyzer.catchup_time(1, 0), CatchupResult::CaughtUp(2));
        assert_eq!(analyzer.catchup_time(2, 0), CatchupResult::CaughtUp(3));
        assert_eq!(analyzer.catchup_time(2, 1), CatchupResult::CaughtUp(3));
        assert_eq!(analyzer.catchup_time(4, 0), CatchupResult::Never);
        assert_eq!(analyzer.catchup_time(4, 1), CatchupResult::Never);
        // Already level with j at its own creation step.
        assert_eq!(analyzer.catchup_time(4, 3), CatchupResult::CaughtUp(4));
    }

    #[test]
    fn test_single_pair_boundaries() {
        let pan = known_network();
        let analyzer = CatchupAnalyzer::new(&pan);

        assert_eq!(analyzer.catchup_time(2, 2), CatchupResult::NotApplicable);
        assert_eq!(analyzer.catchup_time(1, 3), CatchupResult::NotApplicable);
        assert_eq!(analyzer.catchup_time(3, 1), CatchupResult::NotApplicable);
        assert_eq!(analyzer.catchup_time(9, 0), CatchupResult::NotApplicable);
    }

    #[test]
    fn test_batch_known_history() {
        let pan = known_network();
        let analyzer = CatchupAnalyzer::new(&pan);

        let i_s = [1, 2, 2, 4, 4, 4];
        let j_s = [0, 0, 1, 0, 1, 3];
        let results = analyzer.catchup_times(&i_s, &j_s).unwrap();
        assert_eq!(
            results,
            vec![
                CatchupResult::CaughtUp(2),
                CatchupResult::CaughtUp(3),
                CatchupResult::CaughtUp(3),
                CatchupResult::Never,
                CatchupResult::Never,
                CatchupResult::CaughtUp(4),
            ]
        );
    }

    #[test]
    fn test_batch_rejects_invalid_input() {
        let pan = known_network();
        let analyzer = CatchupAnalyzer::new(&pan);

        assert_eq!(
            analyzer.catchup_times(&[1, 2], &[0]),
            Err(PanError::LengthMismatch { left: 2, right: 1 })
        );
        assert_eq!(
            analyzer.catchup_times(&[1, 3], &[0, 1]),
            Err(PanError::InvalidPair { index: 1 })
        );
        assert!(!analyzer.is_valid_batch(&[1, 3], &[0, 1]));
        assert!(analyzer.is_valid_batch(&[1, 2], &[0, 1]));
    }

    #[test]
    fn test_batch_matches_single_pair() {
        let config = PanConfig {
            out_degree: 2,
            capacity: 512,
            seed: Some([21u8; 32]),
        };
        let sampler = Box::new(BetaFitness::new(1.0, 10.0).unwrap());
        let mut pan = PanNetwork::new(config, sampler).unwrap();
        pan.grow_to_size(400).unwrap();

        let analyzer = CatchupAnalyzer::new(&pan);
        let mut i_s = Vec::new();
        let mut j_s = Vec::new();
        for i in (1..pan.size()).step_by(7) {
            for j in (0..i).step_by(13) {
                if analyzer.is_valid_pair(i, j) {
                    i_s.push(i);
                    j_s.push(j);
                }
            }
        }
        assert!(i_s.len() > 20, "seed produced too few valid pairs");

        let batch = analyzer.catchup_times(&i_s, &j_s).unwrap();
        for (k, (&i, &j)) in i_s.iter().zip(&j_s).enumerate() {
            assert_eq!(batch[k], analyzer.catchup_time(i, j), "pair ({}, {})", i, j);
        }
    }

    #[test]
    fn test_shared_nodes_across_pairs() {
        let pan = known_network();
        let analyzer = CatchupAnalyzer::new(&pan);

        // Node 2 is the i of one pair and the j of another in the same batch.
        let results = analyzer.catchup_times(&[2, 4], &[1, 2]).unwrap();
        assert_eq!(results[0], analyzer.catchup_time(2, 1));
        assert_eq!(results[1], analyzer.catchup_time(4, 2));
    }

    #[test]
    fn test_cancelled_scan() {
        let pan = known_network();
        let analyzer = CatchupAnalyzer::new(&pan);

        let flag = CancelFlag::new();
        flag.cancel();
        assert_eq!(
            analyzer.catchup_times_cancellable(&[1], &[0], &flag),
            Err(PanError::Cancelled)
        );

        let fresh = CancelFlag::new();
        assert!(analyzer
            .catchup_times_cancellable(&[1], &[0], &fresh)
            .is_ok());
    }
}
