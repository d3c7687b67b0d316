// Shared types for the preferential-attachment network simulator.
//
// Node identity is the creation index: node `i` is the i-th node appended to
// the graph, and the time step `t` is exactly the creation of node `t`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Node identity = creation index (0-based, insertion order).
pub type NodeId = usize;

/// Time step `t` is the creation of node `t`.
pub type TimeStep = usize;

/// Errors surfaced by the growth engine and the catch-up analyzer.
///
/// All errors are local and synchronous; there is nothing to retry in this
/// domain (pure computation, no I/O).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanError {
    /// Construction or growth parameter out of range (out-degree below 1,
    /// grow target below current size, bad distribution parameters).
    InvalidParameter(&'static str),

    /// Batch pair at `index` fails the validity predicate. Single-pair
    /// queries report this as `CatchupResult::NotApplicable` instead, since
    /// callers are expected to pre-filter.
    InvalidPair { index: usize },

    /// Parallel pair arrays of unequal length, rejected before any work.
    LengthMismatch { left: usize, right: usize },

    /// Total sampling weight is zero, negative, or non-finite. Possible when
    /// a fitness sampler yields non-positive values; fatal, since the weights
    /// no longer form a probability mass.
    DegenerateWeights,

    /// A batch scan observed a set `CancelFlag`.
    Cancelled,
}

/// Outcome of a catch-up query for one pair `(i, j)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatchupResult {
    /// Smallest time step at which `i`'s accumulated degree reached `j`'s.
    CaughtUp(TimeStep),

    /// The graph ended before `i` caught up.
    Never,

    /// The pair fails the validity predicate (`i` must be strictly younger
    /// and strictly fitter than `j`).
    NotApplicable,
}

impl CatchupResult {
    /// Time step if the pair caught up.
    pub fn time(&self) -> Option<TimeStep> {
        match self {
            CatchupResult::CaughtUp(t) => Some(*t),
            _ => None,
        }
    }
}

/// Observer for long-running growth loops.
///
/// The engine never prints; callers that want progress output implement this
/// and decide on their own cadence.
pub trait ProgressSink {
    fn on_progress(&mut self, current: usize, target: usize);
}

/// No-op progress sink (zero overhead)
pub struct NoOpProgress;

impl ProgressSink for NoOpProgress {
    #[inline(always)]
    fn on_progress(&mut self, _current: usize, _target: usize) {
        // Intentionally empty - compiler should optimize this away
    }
}

/// Best-effort cancellation handle for long batch scans.
///
/// Cloneable; the scan polls the flag and returns `PanError::Cancelled` when
/// it is set. Graphs can reach millions of nodes, so a caller holding the
/// clone can abort a scan it no longer needs.
///
/// # Example
/// ```
/// use pan_rust::pan_interface::CancelFlag;
///
/// let flag = CancelFlag::new();
/// let handle = flag.clone();
/// assert!(!flag.is_cancelled());
/// handle.cancel();
/// assert!(flag.is_cancelled());
/// ```
#[derive(Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_flag_shared_across_clones() {
        let flag = CancelFlag::new();
        let clone = flag.clone();
        assert!(!clone.is_cancelled());
        flag.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_catchup_result_time() {
        assert_eq!(CatchupResult::CaughtUp(42).time(), Some(42));
        assert_eq!(CatchupResult::Never.time(), None);
        assert_eq!(CatchupResult::NotApplicable.time(), None);
    }
}
