//! B-tree statistics tracking.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Structural statistics tracked by a [`BTree`](crate::BTree).
///
/// All fields are atomic so they can be bumped through `&self` while the
/// tree is borrowed for insertion.
///
/// # Memory Ordering
/// We use `Ordering::Relaxed` for all operations because:
/// - We only need atomicity (no partial updates)
/// - We don't need synchronization between different counters
///
/// # Example
/// ```
/// use ordtree::TreeStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = TreeStats::new();
/// stats.nodes_allocated.fetch_add(3, Ordering::Relaxed);
/// stats.nodes_released.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.live_nodes(), 2);
/// ```
#[derive(Debug)]
pub struct TreeStats {
    /// Nodes successfully created.
    pub nodes_allocated: AtomicU64,

    /// Nodes released by teardown, drain, or a failed root split.
    pub nodes_released: AtomicU64,

    /// Full nodes divided in two (root splits included).
    pub splits: AtomicU64,

    /// Times the tree grew by one level.
    pub root_splits: AtomicU64,

    /// Node creations refused by the allocator.
    pub allocation_failures: AtomicU64,
}

impl TreeStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            nodes_allocated: AtomicU64::new(0),
            nodes_released: AtomicU64::new(0),
            splits: AtomicU64::new(0),
            root_splits: AtomicU64::new(0),
            allocation_failures: AtomicU64::new(0),
        }
    }

    /// Nodes currently owned by the tree.
    pub fn live_nodes(&self) -> u64 {
        let allocated = self.nodes_allocated.load(Ordering::Relaxed);
        let released = self.nodes_released.load(Ordering::Relaxed);
        allocated.saturating_sub(released)
    }

    /// Get a snapshot of current statistics.
    ///
    /// This returns a non-atomic copy for display/logging.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            nodes_allocated: self.nodes_allocated.load(Ordering::Relaxed),
            nodes_released: self.nodes_released.load(Ordering::Relaxed),
            splits: self.splits.load(Ordering::Relaxed),
            root_splits: self.root_splits.load(Ordering::Relaxed),
            allocation_failures: self.allocation_failures.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.nodes_allocated.store(0, Ordering::Relaxed);
        self.nodes_released.store(0, Ordering::Relaxed);
        self.splits.store(0, Ordering::Relaxed);
        self.root_splits.store(0, Ordering::Relaxed);
        self.allocation_failures.store(0, Ordering::Relaxed);
    }

    pub(crate) fn record_release(&self, nodes: usize) {
        self.nodes_released
            .fetch_add(nodes as u64, Ordering::Relaxed);
    }
}

impl Default for TreeStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of tree statistics.
///
/// Unlike `TreeStats`, this is not atomic and can be safely
/// printed, compared, etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub nodes_allocated: u64,
    pub nodes_released: u64,
    pub splits: u64,
    pub root_splits: u64,
    pub allocation_failures: u64,
}

impl StatsSnapshot {
    /// Nodes owned by the tree when the snapshot was taken.
    pub fn live_nodes(&self) -> u64 {
        self.nodes_allocated.saturating_sub(self.nodes_released)
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ live: {}, allocated: {}, released: {}, splits: {}, root_splits: {}, failures: {} }}",
            self.live_nodes(),
            self.nodes_allocated,
            self.nodes_released,
            self.splits,
            self.root_splits,
            self.allocation_failures
        )
    }
}
