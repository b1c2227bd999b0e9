//! Fault-injecting allocator for exercising out-of-memory paths.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::alloc::{Global, NodeAllocator};
use crate::common::{Error, Result};

/// Failure plan shared by every clone of a [`FailpointAllocator`].
#[derive(Debug, Default)]
struct Plan {
    /// Successful allocations so far.
    allocations: u64,

    /// Refused allocations so far.
    failures: u64,

    /// Allocations still allowed before failing, or None when disarmed.
    budget: Option<u64>,
}

/// An allocator that succeeds until told otherwise.
///
/// Clones share one plan, so a test can hand one clone to the tree and
/// keep another to arm failures between operations.
///
/// # Example
/// ```
/// use ordtree::{BTree, FailpointAllocator, NaturalOrder};
///
/// let alloc = FailpointAllocator::new();
/// let mut tree = BTree::with_allocator(2, NaturalOrder, alloc.clone()).unwrap();
/// tree.add(1).unwrap();
///
/// alloc.fail_after(0);
/// for i in 2..=3 {
///     tree.add(i).unwrap(); // fits in the root, no allocation
/// }
/// assert!(tree.add(4).unwrap_err().is_out_of_memory());
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FailpointAllocator {
    plan: Arc<Mutex<Plan>>,
}

impl FailpointAllocator {
    /// Create a disarmed allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow `n` more allocations, then fail every one after that.
    pub fn fail_after(&self, n: u64) {
        self.plan.lock().budget = Some(n);
    }

    /// Stop failing.
    pub fn disarm(&self) {
        self.plan.lock().budget = None;
    }

    /// Whether a failure is currently scheduled.
    pub fn is_armed(&self) -> bool {
        self.plan.lock().budget.is_some()
    }

    /// Number of successful allocations.
    pub fn allocations(&self) -> u64 {
        self.plan.lock().allocations
    }

    /// Number of refused allocations.
    pub fn failures(&self) -> u64 {
        self.plan.lock().failures
    }
}

impl NodeAllocator for FailpointAllocator {
    fn allocate<E>(&self, slots: usize) -> Result<Vec<E>> {
        let mut plan = self.plan.lock();
        if let Some(remaining) = plan.budget {
            if remaining == 0 {
                plan.failures += 1;
                return Err(Error::OutOfMemory { slots });
            }
            plan.budget = Some(remaining - 1);
        }
        plan.allocations += 1;
        drop(plan);

        Global.allocate(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarmed_never_fails() {
        let alloc = FailpointAllocator::new();
        for _ in 0..10 {
            let buf: Vec<u32> = alloc.allocate(3).unwrap();
            assert!(buf.capacity() >= 3);
        }
        assert_eq!(alloc.allocations(), 10);
        assert_eq!(alloc.failures(), 0);
    }

    #[test]
    fn test_fail_after_budget() {
        let alloc = FailpointAllocator::new();
        alloc.fail_after(2);

        assert!(alloc.allocate::<u8>(1).is_ok());
        assert!(alloc.allocate::<u8>(1).is_ok());
        assert!(matches!(
            alloc.allocate::<u8>(7),
            Err(Error::OutOfMemory { slots: 7 })
        ));
        assert!(alloc.allocate::<u8>(1).is_err());

        assert_eq!(alloc.allocations(), 2);
        assert_eq!(alloc.failures(), 2);
    }

    #[test]
    fn test_clones_share_plan() {
        let alloc = FailpointAllocator::new();
        let handle = alloc.clone();

        handle.fail_after(0);
        assert!(alloc.is_armed());
        assert!(alloc.allocate::<u8>(1).is_err());

        handle.disarm();
        assert!(!alloc.is_armed());
        assert!(alloc.allocate::<u8>(1).is_ok());
        assert_eq!(handle.allocations(), 1);
        assert_eq!(handle.failures(), 1);
    }
}
