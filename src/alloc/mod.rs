//! Node slot allocation.
//!
//! Every node reserves its key slots (and child slots when internal) up
//! front, so node creation is the only place the tree can run out of
//! memory. The [`NodeAllocator`] trait is the seam where that happens:
//! - [`Global`] - fallible reservation on the global heap (default)
//! - [`FailpointAllocator`] - counts allocations and fails on demand

mod failpoint;

pub use failpoint::FailpointAllocator;

use crate::common::{Error, Result};

/// Source of slot buffers for B-tree nodes.
///
/// `allocate` must return an empty `Vec` whose capacity is at least
/// `slots`, or [`Error::OutOfMemory`]. The tree never pushes past the
/// requested capacity, so the buffer is never reallocated afterwards.
pub trait NodeAllocator {
    /// Reserve room for `slots` elements of type `E`.
    fn allocate<E>(&self, slots: usize) -> Result<Vec<E>>;
}

/// The global heap, reserved with [`Vec::try_reserve_exact`].
///
/// Unlike `Vec::with_capacity`, this reports exhaustion as an error
/// instead of aborting the process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Global;

impl NodeAllocator for Global {
    fn allocate<E>(&self, slots: usize) -> Result<Vec<E>> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(slots)
            .map_err(|_| Error::OutOfMemory { slots })?;
        Ok(buf)
    }
}

impl<A: NodeAllocator> NodeAllocator for &A {
    fn allocate<E>(&self, slots: usize) -> Result<Vec<E>> {
        (**self).allocate(slots)
    }
}
