//! Order-t B-tree container.
//!
//! # Components
//! - [`BTree`] - The tree handle: owns the root and exposes every operation
//! - [`Comparator`] - Total order used for placement ([`NaturalOrder`], [`Reverse`], closures)
//! - [`Iter`] / [`IntoIter`] - Borrowing and consuming in-order iterators
//! - [`TreeStats`] - Structural statistics
//!
//! # Insertion
//! Splitting is preemptive: every full node met on the way down is split
//! before the descent continues, so the leaf that finally receives the
//! element always has room and no split ever has to travel back up.
//! ```text
//!   t = 2, insert 4 into a full root
//!
//!      [1 2 3]      split       [2]         add 4        [2]
//!                 ────────▶    /   \      ────────▶     /   \
//!                            [1]   [3]                [1]  [3 4]
//! ```

mod comparator;
mod iter;
mod node;
mod stats;

pub use comparator::{Comparator, NaturalOrder, Reverse};
pub use iter::{IntoIter, Iter};
pub use node::TreeShape;
pub use stats::{StatsSnapshot, TreeStats};

use std::cmp::Ordering;
use std::fmt;
use std::sync::atomic::Ordering as AtomicOrdering;

use tracing::debug;

use crate::alloc::{Global, NodeAllocator};
use crate::common::{Degree, Error, Result};
use node::{Ctx, Node};

/// A B-tree of elements of type `T` ordered by `C`, with nodes allocated
/// through `A`.
///
/// Elements compare through the comparator only; equal elements are all
/// kept, in no particular relative order.
///
/// # States
/// ```text
///            add (first)            add
///   Empty ───────────────▶ NonEmpty ◀──┐
///     ▲                       │  └─────┘
///     └────── free / drain ───┘
/// ```
/// A failed `add` never changes state.
///
/// # Usage
/// ```
/// use ordtree::BTree;
///
/// let mut tree = BTree::with_degree(2).unwrap();
/// for i in [5, 1, 4, 2, 3] {
///     tree.add(i).unwrap();
/// }
///
/// let mut seen = Vec::new();
/// tree.for_each(|x| seen.push(*x));
/// assert_eq!(seen, vec![1, 2, 3, 4, 5]);
///
/// assert!(tree.free() > 0);
/// assert!(tree.is_empty());
/// ```
pub struct BTree<T, C = NaturalOrder, A = Global> {
    /// Root node, or None while the tree is empty.
    root: Option<Box<Node<T>>>,

    /// Minimum branching factor (immutable after construction).
    degree: Degree,

    /// Order used for every placement decision.
    comparator: C,

    /// Source of node slots.
    allocator: A,

    /// Number of stored elements.
    len: usize,

    /// Structural statistics.
    stats: TreeStats,
}

impl<T: Ord> BTree<T> {
    /// Create an empty tree with [`DEFAULT_DEGREE`](crate::common::config::DEFAULT_DEGREE)
    /// and the natural order of `T`.
    pub fn new() -> Self {
        Self::from_parts(Degree::DEFAULT, NaturalOrder, Global)
    }

    /// Create an empty tree with degree `t` and the natural order of `T`.
    ///
    /// Fails with [`Error::InvalidDegree`] when `t` is outside
    /// `2..=`[`MAX_DEGREE`](crate::common::config::MAX_DEGREE).
    pub fn with_degree(t: usize) -> Result<Self> {
        Ok(Self::from_parts(Degree::new(t)?, NaturalOrder, Global))
    }
}

impl<T: Ord> Default for BTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Comparator<T>> BTree<T, C> {
    /// Create an empty tree with degree `t` ordered by `comparator`.
    pub fn with_comparator(t: usize, comparator: C) -> Result<Self> {
        Ok(Self::from_parts(Degree::new(t)?, comparator, Global))
    }
}

impl<T, C: Comparator<T>, A: NodeAllocator> BTree<T, C, A> {
    /// Create an empty tree with degree `t`, ordered by `comparator`,
    /// taking node slots from `allocator`.
    pub fn with_allocator(t: usize, comparator: C, allocator: A) -> Result<Self> {
        Ok(Self::from_parts(Degree::new(t)?, comparator, allocator))
    }

    /// Insert `elem`.
    ///
    /// Fails only with [`Error::OutOfMemory`], in which case `elem` is
    /// dropped, `len()` is unchanged and every element inserted before is
    /// still in the tree. If the root had to grow and the growth failed,
    /// the root is exactly as it was before the call.
    pub fn add(&mut self, elem: T) -> Result<()> {
        let ctx = Ctx {
            degree: self.degree,
            comparator: &self.comparator,
            allocator: &self.allocator,
            stats: &self.stats,
        };

        match self.root.take() {
            None => {
                let mut leaf = Node::create(&ctx, true)?;
                leaf.keys.push(elem);
                self.root = Some(leaf);
            }
            Some(mut root) if root.is_full(ctx.degree) => {
                let mut new_root = match Node::create(&ctx, false) {
                    Ok(node) => node,
                    Err(err) => {
                        self.root = Some(root);
                        return Err(err);
                    }
                };
                let (median, sibling) = match root.split(&ctx) {
                    Ok(halves) => halves,
                    Err(err) => {
                        self.root = Some(root);
                        drop(new_root);
                        ctx.stats.record_release(1);
                        return Err(err);
                    }
                };

                let target = match ctx.comparator.compare(&median, &elem) {
                    Ordering::Less => 1,
                    _ => 0,
                };
                new_root.keys.push(median);
                new_root.children.push(root);
                new_root.children.push(sibling);
                ctx.stats.root_splits.fetch_add(1, AtomicOrdering::Relaxed);
                debug!(height = new_root.height(), "root split");

                // The new root is valid on its own; install it even if the
                // descent below fails on a deeper split.
                let result = new_root.children[target].add(elem, &ctx);
                self.root = Some(new_root);
                result?;
            }
            Some(mut root) => {
                let result = root.add(elem, &ctx);
                self.root = Some(root);
                result?;
            }
        }

        self.len += 1;
        Ok(())
    }

    /// Insert every element of `iter`, stopping at the first failure.
    ///
    /// Elements inserted before the failure stay in the tree; the rest of
    /// `iter` is not consumed.
    pub fn try_extend<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<()> {
        for elem in iter {
            self.add(elem)?;
        }
        Ok(())
    }

    /// Check every structural invariant.
    ///
    /// - non-root nodes hold `t - 1 ..= 2t - 1` keys, the root `1 ..= 2t - 1`
    /// - keys are sorted and respect the separators above them
    /// - internal nodes have one more child than keys
    /// - all leaves sit at the same depth
    /// - the element count matches `len()`
    pub fn validate(&self) -> Result<TreeShape> {
        let Some(root) = &self.root else {
            if self.len != 0 {
                return Err(Error::InvariantViolation(format!(
                    "empty tree reports {} elements",
                    self.len
                )));
            }
            return Ok(TreeShape::default());
        };

        let mut leaf_depth = None;
        let mut shape = TreeShape::default();
        root.check(
            self.degree,
            &self.comparator,
            true,
            0,
            &mut leaf_depth,
            &mut shape,
        )?;
        shape.height = leaf_depth.map_or(0, |depth| depth + 1);

        if shape.elements != self.len {
            return Err(Error::InvariantViolation(format!(
                "found {} elements, tree reports {}",
                shape.elements, self.len
            )));
        }
        Ok(shape)
    }
}

impl<T, C, A> BTree<T, C, A> {
    fn from_parts(degree: Degree, comparator: C, allocator: A) -> Self {
        Self {
            root: None,
            degree,
            comparator,
            allocator,
            len: 0,
            stats: TreeStats::new(),
        }
    }

    /// Visit every element in ascending order.
    ///
    /// For each key `i` of a node: the subtree `children[i]` first, then
    /// `keys[i]`; the trailing child last. Every call is a fresh walk.
    pub fn for_each<F: FnMut(&T)>(&self, mut visitor: F) {
        if let Some(root) = &self.root {
            root.for_each(&mut visitor);
        }
    }

    /// Lazy in-order iterator over references.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// Move every element out in ascending order, leaving the tree empty.
    ///
    /// The tree is immediately reusable; nodes are released as the
    /// returned iterator advances past them.
    pub fn drain(&mut self) -> IntoIter<T> {
        let len = std::mem::take(&mut self.len);
        let root = self.root.take();
        if root.is_some() {
            let live = self.stats.live_nodes();
            self.stats.record_release(live as usize);
            debug!(elements = len, nodes = live, "tree drained");
        }
        IntoIter::new(root, len)
    }

    /// Release every node, children before their parent, and return the
    /// number of nodes released.
    ///
    /// Elements still in the tree are dropped with their nodes. Freeing
    /// an empty tree is a no-op returning 0; the tree stays usable.
    pub fn free(&mut self) -> usize {
        let Some(root) = self.root.take() else {
            return 0;
        };

        let elements = std::mem::take(&mut self.len);
        let released = root.teardown();
        self.stats.record_release(released);
        debug!(elements, nodes = released, "tree freed");
        released
    }

    /// Number of stored elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Levels in the tree, 0 when empty.
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.height())
    }

    #[inline]
    pub fn degree(&self) -> Degree {
        self.degree
    }

    #[inline]
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    #[inline]
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// Structural statistics.
    #[inline]
    pub fn stats(&self) -> &TreeStats {
        &self.stats
    }
}

impl<T: fmt::Debug, C, A> fmt::Debug for BTree<T, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T, C, A> IntoIterator for &'a BTree<T, C, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, C, A> IntoIterator for BTree<T, C, A> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        self.drain()
    }
}
