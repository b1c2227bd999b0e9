//! B-tree nodes: creation, splitting, insertion and teardown.
//!
//! Nodes never grow past the capacity reserved when they are created:
//! insertion splits every full node on the way down, so a key or child is
//! only ever pushed into a node that still has room.

use std::cmp::Ordering;
use std::sync::atomic::Ordering as AtomicOrdering;

use tracing::{trace, warn};

use crate::alloc::NodeAllocator;
use crate::common::{Degree, Error, Result};
use crate::index::btree::{Comparator, TreeStats};

/// Everything a node operation needs from the owning tree.
pub(crate) struct Ctx<'a, C, A> {
    pub degree: Degree,
    pub comparator: &'a C,
    pub allocator: &'a A,
    pub stats: &'a TreeStats,
}

impl<C, A> Ctx<'_, C, A> {
    /// Number of keys that compare less than or equal to `elem`.
    ///
    /// For a leaf this is the insertion slot; for an internal node it is
    /// the index of the child whose range holds `elem`.
    fn slot<T>(&self, keys: &[T], elem: &T) -> usize
    where
        C: Comparator<T>,
    {
        keys.partition_point(|key| self.comparator.compare(key, elem) != Ordering::Greater)
    }
}

/// A B-tree node.
///
/// `children` is empty for leaves and holds `keys.len() + 1` entries for
/// internal nodes.
pub(crate) struct Node<T> {
    pub keys: Vec<T>,
    pub children: Vec<Box<Node<T>>>,
    pub is_leaf: bool,
}

impl<T> Node<T> {
    /// Allocate an empty node.
    ///
    /// Reserves `2t - 1` key slots, plus `2t` child slots when internal.
    pub fn create<C, A: NodeAllocator>(ctx: &Ctx<'_, C, A>, is_leaf: bool) -> Result<Box<Self>> {
        match Self::reserve_slots(ctx, is_leaf) {
            Ok((keys, children)) => {
                ctx.stats
                    .nodes_allocated
                    .fetch_add(1, AtomicOrdering::Relaxed);
                trace!(is_leaf, degree = ctx.degree.get(), "node created");
                Ok(Box::new(Node {
                    keys,
                    children,
                    is_leaf,
                }))
            }
            Err(err) => {
                ctx.stats
                    .allocation_failures
                    .fetch_add(1, AtomicOrdering::Relaxed);
                warn!(is_leaf, error = %err, "node allocation failed");
                Err(err)
            }
        }
    }

    fn reserve_slots<C, A: NodeAllocator>(
        ctx: &Ctx<'_, C, A>,
        is_leaf: bool,
    ) -> Result<(Vec<T>, Vec<Box<Node<T>>>)> {
        let keys = ctx.allocator.allocate(ctx.degree.max_keys())?;
        let children = if is_leaf {
            Vec::new()
        } else {
            ctx.allocator.allocate(ctx.degree.max_children())?
        };
        Ok((keys, children))
    }

    #[inline]
    pub fn is_full(&self, degree: Degree) -> bool {
        self.keys.len() == degree.max_keys()
    }

    /// Divide this full node in two.
    ///
    /// Keeps the lower `t - 1` keys (and lower `t` children) and returns the
    /// median together with a new sibling holding the upper `t - 1` keys
    /// (and upper `t` children). The sibling is allocated before anything
    /// moves, so on error `self` is untouched.
    pub fn split<C, A: NodeAllocator>(&mut self, ctx: &Ctx<'_, C, A>) -> Result<(T, Box<Self>)> {
        debug_assert!(self.is_full(ctx.degree));

        let mut sibling = Node::create(ctx, self.is_leaf)?;
        let t = ctx.degree.get();

        sibling.keys.extend(self.keys.drain(t..));
        if !self.is_leaf {
            sibling.children.extend(self.children.drain(t..));
        }
        let median = self.keys.remove(ctx.degree.median());

        ctx.stats.splits.fetch_add(1, AtomicOrdering::Relaxed);
        Ok((median, sibling))
    }

    /// Split the full child at `index`, promoting its median into `self`.
    ///
    /// `self` must not be full. Later keys and children shift right by one;
    /// the new sibling lands at `children[index + 1]`.
    pub fn split_child<C, A: NodeAllocator>(&mut self, index: usize, ctx: &Ctx<'_, C, A>) -> Result<()> {
        debug_assert!(!self.is_full(ctx.degree));

        let (median, sibling) = self.children[index].split(ctx)?;
        self.keys.insert(index, median);
        self.children.insert(index + 1, sibling);

        trace!(index, keys = self.keys.len(), "child split");
        Ok(())
    }

    /// Place `elem` in the subtree rooted here. `self` must not be full.
    ///
    /// Equal keys go after the ones already present in a leaf. Any full
    /// child on the path is split before descending into it.
    pub fn add<C, A>(&mut self, elem: T, ctx: &Ctx<'_, C, A>) -> Result<()>
    where
        C: Comparator<T>,
        A: NodeAllocator,
    {
        let mut index = ctx.slot(&self.keys, &elem);
        if self.is_leaf {
            self.keys.insert(index, elem);
            return Ok(());
        }

        if self.children[index].is_full(ctx.degree) {
            self.split_child(index, ctx)?;
            if ctx.comparator.compare(&self.keys[index], &elem) == Ordering::Less {
                index += 1;
            }
        }

        self.children[index].add(elem, ctx)
    }

    /// In-order walk: `children[i]`, then `keys[i]`, then the trailing child.
    pub fn for_each<F: FnMut(&T)>(&self, visitor: &mut F) {
        for (i, key) in self.keys.iter().enumerate() {
            if !self.is_leaf {
                self.children[i].for_each(visitor);
            }
            visitor(key);
        }
        if !self.is_leaf {
            self.children[self.keys.len()].for_each(visitor);
        }
    }

    /// Release this subtree, children before the node that owns them.
    ///
    /// Returns the number of nodes released.
    pub fn teardown(self: Box<Self>) -> usize {
        let Node { keys, children, .. } = *self;

        let mut released = 0;
        for child in children {
            released += child.teardown();
        }
        drop(keys);

        released + 1
    }

    /// Levels from here down to the leaves, counting this node.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut node = self;
        while let Some(first) = node.children.first() {
            node = &**first;
            height += 1;
        }
        height
    }
}

/// Shape reported by a successful [`BTree::validate`](crate::BTree::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeShape {
    /// Levels, 0 for an empty tree.
    pub height: usize,

    /// Number of nodes.
    pub nodes: usize,

    /// Number of stored elements.
    pub elements: usize,
}

/// Bounds a subtree's keys must respect, inherited from ancestors.
struct Bounds<'a, T> {
    lower: Option<&'a T>,
    upper: Option<&'a T>,
}

impl<T> Node<T> {
    /// Check every structural invariant below this node.
    pub fn check<C: Comparator<T>>(
        &self,
        degree: Degree,
        comparator: &C,
        is_root: bool,
        depth: usize,
        leaf_depth: &mut Option<usize>,
        shape: &mut TreeShape,
    ) -> Result<()> {
        self.check_within(
            degree,
            comparator,
            is_root,
            depth,
            Bounds {
                lower: None,
                upper: None,
            },
            leaf_depth,
            shape,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn check_within<C: Comparator<T>>(
        &self,
        degree: Degree,
        comparator: &C,
        is_root: bool,
        depth: usize,
        bounds: Bounds<'_, T>,
        leaf_depth: &mut Option<usize>,
        shape: &mut TreeShape,
    ) -> Result<()> {
        let violation = |msg: String| Err(Error::InvariantViolation(msg));
        let len = self.keys.len();

        if len > degree.max_keys() {
            return violation(format!("node at depth {depth} holds {len} keys"));
        }
        let min = if is_root { 1 } else { degree.min_keys() };
        if len < min {
            return violation(format!(
                "node at depth {depth} holds {len} keys, fewer than {min}"
            ));
        }

        for pair in self.keys.windows(2) {
            if comparator.compare(&pair[0], &pair[1]) == Ordering::Greater {
                return violation(format!("keys out of order at depth {depth}"));
            }
        }
        if let (Some(lower), Some(first)) = (bounds.lower, self.keys.first()) {
            if comparator.compare(first, lower) == Ordering::Less {
                return violation(format!("key below its separator at depth {depth}"));
            }
        }
        if let (Some(upper), Some(last)) = (bounds.upper, self.keys.last()) {
            if comparator.compare(last, upper) == Ordering::Greater {
                return violation(format!("key above its separator at depth {depth}"));
            }
        }

        shape.nodes += 1;
        shape.elements += len;

        if self.is_leaf {
            if !self.children.is_empty() {
                return violation(format!("leaf at depth {depth} has children"));
            }
            match *leaf_depth {
                None => *leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return violation(format!(
                        "leaf at depth {depth}, expected every leaf at depth {expected}"
                    ));
                }
                Some(_) => {}
            }
            return Ok(());
        }

        if self.children.len() != len + 1 {
            return violation(format!(
                "internal node at depth {depth} has {} children for {len} keys",
                self.children.len()
            ));
        }
        for (i, child) in self.children.iter().enumerate() {
            let child_bounds = Bounds {
                lower: if i == 0 { bounds.lower } else { self.keys.get(i - 1) },
                upper: if i == len { bounds.upper } else { self.keys.get(i) },
            };
            child.check_within(
                degree,
                comparator,
                false,
                depth + 1,
                child_bounds,
                leaf_depth,
                shape,
            )?;
        }
        Ok(())
    }
}
