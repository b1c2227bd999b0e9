//! ordtree - A generic in-memory order-t B-tree with preemptive node splitting.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            ordtree                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                  Driver (driver/)                        │   │
//! │  │        read lines → add → in-order drain                 │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Index Layer (index/btree/)                  │   │
//! │  │   BTree handle → Node::add → Node::split_child           │   │
//! │  │   Iter / IntoIter / for_each        TreeStats            │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │         Node Allocation (alloc/)  [Swappable]            │   │
//! │  │          Global  ←─OR─→  FailpointAllocator              │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (Degree, Error, config)
//! - [`index`] - The B-tree container
//! - [`alloc`] - Node slot allocation and fault injection
//! - [`driver`] - Line sort driver used by `ordtree-sort`
//!
//! # Quick Start
//! ```
//! use ordtree::{BTree, Reverse, NaturalOrder};
//!
//! // Degree 3: every node holds 2 to 5 keys (the root may hold fewer)
//! let mut tree = BTree::with_comparator(3, Reverse(NaturalOrder)).unwrap();
//! tree.try_extend(["b", "d", "a", "c"]).unwrap();
//!
//! let items: Vec<_> = tree.iter().copied().collect();
//! assert_eq!(items, vec!["d", "c", "b", "a"]);
//! tree.free();
//! ```

pub mod alloc;
pub mod common;
pub mod driver;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use alloc::{FailpointAllocator, Global, NodeAllocator};
pub use common::config::DEFAULT_DEGREE;
pub use common::{Degree, Error, Result};
pub use index::btree::{
    BTree, Comparator, IntoIter, Iter, NaturalOrder, Reverse, StatsSnapshot, TreeShape,
    TreeStats,
};
