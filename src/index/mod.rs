//! Ordered in-memory index structures.
//!
//! - [`btree`] - Order-t B-tree with preemptive splitting

pub mod btree;
