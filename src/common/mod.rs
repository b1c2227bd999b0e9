//! Common types and utilities shared across ordtree.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants
//! - Error types
//! - The validated [`Degree`]

pub mod config;
pub mod error;
mod degree;

pub use degree::Degree;
pub use error::{Error, Result};
