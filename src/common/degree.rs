//! B-tree degree type.

use std::fmt;

use crate::common::config::{DEFAULT_DEGREE, MAX_DEGREE, MIN_DEGREE};
use crate::common::{Error, Result};

/// Minimum branching factor `t` of a B-tree.
///
/// A node holds between `t - 1` and `2t - 1` keys (the root may hold
/// fewer) and an internal node has one more child than keys.
///
/// The only way to build one is [`Degree::new`], so every `Degree` in the
/// crate lies in `2..=MAX_DEGREE` and `2t` never overflows.
///
/// # Example
/// ```
/// use ordtree::Degree;
///
/// let degree = Degree::new(3).unwrap();
/// assert_eq!(degree.max_keys(), 5);
/// assert_eq!(degree.min_keys(), 2);
/// assert_eq!(degree.max_children(), 6);
/// assert!(Degree::new(1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Degree(usize);

impl Degree {
    /// [`DEFAULT_DEGREE`] as a ready-made `Degree`.
    pub const DEFAULT: Degree = Degree(DEFAULT_DEGREE);

    /// Validate and wrap a degree.
    pub fn new(t: usize) -> Result<Self> {
        if !(MIN_DEGREE..=MAX_DEGREE).contains(&t) {
            return Err(Error::InvalidDegree(t));
        }
        Ok(Degree(t))
    }

    /// The raw `t`.
    #[inline]
    pub fn get(&self) -> usize {
        self.0
    }

    /// Keys in a full node (`2t - 1`).
    #[inline]
    pub fn max_keys(&self) -> usize {
        2 * self.0 - 1
    }

    /// Keys every non-root node keeps (`t - 1`).
    #[inline]
    pub fn min_keys(&self) -> usize {
        self.0 - 1
    }

    /// Child slots of an internal node (`2t`).
    #[inline]
    pub fn max_children(&self) -> usize {
        2 * self.0
    }

    /// Index of the key promoted when a full node splits (`t - 1`).
    #[inline]
    pub fn median(&self) -> usize {
        self.0 - 1
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Degree({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_rejects_small_values() {
        assert!(matches!(Degree::new(0), Err(Error::InvalidDegree(0))));
        assert!(matches!(Degree::new(1), Err(Error::InvalidDegree(1))));
        assert!(Degree::new(2).is_ok());
    }

    #[test]
    fn test_degree_rejects_overflowing_values() {
        let too_big = MAX_DEGREE + 1;
        assert!(matches!(Degree::new(too_big), Err(Error::InvalidDegree(t)) if t == too_big));
        assert!(matches!(
            Degree::new(usize::MAX),
            Err(Error::InvalidDegree(usize::MAX))
        ));

        let largest = Degree::new(MAX_DEGREE).unwrap();
        assert_eq!(largest.max_children(), usize::MAX - 1);
        assert_eq!(largest.max_keys(), usize::MAX - 2);
    }

    #[test]
    fn test_degree_bounds() {
        let d = Degree::new(2).unwrap();
        assert_eq!(d.max_keys(), 3);
        assert_eq!(d.min_keys(), 1);
        assert_eq!(d.max_children(), 4);
        assert_eq!(d.median(), 1);

        let d = Degree::new(8).unwrap();
        assert_eq!(d.max_keys(), 15);
        assert_eq!(d.min_keys(), 7);
        assert_eq!(d.median(), 7);
    }

    #[test]
    fn test_default_degree() {
        assert_eq!(Degree::DEFAULT.get(), DEFAULT_DEGREE);
        assert_eq!(Degree::new(DEFAULT_DEGREE).unwrap(), Degree::DEFAULT);
    }

    #[test]
    fn test_degree_display() {
        assert_eq!(format!("{}", Degree::new(4).unwrap()), "Degree(4)");
    }
}
