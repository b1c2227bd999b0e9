//! Configuration constants for ordtree.

/// Degree used by [`BTree::new`](crate::BTree::new) and the sort driver.
///
/// With t = 8 a node holds between 7 and 15 keys and up to 16 children:
/// - Height for 1,000,000 elements is at most 7
/// - A leaf of `String`s fits its key slots in 360 bytes
pub const DEFAULT_DEGREE: usize = 8;

/// Smallest degree that still forms a B-tree.
///
/// t = 2 gives 2-3-4 trees (1 to 3 keys per node). Anything lower cannot
/// split a full node into two non-empty halves.
pub const MIN_DEGREE: usize = 2;

/// Largest degree whose `2t` child slots still fit in a `usize`.
pub const MAX_DEGREE: usize = usize::MAX / 2;

/// Exit status used by the sort driver when insertion fails.
///
/// Matches `EX_SOFTWARE` from BSD `sysexits.h`.
pub const EXIT_SOFTWARE: u8 = 70;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_degree_is_valid() {
        assert!(DEFAULT_DEGREE >= MIN_DEGREE);
        assert!(DEFAULT_DEGREE <= MAX_DEGREE);
    }

    #[test]
    fn test_exit_software_matches_sysexits() {
        assert_eq!(EXIT_SOFTWARE, 70);
    }
}
