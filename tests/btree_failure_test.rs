//! Allocation failure tests.
//!
//! A `FailpointAllocator` clone stays with the test while the tree owns
//! another, so failures can be armed between insertions. After every
//! refused insertion the tree must still validate and hold exactly the
//! elements inserted before.

use ordtree::{BTree, FailpointAllocator, NaturalOrder};

fn scrambled(n: u64) -> Vec<u64> {
    (0..n).map(|i| (i * 7919) % n).collect()
}

fn failing_tree(t: usize) -> (BTree<u64, NaturalOrder, FailpointAllocator>, FailpointAllocator) {
    let alloc = FailpointAllocator::new();
    let tree = BTree::with_allocator(t, NaturalOrder, alloc.clone()).unwrap();
    (tree, alloc)
}

fn assert_contents(tree: &BTree<u64, NaturalOrder, FailpointAllocator>, expected: &[u64]) {
    let mut expected = expected.to_vec();
    expected.sort_unstable();

    let shape = tree.validate().unwrap();
    assert_eq!(shape.elements, expected.len());
    assert_eq!(tree.len(), expected.len());
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), expected);
    assert_eq!(tree.stats().live_nodes() as usize, shape.nodes);
}

#[test]
fn test_first_add_failure_leaves_tree_empty() {
    let (mut tree, alloc) = failing_tree(2);
    alloc.fail_after(0);

    let err = tree.add(1).unwrap_err();
    assert!(err.is_out_of_memory());
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    tree.validate().unwrap();

    alloc.disarm();
    tree.add(1).unwrap();
    assert_contents(&tree, &[1]);
}

/// Arm a failure after every possible number of successful allocations.
#[test]
fn test_failure_at_every_allocation_point() {
    for t in [2, 3] {
        let values = scrambled(200);
        let (before, after) = values.split_at(50);

        for budget in 0..25 {
            let (mut tree, alloc) = failing_tree(t);
            tree.try_extend(before.iter().copied()).unwrap();

            alloc.fail_after(budget);
            let mut inserted = before.to_vec();
            let mut failed = false;
            for &v in after {
                match tree.add(v) {
                    Ok(()) => inserted.push(v),
                    Err(err) => {
                        assert!(err.is_out_of_memory());
                        failed = true;
                        break;
                    }
                }
            }

            assert!(failed, "t={t} budget={budget}: expected a failure");
            assert_contents(&tree, &inserted);

            // Still usable once memory is back.
            alloc.disarm();
            for &v in after {
                if !inserted.contains(&v) {
                    tree.add(v).unwrap();
                    inserted.push(v);
                }
            }
            assert_contents(&tree, &inserted);
        }
    }
}

/// With every allocation refused, only inserts that fit in place succeed.
#[test]
fn test_exhausted_allocator_keeps_accepting_in_place_inserts() {
    let (mut tree, alloc) = failing_tree(3);
    tree.try_extend(scrambled(100)).unwrap();
    alloc.fail_after(0);

    let mut inserted: Vec<u64> = (0..100).collect();
    let mut refused = 0;
    for v in 100..400 {
        match tree.add(v) {
            Ok(()) => inserted.push(v),
            Err(err) => {
                assert!(err.is_out_of_memory());
                refused += 1;
            }
        }
        assert_contents(&tree, &inserted);
    }

    assert!(refused > 0);
    assert_eq!(alloc.failures(), refused);
    assert_eq!(tree.stats().snapshot().allocation_failures, refused);
}

#[test]
fn test_root_growth_failure_keeps_height() {
    let (mut tree, alloc) = failing_tree(2);
    tree.try_extend(0..3).unwrap();
    assert_eq!(tree.height(), 1);

    // Budget 0: the new root itself fails. Budget 2: its sibling fails.
    for budget in [0, 1, 2] {
        alloc.fail_after(budget);
        assert!(tree.add(3).is_err());
        assert_eq!(tree.height(), 1);
        assert_contents(&tree, &[0, 1, 2]);
    }

    alloc.disarm();
    tree.add(3).unwrap();
    assert_eq!(tree.height(), 2);
    assert_contents(&tree, &[0, 1, 2, 3]);
}

#[test]
fn test_failed_element_is_dropped() {
    use std::rc::Rc;

    let alloc = FailpointAllocator::new();
    let mut tree = BTree::with_allocator(2, |a: &Rc<u32>, b: &Rc<u32>| a.cmp(b), alloc.clone())
        .unwrap();
    let value = Rc::new(7);

    alloc.fail_after(0);
    assert!(tree.add(Rc::clone(&value)).is_err());
    assert_eq!(Rc::strong_count(&value), 1);

    alloc.disarm();
    tree.add(Rc::clone(&value)).unwrap();
    assert_eq!(Rc::strong_count(&value), 2);
    tree.free();
    assert_eq!(Rc::strong_count(&value), 1);
}
