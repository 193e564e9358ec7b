use std::collections::BTreeSet;

use avl_index::{NodeRef, OrderedIndex};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of insertions to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Short lowercase keys, so that random sequences collide often.
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,3}"
}

/// Collects the keys of the subtree below `node` by an in-order walk.
fn inorder(node: Option<NodeRef<'_, String>>, keys: &mut Vec<String>) {
    if let Some(node) = node {
        inorder(node.left(), keys);
        keys.push(node.key().clone());
        inorder(node.right(), keys);
    }
}

/// Checks every node's balance and cached metadata through the public `NodeRef` API and returns
/// the subtree's `(height, size)`, with an absent subtree being `(-1, 0)`.
fn audit(node: Option<NodeRef<'_, String>>) -> (isize, usize) {
    let Some(node) = node else {
        return (-1, 0);
    };
    let (left_height, left_size) = audit(node.left());
    let (right_height, right_size) = audit(node.right());

    let height = 1 + left_height.max(right_height);
    assert!((left_height - right_height).abs() <= 1, "node {:?} is unbalanced", node.key());
    assert_eq!(node.balance_factor(), left_height - right_height);
    assert_eq!(node.height() as isize, height, "height of {:?}", node.key());
    assert_eq!(node.subtree_size(), 1 + left_size + right_size, "size of {:?}", node.key());
    for child in [node.left(), node.right()].into_iter().flatten() {
        assert_eq!(child.parent(), Some(node), "parent of {:?}", child.key());
    }

    (height, 1 + left_size + right_size)
}

fn index_of(keys: &[&str]) -> OrderedIndex {
    keys.iter().map(|&key| key.to_owned()).collect()
}

// ─── Documented examples ─────────────────────────────────────────────────────

#[test]
fn balanced_insertion_order() {
    let index = index_of(&["d", "b", "f", "a", "c", "e", "g"]);

    let root = index.root().expect("index is not empty");
    assert_eq!(root.key(), "d");
    assert_eq!(index.height(), Some(2));
    assert_eq!(index.range_count("b", "f"), 5);
    assert_eq!(index.check_invariants(), Ok(()));
}

#[test]
fn duplicate_insert_is_ignored() {
    let mut index = OrderedIndex::new();
    assert!(index.insert("m".to_owned()));
    assert!(index.insert("a".to_owned()));
    assert!(!index.insert("a".to_owned()));

    let node = index.find("a").expect("`a` was inserted");
    assert_eq!(node.key(), "a");
    assert_eq!(index.root().map(|root| root.subtree_size()), Some(2));
    assert_eq!(index.len(), 2);
}

#[test]
fn empty_index() {
    let index: OrderedIndex = OrderedIndex::new();

    assert!(index.find("x").is_none());
    assert_eq!(index.range_count("a", "z"), 0);
    assert_eq!(index.count_less_or_equal("m"), 0);
    assert_eq!(index.count_greater_or_equal("m"), 0);
    assert_eq!(index.check_invariants(), Ok(()));
}

#[test]
fn ascending_insertion_stays_shallow() {
    let index = index_of(&["1", "2", "3", "4", "5", "6", "7"]);

    assert!(index.height().expect("index is not empty") <= 2);
    assert_eq!(index.root().map(|root| root.key().clone()), Some("4".to_owned()));
    assert_eq!(index.check_invariants(), Ok(()));
}

// ─── Edge cases ──────────────────────────────────────────────────────────────

#[test]
fn inverted_interval_is_empty() {
    let index = index_of(&["a", "b", "c", "d"]);

    assert_eq!(index.range_count("d", "a"), 0);
    assert_eq!(index.range_count("c", "b"), 0);
    assert_eq!(index.range_count("zz", "a"), 0);
}

#[test]
fn bounds_need_not_be_present() {
    let index = index_of(&["apple", "banana", "cherry", "date"]);

    assert_eq!(index.range_count("a", "b"), 1);
    assert_eq!(index.range_count("apples", "cherry"), 2);
    assert_eq!(index.range_count("", "~"), 4);
    assert_eq!(index.range_count("banana", "banana"), 1);
    assert_eq!(index.range_count("bananas", "cherries"), 0);
}

#[test]
fn keys_compare_bytewise() {
    let index = index_of(&["B", "a", "b", "A", "10", "9"]);

    // "10" < "9" < "A" < "B" < "a" < "b"
    assert_eq!(index.range_count("0", "9"), 2);
    assert_eq!(index.range_count("A", "Z"), 2);
    assert_eq!(index.count_less_or_equal("A"), 3);
}

#[test]
fn descending_insertion_balances() {
    let index: OrderedIndex<u32> = (0..1_000).rev().collect();

    assert_eq!(index.len(), 1_000);
    assert!(index.height().expect("index is not empty") <= 14);
    assert_eq!(index.range_count(&100, &199), 100);
    assert_eq!(index.check_invariants(), Ok(()));
}

#[test]
fn root_parent_is_cleared_after_root_rotation() {
    let mut index = OrderedIndex::new();
    for key in ["a", "b", "c"] {
        index.insert(key.to_owned());
        let root = index.root().expect("index is not empty");
        assert_eq!(root.parent(), None);
    }
    assert_eq!(index.root().map(|root| root.key().clone()), Some("b".to_owned()));
}

#[test]
fn preorder_dump_of_double_rotation() {
    let index = index_of(&["c", "a", "b"]);
    assert_eq!(index.preorder_dump(), "b(h = 1, s = 3)a(h = 0, s = 1)c(h = 0, s = 1)");

    let index = index_of(&["a", "c", "b"]);
    assert_eq!(index.preorder_dump(), "b(h = 1, s = 3)a(h = 0, s = 1)c(h = 0, s = 1)");
}

#[test]
fn extend_skips_duplicates() {
    let mut index = index_of(&["k"]);
    index.extend(["k", "j", "l", "j"].map(String::from));

    assert_eq!(index.len(), 3);
    assert_eq!(index.preorder_dump(), "k(h = 1, s = 3)j(h = 0, s = 1)l(h = 0, s = 1)");
}

// ─── Randomized comparisons against BTreeSet ─────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Inserts random keys into both `OrderedIndex` and `BTreeSet` and compares membership,
    /// ordering, and the structure of the tree.
    #[test]
    fn insert_and_find_match_btreeset(keys in proptest::collection::vec(key_strategy(), 0..TEST_SIZE)) {
        let mut index = OrderedIndex::new();
        let mut model = BTreeSet::new();

        for key in &keys {
            prop_assert_eq!(index.insert(key.clone()), model.insert(key.clone()), "insert({})", key);
        }
        prop_assert_eq!(index.len(), model.len());
        prop_assert_eq!(index.check_invariants(), Ok(()));

        for key in &keys {
            let node = index.find(key.as_str());
            prop_assert!(node.is_some(), "find({}) returned None", key);
            prop_assert_eq!(node.map(|node| node.key()), Some(key));
        }
        prop_assert!(index.find("0").is_none());

        let mut walked = Vec::new();
        inorder(index.root(), &mut walked);
        let expected: Vec<String> = model.iter().cloned().collect();
        prop_assert_eq!(walked, expected);

        let (height, size) = audit(index.root());
        prop_assert_eq!(size, model.len());
        prop_assert_eq!(index.height().map(|height| height as isize).unwrap_or(-1), height);
    }

    /// `range_count` agrees with counting a `BTreeSet` range, for ordered and inverted bounds.
    #[test]
    fn range_count_matches_btreeset(
        keys in proptest::collection::vec(key_strategy(), 0..TEST_SIZE),
        bounds in proptest::collection::vec((key_strategy(), key_strategy()), 1..50),
    ) {
        let index: OrderedIndex = keys.iter().cloned().collect();
        let model: BTreeSet<String> = keys.into_iter().collect();

        for (low, high) in &bounds {
            let expected = if low <= high {
                model.range::<String, _>(low..=high).count()
            } else {
                0
            };
            prop_assert_eq!(index.range_count(low.as_str(), high.as_str()), expected, "range_count({}, {})", low, high);

            let less_or_equal = model.range::<String, _>(..=low).count();
            let greater_or_equal = model.range::<String, _>(low..).count();
            prop_assert_eq!(index.count_less_or_equal(low.as_str()), less_or_equal);
            prop_assert_eq!(index.count_greater_or_equal(low.as_str()), greater_or_equal);
        }
    }

    /// Inserting a batch of keys twice leaves the tree exactly as it was after the first time.
    #[test]
    fn repeated_inserts_are_idempotent(keys in proptest::collection::vec(key_strategy(), 1..500)) {
        let mut index: OrderedIndex = keys.iter().cloned().collect();
        let before = index.preorder_dump();

        for key in &keys {
            prop_assert!(!index.insert(key.clone()));
        }

        prop_assert_eq!(index.preorder_dump(), before);
    }
}
