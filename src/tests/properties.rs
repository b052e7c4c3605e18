use crate::OrderedTree;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use std::collections::BTreeSet;

/// Drive the tree and a reference model through the same random sequence of
/// inserts and removals, checking the full invariant set and the sorted
/// contents after every step
fn check_against_model(min_degree: usize, operations: usize, key_space: i32, seed: u64) {
    let mut rng = Pcg64::seed_from_u64(seed);
    let mut tree = OrderedTree::new(min_degree).unwrap();
    let mut model = BTreeSet::new();

    for _ in 0..operations {
        let key = rng.gen_range(0, key_space);
        if rng.gen_bool(0.6) {
            assert_eq!(tree.insert(key), model.insert(key), "insert of {}", key);
        } else {
            assert_eq!(tree.remove(&key), model.remove(&key), "removal of {}", key);
        }

        tree.assert_invariants();
        assert_eq!(tree.len(), model.len());
        let expected: Vec<i32> = model.iter().cloned().collect();
        let actual: Vec<i32> = tree.iter().cloned().collect();
        assert_eq!(actual, expected);
    }
}

#[test]
fn random_churn_at_minimum_degree() {
    check_against_model(2, 2_000, 100, 17);
}

#[test]
fn random_churn_at_degree_three() {
    check_against_model(3, 2_000, 100, 18);
}

#[test]
fn random_churn_with_a_wide_node() {
    check_against_model(8, 2_000, 500, 19);
}

#[test]
fn dense_then_total_teardown() {
    let mut tree = OrderedTree::new(3).unwrap();
    let mut keys: Vec<i32> = (0..500).collect();
    tree.extend(keys.iter().cloned());
    tree.assert_invariants();

    // Remove in a scrambled order so every fix-up case gets exercised
    let mut rng = Pcg64::seed_from_u64(23);
    for i in (1..keys.len()).rev() {
        keys.swap(i, rng.gen_range(0, i + 1));
    }
    for key in keys {
        assert!(tree.remove(&key));
        tree.assert_invariants();
    }
    assert!(tree.is_empty());
}

#[test]
fn every_key_stays_searchable() {
    let mut tree = OrderedTree::new(2).unwrap();
    let mut rng = Pcg64::seed_from_u64(29);
    let keys: Vec<i32> = (0..200).map(|_| rng.gen_range(0, 10_000)).collect();
    tree.extend(keys.iter().cloned());

    for key in &keys {
        assert!(tree.contains(key));
    }
    assert!(!tree.contains(&10_001));
}
