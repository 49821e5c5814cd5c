//! Property-based tests for key-path reads, writes, flattening and merging.

use super::{Node, PathMapping};
use crate::key::Key;
use crate::path::KeyPath;
use proptest::prelude::*;

type Mapping = PathMapping<Key, i64>;

fn key_strategy() -> impl Strategy<Value = Key> {
    "[a-d]{1,2}".prop_map(Key::from)
}

// Nested levels are never empty, so flattening sees every level.
fn node_strategy() -> impl Strategy<Value = Node<Key, i64>> {
    let leaf = any::<i64>().prop_map(Node::Terminal);
    leaf.prop_recursive(4, 64, 4, |inner| {
        prop::collection::vec((key_strategy(), inner), 1..4)
            .prop_map(|entries| Node::Nested(entries.into_iter().collect()))
    })
}

fn mapping_strategy() -> impl Strategy<Value = Mapping> {
    prop::collection::vec((key_strategy(), node_strategy()), 0..5)
        .prop_map(|entries| entries.into_iter().collect())
}

fn path_strategy() -> impl Strategy<Value = KeyPath> {
    prop::collection::vec(key_strategy(), 1..5).prop_map(KeyPath::from)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    // Replaying the flattened pairs rebuilds an equal mapping
    #[test]
    fn flatten_replay_roundtrip(mapping in mapping_strategy()) {
        let mut rebuilt = Mapping::new();
        for (path, node) in mapping.iter_paths(None) {
            rebuilt.set(&path, node.clone()).unwrap();
        }
        prop_assert_eq!(rebuilt, mapping);
    }

    // Deep copies compare equal
    #[test]
    fn deep_copy_equal(mapping in mapping_strategy()) {
        prop_assert_eq!(mapping.deep_copy(), mapping);
    }

    // Every flattened pair is reachable with get
    #[test]
    fn flattened_paths_resolve(mapping in mapping_strategy(), depth in prop::option::of(0usize..4)) {
        for (path, node) in mapping.iter_paths(depth) {
            prop_assert_eq!(mapping.get(&path).unwrap(), node);
        }
    }

    // Unbounded flattening yields terminals only
    #[test]
    fn unbounded_flatten_yields_terminals(mapping in mapping_strategy()) {
        for (_, node) in mapping.iter_paths(None) {
            prop_assert!(node.is_terminal());
        }
    }

    // Depth zero yields one pair per top-level key
    #[test]
    fn depth_zero_matches_top_level(mapping in mapping_strategy()) {
        let paths: Vec<KeyPath> = mapping.iter_paths(Some(0)).map(|(path, _)| path).collect();
        let expected: Vec<KeyPath> = mapping
            .keys()
            .map(|key| KeyPath::from(vec![key.clone()]))
            .collect();
        prop_assert_eq!(paths, expected);
    }

    // Setting the same pair twice equals setting it once
    #[test]
    fn set_idempotent(mapping in mapping_strategy(), path in path_strategy(), value in any::<i64>()) {
        let mut once = mapping.clone();
        once.set(&path, value).unwrap();

        let mut twice = mapping;
        twice.set(&path, value).unwrap();
        twice.set(&path, value).unwrap();

        prop_assert_eq!(once, twice);
    }

    // A value written with set reads back with get
    #[test]
    fn set_then_get(mapping in mapping_strategy(), path in path_strategy(), value in any::<i64>()) {
        let mut mapping = mapping;
        mapping.set(&path, value).unwrap();
        prop_assert_eq!(mapping.get(&path).unwrap(), &Node::Terminal(value));
    }

    // After an unbounded merge every pair of the overlay is visible
    #[test]
    fn merge_overlay_wins(base in mapping_strategy(), overlay in mapping_strategy()) {
        let mut merged = base;
        merged.merge(&overlay, None).unwrap();
        for (path, node) in overlay.iter_paths(None) {
            prop_assert_eq!(merged.get(&path).unwrap(), node);
        }
    }

    // Merging a mapping into an empty one reproduces it at any depth
    #[test]
    fn merge_into_empty(mapping in mapping_strategy(), depth in prop::option::of(0usize..4)) {
        let mut merged = Mapping::new();
        merged.merge(&mapping, depth).unwrap();
        prop_assert_eq!(merged, mapping);
    }
}
