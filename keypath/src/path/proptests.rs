//! Property-based tests for key path composition.

use super::KeyPath;
use crate::key::Key;
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = Key> {
    prop_oneof![
        "[a-z0-9_]{1,8}".prop_map(Key::from),
        any::<i64>().prop_map(Key::from),
        any::<bool>().prop_map(Key::from),
    ]
}

fn path_strategy() -> impl Strategy<Value = KeyPath> {
    prop::collection::vec(key_strategy(), 0..8).prop_map(KeyPath::from)
}

fn non_empty_path_strategy() -> impl Strategy<Value = KeyPath> {
    prop::collection::vec(key_strategy(), 1..8).prop_map(KeyPath::from)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Concatenation adds lengths
    #[test]
    fn concat_length_is_sum(a in path_strategy(), b in path_strategy()) {
        prop_assert_eq!((&a + &b).len(), a.len() + b.len());
    }

    // Concatenation keeps the left operand's head
    #[test]
    fn concat_keeps_top(a in non_empty_path_strategy(), b in path_strategy()) {
        let sum = &a + &b;
        prop_assert_eq!(sum.top().unwrap(), a.top().unwrap());
    }

    // Tail of a concatenation is the left tail followed by the right operand
    #[test]
    fn concat_descendants(a in non_empty_path_strategy(), b in path_strategy()) {
        prop_assert_eq!((&a + &b).descendants(), a.descendants() + b);
    }

    // Head and tail rebuild the original path
    #[test]
    fn head_tail_reconstruction(p in non_empty_path_strategy()) {
        let head: KeyPath = KeyPath::from(vec![p.top().unwrap().clone()]);
        prop_assert_eq!(head + p.descendants(), p);
    }

    // Appending a single segment is the same as joining a one-segment path
    #[test]
    fn child_matches_join(p in path_strategy(), k in key_strategy()) {
        let single: KeyPath = KeyPath::from(vec![k.clone()]);
        prop_assert_eq!(p.child(k), p.join(&single));
    }

    // Concatenation is associative
    #[test]
    fn concat_associative(a in path_strategy(), b in path_strategy(), c in path_strategy()) {
        prop_assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
    }
}
