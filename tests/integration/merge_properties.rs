//! Property-based tests for merge guarantees

use proptest::prelude::*;
use proptest::test_runner::TestRunner;
use settings_updater::merge::SettingsMerger;
use settings_updater::tree::{Mapping, Node};

const KEYS: [&str; 5] = ["core", "paths", "user", "port", "mode"];

fn scalar() -> impl Strategy<Value = Node> {
    prop_oneof![
        (0i64..4).prop_map(Node::from),
        prop::sample::select(vec!["a", "b", "c"]).prop_map(Node::from),
        any::<bool>().prop_map(Node::from),
    ]
}

fn mapping_of(value: BoxedStrategy<Node>, size: std::ops::Range<usize>) -> BoxedStrategy<Node> {
    prop::collection::vec((prop::sample::select(KEYS.to_vec()), value), size)
        .prop_map(|entries| {
            Node::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (Node::from(k), v))
                    .collect(),
            )
        })
        .boxed()
}

fn tree() -> BoxedStrategy<Node> {
    scalar()
        .prop_recursive(3, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Node::Sequence),
                mapping_of(inner, 0..4),
            ]
        })
        .boxed()
}

/// Defaults document: always a mapping at the top.
fn document() -> BoxedStrategy<Node> {
    mapping_of(tree(), 1..5)
}

fn next(entropy: &mut std::vec::IntoIter<u8>) -> u8 {
    entropy.next().unwrap_or(255)
}

/// Derive a user's settings from defaults: drop keys and sequence entries,
/// customize scalars, and add keys and entries the defaults never had.
/// Shapes stay compatible with the defaults.
fn perturb(node: &Node, entropy: &mut std::vec::IntoIter<u8>) -> Node {
    match node {
        Node::Mapping(map) => {
            let mut out = Mapping::new();
            for (k, v) in map.iter() {
                if next(entropy) % 4 == 0 {
                    continue;
                }
                out.insert(k.clone(), perturb(v, entropy));
            }
            if next(entropy) % 4 == 0 {
                out.insert(Node::from("user_only"), Node::from("mine"));
            }
            Node::Mapping(out)
        }
        Node::Sequence(items) => {
            let mut out = Vec::new();
            for item in items {
                if next(entropy) % 3 != 0 {
                    out.push(item.clone());
                }
            }
            if next(entropy) % 4 == 0 {
                out.push(Node::from("user_item"));
            }
            Node::Sequence(out)
        }
        Node::Scalar(_) => {
            if next(entropy) % 3 == 0 {
                Node::from("customized")
            } else {
                node.clone()
            }
        }
    }
}

fn pair() -> impl Strategy<Value = (Node, Node)> {
    (document(), prop::collection::vec(any::<u8>(), 0..64)).prop_map(|(defaults, bytes)| {
        let current = perturb(&defaults, &mut bytes.into_iter());
        (defaults, current)
    })
}

fn merge(defaults: &Node, current: &Node, overwrite: bool) -> (Node, bool) {
    SettingsMerger::new(())
        .with_overwrite(overwrite)
        .merge(defaults, current)
        .unwrap()
        .into_parts()
}

/// Every key and sequence entry of `defaults` exists in `merged`.
fn assert_complete(defaults: &Node, merged: &Node) {
    match (defaults, merged) {
        (Node::Mapping(d), Node::Mapping(m)) => {
            for (k, v) in d.iter() {
                let mv = m.get(k).unwrap_or_else(|| panic!("key {} missing", k));
                assert_complete(v, mv);
            }
        }
        (Node::Sequence(d), Node::Sequence(m)) => {
            for item in d {
                assert!(m.contains(item), "entry {} missing", item);
            }
        }
        _ => {}
    }
}

/// Everything the user set survives a merge without overwrite.
fn assert_conserved(current: &Node, merged: &Node) {
    match (current, merged) {
        (Node::Mapping(c), Node::Mapping(m)) => {
            for (k, v) in c.iter() {
                let mv = m.get(k).unwrap_or_else(|| panic!("user key {} lost", k));
                assert_conserved(v, mv);
            }
        }
        (Node::Sequence(c), Node::Sequence(m)) => {
            assert!(m.len() >= c.len());
            assert_eq!(&m[..c.len()], &c[..], "user entries must keep their order");
        }
        (c, m) => assert_eq!(c, m),
    }
}

#[test]
fn test_merge_is_idempotent() {
    let mut runner = TestRunner::default();
    runner
        .run(&pair(), |(defaults, current)| {
            let (merged, _) = merge(&defaults, &current, false);
            let (again, changed) = merge(&defaults, &merged, false);
            prop_assert!(!changed);
            prop_assert_eq!(again, merged);
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_overwrite_merge_is_idempotent() {
    let mut runner = TestRunner::default();
    runner
        .run(&pair(), |(defaults, current)| {
            let (merged, _) = merge(&defaults, &current, true);
            let (_, changed) = merge(&defaults, &merged, true);
            prop_assert!(!changed);
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_merge_adds_every_default() {
    let mut runner = TestRunner::default();
    runner
        .run(&pair(), |(defaults, current)| {
            let (merged, _) = merge(&defaults, &current, false);
            assert_complete(&defaults, &merged);
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_merge_conserves_user_values() {
    let mut runner = TestRunner::default();
    runner
        .run(&pair(), |(defaults, current)| {
            let (merged, _) = merge(&defaults, &current, false);
            assert_conserved(&current, &merged);
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_changed_flag_matches_difference() {
    let mut runner = TestRunner::default();
    runner
        .run(&pair(), |(defaults, current)| {
            let (merged, changed) = merge(&defaults, &current, false);
            prop_assert_eq!(changed, merged != current);
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_merging_a_document_with_itself_is_a_no_op() {
    let mut runner = TestRunner::default();
    runner
        .run(&document(), |doc| {
            let (merged, changed) = merge(&doc, &doc, false);
            prop_assert!(!changed);
            prop_assert_eq!(merged, doc);
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_inputs_survive_merge_untouched() {
    let mut runner = TestRunner::default();
    runner
        .run(&pair(), |(defaults, current)| {
            let defaults_before = defaults.clone();
            let current_before = current.clone();
            merge(&defaults, &current, true);
            prop_assert_eq!(defaults, defaults_before);
            prop_assert_eq!(current, current_before);
            Ok(())
        })
        .unwrap();
}
