use std::collections::{BTreeMap, HashSet};
use std::fmt::Display;

use treemap::{avl, splay, unbalanced, Error, TreeMap};

use crate::Op;

/// Applies a set of operations to a tree and a `BTreeMap`.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in the map.
fn do_ops<T, K, V>(ops: &[Op<K, V>], bst: &mut T, map: &mut BTreeMap<K, V>) -> bool
where
    T: TreeMap<K, V>,
    K: Ord + Clone,
    V: PartialEq + Clone,
{
    ops.iter().all(|op| match op {
        Op::Insert(k, v) => bst.put(k.clone(), v.clone()) == map.insert(k.clone(), v.clone()),
        Op::Remove(k) => bst.remove(k) == map.remove(k),
        Op::Get(k) => bst.get(k) == map.get(k),
    }) && bst.len() == map.len()
}

/// Renders a model map the same way the trees render themselves.
fn render<K: Display, V: Display>(map: &BTreeMap<K, V>) -> String {
    let entries: Vec<_> = map.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    format!("{{{}}}", entries.join(", "))
}

fn fuzz<T>(ops: &[Op<i8, i8>]) -> bool
where
    T: TreeMap<i8, i8> + Default + Display,
{
    let mut tree = T::default();
    let mut map = BTreeMap::new();

    do_ops(ops, &mut tree, &mut map)
        && tree.to_string() == render(&map)
        && map.iter().all(|(key, value)| tree.get(key) == Some(value))
}

fn contains<T: TreeMap<i8, i8> + Default>(xs: &[i8]) -> bool {
    let mut tree = T::default();
    for x in xs {
        tree.put(*x, *x);
    }

    xs.iter().all(|x| tree.get(x) == Some(x))
}

fn contains_not<T: TreeMap<i8, i8> + Default>(xs: &[i8], nots: &[i8]) -> bool {
    let mut tree = T::default();
    for x in xs {
        tree.put(*x, *x);
    }
    let added: HashSet<_> = xs.iter().collect();

    nots.iter()
        .filter(|x| !added.contains(x))
        .all(|x| tree.get(x).is_none())
}

fn with_deletions<T: TreeMap<i8, i8> + Default>(xs: &[i8], deletes: &[i8]) -> bool {
    let mut tree = T::default();
    for x in xs {
        tree.put(*x, *x);
    }
    for delete in deletes {
        tree.remove(delete);
    }

    let deleted: HashSet<_> = deletes.iter().collect();
    let mut still_present: Vec<_> = xs.iter().filter(|x| !deleted.contains(x)).collect();
    still_present.sort();
    still_present.dedup();

    tree.len() == still_present.len()
        && deletes.iter().all(|x| tree.get(x).is_none())
        && still_present.iter().all(|x| tree.get(x) == Some(*x))
}

fn put_twice_keeps_last<T: TreeMap<i8, i8> + Default>(xs: &[i8], k: i8, v1: i8, v2: i8) -> bool {
    let mut tree = T::default();
    for x in xs {
        tree.put(*x, *x);
    }
    tree.put(k, v1);
    let len = tree.len();

    tree.put(k, v2) == Some(v1) && tree.len() == len && tree.get(&k) == Some(&v2)
}

fn strict_removal<T: TreeMap<i8, i8> + Default>(xs: &[i8], k: i8) -> bool {
    let mut tree = T::default();
    for x in xs {
        tree.put(*x, *x);
    }
    let len = tree.len();

    if xs.contains(&k) {
        tree.try_remove(&k) == Ok(k) && tree.len() == len - 1 && !tree.contains_key(&k)
    } else {
        tree.try_remove(&k) == Err(Error::KeyNotFound) && tree.len() == len
    }
}

macro_rules! contract_tests {
    ($name:ident, $tree:ty) => {
        mod $name {
            use super::*;

            quickcheck::quickcheck! {
                fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
                    fuzz::<$tree>(&ops)
                }

                fn contains_all(xs: Vec<i8>) -> bool {
                    contains::<$tree>(&xs)
                }

                fn contains_none_of_the_others(xs: Vec<i8>, nots: Vec<i8>) -> bool {
                    contains_not::<$tree>(&xs, &nots)
                }

                fn deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
                    with_deletions::<$tree>(&xs, &deletes)
                }

                fn put_overwrites(xs: Vec<i8>, k: i8, v1: i8, v2: i8) -> bool {
                    put_twice_keeps_last::<$tree>(&xs, k, v1, v2)
                }

                fn try_remove(xs: Vec<i8>, k: i8) -> bool {
                    strict_removal::<$tree>(&xs, k)
                }
            }

            #[test]
            fn empty_renders_braces() {
                let mut tree = <$tree>::default();
                assert!(TreeMap::is_empty(&tree));
                assert_eq!(tree.to_string(), "{}");

                TreeMap::put(&mut tree, 1, 1);
                assert!(!TreeMap::is_empty(&tree));
                assert_eq!(tree.to_string(), "{1=1}");
            }
        }
    };
}

contract_tests!(unbalanced_tree, unbalanced::Tree<i8, i8>);
contract_tests!(avl_tree, avl::Tree<i8, i8>);
contract_tests!(splay_tree, splay::Tree<i8, i8>);

#[test]
fn scenario_renders_the_same_everywhere() {
    let keys = [5, 3, 8, 1, 4, 7, 9];
    let expected = "{1=v1, 3=v3, 4=v4, 5=v5, 7=v7, 8=v8, 9=v9}";

    let avl: avl::Tree<_, _> = keys.iter().map(|k| (*k, format!("v{}", k))).collect();
    let splay: splay::Tree<_, _> = keys.iter().map(|k| (*k, format!("v{}", k))).collect();
    let unbalanced: unbalanced::Tree<_, _> =
        keys.iter().map(|k| (*k, format!("v{}", k))).collect();

    assert_eq!(avl.to_string(), expected);
    assert_eq!(splay.to_string(), expected);
    assert_eq!(unbalanced.to_string(), expected);
    assert!(avl.height() <= 3);
}
