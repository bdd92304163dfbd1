//! A self-adjusting BST (specifically, a top-down splay tree).
//!
//! A splay tree keeps no balance information at all. Instead, every `get`, `put`, and `remove`
//! first *splays* the requested key: the tree is restructured in a single pass from the root so
//! that the node holding the key (or the last node visited looking for it) becomes the root.
//! Individual operations can take `O(N)` but any sequence of `M` operations takes
//! `O(M lg N)`, and keys that are accessed often stay near the root.
//!
//! Because lookups restructure the tree, [`Tree::get`] takes `&mut self`.
//!
//! # Examples
//!
//! ```
//! use treemap::splay::Tree;
//!
//! let mut tree = Tree::new();
//! for key in [5, 3, 8, 1, 4] {
//!     tree.put(key, key.to_string());
//! }
//!
//! // Looking a key up moves it to the root.
//! assert_eq!(tree.get(&1), Some(&"1".to_string()));
//! assert_eq!(tree.root_key(), Some(&1));
//!
//! // A miss moves the closest key visited to the root instead.
//! assert_eq!(tree.get(&7), None);
//! assert_eq!(tree.root_key(), Some(&8));
//!
//! assert_eq!(tree.remove(&8), Some("8".to_string()));
//! assert_eq!(tree.to_string(), "{1=1, 3=3, 4=4, 5=5}");
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use crate::node::{self, Link, Node};
use crate::TreeMap;

/// Rotate the left child of `old_root` up into its place.
fn rotate_right<K, V>(mut old_root: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut new_root) = old_root.left.take() else {
        return old_root;
    };
    old_root.left = new_root.right.take();
    new_root.right = Some(old_root);

    #[cfg(feature = "tracing")]
    tracing::trace!("splay rotate right");
    new_root
}

/// Rotate the right child of `old_root` up into its place.
fn rotate_left<K, V>(mut old_root: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut new_root) = old_root.right.take() else {
        return old_root;
    };
    old_root.right = new_root.left.take();
    new_root.left = Some(old_root);

    #[cfg(feature = "tracing")]
    tracing::trace!("splay rotate left");
    new_root
}

/// Collects the pieces split off the tree during a splay.
///
/// `lesser` holds, in the order they were split off, nodes whose keys are smaller than the
/// target along with their left subtrees. Each one will become the right child of the one before
/// it. `greater` is the mirror image. Both are built fresh for each splay and consumed by
/// [`Header::reassemble`].
struct Header<K, V> {
    lesser: Vec<Box<Node<K, V>>>,
    greater: Vec<Box<Node<K, V>>>,
}

impl<K, V> Header<K, V> {
    fn new() -> Self {
        Self {
            lesser: Vec::new(),
            greater: Vec::new(),
        }
    }

    /// Hangs `node`, whose right child has been taken, off the bottom-right of the lesser tree.
    fn link_left(&mut self, node: Box<Node<K, V>>) {
        debug_assert!(node.right.is_none());
        self.lesser.push(node);
    }

    /// Hangs `node`, whose left child has been taken, off the bottom-left of the greater tree.
    fn link_right(&mut self, node: Box<Node<K, V>>) {
        debug_assert!(node.left.is_none());
        self.greater.push(node);
    }

    /// Makes `root` the root of the whole tree: its old children are hung off the bottom of the
    /// lesser and greater trees, which then become its children.
    fn reassemble(self, mut root: Box<Node<K, V>>) -> Box<Node<K, V>> {
        let mut left = root.left.take();
        for mut node in self.lesser.into_iter().rev() {
            node.right = left;
            left = Some(node);
        }

        let mut right = root.right.take();
        for mut node in self.greater.into_iter().rev() {
            node.left = right;
            right = Some(node);
        }

        root.left = left;
        root.right = right;
        root
    }
}

/// Performs a top-down splay of `key` on the tree rooted at `node` and returns the new root. If
/// `key` is in the tree it is at the root afterwards; otherwise the root is the last node
/// visited while looking for it (its predecessor or successor).
fn splay<K, V>(mut node: Box<Node<K, V>>, key: &K) -> Box<Node<K, V>>
where
    K: Ord,
{
    let mut header = Header::new();

    loop {
        match key.cmp(&node.key) {
            Ordering::Less => {
                // Zig-zig: two steps left in a row. Rotate first so the walk takes one.
                if node.left.as_ref().map_or(false, |left| *key < left.key) {
                    node = rotate_right(node);
                }
                let Some(left) = node.left.take() else {
                    break;
                };
                header.link_right(node);
                node = left;
            }
            Ordering::Greater => {
                if node.right.as_ref().map_or(false, |right| *key > right.key) {
                    node = rotate_left(node);
                }
                let Some(right) = node.right.take() else {
                    break;
                };
                header.link_left(node);
                node = right;
            }
            Ordering::Equal => break,
        }
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(
        lesser = header.lesser.len(),
        greater = header.greater.len(),
        "splay"
    );
    header.reassemble(node)
}

/// A splay tree. This can be used for inserting, finding, and deleting keys and values.
pub struct Tree<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for Tree<K, V> {
    fn drop(&mut self) {
        node::dismantle(self.root.take());
    }
}

impl<K, V> Clone for Tree<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: node::clone_tree(&self.root),
            len: self.len,
        }
    }
}

impl<K, V> fmt::Debug for Tree<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Renders the entries in key order, e.g. `{1=a, 2=b}`. Rendering doesn't splay.
impl<K, V> fmt::Display for Tree<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        node::fmt_entries(self.iter(), f)
    }
}

impl<K, V> Tree<K, V> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The key currently at the root, i.e. the key most recently splayed.
    pub fn root_key(&self) -> Option<&K> {
        self.root.as_ref().map(|root| &root.key)
    }

    /// Visits every entry in key order. This doesn't splay.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        node::Iter::new(&self.root, self.len)
    }

    /// Visits every key in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Visits every value in key order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Splays `key` and returns its value if it was found.
    pub fn get(&mut self, key: &K) -> Option<&V>
    where
        K: Ord,
    {
        let root = splay(self.root.take()?, key);
        self.root = Some(root);
        self.root
            .as_deref()
            .filter(|root| root.key == *key)
            .map(|root| &root.value)
    }

    /// Splays `key` and stores `value` at it. A new key becomes the root with the splayed tree
    /// split around it; an existing key has its value overwritten and the old one returned.
    pub fn put(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        let Some(root) = self.root.take() else {
            self.root = Some(Node::new_boxed(key, value));
            self.len += 1;
            return None;
        };

        let mut root = splay(root, &key);
        let new_root = match key.cmp(&root.key) {
            Ordering::Less => {
                let mut new_root = Node::new_boxed(key, value);
                new_root.left = root.left.take();
                new_root.right = Some(root);
                new_root
            }
            Ordering::Greater => {
                let mut new_root = Node::new_boxed(key, value);
                new_root.right = root.right.take();
                new_root.left = Some(root);
                new_root
            }
            Ordering::Equal => {
                let old_value = mem::replace(&mut root.value, value);
                self.root = Some(root);
                return Some(old_value);
            }
        };

        new_root.debug_assert_ordered();
        self.root = Some(new_root);
        self.len += 1;
        None
    }

    /// Splays `key` and, if it was found, removes it and returns its value. Otherwise the tree
    /// keeps its splayed shape and `None` is returned.
    pub fn remove(&mut self, key: &K) -> Option<V>
    where
        K: Ord,
    {
        let root = splay(self.root.take()?, key);
        if root.key != *key {
            self.root = Some(root);
            return None;
        }

        let Node {
            value, left, right, ..
        } = *root;
        self.root = match left {
            None => right,
            Some(left) => {
                // Everything on the left is smaller than `key`, so splaying it brings its
                // largest node to the top with no right child.
                let mut new_root = splay(left, key);
                new_root.right = right;
                Some(new_root)
            }
        };
        self.len -= 1;
        Some(value)
    }
}

impl<K, V> TreeMap<K, V> for Tree<K, V>
where
    K: Ord,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        Tree::put(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        Tree::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        Tree::remove(self, key)
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl<K, V> FromIterator<(K, V)> for Tree<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K, V> Extend<(K, V)> for Tree<K, V>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Asserts every key is strictly between its ancestors' bounds. Returns the node count.
    pub(super) fn assert_ordered<K: Ord, V>(
        link: &Link<K, V>,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> usize {
        let Some(n) = link else {
            return 0;
        };
        if let Some(lower) = lower {
            assert!(n.key > *lower);
        }
        if let Some(upper) = upper {
            assert!(n.key < *upper);
        }
        1 + assert_ordered(&n.left, lower, Some(&n.key))
            + assert_ordered(&n.right, Some(&n.key), upper)
    }

    /// The keys along the left and right spines below the root.
    fn spines(tree: &Tree<i32, i32>) -> (Vec<i32>, Vec<i32>) {
        let mut left = Vec::new();
        let mut node = tree.root.as_ref().and_then(|n| n.left.as_deref());
        while let Some(n) = node {
            left.push(n.key);
            node = n.left.as_deref();
        }
        let mut right = Vec::new();
        let mut node = tree.root.as_ref().and_then(|n| n.right.as_deref());
        while let Some(n) = node {
            right.push(n.key);
            node = n.right.as_deref();
        }
        (left, right)
    }

    #[test]
    fn empty_tree() {
        let mut tree: Tree<i32, i32> = Tree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.to_string(), "{}");
        assert_eq!(tree.get(&1), None);
        assert_eq!(tree.remove(&1), None);
        assert_eq!(tree.root_key(), None);

        tree.put(1, 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.root_key(), Some(&1));
    }

    #[test]
    fn put_makes_new_key_the_root() {
        let mut tree = Tree::new();
        for key in [5, 3, 8, 1, 4, 7, 9] {
            tree.put(key, key);
            assert_eq!(tree.root_key(), Some(&key));
        }

        assert_eq!(tree.to_string(), "{1=1, 3=3, 4=4, 5=5, 7=7, 8=8, 9=9}");
        assert_eq!(assert_ordered(&tree.root, None, None), 7);
    }

    #[test]
    fn get_makes_found_key_the_root() {
        let mut tree: Tree<_, _> = (0..32).map(|k| (k, k * 2)).collect();
        for key in [17, 0, 31, 16, 5, 5] {
            assert_eq!(tree.get(&key), Some(&(key * 2)));
            assert_eq!(tree.root_key(), Some(&key));
            assert_eq!(assert_ordered(&tree.root, None, None), 32);
        }
    }

    #[test]
    fn get_miss_splays_a_neighbour() {
        let mut tree: Tree<_, _> = [10, 20, 30].into_iter().map(|k| (k, k)).collect();

        assert_eq!(tree.get(&25), None);
        let root = *tree.root_key().unwrap();
        assert!(root == 20 || root == 30);

        assert_eq!(tree.get(&100), None);
        assert_eq!(tree.root_key(), Some(&30));

        assert_eq!(tree.get(&-1), None);
        assert_eq!(tree.root_key(), Some(&10));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn zig_zig_halves_a_left_spine() {
        // Ascending puts leave a tree that is one long left spine below the root.
        let mut tree: Tree<_, _> = (1..=7).map(|k| (k, k)).collect();
        assert_eq!(spines(&tree), (vec![6, 5, 4, 3, 2, 1], vec![]));

        // Splaying the deepest key rotates pairs along the way, roughly halving the depth.
        assert_eq!(tree.get(&1), Some(&1));
        let (left, right) = spines(&tree);
        assert!(left.is_empty());
        assert_eq!(right, [6, 7]);
        let six = tree.root.as_ref().unwrap().right.as_ref().unwrap();
        let four = six.left.as_ref().unwrap();
        assert_eq!(four.key, 4);
        assert_eq!(four.left.as_ref().unwrap().key, 2);
        assert_eq!(four.right.as_ref().unwrap().key, 5);
        assert_eq!(assert_ordered(&tree.root, None, None), 7);
    }

    #[test]
    fn put_existing_key_overwrites() {
        let mut tree = Tree::new();
        tree.put(1, "a");
        tree.put(2, "b");

        assert_eq!(tree.put(1, "c"), Some("a"));
        assert_eq!(tree.root_key(), Some(&1));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(&1), Some(&"c"));
    }

    #[test]
    fn remove_root_without_left_child() {
        let mut tree = Tree::new();
        tree.put(2, 2);
        tree.put(1, 1);

        // 1 is the root with 2 to its right.
        assert_eq!(tree.remove(&1), Some(1));
        assert_eq!(tree.root_key(), Some(&2));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn remove_joins_with_predecessor() {
        let mut tree: Tree<_, _> = [5, 3, 8, 1, 4, 7, 9].into_iter().map(|k| (k, k)).collect();

        assert_eq!(tree.remove(&5), Some(5));
        // The largest key smaller than 5 takes its place.
        assert_eq!(tree.root_key(), Some(&4));
        assert!(tree.root.as_ref().unwrap().right.is_some());
        assert_eq!(tree.to_string(), "{1=1, 3=3, 4=4, 7=7, 8=8, 9=9}");
        assert_eq!(assert_ordered(&tree.root, None, None), 6);
    }

    #[test]
    fn remove_missing_is_a_no_op() {
        let mut tree: Tree<_, _> = [5, 3, 8].into_iter().map(|k| (k, k)).collect();

        assert_eq!(tree.remove(&4), None);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.try_remove(&4), Err(crate::Error::KeyNotFound));
        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), [3, 5, 8]);
    }

    #[test]
    fn degenerate_tree_drops() {
        let tree: Tree<_, _> = (0..100_000).map(|k| (k, ())).collect();
        assert_eq!(tree.len(), 100_000);
    }

    #[test]
    fn degenerate_tree_clones() {
        // Ascending puts leave one long left spine below the largest key.
        let mut tree: Tree<_, _> = (0..100_000).map(|k| (k, k)).collect();
        let mut copy = tree.clone();

        assert_eq!(tree.remove(&0), Some(0));
        assert_eq!(tree.get(&50_000), Some(&50_000));
        assert_eq!(copy.root_key(), Some(&99_999));
        assert_eq!(copy.len(), 100_000);
        assert!(copy.keys().copied().eq(0..100_000));
        assert_eq!(copy.get(&0), Some(&0));
    }
}
