//! A self-balancing BST (specifically, an AVL tree).
//!
//! Every node records its height. After any insertion or removal, each node on the path back to
//! the root is rebalanced with one or two rotations so that the heights of its two subtrees
//! differ by at most one. That keeps the height of the whole tree within about `1.44 * lg N`.
//!
//! # Examples
//!
//! ```
//! use treemap::avl::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//! assert_eq!(tree.to_string(), "{}");
//!
//! // Sorted keys would make an unbalanced tree a list.
//! for key in 1..=7 {
//!     tree.put(key, key * 10);
//! }
//! assert_eq!(tree.height(), 2);
//!
//! // Putting an existing key overwrites its value.
//! assert_eq!(tree.put(4, 0), Some(40));
//! assert_eq!(tree.find(&4), Some(&0));
//!
//! assert_eq!(tree.remove(&4), Some(0));
//! assert_eq!(tree.remove(&4), None);
//! assert_eq!(tree.to_string(), "{1=10, 2=20, 3=30, 5=50, 6=60, 7=70}");
//! ```

use std::fmt;

use crate::node::{self, Link, Node};
use crate::path::{self, Balance};
use crate::TreeMap;

/// How much taller one subtree of a node may be than the other.
const ALLOWED_IMBALANCE: i32 = 1;

/// The height of the subtree rooted at a node. A childless node has height 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Height(i32);

type AvlLink<K, V> = Link<K, V, Height>;
type AvlNode<K, V> = Box<Node<K, V, Height>>;

/// The height of a subtree, or `-1` for the empty subtree.
fn height<K, V>(link: &AvlLink<K, V>) -> i32 {
    link.as_ref().map_or(-1, |n| n.meta.0)
}

impl<K, V> Node<K, V, Height> {
    /// Adjusts the height of `self` to be the max of its children's heights + 1.
    fn fix_height(&mut self) {
        self.meta = Height(height(&self.left).max(height(&self.right)) + 1);
    }

    /// The difference in height between the left and right subtrees. See [the Wikipedia
    /// page][wiki] for more details.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Balance_factor
    fn balance_factor(&self) -> i32 {
        height(&self.left) - height(&self.right)
    }
}

/// Rebalances with AVL rotations.
pub(crate) struct Avl;

impl Balance for Avl {
    type Meta = Height;

    fn balance<K, V>(mut node: AvlNode<K, V>) -> AvlNode<K, V> {
        // See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for terminology.
        let factor = node.balance_factor();
        if factor > ALLOWED_IMBALANCE {
            let outer = node.left.as_ref().map_or(true, |l| l.balance_factor() >= 0);
            node = if outer {
                rotate_right(node)
            } else {
                rotate_left_right(node)
            };
        } else if factor < -ALLOWED_IMBALANCE {
            let outer = node.right.as_ref().map_or(true, |r| r.balance_factor() <= 0);
            node = if outer {
                rotate_left(node)
            } else {
                rotate_right_left(node)
            };
        }
        node.fix_height();

        if cfg!(debug_assertions) {
            assert!(node.balance_factor().abs() <= ALLOWED_IMBALANCE);
        }
        node
    }
}

/// Rotate `old_root` to the right. This moves the left child up vertically and `old_root` down
/// vertically. Used to rebalance the tree when the left child is too tall.
///
/// ```text
///       old_root             new_root
///        /     \              /     \
///   new_root    z  rotate -> x    old_root
///    /  \                           /  \
///   x    y                         y    z
/// ```
fn rotate_right<K, V>(mut old_root: AvlNode<K, V>) -> AvlNode<K, V> {
    let Some(mut new_root) = old_root.left.take() else {
        return old_root;
    };

    old_root.left = new_root.right.take();
    old_root.fix_height();

    new_root.right = Some(old_root);
    new_root.fix_height();

    #[cfg(feature = "tracing")]
    tracing::trace!(height = new_root.meta.0, "avl rotate right");
    new_root
}

/// The mirror image of [`rotate_right`].
fn rotate_left<K, V>(mut old_root: AvlNode<K, V>) -> AvlNode<K, V> {
    let Some(mut new_root) = old_root.right.take() else {
        return old_root;
    };

    old_root.right = new_root.left.take();
    old_root.fix_height();

    new_root.left = Some(old_root);
    new_root.fix_height();

    #[cfg(feature = "tracing")]
    tracing::trace!(height = new_root.meta.0, "avl rotate left");
    new_root
}

/// The left child is too tall because of its right subtree: lift the left child's right child
/// above both of them.
fn rotate_left_right<K, V>(mut node: AvlNode<K, V>) -> AvlNode<K, V> {
    node.left = node.left.take().map(rotate_left);
    rotate_right(node)
}

fn rotate_right_left<K, V>(mut node: AvlNode<K, V>) -> AvlNode<K, V> {
    node.right = node.right.take().map(rotate_right);
    rotate_left(node)
}

/// An AVL tree. This can be used for inserting, finding, and deleting keys and values.
pub struct Tree<K, V> {
    root: AvlLink<K, V>,
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

/// Renders the entries in key order, e.g. `{1=a, 2=b}`.
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

    /// The number of edges on the longest path from the root to a leaf. An empty tree has height
    /// `-1` and a single node has height `0`.
    pub fn height(&self) -> i32 {
        height(&self.root)
    }

    /// Visits every entry in key order.
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

    /// Potentially finds the value associated with the given key in this tree. If no node has the
    /// corresponding key, `None` is returned.
    pub fn find(&self, key: &K) -> Option<&V>
    where
        K: Ord,
    {
        path::find(&self.root, key)
    }

    /// Inserts the given value into the tree stored at the given key and rebalances. Inserting a
    /// new value for an existing key overwrites its value and returns the old one.
    pub fn put(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        let (root, old_value) = path::insert::<Avl, _, _>(self.root.take(), key, value);
        self.root = Some(root);
        if old_value.is_none() {
            self.len += 1;
        }
        old_value
    }

    /// Deletes the node containing the given key from the tree, rebalances, and returns its
    /// value. If the tree does not contain a node with the key, nothing happens.
    pub fn remove(&mut self, key: &K) -> Option<V>
    where
        K: Ord,
    {
        let (root, removed) = path::remove::<Avl, _, _>(self.root.take(), key);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
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
        self.find(key)
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
