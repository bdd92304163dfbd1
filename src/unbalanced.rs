//! A plain BST that never restructures itself.
//!
//! This is the baseline the other trees are measured against. Keys inserted in random order
//! give a tree of expected height `O(lg N)` but keys inserted in sorted order give a list.
//!
//! # Examples
//!
//! ```
//! use treemap::unbalanced::Tree;
//! use treemap::{Error, TreeMap};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//! assert!(tree.is_empty());
//!
//! tree.put(1, 2);
//! assert_eq!(tree.find(&1), Some(&2));
//!
//! // Inserting a new value for the same key overwrites the value.
//! tree.put(1, 3);
//! assert_eq!(tree.find(&1), Some(&3));
//! assert_eq!(tree.to_string(), "{1=3}");
//!
//! // Deleting a node returns its value. Deleting it again finds nothing.
//! assert_eq!(tree.remove(&1), Some(3));
//! assert_eq!(tree.try_remove(&1), Err(Error::KeyNotFound));
//! assert_eq!(tree.to_string(), "{}");
//! ```

use std::fmt;

use crate::node::{self, Link};
use crate::path::{self, Unbalanced};
use crate::TreeMap;

/// An unbalanced Binary Search Tree. This can be used for inserting, finding, and deleting keys
/// and values.
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

    /// Inserts the given value into the tree stored at the given key. Inserting a new value for an
    /// existing key overwrites its value and returns the old one.
    pub fn put(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        let (root, old_value) =
            path::insert::<Unbalanced, _, _>(self.root.take(), key, value);
        self.root = Some(root);
        if old_value.is_none() {
            self.len += 1;
        }
        old_value
    }

    /// Deletes the node containing the given key from the tree and returns its value. If the tree
    /// does not contain a node with the key, nothing happens. Use
    /// [`TreeMap::try_remove`] to treat that as an error instead.
    pub fn remove(&mut self, key: &K) -> Option<V>
    where
        K: Ord,
    {
        let (root, removed) = path::remove::<Unbalanced, _, _>(self.root.take(), key);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// The number of levels below the root. Useful for seeing how lopsided the tree has become.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<_> = self.root.iter().map(|n| (&**n, 0)).collect();
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.left.iter().map(|n| (&**n, depth + 1)));
            stack.extend(node.right.iter().map(|n| (&**n, depth + 1)));
        }
        deepest
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
