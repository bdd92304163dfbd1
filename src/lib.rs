//! This crate exposes three interchangeable ordered maps built on Binary Search Trees (BSTs).
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and a value
//! and will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! Searching takes `O(height)` where `height` is the longest path from the root to a leaf. The
//! trees in this crate differ only in how (or whether) they keep that height small:
//!
//! - [`unbalanced::Tree`] never restructures itself. Inserting sorted keys degrades it to a list.
//! - [`avl::Tree`] rotates after every structural change so that sibling subtrees never differ
//!   in height by more than one level.
//! - [`splay::Tree`] keeps no invariant at all and instead moves every key it touches to the
//!   root, which gives amortized `O(lg N)` operations.
//!
//! All of them implement [`TreeMap`] so callers can swap one for another.
//!
//! ```
//! use treemap::{avl, splay, unbalanced, TreeMap};
//!
//! fn count_words<M: TreeMap<&'static str, usize>>(map: &mut M, words: &[&'static str]) {
//!     for word in words {
//!         let seen = map.get(word).copied().unwrap_or(0);
//!         map.put(*word, seen + 1);
//!     }
//! }
//!
//! let words = ["to", "be", "or", "not", "to", "be"];
//!
//! let mut tree = avl::Tree::new();
//! count_words(&mut tree, &words);
//! assert_eq!(tree.to_string(), "{be=2, not=1, or=1, to=2}");
//!
//! let mut tree = splay::Tree::new();
//! count_words(&mut tree, &words);
//! assert_eq!(tree.to_string(), "{be=2, not=1, or=1, to=2}");
//!
//! let mut tree = unbalanced::Tree::new();
//! count_words(&mut tree, &words);
//! assert_eq!(tree.to_string(), "{be=2, not=1, or=1, to=2}");
//! ```
//!
//! ## Features
//!
//! - `tracing`: emits `trace` events for rotations and splays and a `debug` event when
//!   [`TreeMap::try_remove`] misses. Keys and values are never recorded. Run
//!   `cargo test --features tracing` to check the instrumented build.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
mod error;
mod node;
mod path;
pub mod splay;
pub mod unbalanced;


pub use error::{Error, Result};

/// The operations every tree in this crate supports.
///
/// Lookups take `&mut self` because a [`splay::Tree`] restructures itself on every access. The
/// other trees also offer a `find(&self, ..)` method for when that matters.
pub trait TreeMap<K, V>
where
    K: Ord,
{
    /// Associates `value` with `key`, returning the value previously stored at `key` if there
    /// was one.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Returns the value stored at `key`. A missing key is not an error.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Removes `key` from the map and returns its value. Returns `None` and leaves the map
    /// untouched when `key` isn't present.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// The number of keys stored.
    fn len(&self) -> usize;

    /// Whether no keys are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `key` is stored.
    fn contains_key(&mut self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Like [`remove`][TreeMap::remove] but treats a missing key as an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::{unbalanced::Tree, Error, TreeMap};
    ///
    /// let mut tree = Tree::new();
    /// tree.put(1, "one");
    ///
    /// assert_eq!(tree.try_remove(&1), Ok("one"));
    /// assert_eq!(tree.try_remove(&1), Err(Error::KeyNotFound));
    /// ```
    fn try_remove(&mut self, key: &K) -> Result<V> {
        let removed = self.remove(key);
        if removed.is_none() {
            #[cfg(feature = "tracing")]
            tracing::debug!(len = self.len(), "strict removal of a missing key");
        }
        removed.ok_or(Error::KeyNotFound)
    }
}
