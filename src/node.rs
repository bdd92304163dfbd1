//! The node every tree in this crate is built from, plus the pieces that only care about a
//! tree's shape: in-order iteration, rendering, and teardown.

use std::fmt;

/// An owned subtree. `None` is the empty subtree at the bottom of the tree.
pub(crate) type Link<K, V, M = ()> = Option<Box<Node<K, V, M>>>;

/// A `Node` has a key that is used for searching/sorting and a value that is associated with
/// that key. `M` is whatever bookkeeping the tree's balancing scheme keeps per node (nothing for
/// unbalanced and splay trees, a height for AVL trees).
pub(crate) struct Node<K, V, M = ()> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V, M>,
    pub(crate) right: Link<K, V, M>,
    pub(crate) meta: M,
}

/// Which child of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl<K, V, M> Node<K, V, M>
where
    M: Default,
{
    /// Construct a new childless `Node` with the given `key` and `value`.
    pub(crate) fn new_boxed(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
            meta: M::default(),
        })
    }
}

impl<K, V, M> Node<K, V, M> {
    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Link<K, V, M> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// In debug builds, asserts that this node's direct children are on the correct side of it.
    pub(crate) fn debug_assert_ordered(&self)
    where
        K: Ord,
    {
        if cfg!(debug_assertions) {
            if let Some(left) = &self.left {
                assert!(left.key < self.key);
            }
            if let Some(right) = &self.right {
                assert!(right.key > self.key);
            }
        }
    }
}

/// Visits a tree in key order without touching its shape. Uses an explicit stack so even
/// degenerate trees can be walked.
pub(crate) struct Iter<'a, K, V, M> {
    stack: Vec<&'a Node<K, V, M>>,
    remaining: usize,
}

impl<'a, K, V, M> Iter<'a, K, V, M> {
    pub(crate) fn new(root: &'a Link<K, V, M>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root.as_deref());
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K, V, M>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, K, V, M> Iterator for Iter<'a, K, V, M> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, M> ExactSizeIterator for Iter<'a, K, V, M> {}

/// Writes `entries` as `{k1=v1, k2=v2}`. An empty sequence is written as `{}`.
pub(crate) fn fmt_entries<'a, K, V>(
    entries: impl Iterator<Item = (&'a K, &'a V)>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result
where
    K: fmt::Display + 'a,
    V: fmt::Display + 'a,
{
    f.write_str("{")?;
    for (i, (key, value)) in entries.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}={}", key, value)?;
    }
    f.write_str("}")
}

/// Drops a whole tree one node at a time. The default recursive drop of nested `Box`es can
/// overflow the stack on a tree that has degenerated into a list.
pub(crate) fn dismantle<K, V, M>(root: Link<K, V, M>) {
    let mut stack: Vec<Box<Node<K, V, M>>> = root.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

/// Copies a whole tree one node at a time, keeping its shape. The derived clone of nested
/// `Box`es recurses just like the default drop.
pub(crate) fn clone_tree<K, V, M>(root: &Link<K, V, M>) -> Link<K, V, M>
where
    K: Clone,
    V: Clone,
    M: Clone,
{
    // Childless copies, each with the index of its parent's copy and which child it is.
    let mut copies: Vec<(Box<Node<K, V, M>>, Option<(usize, Side)>)> = Vec::new();
    let mut stack: Vec<_> = root.as_deref().map(|n| (n, None)).into_iter().collect();
    while let Some((node, parent)) = stack.pop() {
        let index = copies.len();
        let copy = Box::new(Node {
            key: node.key.clone(),
            value: node.value.clone(),
            left: None,
            right: None,
            meta: node.meta.clone(),
        });
        copies.push((copy, parent));
        stack.extend(node.left.as_deref().map(|n| (n, Some((index, Side::Left)))));
        stack.extend(node.right.as_deref().map(|n| (n, Some((index, Side::Right)))));
    }

    // A copy always comes after its parent's, so popping hands each subtree to a parent that is
    // still in `copies`. The root is first in and last out.
    while let Some((copy, parent)) = copies.pop() {
        match parent {
            None => return Some(copy),
            Some((index, side)) => *copies[index].0.child_mut(side) = Some(copy),
        }
    }

    None
}
