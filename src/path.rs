//! Insertion and removal shared by [`unbalanced::Tree`][crate::unbalanced::Tree] and
//! [`avl::Tree`][crate::avl::Tree].
//!
//! Each function takes ownership of a tree and walks down it, detaching every node it passes and
//! pushing it onto a [`Path`]. Once the change is made at the bottom the path is zipped back up:
//! each parent gets its child back and is passed through [`Balance::balance`], which is where the
//! two trees differ.
//!
//! The path lives on the heap, so a tree that has degenerated into a list costs memory, not stack.

use std::cmp::Ordering;
use std::mem;

use crate::node::{Link, Node, Side};

/// The hook run on each node along the path of a structural change, bottom-up.
pub(crate) trait Balance {
    /// Per-node bookkeeping the strategy needs.
    type Meta: Default;

    /// Restores the strategy's invariant at `node`, whose children already satisfy it, and
    /// returns the (possibly different) root of the subtree.
    fn balance<K, V>(node: Box<Node<K, V, Self::Meta>>) -> Box<Node<K, V, Self::Meta>>;
}

/// Leaves every subtree exactly as it is.
pub(crate) struct Unbalanced;

impl Balance for Unbalanced {
    type Meta = ();

    #[inline]
    fn balance<K, V>(node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        node
    }
}

/// The nodes walked through on the way down, each missing the child the walk continued into.
struct Path<K, V, M> {
    nodes: Vec<(Box<Node<K, V, M>>, Side)>,
}

impl<K, V, M> Path<K, V, M>
where
    K: Ord,
{
    fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Detaches the child of `node` on `side`, remembers `node`, and returns the child.
    fn descend(&mut self, mut node: Box<Node<K, V, M>>, side: Side) -> Link<K, V, M> {
        let child = node.child_mut(side).take();
        self.nodes.push((node, side));
        child
    }

    /// Hangs `subtree` back under the deepest remembered node and balances each node on the way
    /// back to the root, which is returned.
    fn zip<B>(mut self, mut subtree: Box<Node<K, V, M>>) -> Box<Node<K, V, M>>
    where
        B: Balance<Meta = M>,
    {
        while let Some((mut parent, side)) = self.nodes.pop() {
            *parent.child_mut(side) = Some(subtree);
            parent.debug_assert_ordered();
            subtree = B::balance(parent);
        }
        subtree
    }

    /// Like [`Path::zip`] but the subtree at the bottom may be empty.
    fn zip_link<B>(mut self, subtree: Link<K, V, M>) -> Link<K, V, M>
    where
        B: Balance<Meta = M>,
    {
        match subtree {
            Some(subtree) => Some(self.zip::<B>(subtree)),
            // The deepest node's child on the path was already taken.
            None => {
                let (parent, _) = self.nodes.pop()?;
                let parent = B::balance(parent);
                Some(self.zip::<B>(parent))
            }
        }
    }
}

/// Walks down from `link` comparing keys until a match or the bottom of the tree.
pub(crate) fn find<'a, K, V, M>(mut link: &'a Link<K, V, M>, key: &K) -> Option<&'a V>
where
    K: Ord,
{
    while let Some(node) = link {
        match key.cmp(&node.key) {
            Ordering::Less => link = &node.left,
            Ordering::Equal => return Some(&node.value),
            Ordering::Greater => link = &node.right,
        }
    }

    None
}

/// Inserts `key` and `value` into the tree, returning its new root and the value that used to be
/// stored at `key` (if any). Overwriting a value doesn't change the tree's shape.
pub(crate) fn insert<B, K, V>(
    root: Link<K, V, B::Meta>,
    key: K,
    value: V,
) -> (Box<Node<K, V, B::Meta>>, Option<V>)
where
    B: Balance,
    K: Ord,
{
    let mut path = Path::new();
    let mut link = root;

    let (subtree, old_value) = loop {
        let Some(mut node) = link else {
            break (Node::new_boxed(key, value), None);
        };
        link = match key.cmp(&node.key) {
            Ordering::Less => path.descend(node, Side::Left),
            Ordering::Greater => path.descend(node, Side::Right),
            Ordering::Equal => {
                let old_value = mem::replace(&mut node.value, value);
                break (node, Some(old_value));
            }
        };
    };

    (path.zip::<B>(subtree), old_value)
}

/// Removes `key` from the tree, returning its new root and the removed value. If `key` isn't in
/// the tree the returned root has the same shape as `root`.
///
/// A node with two children takes the key and value of its successor (the smallest node in its
/// right subtree), which is detached from the right subtree in its place.
pub(crate) fn remove<B, K, V>(
    root: Link<K, V, B::Meta>,
    key: &K,
) -> (Link<K, V, B::Meta>, Option<V>)
where
    B: Balance,
    K: Ord,
{
    let mut path = Path::new();
    let mut link = root;

    let (subtree, removed) = loop {
        let Some(mut node) = link else {
            break (None, None);
        };
        link = match key.cmp(&node.key) {
            Ordering::Less => path.descend(node, Side::Left),
            Ordering::Greater => path.descend(node, Side::Right),
            Ordering::Equal => {
                break match (node.left.take(), node.right.take()) {
                    (None, None) => (None, Some(node.value)),
                    // The lone child already satisfies the invariant; the parent is rebalanced
                    // around it.
                    (Some(child), None) | (None, Some(child)) => (Some(child), Some(node.value)),
                    (left @ Some(_), Some(right)) => {
                        let (right, successor) = remove_min::<B, _, _>(right);
                        let successor = *successor;

                        node.key = successor.key;
                        let removed = mem::replace(&mut node.value, successor.value);
                        node.left = left;
                        node.right = right;
                        node.debug_assert_ordered();

                        (Some(B::balance(node)), Some(removed))
                    }
                };
            }
        };
    };

    (path.zip_link::<B>(subtree), removed)
}

/// Detaches the smallest node of the subtree rooted at `node`. Returns the new root of the
/// subtree and the detached node, which has no children.
fn remove_min<B, K, V>(
    mut node: Box<Node<K, V, B::Meta>>,
) -> (Link<K, V, B::Meta>, Box<Node<K, V, B::Meta>>)
where
    B: Balance,
    K: Ord,
{
    let mut path = Path::new();
    while let Some(left) = node.left.take() {
        path.nodes.push((node, Side::Left));
        node = left;
    }

    let right = node.right.take();
    (path.zip_link::<B>(right), node)
}
