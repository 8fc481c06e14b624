//! An ordered map stored in an unbalanced Binary Search Tree. Every `Node` exclusively owns its
//! children through a `Box` so there are no parent pointers, no reference counting and no
//! `unsafe`.
//!
//! # Examples
//!
//! ```
//! use bst_map::{Error, OrderedMap};
//!
//! let mut map = OrderedMap::new();
//!
//! // Nothing in here yet.
//! assert_eq!(map.find(&1), Err(Error::NotFound));
//!
//! map.insert(1, 2);
//! assert_eq!(map.find(&1), Ok(&2));
//!
//! // Inserting a new value for the same key overwrites the value.
//! map.insert(1, 3);
//! assert_eq!(map.find(&1), Ok(&3));
//! assert_eq!(map.len(), 1);
//!
//! // Erasing a key returns its value.
//! assert_eq!(map.erase(&1), Some(3));
//! assert!(map.is_empty());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use compare::{Compare, Natural};
use tracing::trace;

use crate::error::{Error, Result};

type Link<K, V> = Option<Box<Node<K, V>>>;

/// An ordered map backed by a Binary Search Tree that is never rebalanced.
///
/// Keys are ordered by the comparator `C`, which defaults to the keys' [`Ord`] implementation.
/// Two keys are considered equal when the comparator orders neither one before the other.
///
/// Inserting keys in sorted order turns the tree into a chain, making every operation `O(N)`.
/// None of the operations recurse over the tree's height so such chains can't overflow the stack.
pub struct OrderedMap<K, V, C = Natural<K>> {
    root: Link<K, V>,
    len: usize,
    cmp: C,
}

struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn new_boxed(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            left: None,
            right: None,
        })
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Ord,
{
    /// Generate a new, empty map ordered by the keys' [`Ord`] implementation.
    pub fn new() -> Self {
        Self::with_cmp(compare::natural())
    }
}

impl<K, V, C> Default for OrderedMap<K, V, C>
where
    C: Default,
{
    fn default() -> Self {
        Self::with_cmp(C::default())
    }
}

impl<K, V, C> Drop for OrderedMap<K, V, C> {
    fn drop(&mut self) {
        release(self.root.take());
    }
}

impl<K, V, C> Clone for OrderedMap<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: clone_link(&self.root),
            len: self.len,
            cmp: self.cmp.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        release(self.root.take());
        self.root = clone_link(&source.root);
        self.len = source.len;
        self.cmp.clone_from(&source.cmp);
    }
}

impl<K, V, C> fmt::Debug for OrderedMap<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = f.debug_map();
        let mut stack = Vec::new();
        let mut next = self.root.as_deref();
        loop {
            while let Some(node) = next {
                stack.push(node);
                next = node.left.as_deref();
            }
            let Some(node) = stack.pop() else {
                break;
            };
            entries.entry(&node.key, &node.value);
            next = node.right.as_deref();
        }
        entries.finish()
    }
}

impl<K, V, C> OrderedMap<K, V, C> {
    /// Generate a new, empty map ordered by `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::OrderedMap;
    /// use compare::{natural, Compare};
    ///
    /// let mut map = OrderedMap::with_cmp(natural().rev());
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    ///
    /// assert_eq!(map.min(), Ok((&2, &"b")));
    /// assert_eq!(map.max(), Ok((&1, &"a")));
    /// ```
    pub fn with_cmp(cmp: C) -> Self {
        Self {
            root: None,
            len: 0,
            cmp,
        }
    }

    /// The comparator deciding the order of this map's keys.
    pub fn cmp(&self) -> &C {
        &self.cmp
    }

    /// The number of entries in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Same as [`len`][Self::len].
    pub fn size(&self) -> usize {
        self.len
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every entry from the map. Does nothing on an empty map.
    pub fn clear(&mut self) {
        let released = release(self.root.take());
        self.len = 0;
        trace!(released, "cleared map");
    }

    /// Moves every entry into a new map, leaving this one empty but still usable with the same
    /// comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, 2);
    ///
    /// let moved = map.take();
    /// assert!(map.is_empty());
    /// assert_eq!(moved.find(&1), Ok(&2));
    /// ```
    pub fn take(&mut self) -> Self
    where
        C: Clone,
    {
        Self {
            root: self.root.take(),
            len: mem::take(&mut self.len),
            cmp: self.cmp.clone(),
        }
    }

    /// The entry stored at the root of the tree.
    pub fn root(&self) -> Result<(&K, &V)> {
        self.root_node()
            .map(|root| root.pair())
            .ok_or(Error::EmptyContainer)
    }

    /// The entry with the smallest key, found by walking left from the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::{Error, OrderedMap};
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.min(), Err(Error::EmptyContainer));
    ///
    /// map.insert(2, 'b');
    /// map.insert(1, 'a');
    /// assert_eq!(map.min(), Ok((&1, &'a')));
    /// ```
    pub fn min(&self) -> Result<(&K, &V)> {
        let mut node = self.root.as_deref().ok_or(Error::EmptyContainer)?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Ok((&node.key, &node.value))
    }

    /// The entry with the largest key, found by walking right from the root.
    pub fn max(&self) -> Result<(&K, &V)> {
        let mut node = self.root.as_deref().ok_or(Error::EmptyContainer)?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Ok((&node.key, &node.value))
    }

    /// A read-only handle to the root of the tree, for code that wants to walk the tree's shape
    /// (e.g. the printers in [`crate::print`]). `None` when the map is empty.
    pub fn root_node(&self) -> Option<NodeRef<'_, K, V>> {
        self.root.as_deref().map(|node| NodeRef { node })
    }
}

impl<K, V, C> OrderedMap<K, V, C>
where
    C: Compare<K>,
{
    /// Inserts the given value into the map stored at the given key. Inserting a new value for an
    /// existing key overwrites its value (the stored key is kept) and returns the old value.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    ///
    /// assert_eq!(map.insert(1, 2), None);
    /// assert_eq!(map.insert(1, 3), Some(2));
    /// assert_eq!(map.find(&1), Ok(&3));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let slot = descend(&mut self.root, &self.cmp, &key);
        match slot {
            Some(node) => {
                trace!(len = self.len, "overwrote value of existing key");
                Some(mem::replace(&mut node.value, value))
            }
            None => {
                *slot = Some(Node::new_boxed(key, value));
                self.len += 1;
                trace!(len = self.len, "inserted new leaf");
                None
            }
        }
    }

    /// Same as [`insert`][Self::insert] but takes the entry as a pair.
    pub fn insert_pair(&mut self, (key, value): (K, V)) -> Option<V> {
        self.insert(key, value)
    }

    /// Erases the entry with the given key and returns its value. If the map does not contain the
    /// key, nothing happens.
    ///
    /// A node with two children takes over the entry of its in-order successor (the smallest node
    /// of its right subtree) and the successor's node is removed instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(5, "a");
    /// map.insert(3, "b");
    /// map.insert(8, "c");
    ///
    /// assert_eq!(map.erase(&5), Some("a"));
    /// assert_eq!(map.root(), Ok((&8, &"c")));
    /// assert_eq!(map.erase(&5), None);
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn erase(&mut self, key: &K) -> Option<V> {
        let slot = descend(&mut self.root, &self.cmp, key);
        let Some(node) = slot.as_mut() else {
            trace!(len = self.len, "erase found no entry");
            return None;
        };

        let removed = match (node.left.is_some(), node.right.is_some()) {
            (true, true) => {
                let mut successor = pop_min(&mut node.right)?;
                mem::swap(&mut node.key, &mut successor.key);
                mem::swap(&mut node.value, &mut successor.value);
                trace!(len = self.len - 1, "erased node with two children");
                successor
            }
            (false, false) => {
                trace!(len = self.len - 1, "erased leaf");
                slot.take()?
            }
            _ => {
                let mut removed = slot.take()?;
                *slot = removed.left.take().or_else(|| removed.right.take());
                trace!(len = self.len - 1, "erased node with one child");
                removed
            }
        };

        self.len -= 1;
        Some(removed.value)
    }

    /// Finds the value associated with the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::{Error, OrderedMap};
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, 2);
    ///
    /// assert_eq!(map.find(&1), Ok(&2));
    /// assert_eq!(map.find(&42), Err(Error::NotFound));
    /// ```
    pub fn find(&self, key: &K) -> Result<&V> {
        self.search(key)
            .map(|node| &node.value)
            .ok_or(Error::NotFound)
    }

    /// Finds the value associated with the given key so it can be modified in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("apples", 1);
    ///
    /// *map.find_mut(&"apples").unwrap() += 1;
    /// assert_eq!(map.find(&"apples"), Ok(&2));
    /// ```
    pub fn find_mut(&mut self, key: &K) -> Result<&mut V> {
        descend(&mut self.root, &self.cmp, key)
            .as_mut()
            .map(|node| &mut node.value)
            .ok_or(Error::NotFound)
    }

    /// Whether the map contains the given key.
    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    fn search(&self, key: &K) -> Option<&Node<K, V>> {
        let mut link = &self.root;
        while let Some(node) = link {
            match self.cmp.compare(key, &node.key) {
                Ordering::Less => link = &node.left,
                Ordering::Equal => return Some(node),
                Ordering::Greater => link = &node.right,
            }
        }
        None
    }
}

/// Walks down from `link` and returns the link that holds `key`, or the empty link where `key`
/// would be inserted.
fn descend<'a, K, V, C>(mut link: &'a mut Link<K, V>, cmp: &C, key: &K) -> &'a mut Link<K, V>
where
    C: Compare<K>,
{
    loop {
        let ordering = match link.as_deref() {
            Some(node) => cmp.compare(key, &node.key),
            None => return link,
        };
        // Moving `link` into the tuple lets the found link be returned as-is.
        link = match (ordering, link) {
            (Ordering::Less, Some(node)) => &mut node.left,
            (Ordering::Greater, Some(node)) => &mut node.right,
            (_, found) => return found,
        };
    }
}

/// Detaches the node with the smallest key from the subtree at `link`. That node has no left
/// child so its right child takes its place.
fn pop_min<K, V>(mut link: &mut Link<K, V>) -> Option<Box<Node<K, V>>> {
    while link.as_ref()?.left.is_some() {
        link = &mut link.as_mut()?.left;
    }
    let mut min = link.take()?;
    *link = min.right.take();
    Some(min)
}

/// Frees every node of a subtree and returns how many there were. Children are detached before
/// their parent is dropped so dropping never recurses.
fn release<K, V>(root: Link<K, V>) -> usize {
    let mut stack: Vec<Box<Node<K, V>>> = root.into_iter().collect();
    let mut released = 0;
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
        released += 1;
    }
    released
}

/// Deep copies a subtree in pre-order: each node is built before its left and then its right
/// subtree.
fn clone_link<K, V>(source: &Link<K, V>) -> Link<K, V>
where
    K: Clone,
    V: Clone,
{
    let mut root: Link<K, V> = None;
    {
        let mut pending = vec![(source, &mut root)];
        while let Some((source, target)) = pending.pop() {
            if let Some(node) = source {
                let copy = target.insert(Node::new_boxed(node.key.clone(), node.value.clone()));
                let Node { left, right, .. } = &mut **copy;
                pending.push((&node.right, right));
                pending.push((&node.left, left));
            }
        }
    }
    root
}

/// A read-only view of one node of an [`OrderedMap`]. It can't be used to change the map, only to
/// inspect an entry and step to its children.
///
/// # Examples
///
/// ```
/// use bst_map::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert(2, "b");
/// map.insert(1, "a");
///
/// let root = map.root_node().unwrap();
/// assert_eq!(root.pair(), (&2, &"b"));
/// assert_eq!(root.left().map(|n| *n.key()), Some(1));
/// assert!(root.right().is_none());
/// ```
pub struct NodeRef<'a, K, V> {
    node: &'a Node<K, V>,
}

impl<'a, K, V> Clone for NodeRef<'a, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, K, V> Copy for NodeRef<'a, K, V> {}

impl<'a, K, V> fmt::Debug for NodeRef<'a, K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("value", self.value())
            .finish()
    }
}

impl<'a, K, V> NodeRef<'a, K, V> {
    /// The key stored in this node.
    pub fn key(&self) -> &'a K {
        &self.node.key
    }

    /// The value stored in this node.
    pub fn value(&self) -> &'a V {
        &self.node.value
    }

    /// The key and value stored in this node.
    pub fn pair(&self) -> (&'a K, &'a V) {
        (&self.node.key, &self.node.value)
    }

    /// The root of the subtree holding smaller keys.
    pub fn left(&self) -> Option<NodeRef<'a, K, V>> {
        self.node.left.as_deref().map(|node| NodeRef { node })
    }

    /// The root of the subtree holding larger keys.
    pub fn right(&self) -> Option<NodeRef<'a, K, V>> {
        self.node.right.as_deref().map(|node| NodeRef { node })
    }
}

#[cfg(test)]
impl<K, V, C> OrderedMap<K, V, C>
where
    C: Compare<K>,
{
    /// Asserts the BST ordering of every node and that `len` counts every node.
    pub(crate) fn assert_invariants(&self) {
        let mut count = 0;
        let mut stack: Vec<(&Node<K, V>, Option<&K>, Option<&K>)> = Vec::new();
        stack.extend(self.root.as_deref().map(|root| (root, None, None)));
        while let Some((node, lower, upper)) = stack.pop() {
            count += 1;
            if let Some(lower) = lower {
                assert_eq!(self.cmp.compare(lower, &node.key), Ordering::Less);
            }
            if let Some(upper) = upper {
                assert_eq!(self.cmp.compare(&node.key, upper), Ordering::Less);
            }
            if let Some(left) = node.left.as_deref() {
                stack.push((left, lower, Some(&node.key)));
            }
            if let Some(right) = node.right.as_deref() {
                stack.push((right, Some(&node.key), upper));
            }
        }
        assert_eq!(count, self.len);
        assert_eq!(self.root.is_none(), self.len == 0);
    }

    /// The number of nodes on the longest path from the root to a leaf.
    pub(crate) fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node<K, V>, usize)> = Vec::new();
        stack.extend(self.root.as_deref().map(|root| (root, 1)));
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|left| (left, depth + 1)));
            stack.extend(node.right.as_deref().map(|right| (right, depth + 1)));
        }
        height
    }
}
