//! This crate exposes an ordered map backed by a plain, unbalanced Binary Search Tree (BST).
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key, the value
//! associated with that key, and sometimes has child `Node`s. The most
//! important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for a key takes `O(height)` (where `height` is the longest path
//! from the root `Node` to a leaf `Node`). The map in this crate does no
//! rebalancing, so inserting keys in sorted order produces a tree that is
//! really a linked list with `O(N)` height. That is expected behavior here.
//!
//! "Less" and "greater" are decided by a comparator (see [`compare::Compare`]),
//! which defaults to the keys' [`Ord`] implementation.
//!
//! # Examples
//!
//! ```
//! use bst_map::{Error, OrderedMap};
//!
//! let mut map = OrderedMap::new();
//! map.insert(5, "a");
//! map.insert(3, "b");
//! map.insert(8, "c");
//!
//! assert_eq!(map.len(), 3);
//! assert_eq!(map.min(), Ok((&3, &"b")));
//! assert_eq!(map.max(), Ok((&8, &"c")));
//!
//! map.erase(&5);
//! assert_eq!(map.root(), Ok((&8, &"c")));
//! assert_eq!(map.find(&5), Err(Error::NotFound));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod map;
pub mod print;


pub use error::{Error, Result};
pub use map::{NodeRef, OrderedMap};
