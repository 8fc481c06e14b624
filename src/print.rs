//! Text dumps of an [`OrderedMap`]'s tree shape, for debugging and visualization.
//!
//! These only use the map's public read-only surface ([`OrderedMap::root_node`] and
//! [`NodeRef`]) and write to any [`io::Write`] sink.
//!
//! # Examples
//!
//! ```
//! use bst_map::{print, OrderedMap};
//!
//! let mut map = OrderedMap::new();
//! map.insert(5, "a");
//! map.insert(3, "b");
//! map.insert(8, "c");
//!
//! let mut out = Vec::new();
//! print::print_tree(&map, &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "\t(8, c)\n(5, a)\n\t(3, b)\n");
//! ```

use std::collections::hash_map::DefaultHasher;
use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::io::{self, Write};

use crate::map::{NodeRef, OrderedMap};

/// Prints the tree breadth first, one line per level. Every entry is printed as `(key, value) `
/// and every missing node as `null `. Missing nodes still take up their children's slots on the
/// following levels so each line is twice as long as the previous one. Printing stops before the
/// first level that would be all `null`s. An empty map prints nothing.
pub fn print_level_by_level<K, V, C, W>(map: &OrderedMap<K, V, C>, out: &mut W) -> io::Result<()>
where
    K: Display,
    V: Display,
    W: Write + ?Sized,
{
    let Some(root) = map.root_node() else {
        return Ok(());
    };

    let mut level = vec![Some(root)];
    loop {
        let mut next = Vec::with_capacity(level.len() * 2);
        for slot in &level {
            match slot {
                Some(node) => {
                    write!(out, "({}, {}) ", node.key(), node.value())?;
                    next.push(node.left());
                    next.push(node.right());
                }
                None => {
                    write!(out, "null ")?;
                    next.push(None);
                    next.push(None);
                }
            }
        }
        writeln!(out)?;

        if next.iter().all(Option::is_none) {
            return Ok(());
        }
        level = next;
    }
}

/// Prints the tree sideways: the right subtree, then the entry indented by one tab per level of
/// depth, then the left subtree. Reading the output with your head tilted left shows the tree.
pub fn print_tree<K, V, C, W>(map: &OrderedMap<K, V, C>, out: &mut W) -> io::Result<()>
where
    K: Display,
    V: Display,
    W: Write + ?Sized,
{
    match map.root_node() {
        Some(root) => print_subtree(root, out, 0),
        None => Ok(()),
    }
}

fn print_subtree<K, V, W>(node: NodeRef<'_, K, V>, out: &mut W, depth: usize) -> io::Result<()>
where
    K: Display,
    V: Display,
    W: Write + ?Sized,
{
    if let Some(right) = node.right() {
        print_subtree(right, out, depth + 1)?;
    }
    writeln!(out, "{}({}, {})", "\t".repeat(depth), node.key(), node.value())?;
    if let Some(left) = node.left() {
        print_subtree(left, out, depth + 1)?;
    }
    Ok(())
}

/// Writes the tree as a [Graphviz] `digraph`. Each node gets a declaration labeled
/// `key [value]` followed by the edge from its parent (the root gets a bare statement instead).
/// Nodes are visited in pre-order and identified by a hash of their key.
///
/// [Graphviz]: https://graphviz.org/doc/info/lang.html
pub fn viz_tree<K, V, C, W>(map: &OrderedMap<K, V, C>, out: &mut W) -> io::Result<()>
where
    K: Display + Hash,
    V: Display,
    W: Write + ?Sized,
{
    writeln!(out, "digraph Tree {{")?;

    let mut stack: Vec<(NodeRef<'_, K, V>, Option<u32>)> = Vec::new();
    stack.extend(map.root_node().map(|root| (root, None)));
    while let Some((node, parent)) = stack.pop() {
        let id = node_id(node.key());
        writeln!(out, "\tnode_{}[label=\"{} [{}]\"];", id, node.key(), node.value())?;
        match parent {
            Some(parent) => writeln!(out, "\tnode_{} -> node_{};", parent, id)?,
            None => writeln!(out, "\tnode_{};", id)?,
        }

        // Right first so the left subtree is written first.
        stack.extend(node.right().map(|right| (right, Some(id))));
        stack.extend(node.left().map(|left| (left, Some(id))));
    }

    writeln!(out, "}}")
}

/// The graph identifier of the node holding `key`.
pub fn node_id<K>(key: &K) -> u32
where
    K: Hash + ?Sized,
{
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish() as u32
}
