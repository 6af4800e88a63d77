//! This crate exposes a self-balancing Binary Search Tree (an AVL tree)
//! storing an ordered set of unique values.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value and will sometimes have child `Node`s. The most
//! important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The benefits of these invariants are many. For instance, searching for
//! values in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). BSTs also naturally support
//! sorted iteration by visiting the left subtree, then the subtree root, then
//! the right subtree.
//!
//! ## AVL balance
//!
//! Nothing in the two invariants above stops the tree from degenerating into
//! a linked list - inserting `1, 2, 3, 4, 5` in order hangs every node off
//! the right of its parent and searches become `O(N)`. An AVL tree adds a
//! third invariant:
//!
//! 3. For every `Node`, the heights of its left and right subtrees differ by
//!    at most one.
//!
//! The tree restores this invariant after every insertion and removal by
//! rotating nodes on the path it just walked, which keeps the height (and so
//! the cost of every operation) at `O(lg N)`.
//!
//! The tree here is a *set*: each value appears at most once and inserting a
//! duplicate is reported as an [`Error`] rather than silently ignored.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod tree;


pub use error::Error;
pub use tree::Tree;
