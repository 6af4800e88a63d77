//! A mutable, self-balancing BST storing an ordered set of unique values.
//!
//! The tree *is* its root node - there is no separate wrapper type. An empty
//! tree is a node with no payload, and every subtree is itself a complete
//! tree. Position in the tree is discovered by comparison alone on each
//! call; there are no parent pointers.
//!
//! # Examples
//!
//! ```
//! use avl::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.includes(&1));
//!
//! tree.insert(1)?;
//! assert!(tree.includes(&1));
//!
//! // The tree is a set - inserting the same value again fails.
//! assert!(tree.insert(1).is_err());
//!
//! // Removing the value leaves the tree empty again.
//! tree.remove(&1)?;
//! assert!(!tree.includes(&1));
//! assert!(tree.is_empty());
//! # Ok::<(), avl::Error>(())
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use crate::error::Error;

/// A self-balancing Binary Search Tree (specifically, an AVL tree) storing
/// each value at most once, in sorted order.
///
/// Every operation runs in `O(lg N)` because the tree rebalances itself on
/// every ancestor of a mutation on the way back up the recursion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree<T> {
    /// The value stored at this node. `None` only for the structurally
    /// empty tree, which by invariant also has no children.
    payload: Option<T>,
    left: Option<Box<Tree<T>>>,
    right: Option<Box<Tree<T>>>,

    /// How many levels are in the subtree rooted at this node. An empty
    /// tree has a height of 0 and a node with no children a height of 1.
    height: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            payload: None,
            left: None,
            right: None,
            height: 0,
        }
    }

    /// Whether the tree holds no values at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert!(tree.is_empty());
    ///
    /// tree.insert(1)?;
    /// assert!(!tree.is_empty());
    /// # Ok::<(), avl::Error>(())
    /// ```
    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }

    /// Whether this node has no children. An empty tree is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// The number of levels in the tree: 0 for an empty tree, 1 for a
    /// single value. This is cached, not recomputed, so it's `O(1)`.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The number of values in the tree. This walks the whole tree, so
    /// it's `O(N)`.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Removes every value from the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1)?;
    /// tree.insert(2)?;
    ///
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// # Ok::<(), avl::Error>(())
    /// ```
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Visits the values of the tree in ascending order.
    ///
    /// The iterator borrows the tree, so the tree cannot be mutated while
    /// iteration is in progress.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for x in [3, 1, 2] {
    ///     tree.insert(x)?;
    /// }
    ///
    /// let sorted: Vec<i32> = tree.iter().copied().collect();
    /// assert_eq!(sorted, vec![1, 2, 3]);
    /// # Ok::<(), avl::Error>(())
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter { stack: Vec::new() };
        iter.descend(self);
        iter
    }

    fn left_height(&self) -> usize {
        self.left.as_ref().map_or(0, |n| n.height)
    }

    fn right_height(&self) -> usize {
        self.right.as_ref().map_or(0, |n| n.height)
    }

    /// Adjusts the cached height of `self` to be the max of its children's
    /// heights + 1, or 0 if the node is empty.
    fn fix_height(&mut self) {
        self.height = if self.payload.is_some() {
            self.left_height().max(self.right_height()) + 1
        } else {
            0
        };
    }

    /// The difference in height between the right and left subtrees. See
    /// [the Wikipedia page][wiki] for more details.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Balance_factor
    fn balance_factor(&self) -> isize {
        self.right_height() as isize - self.left_height() as isize
    }

    /// Rotates the right child up to become this node. To maintain the BST
    /// order, the right child's left subtree becomes this node's new right
    /// subtree and this node becomes the promoted node's left child.
    ///
    /// ## Panics
    ///
    /// When called on a node without a right child. `rebalance` only
    /// rotates left when the right subtree is two levels taller than the
    /// left, so the right child exists on every call site.
    ///
    /// # Diagram
    ///
    /// ```text
    ///  old_root (i.e. "self")         new_root
    ///   /     \                       /     \
    ///  x     new_root    rotate -> old_root  z
    ///         /  \                  /  \
    ///        y    z                x    y
    /// ```
    fn rotate_left(&mut self) {
        let mut pivot = self.right.take().expect("Rotate left => right child");
        self.right = pivot.left.take();
        self.fix_height();

        // `self` becomes the promoted node; the box now holds the old root
        // (with its adjusted right subtree) and slots in as the left child.
        mem::swap(self, &mut *pivot);
        self.left = Some(pivot);
        self.fix_height();
    }

    /// Rotates the left child up to become this node. Mirror image of
    /// [`rotate_left`][Self::rotate_left].
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    fn rotate_right(&mut self) {
        let mut pivot = self.left.take().expect("Rotate right => left child");
        self.left = pivot.right.take();
        self.fix_height();

        mem::swap(self, &mut *pivot);
        self.right = Some(pivot);
        self.fix_height();
    }

    /// Restores the AVL invariant at this node after a structural change in
    /// one of its subtrees. Every mutating operation calls this on each
    /// node it passed through, on the way back up the recursion.
    ///
    /// See <https://en.wikipedia.org/wiki/AVL_tree#Rebalancing> for
    /// terminology; the four cases below are the classic LL/LR/RL/RR ones.
    /// The "double rotation" cases are exactly when the heavy child leans
    /// toward the center.
    fn rebalance(&mut self) {
        self.fix_height();
        let balance = self.balance_factor();
        if balance < -1 {
            let left = self.left.as_mut().expect("Left-heavy => left child");
            if left.balance_factor() > 0 {
                left.rotate_left();
            }
            self.rotate_right();
        } else if balance > 1 {
            let right = self.right.as_mut().expect("Right-heavy => right child");
            if right.balance_factor() < 0 {
                right.rotate_right();
            }
            self.rotate_left();
        }

        // In debug builds, after balancing, assert that we've
        // restored/maintained the AVL invariant at this node.
        if cfg!(debug_assertions) {
            let left_height = self.left_height();
            let right_height = self.right_height();
            if self.payload.is_some() {
                assert_eq!(self.height, left_height.max(right_height) + 1);
            }
            assert!(left_height.abs_diff(right_height) <= 1);
        }
    }
}

impl<T> Tree<T>
where
    T: Ord,
{
    /// Inserts the given value into the tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateValue`] - and leaves the tree untouched -
    /// if the value is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::{Error, Tree};
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert_eq!(tree.insert(1), Ok(()));
    /// assert_eq!(tree.insert(1), Err(Error::DuplicateValue));
    /// assert!(tree.includes(&1));
    /// ```
    pub fn insert(&mut self, value: T) -> Result<(), Error> {
        match self.payload.as_ref() {
            None => self.payload = Some(value),
            Some(payload) => match value.cmp(payload) {
                Ordering::Equal => return Err(Error::DuplicateValue),
                Ordering::Less => {
                    self.left
                        .get_or_insert_with(|| Box::new(Self::new()))
                        .insert(value)?;
                }
                Ordering::Greater => {
                    self.right
                        .get_or_insert_with(|| Box::new(Self::new()))
                        .insert(value)?;
                }
            },
        }
        self.rebalance();
        Ok(())
    }

    /// Whether the given value is in the tree. Never fails and never
    /// mutates the tree - searching an empty tree simply returns `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1)?;
    ///
    /// assert!(tree.includes(&1));
    /// assert!(!tree.includes(&42));
    /// # Ok::<(), avl::Error>(())
    /// ```
    pub fn includes(&self, value: &T) -> bool {
        match self.payload.as_ref() {
            None => false,
            Some(payload) => match value.cmp(payload) {
                Ordering::Equal => true,
                Ordering::Less => self.left.as_ref().map_or(false, |n| n.includes(value)),
                Ordering::Greater => self.right.as_ref().map_or(false, |n| n.includes(value)),
            },
        }
    }

    /// Removes the given value from the tree.
    ///
    /// When the value sits on a node with children, the node's payload is
    /// refilled with its in-order successor (or predecessor, if there is no
    /// right subtree) so that the BST order is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueNotFound`] - and leaves the tree untouched -
    /// if the value is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::{Error, Tree};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1)?;
    ///
    /// assert_eq!(tree.remove(&1), Ok(()));
    /// assert_eq!(tree.remove(&1), Err(Error::ValueNotFound));
    /// # Ok::<(), avl::Error>(())
    /// ```
    pub fn remove(&mut self, value: &T) -> Result<(), Error> {
        let payload = self.payload.as_ref().ok_or(Error::ValueNotFound)?;
        match value.cmp(payload) {
            Ordering::Less => match self.left.as_mut() {
                Some(left) => {
                    left.remove(value)?;
                    if left.is_empty() {
                        self.left = None;
                    }
                }
                None => return Err(Error::ValueNotFound),
            },
            Ordering::Greater => match self.right.as_mut() {
                Some(right) => {
                    right.remove(value)?;
                    if right.is_empty() {
                        self.right = None;
                    }
                }
                None => return Err(Error::ValueNotFound),
            },
            Ordering::Equal => {
                if let Some(right) = self.right.as_mut() {
                    self.payload = Some(right.popleft()?);
                    if right.is_empty() {
                        self.right = None;
                    }
                } else if let Some(left) = self.left.as_mut() {
                    self.payload = Some(left.pop()?);
                    if left.is_empty() {
                        self.left = None;
                    }
                } else {
                    self.payload = None;
                }
            }
        }
        self.rebalance();
        Ok(())
    }

    /// The smallest value in the tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTree`] if the tree holds no values.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::{Error, Tree};
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.min(), Err(Error::EmptyTree));
    ///
    /// tree.insert(2)?;
    /// tree.insert(1)?;
    /// assert_eq!(tree.min(), Ok(&1));
    /// # Ok::<(), avl::Error>(())
    /// ```
    pub fn min(&self) -> Result<&T, Error> {
        match self.left.as_ref() {
            Some(left) => left.min(),
            None => self.payload.as_ref().ok_or(Error::EmptyTree),
        }
    }

    /// The largest value in the tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTree`] if the tree holds no values.
    pub fn max(&self) -> Result<&T, Error> {
        match self.right.as_ref() {
            Some(right) => right.max(),
            None => self.payload.as_ref().ok_or(Error::EmptyTree),
        }
    }

    /// Removes and returns the largest value in the tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTree`] if the tree holds no values.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for x in [2, 3, 1] {
    ///     tree.insert(x)?;
    /// }
    ///
    /// assert_eq!(tree.pop(), Ok(3));
    /// assert_eq!(tree.pop(), Ok(2));
    /// assert_eq!(tree.pop(), Ok(1));
    /// assert!(tree.pop().is_err());
    /// # Ok::<(), avl::Error>(())
    /// ```
    pub fn pop(&mut self) -> Result<T, Error> {
        let value = if let Some(right) = self.right.as_mut() {
            let value = right.pop()?;
            if right.is_empty() {
                self.right = None;
            }
            value
        } else {
            // This node holds the maximum. Pull the in-order predecessor up
            // from the left subtree to take its place, if there is one.
            let value = self.payload.take().ok_or(Error::EmptyTree)?;
            if let Some(left) = self.left.as_mut() {
                self.payload = Some(left.popleft()?);
                if left.is_empty() {
                    self.left = None;
                }
            }
            value
        };
        self.rebalance();
        Ok(value)
    }

    /// Removes and returns the smallest value in the tree. Mirror image of
    /// [`pop`][Self::pop].
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTree`] if the tree holds no values.
    pub fn popleft(&mut self) -> Result<T, Error> {
        let value = if let Some(left) = self.left.as_mut() {
            let value = left.popleft()?;
            if left.is_empty() {
                self.left = None;
            }
            value
        } else {
            let value = self.payload.take().ok_or(Error::EmptyTree)?;
            if let Some(right) = self.right.as_mut() {
                self.payload = Some(right.pop()?);
                if right.is_empty() {
                    self.right = None;
                }
            }
            value
        };
        self.rebalance();
        Ok(value)
    }
}

/// Renders the values in ascending order, parenthesized and
/// comma-delimited: `(1, 2, 3)`.
impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str(")")
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An in-order (ascending) iterator over the values of a [`Tree`].
///
/// Holds the chain of nodes whose left subtrees have been fully visited but
/// whose own value and right subtree have not.
pub struct Iter<'a, T> {
    stack: Vec<&'a Tree<T>>,
}

impl<'a, T> Iter<'a, T> {
    /// Pushes `tree` and its whole left spine onto the stack, so the
    /// smallest unvisited value ends up on top.
    fn descend(&mut self, mut tree: &'a Tree<T>) {
        loop {
            if tree.is_empty() {
                return;
            }
            self.stack.push(tree);
            match tree.left.as_deref() {
                Some(left) => tree = left,
                None => return,
            }
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(right) = node.right.as_deref() {
            self.descend(right);
        }
        // Only non-empty nodes are ever pushed, so this is always `Some`.
        node.payload.as_ref()
    }
}

#[cfg(test)]
impl<T: Ord> Tree<T> {
    /// Walks the whole tree asserting the BST order, the AVL balance, the
    /// cached heights, and that no empty node is attached as a child.
    fn assert_invariants(&self) {
        fn check<T: Ord>(tree: &Tree<T>, lower: Option<&T>, upper: Option<&T>) -> usize {
            let payload = match tree.payload.as_ref() {
                Some(payload) => payload,
                None => {
                    assert!(tree.left.is_none() && tree.right.is_none());
                    assert_eq!(tree.height, 0);
                    return 0;
                }
            };
            if let Some(lower) = lower {
                assert!(payload > lower);
            }
            if let Some(upper) = upper {
                assert!(payload < upper);
            }

            let left_height = tree.left.as_ref().map_or(0, |left| {
                assert!(!left.is_empty());
                check(left, lower, Some(payload))
            });
            let right_height = tree.right.as_ref().map_or(0, |right| {
                assert!(!right.is_empty());
                check(right, Some(payload), upper)
            });

            assert!(left_height.abs_diff(right_height) <= 1);
            let height = left_height.max(right_height) + 1;
            assert_eq!(tree.height, height);
            height
        }

        check(self, None, None);

        // The AVL height bound: height <= 1.44 * lg(N + 2).
        let len = self.len();
        assert!(self.height() as f64 <= 1.44 * ((len + 2) as f64).log2());
    }
}
