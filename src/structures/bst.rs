//! Arena-backed binary search tree
//!
//! Nodes live in a slot vector and refer to each other through [`NodeId`]
//! indices, so parent links need no shared ownership. Removed slots go on a
//! free list and are reused by later insertions.
//!
//! # Invariants
//!
//! - Every value in a node's left subtree is smaller than the node's value,
//!   every value in its right subtree is larger. Duplicates are rejected.
//! - `parent` of a child always points back at the node holding the link.

use crate::errors::InputError;
use crate::step::TreeShape;

/// Index of a live node in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn name(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub value: i64,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub parent: Option<NodeId>,
}

impl TreeNode {
    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Depth-first visiting orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalOrder {
    InOrder,
    PreOrder,
    PostOrder,
}

impl TraversalOrder {
    pub fn name(self) -> &'static str {
        match self {
            TraversalOrder::InOrder => "in-order",
            TraversalOrder::PreOrder => "pre-order",
            TraversalOrder::PostOrder => "post-order",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BinarySearchTree {
    slots: Vec<Option<TreeNode>>,
    free: Vec<usize>,
    root: Option<NodeId>,
    len: usize,
}

impl BinarySearchTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree by inserting `values` in order
    pub fn from_values(values: &[i64]) -> Result<Self, InputError> {
        let mut tree = Self::new();
        for &value in values {
            tree.insert(value)?;
        }
        Ok(tree)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut TreeNode> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Value stored at `id`; stale ids read as `None`
    pub fn value(&self, id: NodeId) -> Option<i64> {
        self.node(id).map(|n| n.value)
    }

    pub fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        self.node(id).and_then(|n| n.child(side))
    }

    pub fn find(&self, value: i64) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id)?;
            current = match value.cmp(&node.value) {
                std::cmp::Ordering::Equal => return Some(id),
                std::cmp::Ordering::Less => node.left,
                std::cmp::Ordering::Greater => node.right,
            };
        }
        None
    }

    pub fn contains(&self, value: i64) -> bool {
        self.find(value).is_some()
    }

    pub fn insert(&mut self, value: i64) -> Result<NodeId, InputError> {
        let Some(mut current) = self.root else {
            return Ok(self.attach(None, value));
        };
        loop {
            let node = self.node(current).ok_or(InputError::DuplicateValue { value })?;
            let side = match value.cmp(&node.value) {
                std::cmp::Ordering::Equal => return Err(InputError::DuplicateValue { value }),
                std::cmp::Ordering::Less => Side::Left,
                std::cmp::Ordering::Greater => Side::Right,
            };
            match node.child(side) {
                Some(next) => current = next,
                None => return Ok(self.attach(Some((current, side)), value)),
            }
        }
    }

    /// Create a node under `parent` on `side`, or as the root when `parent`
    /// is `None`. The caller guarantees the slot is empty and ordering holds.
    pub(crate) fn attach(&mut self, parent: Option<(NodeId, Side)>, value: i64) -> NodeId {
        let node = TreeNode {
            value,
            left: None,
            right: None,
            parent: parent.map(|(p, _)| p),
        };
        let id = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                NodeId(slot)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        };
        match parent {
            Some((p, side)) => {
                if let Some(parent_node) = self.node_mut(p) {
                    *parent_node.child_mut(side) = Some(id);
                }
            }
            None => self.root = Some(id),
        }
        self.len += 1;
        id
    }

    /// Overwrite the value at `id`, used when a successor replaces a deleted value
    pub(crate) fn set_value(&mut self, id: NodeId, value: i64) {
        if let Some(node) = self.node_mut(id) {
            node.value = value;
        }
    }

    /// Leftmost node of the subtree rooted at `id`
    pub fn min_in(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(left) = self.child(current, Side::Left) {
            current = left;
        }
        current
    }

    /// Remove a node with at most one child, splicing that child into its
    /// place. Returns the removed value, or `None` if `id` has two children
    /// or is stale.
    pub(crate) fn unlink(&mut self, id: NodeId) -> Option<i64> {
        let node = self.node(id)?.clone();
        let child = match (node.left, node.right) {
            (Some(_), Some(_)) => return None,
            (left, right) => left.or(right),
        };
        if let Some(c) = child {
            if let Some(child_node) = self.node_mut(c) {
                child_node.parent = node.parent;
            }
        }
        match node.parent {
            Some(p) => {
                if let Some(parent_node) = self.node_mut(p) {
                    if parent_node.left == Some(id) {
                        parent_node.left = child;
                    } else {
                        parent_node.right = child;
                    }
                }
            }
            None => self.root = child,
        }
        self.slots[id.0] = None;
        self.free.push(id.0);
        self.len -= 1;
        Some(node.value)
    }

    /// Remove `value`, returning whether it was present.
    ///
    /// A node with two children takes its in-order successor's value and
    /// the successor node is removed from the right subtree instead.
    pub fn delete(&mut self, value: i64) -> bool {
        let Some(id) = self.find(value) else {
            return false;
        };
        match self.child(id, Side::Right) {
            Some(right) if self.child(id, Side::Left).is_some() => {
                let successor = self.min_in(right);
                let Some(successor_value) = self.value(successor) else {
                    return false;
                };
                self.set_value(id, successor_value);
                self.unlink(successor).is_some()
            }
            _ => self.unlink(id).is_some(),
        }
    }

    pub fn traverse(&self, order: TraversalOrder) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.len);
        self.walk(self.root, order, &mut out);
        out
    }

    fn walk(&self, id: Option<NodeId>, order: TraversalOrder, out: &mut Vec<i64>) {
        let Some(node) = id.and_then(|id| self.node(id)) else {
            return;
        };
        if order == TraversalOrder::PreOrder {
            out.push(node.value);
        }
        self.walk(node.left, order, out);
        if order == TraversalOrder::InOrder {
            out.push(node.value);
        }
        self.walk(node.right, order, out);
        if order == TraversalOrder::PostOrder {
            out.push(node.value);
        }
    }

    pub fn in_order(&self) -> Vec<i64> {
        self.traverse(TraversalOrder::InOrder)
    }

    pub fn height(&self) -> usize {
        self.shape().map_or(0, |s| s.height())
    }

    /// Owned nested snapshot of the current tree
    pub fn shape(&self) -> Option<TreeShape> {
        self.shape_of(self.root?)
    }

    fn shape_of(&self, id: NodeId) -> Option<TreeShape> {
        let node = self.node(id)?;
        Some(TreeShape {
            value: node.value,
            left: node.left.and_then(|l| self.shape_of(l)).map(Box::new),
            right: node.right.and_then(|r| self.shape_of(r)).map(Box::new),
        })
    }

    /// Check ordering, parent links and the node count
    pub fn is_valid(&self) -> bool {
        let mut count = 0;
        match self.root {
            None => self.len == 0,
            Some(root) => {
                self.node(root).is_some_and(|n| n.parent.is_none())
                    && self.check(root, None, None, &mut count)
                    && count == self.len
            }
        }
    }

    fn check(&self, id: NodeId, low: Option<i64>, high: Option<i64>, count: &mut usize) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        *count += 1;
        if low.is_some_and(|l| node.value <= l) || high.is_some_and(|h| node.value >= h) {
            return false;
        }
        let child_ok = |child: Option<NodeId>, low, high, count: &mut usize| match child {
            None => true,
            Some(c) => {
                self.node(c).is_some_and(|n| n.parent == Some(id))
                    && self.check(c, low, high, count)
            }
        };
        child_ok(node.left, low, Some(node.value), count)
            && child_ok(node.right, Some(node.value), high, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BinarySearchTree {
        BinarySearchTree::from_values(&[50, 30, 70, 20, 40, 60, 80]).unwrap()
    }

    #[test]
    fn insert_keeps_order_and_rejects_duplicates() {
        let mut tree = sample();
        assert_eq!(tree.in_order(), vec![20, 30, 40, 50, 60, 70, 80]);
        assert_eq!(tree.insert(40), Err(InputError::DuplicateValue { value: 40 }));
        assert_eq!(tree.len(), 7);
        assert!(tree.is_valid());
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn traversal_orders() {
        let tree = sample();
        assert_eq!(
            tree.traverse(TraversalOrder::PreOrder),
            vec![50, 30, 20, 40, 70, 60, 80]
        );
        assert_eq!(
            tree.traverse(TraversalOrder::PostOrder),
            vec![20, 40, 30, 60, 80, 70, 50]
        );
    }

    #[test]
    fn delete_covers_all_shapes() {
        let mut tree = sample();
        assert!(tree.delete(20)); // leaf
        assert!(tree.delete(30)); // one child
        assert!(tree.delete(50)); // two children, root
        assert!(!tree.delete(99));
        assert_eq!(tree.in_order(), vec![40, 60, 70, 80]);
        assert_eq!(tree.value(tree.root().unwrap()), Some(60));
        assert!(tree.is_valid());
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut tree = sample();
        tree.delete(80);
        let id = tree.insert(90).unwrap();
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.value(id), Some(90));
        assert_eq!(tree.node(id).and_then(|n| n.parent), tree.find(70));
        assert!(tree.is_valid());
    }

    #[test]
    fn deleting_everything_empties_the_tree() {
        let mut tree = sample();
        for v in [50, 30, 70, 20, 40, 60, 80] {
            assert!(tree.delete(v));
            assert!(tree.is_valid());
        }
        assert!(tree.is_empty());
        assert!(tree.shape().is_none());
    }
}
