//! Binary search tree step generators
//!
//! [`TreeSession`] owns a tree across several operations so the final
//! snapshot of one operation is the starting shape of the next. [`run`]
//! wraps a session for a single request: the request's values are inserted
//! silently (or traced, for [`TreeOperation::Build`]) and the requested
//! operation is traced.

use super::recorder::Recorder;
use crate::errors::InputError;
use crate::input::{Algorithm, TreeOperation};
use crate::structures::bst::{BinarySearchTree, NodeId, Side, TraversalOrder};
use crate::step::{Step, StepKind, Trace, TreeStep};
use std::cmp::Ordering;

/// A tree that persists across traced operations
#[derive(Debug, Default)]
pub struct TreeSession {
    tree: BinarySearchTree,
}

impl TreeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tree(tree: BinarySearchTree) -> Self {
        TreeSession { tree }
    }

    pub fn tree(&self) -> &BinarySearchTree {
        &self.tree
    }

    fn snapshot(
        &self,
        kind: StepKind,
        current: Option<i64>,
        operand: Option<i64>,
        path: &[i64],
        visited: &[i64],
        description: String,
    ) -> Step {
        Step::Tree(TreeStep {
            kind,
            tree: self.tree.shape(),
            current,
            operand,
            path: path.to_vec(),
            visited: visited.to_vec(),
            description,
        })
    }

    /// Walk from the root toward `value`, recording a compare step per node
    /// and a go-left/go-right step per descent. Returns the matching node,
    /// or the last node visited and the side where `value` would hang.
    fn descend(
        &self,
        value: i64,
        verb: &str,
        path: &mut Vec<i64>,
        steps: &mut Vec<Step>,
    ) -> Descent {
        let mut current = match self.tree.root() {
            Some(root) => root,
            None => return Descent::Empty,
        };
        loop {
            let Some(node_value) = self.tree.value(current) else {
                return Descent::Empty;
            };
            path.push(node_value);
            steps.push(self.snapshot(
                StepKind::Compare,
                Some(node_value),
                Some(value),
                path,
                &[],
                format!("{}: comparing {} with {}", verb, value, node_value),
            ));
            let side = match value.cmp(&node_value) {
                Ordering::Equal => return Descent::Found(current),
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            let (kind, relation) = match side {
                Side::Left => (StepKind::GoLeft, "<"),
                Side::Right => (StepKind::GoRight, ">"),
            };
            steps.push(self.snapshot(
                kind,
                Some(node_value),
                Some(value),
                path,
                &[],
                format!(
                    "{} {} {}: go to the {} subtree",
                    value,
                    relation,
                    node_value,
                    side.name()
                ),
            ));
            match self.tree.child(current, side) {
                Some(next) => current = next,
                None => return Descent::Vacant(current, side),
            }
        }
    }

    /// Insert `value`, ending with the `insert` step. Duplicates are
    /// rejected before any step is recorded.
    pub fn insert(&mut self, value: i64) -> Result<Vec<Step>, InputError> {
        if self.tree.contains(value) {
            return Err(InputError::DuplicateValue { value });
        }
        let mut steps = Vec::new();
        let mut path = Vec::new();
        let description = match self.descend(value, "Inserting", &mut path, &mut steps) {
            Descent::Empty => {
                self.tree.attach(None, value);
                format!("The tree is empty; {} becomes the root", value)
            }
            Descent::Vacant(parent, side) => {
                let parent_value = self.tree.value(parent).unwrap_or_default();
                self.tree.attach(Some((parent, side)), value);
                format!(
                    "Inserted {} as the {} child of {}",
                    value,
                    side.name(),
                    parent_value
                )
            }
            Descent::Found(_) => return Err(InputError::DuplicateValue { value }),
        };
        path.push(value);
        steps.push(self.snapshot(
            StepKind::Insert,
            Some(value),
            Some(value),
            &path,
            &[],
            description,
        ));
        Ok(steps)
    }

    /// Search for `value`; ends in `found` or `not_found`
    pub fn search(&self, value: i64) -> Vec<Step> {
        let mut steps = Vec::new();
        let mut path = Vec::new();
        match self.descend(value, "Searching", &mut path, &mut steps) {
            Descent::Found(_) => steps.push(self.snapshot(
                StepKind::Found,
                Some(value),
                Some(value),
                &path,
                &[],
                format!("Found {} after visiting {} node(s)", value, path.len()),
            )),
            Descent::Empty | Descent::Vacant(..) => steps.push(self.snapshot(
                StepKind::NotFound,
                None,
                Some(value),
                &path,
                &[],
                format!("{} is not in the tree", value),
            )),
        }
        steps
    }

    /// Delete `value`. An absent value ends in `not_found` and leaves the
    /// tree untouched; otherwise exactly one node is removed.
    pub fn delete(&mut self, value: i64) -> Vec<Step> {
        let mut steps = Vec::new();
        let mut path = Vec::new();
        let target = match self.descend(value, "Deleting", &mut path, &mut steps) {
            Descent::Found(id) => id,
            Descent::Empty | Descent::Vacant(..) => {
                steps.push(self.snapshot(
                    StepKind::NotFound,
                    None,
                    Some(value),
                    &path,
                    &[],
                    format!("{} is not in the tree; nothing to delete", value),
                ));
                return steps;
            }
        };

        let left = self.tree.child(target, Side::Left);
        let right = self.tree.child(target, Side::Right);
        match (left, right) {
            (Some(_), Some(right)) => self.delete_with_successor(target, right, value, &mut path, &mut steps),
            (None, None) => {
                self.tree.unlink(target);
                steps.push(self.snapshot(
                    StepKind::Delete,
                    None,
                    Some(value),
                    &path,
                    &[],
                    format!("{} is a leaf; removed it", value),
                ));
            }
            (Some(child), None) | (None, Some(child)) => {
                let child_value = self.tree.value(child).unwrap_or_default();
                self.tree.unlink(target);
                steps.push(self.snapshot(
                    StepKind::Delete,
                    Some(child_value),
                    Some(value),
                    &path,
                    &[],
                    format!(
                        "{} has one child; {} takes its place",
                        value, child_value
                    ),
                ));
            }
        }
        steps
    }

    fn delete_with_successor(
        &mut self,
        target: NodeId,
        right: NodeId,
        value: i64,
        path: &mut Vec<i64>,
        steps: &mut Vec<Step>,
    ) {
        let mut successor = right;
        loop {
            let successor_value = self.tree.value(successor).unwrap_or_default();
            path.push(successor_value);
            let description = if successor == right {
                format!(
                    "{} has two children; looking for its in-order successor, starting at right child {}",
                    value, successor_value
                )
            } else {
                format!("Moving left to {}", successor_value)
            };
            steps.push(self.snapshot(
                StepKind::FindSuccessor,
                Some(successor_value),
                Some(value),
                path,
                &[],
                description,
            ));
            match self.tree.child(successor, Side::Left) {
                Some(next) => successor = next,
                None => break,
            }
        }

        let successor_value = self.tree.value(successor).unwrap_or_default();
        self.tree.set_value(target, successor_value);
        steps.push(self.snapshot(
            StepKind::Replace,
            Some(successor_value),
            Some(value),
            path,
            &[],
            format!(
                "Replaced {} with its in-order successor {}",
                value, successor_value
            ),
        ));
        self.tree.unlink(successor);
        steps.push(self.snapshot(
            StepKind::Delete,
            Some(successor_value),
            Some(value),
            path,
            &[],
            "Removed the successor's original node from the right subtree".to_string(),
        ));
    }

    /// One `visit` step per node in the given depth-first order
    pub fn traverse(&self, order: TraversalOrder) -> Vec<Step> {
        let mut visited = Vec::new();
        let mut steps = Vec::new();
        for value in self.tree.traverse(order) {
            visited.push(value);
            steps.push(self.snapshot(
                StepKind::Visit,
                Some(value),
                None,
                &[],
                &visited,
                format!("{} traversal visits {}", order.name(), value),
            ));
        }
        steps
    }

    fn initial(&self, description: String) -> Step {
        self.snapshot(StepKind::Initial, None, None, &[], &[], description)
    }

    fn completed(&self, visited: Vec<i64>, description: String) -> Step {
        self.snapshot(StepKind::Completed, None, None, &[], &visited, description)
    }
}

enum Descent {
    Empty,
    Found(NodeId),
    Vacant(NodeId, Side),
}

/// Trace one tree request.
///
/// For [`TreeOperation::Build`] every value's insertion is traced. Other
/// operations start from the tree built from `values` without steps.
pub fn run(values: &[i64], operation: TreeOperation) -> Result<Trace, InputError> {
    let mut rec = Recorder::new();
    let mut session = match operation {
        TreeOperation::Build => {
            let mut seen = std::collections::BTreeSet::new();
            if let Some(&value) = values.iter().find(|v| !seen.insert(**v)) {
                return Err(InputError::DuplicateValue { value });
            }
            let mut session = TreeSession::new();
            rec.push(session.initial(format!(
                "Building a binary search tree from {} value(s)",
                values.len()
            )));
            for &value in values {
                for step in session.insert(value)? {
                    rec.push(step);
                }
            }
            session
        }
        _ => TreeSession::from_tree(BinarySearchTree::from_values(values)?),
    };

    match operation {
        TreeOperation::Build => {
            let in_order = session.tree().in_order();
            let summary = format!("Tree built with {} node(s)", in_order.len());
            rec.push(session.completed(in_order, summary));
        }
        TreeOperation::Insert { value } => {
            if session.tree().contains(value) {
                return Err(InputError::DuplicateValue { value });
            }
            rec.push(session.initial(format!("Inserting {}", value)));
            for step in session.insert(value)? {
                rec.push(step);
            }
            let summary = format!("Inserted {}; the tree has {} node(s)", value, session.tree().len());
            rec.push(session.completed(session.tree().in_order(), summary));
        }
        TreeOperation::Search { value } => {
            rec.push(session.initial(format!("Searching for {}", value)));
            for step in session.search(value) {
                rec.push(step);
            }
        }
        TreeOperation::Delete { value } => {
            rec.push(session.initial(format!("Deleting {}", value)));
            let steps = session.delete(value);
            let removed = steps.last().map(Step::kind) != Some(StepKind::NotFound);
            for step in steps {
                rec.push(step);
            }
            if removed {
                let summary = format!("Deleted {}; {} node(s) remain", value, session.tree().len());
                rec.push(session.completed(session.tree().in_order(), summary));
            }
        }
        TreeOperation::Traverse { order } => {
            rec.push(session.initial(format!("Starting {} traversal", order.name())));
            let visited = session.tree().traverse(order);
            for step in session.traverse(order) {
                rec.push(step);
            }
            let summary = format!(
                "{} traversal complete: [{}]",
                order.name(),
                visited
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            rec.push(session.completed(visited, summary));
        }
    }
    Ok(rec.finish(Algorithm::Bst))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(steps: &[Step]) -> Vec<StepKind> {
        steps.iter().map(Step::kind).collect()
    }

    fn final_values(trace: &Trace) -> Vec<i64> {
        match trace.terminal() {
            Some(Step::Tree(step)) => step.tree.as_ref().map(|t| t.values()).unwrap_or_default(),
            _ => panic!("expected a tree step"),
        }
    }

    #[test]
    fn insert_into_empty_tree_is_a_single_step() {
        let mut session = TreeSession::new();
        let steps = session.insert(5).unwrap();
        assert_eq!(kinds(&steps), vec![StepKind::Insert]);
    }

    #[test]
    fn insert_walks_and_attaches() {
        let mut session =
            TreeSession::from_tree(BinarySearchTree::from_values(&[50, 30, 70]).unwrap());
        let steps = session.insert(40).unwrap();
        assert_eq!(
            kinds(&steps),
            vec![
                StepKind::Compare,
                StepKind::GoLeft,
                StepKind::Compare,
                StepKind::GoRight,
                StepKind::Insert,
            ]
        );
        assert_eq!(session.tree().in_order(), vec![30, 40, 50, 70]);
        assert_eq!(
            session.insert(40).unwrap_err(),
            InputError::DuplicateValue { value: 40 }
        );
    }

    #[test]
    fn build_rejects_duplicates_before_recording() {
        assert_eq!(
            run(&[5, 3, 5], TreeOperation::Build).unwrap_err(),
            InputError::DuplicateValue { value: 5 }
        );
    }

    #[test]
    fn delete_two_children_uses_successor() {
        let trace = run(
            &[50, 30, 70, 20, 40, 60, 80],
            TreeOperation::Delete { value: 50 },
        )
        .unwrap();
        assert_eq!(trace.count_kind(StepKind::Replace), 1);
        assert_eq!(trace.count_kind(StepKind::Delete), 1);
        assert_eq!(trace.count_kind(StepKind::FindSuccessor), 2);
        assert_eq!(final_values(&trace), vec![20, 30, 40, 60, 70, 80]);
    }

    #[test]
    fn delete_absent_value_ends_not_found() {
        let trace = run(&[5, 3], TreeOperation::Delete { value: 9 }).unwrap();
        assert_eq!(trace.terminal().map(Step::kind), Some(StepKind::NotFound));
        assert_eq!(final_values(&trace), vec![3, 5]);

        let empty = run(&[], TreeOperation::Delete { value: 1 }).unwrap();
        assert_eq!(kinds(empty.steps()), vec![StepKind::Initial, StepKind::NotFound]);
    }

    #[test]
    fn traversal_visits_every_node_once() {
        let trace = run(
            &[50, 30, 70, 20, 40],
            TreeOperation::Traverse {
                order: TraversalOrder::PreOrder,
            },
        )
        .unwrap();
        assert_eq!(trace.count_kind(StepKind::Visit), 5);
        match trace.terminal() {
            Some(Step::Tree(step)) => assert_eq!(step.visited, vec![50, 30, 20, 40, 70]),
            other => panic!("unexpected terminal {:?}", other),
        }
    }

    #[test]
    fn search_reports_found_and_missing() {
        let session = TreeSession::from_tree(BinarySearchTree::from_values(&[8, 4, 12]).unwrap());
        assert_eq!(kinds(&session.search(12)).last(), Some(&StepKind::Found));
        assert_eq!(kinds(&session.search(5)).last(), Some(&StepKind::NotFound));
    }
}
