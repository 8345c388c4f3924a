//! Replayable algorithm steps
//!
//! A [`Trace`] is the complete, immutable output of one generation run. Each
//! [`Step`] owns an independent snapshot of the data structure it describes,
//! so a renderer can jump to any position without replaying earlier steps.
//!
//! Steps are grouped by family. Every family variant carries its own
//! snapshot type and only the extras that family needs:
//!
//! - [`SortStep`]: array snapshot plus [`SortDetail`] (heap size, buckets, ...)
//! - [`SearchStep`]: array snapshot, target and [`SearchDetail`]
//! - [`TreeStep`]: nested [`TreeShape`] of the binary search tree
//! - [`GraphStep`]: frontier/visited sets plus [`GraphDetail`]
//! - [`ContainerStep`]: bounded stack or queue contents
//! - [`TableStep`]: dynamic-programming table

pub mod roles;

use crate::input::Algorithm;
use crate::structures::containers::ContainerKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use roles::Roles;

/// Operation tag attached to every step; drives styling in the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Initial,
    Compare,
    Swap,
    /// Selection/insertion sort picks the element for the current pass
    Select,
    /// The selected element already sits at its final position
    InPlace,
    Shift,
    Insert,
    Divide,
    MergeStart,
    MergePlace,
    MergeComplete,
    PivotSelect,
    PivotPlace,
    PartitionComplete,
    HeapifySwap,
    HeapifySwapped,
    HeapBuilt,
    ExtractMax,
    Swapped,
    DigitProcessing,
    PlacingInBucket,
    BucketsFilled,
    CollectingFromBucket,
    DigitComplete,
    Continue,
    SearchLeft,
    SearchRight,
    GoLeft,
    GoRight,
    FindSuccessor,
    Replace,
    Delete,
    Visit,
    Enqueue,
    Dequeue,
    Push,
    Pop,
    Peek,
    Front,
    AlreadyVisited,
    DistanceUpdated,
    DistanceKept,
    Calculating,
    Calculated,
    Found,
    NotFound,
    Completed,
}

impl StepKind {
    /// Kinds whose snapshot differs from the previous step's by the named mutation
    pub fn is_mutation(self) -> bool {
        matches!(
            self,
            StepKind::Swap
                | StepKind::Shift
                | StepKind::Insert
                | StepKind::MergePlace
                | StepKind::PivotPlace
                | StepKind::HeapifySwapped
                | StepKind::Swapped
                | StepKind::CollectingFromBucket
                | StepKind::Replace
                | StepKind::Delete
                | StepKind::Push
                | StepKind::Pop
                | StepKind::Enqueue
                | StepKind::Dequeue
        )
    }

    /// Kinds that end a trace
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            StepKind::Completed | StepKind::Found | StepKind::NotFound
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            StepKind::Initial => "initial",
            StepKind::Compare => "compare",
            StepKind::Swap => "swap",
            StepKind::Select => "select",
            StepKind::InPlace => "in place",
            StepKind::Shift => "shift",
            StepKind::Insert => "insert",
            StepKind::Divide => "divide",
            StepKind::MergeStart => "merge start",
            StepKind::MergePlace => "merge place",
            StepKind::MergeComplete => "merge complete",
            StepKind::PivotSelect => "pivot select",
            StepKind::PivotPlace => "pivot place",
            StepKind::PartitionComplete => "partition complete",
            StepKind::HeapifySwap => "heapify swap",
            StepKind::HeapifySwapped => "heapify swapped",
            StepKind::HeapBuilt => "heap built",
            StepKind::ExtractMax => "extract max",
            StepKind::Swapped => "swapped",
            StepKind::DigitProcessing => "digit processing",
            StepKind::PlacingInBucket => "placing in bucket",
            StepKind::BucketsFilled => "buckets filled",
            StepKind::CollectingFromBucket => "collecting from bucket",
            StepKind::DigitComplete => "digit complete",
            StepKind::Continue => "continue",
            StepKind::SearchLeft => "search left",
            StepKind::SearchRight => "search right",
            StepKind::GoLeft => "go left",
            StepKind::GoRight => "go right",
            StepKind::FindSuccessor => "find successor",
            StepKind::Replace => "replace",
            StepKind::Delete => "delete",
            StepKind::Visit => "visit",
            StepKind::Enqueue => "enqueue",
            StepKind::Dequeue => "dequeue",
            StepKind::Push => "push",
            StepKind::Pop => "pop",
            StepKind::Peek => "peek",
            StepKind::Front => "front",
            StepKind::AlreadyVisited => "already visited",
            StepKind::DistanceUpdated => "distance updated",
            StepKind::DistanceKept => "distance kept",
            StepKind::Calculating => "calculating",
            StepKind::Calculated => "calculated",
            StepKind::Found => "found",
            StepKind::NotFound => "not found",
            StepKind::Completed => "completed",
        }
    }
}

/// Algorithm-specific extras for sorting steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum SortDetail {
    Bubble {
        pass: usize,
    },
    Selection {
        current_min: Option<usize>,
        sorted_boundary: usize,
    },
    Insertion {
        current_element: Option<usize>,
        sorted_boundary: usize,
    },
    Merge {
        recursion_level: usize,
    },
    Quick {
        pivot: Option<usize>,
    },
    Heap {
        heap_size: usize,
    },
    Radix {
        digit_position: u32,
        max_digits: u32,
        buckets: Vec<Vec<i64>>,
        current_bucket: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortStep {
    pub kind: StepKind,
    pub array: Vec<i64>,
    pub roles: Roles,
    pub description: String,
    pub detail: SortDetail,
}

/// How `array[mid]` relates to the binary search target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Equal,
    Less,
    Greater,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchAction {
    Found,
    SearchLeft,
    SearchRight,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum SearchDetail {
    Linear {
        current: Option<usize>,
    },
    Binary {
        left: i64,
        right: i64,
        mid: Option<usize>,
        comparison: Option<Comparison>,
        action: Option<SearchAction>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStep {
    pub kind: StepKind,
    pub array: Vec<i64>,
    pub target: i64,
    pub roles: Roles,
    pub description: String,
    pub detail: SearchDetail,
}

/// Owned snapshot of a binary search tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeShape {
    pub value: i64,
    pub left: Option<Box<TreeShape>>,
    pub right: Option<Box<TreeShape>>,
}

impl TreeShape {
    pub fn leaf(value: i64) -> Self {
        TreeShape {
            value,
            left: None,
            right: None,
        }
    }

    /// In-order values of the snapshot
    pub fn values(&self) -> Vec<i64> {
        let mut out = Vec::new();
        self.collect(&mut out);
        out
    }

    fn collect(&self, out: &mut Vec<i64>) {
        if let Some(left) = &self.left {
            left.collect(out);
        }
        out.push(self.value);
        if let Some(right) = &self.right {
            right.collect(out);
        }
    }

    pub fn height(&self) -> usize {
        let left = self.left.as_ref().map_or(0, |n| n.height());
        let right = self.right.as_ref().map_or(0, |n| n.height());
        1 + left.max(right)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStep {
    pub kind: StepKind,
    pub tree: Option<TreeShape>,
    /// Value of the node the operation is looking at
    pub current: Option<i64>,
    /// Value being inserted, searched or deleted
    pub operand: Option<i64>,
    /// Values on the root-to-current path
    pub path: Vec<i64>,
    /// Traversal output so far
    pub visited: Vec<i64>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum GraphDetail {
    Bfs {
        levels: BTreeMap<String, usize>,
    },
    Dfs,
    Dijkstra {
        /// `None` while a node is unreachable so far
        distances: BTreeMap<String, Option<u64>>,
        previous: BTreeMap<String, String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStep {
    pub kind: StepKind,
    pub current: Option<String>,
    /// Queue (front first), stack (bottom first) or priority order
    pub frontier: Vec<String>,
    /// Visited nodes in visit order
    pub visited: Vec<String>,
    pub finished: Vec<String>,
    pub edge: Option<(String, String)>,
    pub description: String,
    pub detail: GraphDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerStep {
    pub kind: StepKind,
    pub container: ContainerKind,
    /// Stack bottom first, queue front first
    pub items: Vec<i64>,
    pub capacity: usize,
    pub value: Option<i64>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStep {
    pub kind: StepKind,
    pub n: u32,
    pub table: BTreeMap<u32, u64>,
    pub current: Option<u32>,
    pub result: Option<u64>,
    pub description: String,
}

/// One atomic, fully snapshotted unit of algorithm progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum Step {
    Sort(SortStep),
    Search(SearchStep),
    Tree(TreeStep),
    Graph(GraphStep),
    Container(ContainerStep),
    Table(TableStep),
}

impl Step {
    pub fn kind(&self) -> StepKind {
        match self {
            Step::Sort(s) => s.kind,
            Step::Search(s) => s.kind,
            Step::Tree(s) => s.kind,
            Step::Graph(s) => s.kind,
            Step::Container(s) => s.kind,
            Step::Table(s) => s.kind,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Step::Sort(s) => &s.description,
            Step::Search(s) => &s.description,
            Step::Tree(s) => &s.description,
            Step::Graph(s) => &s.description,
            Step::Container(s) => &s.description,
            Step::Table(s) => &s.description,
        }
    }

    /// Array snapshot for the array-backed families
    pub fn array(&self) -> Option<&[i64]> {
        match self {
            Step::Sort(s) => Some(&s.array),
            Step::Search(s) => Some(&s.array),
            _ => None,
        }
    }

    pub fn roles(&self) -> Option<&Roles> {
        match self {
            Step::Sort(s) => Some(&s.roles),
            Step::Search(s) => Some(&s.roles),
            _ => None,
        }
    }
}

impl From<SortStep> for Step {
    fn from(step: SortStep) -> Self {
        Step::Sort(step)
    }
}

impl From<SearchStep> for Step {
    fn from(step: SearchStep) -> Self {
        Step::Search(step)
    }
}

impl From<TreeStep> for Step {
    fn from(step: TreeStep) -> Self {
        Step::Tree(step)
    }
}

impl From<GraphStep> for Step {
    fn from(step: GraphStep) -> Self {
        Step::Graph(step)
    }
}

impl From<ContainerStep> for Step {
    fn from(step: ContainerStep) -> Self {
        Step::Container(step)
    }
}

impl From<TableStep> for Step {
    fn from(step: TableStep) -> Self {
        Step::Table(step)
    }
}

/// Ordered, immutable step sequence produced by one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    pub algorithm: Algorithm,
    steps: Vec<Step>,
}

impl Trace {
    pub fn new(algorithm: Algorithm, steps: Vec<Step>) -> Self {
        Trace { algorithm, steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Get a step by index
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The step whose snapshot holds the fully processed result
    pub fn terminal(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Number of steps tagged with `kind`
    pub fn count_kind(&self, kind: StepKind) -> usize {
        self.steps.iter().filter(|s| s.kind() == kind).count()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sort_step(kind: StepKind) -> Step {
        Step::Sort(SortStep {
            kind,
            array: vec![3, 1],
            roles: Roles::new().with_comparing([0, 1]),
            description: "Comparing 3 and 1".to_string(),
            detail: SortDetail::Bubble { pass: 0 },
        })
    }

    #[test]
    fn step_json_is_tagged_by_family_and_algorithm() {
        let json = serde_json::to_value(sort_step(StepKind::Compare)).unwrap();
        assert_eq!(json["family"], "sort");
        assert_eq!(json["kind"], "compare");
        assert_eq!(json["detail"]["algorithm"], "bubble");
        assert_eq!(json["roles"]["comparing"], serde_json::json!([0, 1]));
        assert!(json["roles"].get("sorted").is_none());
    }

    #[test]
    fn step_json_round_trips() {
        let step = sort_step(StepKind::Swap);
        let text = serde_json::to_string(&step).unwrap();
        let back: Step = serde_json::from_str(&text).unwrap();
        assert_eq!(back, step);
    }

    #[test]
    fn terminal_kinds() {
        assert!(StepKind::Completed.is_terminal());
        assert!(StepKind::NotFound.is_terminal());
        assert!(!StepKind::Compare.is_terminal());
        assert!(StepKind::Swap.is_mutation());
        assert!(!StepKind::Compare.is_mutation());
    }

    #[test]
    fn tree_shape_values_are_in_order() {
        let shape = TreeShape {
            value: 5,
            left: Some(Box::new(TreeShape::leaf(2))),
            right: Some(Box::new(TreeShape {
                value: 8,
                left: Some(Box::new(TreeShape::leaf(7))),
                right: None,
            })),
        };
        assert_eq!(shape.values(), vec![2, 5, 7, 8]);
        assert_eq!(shape.height(), 3);
    }

    #[test]
    fn trace_counts_kinds() {
        let trace = Trace::new(
            Algorithm::BubbleSort,
            vec![
                sort_step(StepKind::Compare),
                sort_step(StepKind::Swap),
                sort_step(StepKind::Completed),
            ],
        );
        assert_eq!(trace.count_kind(StepKind::Compare), 1);
        assert_eq!(trace.terminal().map(Step::kind), Some(StepKind::Completed));
    }
}
