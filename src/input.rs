//! Request model and input validation
//!
//! A [`Request`] names one algorithm together with its input. Requests are
//! read from JSON (see the `steps` and `play` commands) or built from the
//! samples in [`Request::sample`]. [`Request::validate`] applies the size
//! limits from [`Limits`] before any step is generated; content rules that
//! belong to a single algorithm (sortedness, negative radix values, ...) are
//! checked by that algorithm's generator.
//!
//! [`parse_values`] turns free-form text such as `"64, 34 25"` into integers.

use crate::config::Limits;
use crate::errors::InputError;
use crate::structures::bst::TraversalOrder;
use crate::structures::containers::ContainerKind;
use crate::structures::graph::{EdgeSpec, GraphSpec};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every algorithm the generator can trace
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    BubbleSort,
    SelectionSort,
    InsertionSort,
    MergeSort,
    QuickSort,
    HeapSort,
    RadixSort,
    LinearSearch,
    BinarySearch,
    Bst,
    Bfs,
    Dfs,
    Dijkstra,
    Stack,
    Queue,
    Fibonacci,
}

impl Algorithm {
    pub const ALL: [Algorithm; 16] = [
        Algorithm::BubbleSort,
        Algorithm::SelectionSort,
        Algorithm::InsertionSort,
        Algorithm::MergeSort,
        Algorithm::QuickSort,
        Algorithm::HeapSort,
        Algorithm::RadixSort,
        Algorithm::LinearSearch,
        Algorithm::BinarySearch,
        Algorithm::Bst,
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Dijkstra,
        Algorithm::Stack,
        Algorithm::Queue,
        Algorithm::Fibonacci,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::BubbleSort => "bubble sort",
            Algorithm::SelectionSort => "selection sort",
            Algorithm::InsertionSort => "insertion sort",
            Algorithm::MergeSort => "merge sort",
            Algorithm::QuickSort => "quick sort",
            Algorithm::HeapSort => "heap sort",
            Algorithm::RadixSort => "radix sort",
            Algorithm::LinearSearch => "linear search",
            Algorithm::BinarySearch => "binary search",
            Algorithm::Bst => "binary search tree",
            Algorithm::Bfs => "breadth-first search",
            Algorithm::Dfs => "depth-first search",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::Stack => "stack",
            Algorithm::Queue => "queue",
            Algorithm::Fibonacci => "fibonacci",
        }
    }

    pub fn is_sort(self) -> bool {
        matches!(
            self,
            Algorithm::BubbleSort
                | Algorithm::SelectionSort
                | Algorithm::InsertionSort
                | Algorithm::MergeSort
                | Algorithm::QuickSort
                | Algorithm::HeapSort
                | Algorithm::RadixSort
        )
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What to do with the tree built from a [`Request::Bst`]'s values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TreeOperation {
    /// Trace the insertion of every value into an empty tree
    #[default]
    Build,
    Insert {
        value: i64,
    },
    Search {
        value: i64,
    },
    Delete {
        value: i64,
    },
    Traverse {
        order: TraversalOrder,
    },
}

/// One operation of a stack or queue script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum ContainerOp {
    Push(i64),
    Pop,
    Peek,
    Enqueue(i64),
    Dequeue,
    Front,
}

impl ContainerOp {
    /// Container the operation belongs to
    pub fn container(self) -> ContainerKind {
        match self {
            ContainerOp::Push(_) | ContainerOp::Pop | ContainerOp::Peek => ContainerKind::Stack,
            ContainerOp::Enqueue(_) | ContainerOp::Dequeue | ContainerOp::Front => {
                ContainerKind::Queue
            }
        }
    }
}

impl fmt::Display for ContainerOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerOp::Push(v) => write!(f, "push {}", v),
            ContainerOp::Pop => write!(f, "pop"),
            ContainerOp::Peek => write!(f, "peek"),
            ContainerOp::Enqueue(v) => write!(f, "enqueue {}", v),
            ContainerOp::Dequeue => write!(f, "dequeue"),
            ContainerOp::Front => write!(f, "front"),
        }
    }
}

impl FromStr for ContainerOp {
    type Err = InputError;

    /// Parse `push 5`, `pop`, `enqueue 3`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let name = parts.next().unwrap_or_default().to_ascii_lowercase();
        let operand = parts.next();
        let value = || -> Result<i64, InputError> {
            let token = operand.ok_or_else(|| InputError::NotANumber {
                token: s.trim().to_string(),
            })?;
            parse_integer(token)
        };
        match name.as_str() {
            "push" => Ok(ContainerOp::Push(value()?)),
            "pop" => Ok(ContainerOp::Pop),
            "peek" => Ok(ContainerOp::Peek),
            "enqueue" => Ok(ContainerOp::Enqueue(value()?)),
            "dequeue" => Ok(ContainerOp::Dequeue),
            "front" => Ok(ContainerOp::Front),
            _ => Err(InputError::UnsupportedOperation {
                operation: s.trim().to_string(),
                container: if name.contains("queue") {
                    ContainerKind::Queue
                } else {
                    ContainerKind::Stack
                },
            }),
        }
    }
}

/// Built-in graph shapes used by the samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum GraphPreset {
    Simple,
    Tree,
    Grid,
    Complex,
    Weighted,
}

impl GraphPreset {
    pub fn spec(self) -> GraphSpec {
        let (nodes, edges): (&[&str], &[(&str, &str, u64)]) = match self {
            GraphPreset::Simple => (
                &["A", "B", "C", "D"],
                &[("A", "B", 1), ("A", "C", 1), ("B", "D", 1), ("C", "D", 1)],
            ),
            GraphPreset::Tree => (
                &["A", "B", "C", "D", "E", "F", "G"],
                &[
                    ("A", "B", 1),
                    ("A", "C", 1),
                    ("B", "D", 1),
                    ("B", "E", 1),
                    ("C", "F", 1),
                    ("C", "G", 1),
                ],
            ),
            GraphPreset::Grid => (
                &["A", "B", "C", "D", "E", "F"],
                &[
                    ("A", "B", 1),
                    ("B", "C", 1),
                    ("A", "D", 1),
                    ("B", "E", 1),
                    ("C", "F", 1),
                    ("D", "E", 1),
                    ("E", "F", 1),
                ],
            ),
            GraphPreset::Complex => (
                &["A", "B", "C", "D", "E", "F", "G", "H"],
                &[
                    ("A", "B", 1),
                    ("A", "C", 1),
                    ("B", "D", 1),
                    ("C", "E", 1),
                    ("D", "F", 1),
                    ("E", "F", 1),
                    ("F", "G", 1),
                    ("G", "H", 1),
                    ("B", "E", 1),
                    ("C", "D", 1),
                ],
            ),
            GraphPreset::Weighted => (
                &["A", "B", "C", "D", "E", "F"],
                &[
                    ("A", "B", 4),
                    ("A", "C", 2),
                    ("B", "C", 1),
                    ("B", "D", 5),
                    ("C", "D", 8),
                    ("C", "E", 10),
                    ("D", "E", 2),
                    ("D", "F", 6),
                    ("E", "F", 3),
                ],
            ),
        };
        GraphSpec {
            nodes: nodes.iter().map(|n| n.to_string()).collect(),
            edges: edges
                .iter()
                .map(|(a, b, w)| EdgeSpec::weighted(a, b, *w))
                .collect(),
        }
    }
}

/// One algorithm run, as read from JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum Request {
    BubbleSort {
        values: Vec<i64>,
    },
    SelectionSort {
        values: Vec<i64>,
    },
    InsertionSort {
        values: Vec<i64>,
    },
    MergeSort {
        values: Vec<i64>,
    },
    QuickSort {
        values: Vec<i64>,
    },
    HeapSort {
        values: Vec<i64>,
    },
    RadixSort {
        values: Vec<i64>,
    },
    LinearSearch {
        values: Vec<i64>,
        target: i64,
    },
    BinarySearch {
        values: Vec<i64>,
        target: i64,
    },
    Bst {
        #[serde(default)]
        values: Vec<i64>,
        #[serde(default)]
        operation: TreeOperation,
    },
    Bfs {
        graph: GraphSpec,
        start: String,
    },
    Dfs {
        graph: GraphSpec,
        start: String,
    },
    Dijkstra {
        graph: GraphSpec,
        start: String,
    },
    Stack {
        #[serde(default)]
        capacity: Option<usize>,
        operations: Vec<ContainerOp>,
    },
    Queue {
        #[serde(default)]
        capacity: Option<usize>,
        operations: Vec<ContainerOp>,
    },
    Fibonacci {
        n: i64,
    },
}

impl Request {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Request::BubbleSort { .. } => Algorithm::BubbleSort,
            Request::SelectionSort { .. } => Algorithm::SelectionSort,
            Request::InsertionSort { .. } => Algorithm::InsertionSort,
            Request::MergeSort { .. } => Algorithm::MergeSort,
            Request::QuickSort { .. } => Algorithm::QuickSort,
            Request::HeapSort { .. } => Algorithm::HeapSort,
            Request::RadixSort { .. } => Algorithm::RadixSort,
            Request::LinearSearch { .. } => Algorithm::LinearSearch,
            Request::BinarySearch { .. } => Algorithm::BinarySearch,
            Request::Bst { .. } => Algorithm::Bst,
            Request::Bfs { .. } => Algorithm::Bfs,
            Request::Dfs { .. } => Algorithm::Dfs,
            Request::Dijkstra { .. } => Algorithm::Dijkstra,
            Request::Stack { .. } => Algorithm::Stack,
            Request::Queue { .. } => Algorithm::Queue,
            Request::Fibonacci { .. } => Algorithm::Fibonacci,
        }
    }

    /// Build a sort request for `algorithm`; `None` for non-sorting algorithms
    pub fn sort(algorithm: Algorithm, values: Vec<i64>) -> Option<Self> {
        if !algorithm.is_sort() {
            return None;
        }
        Some(match algorithm {
            Algorithm::BubbleSort => Request::BubbleSort { values },
            Algorithm::SelectionSort => Request::SelectionSort { values },
            Algorithm::InsertionSort => Request::InsertionSort { values },
            Algorithm::MergeSort => Request::MergeSort { values },
            Algorithm::QuickSort => Request::QuickSort { values },
            Algorithm::HeapSort => Request::HeapSort { values },
            Algorithm::RadixSort => Request::RadixSort { values },
            _ => return None,
        })
    }

    /// Sample input shown by the `demo` command
    pub fn sample(algorithm: Algorithm) -> Self {
        const SORT_SAMPLE: [i64; 7] = [64, 34, 25, 12, 22, 11, 90];
        const SEARCH_SAMPLE: [i64; 7] = [11, 12, 22, 25, 34, 64, 90];
        match algorithm {
            Algorithm::RadixSort => Request::RadixSort {
                values: vec![170, 45, 75, 90, 2, 802, 24, 66],
            },
            Algorithm::LinearSearch => Request::LinearSearch {
                values: SORT_SAMPLE.to_vec(),
                target: 22,
            },
            Algorithm::BinarySearch => Request::BinarySearch {
                values: SEARCH_SAMPLE.to_vec(),
                target: 25,
            },
            Algorithm::Bst => Request::Bst {
                values: vec![50, 30, 70, 20, 40, 60, 80],
                operation: TreeOperation::Build,
            },
            Algorithm::Bfs => Request::Bfs {
                graph: GraphPreset::Complex.spec(),
                start: "A".to_string(),
            },
            Algorithm::Dfs => Request::Dfs {
                graph: GraphPreset::Complex.spec(),
                start: "A".to_string(),
            },
            Algorithm::Dijkstra => Request::Dijkstra {
                graph: GraphPreset::Weighted.spec(),
                start: "A".to_string(),
            },
            Algorithm::Stack => Request::Stack {
                capacity: None,
                operations: vec![
                    ContainerOp::Push(10),
                    ContainerOp::Push(20),
                    ContainerOp::Push(30),
                    ContainerOp::Peek,
                    ContainerOp::Pop,
                    ContainerOp::Push(40),
                    ContainerOp::Pop,
                    ContainerOp::Pop,
                ],
            },
            Algorithm::Queue => Request::Queue {
                capacity: None,
                operations: vec![
                    ContainerOp::Enqueue(10),
                    ContainerOp::Enqueue(20),
                    ContainerOp::Enqueue(30),
                    ContainerOp::Front,
                    ContainerOp::Dequeue,
                    ContainerOp::Enqueue(40),
                    ContainerOp::Dequeue,
                ],
            },
            Algorithm::Fibonacci => Request::Fibonacci { n: 10 },
            sort => Request::sort(sort, SORT_SAMPLE.to_vec()).unwrap_or(Request::BubbleSort {
                values: SORT_SAMPLE.to_vec(),
            }),
        }
    }

    /// Check size limits and operation kinds
    pub fn validate(&self, limits: &Limits) -> Result<(), InputError> {
        let algorithm = self.algorithm();
        match self {
            Request::RadixSort { values } => check_len(algorithm, values, limits.max_radix_len),
            Request::BubbleSort { values }
            | Request::SelectionSort { values }
            | Request::InsertionSort { values }
            | Request::MergeSort { values }
            | Request::QuickSort { values }
            | Request::HeapSort { values }
            | Request::LinearSearch { values, .. }
            | Request::BinarySearch { values, .. } => {
                check_len(algorithm, values, limits.max_array_len)
            }
            Request::Bst { values, .. } => {
                if values.len() > limits.max_tree_values {
                    return Err(InputError::TooMany {
                        what: algorithm.name(),
                        len: values.len(),
                        max: limits.max_tree_values,
                    });
                }
                Ok(())
            }
            Request::Bfs { graph, .. }
            | Request::Dfs { graph, .. }
            | Request::Dijkstra { graph, .. } => {
                if graph.nodes.is_empty() {
                    return Err(InputError::Empty { what: "graph" });
                }
                if graph.nodes.len() > limits.max_graph_nodes {
                    return Err(InputError::TooMany {
                        what: "graph",
                        len: graph.nodes.len(),
                        max: limits.max_graph_nodes,
                    });
                }
                Ok(())
            }
            Request::Stack {
                capacity,
                operations,
            } => check_script(
                ContainerKind::Stack,
                capacity.unwrap_or(limits.stack_capacity),
                limits.stack_capacity,
                operations,
            ),
            Request::Queue {
                capacity,
                operations,
            } => check_script(
                ContainerKind::Queue,
                capacity.unwrap_or(limits.queue_capacity),
                limits.queue_capacity,
                operations,
            ),
            Request::Fibonacci { n } => {
                let max = limits.fibonacci_ceiling();
                if *n < 1 || *n > i64::from(max) {
                    return Err(InputError::FibonacciOutOfRange { n: *n, max });
                }
                Ok(())
            }
        }
    }
}

fn check_len(algorithm: Algorithm, values: &[i64], max: usize) -> Result<(), InputError> {
    if values.is_empty() {
        return Err(InputError::Empty { what: "values" });
    }
    if values.len() > max {
        return Err(InputError::TooMany {
            what: algorithm.name(),
            len: values.len(),
            max,
        });
    }
    Ok(())
}

fn check_script(
    container: ContainerKind,
    capacity: usize,
    max_capacity: usize,
    operations: &[ContainerOp],
) -> Result<(), InputError> {
    if capacity == 0 {
        return Err(InputError::ZeroCapacity);
    }
    if capacity > max_capacity {
        return Err(InputError::TooMany {
            what: "container capacity",
            len: capacity,
            max: max_capacity,
        });
    }
    match operations.iter().find(|op| op.container() != container) {
        Some(op) => Err(InputError::UnsupportedOperation {
            operation: op.to_string(),
            container,
        }),
        None => Ok(()),
    }
}

fn parse_integer(token: &str) -> Result<i64, InputError> {
    if let Ok(value) = token.parse::<i64>() {
        return Ok(value);
    }
    match token.parse::<f64>() {
        Ok(_) => Err(InputError::NotAnInteger {
            token: token.to_string(),
        }),
        Err(_) => Err(InputError::NotANumber {
            token: token.to_string(),
        }),
    }
}

/// Parse a comma- or whitespace-separated list of integers
pub fn parse_values(text: &str) -> Result<Vec<i64>, InputError> {
    let values = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(parse_integer)
        .collect::<Result<Vec<_>, _>>()?;
    if values.is_empty() {
        return Err(InputError::Empty { what: "values" });
    }
    Ok(values)
}
