//! Undirected graph over string node ids
//!
//! Node ids map to dense indices through an `FxHashMap`; adjacency lists
//! keep edges in insertion order so traversals are deterministic.

use crate::errors::InputError;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Declared nodes and edges of a graph request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSpec {
    pub nodes: Vec<String>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

/// Undirected edge; the weight only matters to Dijkstra
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EdgeRepr")]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub weight: u64,
}

impl EdgeSpec {
    pub fn new(from: &str, to: &str) -> Self {
        Self::weighted(from, to, 1)
    }

    pub fn weighted(from: &str, to: &str, weight: u64) -> Self {
        EdgeSpec {
            from: from.to_string(),
            to: to.to_string(),
            weight,
        }
    }
}

fn unit_weight() -> u64 {
    1
}

/// Accepted edge spellings: `["A","B"]`, `["A","B",4]` or an object
#[derive(Deserialize)]
#[serde(untagged)]
enum EdgeRepr {
    Weighted(String, String, u64),
    Pair(String, String),
    Object {
        from: String,
        to: String,
        #[serde(default = "unit_weight")]
        weight: u64,
    },
}

impl From<EdgeRepr> for EdgeSpec {
    fn from(repr: EdgeRepr) -> Self {
        match repr {
            EdgeRepr::Weighted(from, to, weight) => EdgeSpec { from, to, weight },
            EdgeRepr::Pair(from, to) => EdgeSpec { from, to, weight: 1 },
            EdgeRepr::Object { from, to, weight } => EdgeSpec { from, to, weight },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Graph {
    ids: Vec<String>,
    index: FxHashMap<String, usize>,
    adjacency: Vec<Vec<(usize, u64)>>,
    edge_count: usize,
}

impl Graph {
    /// Validate `spec` and build the adjacency lists.
    ///
    /// A repeated edge between the same pair keeps the first weight.
    pub fn from_spec(spec: &GraphSpec, max_nodes: usize) -> Result<Self, InputError> {
        if spec.nodes.is_empty() {
            return Err(InputError::Empty { what: "graph" });
        }
        if spec.nodes.len() > max_nodes {
            return Err(InputError::TooMany {
                what: "graph",
                len: spec.nodes.len(),
                max: max_nodes,
            });
        }

        let mut index = FxHashMap::default();
        for (i, id) in spec.nodes.iter().enumerate() {
            if index.insert(id.clone(), i).is_some() {
                return Err(InputError::DuplicateNode { id: id.clone() });
            }
        }

        let mut graph = Graph {
            ids: spec.nodes.clone(),
            index,
            adjacency: vec![Vec::new(); spec.nodes.len()],
            edge_count: 0,
        };
        let mut seen: FxHashSet<(usize, usize)> = FxHashSet::default();
        for edge in &spec.edges {
            let a = graph.require(&edge.from)?;
            let b = graph.require(&edge.to)?;
            if !seen.insert((a.min(b), a.max(b))) {
                continue;
            }
            graph.adjacency[a].push((b, edge.weight));
            if a != b {
                graph.adjacency[b].push((a, edge.weight));
            }
            graph.edge_count += 1;
        }
        Ok(graph)
    }

    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn id(&self, index: usize) -> &str {
        &self.ids[index]
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn require(&self, id: &str) -> Result<usize, InputError> {
        self.index_of(id)
            .ok_or_else(|| InputError::UnknownNode { id: id.to_string() })
    }

    /// Neighbors with edge weights, in edge insertion order
    pub fn neighbors(&self, index: usize) -> &[(usize, u64)] {
        &self.adjacency[index]
    }
}
