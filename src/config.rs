//! Input limits and container capacities
//!
//! The defaults keep every trace small enough to watch step by step: a
//! dozen bars fit on one screen and a ten-node graph fits in one pane.

use serde::{Deserialize, Serialize};

/// Maximum number of values accepted by the comparison sorts and searches
pub const MAX_ARRAY_LEN: usize = 10;

/// Radix sort tolerates a few more values since its passes are linear
pub const MAX_RADIX_LEN: usize = 15;

/// Maximum number of nodes in a traversal graph
pub const MAX_GRAPH_NODES: usize = 10;

/// Maximum number of values in one BST build
pub const MAX_TREE_VALUES: usize = 15;

/// Default stack capacity
pub const STACK_CAPACITY: usize = 10;

/// Default queue capacity
pub const QUEUE_CAPACITY: usize = 8;

/// Largest Fibonacci index whose value fits in a `u64` with room to spare
pub const MAX_FIBONACCI: u32 = 90;

/// Number of radix buckets (decimal digits)
pub const RADIX_BASE: i64 = 10;

/// Size limits applied before any step is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_array_len: usize,
    pub max_radix_len: usize,
    pub max_graph_nodes: usize,
    pub max_tree_values: usize,
    pub stack_capacity: usize,
    pub queue_capacity: usize,
    /// Values above [`MAX_FIBONACCI`] are treated as [`MAX_FIBONACCI`]
    pub max_fibonacci: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_array_len: MAX_ARRAY_LEN,
            max_radix_len: MAX_RADIX_LEN,
            max_graph_nodes: MAX_GRAPH_NODES,
            max_tree_values: MAX_TREE_VALUES,
            stack_capacity: STACK_CAPACITY,
            queue_capacity: QUEUE_CAPACITY,
            max_fibonacci: MAX_FIBONACCI,
        }
    }
}

impl Limits {
    /// Largest Fibonacci index a request may ask for
    pub fn fibonacci_ceiling(&self) -> u32 {
        self.max_fibonacci.min(MAX_FIBONACCI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_limits_fall_back_to_defaults() {
        let limits: Limits = serde_json::from_str(r#"{ "stack_capacity": 3 }"#).unwrap();
        assert_eq!(limits.stack_capacity, 3);
        assert_eq!(limits.queue_capacity, QUEUE_CAPACITY);
        assert_eq!(limits.max_array_len, MAX_ARRAY_LEN);
    }

    #[test]
    fn fibonacci_ceiling_is_capped() {
        let limits: Limits = serde_json::from_str(r#"{ "max_fibonacci": 100 }"#).unwrap();
        assert_eq!(limits.fibonacci_ceiling(), MAX_FIBONACCI);
        let lower = Limits {
            max_fibonacci: 20,
            ..Limits::default()
        };
        assert_eq!(lower.fibonacci_ceiling(), 20);
    }
}
