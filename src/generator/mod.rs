//! Step generation
//!
//! [`generate`] is the single entry point: it validates a [`Request`]
//! against [`Limits`], then dispatches to the algorithm's generator, which
//! runs the algorithm on owned working state and snapshots it after every
//! atomic action. Generation is all-or-nothing: a rejected request yields an
//! error and no steps.
//!
//! - [`sorting`]: bubble, selection, insertion, merge, quick, heap, radix
//! - [`search`]: linear and binary search
//! - [`tree`]: binary search tree insert/search/delete/traversal
//! - [`graph`]: BFS, DFS and Dijkstra
//! - [`containers`]: bounded stack and queue scripts
//! - [`dp`]: Fibonacci table

pub mod containers;
pub mod dp;
pub mod graph;
pub(crate) mod recorder;
pub mod search;
pub mod sorting;
pub mod tree;

use crate::config::Limits;
use crate::errors::VizResult;
use crate::input::Request;
use crate::step::Trace;
use crate::structures::graph::Graph;

/// Produce the complete step trace for `request`
#[tracing::instrument(skip_all, fields(algorithm = %request.algorithm()))]
pub fn generate(request: &Request, limits: &Limits) -> VizResult<Trace> {
    if let Err(err) = request.validate(limits) {
        tracing::warn!(%err, "request rejected");
        return Err(err.into());
    }

    let trace = match request {
        Request::BubbleSort { values } => sorting::bubble_sort(values)?,
        Request::SelectionSort { values } => sorting::selection_sort(values)?,
        Request::InsertionSort { values } => sorting::insertion_sort(values)?,
        Request::MergeSort { values } => sorting::merge_sort(values)?,
        Request::QuickSort { values } => sorting::quick_sort(values)?,
        Request::HeapSort { values } => sorting::heap_sort(values)?,
        Request::RadixSort { values } => sorting::radix_sort(values)?,
        Request::LinearSearch { values, target } => search::linear_search(values, *target)?,
        Request::BinarySearch { values, target } => search::binary_search(values, *target)?,
        Request::Bst { values, operation } => tree::run(values, *operation)?,
        Request::Bfs { graph, start } => {
            graph::bfs(&Graph::from_spec(graph, limits.max_graph_nodes)?, start)?
        }
        Request::Dfs { graph, start } => {
            graph::dfs(&Graph::from_spec(graph, limits.max_graph_nodes)?, start)?
        }
        Request::Dijkstra { graph, start } => {
            graph::dijkstra(&Graph::from_spec(graph, limits.max_graph_nodes)?, start)?
        }
        Request::Stack {
            capacity,
            operations,
        } => containers::stack_script(capacity.unwrap_or(limits.stack_capacity), operations)?,
        Request::Queue {
            capacity,
            operations,
        } => containers::queue_script(capacity.unwrap_or(limits.queue_capacity), operations)?,
        Request::Fibonacci { n } => dp::fibonacci(*n)?,
    };

    tracing::debug!(steps = trace.len(), "trace generated");
    Ok(trace)
}

/// Parse a JSON request and generate its trace
pub fn generate_json(request: &str, limits: &Limits) -> VizResult<Trace> {
    let request: Request = serde_json::from_str(request)?;
    generate(&request, limits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{InputError, VizError};
    use crate::input::Algorithm;

    #[test]
    fn every_sample_generates_a_terminated_trace() {
        let limits = Limits::default();
        for algorithm in Algorithm::ALL {
            let trace = generate(&Request::sample(algorithm), &limits)
                .unwrap_or_else(|e| panic!("{} failed: {}", algorithm, e));
            assert_eq!(trace.algorithm, algorithm);
            let terminal = trace.terminal().expect("non-empty trace");
            assert!(terminal.kind().is_terminal(), "{}", algorithm);
        }
    }

    #[test]
    fn limits_are_applied_before_generation() {
        let request = Request::QuickSort {
            values: (0..11).collect(),
        };
        assert!(matches!(
            generate(&request, &Limits::default()),
            Err(VizError::Input(InputError::TooMany { .. }))
        ));
    }

    #[test]
    fn oversized_capacity_limits_do_not_allocate_up_front() {
        let limits: Limits = serde_json::from_str(
            r#"{ "stack_capacity": 18446744073709551615, "queue_capacity": 18446744073709551615 }"#,
        )
        .unwrap();
        let stack = Request::Stack {
            capacity: None,
            operations: vec![],
        };
        assert_eq!(generate(&stack, &limits).unwrap().len(), 2);
        let queue = Request::Queue {
            capacity: None,
            operations: vec![],
        };
        assert_eq!(generate(&queue, &limits).unwrap().len(), 2);
    }

    #[test]
    fn fibonacci_limit_above_u64_range_is_capped() {
        let limits = Limits {
            max_fibonacci: 100,
            ..Limits::default()
        };
        assert!(matches!(
            generate(&Request::Fibonacci { n: 95 }, &limits),
            Err(VizError::Input(InputError::FibonacciOutOfRange { n: 95, max: 90 }))
        ));
        assert!(generate(&Request::Fibonacci { n: 90 }, &limits).is_ok());
    }

    #[test]
    fn malformed_json_is_a_request_error() {
        assert!(matches!(
            generate_json(r#"{"algorithm":"warp_sort","values":[1]}"#, &Limits::default()),
            Err(VizError::Request(_))
        ));
    }
}
