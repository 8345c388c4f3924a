//! Graph traversal step generators
//!
//! Neighbors are always explored in edge insertion order. Nodes that cannot
//! be reached from the start never appear in a step.

use super::recorder::Recorder;
use crate::errors::InputError;
use crate::input::Algorithm;
use crate::step::{GraphDetail, GraphStep, StepKind, Trace};
use crate::structures::graph::Graph;
use rustc_hash::FxHashSet;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, VecDeque};

/// Traversal bookkeeping shared by the generators, by node index
#[derive(Debug, Default)]
struct Progress {
    frontier: Vec<usize>,
    visited: Vec<usize>,
    finished: Vec<usize>,
}

impl Progress {
    fn emit(
        &self,
        graph: &Graph,
        kind: StepKind,
        current: Option<usize>,
        edge: Option<(usize, usize)>,
        detail: GraphDetail,
        description: String,
    ) -> GraphStep {
        let names = |indices: &[usize]| -> Vec<String> {
            indices.iter().map(|&i| graph.id(i).to_string()).collect()
        };
        GraphStep {
            kind,
            current: current.map(|i| graph.id(i).to_string()),
            frontier: names(&self.frontier),
            visited: names(&self.visited),
            finished: names(&self.finished),
            edge: edge.map(|(a, b)| (graph.id(a).to_string(), graph.id(b).to_string())),
            description,
            detail,
        }
    }
}

fn joined(graph: &Graph, indices: &[usize]) -> String {
    indices
        .iter()
        .map(|&i| graph.id(i))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Breadth-first search. A neighbor is enqueued once, when first discovered,
/// and its level is fixed at that moment.
pub fn bfs(graph: &Graph, start: &str) -> Result<Trace, InputError> {
    let start = graph.require(start)?;
    let mut levels: Vec<Option<usize>> = vec![None; graph.node_count()];
    let level_map = |levels: &[Option<usize>]| GraphDetail::Bfs {
        levels: levels
            .iter()
            .enumerate()
            .filter_map(|(i, l)| l.map(|l| (graph.id(i).to_string(), l)))
            .collect::<BTreeMap<_, _>>(),
    };

    let mut rec = Recorder::new();
    let mut progress = Progress::default();
    let mut queue = VecDeque::from([start]);
    let mut discovered = FxHashSet::default();
    discovered.insert(start);
    levels[start] = Some(0);
    progress.frontier = queue.iter().copied().collect();
    rec.push(progress.emit(
        graph,
        StepKind::Initial,
        None,
        None,
        level_map(&levels),
        format!("Starting breadth-first search from {}", graph.id(start)),
    ));

    while let Some(node) = queue.pop_front() {
        let level = levels[node].unwrap_or_default();
        progress.visited.push(node);
        progress.frontier = queue.iter().copied().collect();
        rec.push(progress.emit(
            graph,
            StepKind::Visit,
            Some(node),
            None,
            level_map(&levels),
            format!("Dequeued and visited {} at level {}", graph.id(node), level),
        ));

        for &(neighbor, _) in graph.neighbors(node) {
            if !discovered.insert(neighbor) {
                continue;
            }
            levels[neighbor] = Some(level + 1);
            queue.push_back(neighbor);
            progress.frontier = queue.iter().copied().collect();
            rec.push(progress.emit(
                graph,
                StepKind::Enqueue,
                Some(node),
                Some((node, neighbor)),
                level_map(&levels),
                format!(
                    "Discovered {} from {}; enqueued at level {}",
                    graph.id(neighbor),
                    graph.id(node),
                    level + 1
                ),
            ));
        }
        progress.finished.push(node);
    }

    let order = joined(graph, &progress.visited);
    rec.push(progress.emit(
        graph,
        StepKind::Completed,
        None,
        None,
        level_map(&levels),
        format!("Breadth-first search complete; visit order: {}", order),
    ));
    Ok(rec.finish(Algorithm::Bfs))
}

/// Depth-first search with an explicit stack. Unvisited neighbors are pushed
/// in reverse order so the first neighbor is explored first; a node popped a
/// second time is skipped.
pub fn dfs(graph: &Graph, start: &str) -> Result<Trace, InputError> {
    let start = graph.require(start)?;
    let mut rec = Recorder::new();
    let mut progress = Progress::default();
    let mut stack = vec![start];
    let mut visited = FxHashSet::default();
    progress.frontier = stack.clone();
    rec.push(progress.emit(
        graph,
        StepKind::Initial,
        None,
        None,
        GraphDetail::Dfs,
        format!("Starting depth-first search from {}", graph.id(start)),
    ));

    while let Some(node) = stack.pop() {
        progress.frontier = stack.clone();
        if !visited.insert(node) {
            rec.push(progress.emit(
                graph,
                StepKind::AlreadyVisited,
                Some(node),
                None,
                GraphDetail::Dfs,
                format!("Popped {}, which was already visited; skipping", graph.id(node)),
            ));
            continue;
        }
        progress.visited.push(node);
        rec.push(progress.emit(
            graph,
            StepKind::Visit,
            Some(node),
            None,
            GraphDetail::Dfs,
            format!("Popped and visited {}", graph.id(node)),
        ));

        for &(neighbor, _) in graph.neighbors(node).iter().rev() {
            if visited.contains(&neighbor) {
                continue;
            }
            stack.push(neighbor);
            progress.frontier = stack.clone();
            rec.push(progress.emit(
                graph,
                StepKind::Push,
                Some(node),
                Some((node, neighbor)),
                GraphDetail::Dfs,
                format!("Pushed unvisited neighbor {} of {}", graph.id(neighbor), graph.id(node)),
            ));
        }
    }

    progress.finished = progress.visited.clone();
    let order = joined(graph, &progress.visited);
    rec.push(progress.emit(
        graph,
        StepKind::Completed,
        None,
        None,
        GraphDetail::Dfs,
        format!("Depth-first search complete; visit order: {}", order),
    ));
    Ok(rec.finish(Algorithm::Dfs))
}

/// Dijkstra's shortest paths with a binary heap. Ties between equal
/// distances settle the earlier-declared node first.
pub fn dijkstra(graph: &Graph, start: &str) -> Result<Trace, InputError> {
    let start = graph.require(start)?;
    let n = graph.node_count();
    let mut distance: Vec<Option<u64>> = vec![None; n];
    let mut previous: Vec<Option<usize>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut heap = BinaryHeap::new();

    let detail = |distance: &[Option<u64>], previous: &[Option<usize>]| GraphDetail::Dijkstra {
        distances: distance
            .iter()
            .enumerate()
            .map(|(i, d)| (graph.id(i).to_string(), *d))
            .collect(),
        previous: previous
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|p| (graph.id(i).to_string(), graph.id(p).to_string())))
            .collect(),
    };
    let pending = |heap: &BinaryHeap<Reverse<(u64, usize)>>, settled: &[bool]| {
        let mut entries: Vec<(u64, usize)> = heap
            .iter()
            .map(|Reverse(entry)| *entry)
            .filter(|(_, node)| !settled[*node])
            .collect();
        entries.sort_unstable();
        let mut order = Vec::new();
        for (_, node) in entries {
            if !order.contains(&node) {
                order.push(node);
            }
        }
        order
    };

    let mut rec = Recorder::new();
    let mut progress = Progress::default();
    distance[start] = Some(0);
    heap.push(Reverse((0, start)));
    progress.frontier = vec![start];
    rec.push(progress.emit(
        graph,
        StepKind::Initial,
        None,
        None,
        detail(&distance, &previous),
        format!(
            "Starting Dijkstra from {}; every other distance is infinite",
            graph.id(start)
        ),
    ));

    while let Some(Reverse((dist, node))) = heap.pop() {
        if settled[node] {
            continue;
        }
        settled[node] = true;
        progress.visited.push(node);
        progress.frontier = pending(&heap, &settled);
        rec.push(progress.emit(
            graph,
            StepKind::Visit,
            Some(node),
            None,
            detail(&distance, &previous),
            format!("Visiting {} with shortest distance {}", graph.id(node), dist),
        ));

        for &(neighbor, weight) in graph.neighbors(node) {
            if settled[neighbor] {
                continue;
            }
            let candidate = dist.saturating_add(weight);
            let improves = distance[neighbor].map_or(true, |current| candidate < current);
            let (kind, description) = if improves {
                let before = distance[neighbor]
                    .map_or_else(|| "infinity".to_string(), |d| d.to_string());
                distance[neighbor] = Some(candidate);
                previous[neighbor] = Some(node);
                heap.push(Reverse((candidate, neighbor)));
                (
                    StepKind::DistanceUpdated,
                    format!(
                        "Distance to {} improved from {} to {} via {}",
                        graph.id(neighbor),
                        before,
                        candidate,
                        graph.id(node)
                    ),
                )
            } else {
                (
                    StepKind::DistanceKept,
                    format!(
                        "Path to {} via {} costs {}; keeping {}",
                        graph.id(neighbor),
                        graph.id(node),
                        candidate,
                        distance[neighbor].unwrap_or_default()
                    ),
                )
            };
            progress.frontier = pending(&heap, &settled);
            rec.push(progress.emit(
                graph,
                kind,
                Some(node),
                Some((node, neighbor)),
                detail(&distance, &previous),
                description,
            ));
        }
        progress.finished.push(node);
    }

    rec.push(progress.emit(
        graph,
        StepKind::Completed,
        None,
        None,
        detail(&distance, &previous),
        format!(
            "Dijkstra complete; settled {} of {} node(s)",
            progress.visited.len(),
            n
        ),
    ));
    Ok(rec.finish(Algorithm::Dijkstra))
}

/// Follow `previous` links from `goal` back to `start`
pub fn shortest_path(
    previous: &BTreeMap<String, String>,
    start: &str,
    goal: &str,
) -> Option<Vec<String>> {
    let mut path = vec![goal.to_string()];
    let mut current = goal;
    while current != start {
        current = previous.get(current)?;
        path.push(current.to_string());
        if path.len() > previous.len() + 1 {
            return None;
        }
    }
    path.reverse();
    Some(path)
}
