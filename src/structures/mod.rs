//! Working data structures the generators mutate
//!
//! - [`containers`]: capacity-bounded [`containers::BoundedStack`] and
//!   [`containers::BoundedQueue`]
//! - [`bst`]: arena-backed binary search tree with parent links
//! - [`graph`]: undirected graph keyed by string ids, adjacency kept in edge
//!   insertion order
//!
//! None of these types record steps themselves; the generators snapshot
//! them into owned step payloads.

pub mod bst;
pub mod containers;
pub mod graph;
