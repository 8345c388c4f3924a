//! # Introduction
//!
//! algoviz turns a classic algorithm run into a finite, ordered list of
//! self-contained snapshots. Each [`step::Step`] carries the full data state
//! at that moment, which elements play which role, and a one-line
//! description, so a consumer can render any step in isolation and move
//! forward or backward freely.
//!
//! ## Pipeline
//!
//! ```text
//! Request → validate → generator → Trace → Playback → TUI
//! ```
//!
//! 1. [`input`]: the [`input::Request`] union, sample inputs and validation
//!    against [`config::Limits`].
//! 2. [`generator`]: one generator per algorithm family, all reached through
//!    [`generator::generate`].
//! 3. [`structures`]: the data structures generators operate on (arena
//!    binary search tree, adjacency-list graph, bounded stack and queue).
//! 4. [`step`]: the step model and the [`step::Trace`] it is collected into.
//! 5. [`player`]: a cursor over a finished trace.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Algorithms
//!
//! Sorting: bubble, selection, insertion, merge, quick, heap, radix.
//! Searching: linear, binary. Trees: BST insert, search, delete and
//! traversals. Graphs: BFS, DFS, Dijkstra. Containers: bounded stack and
//! queue scripts. Dynamic programming: bottom-up Fibonacci.

pub mod config;
pub mod errors;
pub mod generator;
pub mod input;
pub mod player;
pub mod step;
pub mod structures;
pub mod ui;

pub use errors::{VizError, VizResult};
pub use generator::{generate, generate_json};
pub use input::{Algorithm, Request};
pub use step::{Step, StepKind, Trace};
