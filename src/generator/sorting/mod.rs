//! Sorting step generators
//!
//! All sorts work on an owned copy of the input and emit an `initial`
//! snapshot, the algorithm's own steps, then one `completed` step with every
//! position marked sorted. A single value short-circuits to the `completed`
//! step alone.
//!
//! - [`comparison`]: bubble, selection and insertion sort
//! - [`divide`]: merge sort and quick sort (Lomuto, last element as pivot)
//! - [`heap`]: max-heap sort
//! - [`radix`]: LSD radix sort, base 10

mod comparison;
mod divide;
mod heap;
mod radix;

pub use comparison::{bubble_sort, insertion_sort, selection_sort};
pub use divide::{merge_sort, quick_sort};
pub use heap::heap_sort;
pub use radix::radix_sort;

use super::recorder::SortRecorder;
use crate::errors::InputError;
use crate::input::Algorithm;
use crate::step::{Roles, SortDetail, StepKind, Trace};

fn require_values(values: &[i64]) -> Result<(), InputError> {
    if values.is_empty() {
        return Err(InputError::Empty { what: "values" });
    }
    Ok(())
}

/// Trace for input that needs no work
fn already_sorted(algorithm: Algorithm, values: &[i64], detail: SortDetail) -> Trace {
    let mut rec = SortRecorder::new();
    rec.mark_all_sorted(values.len());
    rec.record(
        StepKind::Completed,
        values,
        Roles::new(),
        detail,
        "A single value is already sorted",
    );
    rec.finish(algorithm)
}

fn finish(
    mut rec: SortRecorder,
    algorithm: Algorithm,
    array: &[i64],
    detail: SortDetail,
) -> Trace {
    rec.mark_all_sorted(array.len());
    rec.record(
        StepKind::Completed,
        array,
        Roles::new(),
        detail,
        format!("Array is now sorted: {}", join(array)),
    );
    tracing::trace!(steps = rec.len(), %algorithm, "sort finished");
    rec.finish(algorithm)
}

fn join(values: &[i64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
