//! Divide-and-conquer sorts

use super::{already_sorted, finish, require_values};
use crate::errors::InputError;
use crate::generator::recorder::SortRecorder;
use crate::input::Algorithm;
use crate::step::{Roles, SortDetail, StepKind, Trace};

/// Top-down merge sort over inclusive ranges. Ties take the left run first.
pub fn merge_sort(values: &[i64]) -> Result<Trace, InputError> {
    require_values(values)?;
    let n = values.len();
    if n == 1 {
        return Ok(already_sorted(
            Algorithm::MergeSort,
            values,
            SortDetail::Merge { recursion_level: 0 },
        ));
    }

    let mut array = values.to_vec();
    let mut rec = SortRecorder::new();
    rec.record(
        StepKind::Initial,
        &array,
        Roles::new(),
        SortDetail::Merge { recursion_level: 0 },
        "Initial array state",
    );
    merge_range(&mut array, 0, n - 1, 0, &mut rec);
    Ok(finish(
        rec,
        Algorithm::MergeSort,
        &array,
        SortDetail::Merge { recursion_level: 0 },
    ))
}

fn merge_range(array: &mut [i64], lo: usize, hi: usize, level: usize, rec: &mut SortRecorder) {
    if lo >= hi {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    rec.record(
        StepKind::Divide,
        array,
        Roles::new().with_left(lo..=mid).with_right(mid + 1..=hi),
        SortDetail::Merge {
            recursion_level: level,
        },
        format!(
            "Level {}: dividing [{}..{}] into [{}..{}] and [{}..{}]",
            level,
            lo,
            hi,
            lo,
            mid,
            mid + 1,
            hi
        ),
    );
    merge_range(array, lo, mid, level + 1, rec);
    merge_range(array, mid + 1, hi, level + 1, rec);
    merge(array, lo, mid, hi, level, rec);
}

fn merge(array: &mut [i64], lo: usize, mid: usize, hi: usize, level: usize, rec: &mut SortRecorder) {
    let left = array[lo..=mid].to_vec();
    let right = array[mid + 1..=hi].to_vec();
    let detail = SortDetail::Merge {
        recursion_level: level,
    };
    rec.record(
        StepKind::MergeStart,
        array,
        Roles::new()
            .with_left(lo..=mid)
            .with_right(mid + 1..=hi)
            .with_active(lo..=hi),
        detail.clone(),
        format!(
            "Merging [{}..{}] and [{}..{}]",
            lo,
            mid,
            mid + 1,
            hi
        ),
    );

    let (mut i, mut j, mut k) = (0, 0, lo);
    while i < left.len() && j < right.len() {
        rec.record(
            StepKind::Compare,
            array,
            Roles::new()
                .with_comparing([lo + i, mid + 1 + j])
                .with_active(lo..=hi),
            detail.clone(),
            format!("Comparing {} from the left run with {} from the right run", left[i], right[j]),
        );
        let (value, from) = if left[i] <= right[j] {
            i += 1;
            (left[i - 1], "left")
        } else {
            j += 1;
            (right[j - 1], "right")
        };
        array[k] = value;
        rec.record(
            StepKind::MergePlace,
            array,
            Roles::new().with_highlighted([k]).with_active(lo..=hi),
            detail.clone(),
            format!("Placed {} from the {} run at position {}", value, from, k),
        );
        k += 1;
    }

    for (value, from) in left[i..]
        .iter()
        .map(|v| (*v, "left"))
        .chain(right[j..].iter().map(|v| (*v, "right")))
    {
        array[k] = value;
        rec.record(
            StepKind::MergePlace,
            array,
            Roles::new().with_highlighted([k]).with_active(lo..=hi),
            detail.clone(),
            format!("Copied remaining {} from the {} run to position {}", value, from, k),
        );
        k += 1;
    }

    rec.record(
        StepKind::MergeComplete,
        array,
        Roles::new().with_active(lo..=hi),
        detail,
        format!("Level {}: merged [{}..{}]", level, lo, hi),
    );
}

/// Quick sort with Lomuto partitioning. Elements `<=` the pivot go left; a
/// swap is only recorded when two distinct positions are exchanged.
pub fn quick_sort(values: &[i64]) -> Result<Trace, InputError> {
    require_values(values)?;
    let n = values.len();
    if n == 1 {
        return Ok(already_sorted(
            Algorithm::QuickSort,
            values,
            SortDetail::Quick { pivot: None },
        ));
    }

    let mut array = values.to_vec();
    let mut rec = SortRecorder::new();
    rec.record(
        StepKind::Initial,
        &array,
        Roles::new(),
        SortDetail::Quick { pivot: None },
        "Initial array state",
    );
    quick_range(&mut array, 0, n - 1, &mut rec);
    Ok(finish(
        rec,
        Algorithm::QuickSort,
        &array,
        SortDetail::Quick { pivot: None },
    ))
}

fn quick_range(array: &mut [i64], lo: usize, hi: usize, rec: &mut SortRecorder) {
    if lo == hi {
        rec.mark_sorted(lo);
        return;
    }
    let p = partition(array, lo, hi, rec);
    if p > lo {
        quick_range(array, lo, p - 1, rec);
    }
    if p < hi {
        quick_range(array, p + 1, hi, rec);
    }
}

fn partition(array: &mut [i64], lo: usize, hi: usize, rec: &mut SortRecorder) -> usize {
    let pivot = array[hi];
    rec.record(
        StepKind::PivotSelect,
        array,
        Roles::new().with_highlighted([hi]).with_active(lo..=hi),
        SortDetail::Quick { pivot: Some(hi) },
        format!(
            "Selected pivot {} at position {} for range [{}..{}]",
            pivot, hi, lo, hi
        ),
    );

    let mut store = lo;
    for j in lo..hi {
        rec.record(
            StepKind::Compare,
            array,
            Roles::new()
                .with_comparing([j, hi])
                .with_left(lo..store)
                .with_right(store..j)
                .with_active(lo..=hi),
            SortDetail::Quick { pivot: Some(hi) },
            format!("Comparing {} with pivot {}", array[j], pivot),
        );
        if array[j] <= pivot {
            if store != j {
                array.swap(store, j);
                rec.record(
                    StepKind::Swap,
                    array,
                    Roles::new()
                        .with_swapping([store, j])
                        .with_active(lo..=hi),
                    SortDetail::Quick { pivot: Some(hi) },
                    format!(
                        "Swapped {} and {}: {} belongs left of the pivot",
                        array[store], array[j], array[store]
                    ),
                );
            }
            store += 1;
        }
    }

    let placed_roles = if store != hi {
        array.swap(store, hi);
        Roles::new().with_swapping([store, hi])
    } else {
        Roles::new().with_highlighted([store])
    };
    rec.mark_sorted(store);
    rec.record(
        StepKind::PivotPlace,
        array,
        placed_roles.with_active(lo..=hi),
        SortDetail::Quick { pivot: Some(store) },
        format!("Placed pivot {} at its final position {}", pivot, store),
    );
    rec.record(
        StepKind::PartitionComplete,
        array,
        Roles::new()
            .with_left(lo..store)
            .with_right(store + 1..=hi),
        SortDetail::Quick { pivot: Some(store) },
        format!(
            "Partition of [{}..{}] complete: smaller values left of {}, larger right",
            lo, hi, pivot
        ),
    );
    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Step;

    fn last_array(trace: &Trace) -> Vec<i64> {
        trace.terminal().and_then(Step::array).unwrap().to_vec()
    }

    #[test]
    fn merge_sort_takes_left_run_on_ties() {
        let trace = merge_sort(&[3, 2, 1, 2]).unwrap();
        let top_level: Vec<&str> = trace
            .iter()
            .filter(|s| s.kind() == StepKind::MergePlace)
            .filter(|s| {
                matches!(
                    s,
                    Step::Sort(step) if step.detail == SortDetail::Merge { recursion_level: 0 }
                )
            })
            .map(Step::description)
            .collect();
        assert_eq!(
            top_level,
            vec![
                "Placed 1 from the right run at position 0",
                "Placed 2 from the left run at position 1",
                "Placed 2 from the right run at position 2",
                "Copied remaining 3 from the left run to position 3",
            ]
        );
        assert_eq!(last_array(&trace), vec![1, 2, 2, 3]);
    }

    #[test]
    fn merge_sort_sample() {
        let trace = merge_sort(&[38, 27, 43, 3, 9, 82, 10]).unwrap();
        assert_eq!(last_array(&trace), vec![3, 9, 10, 27, 38, 43, 82]);
        assert_eq!(trace.count_kind(StepKind::MergeComplete), 6);
        assert_eq!(trace.count_kind(StepKind::MergePlace), 20);
    }

    #[test]
    fn merge_sort_two_values() {
        let trace = merge_sort(&[2, 1]).unwrap();
        let kinds: Vec<StepKind> = trace.iter().map(Step::kind).collect();
        assert_eq!(
            kinds,
            vec![
                StepKind::Initial,
                StepKind::Divide,
                StepKind::MergeStart,
                StepKind::Compare,
                StepKind::MergePlace,
                StepKind::MergePlace,
                StepKind::MergeComplete,
                StepKind::Completed,
            ]
        );
    }

    #[test]
    fn quick_sort_places_every_pivot() {
        let trace = quick_sort(&[10, 80, 30, 90, 40, 50, 70]).unwrap();
        assert_eq!(last_array(&trace), vec![10, 30, 40, 50, 70, 80, 90]);
        let pivots = trace.count_kind(StepKind::PivotPlace);
        assert_eq!(pivots, trace.count_kind(StepKind::PivotSelect));
        assert_eq!(pivots, trace.count_kind(StepKind::PartitionComplete));
    }

    #[test]
    fn quick_sort_skips_self_swaps() {
        let trace = quick_sort(&[1, 2, 3]).unwrap();
        assert_eq!(trace.count_kind(StepKind::Swap), 0);
        assert_eq!(last_array(&trace), vec![1, 2, 3]);
    }
}
