//! Quadratic comparison sorts

use super::{already_sorted, finish, require_values};
use crate::errors::InputError;
use crate::generator::recorder::SortRecorder;
use crate::input::Algorithm;
use crate::step::{Roles, SortDetail, StepKind, Trace};

/// Bubble sort without early exit: pass `i` compares pairs up to `n - 2 - i`
/// and then fixes position `n - 1 - i`.
pub fn bubble_sort(values: &[i64]) -> Result<Trace, InputError> {
    require_values(values)?;
    let n = values.len();
    if n == 1 {
        return Ok(already_sorted(
            Algorithm::BubbleSort,
            values,
            SortDetail::Bubble { pass: 0 },
        ));
    }

    let mut array = values.to_vec();
    let mut rec = SortRecorder::new();
    rec.record(
        StepKind::Initial,
        &array,
        Roles::new(),
        SortDetail::Bubble { pass: 0 },
        "Initial array state",
    );

    for pass in 0..n {
        for j in 0..n - 1 - pass {
            rec.record(
                StepKind::Compare,
                &array,
                Roles::new().with_comparing([j, j + 1]),
                SortDetail::Bubble { pass },
                format!(
                    "Pass {}: comparing {} and {} at positions {} and {}",
                    pass + 1,
                    array[j],
                    array[j + 1],
                    j,
                    j + 1
                ),
            );
            if array[j] > array[j + 1] {
                array.swap(j, j + 1);
                rec.record(
                    StepKind::Swap,
                    &array,
                    Roles::new().with_swapping([j, j + 1]),
                    SortDetail::Bubble { pass },
                    format!(
                        "Swapped {} and {} since {} > {}",
                        array[j + 1],
                        array[j],
                        array[j + 1],
                        array[j]
                    ),
                );
            }
        }
        rec.mark_sorted(n - 1 - pass);
    }

    Ok(finish(
        rec,
        Algorithm::BubbleSort,
        &array,
        SortDetail::Bubble { pass: n },
    ))
}

/// Selection sort; a compare step that finds a new minimum says so and
/// carries the updated `current_min`.
pub fn selection_sort(values: &[i64]) -> Result<Trace, InputError> {
    require_values(values)?;
    let n = values.len();
    if n == 1 {
        return Ok(already_sorted(
            Algorithm::SelectionSort,
            values,
            SortDetail::Selection {
                current_min: None,
                sorted_boundary: 1,
            },
        ));
    }

    let mut array = values.to_vec();
    let mut rec = SortRecorder::new();
    rec.record(
        StepKind::Initial,
        &array,
        Roles::new(),
        SortDetail::Selection {
            current_min: None,
            sorted_boundary: 0,
        },
        "Initial array state",
    );

    for i in 0..n {
        let mut min = i;
        rec.record(
            StepKind::Select,
            &array,
            Roles::new().with_highlighted([i]),
            SortDetail::Selection {
                current_min: Some(i),
                sorted_boundary: i,
            },
            format!(
                "Pass {}: looking for the minimum from position {} onwards",
                i + 1,
                i
            ),
        );

        for j in i + 1..n {
            let previous = min;
            let description = if array[j] < array[min] {
                min = j;
                format!(
                    "New minimum found: {} at position {} is smaller than {}",
                    array[j], j, array[previous]
                )
            } else {
                format!(
                    "Comparing {} at position {} with current minimum {}",
                    array[j], j, array[min]
                )
            };
            rec.record(
                StepKind::Compare,
                &array,
                Roles::new()
                    .with_comparing([previous, j])
                    .with_highlighted([min]),
                SortDetail::Selection {
                    current_min: Some(min),
                    sorted_boundary: i,
                },
                description,
            );
        }

        rec.mark_sorted(i);
        if min != i {
            array.swap(i, min);
            rec.record(
                StepKind::Swap,
                &array,
                Roles::new().with_swapping([i, min]),
                SortDetail::Selection {
                    current_min: Some(i),
                    sorted_boundary: i + 1,
                },
                format!("Swapped minimum {} into position {}", array[i], i),
            );
        } else {
            rec.record(
                StepKind::InPlace,
                &array,
                Roles::new().with_highlighted([i]),
                SortDetail::Selection {
                    current_min: Some(i),
                    sorted_boundary: i + 1,
                },
                format!("{} is already in its correct position", array[i]),
            );
        }
    }

    Ok(finish(
        rec,
        Algorithm::SelectionSort,
        &array,
        SortDetail::Selection {
            current_min: None,
            sorted_boundary: n,
        },
    ))
}

/// Insertion sort with an explicit hole: larger elements shift right one at
/// a time, then the held element is written into the hole.
///
/// The loop-ending comparison (the one that finds a smaller or equal
/// element) is recorded too, so ties stay in input order.
pub fn insertion_sort(values: &[i64]) -> Result<Trace, InputError> {
    require_values(values)?;
    let n = values.len();
    if n == 1 {
        return Ok(already_sorted(
            Algorithm::InsertionSort,
            values,
            SortDetail::Insertion {
                current_element: None,
                sorted_boundary: 1,
            },
        ));
    }

    let mut array = values.to_vec();
    let mut rec = SortRecorder::new();
    rec.record(
        StepKind::Initial,
        &array,
        Roles::new(),
        SortDetail::Insertion {
            current_element: None,
            sorted_boundary: 1,
        },
        "Initial array state; the first element forms the sorted portion",
    );

    for i in 1..n {
        let current = array[i];
        rec.record(
            StepKind::Select,
            &array,
            Roles::new().with_highlighted([i]).with_left(0..i),
            SortDetail::Insertion {
                current_element: Some(i),
                sorted_boundary: i,
            },
            format!("Processing element {} at position {}", current, i),
        );

        let mut hole = i;
        while hole > 0 {
            rec.record(
                StepKind::Compare,
                &array,
                Roles::new().with_comparing([hole - 1, hole]),
                SortDetail::Insertion {
                    current_element: Some(hole),
                    sorted_boundary: i,
                },
                format!(
                    "Comparing {} with {} at position {}",
                    current,
                    array[hole - 1],
                    hole - 1
                ),
            );
            if array[hole - 1] <= current {
                break;
            }
            array[hole] = array[hole - 1];
            rec.record(
                StepKind::Shift,
                &array,
                Roles::new().with_highlighted([hole]),
                SortDetail::Insertion {
                    current_element: Some(hole - 1),
                    sorted_boundary: i,
                },
                format!("Shifted {} right to position {}", array[hole], hole),
            );
            hole -= 1;
        }

        let detail = SortDetail::Insertion {
            current_element: None,
            sorted_boundary: i + 1,
        };
        let roles = Roles::new().with_highlighted([hole]).with_left(0..=i);
        if hole == i {
            rec.record(
                StepKind::InPlace,
                &array,
                roles,
                detail,
                format!(
                    "{} already in place; sorted portion now has {} elements",
                    current,
                    i + 1
                ),
            );
            continue;
        }
        array[hole] = current;
        rec.record(
            StepKind::Insert,
            &array,
            roles,
            detail,
            format!(
                "Inserted {} at position {}; sorted portion now has {} elements",
                current,
                hole,
                i + 1
            ),
        );
    }

    Ok(finish(
        rec,
        Algorithm::InsertionSort,
        &array,
        SortDetail::Insertion {
            current_element: None,
            sorted_boundary: n,
        },
    ))
}
