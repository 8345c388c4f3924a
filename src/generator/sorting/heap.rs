use super::{already_sorted, finish, require_values};
use crate::errors::InputError;
use crate::generator::recorder::SortRecorder;
use crate::input::Algorithm;
use crate::step::{Roles, SortDetail, StepKind, Trace};

/// Heap sort: build a max-heap bottom-up, then repeatedly move the root to
/// the end of the shrinking heap and sift the new root down.
pub fn heap_sort(values: &[i64]) -> Result<Trace, InputError> {
    require_values(values)?;
    let n = values.len();
    if n == 1 {
        return Ok(already_sorted(
            Algorithm::HeapSort,
            values,
            SortDetail::Heap { heap_size: 1 },
        ));
    }

    let mut array = values.to_vec();
    let mut rec = SortRecorder::new();
    rec.record(
        StepKind::Initial,
        &array,
        Roles::new(),
        SortDetail::Heap { heap_size: n },
        "Building a max heap from the array",
    );

    for root in (0..n / 2).rev() {
        sift_down(&mut array, n, root, &mut rec);
    }
    rec.record(
        StepKind::HeapBuilt,
        &array,
        Roles::new().with_active(0..n),
        SortDetail::Heap { heap_size: n },
        format!("Max heap built; the maximum {} is at the root", array[0]),
    );

    for end in (1..n).rev() {
        rec.record(
            StepKind::ExtractMax,
            &array,
            Roles::new().with_swapping([0, end]).with_active(0..=end),
            SortDetail::Heap { heap_size: end + 1 },
            format!(
                "Moving maximum {} to its sorted position {}",
                array[0], end
            ),
        );
        array.swap(0, end);
        rec.mark_sorted(end);
        rec.record(
            StepKind::Swapped,
            &array,
            Roles::new().with_highlighted([0]).with_active(0..end),
            SortDetail::Heap { heap_size: end },
            format!(
                "Swapped {} into position {}; heap size is now {}",
                array[end], end, end
            ),
        );
        sift_down(&mut array, end, 0, &mut rec);
    }

    Ok(finish(
        rec,
        Algorithm::HeapSort,
        &array,
        SortDetail::Heap { heap_size: 0 },
    ))
}

fn sift_down(array: &mut [i64], size: usize, root: usize, rec: &mut SortRecorder) {
    let mut root = root;
    loop {
        let mut largest = root;
        let left = 2 * root + 1;
        let right = 2 * root + 2;

        if left < size {
            rec.record(
                StepKind::Compare,
                array,
                Roles::new().with_comparing([root, left]).with_active(0..size),
                SortDetail::Heap { heap_size: size },
                format!(
                    "Comparing parent {} with left child {}",
                    array[root], array[left]
                ),
            );
            if array[left] > array[largest] {
                largest = left;
            }
        }
        if right < size {
            rec.record(
                StepKind::Compare,
                array,
                Roles::new()
                    .with_comparing([largest, right])
                    .with_active(0..size),
                SortDetail::Heap { heap_size: size },
                format!(
                    "Comparing largest so far {} with right child {}",
                    array[largest], array[right]
                ),
            );
            if array[right] > array[largest] {
                largest = right;
            }
        }
        if largest == root {
            return;
        }

        rec.record(
            StepKind::HeapifySwap,
            array,
            Roles::new()
                .with_swapping([root, largest])
                .with_active(0..size),
            SortDetail::Heap { heap_size: size },
            format!(
                "{} is larger than its parent {}; swapping",
                array[largest], array[root]
            ),
        );
        array.swap(root, largest);
        rec.record(
            StepKind::HeapifySwapped,
            array,
            Roles::new()
                .with_highlighted([largest])
                .with_active(0..size),
            SortDetail::Heap { heap_size: size },
            format!("Swapped; continuing to sift {} down", array[largest]),
        );
        root = largest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{SortStep, Step};

    #[test]
    fn heap_sort_sorts_and_extracts_n_minus_one_times() {
        let trace = heap_sort(&[12, 11, 13, 5, 6, 7]).unwrap();
        assert_eq!(
            trace.terminal().and_then(Step::array).unwrap(),
            &[5, 6, 7, 11, 12, 13]
        );
        assert_eq!(trace.count_kind(StepKind::ExtractMax), 5);
        assert_eq!(trace.count_kind(StepKind::HeapBuilt), 1);
    }

    #[test]
    fn heap_is_valid_when_built() {
        let trace = heap_sort(&[3, 9, 2, 1, 4, 5]).unwrap();
        let Some(Step::Sort(SortStep { array, .. })) = trace
            .iter()
            .find(|s| s.kind() == StepKind::HeapBuilt)
        else {
            panic!("no heap_built step");
        };
        for i in 1..array.len() {
            assert!(array[(i - 1) / 2] >= array[i]);
        }
    }
}
