// Sorting generators on fixed inputs

use algoviz::generator::sorting::{
    bubble_sort, heap_sort, insertion_sort, merge_sort, quick_sort, radix_sort, selection_sort,
};
use algoviz::step::{SortDetail, Step, StepKind, Trace};
use algoviz::errors::InputError;

type SortFn = fn(&[i64]) -> Result<Trace, InputError>;

const SORTS: [(&str, SortFn); 7] = [
    ("bubble", bubble_sort),
    ("selection", selection_sort),
    ("insertion", insertion_sort),
    ("merge", merge_sort),
    ("quick", quick_sort),
    ("heap", heap_sort),
    ("radix", radix_sort),
];

fn final_array(trace: &Trace) -> Vec<i64> {
    trace.terminal().and_then(Step::array).unwrap().to_vec()
}

#[test]
fn test_all_sorts_on_sample() {
    let input = [64, 34, 25, 12, 22, 11, 90];
    for (name, sort) in SORTS {
        let trace = sort(&input).unwrap();
        assert_eq!(final_array(&trace), [11, 12, 22, 25, 34, 64, 90], "{name}");
        assert_eq!(trace.steps()[0].kind(), StepKind::Initial, "{name}");
        assert_eq!(trace.steps()[0].array(), Some(&input[..]), "{name}");
    }
}

#[test]
fn test_duplicates_and_sorted_input() {
    for (name, sort) in SORTS {
        assert_eq!(final_array(&sort(&[3, 1, 3, 1, 2]).unwrap()), [1, 1, 2, 3, 3], "{name}");
        assert_eq!(final_array(&sort(&[1, 2, 3, 4]).unwrap()), [1, 2, 3, 4], "{name}");
        assert_eq!(final_array(&sort(&[4, 3, 2, 1]).unwrap()), [1, 2, 3, 4], "{name}");
    }
}

#[test]
fn test_single_value_is_one_completed_step() {
    for (name, sort) in SORTS {
        let trace = sort(&[7]).unwrap();
        assert_eq!(trace.len(), 1, "{name}");
        assert_eq!(trace.steps()[0].kind(), StepKind::Completed, "{name}");
        assert!(trace.steps()[0].roles().unwrap().sorted.contains(&0), "{name}");
    }
}

#[test]
fn test_empty_input_is_rejected() {
    for (name, sort) in SORTS {
        assert_eq!(
            sort(&[]).unwrap_err(),
            InputError::Empty { what: "values" },
            "{name}"
        );
    }
}

#[test]
fn test_comparison_counts() {
    let input = [5, 4, 3, 2, 1];
    // bubble and selection always compare every pair once
    assert_eq!(bubble_sort(&input).unwrap().count_kind(StepKind::Compare), 10);
    assert_eq!(selection_sort(&input).unwrap().count_kind(StepKind::Compare), 10);
    // reversed input: insertion shifts every inversion
    let insertion = insertion_sort(&input).unwrap();
    assert_eq!(insertion.count_kind(StepKind::Shift), 10);
    assert_eq!(insertion.count_kind(StepKind::Insert), 4);
    assert_eq!(bubble_sort(&input).unwrap().count_kind(StepKind::Swap), 10);
}

#[test]
fn test_selection_sort_in_place_when_sorted() {
    let trace = selection_sort(&[1, 2, 3]).unwrap();
    assert_eq!(trace.count_kind(StepKind::Swap), 0);
    assert_eq!(trace.count_kind(StepKind::InPlace), 3);
    assert!(trace
        .iter()
        .any(|s| s.kind() == StepKind::Compare && s.description().contains("current minimum")));
}

#[test]
fn test_merge_sort_phases() {
    let trace = merge_sort(&[38, 27, 43, 3]).unwrap();
    assert_eq!(trace.count_kind(StepKind::Divide), 3);
    assert_eq!(trace.count_kind(StepKind::MergeStart), 3);
    assert_eq!(trace.count_kind(StepKind::MergeComplete), 3);
    // every merge writes every position of its range
    assert_eq!(trace.count_kind(StepKind::MergePlace), 8);

    let deepest = trace
        .iter()
        .filter_map(|s| match s {
            Step::Sort(step) => match step.detail {
                SortDetail::Merge { recursion_level } => Some(recursion_level),
                _ => None,
            },
            _ => None,
        })
        .max();
    assert_eq!(deepest, Some(1));
}

#[test]
fn test_quick_sort_pivot_per_partition() {
    let trace = quick_sort(&[10, 80, 30, 90, 40, 50, 70]).unwrap();
    assert_eq!(
        trace.count_kind(StepKind::PivotSelect),
        trace.count_kind(StepKind::PivotPlace)
    );
    assert_eq!(
        trace.count_kind(StepKind::PivotPlace),
        trace.count_kind(StepKind::PartitionComplete)
    );
    // no swap step ever exchanges a position with itself
    for step in trace.iter().filter(|s| s.kind() == StepKind::Swap) {
        assert_eq!(step.roles().unwrap().swapping.len(), 2);
    }
}

#[test]
fn test_heap_sort_extracts_every_position() {
    let trace = heap_sort(&[12, 11, 13, 5, 6, 7]).unwrap();
    assert_eq!(trace.count_kind(StepKind::HeapBuilt), 1);
    assert_eq!(trace.count_kind(StepKind::ExtractMax), 5);
    assert_eq!(trace.count_kind(StepKind::Swapped), 5);
    assert_eq!(
        trace.count_kind(StepKind::HeapifySwap),
        trace.count_kind(StepKind::HeapifySwapped)
    );
}

#[test]
fn test_radix_buckets_drain() {
    let trace = radix_sort(&[21, 3, 12]).unwrap();
    for step in trace.iter() {
        if let Step::Sort(step) = step {
            if let SortDetail::Radix {
                buckets, max_digits, ..
            } = &step.detail
            {
                assert_eq!(*max_digits, 2);
                let held: usize = buckets.iter().map(Vec::len).sum();
                assert!(held <= 3);
                if step.kind == StepKind::DigitComplete {
                    assert_eq!(held, 0);
                }
            }
        }
    }
    assert_eq!(trace.count_kind(StepKind::CollectingFromBucket), 6);
}
