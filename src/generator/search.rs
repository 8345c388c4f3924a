//! Linear and binary search step generators

use super::recorder::Recorder;
use crate::errors::InputError;
use crate::input::Algorithm;
use crate::step::{Comparison, Roles, SearchAction, SearchDetail, SearchStep, StepKind, Trace};
use std::collections::BTreeSet;

fn step(
    kind: StepKind,
    array: &[i64],
    target: i64,
    roles: Roles,
    detail: SearchDetail,
    description: String,
) -> SearchStep {
    SearchStep {
        kind,
        array: array.to_vec(),
        target,
        roles,
        description,
        detail,
    }
}

/// Scan left to right; every index gets either a `continue` or the
/// terminating `found` step.
pub fn linear_search(values: &[i64], target: i64) -> Result<Trace, InputError> {
    if values.is_empty() {
        return Err(InputError::Empty { what: "values" });
    }
    let n = values.len();
    let mut rec = Recorder::new();
    rec.push(step(
        StepKind::Initial,
        values,
        target,
        Roles::new().with_active(0..n),
        SearchDetail::Linear { current: None },
        format!("Searching for {} by checking each element in turn", target),
    ));

    for (i, &value) in values.iter().enumerate() {
        if value == target {
            rec.push(step(
                StepKind::Found,
                values,
                target,
                Roles::new()
                    .with_comparing([i])
                    .with_highlighted([i])
                    .with_eliminated(0..i),
                SearchDetail::Linear { current: Some(i) },
                format!("Found {} at index {} after {} comparison(s)", target, i, i + 1),
            ));
            return Ok(rec.finish(Algorithm::LinearSearch));
        }
        rec.push(step(
            StepKind::Continue,
            values,
            target,
            Roles::new().with_comparing([i]).with_eliminated(0..=i),
            SearchDetail::Linear { current: Some(i) },
            format!("arr[{}] = {} is not {}; moving on", i, value, target),
        ));
    }

    rec.push(step(
        StepKind::NotFound,
        values,
        target,
        Roles::new().with_eliminated(0..n),
        SearchDetail::Linear { current: None },
        format!("{} not found after checking all {} elements", target, n),
    ));
    Ok(rec.finish(Algorithm::LinearSearch))
}

/// Binary search over an ascending array.
///
/// Each iteration emits one step naming `mid`, how `array[mid]` compares to
/// the target and the resulting action. Eliminated positions accumulate.
/// Unsorted input is rejected up front.
pub fn binary_search(values: &[i64], target: i64) -> Result<Trace, InputError> {
    if values.is_empty() {
        return Err(InputError::Empty { what: "values" });
    }
    if let Some(index) = (1..values.len()).find(|&i| values[i] < values[i - 1]) {
        return Err(InputError::Unsorted { index });
    }

    let n = values.len();
    let mut left: i64 = 0;
    let mut right: i64 = n as i64 - 1;
    let mut eliminated = BTreeSet::new();
    let mut rec = Recorder::new();
    rec.push(step(
        StepKind::Initial,
        values,
        target,
        Roles::new().with_active(0..n),
        SearchDetail::Binary {
            left,
            right,
            mid: None,
            comparison: None,
            action: None,
        },
        format!("Searching for {} in the sorted range [0..{}]", target, right),
    ));

    while left <= right {
        let mid = ((left + right) / 2) as usize;
        let value = values[mid];
        let roles = |eliminated: &BTreeSet<usize>, left: i64, right: i64| {
            let active = if left <= right {
                left as usize..right as usize + 1
            } else {
                0..0
            };
            Roles::new()
                .with_comparing([mid])
                .with_active(active)
                .with_eliminated(eliminated.iter().copied())
        };

        match value.cmp(&target) {
            std::cmp::Ordering::Equal => {
                rec.push(step(
                    StepKind::Found,
                    values,
                    target,
                    roles(&eliminated, left, right).with_highlighted([mid]),
                    SearchDetail::Binary {
                        left,
                        right,
                        mid: Some(mid),
                        comparison: Some(Comparison::Equal),
                        action: Some(SearchAction::Found),
                    },
                    format!("arr[{}] = {} equals the target; found at index {}", mid, value, mid),
                ));
                return Ok(rec.finish(Algorithm::BinarySearch));
            }
            std::cmp::Ordering::Less => {
                eliminated.extend(left as usize..=mid);
                left = mid as i64 + 1;
                rec.push(step(
                    StepKind::SearchRight,
                    values,
                    target,
                    roles(&eliminated, left, right),
                    SearchDetail::Binary {
                        left,
                        right,
                        mid: Some(mid),
                        comparison: Some(Comparison::Less),
                        action: Some(SearchAction::SearchRight),
                    },
                    format!(
                        "arr[{}] = {} < {}; searching the right half [{}..{}]",
                        mid, value, target, left, right
                    ),
                ));
            }
            std::cmp::Ordering::Greater => {
                eliminated.extend(mid..=right as usize);
                right = mid as i64 - 1;
                rec.push(step(
                    StepKind::SearchLeft,
                    values,
                    target,
                    roles(&eliminated, left, right),
                    SearchDetail::Binary {
                        left,
                        right,
                        mid: Some(mid),
                        comparison: Some(Comparison::Greater),
                        action: Some(SearchAction::SearchLeft),
                    },
                    format!(
                        "arr[{}] = {} > {}; searching the left half [{}..{}]",
                        mid, value, target, left, right
                    ),
                ));
            }
        }
    }

    rec.push(step(
        StepKind::NotFound,
        values,
        target,
        Roles::new().with_eliminated(0..n),
        SearchDetail::Binary {
            left,
            right,
            mid: None,
            comparison: None,
            action: Some(SearchAction::NotFound),
        },
        format!("{} not found; the search range is empty", target),
    ));
    Ok(rec.finish(Algorithm::BinarySearch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Step;

    const SORTED: [i64; 7] = [11, 12, 22, 25, 34, 64, 90];

    #[test]
    fn binary_search_finds_middle_in_one_iteration() {
        let trace = binary_search(&SORTED, 25).unwrap();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.terminal().map(Step::kind), Some(StepKind::Found));
    }

    #[test]
    fn binary_search_missing_target() {
        let trace = binary_search(&SORTED, 99).unwrap();
        let kinds: Vec<StepKind> = trace.iter().map(Step::kind).collect();
        assert_eq!(
            kinds,
            vec![
                StepKind::Initial,
                StepKind::SearchRight,
                StepKind::SearchRight,
                StepKind::SearchRight,
                StepKind::NotFound,
            ]
        );
        let roles = trace.terminal().and_then(Step::roles).unwrap();
        assert_eq!(roles.eliminated.len(), SORTED.len());
    }

    #[test]
    fn binary_search_below_minimum() {
        let trace = binary_search(&SORTED, 1).unwrap();
        assert_eq!(trace.count_kind(StepKind::SearchLeft), 3);
        assert_eq!(trace.terminal().map(Step::kind), Some(StepKind::NotFound));
    }

    #[test]
    fn binary_search_rejects_unsorted() {
        assert_eq!(
            binary_search(&[1, 5, 3], 3).unwrap_err(),
            InputError::Unsorted { index: 2 }
        );
    }

    #[test]
    fn linear_search_steps() {
        let trace = linear_search(&[64, 34, 25, 12], 25).unwrap();
        assert_eq!(trace.count_kind(StepKind::Continue), 2);
        assert_eq!(trace.terminal().map(Step::kind), Some(StepKind::Found));

        let missing = linear_search(&[1, 2], 9).unwrap();
        assert_eq!(missing.len(), 4);
        assert_eq!(missing.terminal().map(Step::kind), Some(StepKind::NotFound));
    }
}
