use super::{already_sorted, finish, require_values};
use crate::config::RADIX_BASE;
use crate::errors::InputError;
use crate::generator::recorder::SortRecorder;
use crate::input::Algorithm;
use crate::step::{Roles, SortDetail, StepKind, Trace};

/// Number of decimal digits in `value`; zero has one digit
fn digit_count(value: i64) -> u32 {
    let mut digits = 1;
    let mut rest = value / RADIX_BASE;
    while rest > 0 {
        digits += 1;
        rest /= RADIX_BASE;
    }
    digits
}

fn empty_buckets() -> Vec<Vec<i64>> {
    vec![Vec::new(); RADIX_BASE as usize]
}

/// LSD radix sort for non-negative integers.
///
/// Each digit pass distributes the array into ten buckets, then collects
/// them back in bucket order, writing the array in place one element at a
/// time. The buckets snapshot drains as values are collected.
pub fn radix_sort(values: &[i64]) -> Result<Trace, InputError> {
    require_values(values)?;
    if let Some(&value) = values.iter().find(|v| **v < 0) {
        return Err(InputError::NegativeValue { value });
    }
    let max = values.iter().copied().max().unwrap_or(0);
    let max_digits = digit_count(max);
    let detail = |digit_position: u32, buckets: Vec<Vec<i64>>, current_bucket: Option<usize>| {
        SortDetail::Radix {
            digit_position,
            max_digits,
            buckets,
            current_bucket,
        }
    };

    let n = values.len();
    if n == 1 {
        return Ok(already_sorted(
            Algorithm::RadixSort,
            values,
            detail(0, empty_buckets(), None),
        ));
    }

    let mut array = values.to_vec();
    let mut rec = SortRecorder::new();
    rec.record(
        StepKind::Initial,
        &array,
        Roles::new(),
        detail(0, empty_buckets(), None),
        format!(
            "Starting radix sort; the maximum {} has {} digit(s)",
            max, max_digits
        ),
    );

    let mut exp: i64 = 1;
    for position in 1..=max_digits {
        rec.record(
            StepKind::DigitProcessing,
            &array,
            Roles::new().with_active(0..n),
            detail(position, empty_buckets(), None),
            format!("Processing digit {} (the {}s place)", position, exp),
        );

        let mut buckets = empty_buckets();
        for (i, &value) in array.iter().enumerate() {
            let digit = ((value / exp) % RADIX_BASE) as usize;
            buckets[digit].push(value);
            rec.record(
                StepKind::PlacingInBucket,
                &array,
                Roles::new().with_highlighted([i]),
                detail(position, buckets.clone(), Some(digit)),
                format!("Placing {} in bucket {} (digit {} is {})", value, digit, position, digit),
            );
        }
        rec.record(
            StepKind::BucketsFilled,
            &array,
            Roles::new(),
            detail(position, buckets.clone(), None),
            format!("All values distributed by digit {}", position),
        );

        let mut pending = buckets.clone();
        let mut k = 0;
        for (b, bucket) in buckets.iter().enumerate() {
            for &value in bucket {
                pending[b].remove(0);
                array[k] = value;
                rec.record(
                    StepKind::CollectingFromBucket,
                    &array,
                    Roles::new().with_highlighted([k]),
                    detail(position, pending.clone(), Some(b)),
                    format!("Collecting {} from bucket {} into position {}", value, b, k),
                );
                k += 1;
            }
        }
        rec.record(
            StepKind::DigitComplete,
            &array,
            Roles::new(),
            detail(position, empty_buckets(), None),
            format!("Digit {} complete", position),
        );
        exp = exp.saturating_mul(RADIX_BASE);
    }

    Ok(finish(
        rec,
        Algorithm::RadixSort,
        &array,
        detail(max_digits, empty_buckets(), None),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{SortStep, Step};

    #[test]
    fn digit_counts() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(802), 3);
    }

    #[test]
    fn radix_sort_sample() {
        let trace = radix_sort(&[170, 45, 75, 90, 2, 802, 24, 66]).unwrap();
        assert_eq!(
            trace.terminal().and_then(Step::array).unwrap(),
            &[2, 24, 45, 66, 75, 90, 170, 802]
        );
        assert_eq!(trace.count_kind(StepKind::DigitComplete), 3);
        assert_eq!(trace.count_kind(StepKind::PlacingInBucket), 24);
    }

    #[test]
    fn buckets_drain_while_collecting() {
        let trace = radix_sort(&[3, 1]).unwrap();
        let drained = trace.iter().rev().find_map(|s| match s {
            Step::Sort(SortStep {
                kind: StepKind::CollectingFromBucket,
                detail: SortDetail::Radix { buckets, .. },
                ..
            }) => Some(buckets.iter().all(Vec::is_empty)),
            _ => None,
        });
        assert_eq!(drained, Some(true));
    }

    #[test]
    fn buckets_keep_arrival_order() {
        let trace = radix_sort(&[25, 21, 15]).unwrap();
        let filled: Vec<Vec<Vec<i64>>> = trace
            .iter()
            .filter_map(|s| match s {
                Step::Sort(SortStep {
                    kind: StepKind::BucketsFilled,
                    detail: SortDetail::Radix { buckets, .. },
                    ..
                }) => Some(buckets.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(filled.len(), 2);
        // ones digit: 25 arrives before 15
        assert_eq!(filled[0][1], vec![21]);
        assert_eq!(filled[0][5], vec![25, 15]);
        // tens digit: 21 and 25 share a bucket in their first-pass order
        assert_eq!(filled[1][1], vec![15]);
        assert_eq!(filled[1][2], vec![21, 25]);

        let collected: Vec<&str> = trace
            .iter()
            .filter(|s| s.kind() == StepKind::CollectingFromBucket)
            .map(Step::description)
            .collect();
        assert_eq!(
            collected,
            vec![
                "Collecting 21 from bucket 1 into position 0",
                "Collecting 25 from bucket 5 into position 1",
                "Collecting 15 from bucket 5 into position 2",
                "Collecting 15 from bucket 1 into position 0",
                "Collecting 21 from bucket 2 into position 1",
                "Collecting 25 from bucket 2 into position 2",
            ]
        );
    }

    #[test]
    fn negative_values_are_rejected() {
        assert_eq!(
            radix_sort(&[5, -1, 3]).unwrap_err(),
            InputError::NegativeValue { value: -1 }
        );
    }
}
