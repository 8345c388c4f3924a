//! Bottom-up Fibonacci table

use super::recorder::Recorder;
use crate::config::MAX_FIBONACCI;
use crate::errors::InputError;
use crate::input::Algorithm;
use crate::step::{StepKind, TableStep, Trace};
use std::collections::BTreeMap;

/// Fill `F(1) = F(2) = 1` and then every entry up to `F(n)`, one
/// `calculating`/`calculated` pair per entry.
pub fn fibonacci(n: i64) -> Result<Trace, InputError> {
    let n = match u32::try_from(n) {
        Ok(n) if (1..=MAX_FIBONACCI).contains(&n) => n,
        _ => {
            return Err(InputError::FibonacciOutOfRange {
                n,
                max: MAX_FIBONACCI,
            })
        }
    };

    let mut table = BTreeMap::from([(1u32, 1u64)]);
    if n >= 2 {
        table.insert(2, 1);
    }
    let mut rec = Recorder::new();
    let step = |kind, table: &BTreeMap<u32, u64>, current, result, description| TableStep {
        kind,
        n,
        table: table.clone(),
        current,
        result,
        description,
    };

    if n <= 2 {
        rec.push(step(
            StepKind::Completed,
            &table,
            Some(n),
            Some(1),
            format!("F({}) = 1 is a base case", n),
        ));
        return Ok(rec.finish(Algorithm::Fibonacci));
    }

    rec.push(step(
        StepKind::Initial,
        &table,
        None,
        None,
        "Base cases: F(1) = 1 and F(2) = 1".to_string(),
    ));
    let (mut prev, mut curr) = (1u64, 1u64);
    for i in 3..=n {
        rec.push(step(
            StepKind::Calculating,
            &table,
            Some(i),
            None,
            format!("Calculating F({}) = F({}) + F({})", i, i - 1, i - 2),
        ));
        let next = prev + curr;
        table.insert(i, next);
        rec.push(step(
            StepKind::Calculated,
            &table,
            Some(i),
            Some(next),
            format!("F({}) = {} + {} = {}", i, curr, prev, next),
        ));
        prev = curr;
        curr = next;
    }
    rec.push(step(
        StepKind::Completed,
        &table,
        Some(n),
        Some(curr),
        format!("F({}) = {}", n, curr),
    ));
    Ok(rec.finish(Algorithm::Fibonacci))
}
