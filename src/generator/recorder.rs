// Step buffers shared by the generators

use crate::input::Algorithm;
use crate::step::{Roles, SortDetail, SortStep, Step, StepKind, Trace};
use std::collections::BTreeSet;

/// Append-only step buffer owned by one generation run
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    steps: Vec<Step>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: impl Into<Step>) {
        self.steps.push(step.into());
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn finish(self, algorithm: Algorithm) -> Trace {
        Trace::new(algorithm, self.steps)
    }
}

/// Recorder for sorting runs that remembers which positions are final.
///
/// Every recorded step carries the union of its own `sorted` role and all
/// positions marked so far, so the sorted set never shrinks.
#[derive(Debug, Default)]
pub(crate) struct SortRecorder {
    recorder: Recorder,
    sorted: BTreeSet<usize>,
}

impl SortRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        kind: StepKind,
        array: &[i64],
        mut roles: Roles,
        detail: SortDetail,
        description: impl Into<String>,
    ) {
        roles.sorted.extend(self.sorted.iter().copied());
        self.recorder.push(SortStep {
            kind,
            array: array.to_vec(),
            roles,
            description: description.into(),
            detail,
        });
    }

    pub fn mark_sorted(&mut self, index: usize) {
        self.sorted.insert(index);
    }

    pub fn mark_all_sorted(&mut self, len: usize) {
        self.sorted.extend(0..len);
    }

    pub fn len(&self) -> usize {
        self.recorder.len()
    }

    pub fn finish(self, algorithm: Algorithm) -> Trace {
        self.recorder.finish(algorithm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_marks_carry_forward() {
        let mut rec = SortRecorder::new();
        rec.mark_sorted(2);
        rec.record(
            StepKind::Compare,
            &[1, 2, 3],
            Roles::new().with_comparing([0, 1]),
            SortDetail::Bubble { pass: 1 },
            "Comparing 1 and 2",
        );
        let trace = rec.finish(Algorithm::BubbleSort);
        let roles = trace.get(0).and_then(Step::roles).unwrap();
        assert!(roles.sorted.contains(&2));
        assert_eq!(roles.comparing.len(), 2);
    }
}
