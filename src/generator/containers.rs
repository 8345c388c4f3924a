//! Stack and queue script generators
//!
//! A script is dry-run on a scratch container first. The first operation
//! that would overflow or underflow rejects the whole script with its index,
//! so no partial trace is ever produced.

use super::recorder::Recorder;
use crate::errors::{CapacityError, InputError, VizError, VizResult};
use crate::input::{Algorithm, ContainerOp};
use crate::step::{ContainerStep, StepKind, Trace};
use crate::structures::containers::{BoundedQueue, BoundedStack, ContainerKind};

fn unsupported(op: ContainerOp, container: ContainerKind) -> VizError {
    InputError::UnsupportedOperation {
        operation: op.to_string(),
        container,
    }
    .into()
}

fn rejected(index: usize, op: ContainerOp, source: CapacityError) -> VizError {
    VizError::OperationRejected {
        index,
        operation: op.to_string(),
        source,
    }
}

/// Apply one stack operation, returning the value it produced and the step
/// kind and description that go with it.
fn apply_stack(
    stack: &mut BoundedStack<i64>,
    op: ContainerOp,
) -> Result<(StepKind, i64, String), CapacityError> {
    match op {
        ContainerOp::Push(value) => {
            stack.push(value)?;
            Ok((
                StepKind::Push,
                value,
                format!("Pushed {}; it is the new top ({} of {})", value, stack.len(), stack.capacity()),
            ))
        }
        ContainerOp::Pop => {
            let value = stack.pop()?;
            let rest = match stack.peek() {
                Ok(top) => format!("new top is {}", top),
                Err(_) => "the stack is now empty".to_string(),
            };
            Ok((StepKind::Pop, value, format!("Popped {}; {}", value, rest)))
        }
        ContainerOp::Peek => {
            let value = *stack.peek()?;
            Ok((StepKind::Peek, value, format!("Top element is {}", value)))
        }
        ContainerOp::Enqueue(_) | ContainerOp::Dequeue | ContainerOp::Front => {
            unreachable!("queue operations are rejected before a stack script runs")
        }
    }
}

fn apply_queue(
    queue: &mut BoundedQueue<i64>,
    op: ContainerOp,
) -> Result<(StepKind, i64, String), CapacityError> {
    match op {
        ContainerOp::Enqueue(value) => {
            queue.enqueue(value)?;
            Ok((
                StepKind::Enqueue,
                value,
                format!("Enqueued {} at the rear ({} of {})", value, queue.len(), queue.capacity()),
            ))
        }
        ContainerOp::Dequeue => {
            let value = queue.dequeue()?;
            let rest = match queue.front() {
                Ok(front) => format!("new front is {}", front),
                Err(_) => "the queue is now empty".to_string(),
            };
            Ok((StepKind::Dequeue, value, format!("Dequeued {}; {}", value, rest)))
        }
        ContainerOp::Front => {
            let value = *queue.front()?;
            Ok((StepKind::Front, value, format!("Front element is {}", value)))
        }
        ContainerOp::Push(_) | ContainerOp::Pop | ContainerOp::Peek => {
            unreachable!("stack operations are rejected before a queue script runs")
        }
    }
}

/// Trace a stack script
pub fn stack_script(capacity: usize, operations: &[ContainerOp]) -> VizResult<Trace> {
    if let Some(op) = operations.iter().find(|op| op.container() != ContainerKind::Stack) {
        return Err(unsupported(*op, ContainerKind::Stack));
    }
    let empty = BoundedStack::new(capacity)?;

    let mut scratch = empty.clone();
    for (index, op) in operations.iter().enumerate() {
        apply_stack(&mut scratch, *op).map_err(|source| rejected(index, *op, source))?;
    }

    let mut stack = empty;
    let mut rec = Recorder::new();
    let snapshot = |stack: &BoundedStack<i64>, kind, value, description| ContainerStep {
        kind,
        container: ContainerKind::Stack,
        items: stack.items().to_vec(),
        capacity,
        value,
        description,
    };
    rec.push(snapshot(
        &stack,
        StepKind::Initial,
        None,
        format!("Empty stack with capacity {}", capacity),
    ));
    for op in operations {
        let (kind, value, description) = apply_stack(&mut stack, *op)?;
        rec.push(snapshot(&stack, kind, Some(value), description));
    }
    rec.push(snapshot(
        &stack,
        StepKind::Completed,
        None,
        format!(
            "Script finished after {} operation(s); {} element(s) on the stack",
            operations.len(),
            stack.len()
        ),
    ));
    Ok(rec.finish(Algorithm::Stack))
}

/// Trace a queue script
pub fn queue_script(capacity: usize, operations: &[ContainerOp]) -> VizResult<Trace> {
    if let Some(op) = operations.iter().find(|op| op.container() != ContainerKind::Queue) {
        return Err(unsupported(*op, ContainerKind::Queue));
    }
    let empty = BoundedQueue::new(capacity)?;

    let mut scratch = empty.clone();
    for (index, op) in operations.iter().enumerate() {
        apply_queue(&mut scratch, *op).map_err(|source| rejected(index, *op, source))?;
    }

    let mut queue = empty;
    let mut rec = Recorder::new();
    let snapshot = |queue: &BoundedQueue<i64>, kind, value, description| ContainerStep {
        kind,
        container: ContainerKind::Queue,
        items: queue.iter().copied().collect(),
        capacity,
        value,
        description,
    };
    rec.push(snapshot(
        &queue,
        StepKind::Initial,
        None,
        format!("Empty queue with capacity {}", capacity),
    ));
    for op in operations {
        let (kind, value, description) = apply_queue(&mut queue, *op)?;
        rec.push(snapshot(&queue, kind, Some(value), description));
    }
    rec.push(snapshot(
        &queue,
        StepKind::Completed,
        None,
        format!(
            "Script finished after {} operation(s); {} element(s) in the queue",
            operations.len(),
            queue.len()
        ),
    ));
    Ok(rec.finish(Algorithm::Queue))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Step;

    fn items(trace: &Trace) -> Vec<i64> {
        match trace.terminal() {
            Some(Step::Container(step)) => step.items.clone(),
            other => panic!("unexpected terminal {:?}", other),
        }
    }

    #[test]
    fn stack_script_runs_in_order() {
        let ops = [
            ContainerOp::Push(1),
            ContainerOp::Push(2),
            ContainerOp::Peek,
            ContainerOp::Pop,
            ContainerOp::Push(3),
        ];
        let trace = stack_script(4, &ops).unwrap();
        assert_eq!(trace.len(), ops.len() + 2);
        assert_eq!(items(&trace), vec![1, 3]);
    }

    #[test]
    fn stack_overflow_rejects_whole_script() {
        let ops: Vec<ContainerOp> = (0..11).map(ContainerOp::Push).collect();
        match stack_script(10, &ops) {
            Err(VizError::OperationRejected { index, source, .. }) => {
                assert_eq!(index, 10);
                assert!(matches!(source, CapacityError::Overflow { capacity: 10, .. }));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn queue_underflow_names_the_operation() {
        let ops = [ContainerOp::Enqueue(5), ContainerOp::Dequeue, ContainerOp::Front];
        let err = queue_script(8, &ops).unwrap_err();
        assert_eq!(
            err.to_string(),
            "operation 2 (front) rejected: queue underflow: queue is empty"
        );
    }

    #[test]
    fn queue_script_is_fifo() {
        let ops = [
            ContainerOp::Enqueue(10),
            ContainerOp::Enqueue(20),
            ContainerOp::Dequeue,
            ContainerOp::Enqueue(30),
        ];
        let trace = queue_script(8, &ops).unwrap();
        assert_eq!(items(&trace), vec![20, 30]);
        assert_eq!(trace.count_kind(StepKind::Dequeue), 1);
    }

    #[test]
    fn mixed_script_is_rejected() {
        assert!(matches!(
            stack_script(3, &[ContainerOp::Enqueue(1)]),
            Err(VizError::Input(InputError::UnsupportedOperation { .. }))
        ));
    }
}
