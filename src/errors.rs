//! Error types for step generation and container operations
//!
//! Three failure families exist, and none of them ever yields a partial
//! trace:
//!
//! - [`InputError`]: the request is malformed or out of bounds. Generation
//!   is rejected before the first step is recorded.
//! - [`CapacityError`]: a single stack/queue operation would overflow or
//!   underflow. The container is left untouched.
//! - [`VizError`]: the umbrella returned by [`crate::generator::generate`].
//!
//! Searching for or deleting an absent value is not an error; it ends the
//! trace with a `not_found` step instead.

use crate::structures::containers::ContainerKind;
use thiserror::Error;

pub type VizResult<T> = Result<T, VizError>;

/// Invalid input detected while validating a request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// No values were supplied
    #[error("{what} must not be empty")]
    Empty { what: &'static str },

    /// More values than the configured limit
    #[error("{what} accepts at most {max} values, got {len}")]
    TooMany {
        what: &'static str,
        len: usize,
        max: usize,
    },

    /// A token that is not a number at all
    #[error("'{token}' is not a number")]
    NotANumber { token: String },

    /// A numeric token with a fractional part or out of range
    #[error("'{token}' is not an integer")]
    NotAnInteger { token: String },

    /// Radix sort only handles non-negative integers
    #[error("radix sort requires non-negative values, got {value}")]
    NegativeValue { value: i64 },

    /// Binary search input must be sorted ascending
    #[error("binary search requires sorted input: element at index {index} is smaller than its predecessor")]
    Unsorted { index: usize },

    /// The value is already stored in the tree
    #[error("value {value} already exists in the tree")]
    DuplicateValue { value: i64 },

    /// An edge or start node names a node that was never declared
    #[error("unknown node '{id}'")]
    UnknownNode { id: String },

    /// The same node id was declared twice
    #[error("node '{id}' is declared more than once")]
    DuplicateNode { id: String },

    /// Fibonacci index outside `1..=max`
    #[error("fibonacci index must be between 1 and {max}, got {n}")]
    FibonacciOutOfRange { n: i64, max: u32 },

    /// A container needs room for at least one element
    #[error("container capacity must be at least 1")]
    ZeroCapacity,

    /// A queue operation in a stack script or the other way round
    #[error("'{operation}' is not a {container} operation")]
    UnsupportedOperation {
        operation: String,
        container: ContainerKind,
    },
}

impl InputError {
    /// Whether the rejection is about input size rather than content
    pub fn is_size_violation(&self) -> bool {
        matches!(
            self,
            InputError::Empty { .. }
                | InputError::TooMany { .. }
                | InputError::FibonacciOutOfRange { .. }
                | InputError::ZeroCapacity
        )
    }
}

/// A single bounded-container operation that cannot be performed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapacityError {
    #[error("{container} overflow: capacity is {capacity}")]
    Overflow {
        container: ContainerKind,
        capacity: usize,
    },

    #[error("{container} underflow: {container} is empty")]
    Underflow { container: ContainerKind },
}

/// Everything [`crate::generator::generate`] can reject
#[derive(Debug, Error)]
pub enum VizError {
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    #[error(transparent)]
    Capacity(#[from] CapacityError),

    /// One operation of a container script failed during validation
    #[error("operation {index} ({operation}) rejected: {source}")]
    OperationRejected {
        index: usize,
        operation: String,
        #[source]
        source: CapacityError,
    },

    #[error("invalid request: {0}")]
    Request(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_stable() {
        assert_eq!(
            InputError::TooMany {
                what: "bubble sort",
                len: 12,
                max: 10
            }
            .to_string(),
            "bubble sort accepts at most 10 values, got 12"
        );
        assert!(InputError::DuplicateValue { value: 5 }
            .to_string()
            .contains("already exists"));
        assert_eq!(
            CapacityError::Underflow {
                container: ContainerKind::Queue
            }
            .to_string(),
            "queue underflow: queue is empty"
        );
    }

    #[test]
    fn size_violations_are_classified() {
        assert!(InputError::Empty { what: "values" }.is_size_violation());
        assert!(!InputError::NegativeValue { value: -1 }.is_size_violation());
    }

    #[test]
    fn operation_rejection_keeps_source() {
        use std::error::Error as _;
        let err = VizError::OperationRejected {
            index: 3,
            operation: "push 4".to_string(),
            source: CapacityError::Overflow {
                container: ContainerKind::Stack,
                capacity: 3,
            },
        };
        assert!(err.to_string().starts_with("operation 3 (push 4) rejected"));
        assert!(err.source().is_some());
    }
}
