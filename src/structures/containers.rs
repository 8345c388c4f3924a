//! Capacity-bounded LIFO and FIFO containers
//!
//! A failing operation returns a [`CapacityError`] and leaves the container
//! exactly as it was.

use crate::errors::{CapacityError, InputError};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Which bounded container an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    Stack,
    Queue,
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerKind::Stack => write!(f, "stack"),
            ContainerKind::Queue => write!(f, "queue"),
        }
    }
}

/// LIFO container that refuses to grow past its capacity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedStack<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> BoundedStack<T> {
    pub fn new(capacity: usize) -> Result<Self, InputError> {
        if capacity == 0 {
            return Err(InputError::ZeroCapacity);
        }
        Ok(BoundedStack {
            items: Vec::new(),
            capacity,
        })
    }

    pub fn push(&mut self, value: T) -> Result<(), CapacityError> {
        if self.is_full() {
            return Err(CapacityError::Overflow {
                container: ContainerKind::Stack,
                capacity: self.capacity,
            });
        }
        self.items.push(value);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<T, CapacityError> {
        self.items.pop().ok_or(CapacityError::Underflow {
            container: ContainerKind::Stack,
        })
    }

    /// Top element without removing it
    pub fn peek(&self) -> Result<&T, CapacityError> {
        self.items.last().ok_or(CapacityError::Underflow {
            container: ContainerKind::Stack,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Elements bottom first
    pub fn items(&self) -> &[T] {
        &self.items
    }
}

/// FIFO container that refuses to grow past its capacity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedQueue<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    pub fn new(capacity: usize) -> Result<Self, InputError> {
        if capacity == 0 {
            return Err(InputError::ZeroCapacity);
        }
        Ok(BoundedQueue {
            items: VecDeque::new(),
            capacity,
        })
    }

    pub fn enqueue(&mut self, value: T) -> Result<(), CapacityError> {
        if self.is_full() {
            return Err(CapacityError::Overflow {
                container: ContainerKind::Queue,
                capacity: self.capacity,
            });
        }
        self.items.push_back(value);
        Ok(())
    }

    pub fn dequeue(&mut self) -> Result<T, CapacityError> {
        self.items.pop_front().ok_or(CapacityError::Underflow {
            container: ContainerKind::Queue,
        })
    }

    /// Front element without removing it
    pub fn front(&self) -> Result<&T, CapacityError> {
        self.items.front().ok_or(CapacityError::Underflow {
            container: ContainerKind::Queue,
        })
    }

    /// Most recently enqueued element
    pub fn rear(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Elements front first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}
