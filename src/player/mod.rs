//! Step-by-step playback over a finished trace
//!
//! [`Playback`] is a cursor; it never mutates the trace it walks. Moving
//! past either end is refused with a [`PlaybackError`] and leaves the
//! position unchanged.

use crate::step::{Step, Trace};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("already at the first step")]
    AtStart,

    #[error("no more steps (trace finished)")]
    AtEnd,

    #[error("trace has no steps")]
    EmptyTrace,

    #[error("step {index} is out of range (trace has {len} steps)")]
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone)]
pub struct Playback {
    trace: Trace,
    position: usize,
}

impl Playback {
    pub fn new(trace: Trace) -> Result<Self, PlaybackError> {
        if trace.is_empty() {
            return Err(PlaybackError::EmptyTrace);
        }
        Ok(Playback { trace, position: 0 })
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Step at the cursor
    pub fn current(&self) -> &Step {
        // position < len holds for every non-empty trace
        &self.trace.steps()[self.position]
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total_steps(&self) -> usize {
        self.trace.len()
    }

    pub fn is_at_start(&self) -> bool {
        self.position == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.position + 1 == self.trace.len()
    }

    pub fn step_forward(&mut self) -> Result<&Step, PlaybackError> {
        if self.is_at_end() {
            return Err(PlaybackError::AtEnd);
        }
        self.position += 1;
        Ok(self.current())
    }

    pub fn step_backward(&mut self) -> Result<&Step, PlaybackError> {
        if self.is_at_start() {
            return Err(PlaybackError::AtStart);
        }
        self.position -= 1;
        Ok(self.current())
    }

    /// Advance up to `count` steps, returning how many were taken
    pub fn step_forward_by(&mut self, count: usize) -> usize {
        let taken = count.min(self.trace.len() - 1 - self.position);
        self.position += taken;
        taken
    }

    pub fn rewind_to_start(&mut self) {
        self.position = 0;
    }

    pub fn jump_to_end(&mut self) {
        self.position = self.trace.len() - 1;
    }

    pub fn seek(&mut self, index: usize) -> Result<&Step, PlaybackError> {
        if index >= self.trace.len() {
            return Err(PlaybackError::OutOfRange {
                index,
                len: self.trace.len(),
            });
        }
        self.position = index;
        Ok(self.current())
    }

    /// Descriptions of every step up to and including the cursor
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.trace.steps()[..=self.position]
            .iter()
            .map(Step::description)
    }
}
