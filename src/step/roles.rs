//! Positional roles for array snapshots

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Index sets describing what each array position is doing in a step.
///
/// Empty sets are omitted from the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Roles {
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub comparing: BTreeSet<usize>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub swapping: BTreeSet<usize>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub sorted: BTreeSet<usize>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub highlighted: BTreeSet<usize>,
    /// Left run or left partition
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub left: BTreeSet<usize>,
    /// Right run or right partition
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub right: BTreeSet<usize>,
    /// Range currently being worked on
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub active: BTreeSet<usize>,
    /// Positions ruled out by a search
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub eliminated: BTreeSet<usize>,
}

impl Roles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comparing(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.comparing.extend(indices);
        self
    }

    pub fn with_swapping(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.swapping.extend(indices);
        self
    }

    pub fn with_sorted(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.sorted.extend(indices);
        self
    }

    pub fn with_highlighted(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.highlighted.extend(indices);
        self
    }

    pub fn with_left(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.left.extend(indices);
        self
    }

    pub fn with_right(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.right.extend(indices);
        self
    }

    pub fn with_active(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.active.extend(indices);
        self
    }

    pub fn with_eliminated(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.eliminated.extend(indices);
        self
    }

    /// Largest index mentioned by any role
    pub fn max_index(&self) -> Option<usize> {
        [
            &self.comparing,
            &self.swapping,
            &self.sorted,
            &self.highlighted,
            &self.left,
            &self.right,
            &self.active,
            &self.eliminated,
        ]
        .iter()
        .filter_map(|set| set.last().copied())
        .max()
    }
}
