//! Ring-buffer log of recent action attempts and their results.
//!
//! The [`ActionLog`] resource keeps the last 64 entries so the UI and tests
//! can see what happened without polling the grid every tick.

use bevy::prelude::*;

use super::{ActionOrigin, ActionResult};
use crate::tools::ToolKind;

/// Maximum number of entries retained in the ring buffer.
const MAX_ENTRIES: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggedAction {
    pub tick: u64,
    pub origin: ActionOrigin,
    pub tool: Option<ToolKind>,
    pub target: Option<usize>,
    pub result: ActionResult,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct ActionLog {
    entries: Vec<LoggedAction>,
}

impl ActionLog {
    /// Record an entry, evicting the oldest once the buffer is full.
    pub fn push(&mut self, entry: LoggedAction) {
        if self.entries.len() >= MAX_ENTRIES {
            self.entries.remove(0);
        }
        self.entries.push(entry);
    }

    /// The last `n` entries (or fewer if the log is shorter), oldest first.
    pub fn last_n(&self, n: usize) -> &[LoggedAction] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn last(&self) -> Option<&LoggedAction> {
        self.entries.last()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
