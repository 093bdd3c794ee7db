//! Undo log for the steps of one turn segment.

use crate::{EngineError, EngineResult, Pos, MAX_HISTORY};

/// Snapshot of the picked piece taken before a step is applied.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Step {
    pub pos: Pos,
    pub moves_remaining: u8,
}

/// Growable stack of [`Step`] snapshots, capped at [`MAX_HISTORY`].
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct StepHistory {
    steps: Vec<Step>,
}

impl StepHistory {
    pub fn new() -> StepHistory {
        StepHistory { steps: Vec::new() }
    }

    /// Record a snapshot. Fails once the cap is reached.
    pub fn push(&mut self, step: Step) -> EngineResult<()> {
        if self.is_full() {
            return Err(EngineError::HistoryFull);
        }
        self.steps.push(step);
        Ok(())
    }

    /// Remove and return the most recent snapshot.
    #[inline]
    pub fn pop(&mut self) -> Option<Step> {
        self.steps.pop()
    }

    #[inline]
    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.steps.len() >= MAX_HISTORY
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }
}
