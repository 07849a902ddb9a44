//! Step-by-step rebuild of a shuffled board from its recorded history.

use crate::arrangement::{Arrangement, Transition};
use tracing::{trace, warn};

impl Arrangement {
    /// Undo one recorded move, most recent first.
    ///
    /// Meant to be called once per presentation tick. Returns `None` without
    /// touching the board when nothing is left to undo. A cursor that points
    /// past the history is clamped and the call returns `None`; the next call
    /// resumes normally.
    pub fn step_build(&mut self) -> Option<Transition> {
        if self.build_cursor == 0 || self.history.is_empty() {
            return None;
        }
        if self.build_cursor > self.history.len() {
            warn!(
                cursor = self.build_cursor,
                history = self.history.len(),
                "build cursor out of sync with move history, clamping"
            );
            self.build_cursor = self.history.len();
            return None;
        }

        let recorded = self.history[self.build_cursor - 1];
        let transition = self.apply_move(recorded.inverse());
        self.recent.push(self.empty_coord);
        self.build_cursor -= 1;

        trace!(
            step = self.history.len() - self.build_cursor,
            recorded = %recorded,
            tile = transition.tile,
            wraps = transition.wraps,
            "build step"
        );
        Some(transition)
    }

    /// Moves left to undo
    pub fn remaining_steps(&self) -> usize {
        self.build_cursor.min(self.history.len())
    }

    /// Whether every recorded move has been undone
    pub fn is_built(&self) -> bool {
        self.remaining_steps() == 0
    }

    /// Undo every remaining move and return the transitions in order
    pub fn build_all(&mut self) -> Vec<Transition> {
        let mut transitions = Vec::with_capacity(self.remaining_steps());
        // A desynced cursor is clamped by the first call, which applies nothing
        if self.build_cursor > self.history.len() {
            self.step_build();
        }
        while let Some(transition) = self.step_build() {
            transitions.push(transition);
        }
        transitions
    }
}
