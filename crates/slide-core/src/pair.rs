//! Two boards shuffled to finish their rebuild at a controlled offset.
//!
//! The lead board takes the hardest shuffle found. The follower is shuffled
//! with `delta` fewer moves while targeting the lead's misplaced count, so
//! both boards look equally scrambled but the follower is rebuilt `delta`
//! steps sooner. The two boards share no state.

use crate::arrangement::Transition;
use crate::config::ShuffleConfig;
use crate::selector::{Selection, TrialSelector};
use crate::shuffle::{derive_seed, entropy_seed};
use crate::{PuzzleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// One of the two boards of a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Board {
    One,
    Two,
}

impl Board {
    pub fn other(self) -> Board {
        match self {
            Board::One => Board::Two,
            Board::Two => Board::One,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Board::One => 1,
            Board::Two => 2,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "board {}", self.number())
    }
}

/// A lead/follower pair of selected shuffles
#[derive(Debug, Clone)]
pub struct SyncedPair {
    pub lead: Board,
    /// How many moves shorter the follower's shuffle was
    pub delta: usize,
    pub one: Selection,
    pub two: Selection,
}

impl SyncedPair {
    pub fn board(&self, board: Board) -> &Selection {
        match board {
            Board::One => &self.one,
            Board::Two => &self.two,
        }
    }

    pub fn board_mut(&mut self, board: Board) -> &mut Selection {
        match board {
            Board::One => &mut self.one,
            Board::Two => &mut self.two,
        }
    }

    pub fn follower(&self) -> Board {
        self.lead.other()
    }

    /// Whether the follower's selection hit the lead's misplaced count
    pub fn in_sync(&self) -> bool {
        self.board(self.follower()).target_met
    }

    /// Advance both rebuilds by one tick
    pub fn step_both(&mut self) -> (Option<Transition>, Option<Transition>) {
        (
            self.one.arrangement.step_build(),
            self.two.arrangement.step_build(),
        )
    }

    pub fn is_built(&self) -> bool {
        self.one.arrangement.is_built() && self.two.arrangement.is_built()
    }
}

/// Selects synchronized shuffles for two boards
#[derive(Debug, Clone)]
pub struct PairSync {
    config: ShuffleConfig,
    seed: Option<u64>,
    workers: usize,
}

impl PairSync {
    pub fn new(config: ShuffleConfig) -> Self {
        Self {
            config,
            seed: None,
            workers: 1,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run each board's trials on up to `workers` threads
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Select the lead board's shuffle, then the follower's with `delta`
    /// fewer moves.
    ///
    /// `delta` must leave the follower at least one move. The configured
    /// target misplaced count is ignored: the lead always takes its hardest
    /// trial and the follower always targets the lead.
    pub fn select(&self, lead: Board, delta: usize) -> Result<SyncedPair> {
        self.config.validate()?;
        if delta >= self.config.moves {
            return Err(PuzzleError::InvalidConfig(format!(
                "delta {} must be smaller than the move count {}",
                delta, self.config.moves
            )));
        }
        let seed = self.seed.unwrap_or_else(entropy_seed);

        let lead_config = self
            .config
            .clone()
            .with_target(None)
            .with_board_id(self.board_id(lead));
        let lead_selection =
            self.run(TrialSelector::new(lead_config).with_seed(derive_seed(seed, 0)))?;

        let follower = lead.other();
        let follower_config = self
            .config
            .clone()
            .with_moves(self.config.moves - delta)
            .with_target(lead_selection.arrangement.misplaced())
            .with_board_id(self.board_id(follower));
        let follower_selection =
            self.run(TrialSelector::new(follower_config).with_seed(derive_seed(seed, 1)))?;

        info!(
            lead = %lead,
            delta,
            lead_misplaced = lead_selection.misplaced(),
            follower_misplaced = follower_selection.misplaced(),
            in_sync = follower_selection.target_met,
            "selected synchronized pair"
        );

        let (one, two) = match lead {
            Board::One => (lead_selection, follower_selection),
            Board::Two => (follower_selection, lead_selection),
        };
        Ok(SyncedPair {
            lead,
            delta,
            one,
            two,
        })
    }

    fn run(&self, selector: TrialSelector) -> Result<Selection> {
        if self.workers > 1 {
            selector.select_best_parallel(self.workers)
        } else {
            selector.select_best()
        }
    }

    fn board_id(&self, board: Board) -> String {
        format!("{} #{}", self.config.board_id, board.number())
    }
}
