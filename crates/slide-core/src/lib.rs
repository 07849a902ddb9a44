//! Toroidal sliding-tile puzzle engine.
//!
//! The engine models an N×N board whose edges wrap around, shuffles it with a
//! randomized walk of the empty tile, records every move so the shuffle can be
//! replayed backwards one step at a time, and selects the best of many
//! independent shuffle trials.
//!
//! ```
//! use slide_core::{ShuffleConfig, TrialSelector};
//!
//! let config = ShuffleConfig::default().with_dimension(4).with_moves(30);
//! let mut selection = TrialSelector::new(config).with_seed(7).select_best().unwrap();
//!
//! let board = &mut selection.arrangement;
//! assert!(!board.is_solved());
//! while board.step_build().is_some() {}
//! assert!(board.is_solved());
//! ```

pub mod arrangement;
pub mod config;
pub mod coord;
pub mod error;
pub mod moves;
pub mod pair;
pub mod recent;
pub mod selector;
pub mod shuffle;
pub mod snapshot;
pub mod solver;

pub use arrangement::{Arrangement, TileLocation, Transition};
pub use config::{Preset, ShuffleConfig};
pub use coord::{to_linear, to_row_col};
pub use error::{PuzzleError, Result};
pub use moves::{is_adjacent_without_wrap, Move};
pub use pair::{Board, PairSync, SyncedPair};
pub use recent::RecentCoords;
pub use selector::{select_best, Selection, TrialSelector};
pub use shuffle::{entropy_seed, Shuffler};
pub use snapshot::Snapshot;
