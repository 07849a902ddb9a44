use slide_core::{
    Arrangement, Move, Preset, PuzzleError, Selection, ShuffleConfig, Snapshot, TileLocation,
    Transition, TrialSelector,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

uniffi::setup_scaffolding!();

/// Errors surfaced to host applications
#[derive(Debug, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum SlideError {
    #[error("{0}")]
    InvalidConfig(String),
    #[error("{0}")]
    NoValidShuffle(String),
    #[error("{0}")]
    InvalidBoard(String),
    #[error("{0}")]
    UnknownMove(String),
    #[error("{0}")]
    Serialization(String),
}

impl From<PuzzleError> for SlideError {
    fn from(e: PuzzleError) -> Self {
        let msg = e.to_string();
        match e {
            PuzzleError::DimensionTooSmall(_) | PuzzleError::InvalidConfig(_) => {
                SlideError::InvalidConfig(msg)
            }
            PuzzleError::NoValidTrial { .. } => SlideError::NoValidShuffle(msg),
            PuzzleError::GridSizeMismatch { .. }
            | PuzzleError::NotAPermutation { .. }
            | PuzzleError::EmptyTileOutOfRange { .. } => SlideError::InvalidBoard(msg),
            PuzzleError::UnknownMove(_) => SlideError::UnknownMove(msg),
        }
    }
}

/// Direction the empty tile travels
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}

impl From<MoveDirection> for Move {
    fn from(d: MoveDirection) -> Self {
        match d {
            MoveDirection::Up => Move::Up,
            MoveDirection::Down => Move::Down,
            MoveDirection::Left => Move::Left,
            MoveDirection::Right => Move::Right,
        }
    }
}

impl From<Move> for MoveDirection {
    fn from(m: Move) -> Self {
        match m {
            Move::Up => MoveDirection::Up,
            Move::Down => MoveDirection::Down,
            Move::Left => MoveDirection::Left,
            Move::Right => MoveDirection::Right,
        }
    }
}

/// Shuffle strength presets
#[derive(Debug, Clone, Copy, uniffi::Enum)]
pub enum ShufflePreset {
    Easy,
    Medium,
    Hard,
}

impl From<ShufflePreset> for Preset {
    fn from(p: ShufflePreset) -> Self {
        match p {
            ShufflePreset::Easy => Preset::Easy,
            ShufflePreset::Medium => Preset::Medium,
            ShufflePreset::Hard => Preset::Hard,
        }
    }
}

/// One applied move, for animating a single tile
#[derive(Debug, Clone, uniffi::Record)]
pub struct MoveTransition {
    pub direction: MoveDirection,
    /// Tile that slid into the old empty cell
    pub tile: u32,
    /// Coordinate the tile left
    pub from_coord: u32,
    /// Coordinate the tile arrived at
    pub to_coord: u32,
    /// Whether the slide crosses a board edge
    pub wraps: bool,
}

impl From<Transition> for MoveTransition {
    fn from(t: Transition) -> Self {
        Self {
            direction: t.mv.into(),
            tile: t.tile as u32,
            from_coord: t.from as u32,
            to_coord: t.to as u32,
            wraps: t.wraps,
        }
    }
}

/// Board state for UI rendering
#[derive(Debug, Clone, uniffi::Record)]
pub struct BoardSnapshot {
    pub dimension: u32,
    /// Tile identities, one inner list per row
    pub grid: Vec<Vec<u32>>,
    pub empty_tile: u32,
    pub empty_coord: u32,
    pub empty_row: u32,
    pub empty_col: u32,
    /// Absent when the shuffle was discarded
    pub misplaced: Option<u32>,
    pub history: Vec<MoveDirection>,
    pub build_cursor: u32,
}

impl From<Snapshot> for BoardSnapshot {
    fn from(s: Snapshot) -> Self {
        Self {
            dimension: s.dimension as u32,
            grid: s
                .grid
                .into_iter()
                .map(|row| row.into_iter().map(|t| t as u32).collect())
                .collect(),
            empty_tile: s.empty_tile as u32,
            empty_coord: s.empty_coord as u32,
            empty_row: s.empty_row as u32,
            empty_col: s.empty_col as u32,
            misplaced: s.misplaced.map(|m| m as u32),
            history: s.history.into_iter().map(MoveDirection::from).collect(),
            build_cursor: s.build_cursor as u32,
        }
    }
}

/// Current position of a tile
#[derive(Debug, Clone, uniffi::Record)]
pub struct TilePosition {
    pub tile: u32,
    pub coord: u32,
    pub row: u32,
    pub col: u32,
}

impl From<TileLocation> for TilePosition {
    fn from(l: TileLocation) -> Self {
        Self {
            tile: l.tile as u32,
            coord: l.coord as u32,
            row: l.row as u32,
            col: l.col as u32,
        }
    }
}

/// A selected shuffle that hosts rebuild one step per frame
#[derive(uniffi::Object)]
pub struct SlideBoard {
    board: Mutex<Arrangement>,
    seed: u64,
    trial: u32,
}

impl SlideBoard {
    fn from_selection(selection: Selection) -> Arc<Self> {
        Arc::new(Self {
            seed: selection.seed,
            trial: selection.trial as u32,
            board: Mutex::new(selection.arrangement),
        })
    }

    fn board(&self) -> MutexGuard<'_, Arrangement> {
        // A poisoned lock still holds a consistent board
        self.board.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[uniffi::export]
impl SlideBoard {
    /// Select the best of `trials` shuffles of `moves` moves on an N×N board
    #[uniffi::constructor]
    pub fn new(
        dimension: u32,
        moves: u32,
        trials: u32,
        target_misplaced: Option<u32>,
        seed: Option<u64>,
    ) -> Result<Arc<Self>, SlideError> {
        let config = ShuffleConfig::default()
            .with_dimension(dimension as usize)
            .with_moves(moves as usize)
            .with_trials(trials as usize)
            .with_target(target_misplaced.map(|t| t as usize));
        select(config, seed)
    }

    /// Select a shuffle using one of the built-in presets
    #[uniffi::constructor]
    pub fn from_preset(preset: ShufflePreset, seed: Option<u64>) -> Result<Arc<Self>, SlideError> {
        select(Preset::from(preset).config(), seed)
    }

    /// Move the empty tile without touching the recorded rebuild
    pub fn apply_move(&self, direction: MoveDirection) -> MoveTransition {
        self.board().apply_move(direction.into()).into()
    }

    /// Move the empty tile by direction name
    pub fn move_empty(&self, direction: String) -> Result<MoveTransition, SlideError> {
        Ok(self.board().move_empty(&direction)?.into())
    }

    /// Undo one recorded shuffle move; `None` once the rebuild is finished
    pub fn step_build(&self) -> Option<MoveTransition> {
        self.board().step_build().map(MoveTransition::from)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.board().snapshot().into()
    }

    pub fn tile_location(&self, tile: u32) -> Option<TilePosition> {
        self.board()
            .tile_location(tile as usize)
            .map(TilePosition::from)
    }

    pub fn remaining_steps(&self) -> u32 {
        self.board().remaining_steps() as u32
    }

    pub fn is_solved(&self) -> bool {
        self.board().is_solved()
    }

    /// Batch seed that reproduces this selection
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Index of the winning trial within its batch
    pub fn trial(&self) -> u32 {
        self.trial
    }

    /// Serialize the board state for saving
    pub fn serialize(&self) -> Result<String, SlideError> {
        serde_json::to_string(&self.board().snapshot())
            .map_err(|e| SlideError::Serialization(e.to_string()))
    }
}

fn select(config: ShuffleConfig, seed: Option<u64>) -> Result<Arc<SlideBoard>, SlideError> {
    let mut selector = TrialSelector::new(config);
    if let Some(seed) = seed {
        selector = selector.with_seed(seed);
    }
    Ok(SlideBoard::from_selection(selector.select_best()?))
}

// Free functions (UniFFI doesn't support associated functions that aren't constructors)

/// Select the hardest of `trials` shuffles, or the first to hit `target_misplaced`
#[uniffi::export]
pub fn select_best_board(
    dimension: u32,
    trials: u32,
    moves: u32,
    target_misplaced: Option<u32>,
) -> Result<Arc<SlideBoard>, SlideError> {
    let selection = slide_core::select_best(
        dimension as usize,
        trials as usize,
        moves as usize,
        target_misplaced.map(|t| t as usize),
    )?;
    Ok(SlideBoard::from_selection(selection))
}

/// Whether two coordinates are neighbours without crossing an edge
#[uniffi::export]
pub fn is_adjacent_without_wrap(a: u32, b: u32, dimension: u32) -> bool {
    slide_core::is_adjacent_without_wrap(a as usize, b as usize, dimension as usize)
}

/// Restore a board saved with `SlideBoard::serialize`
#[uniffi::export]
pub fn board_deserialize(json: String) -> Result<Arc<SlideBoard>, SlideError> {
    let snapshot: Snapshot =
        serde_json::from_str(&json).map_err(|e| SlideError::Serialization(e.to_string()))?;
    let board = Arrangement::from_snapshot(&snapshot)?;
    Ok(Arc::new(SlideBoard {
        board: Mutex::new(board),
        seed: 0,
        trial: 0,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_rebuilds_to_solved() {
        let board = SlideBoard::new(3, 20, 50, None, Some(11)).unwrap();
        let steps = board.remaining_steps();
        assert!(steps > 0);
        assert!(!board.is_solved());

        let mut count = 0;
        while board.step_build().is_some() {
            count += 1;
        }
        assert_eq!(count, steps);
        assert!(board.is_solved());
        assert!(board.step_build().is_none());
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = SlideBoard::new(4, 30, 40, None, Some(5)).unwrap();
        let b = SlideBoard::new(4, 30, 40, None, Some(5)).unwrap();
        assert_eq!(a.snapshot().grid, b.snapshot().grid);
        assert_eq!(a.trial(), b.trial());
        assert_eq!(a.seed(), 5);
    }

    #[test]
    fn test_errors_are_mapped() {
        assert!(matches!(
            SlideBoard::new(1, 10, 10, None, None),
            Err(SlideError::InvalidConfig(_))
        ));
        assert!(matches!(
            SlideBoard::new(3, 0, 10, None, None),
            Err(SlideError::NoValidShuffle(_))
        ));

        let board = SlideBoard::from_preset(ShufflePreset::Easy, Some(1)).unwrap();
        assert!(matches!(
            board.move_empty("diagonal".to_string()),
            Err(SlideError::UnknownMove(_))
        ));
    }

    #[test]
    fn test_manual_move_keeps_history() {
        let board = SlideBoard::from_preset(ShufflePreset::Medium, Some(3)).unwrap();
        let before = board.snapshot();
        let t = board.move_empty("left".to_string()).unwrap();
        let after = board.snapshot();

        assert_eq!(t.direction, MoveDirection::Left);
        assert_eq!(t.to_coord, before.empty_coord);
        assert_eq!(t.from_coord, after.empty_coord);
        assert_eq!(after.history, before.history);
        assert_eq!(after.build_cursor, before.build_cursor);

        let location = board.tile_location(t.tile).unwrap();
        assert_eq!(location.coord, before.empty_coord);
    }

    #[test]
    fn test_serialize_round_trip() {
        let board = SlideBoard::new(3, 15, 20, None, Some(8)).unwrap();
        board.step_build();
        let restored = board_deserialize(board.serialize().unwrap()).unwrap();
        assert_eq!(restored.snapshot().grid, board.snapshot().grid);
        assert_eq!(restored.remaining_steps(), board.remaining_steps());

        assert!(matches!(
            board_deserialize("{}".to_string()),
            Err(SlideError::Serialization(_))
        ));
    }

    #[test]
    fn test_free_functions() {
        let board = select_best_board(3, 30, 12, None).unwrap();
        assert_eq!(board.snapshot().dimension, 3);
        assert!(is_adjacent_without_wrap(1, 2, 3));
        assert!(!is_adjacent_without_wrap(3, 4, 3));
        assert!(!is_adjacent_without_wrap(0, 1, 3));
        assert!(!is_adjacent_without_wrap(1, 2, 0));
    }
}
