use crate::arrangement::Arrangement;
use crate::coord::to_row_col;
use crate::moves::Move;
use crate::recent::RecentCoords;
use crate::{PuzzleError, Result};
use serde::{Deserialize, Serialize};

/// Plain view of an [`Arrangement`] for front ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub dimension: usize,
    /// Tile identities, one inner vector per row
    pub grid: Vec<Vec<usize>>,
    pub empty_tile: usize,
    pub empty_coord: usize,
    pub empty_row: usize,
    pub empty_col: usize,
    pub misplaced: Option<usize>,
    pub history: Vec<Move>,
    pub build_cursor: usize,
}

impl From<&Arrangement> for Snapshot {
    fn from(board: &Arrangement) -> Self {
        let (empty_row, empty_col) = to_row_col(board.empty_coord(), board.dimension());
        Self {
            dimension: board.dimension(),
            grid: board.rows(),
            empty_tile: board.empty_tile(),
            empty_coord: board.empty_coord(),
            empty_row,
            empty_col,
            misplaced: board.misplaced(),
            history: board.history().to_vec(),
            build_cursor: board.build_cursor(),
        }
    }
}

impl Arrangement {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(self)
    }

    /// Rebuild an arrangement from a snapshot.
    ///
    /// The empty coordinate is located from the grid rather than trusted, a
    /// present misplaced count is recomputed, and the recent-coordinate
    /// buffer starts over at full capacity. The build cursor is kept as given;
    /// [`Arrangement::step_build`] clamps it if it points past the history.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self> {
        let n = snapshot.dimension;
        if n < 2 {
            return Err(PuzzleError::DimensionTooSmall(n));
        }
        let cells: Vec<usize> = snapshot.grid.iter().flatten().copied().collect();
        if snapshot.grid.len() != n || snapshot.grid.iter().any(|row| row.len() != n) {
            return Err(PuzzleError::GridSizeMismatch {
                expected: n.saturating_mul(n),
                actual: cells.len(),
            });
        }
        // n rows of n cells are in memory, so this cannot overflow
        let max = cells.len();

        let mut seen = vec![false; max + 1];
        for &tile in &cells {
            if tile == 0 || tile > max || seen[tile] {
                return Err(PuzzleError::NotAPermutation { max });
            }
            seen[tile] = true;
        }

        let empty_tile = snapshot.empty_tile;
        let empty_coord = cells
            .iter()
            .position(|&t| t == empty_tile)
            .map(|index| index + 1)
            .ok_or(PuzzleError::EmptyTileOutOfRange { tile: empty_tile, max })?;

        let mut recent = RecentCoords::with_capacity(RecentCoords::MAX_CAPACITY);
        recent.push(empty_coord);

        let mut board = Self {
            n,
            cells,
            empty_tile,
            empty_coord,
            misplaced: None,
            history: snapshot.history.clone(),
            build_cursor: snapshot.build_cursor,
            recent,
        };
        if snapshot.misplaced.is_some() {
            board.recompute_misplaced();
        }
        Ok(board)
    }
}
