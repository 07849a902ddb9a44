use crate::coord::{all_cells, to_linear, to_row_col};
use crate::moves::{is_adjacent_without_wrap, Move};
use crate::recent::RecentCoords;
use crate::{PuzzleError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One applied move, as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Direction the empty tile travelled
    #[serde(rename = "move")]
    pub mv: Move,
    /// Identity of the tile that slid into the old empty cell
    pub tile: usize,
    /// Coordinate the tile left (the new empty coordinate)
    pub from: usize,
    /// Coordinate the tile arrived at (the old empty coordinate)
    pub to: usize,
    /// True when the slide crosses a board edge
    pub wraps: bool,
}

/// Where a tile currently sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLocation {
    pub tile: usize,
    pub coord: usize,
    pub row: usize,
    pub col: usize,
}

/// An N×N toroidal board with its move history.
///
/// Tile identities are the solved coordinates `1..=n*n`. One of them, chosen
/// at construction, plays the role of the empty tile.
#[derive(Debug, Clone)]
pub struct Arrangement {
    pub(crate) n: usize,
    /// Row-major tile identities, `cells[coord - 1]`
    pub(crate) cells: Vec<usize>,
    pub(crate) empty_tile: usize,
    pub(crate) empty_coord: usize,
    /// `None` marks a discarded shuffle
    pub(crate) misplaced: Option<usize>,
    pub(crate) history: Vec<Move>,
    /// Moves of `history` not yet undone
    pub(crate) build_cursor: usize,
    pub(crate) recent: RecentCoords,
}

impl Arrangement {
    /// Create a solved board with the given empty tile.
    ///
    /// `recent_capacity` is clamped to the range a random draw would produce.
    pub fn solved(n: usize, empty_tile: usize, recent_capacity: usize) -> Result<Self> {
        if n < 2 {
            return Err(PuzzleError::DimensionTooSmall(n));
        }
        let max = n * n;
        if !(1..=max).contains(&empty_tile) {
            return Err(PuzzleError::EmptyTileOutOfRange { tile: empty_tile, max });
        }

        let capacity = recent_capacity.clamp(RecentCoords::MIN_CAPACITY, RecentCoords::MAX_CAPACITY);
        let mut recent = RecentCoords::with_capacity(capacity);
        recent.push(empty_tile);

        Ok(Self {
            n,
            cells: (1..=max).collect(),
            empty_tile,
            empty_coord: empty_tile,
            misplaced: Some(0),
            history: Vec::new(),
            build_cursor: 0,
            recent,
        })
    }

    /// Create a solved board with a uniformly random empty tile and a random
    /// recent-coordinate capacity.
    pub fn new<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Self> {
        if n < 2 {
            return Err(PuzzleError::DimensionTooSmall(n));
        }
        let empty_tile = rng.gen_range(1..=n * n);
        let capacity = rng.gen_range(RecentCoords::MIN_CAPACITY..=RecentCoords::MAX_CAPACITY);
        Self::solved(n, empty_tile, capacity)
    }

    /// Board dimension N
    pub fn dimension(&self) -> usize {
        self.n
    }

    /// Tile identities in row-major order
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    pub fn rows(&self) -> Vec<Vec<usize>> {
        self.cells.chunks(self.n).map(<[usize]>::to_vec).collect()
    }

    /// Tile at a 1-based `(row, col)`
    pub fn tile_at(&self, row: usize, col: usize) -> usize {
        self.cells[to_linear(row, col, self.n) - 1]
    }

    pub fn empty_tile(&self) -> usize {
        self.empty_tile
    }

    pub fn empty_coord(&self) -> usize {
        self.empty_coord
    }

    /// Number of misplaced tiles, or `None` if this arrangement was discarded
    pub fn misplaced(&self) -> Option<usize> {
        self.misplaced
    }

    pub fn is_discarded(&self) -> bool {
        self.misplaced.is_none()
    }

    pub fn is_solved(&self) -> bool {
        self.misplaced == Some(0)
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn build_cursor(&self) -> usize {
        self.build_cursor
    }

    pub fn recent_coords(&self) -> &RecentCoords {
        &self.recent
    }

    /// Move the empty tile one step, swapping it with the tile at the target
    /// cell.
    ///
    /// This never touches the move history; it is also the entry point for
    /// manual moves requested by a front end.
    pub fn apply_move(&mut self, mv: Move) -> Transition {
        let from = self.empty_coord;
        let to = mv.target(from, self.n);
        self.cells.swap(from - 1, to - 1);
        self.empty_coord = to;
        self.recompute_misplaced();

        Transition {
            mv,
            tile: self.cells[from - 1],
            from: to,
            to: from,
            wraps: !is_adjacent_without_wrap(from, to, self.n),
        }
    }

    /// Manual move by direction name (`up`, `down`, `left`, `right`, any case).
    ///
    /// Like [`Arrangement::apply_move`], the recorded rebuild is left alone.
    pub fn move_empty(&mut self, direction: &str) -> Result<Transition> {
        let mv: Move = direction.parse()?;
        Ok(self.apply_move(mv))
    }

    /// Count cells whose tile differs from their solved tile and store it
    pub fn recompute_misplaced(&mut self) -> usize {
        let count = self
            .cells
            .iter()
            .enumerate()
            .filter(|&(i, &tile)| tile != i + 1)
            .count();
        self.misplaced = Some(count);
        count
    }

    /// Locate a tile, `None` if the identity is not on this board
    pub fn tile_location(&self, tile: usize) -> Option<TileLocation> {
        let index = self.cells.iter().position(|&t| t == tile)?;
        let coord = index + 1;
        let (row, col) = to_row_col(coord, self.n);
        Some(TileLocation { tile, coord, row, col })
    }

    /// Tiles that are not on their solved cell, in row-major order
    pub fn misplaced_tiles(&self) -> impl Iterator<Item = TileLocation> + '_ {
        all_cells(self.n).filter_map(move |(row, col)| {
            let coord = to_linear(row, col, self.n);
            let tile = self.cells[coord - 1];
            (tile != coord).then_some(TileLocation { tile, coord, row, col })
        })
    }

    pub(crate) fn discard(&mut self) {
        self.misplaced = None;
    }
}

impl fmt::Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.n * self.n).to_string().len();
        for row in self.cells.chunks(self.n) {
            let line: Vec<String> = row
                .iter()
                .map(|&tile| {
                    if tile == self.empty_tile {
                        format!("{:>width$}", ".")
                    } else {
                        format!("{:>width$}", tile)
                    }
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
