use crate::coord::{to_linear, to_row_col};
use crate::PuzzleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction the empty tile travels in.
///
/// The board is a torus: leaving one edge re-enters from the opposite edge,
/// so every move is legal from every cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All moves, in the order candidates are considered when shuffling
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// The move that undoes this one
    pub fn inverse(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    /// Coordinate the empty tile reaches when this move is applied at `empty`
    pub fn target(self, empty: usize, n: usize) -> usize {
        let (row, col) = to_row_col(empty, n);
        let (row, col) = match self {
            Move::Up => (if row == 1 { n } else { row - 1 }, col),
            Move::Down => (if row == n { 1 } else { row + 1 }, col),
            Move::Left => (row, if col == 1 { n } else { col - 1 }),
            Move::Right => (row, if col == n { 1 } else { col + 1 }),
        };
        to_linear(row, col, n)
    }

    pub fn name(self) -> &'static str {
        match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Move {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Move::Up),
            "down" => Ok(Move::Down),
            "left" => Ok(Move::Left),
            "right" => Ok(Move::Right),
            _ => Err(PuzzleError::UnknownMove(s.to_string())),
        }
    }
}

/// Whether `a` and `b` are neighbours on the flat board, one row or one
/// column apart without crossing an edge.
///
/// Renderers use this to tell a direct slide from an edge-wrap teleport.
/// Coordinates outside `1..=n*n` are never adjacent.
pub fn is_adjacent_without_wrap(a: usize, b: usize, n: usize) -> bool {
    let cells = 1..=n.saturating_mul(n);
    if !cells.contains(&a) || !cells.contains(&b) {
        return false;
    }
    let (a_row, a_col) = to_row_col(a, n);
    let (b_row, b_col) = to_row_col(b, n);
    (a_row == b_row && a_col.abs_diff(b_col) == 1) || (a_col == b_col && a_row.abs_diff(b_row) == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_is_involution() {
        for mv in Move::ALL {
            assert_ne!(mv.inverse(), mv);
            assert_eq!(mv.inverse().inverse(), mv);
        }
    }

    #[test]
    fn test_interior_targets() {
        // 3x3, centre cell is 5
        assert_eq!(Move::Up.target(5, 3), 2);
        assert_eq!(Move::Down.target(5, 3), 8);
        assert_eq!(Move::Left.target(5, 3), 4);
        assert_eq!(Move::Right.target(5, 3), 6);
    }

    #[test]
    fn test_wrapping_targets() {
        // 4x4: top-left 1, top-right 4, bottom-left 13, bottom-right 16
        assert_eq!(Move::Up.target(2, 4), 14);
        assert_eq!(Move::Down.target(14, 4), 2);
        assert_eq!(Move::Left.target(5, 4), 8);
        assert_eq!(Move::Right.target(8, 4), 5);
        assert_eq!(Move::Up.target(1, 4), 13);
        assert_eq!(Move::Right.target(16, 4), 13);
    }

    #[test]
    fn test_target_then_inverse_returns() {
        for n in 2..=5 {
            for coord in 1..=n * n {
                for mv in Move::ALL {
                    let there = mv.target(coord, n);
                    assert_eq!(mv.inverse().target(there, n), coord);
                }
            }
        }
    }

    #[test]
    fn test_adjacency_without_wrap() {
        assert!(is_adjacent_without_wrap(5, 2, 3));
        assert!(is_adjacent_without_wrap(5, 6, 3));
        assert!(is_adjacent_without_wrap(1, 4, 3));
        // Same row but across the edge
        assert!(!is_adjacent_without_wrap(4, 6, 3));
        // Linear neighbours on different rows are not adjacent
        assert!(!is_adjacent_without_wrap(3, 4, 3));
        assert!(!is_adjacent_without_wrap(1, 7, 3));
        assert!(!is_adjacent_without_wrap(5, 5, 3));
        assert!(!is_adjacent_without_wrap(1, 5, 3));
    }

    #[test]
    fn test_out_of_range_is_not_adjacent() {
        assert!(!is_adjacent_without_wrap(0, 1, 3));
        assert!(!is_adjacent_without_wrap(9, 10, 3));
        assert!(!is_adjacent_without_wrap(1, 2, 0));
        assert!(!is_adjacent_without_wrap(usize::MAX, 1, usize::MAX));
    }

    #[test]
    fn test_wrap_moves_are_not_adjacent() {
        let n = 4;
        assert!(!is_adjacent_without_wrap(2, Move::Up.target(2, n), n));
        assert!(!is_adjacent_without_wrap(8, Move::Right.target(8, n), n));
        assert!(is_adjacent_without_wrap(6, Move::Up.target(6, n), n));
    }

    #[test]
    fn test_parse_and_display() {
        for mv in Move::ALL {
            assert_eq!(mv.to_string().parse::<Move>().unwrap(), mv);
        }
        assert_eq!("UP".parse::<Move>().unwrap(), Move::Up);
        assert_eq!(" Left ".parse::<Move>().unwrap(), Move::Left);
        assert_eq!(
            "sideways".parse::<Move>(),
            Err(PuzzleError::UnknownMove("sideways".to_string()))
        );
    }
}
