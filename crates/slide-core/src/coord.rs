//! Conversion between 1-based linear cell coordinates and `(row, col)` pairs.
//!
//! Coordinates are numbered row-major starting from the top-left corner:
//! `(1, 1)` is coordinate 1, `(1, n)` is `n`, `(n, 1)` is `n * (n - 1) + 1`
//! and `(n, n)` is `n * n`. The coordinate of a cell is also the identity of
//! the tile that occupies it when the board is solved.

/// Convert a linear coordinate in `1..=n*n` into a `(row, col)` pair in `1..=n`.
#[inline]
pub fn to_row_col(coord: usize, n: usize) -> (usize, usize) {
    ((coord - 1) / n + 1, (coord - 1) % n + 1)
}

/// Convert a `(row, col)` pair in `1..=n` into a linear coordinate in `1..=n*n`.
#[inline]
pub fn to_linear(row: usize, col: usize, n: usize) -> usize {
    (row - 1) * n + col
}

/// Iterate over every `(row, col)` pair of an `n`×`n` board in row-major order.
pub fn all_cells(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (1..=n).flat_map(move |row| (1..=n).map(move |col| (row, col)))
}
