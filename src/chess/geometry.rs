//! Building blocks of the move rules. None of these know anything about piece
//! kinds: they only look at the squares, the board dimensions and which
//! squares are occupied.
//!
//! Every predicate has the same shape as the piece rules in
//! [`crate::chess::rules`], `(from, to, board) -> bool`, so that they compose
//! freely. None of them mutate anything.

use std::ops::RangeInclusive;

use crate::chess::board::Board;
use crate::chess::core::Square;

/// Row and column change of a move. The components are wide enough to hold
/// the difference between any two squares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delta {
    #[allow(missing_docs)]
    pub rows: i64,
    #[allow(missing_docs)]
    pub columns: i64,
}

impl Delta {
    /// Change from `from` to `to`.
    #[must_use]
    pub fn between(from: Square, to: Square) -> Self {
        Self {
            rows: i64::from(to.x()) - i64::from(from.x()),
            columns: i64::from(to.y()) - i64::from(from.y()),
        }
    }

    /// Number of single-square steps needed to cover the longer axis.
    #[must_use]
    pub fn length(self) -> i64 {
        self.rows.abs().max(self.columns.abs())
    }
}

/// Returns `true` if `to` is on the board: both the row and the column are
/// within `1..=dimension`. `from` is not looked at.
pub fn within_bounds(_from: Square, to: Square, board: &dyn Board) -> bool {
    let (rows, columns) = board.dimensions();
    (1..=columns).contains(&to.column()) && (1..=rows).contains(&to.row())
}

/// Returns `true` if `to` is empty or holds a piece of the other color than
/// the one standing on `from`. An occupied `to` is never available when there
/// is nothing on `from`.
pub fn available(from: Square, to: Square, board: &dyn Board) -> bool {
    match (board.occupant(from), board.occupant(to)) {
        (_, None) => true,
        (Some(mover), Some(occupant)) => mover.color() != occupant.color(),
        (None, Some(_)) => false,
    }
}

/// The condition every move has to satisfy regardless of the piece: there
/// is a piece on `from`, `to` is on the board and is not occupied by a piece
/// of the same color.
pub fn general(from: Square, to: Square, board: &dyn Board) -> bool {
    board.occupant(from).is_some() && within_bounds(from, to, board) && available(from, to, board)
}

/// Returns `true` if the move is along a row or a column and nothing stands
/// between `from` and `to`.
///
/// # Panics
///
/// If `from == to`, see [`path_clear`].
pub fn axis_aligned(from: Square, to: Square, board: &dyn Board) -> bool {
    if !path_clear(from, to, board) {
        return false;
    }
    let delta = Delta::between(from, to);
    (delta.rows == 0) != (delta.columns == 0)
}

/// Returns `true` if the move changes the row and the column by the same
/// amount and nothing stands between `from` and `to`.
///
/// # Panics
///
/// If `from == to`, see [`path_clear`].
pub fn diagonal(from: Square, to: Square, board: &dyn Board) -> bool {
    if !path_clear(from, to, board) {
        return false;
    }
    let delta = Delta::between(from, to);
    delta.rows.abs() == delta.columns.abs()
}

/// Walks from `from` towards `to` one square at a time (each step changes
/// every axis by the sign of its delta) and returns `true` if none of the
/// squares strictly between them is occupied.
///
/// The walk takes at most as many steps as the longer axis of the move, so it
/// also terminates for moves that are not on a line.
///
/// # Panics
///
/// If `from == to`: a zero-length move has no direction.
pub fn path_clear(from: Square, to: Square, board: &dyn Board) -> bool {
    assert_ne!(from, to, "path clearance requires a move of non-zero length");
    let delta = Delta::between(from, to);
    let (row_step, column_step) = (delta.rows.signum(), delta.columns.signum());
    let (rows, columns) = board.dimensions();
    // Squares off the board are never occupied: only walk the part of the ray
    // that crosses the board.
    let on_rows = steps_on_board(i64::from(from.row()), row_step, i64::from(rows));
    let on_columns = steps_on_board(i64::from(from.column()), column_step, i64::from(columns));
    let first = 1_i64.max(*on_rows.start()).max(*on_columns.start());
    let last = (delta.length() - 1).min(*on_rows.end()).min(*on_columns.end());
    (first..=last).all(|step| {
        let row = i64::from(from.row()) + step * row_step;
        let column = i64::from(from.column()) + step * column_step;
        match (i32::try_from(row), i32::try_from(column)) {
            (Ok(row), Ok(column)) => board.occupant(Square::new(row, column)).is_none(),
            _ => true,
        }
    })
}

/// Range of step counts `k` for which `start + k * step` is within `1..=size`.
fn steps_on_board(start: i64, step: i64, size: i64) -> RangeInclusive<i64> {
    match step {
        0 if (1..=size).contains(&start) => i64::MIN..=i64::MAX,
        0 => 1..=0,
        1 => 1 - start..=size - start,
        _ => start - size..=start - 1,
    }
}
