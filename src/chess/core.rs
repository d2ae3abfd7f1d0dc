//! Chess primitives commonly used within [`crate::chess`]: squares, colors,
//! piece kinds and the pieces themselves.

use std::fmt::{self, Write};
use std::ops::Not;

use anyhow::{bail, Context};

use crate::chess::board::Board;
use crate::chess::rules;

/// Width and height of the standard chess board.
pub const STANDARD_SIZE: i32 = 8;

/// A position on the board, 1-based on both axes.
///
/// The square is a single pair of integers. It can be read through two views:
/// [`Square::row`]/[`Square::column`] (used by the bounds check) and
/// [`Square::x`]/[`Square::y`] (used by distance and direction arithmetic).
/// Both views return the same underlying values: `x` is the row and `y` is
/// the column.
///
/// Any pair of integers is a valid square, including the ones that are
/// outside of the board: it is up to the rules to reject them.
///
/// ```
/// use movecheck::chess::core::Square;
///
/// let square = Square::new(2, 5);
/// assert_eq!(square.row(), square.x());
/// assert_eq!(square.column(), square.y());
/// assert_eq!(square.to_string(), "e2");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: i32,
    column: i32,
}

impl Square {
    /// Connects row (rank) and column (file) to form a full square.
    #[must_use]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Returns the row (rank) on which the square is located.
    #[must_use]
    pub const fn row(self) -> i32 {
        self.row
    }

    /// Returns the column (file) on which the square is located.
    #[must_use]
    pub const fn column(self) -> i32 {
        self.column
    }

    /// Same as [`Square::row`].
    #[must_use]
    pub const fn x(self) -> i32 {
        self.row
    }

    /// Same as [`Square::column`].
    #[must_use]
    pub const fn y(self) -> i32 {
        self.column
    }

    /// Returns the square shifted by given number of rows and columns.
    #[must_use]
    pub const fn offset(self, rows: i32, columns: i32) -> Self {
        Self::new(self.row + rows, self.column + columns)
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    /// Parses a square in algebraic notation: a column letter (`a` is the
    /// first column) followed by the row number, e.g. `e4` or `b12`.
    fn try_from(square: &str) -> anyhow::Result<Self> {
        let mut chars = square.chars();
        let column = match chars.next() {
            Some(file @ 'a'..='z') => i32::from(file as u8 - b'a') + 1,
            Some(file) => bail!("square column should be within 'a'..='z', got '{file}'"),
            None => bail!("square should not be empty"),
        };
        let rank = chars.as_str();
        if rank.is_empty() || !rank.bytes().all(|c| c.is_ascii_digit()) {
            bail!("square row should be a number, got '{rank}' in '{square}'");
        }
        let row = rank
            .parse::<i32>()
            .with_context(|| format!("square row can not be parsed: '{square}'"))?;
        if row == 0 {
            bail!("square row should start from 1, got '{square}'");
        }
        Ok(Self::new(row, column))
    }
}

impl fmt::Display for Square {
    /// Prints the square in algebraic notation when it has one, as a
    /// `(row, column)` pair otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match u8::try_from(self.column) {
            Ok(file @ 1..=26) if self.row > 0 => {
                write!(f, "{}{}", (b'a' + file - 1) as char, self.row)
            },
            _ => write!(f, "({}, {})", self.row, self.column),
        }
    }
}

/// A game is played between two sides: White and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// The sign of the row change of a pawn advance: White pawns move toward
    /// increasing rows, Black pawns toward decreasing rows.
    #[must_use]
    pub const fn pawn_direction(self) -> i32 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// The row pawns of this color start on for a board with `rows` rows.
    #[must_use]
    pub const fn pawns_starting_row(self, rows: i32) -> i32 {
        match self {
            Self::White => 2,
            Self::Black => rows - 1,
        }
    }

    /// The row the pieces of this color start on for a board with `rows`
    /// rows.
    #[must_use]
    pub const fn backrank(self, rows: i32) -> i32 {
        match self {
            Self::White => 1,
            Self::Black => rows,
        }
    }
}

impl Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opponent()
    }
}

impl TryFrom<&str> for Color {
    type Error = anyhow::Error;

    fn try_from(color: &str) -> anyhow::Result<Self> {
        match color {
            "w" => Ok(Self::White),
            "b" => Ok(Self::Black),
            _ => bail!("color should be 'w' or 'b', got '{color}'"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::White => 'w',
            Self::Black => 'b',
        })
    }
}

/// Standard [chess pieces].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl TryFrom<char> for PieceKind {
    type Error = anyhow::Error;

    /// Parses the kind from its lowercase or uppercase FEN symbol.
    fn try_from(symbol: char) -> anyhow::Result<Self> {
        match symbol.to_ascii_lowercase() {
            'k' => Ok(Self::King),
            'q' => Ok(Self::Queen),
            'r' => Ok(Self::Rook),
            'b' => Ok(Self::Bishop),
            'n' => Ok(Self::Knight),
            'p' => Ok(Self::Pawn),
            _ => bail!("piece kind should be within \"kqrbnp\", got '{symbol}'"),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::King => 'k',
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
            Self::Pawn => 'p',
        })
    }
}

/// Represents a specific piece owned by a player, together with whether it
/// has moved since the game started.
///
/// The moved flag is owned by whoever applies moves to the board; the rules
/// only ever read it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
    moved: bool,
}

impl Piece {
    /// Creates a piece that has not moved yet.
    #[must_use]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self {
            color,
            kind,
            moved: false,
        }
    }

    /// Returns the same piece with its moved flag set.
    #[must_use]
    pub const fn moved(self) -> Self {
        Self {
            moved: true,
            ..self
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn color(self) -> Color {
        self.color
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    /// Returns `true` if the piece has made at least one move.
    #[must_use]
    pub const fn has_moved(self) -> bool {
        self.moved
    }

    /// Sets the moved flag. Called when a move is applied to the board.
    pub fn mark_moved(&mut self) {
        self.moved = true;
    }

    /// Checks the move against the rule of this piece's kind. The piece is
    /// expected to stand on `from`.
    #[must_use]
    pub fn can_move(self, from: Square, to: Square, board: &dyn Board) -> bool {
        rules::lookup(self.kind)(from, to, board)
    }
}

impl TryFrom<char> for Piece {
    type Error = anyhow::Error;

    /// Parses a FEN piece symbol: uppercase for White, lowercase for Black.
    /// The piece is considered unmoved.
    fn try_from(symbol: char) -> anyhow::Result<Self> {
        let kind = PieceKind::try_from(symbol).with_context(|| {
            format!("piece symbol should be within \"KQRBNPkqrbnp\", got '{symbol}'")
        })?;
        let color = if symbol.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Self::new(color, kind))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.kind.to_string();
        match self.color {
            // White player: uppercase symbols.
            Color::White => f.write_str(&symbol.to_ascii_uppercase()),
            // Black player: lowercase symbols.
            Color::Black => f.write_str(&symbol),
        }
    }
}
