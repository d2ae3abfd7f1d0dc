//! The board the rules are checked against.
//!
//! [`Board`] is the only thing the rules know about the board: its dimensions
//! and which piece (if any) stands on a given square. [`Mailbox`] is a
//! square-centric implementation of it with arbitrary dimensions, which also
//! knows how to apply moves and read/write [Forsyth-Edwards Notation] piece
//! placement.
//!
//! [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation

use std::fmt::{self, Write};

use anyhow::{bail, Context};
use strum::IntoEnumIterator;

use crate::chess::core::{Color, Piece, PieceKind, Square, STANDARD_SIZE};

/// Read-only view of the board consumed by [`crate::chess::geometry`] and
/// [`crate::chess::rules`].
pub trait Board {
    /// Returns `(rows, columns)`.
    fn dimensions(&self) -> (i32, i32);

    /// Returns the piece standing on `square`, or `None` if the square is
    /// empty or is not on the board.
    fn occupant(&self, square: Square) -> Option<Piece>;

    #[allow(missing_docs)]
    fn rows(&self) -> i32 {
        self.dimensions().0
    }

    #[allow(missing_docs)]
    fn columns(&self) -> i32 {
        self.dimensions().1
    }
}

bitflags::bitflags! {
    /// Tracks the ability to [castle] each side, as written in the third FEN
    /// field. The short side is the one towards the last column, the long
    /// side is the one towards the first column.
    ///
    /// The rights are only used to restore moved flags of kings and rooks
    /// when reading a position: the rules themselves look at the pieces.
    ///
    /// [castle]: https://www.chessprogramming.org/Castling
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct CastleRights: u8 {
        #[allow(missing_docs)]
        const NONE = 0;
        #[allow(missing_docs)]
        const WHITE_SHORT = 0b1000;
        #[allow(missing_docs)]
        const WHITE_LONG = 0b0100;
        #[allow(missing_docs)]
        const WHITE_BOTH = Self::WHITE_SHORT.bits() | Self::WHITE_LONG.bits();
        #[allow(missing_docs)]
        const BLACK_SHORT = 0b0010;
        #[allow(missing_docs)]
        const BLACK_LONG = 0b0001;
        #[allow(missing_docs)]
        const BLACK_BOTH = Self::BLACK_SHORT.bits() | Self::BLACK_LONG.bits();
        #[allow(missing_docs)]
        const ALL = Self::WHITE_BOTH.bits() | Self::BLACK_BOTH.bits();
    }
}

impl CastleRights {
    fn short(color: Color) -> Self {
        match color {
            Color::White => Self::WHITE_SHORT,
            Color::Black => Self::BLACK_SHORT,
        }
    }

    fn long(color: Color) -> Self {
        match color {
            Color::White => Self::WHITE_LONG,
            Color::Black => Self::BLACK_LONG,
        }
    }
}

impl TryFrom<&str> for CastleRights {
    type Error = anyhow::Error;

    /// Parses [`CastleRights`] from the FEN format: `-` or any non-empty
    /// combination of `KQkq` in this order.
    fn try_from(input: &str) -> anyhow::Result<Self> {
        if input == "-" {
            return Ok(Self::NONE);
        }
        let mut result = Self::NONE;
        let mut previous = Self::NONE;
        for symbol in input.chars() {
            let right = match symbol {
                'K' => Self::WHITE_SHORT,
                'Q' => Self::WHITE_LONG,
                'k' => Self::BLACK_SHORT,
                'q' => Self::BLACK_LONG,
                _ => bail!("unknown castle rights: {input}"),
            };
            // Rights are listed in decreasing order of their bits.
            if previous != Self::NONE && right.bits() >= previous.bits() {
                bail!("unknown castle rights: {input}");
            }
            result |= right;
            previous = right;
        }
        if result == Self::NONE {
            bail!("unknown castle rights: {input}");
        }
        Ok(result)
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::NONE {
            return f.write_char('-');
        }
        for (right, symbol) in [
            (Self::WHITE_SHORT, 'K'),
            (Self::WHITE_LONG, 'Q'),
            (Self::BLACK_SHORT, 'k'),
            (Self::BLACK_LONG, 'q'),
        ] {
            if self.contains(right) {
                f.write_char(symbol)?;
            }
        }
        Ok(())
    }
}

/// Square-centric board representation: each square stores the piece
/// standing on it, rows are laid out one after another starting from the
/// first one.
#[derive(Clone, PartialEq, Eq)]
pub struct Mailbox {
    rows: i32,
    columns: i32,
    squares: Vec<Option<Piece>>,
}

impl Mailbox {
    /// Creates an empty board of given dimensions.
    ///
    /// # Panics
    ///
    /// If either dimension is not positive.
    #[must_use]
    pub fn new(rows: i32, columns: i32) -> Self {
        assert!(
            rows > 0 && columns > 0,
            "board dimensions should be positive, got {rows}x{columns}"
        );
        let size = rows
            .checked_mul(columns)
            .and_then(|size| usize::try_from(size).ok())
            .unwrap_or_else(|| panic!("board is too large: {rows}x{columns}"));
        Self {
            rows,
            columns,
            squares: vec![None; size],
        }
    }

    /// Creates the starting arrangement of the standard chess variant: White
    /// on the first two rows, Black on the last two, nothing has moved.
    ///
    /// ```
    /// use movecheck::chess::board::Mailbox;
    ///
    /// assert_eq!(
    ///     Mailbox::standard().fen(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
    /// );
    /// ```
    #[must_use]
    pub fn standard() -> Self {
        const BACKRANK: [PieceKind; STANDARD_SIZE as usize] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut board = Self::new(STANDARD_SIZE, STANDARD_SIZE);
        for color in Color::iter() {
            for (column, kind) in (1..).zip(BACKRANK) {
                board.put(
                    Square::new(color.backrank(STANDARD_SIZE), column),
                    Piece::new(color, kind),
                );
                board.put(
                    Square::new(color.pawns_starting_row(STANDARD_SIZE), column),
                    Piece::new(color, PieceKind::Pawn),
                );
            }
        }
        board
    }

    fn index(&self, square: Square) -> Option<usize> {
        if !(1..=self.rows).contains(&square.row()) || !(1..=self.columns).contains(&square.column())
        {
            return None;
        }
        usize::try_from((square.row() - 1) * self.columns + square.column() - 1).ok()
    }

    /// Places the piece on an empty square.
    ///
    /// # Panics
    ///
    /// If the square is not on the board.
    pub fn put(&mut self, square: Square, piece: Piece) {
        let index = self
            .index(square)
            .unwrap_or_else(|| panic!("can't put piece outside of the board: {square}"));
        debug_assert!(
            self.squares[index].is_none(),
            "can't put piece to already occupied square {square}"
        );
        self.squares[index] = Some(piece);
    }

    /// Removes and returns the piece standing on the square.
    pub fn clear(&mut self, square: Square) -> Option<Piece> {
        self.index(square)
            .and_then(|index| self.squares[index].take())
    }

    /// Applies a move without checking its legality: the piece standing on
    /// `from` goes to `to`, replacing (capturing) whatever stood there, and
    /// is marked as moved. A king moving two columns sideways brings the
    /// rook of its color from that edge of the board next to it; any other
    /// piece on the edge stays where it is.
    ///
    /// Returns the captured piece.
    ///
    /// # Errors
    ///
    /// If `from` is empty or `to` is not on the board.
    pub fn move_piece(&mut self, from: Square, to: Square) -> anyhow::Result<Option<Piece>> {
        if self.index(to).is_none() {
            bail!("can't move piece outside of the board: {to}");
        }
        let Some(mut piece) = self.clear(from) else {
            bail!("there is no piece to move on {from}");
        };
        piece.mark_moved();
        let captured = self.clear(to);
        self.put(to, piece);
        let lateral = to.column() - from.column();
        if piece.kind() == PieceKind::King && to.row() == from.row() && lateral.abs() == 2 {
            let rook_column = if lateral < 0 { 1 } else { self.columns };
            let rook_square = Square::new(from.row(), rook_column);
            let crossed = Square::new(from.row(), from.column() + lateral.signum());
            let is_partner = |rook: Piece| {
                rook.kind() == PieceKind::Rook && rook.color() == piece.color()
            };
            if self.occupant(crossed).is_none()
                && self.occupant(rook_square).is_some_and(is_partner)
            {
                if let Some(mut rook) = self.clear(rook_square) {
                    rook.mark_moved();
                    self.put(crossed, rook);
                }
            }
        }
        Ok(captured)
    }

    /// Parses the board from the piece placement field of [Forsyth-Edwards
    /// Notation], optionally followed by the side to move and castling
    /// fields. The number of rows and columns is inferred from the placement
    /// (empty runs longer than 9 squares are written with several digits).
    /// Remaining FEN fields do not affect move legality and are ignored.
    ///
    /// Moved flags are restored from the position: pawns that are not on
    /// their starting row have moved, kings and rooks have not moved only if
    /// they stand on their initial squares (kings in the middle column, `e`
    /// on the standard board, rooks in the corners) and the corresponding castle
    /// rights are present (all rights are assumed when the castling field is
    /// missing). Everything else is considered unmoved.
    ///
    /// ```
    /// use movecheck::chess::board::{Board, Mailbox};
    /// use movecheck::chess::core::Square;
    ///
    /// let board = Mailbox::from_fen("4k3/8/8/8/8/8/4P3/R3K2R w Q - 0 1").unwrap();
    /// assert_eq!(board.dimensions(), (8, 8));
    /// assert!(!board.occupant(Square::new(1, 1)).unwrap().has_moved());
    /// assert!(board.occupant(Square::new(1, 8)).unwrap().has_moved());
    /// ```
    ///
    /// # Errors
    ///
    /// If the placement is malformed or ranks have different lengths.
    ///
    /// [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    pub fn from_fen(input: &str) -> anyhow::Result<Self> {
        let mut parts = input.split_whitespace();
        let Some(placement) = parts.next() else {
            bail!("incorrect FEN: missing pieces placement");
        };
        let ranks = placement
            .split('/')
            .map(parse_rank)
            .collect::<anyhow::Result<Vec<_>>>()
            .with_context(|| format!("incorrect FEN: can't parse placement {placement}"))?;
        let columns = ranks[0].len();
        if let Some(rank) = ranks.iter().find(|rank| rank.len() != columns) {
            bail!(
                "incorrect FEN: rank size should be exactly {columns}, got {}",
                rank.len()
            );
        }
        let (Ok(rows), Ok(columns)) = (i32::try_from(ranks.len()), i32::try_from(columns)) else {
            bail!("incorrect FEN: board is too large");
        };
        if rows.checked_mul(columns).is_none() {
            bail!("incorrect FEN: board is too large");
        }
        if columns == 0 {
            bail!("incorrect FEN: ranks should not be empty");
        }
        // Side to move does not affect legality, only check that it is valid.
        if let Some(side_to_move) = parts.next() {
            let _ = Color::try_from(side_to_move)?;
        }
        let castling = match parts.next() {
            Some(value) => CastleRights::try_from(value)?,
            None => CastleRights::ALL,
        };
        let mut board = Self::new(rows, columns);
        // The first rank in FEN is the last row of the board.
        for (row, rank) in (1..=rows).rev().zip(ranks) {
            for (column, piece) in (1..).zip(rank) {
                if let Some(piece) = piece {
                    let square = Square::new(row, column);
                    let piece = if board.restored_moved_flag(square, piece, castling) {
                        piece.moved()
                    } else {
                        piece
                    };
                    board.put(square, piece);
                }
            }
        }
        Ok(board)
    }

    fn restored_moved_flag(&self, square: Square, piece: Piece, castling: CastleRights) -> bool {
        let color = piece.color();
        let on_backrank = square.row() == color.backrank(self.rows);
        match piece.kind() {
            PieceKind::Pawn => square.row() != color.pawns_starting_row(self.rows),
            PieceKind::King => {
                !(on_backrank
                    && square.column() == self.king_column()
                    && castling.intersects(CastleRights::short(color) | CastleRights::long(color)))
            },
            PieceKind::Rook => {
                let right = if square.column() == 1 {
                    CastleRights::long(color)
                } else if square.column() == self.columns {
                    CastleRights::short(color)
                } else {
                    CastleRights::NONE
                };
                !(on_backrank && right != CastleRights::NONE && castling.contains(right))
            },
            _ => false,
        }
    }

    /// The column kings start on: `e` on the standard board.
    const fn king_column(&self) -> i32 {
        self.columns / 2 + 1
    }

    /// Returns the piece placement field of FEN for this board.
    #[must_use]
    pub fn fen(&self) -> String {
        let mut result = String::new();
        for row in (1..=self.rows).rev() {
            let mut empty_squares = 0;
            for column in 1..=self.columns {
                match self.occupant(Square::new(row, column)) {
                    Some(piece) => {
                        if empty_squares != 0 {
                            result.push_str(&empty_squares.to_string());
                            empty_squares = 0;
                        }
                        result.push_str(&piece.to_string());
                    },
                    None => empty_squares += 1,
                }
            }
            if empty_squares != 0 {
                result.push_str(&empty_squares.to_string());
            }
            if row != 1 {
                const RANK_SEPARATOR: char = '/';
                result.push(RANK_SEPARATOR);
            }
        }
        result
    }
}

const MAX_RANK_LENGTH: usize = 1024;

fn parse_rank(rank: &str) -> anyhow::Result<Vec<Option<Piece>>> {
    let mut squares = Vec::new();
    let mut chars = rank.chars().peekable();
    while let Some(symbol) = chars.next() {
        if let Some(digit) = symbol.to_digit(10) {
            if digit == 0 {
                bail!("increment can not start with 0");
            }
            let mut increment = digit;
            while let Some(digit) = chars.peek().and_then(|next| next.to_digit(10)) {
                increment = increment
                    .checked_mul(10)
                    .and_then(|increment| increment.checked_add(digit))
                    .with_context(|| format!("increment is too large in {rank}"))?;
                let _ = chars.next();
            }
            let increment = usize::try_from(increment)?;
            if squares.len() + increment > MAX_RANK_LENGTH {
                bail!("rank should not be longer than {MAX_RANK_LENGTH} squares: {rank}");
            }
            squares.resize(squares.len() + increment, None);
            continue;
        }
        squares.push(Some(Piece::try_from(symbol)?));
    }
    Ok(squares)
}

impl Board for Mailbox {
    fn dimensions(&self) -> (i32, i32) {
        (self.rows, self.columns)
    }

    fn occupant(&self, square: Square) -> Option<Piece> {
        self.index(square).and_then(|index| self.squares[index])
    }
}

impl fmt::Display for Mailbox {
    /// Dumps the board in a simple format ('.' for empty square, FEN
    /// algebraic symbol for piece), the last row first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (1..=self.rows).rev() {
            for column in 1..=self.columns {
                match self.occupant(Square::new(row, column)) {
                    Some(piece) => write!(f, "{piece}"),
                    None => f.write_char('.'),
                }?;
                if column != self.columns {
                    f.write_str(SQUARE_SEPARATOR)?;
                }
            }
            if row != 1 {
                f.write_str(LINE_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{self}")?;
        writeln!(f, "Dimensions: {}x{}", self.rows, self.columns)?;
        writeln!(f, "FEN: {}", self.fen())?;
        Ok(())
    }
}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";
