//! Movement rules of each piece kind, built on top of the
//! [`crate::chess::geometry`] predicates.
//!
//! A rule answers a single question: can the piece standing on `from` move to
//! `to` on this board? It checks geometry and occupancy only, it does not
//! care whose turn it is or whether the king is left in check.
//!
//! ```
//! use movecheck::chess::board::Mailbox;
//! use movecheck::chess::core::{PieceKind, Square};
//! use movecheck::chess::rules;
//!
//! let board = Mailbox::standard();
//! let e2 = Square::try_from("e2").unwrap();
//! let knight = rules::lookup(PieceKind::Knight);
//! assert!(knight(Square::try_from("g1").unwrap(), Square::try_from("f3").unwrap(), &board));
//! assert!(rules::is_legal(e2, Square::try_from("e4").unwrap(), &board));
//! assert!(!rules::is_legal(e2, Square::try_from("e5").unwrap(), &board));
//! ```

use itertools::Itertools;

use crate::chess::board::Board;
use crate::chess::core::{PieceKind, Square};
use crate::chess::geometry::{axis_aligned, diagonal, general, Delta};

/// Signature shared by the piece rules and the geometry predicates.
pub type Predicate = fn(Square, Square, &dyn Board) -> bool;

/// Returns the movement rule of given piece kind.
#[must_use]
pub fn lookup(kind: PieceKind) -> Predicate {
    match kind {
        PieceKind::King => king,
        PieceKind::Queen => queen,
        PieceKind::Rook => rook,
        PieceKind::Bishop => bishop,
        PieceKind::Knight => knight,
        PieceKind::Pawn => pawn,
    }
}

/// Applies the rule of the piece standing on `from`. Returns `false` if there
/// is no piece there.
#[must_use]
pub fn is_legal(from: Square, to: Square, board: &dyn Board) -> bool {
    board
        .occupant(from)
        .is_some_and(|piece| lookup(piece.kind())(from, to, board))
}

/// Lists all squares the piece standing on `from` can move to, row by row.
#[must_use]
pub fn destinations(from: Square, board: &dyn Board) -> Vec<Square> {
    let Some(piece) = board.occupant(from) else {
        return Vec::new();
    };
    let rule = lookup(piece.kind());
    let (rows, columns) = board.dimensions();
    (1..=rows)
        .cartesian_product(1..=columns)
        .map(|(row, column)| Square::new(row, column))
        .filter(|&to| rule(from, to, board))
        .collect()
}

/// Rooks move along rows and columns and can not jump over pieces.
pub fn rook(from: Square, to: Square, board: &dyn Board) -> bool {
    general(from, to, board) && axis_aligned(from, to, board)
}

/// Bishops move diagonally and can not jump over pieces.
pub fn bishop(from: Square, to: Square, board: &dyn Board) -> bool {
    general(from, to, board) && diagonal(from, to, board)
}

/// Queens move as both rooks and bishops.
pub fn queen(from: Square, to: Square, board: &dyn Board) -> bool {
    general(from, to, board) && (axis_aligned(from, to, board) || diagonal(from, to, board))
}

/// Knights jump to the squares at distance √5: two squares along one axis
/// and one along the other.
pub fn knight(from: Square, to: Square, board: &dyn Board) -> bool {
    if !general(from, to, board) {
        return false;
    }
    let delta = Delta::between(from, to);
    // The only integer solutions of rows² + columns² = 5.
    matches!((delta.rows.abs(), delta.columns.abs()), (1, 2) | (2, 1))
}

/// Kings move to any adjacent square. Moving two columns sideways is
/// castling, which has its own requirements.
pub fn king(from: Square, to: Square, board: &dyn Board) -> bool {
    if !general(from, to, board) {
        return false;
    }
    let delta = Delta::between(from, to);
    if delta.rows == 0 && delta.columns.abs() == 2 {
        return castling(from, to, board);
    }
    delta.length() <= 1 && (axis_aligned(from, to, board) || diagonal(from, to, board))
}

/// The king goes two squares towards the rook standing on the edge of its
/// row. Neither of them may have moved before, they have to be of the same
/// color and there must be nothing between them.
fn castling(from: Square, to: Square, board: &dyn Board) -> bool {
    let Some(king) = board.occupant(from) else {
        return false;
    };
    let rook_column = if to.column() < from.column() {
        1
    } else {
        board.columns()
    };
    let Some(rook) = board.occupant(Square::new(from.row(), rook_column)) else {
        return false;
    };
    if rook.kind() != PieceKind::Rook
        || king.has_moved()
        || rook.has_moved()
        || king.color() != rook.color()
    {
        return false;
    }
    let (low, high) = if rook_column < from.column() {
        (rook_column, from.column())
    } else {
        (from.column(), rook_column)
    };
    let nothing_between =
        (low + 1..high).all(|column| board.occupant(Square::new(from.row(), column)).is_none());
    nothing_between && axis_aligned(from, to, board)
}

/// Pawns advance one square towards the opponent (see
/// [`crate::chess::core::Color::pawn_direction`]) onto an empty square, or
/// two squares if they have not moved yet and both squares are empty. They
/// capture one square diagonally forward. There is no en passant.
pub fn pawn(from: Square, to: Square, board: &dyn Board) -> bool {
    if !general(from, to, board) {
        return false;
    }
    let Some(pawn) = board.occupant(from) else {
        return false;
    };
    let delta = Delta::between(from, to);
    if delta.rows.signum() != i64::from(pawn.color().pawn_direction()) {
        return false;
    }
    if delta.columns.abs() > 1 {
        return false;
    }
    match delta.rows.abs() {
        1 => {},
        2 if !pawn.has_moved() && delta.columns == 0 => {},
        _ => return false,
    }
    let occupant = board.occupant(to);
    if delta.columns == 0 {
        occupant.is_none() && axis_aligned(from, to, board)
    } else {
        occupant.is_some_and(|piece| piece.color() != pawn.color()) && diagonal(from, to, board)
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;
    use crate::chess::board::Mailbox;
    use crate::chess::core::{Color, Piece};

    fn square(input: &str) -> Square {
        Square::try_from(input).unwrap()
    }

    fn setup(fen: &str) -> Mailbox {
        Mailbox::from_fen(fen).unwrap()
    }

    fn targets(board: &Mailbox, from: &str) -> Vec<String> {
        destinations(square(from), board)
            .iter()
            .map(Square::to_string)
            .sorted()
            .collect()
    }

    fn sorted(squares: &[&str]) -> Vec<String> {
        squares.iter().map(|s| (*s).to_string()).sorted().collect()
    }

    #[test]
    fn lookup_is_total() {
        let board = setup("8/8/8/8/3Q4/8/8/8");
        // Every kind has a rule: the ones allowing a single step forward accept
        // it.
        let legal: Vec<PieceKind> = PieceKind::iter()
            .filter(|&kind| lookup(kind)(square("d4"), square("d5"), &board))
            .collect();
        assert_eq!(
            legal,
            vec![PieceKind::King, PieceKind::Queen, PieceKind::Rook, PieceKind::Pawn]
        );
    }

    #[test]
    fn knight_moves() {
        let mut board = Mailbox::new(8, 8);
        board.put(square("d4"), Piece::new(Color::Black, PieceKind::Knight));
        assert_eq!(
            targets(&board, "d4"),
            sorted(&["b5", "b3", "c6", "e6", "f5", "f3", "c2", "e2"])
        );
        for to in ["h4", "d8", "h8", "a1", "d4", "e5", "d6"] {
            assert!(!knight(square("d4"), square(to), &board), "{to}");
        }
    }

    #[test]
    fn knight_jumps() {
        let board = setup("8/8/8/2ppp3/2pNp3/2pPp3/8/8");
        assert_eq!(
            targets(&board, "d4"),
            sorted(&["b5", "b3", "c6", "e6", "f5", "f3", "c2", "e2"])
        );
        let board = setup("8/8/4P3/8/3N4/8/8/8");
        assert!(!knight(square("d4"), square("e6"), &board));
    }

    #[test]
    fn knight_on_the_edge() {
        let board = setup("8/8/8/8/8/8/8/N7");
        assert_eq!(targets(&board, "a1"), sorted(&["b3", "c2"]));
    }

    #[test]
    fn rook_moves() {
        let board = setup("8/8/3p4/8/1P1R2p1/8/8/8");
        assert_eq!(
            targets(&board, "d4"),
            sorted(&["c4", "e4", "f4", "g4", "d5", "d6", "d3", "d2", "d1"])
        );
    }

    #[test]
    fn bishop_moves() {
        let board = setup("8/6p1/8/8/3b4/8/1B6/8");
        assert_eq!(
            targets(&board, "d4"),
            sorted(&["c5", "b6", "a7", "e5", "f6", "c3", "b2", "e3", "f2", "g1"])
        );
    }

    #[test]
    fn queen_moves() {
        let board = setup("8/8/8/2P5/1pQ5/2k5/8/8");
        assert_eq!(
            targets(&board, "c4"),
            sorted(&[
                "b4", "d4", "e4", "f4", "g4", "h4", "c3", "b5", "a6", "d5", "e6", "f7", "g8",
                "b3", "a2", "d3", "e2", "f1",
            ])
        );
    }

    #[test]
    fn king_moves() {
        let board = setup("8/8/8/8/8/8/3Pp3/3K4 w - - 0 1");
        assert_eq!(targets(&board, "d1"), sorted(&["c1", "e1", "c2", "e2"]));
        assert!(!king(square("d1"), square("d3"), &board));
        assert!(!king(square("d1"), square("f1"), &board));
        assert!(!king(square("d1"), square("b1"), &board));
    }

    #[test]
    fn castling_both_sides() {
        let board = setup("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert_eq!(
            targets(&board, "e1"),
            sorted(&["d1", "f1", "d2", "e2", "f2", "c1", "g1"])
        );
        assert_eq!(
            targets(&board, "e8"),
            sorted(&["d8", "f8", "d7", "e7", "f7", "c8", "g8"])
        );
    }

    #[test]
    fn castling_requirements() {
        // Rights are gone: the pieces have moved.
        let moved = setup("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1");
        assert!(king(square("e1"), square("g1"), &moved));
        assert!(!king(square("e1"), square("c1"), &moved));
        assert!(king(square("e8"), square("c8"), &moved));
        assert!(!king(square("e8"), square("g8"), &moved));
        // Something stands between the king and the rook.
        let blocked = setup("rn2k1nr/8/8/8/8/8/8/R2QKB1R w KQkq - 0 1");
        assert!(!king(square("e1"), square("c1"), &blocked));
        assert!(!king(square("e1"), square("g1"), &blocked));
        assert!(!king(square("e8"), square("c8"), &blocked));
        assert!(!king(square("e8"), square("g8"), &blocked));
        // The piece in the corner is not a rook or is not ours.
        let wrong = setup("r3k2r/8/8/8/8/8/8/N3K2r w KQkq - 0 1");
        assert!(!king(square("e1"), square("c1"), &wrong));
        assert!(!king(square("e1"), square("g1"), &wrong));
        // No rook at all.
        let missing = setup("4k3/8/8/8/8/8/8/4K3 w KQkq - 0 1");
        assert!(!king(square("e1"), square("c1"), &missing));
        assert!(!king(square("e1"), square("g1"), &missing));
    }

    #[test]
    fn castling_on_wide_board() {
        let mut board = Mailbox::from_fen("10/R4K3R").unwrap();
        assert!(king(square("f1"), square("h1"), &board));
        assert!(king(square("f1"), square("d1"), &board));
        let _ = board.move_piece(square("j1"), square("j2")).unwrap();
        assert!(!king(square("f1"), square("h1"), &board));
        // Coming back does not make the rook unmoved.
        let _ = board.move_piece(square("j2"), square("j1")).unwrap();
        assert!(!king(square("f1"), square("h1"), &board));
        assert!(king(square("f1"), square("d1"), &board));
    }

    #[test]
    fn pawn_advances() {
        let board = setup("8/8/8/8/8/8/4P3/8");
        assert_eq!(targets(&board, "e2"), sorted(&["e3", "e4"]));
        let board = setup("8/4p3/8/8/8/8/8/8");
        assert_eq!(targets(&board, "e7"), sorted(&["e6", "e5"]));
        let board = setup("8/8/8/8/8/4P3/8/8");
        assert_eq!(targets(&board, "e3"), sorted(&["e4"]));
    }

    #[test]
    fn pawn_blocked() {
        let board = setup("8/8/8/8/4n3/8/4P3/8");
        assert_eq!(targets(&board, "e2"), sorted(&["e3"]));
        let board = setup("8/8/8/8/8/4n3/4P3/8");
        assert_eq!(targets(&board, "e2"), Vec::<String>::new());
    }

    #[test]
    fn pawn_captures() {
        let board = setup("8/8/8/8/8/3p1R2/4P3/8");
        assert_eq!(targets(&board, "e2"), sorted(&["d3", "e3", "e4"]));
        let board = setup("8/3p4/2P1P3/8/8/8/8/8");
        assert_eq!(targets(&board, "d7"), sorted(&["c6", "e6", "d6", "d5"]));
        // Two squares diagonally is never a capture.
        let board = setup("8/8/8/8/2p5/8/4P3/8");
        assert!(!pawn(square("e2"), square("c4"), &board));
    }

    #[test]
    fn pawn_never_moves_back_or_sideways() {
        let board = setup("8/8/8/3p1p2/4P3/3p1p2/8/8 w - - 0 1");
        for to in ["d3", "f3", "e3", "d4", "f4", "e2"] {
            assert!(!pawn(square("e4"), square(to), &board), "{to}");
        }
    }

    #[test]
    fn is_legal_dispatches_on_piece() {
        let board = Mailbox::standard();
        assert!(is_legal(square("b1"), square("c3"), &board));
        assert!(!is_legal(square("b1"), square("b3"), &board));
        assert!(!is_legal(square("e4"), square("e5"), &board));
        assert!(destinations(square("e4"), &board).is_empty());
        assert!(destinations(square("a1"), &board).is_empty());
    }
}
