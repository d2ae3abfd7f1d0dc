//! In positions where no king is in check and no piece is pinned, every move a
//! piece can make is a legal chess move. The destinations then have to match
//! the legal moves of a complete chess move generator.

use itertools::Itertools;
use movecheck::chess::board::{Board, Mailbox};
use movecheck::chess::core::{Color, Square};
use movecheck::chess::rules;
use pretty_assertions::assert_eq;
use shakmaty::{CastlingMode, Chess, Position};

fn get_moves(fen: &str, color: Color) -> Vec<String> {
    let board = Mailbox::from_fen(fen).unwrap();
    let (rows, columns) = board.dimensions();
    (1..=rows)
        .cartesian_product(1..=columns)
        .map(|(row, column)| Square::new(row, column))
        .filter(|&from| board.occupant(from).is_some_and(|piece| piece.color() == color))
        .flat_map(|from| {
            rules::destinations(from, &board)
                .into_iter()
                .map(move |to| format!("{from}{to}"))
        })
        .sorted()
        .collect()
}

fn reference_moves(fen: &str) -> Vec<String> {
    let setup: shakmaty::fen::Fen = fen.parse().unwrap();
    let position: Chess = setup.into_position(CastlingMode::Standard).unwrap();
    position
        .legal_moves()
        .iter()
        .map(|m| m.to_uci(CastlingMode::Standard).to_string())
        .sorted()
        .collect()
}

fn check(fen: &str, color: Color) {
    let moves = get_moves(fen, color);
    assert!(!moves.is_empty());
    assert_eq!(moves, reference_moves(fen), "{fen}");
}

#[test]
fn starting_position() {
    let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    assert_eq!(get_moves(fen, Color::White).len(), 20);
    check(fen, Color::White);
    check(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1",
        Color::Black,
    );
}

#[test]
fn sicilian() {
    check(
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2",
        Color::Black,
    );
}

#[test]
fn short_castle_available() {
    let fen = "r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";
    assert!(get_moves(fen, Color::White).contains(&"e1g1".to_string()));
    check(fen, Color::White);
}

#[test]
fn both_castles_available() {
    let placement = "r3k2r/pppq1ppp/2np1n2/2b1p1B1/2B1P1b1/2NP1N2/PPPQ1PPP/R3K2R";
    let white = format!("{placement} w KQkq - 0 8");
    let black = format!("{placement} b KQkq - 0 8");
    for castle in ["e1g1", "e1c1"] {
        assert!(get_moves(&white, Color::White).contains(&castle.to_string()));
    }
    for castle in ["e8g8", "e8c8"] {
        assert!(get_moves(&black, Color::Black).contains(&castle.to_string()));
    }
    check(&white, Color::White);
    check(&black, Color::Black);
}

#[test]
fn lost_castle_rights() {
    // Kings and rooks without castle rights are treated as moved.
    let fen = "r3k2r/pppq1ppp/2np1n2/2b1p1B1/2B1P1b1/2NP1N2/PPPQ1PPP/R3K2R w Kq - 0 8";
    let moves = get_moves(fen, Color::White);
    assert!(moves.contains(&"e1g1".to_string()));
    assert!(!moves.contains(&"e1c1".to_string()));
    check(fen, Color::White);
}
