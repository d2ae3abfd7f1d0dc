#![no_main]
use itertools::Itertools;
use libfuzzer_sys::fuzz_target;
use movecheck::chess::board::{Board, Mailbox};
use movecheck::chess::core::Square;
use movecheck::chess::rules;

/// Reads squares from the raw bytes: each one is a pair of signed rows and
/// columns, so that coordinates far outside of the board are covered too.
fn squares(data: &[u8]) -> Vec<Square> {
    data.chunks_exact(8)
        .map(|chunk| {
            let (row, column) = chunk.split_at(4);
            Square::new(
                i32::from_le_bytes(row.try_into().unwrap()),
                i32::from_le_bytes(column.try_into().unwrap()),
            )
        })
        .collect()
}

fuzz_target!(|data: &[u8]| {
    let board = Mailbox::standard();
    for (from, to) in squares(data).into_iter().tuples() {
        let legal = rules::is_legal(from, to, &board);
        if legal {
            assert!(rules::destinations(from, &board).contains(&to));
        }
        if board.occupant(from).is_none() {
            assert!(!legal);
        }
    }
});
