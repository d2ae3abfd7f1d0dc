#![no_main]
use libfuzzer_sys::fuzz_target;
use movecheck::chess::board::Mailbox;
use pretty_assertions::assert_eq;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(board) = Mailbox::from_fen(input) else {
        return;
    };
    let placement = board.fen();
    let reparsed = Mailbox::from_fen(&placement)
        .expect("exported placement should be accepted back");
    assert_eq!(reparsed.fen(), placement);
});
