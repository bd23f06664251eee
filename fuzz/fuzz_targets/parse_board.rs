#![no_main]
use checkers::checkers::Board;
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(board) = Board::try_from(input) else {
        return;
    };
    // Printing the board back gives the canonical notation.
    let notation = board.to_string();
    assert_eq!(Board::from_notation(&notation).unwrap(), board);
    assert_eq!(board.fingerprint().as_str(), notation);
});
