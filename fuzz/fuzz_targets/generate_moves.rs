#![no_main]
use checkers::checkers::core::{Occupant, Square};
use checkers::checkers::Board;
use itertools::Itertools;
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;

const OCCUPANTS: [Occupant; 6] = [
    Occupant::Empty,
    Occupant::Active,
    Occupant::Opponent,
    Occupant::ActiveKing,
    Occupant::OpponentKing,
    Occupant::Unknown,
];

fuzz_target!(|data: &[u8]| {
    if data.len() < 64 {
        return;
    }
    let board = Board::from_occupants(
        data[..64]
            .iter()
            .map(|byte| OCCUPANTS[usize::from(*byte) % OCCUPANTS.len()]),
    )
    .unwrap();
    let moves = board.generate_moves();
    assert_eq!(moves, board.generate_moves());
    let first_simple = moves.iter().position(|m| !m.is_capture()).unwrap_or(moves.len());
    assert!(moves[first_simple..].iter().all(|m| !m.is_capture()));
    for m in &moves {
        assert!(board.at(m.from()).is_active());
        assert_eq!(board.at(m.to()), Occupant::Empty);
        if let Some(captured) = m.captured() {
            assert!(board.at(captured).is_opponent());
        }
    }
    assert!(moves.iter().map(ToString::to_string).all_unique());
    for landing in Square::iter() {
        if let Some(capture) = board.next_capture_from(landing) {
            assert_eq!(capture.from(), landing);
            assert_eq!(board.at(capture.to()), Occupant::Empty);
            assert!(capture.captured().is_some_and(|square| board.at(square).is_opponent()));
        }
    }
});
