//! Move generation for the active side and capture chain continuation.
//!
//! Captures are mandatory: the generated list puts every capture ahead of every
//! simple move, and the caller is expected to take a capture whenever the list
//! starts with one. After a capture, the same piece keeps jumping while
//! [`next_capture_from`] finds a continuation.

use arrayvec::ArrayVec;
use itertools::Itertools;

use crate::checkers::board::Board;
use crate::checkers::core::{Diagonal, Direction, Move, Occupant, Square, BOARD_WIDTH};

/// Infers which way regular active pieces advance from the median row they
/// occupy: pieces that sit in the bottom half move up.
///
/// Kings are ignored since they move both ways. A board without regular
/// active pieces defaults to [`Direction::Up`].
#[must_use]
pub fn forward_direction(board: &Board) -> Direction {
    let rows = board
        .iter()
        .filter(|&(_, occupant)| occupant == Occupant::Active)
        .map(|(square, _)| square.row())
        .sorted()
        .collect_vec();
    match rows.get(rows.len() / 2) {
        Some(&median) if median < BOARD_WIDTH / 2 => Direction::Down,
        _ => Direction::Up,
    }
}

/// Calculates the list of legal moves for the active side ([`Occupant::Active`]
/// and [`Occupant::ActiveKing`]): captures first, then simple moves, each
/// group in the order of generation (square index, then diagonal).
///
/// Kings use all four diagonals, regular pieces only the two pointing in the
/// [`forward_direction`].
///
/// ```
/// use checkers::checkers::board::Board;
/// use checkers::checkers::movegen::generate_moves;
///
/// let board = Board::try_from("8/8/3a4/4b3/8/8/8/8").unwrap();
/// let moves = generate_moves(&board);
/// assert_eq!(moves[0].to_string(), "19x37");
/// assert_eq!(moves[1].to_string(), "19-26");
/// ```
#[must_use]
pub fn generate_moves(board: &Board) -> Vec<Move> {
    let forward = forward_direction(board);
    let mut moves = Vec::new();
    for (from, occupant) in board.iter() {
        if !occupant.is_active() {
            continue;
        }
        let diagonals: ArrayVec<Diagonal, 4> = if occupant.is_king() {
            Diagonal::ALL.into_iter().collect()
        } else {
            forward.diagonals().into_iter().collect()
        };
        for diagonal in diagonals {
            let Some(adjacent) = from.offset(diagonal, 1) else {
                continue;
            };
            if board.at(adjacent).is_empty() {
                moves.push(Move::step(from, adjacent));
            }
            if let Some(landing) = jump_landing(board, from, diagonal) {
                moves.push(Move::jump(from, landing));
            }
        }
    }
    // Stable: the order within captures and within simple moves is kept.
    moves.sort_by_key(|candidate| !candidate.is_capture());
    moves
}

/// Looks for a continuation of a capture chain from the square the piece
/// landed on. All four diagonals are checked regardless of whether the piece
/// is a king and the first capture found is returned. `None` means the chain
/// is complete.
#[must_use]
pub fn next_capture_from(board: &Board, landing: Square) -> Option<Move> {
    Diagonal::ALL
        .into_iter()
        .find_map(|diagonal| jump_landing(board, landing, diagonal))
        .map(|to| Move::jump(landing, to))
}

/// Doubled Manhattan distance from the square to the centre of the board.
/// Doubling keeps it integral: the centre lies between four squares.
#[must_use]
pub fn centre_distance(square: Square) -> u8 {
    let edge = BOARD_WIDTH - 1;
    (2 * square.row()).abs_diff(edge) + (2 * square.col()).abs_diff(edge)
}

/// Landing square of a capture along the diagonal, if there is one.
fn jump_landing(board: &Board, from: Square, diagonal: Diagonal) -> Option<Square> {
    let jumped = from.offset(diagonal, 1)?;
    let landing = from.offset(diagonal, 2)?;
    (board.at(jumped).is_opponent() && board.at(landing).is_empty()).then_some(landing)
}

impl Board {
    /// See [`generate_moves`].
    #[must_use]
    pub fn generate_moves(&self) -> Vec<Move> {
        generate_moves(self)
    }

    /// See [`next_capture_from`].
    #[must_use]
    pub fn next_capture_from(&self, landing: Square) -> Option<Move> {
        next_capture_from(self, landing)
    }

    /// See [`forward_direction`].
    #[must_use]
    pub fn forward_direction(&self) -> Direction {
        forward_direction(self)
    }
}
