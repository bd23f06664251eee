//! Implementation of the checkers board, its rules and specifics.

pub mod board;
pub mod classify;
pub mod core;
pub mod movegen;

pub use board::{Board, BoardError, Fingerprint};
pub use classify::MarkerSet;
pub use self::core::{Direction, Move, Occupant, Square};
