//! A single turn of the active side as a small state machine:
//!
//! ```text
//! AwaitingMove --simple move--> TurnComplete
//! AwaitingMove --capture--> AwaitingContinuation --capture--> AwaitingContinuation ...
//! AwaitingContinuation --no further capture--> TurnComplete
//! ```
//!
//! [`Turn`] only decides; [`play_turn`] connects it to a [`BoardSource`] and a
//! [`MoveExecutor`] and re-reads the board before every decision.

use std::fmt;

use anyhow::bail;
use itertools::Itertools;
use log::{debug, info};

use crate::checkers::board::Board;
use crate::checkers::core::{Move, Square};
use crate::checkers::movegen::centre_distance;
use crate::source::{BoardSource, MoveExecutor};

/// The opponent never has more pieces than this, so no capture chain can be
/// longer.
pub const MAX_CHAIN: usize = 12;

/// Where the turn is.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Initial phase: any generated move can be played.
    AwaitingMove,
    /// The piece on the square has just captured and has to keep capturing
    /// if it can.
    AwaitingContinuation(Square),
    /// Nothing else to play this turn.
    TurnComplete,
}

/// How to pick a move out of the generated list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Policy {
    /// The first generated move. This is always a capture when one exists.
    First,
    /// A capture if there is one, otherwise the simple move landing closest to
    /// the centre of the board (the earliest one on ties). Developing pieces
    /// towards the centre provokes the opponent into exchanges.
    #[default]
    Central,
}

impl Policy {
    /// Returns `None` only for an empty list.
    #[must_use]
    pub fn select(self, moves: &[Move]) -> Option<Move> {
        match self {
            Self::First => moves.first().copied(),
            Self::Central => moves.iter().find(|m| m.is_capture()).copied().or_else(|| {
                moves
                    .iter()
                    .position_min_by_key(|m| centre_distance(m.to()))
                    .map(|index| moves[index])
            }),
        }
    }
}

impl TryFrom<&str> for Policy {
    type Error = anyhow::Error;

    fn try_from(policy: &str) -> anyhow::Result<Self> {
        match policy {
            "first" => Ok(Self::First),
            "central" => Ok(Self::Central),
            _ => bail!("policy should be 'first' or 'central', got '{policy}'"),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::First => "first",
            Self::Central => "central",
        })
    }
}

/// Tracks the phase of a turn and the moves played in it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    phase: Phase,
    played: Vec<Move>,
}

impl Turn {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: Phase::AwaitingMove,
            played: Vec::new(),
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn played(&self) -> &[Move] {
        &self.played
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn into_played(self) -> Vec<Move> {
        self.played
    }

    /// Decides the next move on a fresh `board`. Returns `None` and completes
    /// the turn when there is nothing (left) to play.
    ///
    /// Outside of a capture chain the `policy` picks from all generated moves.
    /// Within a chain the piece that just captured has to continue from its
    /// landing square and the policy is not consulted.
    pub fn next(&mut self, board: &Board, policy: Policy) -> Option<Move> {
        let candidate = match self.phase {
            Phase::AwaitingMove => policy.select(&board.generate_moves()),
            Phase::AwaitingContinuation(landing) => board.next_capture_from(landing),
            Phase::TurnComplete => None,
        };
        if candidate.is_none() {
            self.phase = Phase::TurnComplete;
        }
        candidate
    }

    /// Records a move that was played. A capture keeps the turn going.
    pub fn record(&mut self, played: Move) {
        debug_assert_ne!(self.phase, Phase::TurnComplete);
        self.phase = if played.is_capture() {
            Phase::AwaitingContinuation(played.to())
        } else {
            Phase::TurnComplete
        };
        self.played.push(played);
    }
}

impl Default for Turn {
    fn default() -> Self {
        Self::new()
    }
}

/// Plays one turn of the active side: reads the board, lets the `policy` pick
/// a move, executes it and keeps capturing with the same piece for as long as
/// the chain continues. Returns the moves played, which is empty if the active
/// side had no legal moves.
///
/// # Errors
///
/// Errors of the source and executor are propagated. A chain longer than
/// [`MAX_CHAIN`] means the environment does not remove captured pieces and is
/// reported as an error instead of looping forever.
pub fn play_turn(
    source: &mut impl BoardSource,
    executor: &mut impl MoveExecutor,
    policy: Policy,
) -> anyhow::Result<Vec<Move>> {
    let mut turn = Turn::new();
    loop {
        let board = source.read_board()?;
        let Some(next_move) = turn.next(&board, policy) else {
            break;
        };
        if turn.played().len() >= MAX_CHAIN {
            bail!(
                "capture chain is longer than {MAX_CHAIN}: {}",
                turn.played().iter().join(" ")
            );
        }
        debug!("playing {next_move} ({:?})", turn.phase());
        executor.execute(&next_move)?;
        turn.record(next_move);
    }
    info!(
        "turn complete: {}",
        if turn.played().is_empty() {
            "no legal moves".to_owned()
        } else {
            turn.played().iter().join(" ")
        }
    );
    Ok(turn.into_played())
}
