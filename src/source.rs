//! Capabilities the rules engine is driven through: a [`BoardSource`] that
//! reads a fresh [`Board`] from the outside world and a [`MoveExecutor`] that
//! carries out a chosen [`Move`] there.
//!
//! The engine never calls either of them: the caller (e.g.
//! [`crate::turn::play_turn`]) reads a board, asks the engine for moves,
//! executes one and reads again. All waiting for the outside world to settle
//! lives here, in [`PollingSource`].

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::bail;
use itertools::Itertools;
use log::{debug, info, warn};

use crate::checkers::board::{Board, BoardError, Fingerprint};
use crate::checkers::classify::MarkerSet;
use crate::checkers::core::{Move, Occupant, Square, BOARD_SIZE};

/// Produces the current state of the board.
pub trait BoardSource {
    /// Reads all 64 squares.
    ///
    /// # Errors
    ///
    /// [`BoardError::NotReady`] if the board did not become available within
    /// the source's own wait policy, [`BoardError::Malformed`] if the squares
    /// do not form a board. Other errors come from the underlying environment.
    fn read_board(&mut self) -> anyhow::Result<Board>;

    /// Reads the board and summarizes it, e.g. to compare the layout before
    /// and after a restart.
    ///
    /// # Errors
    ///
    /// Same as [`BoardSource::read_board`].
    fn fingerprint(&mut self) -> anyhow::Result<Fingerprint> {
        Ok(self.read_board()?.fingerprint())
    }
}

/// Applies a move in the outside world.
pub trait MoveExecutor {
    /// Performs the move. The next [`BoardSource::read_board`] is expected to
    /// reflect it.
    ///
    /// # Errors
    ///
    /// If the environment refuses or fails to perform the move.
    fn execute(&mut self, next_move: &Move) -> anyhow::Result<()>;
}

/// A square as it is rendered: its position and the opaque marker attached to
/// it (usually an image reference).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedSquare {
    square: Square,
    marker: String,
}

impl RenderedSquare {
    #[allow(missing_docs)]
    #[must_use]
    pub fn new(square: Square, marker: impl Into<String>) -> Self {
        Self {
            square,
            marker: marker.into(),
        }
    }

    /// Creates a square out of a board element named `spaceRC` where `R` and
    /// `C` are the row and column digits. Elements with other names are not
    /// squares and yield `None`.
    ///
    /// ```
    /// use checkers::source::RenderedSquare;
    ///
    /// let square = RenderedSquare::from_element("space25", "you1.gif").unwrap();
    /// assert_eq!(square.square().index(), 21);
    /// assert!(RenderedSquare::from_element("restart", "").is_none());
    /// assert!(RenderedSquare::from_element("space9", "").is_none());
    /// ```
    #[must_use]
    pub fn from_element(name: &str, marker: &str) -> Option<Self> {
        let (row, col) = name.strip_prefix("space")?.chars().collect_tuple()?;
        let (row, col) = (row.to_digit(10)?, col.to_digit(10)?);
        let square = Square::new(u8::try_from(row).ok()?, u8::try_from(col).ok()?).ok()?;
        Some(Self::new(square, marker))
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn square(&self) -> Square {
        self.square
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker
    }
}

/// Raw view of the rendered board. It may be incomplete while the board is
/// still being drawn.
pub trait SquareFeed {
    /// Returns the squares rendered so far, in any order.
    ///
    /// # Errors
    ///
    /// If the environment can not be queried at all.
    fn snapshot(&mut self) -> anyhow::Result<Vec<RenderedSquare>>;
}

/// How long [`PollingSource`] waits for a complete board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadPolicy {
    /// Total time budget of a single read. [`Duration::MAX`] waits until the
    /// board is complete.
    pub timeout: Duration,
    /// Pause between two snapshots.
    pub interval: Duration,
}

impl ReadPolicy {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }

    /// Takes a single snapshot and never waits.
    #[must_use]
    pub const fn immediate() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }
}

impl Default for ReadPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(5), Duration::from_millis(100))
    }
}

/// [`BoardSource`] over a [`SquareFeed`] that keeps polling until all 64
/// squares are rendered or the [`ReadPolicy`] budget runs out. It never
/// returns a partial board.
pub struct PollingSource<F> {
    feed: F,
    markers: MarkerSet,
    policy: ReadPolicy,
}

impl<F: SquareFeed> PollingSource<F> {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(feed: F, markers: MarkerSet, policy: ReadPolicy) -> Self {
        Self {
            feed,
            markers,
            policy,
        }
    }

    /// Gives access to the feed, e.g. to drive the environment directly.
    pub fn feed_mut(&mut self) -> &mut F {
        &mut self.feed
    }

    fn wait_for_squares(&mut self) -> anyhow::Result<Vec<RenderedSquare>> {
        // A timeout too large to represent means waiting for as long as it
        // takes.
        let deadline = Instant::now().checked_add(self.policy.timeout);
        let mut attempts = 1;
        let mut squares = self.feed.snapshot()?;
        let expired = || deadline.is_some_and(|deadline| Instant::now() >= deadline);
        while squares.len() < BOARD_SIZE && !expired() {
            debug!(
                "board not rendered yet: {} squares, attempt {attempts}",
                squares.len()
            );
            thread::sleep(self.policy.interval);
            squares = self.feed.snapshot()?;
            attempts += 1;
        }
        if squares.len() < BOARD_SIZE {
            warn!(
                "giving up on the board after {attempts} attempts: {} squares",
                squares.len()
            );
            return Err(BoardError::NotReady {
                squares: squares.len(),
                attempts,
            }
            .into());
        }
        Ok(squares)
    }
}

impl<F: SquareFeed> BoardSource for PollingSource<F> {
    fn read_board(&mut self) -> anyhow::Result<Board> {
        let mut squares = self.wait_for_squares()?;
        squares.sort_by_key(RenderedSquare::square);
        squares.dedup_by_key(|rendered| rendered.square);
        if squares.len() != BOARD_SIZE {
            return Err(BoardError::Malformed {
                squares: squares.len(),
            }
            .into());
        }
        Ok(Board::from_markers(
            squares.iter().map(RenderedSquare::marker),
            &self.markers,
        )?)
    }
}

/// In-memory table implementing both capabilities. Only the active side ever
/// moves: the opponent stays where it is unless the table is reset.
///
/// Clones share the same table, so one clone can be read from while the other
/// executes moves.
#[derive(Clone, Debug)]
pub struct Sandbox {
    table: Rc<RefCell<Board>>,
}

impl Sandbox {
    #[allow(missing_docs)]
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self {
            table: Rc::new(RefCell::new(board)),
        }
    }

    /// Current state of the table.
    #[must_use]
    pub fn board(&self) -> Board {
        *self.table.borrow()
    }

    /// Puts the pieces back into the opening layout.
    pub fn restart(&mut self) {
        info!("restarting the table");
        let _ = self.table.replace(Board::starting());
    }
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new(Board::starting())
    }
}

impl BoardSource for Sandbox {
    fn read_board(&mut self) -> anyhow::Result<Board> {
        Ok(self.board())
    }
}

impl MoveExecutor for Sandbox {
    /// Moves the piece, removes the jumped one and crowns a regular piece that
    /// reaches the far edge.
    fn execute(&mut self, next_move: &Move) -> anyhow::Result<()> {
        if !next_move.is_diagonal() {
            bail!("{next_move}: not a diagonal move");
        }
        let board = self.board();
        let piece = board.at(next_move.from());
        if !piece.is_active() {
            bail!("{next_move}: no active piece on {}", next_move.from());
        }
        if !board.at(next_move.to()).is_empty() {
            bail!("{next_move}: {} is not empty", next_move.to());
        }
        let promotion_row = board.forward_direction().promotion_row();
        let mut occupants = board.occupants();
        if let Some(captured) = next_move.captured() {
            if !board.at(captured).is_opponent() {
                bail!("{next_move}: nothing to capture on {captured}");
            }
            occupants[captured.index()] = Occupant::Empty;
        }
        occupants[next_move.from().index()] = Occupant::Empty;
        occupants[next_move.to().index()] = if next_move.to().row() == promotion_row {
            piece.crowned()
        } else {
            piece
        };
        let board = Board::from(occupants);
        let _ = self.table.replace(board);
        debug!("executed {next_move}: {board}");
        Ok(())
    }
}
