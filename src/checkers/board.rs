//! Immutable snapshot of all 64 squares and its text notation.
//!
//! A [`Board`] is built fresh every time the state is read from the outside
//! world and never changes afterwards. The notation is close to the piece
//! placement part of [Forsyth-Edwards Notation]: rows go from top (row 0) to
//! bottom, separated by `/`; `a`/`A` are active pieces and kings, `b`/`B` are
//! opponent pieces and kings, `?` is an unrecognized square and digits are
//! runs of empty squares.
//!
//! [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation

use std::fmt::{self, Write};
use std::ops::Index;

use anyhow::bail;
use arrayvec::ArrayVec;

use crate::checkers::classify::MarkerSet;
use crate::checkers::core::{Occupant, Square, BOARD_SIZE, BOARD_WIDTH};

/// Conditions under which no [`Board`] can be produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// The squares do not add up to a full board.
    #[error("malformed board: expected 64 squares, got {squares}")]
    Malformed {
        /// Number of usable squares.
        squares: usize,
    },
    /// The board source gave up waiting for the board to be rendered.
    #[error("board not ready: found {squares} squares after {attempts} attempts")]
    NotReady {
        /// Number of squares seen in the last attempt.
        squares: usize,
        /// Number of times the source was polled.
        attempts: u32,
    },
}

/// Deterministic summary of a board: two fingerprints are equal iff the boards
/// have the same occupant on every square. Used to confirm that a restart
/// brought back the initial layout.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    #[allow(missing_docs)]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// All 64 occupants in row-major order.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    occupants: [Occupant; BOARD_SIZE],
}

impl Board {
    /// Creates a board without any pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            occupants: [Occupant::Empty; BOARD_SIZE],
        }
    }

    /// Creates the opening layout: the opponent occupies dark squares of the
    /// top three rows, the active side occupies dark squares of the bottom
    /// three rows.
    ///
    /// ```
    /// use checkers::checkers::board::Board;
    ///
    /// assert_eq!(
    ///     Board::starting().to_string(),
    ///     "1b1b1b1b/b1b1b1b1/1b1b1b1b/8/8/a1a1a1a1/1a1a1a1a/a1a1a1a1"
    /// );
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        let mut occupants = [Occupant::Empty; BOARD_SIZE];
        for square in Square::iter().filter(|square| square.is_dark()) {
            occupants[square.index()] = match square.row() {
                0..=2 => Occupant::Opponent,
                5..=7 => Occupant::Active,
                _ => Occupant::Empty,
            };
        }
        Self { occupants }
    }

    /// Creates a board from exactly [`BOARD_SIZE`] occupants in row-major
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Malformed`] if there are fewer or more occupants.
    pub fn from_occupants(
        occupants: impl IntoIterator<Item = Occupant>,
    ) -> Result<Self, BoardError> {
        let mut collected = ArrayVec::<Occupant, BOARD_SIZE>::new();
        let mut squares = 0;
        for occupant in occupants {
            squares += 1;
            if !collected.is_full() {
                collected.push(occupant);
            }
        }
        if squares != BOARD_SIZE {
            return Err(BoardError::Malformed { squares });
        }
        match collected.into_inner() {
            Ok(occupants) => Ok(Self { occupants }),
            Err(collected) => Err(BoardError::Malformed {
                squares: collected.len(),
            }),
        }
    }

    /// Classifies raw square markers in row-major order and creates a board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Malformed`] unless there are exactly
    /// [`BOARD_SIZE`] markers.
    pub fn from_markers<S: AsRef<str>>(
        markers: impl IntoIterator<Item = S>,
        marker_set: &MarkerSet,
    ) -> Result<Self, BoardError> {
        Self::from_occupants(
            markers
                .into_iter()
                .map(|marker| marker_set.classify(marker.as_ref())),
        )
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn at(&self, square: Square) -> Occupant {
        self.occupants[square.index()]
    }

    /// Returns `None` for coordinates outside of the board.
    #[must_use]
    pub fn at_coordinates(&self, row: u8, col: u8) -> Option<Occupant> {
        Square::new(row, col).ok().map(|square| self.at(square))
    }

    /// Iterates over all squares and their occupants in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Occupant)> + '_ {
        Square::iter().map(|square| (square, self.at(square)))
    }

    /// Copy of the underlying occupants, e.g. to build the next snapshot from.
    #[must_use]
    pub const fn occupants(&self) -> [Occupant; BOARD_SIZE] {
        self.occupants
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint(self.to_string())
    }

    /// Parses board notation.
    ///
    /// NOTE: This expects properly-formatted inputs: no extra symbols or
    /// additional whitespace. Use [`Board::try_from`] for cleaning up the
    /// input.
    ///
    /// # Errors
    ///
    /// If there are not exactly 8 rows of exactly 8 squares each or an
    /// unknown symbol is found.
    pub fn from_notation(input: &str) -> anyhow::Result<Self> {
        let mut occupants = ArrayVec::<Occupant, BOARD_SIZE>::new();
        let mut rows = 0;
        for row in input.split('/') {
            if rows == BOARD_WIDTH {
                bail!("incorrect notation: expected {BOARD_WIDTH} rows, got {input}");
            }
            rows += 1;
            let mut width: u8 = 0;
            for symbol in row.chars() {
                let (occupant, run) = match symbol {
                    '0' => bail!("increment can not be 0"),
                    '1'..='8' => (Occupant::Empty, symbol as u8 - b'0'),
                    _ => (Occupant::try_from(symbol)?, 1),
                };
                if width + run > BOARD_WIDTH {
                    bail!("incorrect notation: row {row} is wider than {BOARD_WIDTH}");
                }
                width += run;
                for _ in 0..run {
                    occupants.push(occupant);
                }
            }
            if width != BOARD_WIDTH {
                bail!(
                    "incorrect notation: row size should be exactly {BOARD_WIDTH}, got {row} of \
                     length {width}"
                );
            }
        }
        if rows != BOARD_WIDTH {
            bail!("incorrect notation: there should be {BOARD_WIDTH} rows, got {input}");
        }
        Ok(Self::from_occupants(occupants)?)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Index<Square> for Board {
    type Output = Occupant;

    fn index(&self, square: Square) -> &Self::Output {
        &self.occupants[square.index()]
    }
}

impl From<[Occupant; BOARD_SIZE]> for Board {
    fn from(occupants: [Occupant; BOARD_SIZE]) -> Self {
        Self { occupants }
    }
}

impl TryFrom<&str> for Board {
    type Error = anyhow::Error;

    /// Trims whitespace and an optional `board ` prefix before parsing the
    /// notation.
    fn try_from(input: &str) -> anyhow::Result<Self> {
        let input = input.trim();
        let input = input.strip_prefix("board ").unwrap_or(input);
        Self::from_notation(input)
    }
}

impl fmt::Display for Board {
    /// Prints the board notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, squares) in self.occupants.chunks(usize::from(BOARD_WIDTH)).enumerate() {
            if row != 0 {
                f.write_char('/')?;
            }
            let mut empty_run = 0;
            for &occupant in squares {
                if occupant == Occupant::Empty {
                    empty_run += 1;
                    continue;
                }
                if empty_run != 0 {
                    write!(f, "{empty_run}")?;
                    empty_run = 0;
                }
                f.write_char(occupant.symbol())?;
            }
            if empty_run != 0 {
                write!(f, "{empty_run}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  01234567")?;
        for (row, squares) in self.occupants.chunks(usize::from(BOARD_WIDTH)).enumerate() {
            write!(f, "{row} ")?;
            for &occupant in squares {
                f.write_char(match occupant {
                    Occupant::Empty => '.',
                    other => other.symbol(),
                })?;
            }
            writeln!(f)?;
        }
        write!(f, "Notation: {self}")
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn setup(notation: &str) -> Board {
        let board = Board::try_from(notation);
        assert!(board.is_ok(), "input: {notation}");
        let board = board.unwrap();
        assert_eq!(board.to_string(), notation);
        board
    }

    #[test]
    fn correct_notation() {
        let _ = setup("8/8/8/8/8/8/8/8");
        let _ = setup("1b1b1b1b/b1b1b1b1/1b1b1b1b/8/8/a1a1a1a1/1a1a1a1a/a1a1a1a1");
        let _ = setup("8/8/3a4/4b3/8/8/8/8");
        let _ = setup("8/8/8/8/8/2A5/8/8");
        let _ = setup("B7/7A/8/?7/8/8/8/abab?bab");
    }

    #[test]
    fn clean_board_str() {
        assert_eq!(
            Board::try_from("  board 8/8/8/8/8/8/8/8\n").unwrap(),
            Board::empty()
        );
        assert!(Board::from_notation(" 8/8/8/8/8/8/8/8").is_err());
    }

    #[test]
    fn no_crash() {
        assert!(Board::try_from("").is_err());
        assert!(Board::try_from("8/8/8/8/8/8/8").is_err());
        assert!(Board::try_from("8/8/8/8/8/8/8/8/8").is_err());
        assert!(Board::try_from("8/8/8/8/8/8/8/9").is_err());
        assert!(Board::try_from("8/8/8/8/8/8/8/07").is_err());
        assert!(Board::try_from("8/8/8/8/8/8/8/7").is_err());
        assert!(Board::try_from("8/8/8/8/8/8/8/7aa").is_err());
        assert!(Board::try_from("8/8/8/8/8/8/8/7x").is_err());
        assert!(Board::try_from("8/8/8/8/8/8/8/ðŸ” 7").is_err());
    }

    #[test]
    fn non_canonical_runs() {
        // Split runs are accepted but printed back merged.
        let board = Board::try_from("44/8/8/8/8/8/8/8").unwrap();
        assert_eq!(board.to_string(), "8/8/8/8/8/8/8/8");
    }

    #[test]
    fn access() {
        let board = setup("8/8/3a4/4b3/8/8/8/8");
        let square = Square::new(2, 3).unwrap();
        assert_eq!(board.at(square), Occupant::Active);
        assert_eq!(board[square], Occupant::Active);
        assert_eq!(board.at_coordinates(3, 4), Some(Occupant::Opponent));
        assert_eq!(board.at_coordinates(4, 5), Some(Occupant::Empty));
        assert_eq!(board.at_coordinates(8, 0), None);
        assert_eq!(
            board
                .iter()
                .filter(|(_, occupant)| !occupant.is_empty())
                .map(|(square, _)| square.index())
                .collect::<Vec<_>>(),
            vec![19, 28]
        );
    }

    #[test]
    fn from_occupants() {
        assert_eq!(
            Board::from_occupants([Occupant::Empty; 40]),
            Err(BoardError::Malformed { squares: 40 })
        );
        assert_eq!(
            Board::from_occupants([Occupant::Empty; 65]),
            Err(BoardError::Malformed { squares: 65 })
        );
        assert_eq!(
            Board::from_occupants(Board::starting().occupants()),
            Ok(Board::starting())
        );
    }

    #[test]
    fn from_markers() {
        let markers = MarkerSet::default();
        let mut sources = vec!["gray.gif"; BOARD_SIZE];
        sources[1] = "me1.gif";
        sources[62] = "youking.gif";
        sources[63] = "you1.gif";
        let board = Board::from_markers(&sources, &markers).unwrap();
        assert_eq!(board.to_string(), "1b6/8/8/8/8/8/8/6Aa");
        assert_eq!(
            Board::from_markers(&sources[..40], &markers),
            Err(BoardError::Malformed { squares: 40 })
        );
    }

    #[test]
    fn fingerprints() {
        assert_eq!(Board::starting().fingerprint(), Board::starting().fingerprint());
        assert_ne!(Board::starting().fingerprint(), Board::empty().fingerprint());
        let king = setup("8/8/8/8/8/2A5/8/8");
        let piece = setup("8/8/8/8/8/2a5/8/8");
        assert_ne!(king.fingerprint(), piece.fingerprint());
    }

    #[test]
    fn debug_grid() {
        let board = setup("8/8/3a4/4b3/8/8/8/8");
        assert_eq!(
            format!("{board:?}"),
            "  01234567\n0 ........\n1 ........\n2 ...a....\n3 ....b...\n4 ........\n5 \
             ........\n6 ........\n7 ........\nNotation: 8/8/3a4/4b3/8/8/8/8"
        );
    }
}
