//! Checkers primitives commonly used within [`crate::checkers`].

use std::fmt;

use anyhow::{bail, Context};

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_WIDTH as usize);

/// Board squares: from left to right, from top to the bottom. Row 0 is the
/// top of the board as it is rendered.
///
/// ```
/// use checkers::checkers::core::Square;
///
/// let square = Square::new(2, 3).unwrap();
/// assert_eq!(square.index(), 19);
/// assert_eq!(square.row(), 2);
/// assert_eq!(square.col(), 3);
/// assert_eq!(Square::try_from(63_u8).unwrap(), Square::new(7, 7).unwrap());
/// ```
///
/// Square is a compact representation using only one byte.
///
/// ```
/// use checkers::checkers::core::Square;
///
/// assert_eq!(std::mem::size_of::<Square>(), 1);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    /// Connects row and column to form a full square.
    ///
    /// # Errors
    ///
    /// If either coordinate is outside 0..[`BOARD_WIDTH`].
    pub fn new(row: u8, col: u8) -> anyhow::Result<Self> {
        if row >= BOARD_WIDTH || col >= BOARD_WIDTH {
            bail!("row and column should be within 0..{BOARD_WIDTH}, got ({row}, {col})");
        }
        Ok(Self(row * BOARD_WIDTH + col))
    }

    /// Row-major position on the board: `row * 8 + col`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn row(self) -> u8 {
        self.0 / BOARD_WIDTH
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn col(self) -> u8 {
        self.0 % BOARD_WIDTH
    }

    /// Walks `steps` times along the diagonal. Returns `None` when the walk
    /// leaves the board.
    #[must_use]
    pub fn offset(self, diagonal: Diagonal, steps: i8) -> Option<Self> {
        let row = i16::from(self.row()) + i16::from(diagonal.row) * i16::from(steps);
        let col = i16::from(self.col()) + i16::from(diagonal.col) * i16::from(steps);
        let width = i16::from(BOARD_WIDTH);
        if !(0..width).contains(&row) || !(0..width).contains(&col) {
            return None;
        }
        // Both coordinates are within 0..8 now.
        Some(Self((row * width + col) as u8))
    }

    /// Iterates over all squares in row-major order.
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..BOARD_SIZE as u8).map(Self)
    }

    /// Dark squares are the only ones pieces ever stand on in a regular game.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        (self.row() + self.col()) % 2 == 1
    }
}

impl TryFrom<u8> for Square {
    type Error = anyhow::Error;

    /// Creates a square given its position on the board.
    ///
    /// # Errors
    ///
    /// If given square index is outside 0..[`BOARD_SIZE`] range.
    fn try_from(index: u8) -> anyhow::Result<Self> {
        if usize::from(index) >= BOARD_SIZE {
            bail!("square index should be in 0..{BOARD_SIZE}, got {index}");
        }
        Ok(Self(index))
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    fn try_from(square: &str) -> anyhow::Result<Self> {
        let index: u8 = square
            .trim()
            .parse()
            .with_context(|| format!("square should be an index, got '{square}'"))?;
        Self::try_from(index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What stands on a square.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Occupant {
    /// Nothing: pieces can move and jump here.
    Empty,
    /// Regular piece of the player-controlled side.
    Active,
    /// Regular piece of the opposing side.
    Opponent,
    /// Promoted piece of the player-controlled side.
    ActiveKing,
    /// Promoted piece of the opposing side.
    OpponentKing,
    /// Anything else. It is neither passable nor capturable.
    Unknown,
}

impl Occupant {
    /// Pieces the move generator produces moves for.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active | Self::ActiveKing)
    }

    /// Pieces that can be captured.
    #[must_use]
    pub const fn is_opponent(self) -> bool {
        matches!(self, Self::Opponent | Self::OpponentKing)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_king(self) -> bool {
        matches!(self, Self::ActiveKing | Self::OpponentKing)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the same piece after promotion. Kings and non-pieces are
    /// unchanged.
    #[must_use]
    pub const fn crowned(self) -> Self {
        match self {
            Self::Active => Self::ActiveKing,
            Self::Opponent => Self::OpponentKing,
            other => other,
        }
    }

    /// Symbol used in board notation. [`Occupant::Empty`] has no symbol of
    /// its own: runs of empty squares are written as digits.
    pub(super) const fn symbol(self) -> char {
        match self {
            Self::Empty => '1',
            Self::Active => 'a',
            Self::Opponent => 'b',
            Self::ActiveKing => 'A',
            Self::OpponentKing => 'B',
            Self::Unknown => '?',
        }
    }
}

impl TryFrom<char> for Occupant {
    type Error = anyhow::Error;

    fn try_from(symbol: char) -> anyhow::Result<Self> {
        match symbol {
            'a' => Ok(Self::Active),
            'A' => Ok(Self::ActiveKing),
            'b' => Ok(Self::Opponent),
            'B' => Ok(Self::OpponentKing),
            '?' => Ok(Self::Unknown),
            _ => bail!("occupant should be one of \"aAbB?\", got '{symbol}'"),
        }
    }
}

/// A single diagonal step: row and column deltas of ±1.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Diagonal {
    #[allow(missing_docs)]
    pub row: i8,
    #[allow(missing_docs)]
    pub col: i8,
}

impl Diagonal {
    /// All four diagonals in the order kings and capture chains examine them.
    pub const ALL: [Self; 4] = [
        Self { row: 1, col: -1 },
        Self { row: 1, col: 1 },
        Self { row: -1, col: -1 },
        Self { row: -1, col: 1 },
    ];
}

/// The way regular pieces of the active side advance. The board does not say
/// which edge the player started from, so this is inferred from where the
/// pieces are.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards row 7.
    Down,
}

impl Direction {
    /// Row delta of a single forward step.
    #[must_use]
    pub const fn row_delta(self) -> i8 {
        match self {
            Self::Up => -1,
            Self::Down => 1,
        }
    }

    /// The two diagonals a regular piece may use.
    #[must_use]
    pub const fn diagonals(self) -> [Diagonal; 2] {
        let row = self.row_delta();
        [Diagonal { row, col: -1 }, Diagonal { row, col: 1 }]
    }

    /// Row where a regular piece moving this way gets promoted.
    #[must_use]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Self::Up => 0,
            Self::Down => BOARD_WIDTH - 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "up",
            Self::Down => "down",
        })
    }
}

/// A proposed move of an active-side piece. Moves are never applied by the
/// engine itself: the board is immutable and the move executor is the only
/// thing that changes the real state.
///
/// A simple move goes one step along a diagonal, a capture jumps two steps
/// over an opponent piece that ends up removed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    capture: bool,
}

impl Move {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn step(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            capture: false,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn jump(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            capture: true,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn from(&self) -> Square {
        self.from
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn to(&self) -> Square {
        self.to
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_capture(&self) -> bool {
        self.capture
    }

    /// The square of the jumped piece.
    #[must_use]
    pub fn captured(&self) -> Option<Square> {
        if !self.capture {
            return None;
        }
        let row = (self.from.row() + self.to.row()) / 2;
        let col = (self.from.col() + self.to.col()) / 2;
        Square::new(row, col).ok()
    }

    /// Checks the geometry: a simple move is one diagonal step and a capture
    /// is two. [`Move::step`] and [`Move::jump`] accept any pair of squares.
    #[must_use]
    pub fn is_diagonal(&self) -> bool {
        let expected = if self.capture { 2 } else { 1 };
        self.from.row().abs_diff(self.to.row()) == expected
            && self.from.col().abs_diff(self.to.col()) == expected
    }
}

impl fmt::Display for Move {
    /// Serializes a move as `from-to` or `fromxto` for captures, with squares
    /// written as indices.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if self.capture { 'x' } else { '-' };
        write!(f, "{}{separator}{}", self.from, self.to)
    }
}

impl TryFrom<&str> for Move {
    type Error = anyhow::Error;

    fn try_from(input: &str) -> anyhow::Result<Self> {
        let (from, to, capture) = match (input.split_once('x'), input.split_once('-')) {
            (Some((from, to)), None) => (from, to, true),
            (None, Some((from, to))) => (from, to, false),
            _ => bail!("move should look like \"from-to\" or \"fromxto\", got '{input}'"),
        };
        let parsed = Self {
            from: Square::try_from(from)?,
            to: Square::try_from(to)?,
            capture,
        };
        if !parsed.is_diagonal() {
            bail!("{input} is not a diagonal move");
        }
        Ok(parsed)
    }
}
