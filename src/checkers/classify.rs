//! Turns the opaque marker a rendered square carries (e.g. an image reference
//! like `you1king.gif`) into an [`Occupant`].
//!
//! Classification is total: anything that is not recognized is
//! [`Occupant::Empty`], so a half-rendered or unfamiliar square never corrupts
//! the geometry of the board.

use anyhow::bail;

use crate::checkers::core::Occupant;

bitflags::bitflags! {
    /// Needles of a [`MarkerSet`] found in a single marker.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Traits: u8 {
        /// Belongs to the player-controlled side.
        const ACTIVE = 0b001;
        /// Belongs to the opposing side.
        const OPPONENT = 0b010;
        /// Promoted piece.
        const KING = 0b100;

        #[allow(missing_docs)]
        const ACTIVE_KING = Self::ACTIVE.bits() | Self::KING.bits();
        #[allow(missing_docs)]
        const OPPONENT_KING = Self::OPPONENT.bits() | Self::KING.bits();
    }
}

/// Substrings that identify sides and kings in markers. Matching is
/// case-insensitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerSet {
    active: String,
    opponent: String,
    king: String,
}

impl MarkerSet {
    /// Creates a marker set from the three needles.
    ///
    /// # Errors
    ///
    /// An empty needle would match every marker.
    pub fn new(active: &str, opponent: &str, king: &str) -> anyhow::Result<Self> {
        for (name, needle) in [("active", active), ("opponent", opponent), ("king", king)] {
            if needle.is_empty() {
                bail!("{name} marker can not be empty");
            }
        }
        Ok(Self {
            active: active.to_lowercase(),
            opponent: opponent.to_lowercase(),
            king: king.to_lowercase(),
        })
    }

    /// Detects which needles the marker contains.
    #[must_use]
    pub fn traits(&self, marker: &str) -> Traits {
        let marker = marker.to_lowercase();
        let mut traits = Traits::empty();
        traits.set(Traits::ACTIVE, marker.contains(&self.active));
        traits.set(Traits::OPPONENT, marker.contains(&self.opponent));
        traits.set(Traits::KING, marker.contains(&self.king));
        traits
    }

    /// Maps a marker to an occupant. Kings take precedence over regular pieces
    /// and the active side takes precedence over the opponent.
    ///
    /// ```
    /// use checkers::checkers::classify::MarkerSet;
    /// use checkers::checkers::core::Occupant;
    ///
    /// let markers = MarkerSet::new("orange", "blue", "king").unwrap();
    /// assert_eq!(markers.classify("blueking_piece.png"), Occupant::OpponentKing);
    /// assert_eq!(markers.classify("ORANGE.gif"), Occupant::Active);
    /// assert_eq!(markers.classify("empty.png"), Occupant::Empty);
    /// ```
    #[must_use]
    pub fn classify(&self, marker: &str) -> Occupant {
        let traits = self.traits(marker);
        if traits.contains(Traits::ACTIVE_KING) {
            Occupant::ActiveKing
        } else if traits.contains(Traits::OPPONENT_KING) {
            Occupant::OpponentKing
        } else if traits.contains(Traits::ACTIVE) {
            Occupant::Active
        } else if traits.contains(Traits::OPPONENT) {
            Occupant::Opponent
        } else {
            Occupant::Empty
        }
    }
}

impl Default for MarkerSet {
    /// Markers of the gamesforthebrain.com board: the player's pieces are
    /// `you*.gif`, the computer's are `me*.gif`.
    ///
    /// Markers are expected to be bare image names. The needles are plain
    /// substrings, so a full URL like `.../games/.../gray.gif` contains `me`
    /// and would be taken for an opponent piece.
    fn default() -> Self {
        Self {
            active: "you".to_owned(),
            opponent: "me".to_owned(),
            king: "king".to_owned(),
        }
    }
}

/// Classifies a marker with the [`MarkerSet::default`] needles.
#[must_use]
pub fn classify(marker: &str) -> Occupant {
    MarkerSet::default().classify(marker)
}
