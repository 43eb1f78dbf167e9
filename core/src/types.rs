use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::GameError;

/// Count type used for pairs and matches.
pub type PairCount = u8;

/// Position of a card in the deck, row-major over the grid.
pub type CardIndex = usize;

/// Board shape `(columns, rows)`.
pub type GridShape = (u8, u8);

pub const fn card_count(pairs: PairCount) -> usize {
    2 * pairs as usize
}

#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 2] = [Self::Easy, Self::Hard];

    pub const fn pair_count(self) -> PairCount {
        match self {
            Self::Easy => 6,
            Self::Hard => 12,
        }
    }

    pub const fn grid_shape(self) -> GridShape {
        match self {
            Self::Easy => (4, 3),
            Self::Hard => (6, 4),
        }
    }

    pub const fn card_count(self) -> usize {
        card_count(self.pair_count())
    }

    /// Lowercase identifier, also the value used by the difficulty selector.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Hard => "hard",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::UnknownDifficulty)
    }
}

/// Identifies one session. Bumped every time a session is replaced so that deferred work scheduled by an older
/// session can be recognised and dropped.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u32);

impl Generation {
    pub const fn get(self) -> u32 {
        self.0
    }

    pub(crate) const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
