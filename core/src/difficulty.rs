use core::fmt;
use core::str::FromStr;

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn pairs(self) -> PairCount {
        use Difficulty::*;
        match self {
            Easy => 8,
            Medium => 12,
            Hard => 18,
        }
    }

    pub const fn total_cards(self) -> usize {
        2 * self.pairs() as usize
    }

    /// Name used for the layout class, the storage key and the share text.
    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "easy",
            Medium => "medium",
            Hard => "hard",
        }
    }

    pub const fn layout_class(self) -> &'static str {
        self.name()
    }

    pub const fn columns(self) -> usize {
        use Difficulty::*;
        match self {
            Easy => 4,
            Medium | Hard => 6,
        }
    }

    /// Checks the difficulty can be dealt from the symbol pool.
    pub fn validate(self) -> Result<Self> {
        if self.pairs() > Symbol::POOL_SIZE {
            Err(GameError::TooManyPairs {
                requested: self.pairs(),
                available: Symbol::POOL_SIZE,
            })
        } else {
            Ok(self)
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::UnknownDifficulty)
    }
}
