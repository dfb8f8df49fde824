use crate::*;
use alloc::vec::Vec;

pub use random::*;

mod random;

pub trait DeckGenerator {
    fn generate(self, pairs: PairCount) -> Result<Deck>;
}

/// Deals a fixed symbol order, used to replay or script a game.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetDeckGenerator {
    symbols: Vec<Symbol>,
}

impl PresetDeckGenerator {
    pub fn new(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        Self {
            symbols: symbols.into_iter().collect(),
        }
    }
}

impl DeckGenerator for PresetDeckGenerator {
    fn generate(self, pairs: PairCount) -> Result<Deck> {
        let deck = Deck::from_symbols(&self.symbols)?;
        if deck.pairs() != pairs {
            log::warn!(
                "Preset deck holds {} pairs, requested {}",
                deck.pairs(),
                pairs
            );
            return Err(GameError::InvalidDeck);
        }
        Ok(deck)
    }
}

fn check_pair_count(pairs: PairCount) -> Result<PairCount> {
    if pairs == 0 || pairs > Symbol::POOL_SIZE {
        Err(GameError::TooManyPairs {
            requested: pairs,
            available: Symbol::POOL_SIZE,
        })
    } else {
        Ok(pairs)
    }
}
