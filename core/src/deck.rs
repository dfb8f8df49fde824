use alloc::vec::Vec;
use core::ops::Index;

use crate::*;

/// Ordered cards of one dealt game, every symbol present exactly twice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    pairs: PairCount,
}

impl Deck {
    pub fn from_symbols(symbols: &[Symbol]) -> Result<Self> {
        if symbols.is_empty()
            || symbols.len() % 2 != 0
            || symbols.len() > 2 * SYMBOL_POOL.len()
        {
            return Err(GameError::InvalidDeck);
        }

        let mut counts = [0u8; SYMBOL_POOL.len()];
        for symbol in symbols {
            let count = &mut counts[usize::from(symbol.index())];
            *count = count.checked_add(1).ok_or(GameError::InvalidDeck)?;
        }
        if counts.iter().any(|&count| count != 0 && count != 2) {
            return Err(GameError::InvalidDeck);
        }

        let pairs = (symbols.len() / 2)
            .try_into()
            .map_err(|_| GameError::InvalidDeck)?;
        let cards = symbols
            .iter()
            .enumerate()
            .map(|(position, &symbol)| Card::new(symbol, position as Position))
            .collect();

        Ok(Self { cards, pairs })
    }

    pub fn pairs(&self) -> PairCount {
        self.pairs
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.cards.iter().map(Card::symbol)
    }

    pub fn validate_position(&self, position: Position) -> Result<Position> {
        if usize::from(position) < self.cards.len() {
            Ok(position)
        } else {
            Err(GameError::InvalidPosition)
        }
    }

    pub(crate) fn set_state(&mut self, position: Position, state: CardState) {
        self.cards[usize::from(position)].state = state;
    }
}

impl Index<Position> for Deck {
    type Output = Card;

    fn index(&self, position: Position) -> &Self::Output {
        &self.cards[usize::from(position)]
    }
}
