use super::*;

/// Uniformly random deal: picks the symbols with a partial Fisher–Yates over the pool, then shuffles the doubled
/// selection with a full Fisher–Yates.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDeckGenerator {
    seed: u64,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(self, pairs: PairCount) -> Result<Deck> {
        use rand::prelude::*;

        let pairs = check_pair_count(pairs)?;
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let mut pool: Vec<Symbol> = Symbol::pool().collect();
        let (chosen, _) = pool.partial_shuffle(&mut rng, pairs.into());

        let mut symbols: Vec<Symbol> = chosen.iter().chain(chosen.iter()).copied().collect();
        symbols.shuffle(&mut rng);

        log::debug!("dealt {} pairs from seed {}", pairs, self.seed);
        Deck::from_symbols(&symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;

    #[test]
    fn every_chosen_symbol_appears_exactly_twice() {
        for difficulty in Difficulty::ALL {
            for seed in 0..64 {
                let deck = RandomDeckGenerator::new(seed)
                    .generate(difficulty.pairs())
                    .unwrap();

                let mut counts = BTreeMap::new();
                for symbol in deck.symbols() {
                    *counts.entry(symbol).or_insert(0) += 1;
                }

                assert_eq!(deck.len(), difficulty.total_cards());
                assert_eq!(counts.len(), usize::from(difficulty.pairs()));
                assert!(counts.values().all(|&count| count == 2));
            }
        }
    }

    #[test]
    fn same_seed_deals_the_same_deck() {
        let a = RandomDeckGenerator::new(7).generate(12).unwrap();
        let b = RandomDeckGenerator::new(7).generate(12).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_shuffle_positions() {
        let decks: alloc::vec::Vec<_> = (0..8)
            .map(|seed| RandomDeckGenerator::new(seed).generate(8).unwrap())
            .collect();
        assert!(decks.windows(2).any(|pair| pair[0] != pair[1]));
    }

    #[test]
    fn whole_pool_can_be_dealt() {
        let deck = RandomDeckGenerator::new(1).generate(Symbol::POOL_SIZE).unwrap();
        assert_eq!(deck.len(), 64);
    }

    #[test]
    fn pair_count_beyond_pool_is_a_configuration_error() {
        assert_eq!(
            RandomDeckGenerator::new(1).generate(33),
            Err(GameError::TooManyPairs {
                requested: 33,
                available: 32
            })
        );
        assert!(RandomDeckGenerator::new(1).generate(0).is_err());
    }
}
