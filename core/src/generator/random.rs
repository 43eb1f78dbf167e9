use super::*;

/// Uniformly shuffled deck, reproducible from its seed.
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

        let mut deck = Deck::ordered(pairs)?;
        let mut rng = SmallRng::seed_from_u64(self.seed);
        // Fisher-Yates, every permutation equally likely
        deck.shuffle(&mut rng);
        log::debug!("Generated deck of {} pairs from seed {}", pairs, self.seed);
        Ok(deck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sorted_keys(deck: &Deck) -> Vec<PairKey> {
        let mut keys: Vec<_> = deck.keys().collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn every_difficulty_gets_each_key_twice() {
        for difficulty in Difficulty::ALL {
            let deck = RandomDeckGenerator::new(7)
                .generate(difficulty.pair_count())
                .unwrap();

            assert_eq!(deck.len(), difficulty.card_count());
            for key in 0..difficulty.pair_count() {
                assert_eq!(deck.keys().filter(|&k| k == key).count(), 2);
            }
        }
    }

    #[test]
    fn shuffle_is_a_permutation_of_the_ordered_deck() {
        let ordered = OrderedDeckGenerator.generate(12).unwrap();
        for seed in 0..32 {
            let shuffled = RandomDeckGenerator::new(seed).generate(12).unwrap();
            assert_eq!(sorted_keys(&shuffled), sorted_keys(&ordered));
            assert_eq!(shuffled.count_faces(CardFace::Hidden), shuffled.len());
        }
    }

    #[test]
    fn same_seed_same_deck() {
        let a = RandomDeckGenerator::new(42).generate(6).unwrap();
        let b = RandomDeckGenerator::new(42).generate(6).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn shuffling_actually_moves_cards() {
        let ordered = OrderedDeckGenerator.generate(6).unwrap();
        assert!((1..=8).any(|seed| RandomDeckGenerator::new(seed).generate(6).unwrap() != ordered));
    }

    #[test]
    fn too_many_pairs_is_a_configuration_error() {
        let requested = SYMBOLS.len() as PairCount + 1;
        assert!(matches!(
            RandomDeckGenerator::new(1).generate(requested),
            Err(GameError::TooManyPairs { .. })
        ));
    }

    #[test]
    fn arrangements_are_roughly_uniform() {
        // two pairs have 6 distinct key arrangements
        let mut counts: BTreeMap<Vec<PairKey>, u32> = BTreeMap::new();
        for seed in 0..6000 {
            let deck = RandomDeckGenerator::new(seed).generate(2).unwrap();
            *counts.entry(deck.keys().collect()).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        for (arrangement, count) in counts {
            assert!(
                (800..1200).contains(&count),
                "{:?} drawn {} times",
                arrangement,
                count
            );
        }
    }
}
