use crate::*;
pub use random::*;

mod random;

pub trait DeckGenerator {
    fn generate(self, pairs: PairCount) -> Result<Deck>;
}

/// Leaves the pairs in catalogue order, mostly useful for tests and demos.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct OrderedDeckGenerator;

impl DeckGenerator for OrderedDeckGenerator {
    fn generate(self, pairs: PairCount) -> Result<Deck> {
        Deck::ordered(pairs)
    }
}
