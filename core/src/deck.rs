use alloc::vec::Vec;
use core::ops::Index;

use crate::*;

/// Player-visible state of a single card.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CardFace {
    #[default]
    Hidden,
    /// Face up but not yet confirmed as part of a pair.
    Revealed,
    Matched,
}

impl CardFace {
    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::Revealed | Self::Matched)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Card {
    key: PairKey,
    face: CardFace,
}

impl Card {
    pub const fn new(key: PairKey) -> Self {
        Self {
            key,
            face: CardFace::Hidden,
        }
    }

    pub const fn key(&self) -> PairKey {
        self.key
    }

    pub const fn face(&self) -> CardFace {
        self.face
    }

    pub fn symbol(&self) -> Option<&'static Symbol> {
        symbol(self.key)
    }

    pub(crate) fn set_face(&mut self, face: CardFace) {
        self.face = face;
    }
}

/// Ordered cards of one session. Every pair key appears exactly twice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Unshuffled deck: keys `0..pairs` followed by the same keys again.
    pub fn ordered(pairs: PairCount) -> Result<Self> {
        check_pair_count(pairs)?;
        let cards = (0..2)
            .flat_map(|_| (0..pairs).map(Card::new))
            .collect();
        Ok(Self { cards })
    }

    /// Deck in an explicit key order.
    pub fn from_keys(keys: &[PairKey]) -> Result<Self> {
        if keys.is_empty() {
            return Err(GameError::EmptyDeck);
        }

        let mut seen = [0u8; SYMBOLS.len()];
        for &key in keys {
            let slot = seen
                .get_mut(usize::from(key))
                .ok_or(GameError::UnknownSymbol(key))?;
            *slot = slot.saturating_add(1);
        }

        if let Some(key) = (0..SYMBOLS.len()).find(|&key| !matches!(seen[key], 0 | 2)) {
            return Err(GameError::UnpairedKey(key as PairKey));
        }

        Ok(Self {
            cards: keys.iter().copied().map(Card::new).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn pair_count(&self) -> PairCount {
        (self.cards.len() / 2) as PairCount
    }

    pub fn card(&self, index: CardIndex) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = PairKey> + '_ {
        self.cards.iter().map(Card::key)
    }

    pub fn count_faces(&self, face: CardFace) -> usize {
        self.cards.iter().filter(|card| card.face == face).count()
    }

    /// Index of the other card sharing `index`'s key.
    pub fn partner_of(&self, index: CardIndex) -> Option<CardIndex> {
        let key = self.card(index)?.key;
        self.cards
            .iter()
            .enumerate()
            .find(|&(i, card)| i != index && card.key == key)
            .map(|(i, _)| i)
    }

    pub(crate) fn set_face(&mut self, index: CardIndex, face: CardFace) {
        self.cards[index].set_face(face);
    }

    pub(crate) fn shuffle<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        use rand::seq::SliceRandom;
        self.cards.shuffle(rng);
    }
}

impl Index<CardIndex> for Deck {
    type Output = Card;

    fn index(&self, index: CardIndex) -> &Self::Output {
        &self.cards[index]
    }
}

pub(crate) fn check_pair_count(pairs: PairCount) -> Result<()> {
    if pairs == 0 {
        return Err(GameError::EmptyDeck);
    }
    if usize::from(pairs) > SYMBOLS.len() {
        return Err(GameError::TooManyPairs {
            requested: pairs.into(),
            available: SYMBOLS.len(),
        });
    }
    Ok(())
}
