use thiserror::Error;

use crate::PairKey;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Requested {requested} pairs but only {available} symbols are available")]
    TooManyPairs { requested: usize, available: usize },
    #[error("Deck needs at least one pair")]
    EmptyDeck,
    #[error("Pair key {0} does not appear exactly twice")]
    UnpairedKey(PairKey),
    #[error("Pair key {0} has no symbol")]
    UnknownSymbol(PairKey),
    #[error("Unknown difficulty")]
    UnknownDifficulty,
}

pub type Result<T> = core::result::Result<T, GameError>;
