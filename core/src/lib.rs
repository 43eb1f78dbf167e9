#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub use deck::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use render::*;
pub use score::*;
pub use session::*;
pub use symbols::*;
pub use timer::*;
pub use types::*;

mod deck;
mod engine;
mod error;
mod generator;
mod render;
mod score;
mod session;
mod symbols;
mod timer;
mod types;

/// How long a mismatched pair stays face up before it is flipped back.
pub const MISMATCH_DELAY_MS: u32 = 800;

/// Deferred unflip of a mismatched pair, valid only for the session that issued it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MismatchTicket {
    pub generation: Generation,
    pub first: CardIndex,
    pub second: CardIndex,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    NoChange,
    Started,
}

impl StartOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Started => true,
        }
    }
}

/// Outcome of clicking a card.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Input was not accepted: locked board, face-up card, bad index or no running session.
    Ignored,
    /// First card of a move is now face up.
    Revealed,
    /// Second card matched the first, play continues.
    Matched,
    /// Second card did not match, the board stays locked until the ticket is resolved.
    Mismatched(MismatchTicket),
    /// Last pair matched.
    Won { moves: u32, elapsed_secs: u32 },
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        use SelectOutcome::*;
        match self {
            Ignored => false,
            Revealed => true,
            Matched => true,
            Mismatched(_) => true,
            Won { .. } => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// Ticket belongs to a replaced session or was already resolved.
    Stale,
    Unflipped,
}

impl ResolveOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Stale => false,
            Self::Unflipped => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick from a replaced session.
    Stale,
    Unchanged,
    Advanced(u32),
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Stale => false,
            Self::Unchanged => false,
            Self::Advanced(_) => true,
        }
    }
}
