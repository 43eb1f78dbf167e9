use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::*;

/// What the shell paints for one card. The symbol is only exposed while the card is face up.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CardView {
    pub index: CardIndex,
    pub face: CardFace,
    pub symbol: Option<&'static Symbol>,
}

impl CardView {
    pub fn new(index: CardIndex, card: &Card) -> Self {
        let face = card.face();
        Self {
            index,
            face,
            symbol: face.is_face_up().then(|| card.symbol()).flatten(),
        }
    }
}

/// Complete set of instructions for the shell after any engine call.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame {
    pub state: EngineState,
    pub difficulty: Difficulty,
    pub grid: GridShape,
    pub cards: Vec<CardView>,
    pub move_count: u32,
    pub match_count: PairCount,
    pub pair_count: PairCount,
    /// `MM:SS`
    pub elapsed: String,
    pub show_win_banner: bool,
    /// The finished session set a new best score.
    pub new_best: bool,
    pub input_enabled: bool,
    pub board_disabled: bool,
    pub start_enabled: bool,
    pub restart_enabled: bool,
    pub best_scores: [(Difficulty, Option<u32>); 2],
}

impl RenderFrame {
    /// `Best Easy: 8 moves | Best Hard: — moves`
    pub fn best_scores_line(&self) -> String {
        self.best_scores
            .iter()
            .map(|(difficulty, best)| match best {
                Some(moves) => format!("Best {}: {} moves", difficulty, moves),
                None => format!("Best {}: \u{2014} moves", difficulty),
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
