use chrono::prelude::*;

use crate::*;

/// Valid transitions:
/// - Idle -> Ready (deck built)
/// - Ready -> Running
/// - Running -> Resolving (mismatched pair face up)
/// - Resolving -> Running
/// - Running -> Won
///
/// Restarting or changing difficulty replaces the session, which starts over at `Ready`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EngineState {
    /// No session
    #[default]
    Idle,
    /// Deck built, timer not started
    Ready,
    /// Accepting card selections
    Running,
    /// Two mismatched cards face up, input locked until they flip back
    Resolving,
    /// Every pair matched
    Won,
}

impl EngineState {
    pub const fn is_started(self) -> bool {
        matches!(self, Self::Running | Self::Resolving | Self::Won)
    }

    pub const fn accepts_input(self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Resolving)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

/// Cards face up but not yet confirmed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum Pending {
    #[default]
    None,
    One(CardIndex),
    Two(CardIndex, CardIndex),
}

impl Pending {
    const fn len(self) -> usize {
        match self {
            Self::None => 0,
            Self::One(_) => 1,
            Self::Two(..) => 2,
        }
    }
}

/// One game from deck build to win.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    difficulty: Difficulty,
    deck: Deck,
    state: EngineState,
    pending: Pending,
    move_count: u32,
    match_count: PairCount,
    timer: Timer,
    generation: Generation,
}

impl GameSession {
    pub fn new(difficulty: Difficulty, deck: Deck, generation: Generation) -> Self {
        Self {
            difficulty,
            deck,
            state: EngineState::Ready,
            pending: Pending::None,
            move_count: 0,
            match_count: 0,
            timer: Timer::default(),
            generation,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn match_count(&self) -> PairCount {
        self.match_count
    }

    pub fn pair_count(&self) -> PairCount {
        self.deck.pair_count()
    }

    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        self.timer.elapsed_secs(now)
    }

    /// Cards face up and waiting for a match decision.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn face_at(&self, index: CardIndex) -> Option<CardFace> {
        self.deck.card(index).map(Card::face)
    }

    pub fn start(&mut self, now: DateTime<Utc>) -> StartOutcome {
        if self.state != EngineState::Ready {
            return StartOutcome::NoChange;
        }
        self.timer.start(now);
        self.state = EngineState::Running;
        log::debug!("session {} running", self.generation);
        StartOutcome::Started
    }

    pub fn select(&mut self, index: CardIndex, now: DateTime<Utc>) -> SelectOutcome {
        use SelectOutcome::*;

        if !self.state.accepts_input() {
            log::trace!("ignored card {} while {:?}", index, self.state);
            return Ignored;
        }

        // face-up cards are either matched or the pending first pick
        match self.deck.card(index).map(Card::face) {
            Some(CardFace::Hidden) => {}
            _ => return Ignored,
        }

        match self.pending {
            Pending::None => {
                self.deck.set_face(index, CardFace::Revealed);
                self.pending = Pending::One(index);
                log::trace!("revealed first card {}", index);
                Revealed
            }
            Pending::One(first) => {
                self.deck.set_face(index, CardFace::Revealed);
                self.move_count = self.move_count.saturating_add(1);
                self.pending = Pending::Two(first, index);
                self.state = EngineState::Resolving;
                self.evaluate_pair(first, index, now)
            }
            Pending::Two(..) => Ignored,
        }
    }

    fn evaluate_pair(
        &mut self,
        first: CardIndex,
        second: CardIndex,
        now: DateTime<Utc>,
    ) -> SelectOutcome {
        if self.deck[first].key() != self.deck[second].key() {
            log::debug!("cards {} and {} do not match", first, second);
            return SelectOutcome::Mismatched(MismatchTicket {
                generation: self.generation,
                first,
                second,
            });
        }

        self.deck.set_face(first, CardFace::Matched);
        self.deck.set_face(second, CardFace::Matched);
        self.pending = Pending::None;
        self.match_count += 1;
        log::debug!(
            "matched {} and {} ({}/{})",
            first,
            second,
            self.match_count,
            self.pair_count()
        );

        if self.match_count == self.pair_count() {
            self.timer.stop(now);
            self.state = EngineState::Won;
            log::debug!(
                "session {} won in {} moves",
                self.generation,
                self.move_count
            );
            SelectOutcome::Won {
                moves: self.move_count,
                elapsed_secs: self.timer.elapsed_secs(now),
            }
        } else {
            self.state = EngineState::Running;
            SelectOutcome::Matched
        }
    }

    /// Flips a mismatched pair back and unlocks the board.
    pub fn resolve_mismatch(&mut self, ticket: MismatchTicket) -> ResolveOutcome {
        if ticket.generation != self.generation {
            log::debug!(
                "dropping ticket from session {}, current is {}",
                ticket.generation,
                self.generation
            );
            return ResolveOutcome::Stale;
        }

        if self.state != EngineState::Resolving
            || self.pending != Pending::Two(ticket.first, ticket.second)
        {
            return ResolveOutcome::Stale;
        }

        self.deck.set_face(ticket.first, CardFace::Hidden);
        self.deck.set_face(ticket.second, CardFace::Hidden);
        self.pending = Pending::None;
        self.state = EngineState::Running;
        ResolveOutcome::Unflipped
    }

    /// Periodic clock update from the shell.
    pub fn tick(&mut self, generation: Generation, now: DateTime<Utc>) -> TickOutcome {
        if generation != self.generation {
            return TickOutcome::Stale;
        }

        match self.timer.observe(now) {
            Some(secs) => TickOutcome::Advanced(secs),
            None => TickOutcome::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(secs * 1000).unwrap()
    }

    fn running(keys: &[PairKey]) -> GameSession {
        let mut session = GameSession::new(
            Difficulty::Easy,
            Deck::from_keys(keys).unwrap(),
            Generation::default(),
        );
        assert_eq!(session.start(at(0)), StartOutcome::Started);
        session
    }

    #[test]
    fn selection_before_start_is_ignored() {
        let mut session = GameSession::new(
            Difficulty::Easy,
            Deck::ordered(2).unwrap(),
            Generation::default(),
        );

        assert_eq!(session.select(0, at(0)), SelectOutcome::Ignored);
        assert_eq!(session.state(), EngineState::Ready);
    }

    #[test]
    fn start_is_idempotent() {
        let mut session = running(&[0, 0, 1, 1]);
        assert_eq!(session.start(at(5)), StartOutcome::NoChange);
        assert_eq!(session.state(), EngineState::Running);
    }

    #[test]
    fn first_pick_reveals_without_counting_a_move() {
        let mut session = running(&[0, 1, 0, 1]);

        assert_eq!(session.select(0, at(1)), SelectOutcome::Revealed);
        assert_eq!(session.move_count(), 0);
        assert_eq!(session.face_at(0), Some(CardFace::Revealed));
        assert_eq!(session.state(), EngineState::Running);
    }

    #[test]
    fn matching_pair_confirms_immediately() {
        let mut session = running(&[0, 1, 0, 1]);

        session.select(0, at(1));
        assert_eq!(session.select(2, at(2)), SelectOutcome::Matched);

        assert_eq!(session.move_count(), 1);
        assert_eq!(session.match_count(), 1);
        assert_eq!(session.pending_count(), 0);
        assert_eq!(session.state(), EngineState::Running);
        assert_eq!(session.face_at(0), Some(CardFace::Matched));
        assert_eq!(session.face_at(2), Some(CardFace::Matched));
    }

    #[test]
    fn mismatch_locks_until_resolved() {
        let mut session = running(&[0, 1, 0, 1]);

        session.select(0, at(1));
        let SelectOutcome::Mismatched(ticket) = session.select(1, at(2)) else {
            panic!("expected mismatch");
        };

        assert_eq!(session.move_count(), 1);
        assert_eq!(session.match_count(), 0);
        assert_eq!(session.state(), EngineState::Resolving);
        assert_eq!(session.pending_count(), 2);
        assert_eq!(session.select(2, at(2)), SelectOutcome::Ignored);
        assert_eq!(session.face_at(2), Some(CardFace::Hidden));

        assert_eq!(session.resolve_mismatch(ticket), ResolveOutcome::Unflipped);
        assert_eq!(session.state(), EngineState::Running);
        assert_eq!(session.face_at(0), Some(CardFace::Hidden));
        assert_eq!(session.face_at(1), Some(CardFace::Hidden));
        assert_eq!(session.resolve_mismatch(ticket), ResolveOutcome::Stale);
    }

    #[test]
    fn same_card_twice_and_matched_cards_are_ignored() {
        let mut session = running(&[0, 1, 0, 1]);

        session.select(0, at(1));
        assert_eq!(session.select(0, at(1)), SelectOutcome::Ignored);
        assert_eq!(session.move_count(), 0);

        session.select(2, at(1));
        assert_eq!(session.select(0, at(2)), SelectOutcome::Ignored);
        assert_eq!(session.select(2, at(2)), SelectOutcome::Ignored);
        assert_eq!(session.select(99, at(2)), SelectOutcome::Ignored);
        assert_eq!(session.move_count(), 1);
    }

    #[test]
    fn last_pair_wins_and_freezes_timer() {
        let mut session = running(&[0, 1, 1, 0]);

        session.select(0, at(1));
        session.select(3, at(2));
        session.select(1, at(3));
        let outcome = session.select(2, at(9));

        assert_eq!(
            outcome,
            SelectOutcome::Won {
                moves: 2,
                elapsed_secs: 9
            }
        );
        assert_eq!(session.state(), EngineState::Won);
        assert_eq!(session.elapsed_secs(at(500)), 9);
        assert_eq!(session.select(0, at(10)), SelectOutcome::Ignored);
    }

    #[test]
    fn ticket_from_another_generation_is_stale() {
        let mut session = running(&[0, 1, 0, 1]);

        session.select(0, at(1));
        let SelectOutcome::Mismatched(ticket) = session.select(1, at(1)) else {
            panic!("expected mismatch");
        };
        let forged = MismatchTicket {
            generation: ticket.generation.next(),
            ..ticket
        };

        assert_eq!(session.resolve_mismatch(forged), ResolveOutcome::Stale);
        assert_eq!(session.state(), EngineState::Resolving);
    }

    #[test]
    fn tick_reports_only_changes_for_current_generation() {
        let mut session = running(&[0, 0]);
        let generation = session.generation();

        assert_eq!(session.tick(generation, at(0)), TickOutcome::Unchanged);
        assert_eq!(session.tick(generation, at(3)), TickOutcome::Advanced(3));
        assert_eq!(session.tick(generation.next(), at(4)), TickOutcome::Stale);
    }

    #[test]
    fn at_most_two_cards_pending() {
        let mut session = running(&[0, 1, 2, 0, 1, 2]);
        let picks = [0, 1, 2, 3, 4, 5, 0, 0, 3, 1, 4, 2, 5];

        for (step, &index) in picks.iter().enumerate() {
            if let SelectOutcome::Mismatched(ticket) = session.select(index, at(step as i64)) {
                assert_eq!(session.deck().count_faces(CardFace::Revealed), 2);
                // a click landing while locked changes nothing
                assert_eq!(session.select(5 - index, at(step as i64)), SelectOutcome::Ignored);
                session.resolve_mismatch(ticket);
            }
            assert!(session.deck().count_faces(CardFace::Revealed) <= 2);
            assert!(session.pending_count() <= 1 || session.state().is_locked());
        }
    }
}
