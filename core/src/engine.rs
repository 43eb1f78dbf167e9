use chrono::prelude::*;
use rand::prelude::*;

use crate::*;

/// Owns the single in-flight session and everything that outlives it: the score store, the selected difficulty and
/// the generation counter used to invalidate deferred work.
#[derive(Debug)]
pub struct MemoryEngine<S> {
    store: S,
    difficulty: Difficulty,
    session: Option<GameSession>,
    generation: Generation,
    rng: SmallRng,
    new_best: bool,
}

impl<S: ScoreStore> MemoryEngine<S> {
    pub fn new(store: S, seed: u64) -> Self {
        Self {
            store,
            difficulty: Difficulty::default(),
            session: None,
            generation: Generation::default(),
            rng: SmallRng::seed_from_u64(seed),
            new_best: false,
        }
    }

    /// Selects the difficulty for the next deck. A session dealt for another difficulty is dropped.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        if self
            .session
            .as_ref()
            .is_some_and(|session| session.difficulty() != difficulty)
        {
            self.session = None;
        }
        self.difficulty = difficulty;
        self
    }

    pub fn state(&self) -> EngineState {
        self.session
            .as_ref()
            .map_or(EngineState::Idle, GameSession::state)
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Generation of the current session. Tickets and ticks carrying any other value are dropped.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn best_score(&self, difficulty: Difficulty) -> Option<u32> {
        self.store.best(difficulty)
    }

    /// Builds a freshly shuffled deck for `difficulty` and replaces the current session with it, in `Ready`.
    pub fn build_session(&mut self, difficulty: Difficulty) -> Result<Generation> {
        let seed = self.rng.random();
        self.build_session_with(difficulty, RandomDeckGenerator::new(seed))
    }

    /// Same as [`Self::build_session`] with a caller-chosen deck generator. On error the current session is kept.
    pub fn build_session_with<G: DeckGenerator>(
        &mut self,
        difficulty: Difficulty,
        generator: G,
    ) -> Result<Generation> {
        let deck = generator.generate(difficulty.pair_count())?;

        self.generation = self.generation.next();
        self.difficulty = difficulty;
        self.new_best = false;
        self.session = Some(GameSession::new(difficulty, deck, self.generation));
        log::debug!("session {} ready ({})", self.generation, difficulty);
        Ok(self.generation)
    }

    /// Starts the clock and accepts input. Builds a deck first when there is no session.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<StartOutcome> {
        if self.session.is_none() {
            self.build_session(self.difficulty)?;
        }
        Ok(self
            .session
            .as_mut()
            .map_or(StartOutcome::NoChange, |session| session.start(now)))
    }

    pub fn select_card(&mut self, index: CardIndex, now: DateTime<Utc>) -> SelectOutcome {
        let Some(session) = self.session.as_mut() else {
            return SelectOutcome::Ignored;
        };

        let outcome = session.select(index, now);
        if let SelectOutcome::Won { moves, .. } = outcome {
            self.new_best = record_best(&mut self.store, session.difficulty(), moves);
        }
        outcome
    }

    pub fn resolve_mismatch(&mut self, ticket: MismatchTicket) -> ResolveOutcome {
        self.session
            .as_mut()
            .map_or(ResolveOutcome::Stale, |session| {
                session.resolve_mismatch(ticket)
            })
    }

    pub fn tick(&mut self, generation: Generation, now: DateTime<Utc>) -> TickOutcome {
        self.session
            .as_mut()
            .map_or(TickOutcome::Stale, |session| session.tick(generation, now))
    }

    /// New deck for the same difficulty, immediately running.
    pub fn restart(&mut self, now: DateTime<Utc>) -> Result<Generation> {
        let generation = self.build_session(self.difficulty)?;
        self.start(now)?;
        Ok(generation)
    }

    /// New deck for `difficulty`, waiting for an explicit start.
    pub fn change_difficulty(&mut self, difficulty: Difficulty) -> Result<Generation> {
        log::debug!("difficulty {} -> {}", self.difficulty, difficulty);
        self.build_session(difficulty)
    }

    pub fn render(&self, now: DateTime<Utc>) -> RenderFrame {
        let state = self.state();
        let session = self.session.as_ref();
        let difficulty = session.map_or(self.difficulty, GameSession::difficulty);

        RenderFrame {
            state,
            difficulty,
            grid: difficulty.grid_shape(),
            cards: session.map_or_else(Default::default, |session| {
                session
                    .deck()
                    .iter()
                    .enumerate()
                    .map(|(index, card)| CardView::new(index, card))
                    .collect()
            }),
            move_count: session.map_or(0, GameSession::move_count),
            match_count: session.map_or(0, GameSession::match_count),
            pair_count: session.map_or(difficulty.pair_count(), GameSession::pair_count),
            elapsed: format_clock(session.map_or(0, |session| session.elapsed_secs(now))),
            show_win_banner: state.is_finished(),
            new_best: state.is_finished() && self.new_best,
            input_enabled: state.accepts_input(),
            board_disabled: !state.is_started(),
            start_enabled: !state.is_started(),
            restart_enabled: state.is_started(),
            best_scores: Difficulty::ALL.map(|difficulty| (difficulty, self.best_score(difficulty))),
        }
    }
}
