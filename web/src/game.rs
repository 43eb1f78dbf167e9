use crate::score::LocalScoreStore;
use crate::utils::*;
use clap::Args;
use gloo::timers::callback::{Interval, Timeout};
use pairflip_core as game;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use game::{CardFace, CardIndex, Difficulty, Generation, MismatchTicket, SelectOutcome};

/// How often the clock display is refreshed.
const TICK_INTERVAL_MS: u32 = 500;

impl StorageKey for Difficulty {
    const KEY: &'static str = "pairflip:difficulty";
}

fn board_style((cols, rows): game::GridShape) -> String {
    format!(
        "grid-template-columns: repeat({}, 1fr); grid-template-rows: repeat({}, 1fr);",
        cols, rows
    )
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    SelectCard(CardIndex),
    ResolveMismatch(MismatchTicket),
    Tick(Generation),
    Start,
    Restart,
    ChangeDifficulty(Difficulty),
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    view: game::CardView,
    #[prop_or_default]
    locked: bool,
    callback: Callback<CardIndex>,
}

#[function_component(CardTile)]
fn card_component(props: &CardProps) -> Html {
    use CardFace::*;

    let CardProps {
        view,
        locked,
        callback,
    } = props.clone();

    let class = classes!(
        "mg-card",
        match view.face {
            Hidden => classes!(),
            Revealed => classes!("is-flipped"),
            Matched => classes!("is-flipped", "is-matched"),
        },
        locked.then_some("locked")
    );

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", view.index);
        callback.emit(view.index);
    });

    html! {
        <div {class} {onclick} data-index={view.index.to_string()}>
            <div class="mg-card-inner">
                <div class="mg-card-front"></div>
                <div class="mg-card-back">
                    if let Some(symbol) = view.symbol {
                        <i class={classes!("bi", symbol.icon)} title={symbol.name}></i>
                    }
                </div>
            </div>
        </div>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    #[prop_or_default]
    pub seed: Option<u64>,

    /// Open with this difficulty instead of the last one played
    #[arg(short, long)]
    #[prop_or_default]
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    engine: game::MemoryEngine<LocalScoreStore>,
    mismatch_timeout: Option<Timeout>,
    tick_interval: Option<Interval>,
}

impl GameView {
    fn start_clock(&mut self, ctx: &Context<Self>) {
        let link = ctx.link().clone();
        let generation = self.engine.generation();
        self.tick_interval = Some(Interval::new(TICK_INTERVAL_MS, move || {
            link.send_message(Msg::Tick(generation))
        }));
    }

    fn stop_timers(&mut self) {
        self.tick_interval = None;
        self.mismatch_timeout = None;
    }

    fn schedule_unflip(&mut self, ctx: &Context<Self>, ticket: MismatchTicket) {
        let link = ctx.link().clone();
        self.mismatch_timeout = Some(Timeout::new(game::MISMATCH_DELAY_MS, move || {
            link.send_message(Msg::ResolveMismatch(ticket))
        }));
    }

    fn select_card(&mut self, ctx: &Context<Self>, index: CardIndex) -> bool {
        let outcome = self.engine.select_card(index, utc_now());
        match outcome {
            SelectOutcome::Mismatched(ticket) => self.schedule_unflip(ctx, ticket),
            SelectOutcome::Won {
                moves,
                elapsed_secs,
            } => {
                log::info!(
                    "won {} in {} moves ({})",
                    self.engine.difficulty(),
                    moves,
                    game::format_clock(elapsed_secs)
                );
                self.tick_interval = None;
            }
            _ => {}
        }
        outcome.has_update()
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        let difficulty = props
            .difficulty
            .unwrap_or_else(Difficulty::local_or_default);
        log::debug!("seed: {}, difficulty: {}", seed, difficulty);

        Self {
            engine: game::MemoryEngine::new(LocalScoreStore, seed).with_difficulty(difficulty),
            mismatch_timeout: None,
            tick_interval: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            SelectCard(index) => self.select_card(ctx, index),
            ResolveMismatch(ticket) => {
                let updated = self.engine.resolve_mismatch(ticket).has_update();
                if updated {
                    self.mismatch_timeout = None;
                }
                updated
            }
            Tick(generation) => self.engine.tick(generation, utc_now()).has_update(),
            Start => match self.engine.start(utc_now()) {
                Ok(outcome) if outcome.has_update() => {
                    self.start_clock(ctx);
                    true
                }
                Ok(_) => false,
                Err(err) => {
                    log::error!("Could not start game: {}", err);
                    false
                }
            },
            Restart => match self.engine.restart(utc_now()) {
                Ok(generation) => {
                    log::debug!("restarted as session {}", generation);
                    self.stop_timers();
                    self.start_clock(ctx);
                    true
                }
                Err(err) => {
                    log::error!("Could not restart game: {}", err);
                    false
                }
            },
            ChangeDifficulty(difficulty) => match self.engine.change_difficulty(difficulty) {
                Ok(_) => {
                    self.stop_timers();
                    difficulty.local_save();
                    true
                }
                Err(err) => {
                    log::error!("Could not switch to {}: {}", difficulty, err);
                    false
                }
            },
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let frame = self.engine.render(utc_now());
        let locked = !frame.input_enabled;

        let cb_card = ctx.link().callback(SelectCard);
        let cb_start = ctx.link().callback(|_: MouseEvent| Start);
        let cb_restart = ctx.link().callback(|_: MouseEvent| Restart);
        let cb_difficulty = ctx.link().batch_callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            match select.value().parse() {
                Ok(difficulty) => Some(ChangeDifficulty(difficulty)),
                Err(err) => {
                    log::warn!("unexpected difficulty {:?}: {}", select.value(), err);
                    None
                }
            }
        });

        let board_class = classes!("mg-board", frame.board_disabled.then_some("is-disabled"));

        html! {
            <div class="memory-game">
                <div class="mg-controls">
                    <select id="mgDifficulty" onchange={cb_difficulty}>
                        {
                            for Difficulty::ALL.into_iter().map(|difficulty| html! {
                                <option value={difficulty.name()} selected={difficulty == frame.difficulty}>
                                    {difficulty.label()}
                                </option>
                            })
                        }
                    </select>
                    <button id="mgStartBtn" disabled={!frame.start_enabled} onclick={cb_start}>{"Start"}</button>
                    <button id="mgRestartBtn" disabled={!frame.restart_enabled} onclick={cb_restart}>{"Restart"}</button>
                </div>
                <div class="mg-stats">
                    <span>{"Moves: "}<strong id="mgMoves">{frame.move_count}</strong></span>
                    <span>{"Matches: "}<strong id="mgMatches">{frame.match_count}</strong>{" / "}{frame.pair_count}</span>
                    <span>{"Time: "}<strong id="mgTime">{frame.elapsed.clone()}</strong></span>
                </div>
                <div id="mgBest">{frame.best_scores_line()}</div>
                <div id="mgBoard" class={board_class} style={board_style(frame.grid)}>
                    {
                        for frame.cards.iter().map(|&view| html! {
                            <CardTile {view} {locked} callback={cb_card.clone()}/>
                        })
                    }
                </div>
                if frame.show_win_banner {
                    <div id="mgWin" class="mg-win">
                        {"You matched every pair in "}{frame.move_count}{" moves!"}
                        if frame.new_best {
                            <strong>{" New best!"}</strong>
                        }
                    </div>
                }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn board_style_uses_grid_shape() {
        assert_eq!(
            board_style(Difficulty::Hard.grid_shape()),
            "grid-template-columns: repeat(6, 1fr); grid-template-rows: repeat(4, 1fr);"
        );
    }

    #[test]
    fn args_parse_from_location_hash() {
        let props = crate::Args::try_parse_from("#--seed=42&-d&hard".split(['#', '&']))
            .map(|args| args.game)
            .unwrap();

        assert_eq!(props.seed, Some(42));
        assert_eq!(props.difficulty, Some(Difficulty::Hard));
    }

    #[test]
    fn selected_difficulty_has_its_own_storage_key() {
        assert_eq!(<Difficulty as StorageKey>::KEY, "pairflip:difficulty");
    }
}
