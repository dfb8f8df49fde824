use crate::card::CardView;
use crate::share;
use crate::storage::BrowserStore;
use crate::utils::*;
use gloo::timers::callback::{Interval, Timeout};
use memory_match_core as game;
use game::{Difficulty, HideTask, Intent, MatchEngine, Position, SessionId, WinSummary};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Flip(Position),
    Tick(SessionId),
    HideMismatch(HideTask),
    NewGame,
    ChangeDifficulty(Difficulty),
    CloseDialog,
    Share,
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub difficulty: Difficulty,
    /// Seed of the first deal, later deals are always random
    #[prop_or_default]
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    engine: MatchEngine<BrowserStore>,
    dialog_open: bool,
    tick_interval: Option<Interval>,
    hide_timeout: Option<Timeout>,
}

impl GameView {
    /// Drops the tick source and the pending hide, which cancels both.
    fn cancel_scheduled(&mut self) {
        self.tick_interval = None;
        self.hide_timeout = None;
    }

    fn new_game(&mut self, ctx: &Context<Self>, difficulty: Difficulty) -> bool {
        self.cancel_scheduled();
        let generator = game::RandomDeckGenerator::new(js_random_seed());
        match self.engine.new_game(difficulty, generator) {
            Ok(intents) => self.apply(ctx, intents),
            Err(err) => {
                log::error!("could not deal a {} game: {}", difficulty, err);
                false
            }
        }
    }

    /// Applies engine intents, returns whether anything needs a re-render.
    fn apply(&mut self, ctx: &Context<Self>, intents: Vec<Intent>) -> bool {
        let updated = !intents.is_empty();

        for intent in intents {
            log::trace!("intent: {:?}", intent);
            match intent {
                Intent::StartTimer(session) => {
                    let link = ctx.link().clone();
                    self.tick_interval = Some(Interval::new(game::TICK_INTERVAL_MS, move || {
                        link.send_message(Msg::Tick(session))
                    }));
                }
                Intent::StopTimer => {
                    self.tick_interval = None;
                }
                Intent::ScheduleHide(task) => {
                    let link = ctx.link().clone();
                    self.hide_timeout = Some(Timeout::new(task.delay_ms, move || {
                        link.send_message(Msg::HideMismatch(task))
                    }));
                }
                Intent::Dealt { .. } => {
                    self.dialog_open = false;
                }
                Intent::Won(_) => {
                    self.dialog_open = true;
                }
                Intent::CardChanged { .. }
                | Intent::MovesChanged(_)
                | Intent::TimeChanged(_)
                | Intent::BestTimeChanged(_) => {}
            }
        }

        updated
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let GameProps { difficulty, seed } = ctx.props().clone();
        let generator = game::RandomDeckGenerator::new(seed.unwrap_or_else(js_random_seed));
        let engine = MatchEngine::new(BrowserStore::open(), difficulty, generator)
            .expect("Could not deal the first game");

        Self {
            engine,
            dialog_open: false,
            tick_interval: None,
            hide_timeout: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Flip(position) => match self.engine.flip(position) {
                Ok(transition) => {
                    log::debug!("flip {}: {:?}", position, transition.outcome);
                    self.apply(ctx, transition.intents)
                }
                Err(err) => {
                    log::error!("flip {} rejected: {}", position, err);
                    false
                }
            },
            Tick(session) => {
                let intents = self.engine.tick(session);
                self.apply(ctx, intents)
            }
            HideMismatch(task) => {
                self.hide_timeout = None;
                let intents = self.engine.resolve_mismatch(task);
                self.apply(ctx, intents)
            }
            NewGame => self.new_game(ctx, self.engine.difficulty()),
            ChangeDifficulty(difficulty) => {
                log::debug!("difficulty changed to {}", difficulty);
                self.new_game(ctx, difficulty)
            }
            CloseDialog => std::mem::replace(&mut self.dialog_open, false),
            Share => {
                if let Some(summary) = self.engine.win_summary() {
                    share::share_summary(&summary);
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let difficulty = self.engine.difficulty();
        let locked =
            self.engine.round().is_input_locked() || self.engine.state().is_finished();
        let moves = self.engine.move_count().to_string();
        let elapsed_time = self.engine.elapsed_secs().to_string();
        let best_time = format_best(self.engine.best_secs());

        let cb_flip = ctx.link().callback(Msg::Flip);
        let cb_restart = ctx.link().callback(|_: MouseEvent| Msg::NewGame);
        let cb_play_again = ctx.link().callback(|_: ()| Msg::NewGame);
        let cb_close = ctx.link().callback(|_: ()| Msg::CloseDialog);
        let cb_share = ctx.link().callback(|_: ()| Msg::Share);
        let cb_difficulty = ctx.link().batch_callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            match select.value().parse::<Difficulty>() {
                Ok(difficulty) => Some(Msg::ChangeDifficulty(difficulty)),
                Err(err) => {
                    log::warn!("ignoring difficulty {:?}: {}", select.value(), err);
                    None
                }
            }
        });

        let grid_style = format!(
            "grid-template-columns: repeat({}, 1fr)",
            difficulty.columns()
        );

        html! {
            <div class="memory-match">
                <nav>
                    <select aria-label="Difficulty" onchange={cb_difficulty}>
                        {
                            for Difficulty::ALL.into_iter().map(|option| html! {
                                <option value={option.name()} selected={option == difficulty}>
                                    {option.name()}
                                </option>
                            })
                        }
                    </select>
                    <span>{"Moves: "}<output>{moves}</output></span>
                    <span>{"Time: "}<output>{elapsed_time}</output></span>
                    <span>{"Best: "}<output>{best_time}</output></span>
                    <button onclick={cb_restart}>{"Restart"}</button>
                </nav>
                <div class={classes!("grid", difficulty.layout_class())} style={grid_style}>
                    {
                        for self.engine.cards().iter().map(|&card| {
                            let callback = cb_flip.clone();
                            html! {
                                <CardView key={card.position()} {card} {locked} {callback}/>
                            }
                        })
                    }
                </div>
                <Modal>
                    <WinDialog
                        open={self.dialog_open}
                        summary={self.engine.win_summary()}
                        on_play_again={cb_play_again}
                        on_close={cb_close}
                        on_share={cb_share}
                    />
                </Modal>
            </div>
        }
    }
}

#[derive(Properties, PartialEq)]
struct WinDialogProps {
    #[prop_or_default]
    open: bool,
    summary: Option<WinSummary>,
    on_play_again: Callback<()>,
    on_close: Callback<()>,
    on_share: Callback<()>,
}

#[function_component]
fn WinDialog(props: &WinDialogProps) -> Html {
    let Some(summary) = props.summary else {
        return html! {};
    };

    let on_play_again = props.on_play_again.clone();
    let on_close = props.on_close.clone();
    let on_share = props.on_share.clone();

    html! {
        <dialog id="win" open={props.open}>
            <article>
                <h2>{"You won!"}</h2>
                <p>
                    {"Time: "}<strong>{summary.elapsed_secs}{"s"}</strong>
                    {" · Moves: "}<strong>{summary.move_count}</strong>
                </p>
                if summary.new_record {
                    <p>{"New best time!"}</p>
                } else {
                    <p>{"Best: "}{format_best(summary.best_secs)}</p>
                }
                <footer>
                    <button onclick={move |_| on_share.emit(())}>{"Share"}</button>
                    <button onclick={move |_| on_close.emit(())}>{"Close"}</button>
                    <button onclick={move |_| on_play_again.emit(())}>{"Play again"}</button>
                </footer>
            </article>
        </dialog>
    }
}
