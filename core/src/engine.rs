use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    OneFlipped,
    Resolving,
    Won,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

/// Mutable state of one dealt game.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundState {
    first: Option<Position>,
    second: Option<Position>,
    input_locked: bool,
    move_count: u32,
    matched_pairs: PairCount,
    timer: Timer,
    started: bool,
}

impl RoundState {
    pub const fn first(&self) -> Option<Position> {
        self.first
    }

    pub const fn second(&self) -> Option<Position> {
        self.second
    }

    pub const fn is_input_locked(&self) -> bool {
        self.input_locked
    }

    pub const fn move_count(&self) -> u32 {
        self.move_count
    }

    pub const fn matched_pairs(&self) -> PairCount {
        self.matched_pairs
    }

    pub const fn elapsed_secs(&self) -> u32 {
        self.timer.elapsed_secs()
    }

    pub const fn timer(&self) -> Timer {
        self.timer
    }

    pub const fn is_started(&self) -> bool {
        self.started
    }
}

/// Final numbers of a won game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WinSummary {
    pub difficulty: Difficulty,
    pub elapsed_secs: u32,
    pub move_count: u32,
    pub best_secs: Option<u32>,
    pub new_record: bool,
}

impl WinSummary {
    pub fn share_text(&self) -> String {
        format!(
            "I beat Memory Match ({}) in {}s with {} moves!",
            self.difficulty, self.elapsed_secs, self.move_count
        )
    }
}

/// Change the presentation layer has to apply, or deferred work it has to schedule.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Dealt {
        session: SessionId,
        difficulty: Difficulty,
    },
    CardChanged {
        position: Position,
        state: CardState,
    },
    MovesChanged(u32),
    TimeChanged(u32),
    BestTimeChanged(Option<u32>),
    /// Start a repeating tick every [`TICK_INTERVAL_MS`] feeding [`MatchEngine::tick`].
    StartTimer(SessionId),
    StopTimer,
    /// Call [`MatchEngine::resolve_mismatch`] with the task after its delay.
    ScheduleHide(HideTask),
    Won(WinSummary),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    NoChange,
    Flipped,
    Matched,
    Mismatched(HideTask),
    Won(WinSummary),
}

impl FlipOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub outcome: FlipOutcome,
    pub intents: Vec<Intent>,
}

impl Transition {
    fn new(outcome: FlipOutcome, intents: Vec<Intent>) -> Self {
        Self { outcome, intents }
    }

    fn unchanged() -> Self {
        Self::new(FlipOutcome::NoChange, Vec::new())
    }
}

/// Game controller: owns the deck and the round state and applies flip intents to them.
#[derive(Clone, Debug)]
pub struct MatchEngine<S> {
    difficulty: Difficulty,
    deck: Deck,
    round: RoundState,
    session: SessionId,
    pending_hide: Option<HideTask>,
    best_times: BestTimes<S>,
    best_secs: Option<u32>,
    win: Option<WinSummary>,
}

impl<S: KeyValueStore> MatchEngine<S> {
    pub fn new(store: S, difficulty: Difficulty, generator: impl DeckGenerator) -> Result<Self> {
        let deck = deal(difficulty, generator)?;
        let best_times = BestTimes::new(store);
        let best_secs = best_times.load(difficulty);

        Ok(Self {
            difficulty,
            deck,
            round: RoundState::default(),
            session: SessionId::default(),
            pending_hide: None,
            best_times,
            best_secs,
            win: None,
        })
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn cards(&self) -> &[Card] {
        self.deck.cards()
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn move_count(&self) -> u32 {
        self.round.move_count
    }

    pub fn matched_pairs(&self) -> PairCount {
        self.round.matched_pairs
    }

    pub fn total_pairs(&self) -> PairCount {
        self.deck.pairs()
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.round.elapsed_secs()
    }

    pub fn best_secs(&self) -> Option<u32> {
        self.best_secs
    }

    pub fn pending_hide(&self) -> Option<HideTask> {
        self.pending_hide
    }

    pub fn win_summary(&self) -> Option<WinSummary> {
        self.win
    }

    pub fn best_times(&self) -> &BestTimes<S> {
        &self.best_times
    }

    pub fn state(&self) -> EngineState {
        if self.win.is_some() {
            EngineState::Won
        } else if self.round.input_locked {
            EngineState::Resolving
        } else if self.round.first.is_some() {
            EngineState::OneFlipped
        } else {
            EngineState::Idle
        }
    }

    /// Throws away the current game, whatever its state, and deals a fresh one.
    ///
    /// Pending hide tasks and ticks of the previous game are invalidated. The
    /// current game is kept when the deal itself fails.
    pub fn new_game(
        &mut self,
        difficulty: Difficulty,
        generator: impl DeckGenerator,
    ) -> Result<Vec<Intent>> {
        let deck = deal(difficulty, generator)?;
        let mut intents = Vec::new();

        if self.round.timer.stop() {
            intents.push(Intent::StopTimer);
        }
        if let Some(task) = self.pending_hide.take() {
            log::debug!("dropping pending hide {:?}", task);
        }

        self.session = self.session.next();
        self.difficulty = difficulty;
        self.deck = deck;
        self.round = RoundState::default();
        self.win = None;
        self.best_secs = self.best_times.load(difficulty);

        log::debug!(
            "new {} game ({} cards), session {:?}",
            difficulty,
            self.deck.len(),
            self.session
        );

        intents.extend([
            Intent::Dealt {
                session: self.session,
                difficulty,
            },
            Intent::MovesChanged(0),
            Intent::TimeChanged(0),
            Intent::BestTimeChanged(self.best_secs),
        ]);
        Ok(intents)
    }

    pub fn flip(&mut self, position: Position) -> Result<Transition> {
        let position = self.deck.validate_position(position)?;

        match self.state() {
            EngineState::Won => {
                log::trace!("flip {} ignored, game is over", position);
                return Ok(Transition::unchanged());
            }
            EngineState::Resolving => {
                log::trace!("flip {} ignored, input locked", position);
                return Ok(Transition::unchanged());
            }
            EngineState::Idle | EngineState::OneFlipped => {}
        }

        if self.deck[position].state() != CardState::Hidden {
            log::trace!("flip {} ignored, card is face up", position);
            return Ok(Transition::unchanged());
        }

        let mut intents = Vec::new();
        if self.round.timer.start() {
            self.round.started = true;
            intents.push(Intent::StartTimer(self.session));
        }
        self.set_card(position, CardState::Flipped, &mut intents);

        let Some(first) = self.round.first else {
            self.round.first = Some(position);
            return Ok(Transition::new(FlipOutcome::Flipped, intents));
        };

        self.round.second = Some(position);
        self.round.move_count = self.round.move_count.saturating_add(1);
        intents.push(Intent::MovesChanged(self.round.move_count));

        let outcome = if self.deck[first].symbol() == self.deck[position].symbol() {
            self.accept_pair(first, position, &mut intents)
        } else {
            self.reject_pair(&mut intents)
        };

        Ok(Transition::new(outcome, intents))
    }

    /// Hides a mismatched pair once its reveal delay is over.
    ///
    /// Tasks that are not the one currently pending are ignored.
    pub fn resolve_mismatch(&mut self, task: HideTask) -> Vec<Intent> {
        if self.pending_hide != Some(task) {
            log::trace!("stale hide task {:?} ignored", task);
            return Vec::new();
        }
        self.pending_hide = None;

        let mut intents = Vec::new();
        for position in [self.round.first.take(), self.round.second.take()]
            .into_iter()
            .flatten()
        {
            self.set_card(position, CardState::Hidden, &mut intents);
        }
        self.round.input_locked = false;
        intents
    }

    /// One second of play time, ticks of other sessions are ignored.
    pub fn tick(&mut self, session: SessionId) -> Vec<Intent> {
        if session != self.session {
            log::trace!("stale tick from {:?} ignored", session);
            return Vec::new();
        }

        self.round
            .timer
            .tick()
            .map(Intent::TimeChanged)
            .into_iter()
            .collect()
    }

    fn accept_pair(
        &mut self,
        first: Position,
        second: Position,
        intents: &mut Vec<Intent>,
    ) -> FlipOutcome {
        self.set_card(first, CardState::Matched, intents);
        self.set_card(second, CardState::Matched, intents);
        self.round.first = None;
        self.round.second = None;
        self.round.matched_pairs += 1;

        if self.round.matched_pairs == self.deck.pairs() {
            FlipOutcome::Won(self.finish(intents))
        } else {
            FlipOutcome::Matched
        }
    }

    fn reject_pair(&mut self, intents: &mut Vec<Intent>) -> FlipOutcome {
        self.round.input_locked = true;
        let task = HideTask {
            session: self.session,
            move_number: self.round.move_count,
            delay_ms: MISMATCH_HIDE_DELAY_MS,
        };
        self.pending_hide = Some(task);
        intents.push(Intent::ScheduleHide(task));
        FlipOutcome::Mismatched(task)
    }

    fn finish(&mut self, intents: &mut Vec<Intent>) -> WinSummary {
        if self.round.timer.stop() {
            intents.push(Intent::StopTimer);
        }

        let elapsed_secs = self.round.elapsed_secs();
        let new_record = self
            .best_times
            .record_if_better(self.difficulty, elapsed_secs);
        self.best_secs = self.best_times.load(self.difficulty);

        let summary = WinSummary {
            difficulty: self.difficulty,
            elapsed_secs,
            move_count: self.round.move_count,
            best_secs: self.best_secs,
            new_record,
        };
        self.win = Some(summary);
        log::info!(
            "won {} in {}s with {} moves",
            self.difficulty,
            elapsed_secs,
            summary.move_count
        );

        intents.push(Intent::BestTimeChanged(self.best_secs));
        intents.push(Intent::Won(summary));
        summary
    }

    fn set_card(&mut self, position: Position, state: CardState, intents: &mut Vec<Intent>) {
        self.deck.set_state(position, state);
        intents.push(Intent::CardChanged { position, state });
    }
}

fn deal(difficulty: Difficulty, generator: impl DeckGenerator) -> Result<Deck> {
    let pairs = difficulty.validate()?.pairs();
    let deck = generator.generate(pairs)?;
    if deck.is_empty() || deck.pairs() != pairs {
        return Err(GameError::InvalidDeck);
    }
    Ok(deck)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 🐶 🦊 🐸 🐸 🐶 🦊, then the remaining pairs side by side.
    const EASY_LAYOUT: [u8; 16] = [0, 2, 9, 9, 0, 2, 1, 1, 3, 3, 4, 4, 5, 5, 6, 6];
    const EASY_PAIRS: [(Position, Position); 8] = [
        (0, 4),
        (1, 5),
        (2, 3),
        (6, 7),
        (8, 9),
        (10, 11),
        (12, 13),
        (14, 15),
    ];

    fn easy_deck() -> PresetDeckGenerator {
        PresetDeckGenerator::new(EASY_LAYOUT.iter().map(|&i| Symbol::new(i).unwrap()))
    }

    fn easy_engine() -> MatchEngine<MemoryStore> {
        MatchEngine::new(MemoryStore::default(), Difficulty::Easy, easy_deck()).unwrap()
    }

    fn play_easy(engine: &mut MatchEngine<MemoryStore>, secs: u32) -> Transition {
        let session = engine.session();
        engine.flip(0).unwrap();
        for _ in 0..secs {
            engine.tick(session);
        }
        let mut last = Transition::unchanged();
        for (i, &(a, b)) in EASY_PAIRS.iter().enumerate() {
            if i > 0 {
                engine.flip(a).unwrap();
            }
            last = engine.flip(b).unwrap();
        }
        last
    }

    #[test]
    fn mismatch_locks_input_until_hidden_again() {
        let mut engine = easy_engine();

        assert_eq!(engine.flip(0).unwrap().outcome, FlipOutcome::Flipped);
        assert_eq!(engine.state(), EngineState::OneFlipped);

        let transition = engine.flip(1).unwrap();
        let FlipOutcome::Mismatched(task) = transition.outcome else {
            panic!("expected a mismatch, got {:?}", transition.outcome);
        };
        assert_eq!(task.delay_ms, 700);
        assert!(transition.intents.contains(&Intent::ScheduleHide(task)));
        assert_eq!(engine.move_count(), 1);
        assert_eq!(engine.state(), EngineState::Resolving);

        assert_eq!(engine.flip(2).unwrap(), Transition::unchanged());
        assert_eq!(engine.cards()[2].state(), CardState::Hidden);
        assert_eq!(engine.move_count(), 1);

        let intents = engine.resolve_mismatch(task);
        assert_eq!(
            intents,
            [
                Intent::CardChanged {
                    position: 0,
                    state: CardState::Hidden
                },
                Intent::CardChanged {
                    position: 1,
                    state: CardState::Hidden
                },
            ]
        );
        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(engine.matched_pairs(), 0);
        assert!(engine.cards().iter().all(|c| c.state() == CardState::Hidden));

        assert!(engine.resolve_mismatch(task).is_empty());
    }

    #[test]
    fn matching_pair_stays_revealed() {
        let mut engine = easy_engine();

        engine.flip(2).unwrap();
        let transition = engine.flip(3).unwrap();

        assert_eq!(transition.outcome, FlipOutcome::Matched);
        assert!(!transition
            .intents
            .iter()
            .any(|intent| matches!(intent, Intent::ScheduleHide(_))));
        assert_eq!(engine.cards()[2].state(), CardState::Matched);
        assert_eq!(engine.cards()[3].state(), CardState::Matched);
        assert_eq!(engine.matched_pairs(), 1);
        assert_eq!(engine.move_count(), 1);
        assert!(!engine.round().is_input_locked());
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[test]
    fn face_up_cards_ignore_flips() {
        let mut engine = easy_engine();

        engine.flip(0).unwrap();
        assert_eq!(engine.flip(0).unwrap(), Transition::unchanged());
        assert_eq!(engine.round().first(), Some(0));
        assert_eq!(engine.move_count(), 0);

        engine.flip(4).unwrap();
        assert_eq!(engine.flip(4).unwrap(), Transition::unchanged());
        assert_eq!(engine.cards()[4].state(), CardState::Matched);
        assert_eq!(engine.move_count(), 1);
    }

    #[test]
    fn timer_starts_once_on_first_flip() {
        let mut engine = easy_engine();
        let session = engine.session();

        assert!(engine.tick(session).is_empty());
        assert!(!engine.round().is_started());

        let first = engine.flip(2).unwrap();
        assert!(first.intents.contains(&Intent::StartTimer(session)));
        assert!(engine.round().is_started());

        let second = engine.flip(3).unwrap();
        assert!(!second
            .intents
            .iter()
            .any(|intent| matches!(intent, Intent::StartTimer(_))));

        assert_eq!(engine.tick(session), [Intent::TimeChanged(1)]);
        assert_eq!(engine.elapsed_secs(), 1);
    }

    #[test]
    fn winning_records_best_time_only_when_better() {
        let mut engine = easy_engine();

        let last = play_easy(&mut engine, 42);
        let FlipOutcome::Won(summary) = last.outcome else {
            panic!("expected a win, got {:?}", last.outcome);
        };
        assert_eq!(summary.elapsed_secs, 42);
        assert_eq!(summary.move_count, 8);
        assert_eq!(summary.best_secs, Some(42));
        assert!(summary.new_record);
        assert!(last.intents.contains(&Intent::StopTimer));
        assert_eq!(
            last.intents
                .iter()
                .filter(|intent| matches!(intent, Intent::Won(_)))
                .count(),
            1
        );
        assert_eq!(engine.state(), EngineState::Won);
        assert_eq!(
            engine.best_times().store().get("mm_best_time_easy").as_deref(),
            Some("42")
        );

        // nothing moves once the game is won
        assert!(engine.tick(engine.session()).is_empty());
        assert_eq!(engine.flip(0).unwrap(), Transition::unchanged());

        engine.new_game(Difficulty::Easy, easy_deck()).unwrap();
        assert_eq!(engine.best_secs(), Some(42));

        let last = play_easy(&mut engine, 50);
        let FlipOutcome::Won(summary) = last.outcome else {
            panic!("expected a win, got {:?}", last.outcome);
        };
        assert!(!summary.new_record);
        assert_eq!(summary.best_secs, Some(42));
        assert_eq!(
            engine.best_times().store().get("mm_best_time_easy").as_deref(),
            Some("42")
        );
    }

    #[test]
    fn share_text_names_difficulty_time_and_moves() {
        let summary = WinSummary {
            difficulty: Difficulty::Hard,
            elapsed_secs: 97,
            move_count: 31,
            best_secs: Some(90),
            new_record: false,
        };
        assert_eq!(
            summary.share_text(),
            "I beat Memory Match (hard) in 97s with 31 moves!"
        );
    }

    #[test]
    fn new_game_resets_round_and_resizes_deck() {
        let mut engine = easy_engine();
        let old_session = engine.session();

        engine.flip(2).unwrap();
        engine.flip(3).unwrap();
        engine.tick(old_session);

        let intents = engine
            .new_game(Difficulty::Medium, RandomDeckGenerator::new(3))
            .unwrap();

        assert_eq!(intents[0], Intent::StopTimer);
        assert!(intents.contains(&Intent::MovesChanged(0)));
        assert!(intents.contains(&Intent::TimeChanged(0)));
        assert_ne!(engine.session(), old_session);
        assert_eq!(engine.difficulty(), Difficulty::Medium);
        assert_eq!(engine.cards().len(), 24);
        assert_eq!(engine.total_pairs(), 12);
        assert_eq!(engine.round(), &RoundState::default());
        assert_eq!(engine.state(), EngineState::Idle);
        assert!(engine.cards().iter().all(|c| c.state() == CardState::Hidden));
    }

    #[test]
    fn callbacks_from_a_previous_game_are_ignored() {
        let mut engine = easy_engine();
        let old_session = engine.session();

        engine.flip(0).unwrap();
        let FlipOutcome::Mismatched(task) = engine.flip(1).unwrap().outcome else {
            panic!("expected a mismatch");
        };

        engine.new_game(Difficulty::Easy, easy_deck()).unwrap();
        engine.flip(0).unwrap();

        assert!(engine.resolve_mismatch(task).is_empty());
        assert!(engine.tick(old_session).is_empty());
        assert_eq!(engine.cards()[0].state(), CardState::Flipped);
        assert_eq!(engine.round().first(), Some(0));
        assert_eq!(engine.elapsed_secs(), 0);
    }

    #[test]
    fn new_game_from_won_state_is_playable() {
        let mut engine = easy_engine();
        play_easy(&mut engine, 1);
        assert!(engine.state().is_finished());

        engine.new_game(Difficulty::Hard, RandomDeckGenerator::new(9)).unwrap();

        assert!(!engine.state().is_finished());
        assert_eq!(engine.win_summary(), None);
        assert_eq!(engine.cards().len(), 36);
        assert_eq!(engine.flip(0).unwrap().outcome, FlipOutcome::Flipped);
    }

    #[test]
    fn failed_deal_keeps_the_current_game() {
        let mut engine = easy_engine();
        engine.flip(2).unwrap();

        let err = engine.new_game(Difficulty::Medium, easy_deck()).unwrap_err();

        assert_eq!(err, GameError::InvalidDeck);
        assert_eq!(engine.difficulty(), Difficulty::Easy);
        assert_eq!(engine.round().first(), Some(2));
    }

    #[test]
    fn out_of_range_flip_is_an_error() {
        let mut engine = easy_engine();
        assert_eq!(engine.flip(16), Err(GameError::InvalidPosition));
    }
}
