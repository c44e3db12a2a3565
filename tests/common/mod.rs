//! Shared fixtures for integration tests: board and player helpers and a
//! handful of fake decision makers.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rust_evo::rules::attackable_targets;
use rust_evo::{
    Dealer, DealerConfig, Deck, DecisionError, DecisionMaker, FeedDecision, PlayerId, PlayerState,
    SpeciesBoard, SpeciesList, TraitName, TurnAction,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn board(food: u32, body: u32, population: u32, traits: &[TraitName]) -> SpeciesBoard {
    SpeciesBoard::builder()
        .food(food)
        .body(body)
        .population(population)
        .trait_names(traits.iter().copied())
        .build()
        .unwrap()
}

pub fn player(id: u32, boards: Vec<SpeciesBoard>) -> PlayerState {
    PlayerState::builder(PlayerId::new(id)).boards(boards).build().unwrap()
}

/// Config for hand-built tables of any size.
pub fn test_config() -> DealerConfig {
    DealerConfig::default()
        .with_player_range(1, 8)
        .with_response_timeout(Duration::from_secs(5))
}

/// The first `n` cards of a sorted deck.
pub fn small_deck(n: usize) -> Deck {
    Deck::from_cards(Deck::full().iter().take(n).copied())
}

pub fn seat(state: PlayerState, maker: impl DecisionMaker + 'static) -> (PlayerState, Box<dyn DecisionMaker>) {
    (state, Box::new(maker))
}

/// Seat `seats` at a table with the given watering hole and deck.
pub fn dealer(seats: Vec<(PlayerState, Box<dyn DecisionMaker>)>, water_hole: u32, deck: Deck) -> Dealer {
    seats
        .into_iter()
        .fold(Dealer::builder(test_config()), |b, (state, maker)| b.seat(state, maker))
        .water_hole(water_hole)
        .deck(deck)
        .build()
        .unwrap()
}

/// Counts how often it was asked to feed.
#[derive(Clone, Default)]
pub struct Calls(Arc<AtomicUsize>);

impl Calls {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Plays its first card as food and never feeds by choice.
pub struct Passive;

impl DecisionMaker for Passive {
    fn name(&self) -> String {
        "passive".into()
    }

    fn choose(&mut self, _before: &[SpeciesList], _after: &[SpeciesList]) -> Result<TurnAction, DecisionError> {
        Ok(TurnAction::new(0))
    }

    fn feed_next(
        &mut self,
        _me: &PlayerState,
        _others: &[SpeciesList],
        _water_hole: u32,
    ) -> Result<FeedDecision, DecisionError> {
        Ok(FeedDecision::Nothing)
    }
}

/// Answers feed queries from a script, then `Nothing`.
pub struct Scripted {
    feeds: VecDeque<FeedDecision>,
    calls: Calls,
}

impl Scripted {
    pub fn new(feeds: impl IntoIterator<Item = FeedDecision>) -> (Self, Calls) {
        let calls = Calls::default();
        let maker = Self {
            feeds: feeds.into_iter().collect(),
            calls: calls.clone(),
        };
        (maker, calls)
    }
}

impl DecisionMaker for Scripted {
    fn name(&self) -> String {
        "scripted".into()
    }

    fn choose(&mut self, _before: &[SpeciesList], _after: &[SpeciesList]) -> Result<TurnAction, DecisionError> {
        Ok(TurnAction::new(0))
    }

    fn feed_next(
        &mut self,
        _me: &PlayerState,
        _others: &[SpeciesList],
        _water_hole: u32,
    ) -> Result<FeedDecision, DecisionError> {
        self.calls.bump();
        Ok(self.feeds.pop_front().unwrap_or(FeedDecision::Nothing))
    }
}

/// Plays like `Passive` and counts the notices it receives. With
/// `refuse` set it fails every turn action.
pub struct Recorder {
    pub starts: Calls,
    pub game_overs: Calls,
    pub refuse: bool,
}

impl Recorder {
    pub fn new(refuse: bool) -> (Self, Calls, Calls) {
        let (starts, game_overs) = (Calls::default(), Calls::default());
        let maker = Self {
            starts: starts.clone(),
            game_overs: game_overs.clone(),
            refuse,
        };
        (maker, starts, game_overs)
    }
}

impl DecisionMaker for Recorder {
    fn name(&self) -> String {
        "recorder".into()
    }

    fn start(&mut self, _water_hole: u32, _me: &PlayerState) {
        self.starts.bump();
    }

    fn choose(&mut self, _before: &[SpeciesList], _after: &[SpeciesList]) -> Result<TurnAction, DecisionError> {
        if self.refuse {
            return Err(DecisionError::new("refused"));
        }
        Ok(TurnAction::new(0))
    }

    fn feed_next(
        &mut self,
        _me: &PlayerState,
        _others: &[SpeciesList],
        _water_hole: u32,
    ) -> Result<FeedDecision, DecisionError> {
        Ok(FeedDecision::Nothing)
    }

    fn game_over(&mut self) {
        self.game_overs.bump();
    }
}

/// Wait up to two seconds for a worker thread to bump `calls` to `n`.
pub fn wait_for(calls: &Calls, n: usize) -> bool {
    for _ in 0..200 {
        if calls.count() >= n {
            return true;
        }
        thread::sleep(Duration::from_millis(10));
    }
    calls.count() >= n
}

/// Fails every query.
pub struct Failing;

impl DecisionMaker for Failing {
    fn name(&self) -> String {
        "failing".into()
    }

    fn choose(&mut self, _before: &[SpeciesList], _after: &[SpeciesList]) -> Result<TurnAction, DecisionError> {
        Err(DecisionError::new("no"))
    }

    fn feed_next(
        &mut self,
        _me: &PlayerState,
        _others: &[SpeciesList],
        _water_hole: u32,
    ) -> Result<FeedDecision, DecisionError> {
        Err(DecisionError::new("no"))
    }
}

/// Sleeps before every answer.
pub struct Slow(pub Duration);

impl DecisionMaker for Slow {
    fn name(&self) -> String {
        "slow".into()
    }

    fn choose(&mut self, _before: &[SpeciesList], _after: &[SpeciesList]) -> Result<TurnAction, DecisionError> {
        thread::sleep(self.0);
        Ok(TurnAction::new(0))
    }

    fn feed_next(
        &mut self,
        _me: &PlayerState,
        _others: &[SpeciesList],
        _water_hole: u32,
    ) -> Result<FeedDecision, DecisionError> {
        thread::sleep(self.0);
        Ok(FeedDecision::Nothing)
    }
}

/// Grows its first board and takes the first legal feed it finds.
pub struct Greedy;

impl DecisionMaker for Greedy {
    fn name(&self) -> String {
        "greedy".into()
    }

    fn choose(&mut self, _before: &[SpeciesList], _after: &[SpeciesList]) -> Result<TurnAction, DecisionError> {
        // Every player holds at least four cards when asked.
        Ok(TurnAction::new(0).grow_population(1, 0).grow_body(2, 0))
    }

    fn feed_next(
        &mut self,
        me: &PlayerState,
        others: &[SpeciesList],
        _water_hole: u32,
    ) -> Result<FeedDecision, DecisionError> {
        for (idx, b) in me.boards().iter().enumerate() {
            if b.can_store_more() {
                return Ok(FeedDecision::FatTissue {
                    board: idx,
                    tokens: b.fat_need(),
                });
            }
            if b.is_vegetarian() && b.can_eat_more() {
                return Ok(FeedDecision::Vegetarian { board: idx });
            }
            if b.is_carnivore() && b.can_eat_more() {
                if let Some(target) = attackable_targets(b, others).first() {
                    return Ok(FeedDecision::Carnivore {
                        attacker: idx,
                        victim_owner: target.owner,
                        victim: target.board,
                    });
                }
            }
        }
        Ok(FeedDecision::Nothing)
    }
}
