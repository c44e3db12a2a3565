//! The dealer: round state machine and protocol enforcement.
//!
//! ## Round
//!
//! ```text
//! Action   -> deal, collect one TurnAction per player, apply them,
//!             round-start effects (fertile, long neck, fat tissue)
//! Feeding  -> one FeedStep per call until the watering hole or the
//!             feed order runs out
//! Cleanup  -> starve, bank food, next round
//! ```
//!
//! The termination test runs at the top of `Action`. A player that answers
//! late, not at all, or illegally is removed on the spot and the round
//! carries on without it.
//!
//! ## Entry points
//!
//! `run_game` plays to the end. `step`, `apply_turn_actions`, and
//! `feed_step` expose the same machinery one piece at a time for replay
//! and tests.

use log::{debug, info, trace, warn};
use rustc_hash::FxHashMap;

use super::{Configuration, FeedOrder, FeedStep, GameOutcome, Phase};
use crate::cards::Deck;
use crate::core::{DealerConfig, EvoError, GameRng, Result, WaterHole};
use crate::external::{DecisionMaker, PlayerHandle};
use crate::feed::{AutoFeed, FeedStatus, FeedTable};
use crate::player::{format_rankings, rank, PlayerId, PlayerScore, PlayerState};
use crate::rules::Trigger;
use crate::species::SpeciesList;
use crate::turn::{self, TurnAction};

/// Runs one game of Evolution.
pub struct Dealer {
    config: DealerConfig,
    players: Vec<PlayerState>,
    handles: FxHashMap<PlayerId, PlayerHandle>,
    deck: Deck,
    water_hole: WaterHole,
    feed_order: FeedOrder,
    phase: Phase,
    round: u32,
    outcome: Option<GameOutcome>,
}

impl Dealer {
    #[must_use]
    pub fn builder(config: DealerConfig) -> DealerBuilder {
        DealerBuilder::new(config)
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &DealerConfig {
        &self.config
    }

    /// Players still at the table, in table order.
    #[must_use]
    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.id() == id)
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub const fn water_hole(&self) -> WaterHole {
        self.water_hole
    }

    #[must_use]
    pub fn feed_order(&self) -> &FeedOrder {
        &self.feed_order
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Completed rounds.
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Set once the game is over.
    #[must_use]
    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    /// Snapshot of the table. Meaningful between rounds.
    #[must_use]
    pub fn configuration(&self) -> Configuration {
        Configuration {
            players: self.players.clone(),
            water_hole: self.water_hole,
            deck: self.deck.clone(),
        }
    }

    /// No players left, or not enough cards to deal another round.
    #[must_use]
    pub fn is_over(&self) -> bool {
        let needed: usize = self.players.iter().map(PlayerState::cards_needed).sum();
        self.players.is_empty() || self.deck.len() <= needed
    }

    // === Driving the game ===

    /// Play until the game ends.
    pub fn run_game(&mut self) -> GameOutcome {
        info!(
            "Starting game: {} players, {} cards",
            self.players.len(),
            self.deck.len()
        );
        while self.phase != Phase::GameOver {
            self.step();
        }
        self.outcome.clone().unwrap_or(GameOutcome::NoPlayers)
    }

    /// Advance by one unit of work and return the phase afterwards.
    ///
    /// `Action` runs the whole action phase, `Feeding` runs a single feed
    /// step, `Cleanup` closes the round. `GameOver` does nothing.
    pub fn step(&mut self) -> Phase {
        match self.phase {
            Phase::Action => {
                if self.is_over() {
                    self.finish();
                } else {
                    self.deal();
                    let actions = self.collect_actions();
                    self.apply_actions(actions);
                    self.start_feeding();
                }
            }
            Phase::Feeding => {
                if self.feeding_done() {
                    self.phase = Phase::Cleanup;
                } else {
                    self.feed_step();
                }
            }
            Phase::Cleanup => self.cleanup(),
            Phase::GameOver => {}
        }
        self.phase
    }

    /// Apply already-collected turn actions, then run the feeding phase to
    /// the end. Leaves the dealer in `Cleanup`.
    ///
    /// Players without an entry take no action. An action that fails to
    /// apply removes its player.
    pub fn apply_turn_actions(&mut self, actions: Vec<(PlayerId, TurnAction)>) {
        self.apply_actions(actions);
        self.start_feeding();
        while !self.feeding_done() {
            self.feed_step();
        }
        self.phase = Phase::Cleanup;
    }

    /// One turn of the feeding loop for the first player in the feed order.
    pub fn feed_step(&mut self) -> FeedStep {
        let Some(id) = self.feed_order.first() else {
            return FeedStep::Idle;
        };
        let Some(feeder) = self.index_of(id) else {
            self.feed_order.remove(id);
            return FeedStep::Finished(id);
        };

        let mut table = FeedTable::new(&mut self.players, feeder, &mut self.water_hole, &mut self.deck);
        if !table.can_feed() {
            trace!("{id} cannot feed");
            self.feed_order.remove(id);
            return FeedStep::Finished(id);
        }
        if table.auto_feed() == AutoFeed::Fed {
            self.feed_order.rotate();
            return FeedStep::AutoFed(id);
        }
        let others = table.other_boards();

        let me = self.players[feeder].clone();
        let tokens = self.water_hole.tokens();
        let answer = self.handle(id).and_then(|h| h.feed_next(&me, &others, tokens));
        let result = answer.and_then(|decision| {
            debug!("{id} feeds {decision:?}");
            FeedTable::new(&mut self.players, feeder, &mut self.water_hole, &mut self.deck).apply(decision)
        });

        match result {
            Ok(FeedStatus::Rotate) => {
                self.feed_order.rotate();
                FeedStep::Fed(id)
            }
            Ok(FeedStatus::Done) => {
                self.feed_order.remove(id);
                FeedStep::Declined(id)
            }
            Err(err) => {
                self.kick(id, &err);
                FeedStep::Kicked(id)
            }
        }
    }

    /// Remove a player from the table, the feed order, and the protocol.
    pub fn kick(&mut self, id: PlayerId, reason: &EvoError) {
        if reason.is_protocol_violation() {
            warn!("Kicking {id}: {reason}");
        } else {
            warn!("Kicking {id} after an engine error: {reason}");
        }
        self.players.retain(|p| p.id() != id);
        self.feed_order.remove(id);
        self.handles.remove(&id);
    }

    // === Phases ===

    fn deal(&mut self) {
        info!(
            "Round {}: {} players, {} cards in deck, water hole {}",
            self.round + 1,
            self.players.len(),
            self.deck.len(),
            self.water_hole
        );
        for player in &mut self.players {
            let cards = self.deck.draw(player.cards_needed());
            player.start_round(cards);
            if let Some(handle) = self.handles.get(&player.id()) {
                if let Err(err) = handle.start(self.water_hole.tokens(), player) {
                    debug!("{} missed round start: {err}", player.id());
                }
            }
        }
    }

    /// Ask every player for a turn action. Players that fail are removed
    /// after everyone has been asked.
    fn collect_actions(&mut self) -> Vec<(PlayerId, TurnAction)> {
        let mut chosen = Vec::with_capacity(self.players.len());
        let mut failed = Vec::new();

        for (i, player) in self.players.iter().enumerate() {
            let before: Vec<SpeciesList> = self.players[..i].iter().map(|p| p.boards().clone()).collect();
            let after: Vec<SpeciesList> = self.players[i + 1..].iter().map(|p| p.boards().clone()).collect();
            let answer = self
                .handle(player.id())
                .and_then(|h| h.choose(&before, &after))
                .and_then(|action| turn::validate(&action, player).map(|()| action));
            match answer {
                Ok(action) => {
                    trace!("{} chose {action:?}", player.id());
                    chosen.push((player.id(), action));
                }
                Err(err) => failed.push((player.id(), err)),
            }
        }

        for (id, err) in failed {
            self.kick(id, &err);
        }
        chosen
    }

    fn apply_actions(&mut self, actions: Vec<(PlayerId, TurnAction)>) {
        for (id, action) in actions {
            let Some(idx) = self.index_of(id) else {
                debug!("Dropping action for absent {id}");
                continue;
            };
            if let Err(err) = turn::apply(&action, &mut self.players[idx], &mut self.water_hole) {
                self.kick(id, &err);
            }
        }
    }

    /// Apply the round-start effects, then line every player up to feed.
    /// Moves to `Feeding`.
    pub fn start_feeding(&mut self) {
        self.feed_order = FeedOrder::new(self.players.iter().map(PlayerState::id));
        for trigger in Trigger::ROUND_START {
            for player in &mut self.players {
                player.apply_round_start(trigger, &mut self.water_hole);
            }
        }
        debug!("Feeding starts with water hole {}", self.water_hole);
        self.phase = Phase::Feeding;
    }

    fn feeding_done(&self) -> bool {
        self.water_hole.is_empty() || self.feed_order.is_empty()
    }

    fn cleanup(&mut self) {
        for player in &mut self.players {
            let banked = player.end_turn(&mut self.deck);
            trace!("{} banks {banked}", player.id());
        }
        self.feed_order.clear();
        self.round += 1;
        self.phase = Phase::Action;
    }

    fn finish(&mut self) {
        let outcome = if self.players.is_empty() {
            GameOutcome::NoPlayers
        } else {
            let scores = self
                .players
                .iter()
                .map(|p| {
                    let name = self.handles.get(&p.id()).map_or_else(String::new, |h| h.name().to_owned());
                    PlayerScore::new(p.id(), name, p.score())
                })
                .collect();
            GameOutcome::Ranked(rank(scores))
        };

        match &outcome {
            GameOutcome::NoPlayers => info!("{outcome}"),
            GameOutcome::Ranked(scores) => info!("After {} rounds\n{}", self.round, format_rankings(scores)),
        }
        for player in &self.players {
            if let Some(handle) = self.handles.get(&player.id()) {
                handle.game_over();
            }
        }
        self.outcome = Some(outcome);
        self.phase = Phase::GameOver;
    }

    // === Helpers ===

    fn index_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id() == id)
    }

    fn handle(&self, id: PlayerId) -> Result<&PlayerHandle> {
        self.handles.get(&id).ok_or(EvoError::Disconnected)
    }
}

impl std::fmt::Debug for Dealer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dealer")
            .field("phase", &self.phase)
            .field("round", &self.round)
            .field("players", &self.players)
            .field("water_hole", &self.water_hole)
            .field("deck", &self.deck.len())
            .finish_non_exhaustive()
    }
}

enum Seat {
    Fresh(PlayerId),
    Resumed(PlayerState),
}

/// Seats players and checks the table before a game starts.
///
/// ```ignore
/// let dealer = Dealer::builder(DealerConfig::default())
///     .player(Box::new(alice))
///     .player(Box::new(bob))
///     .player(Box::new(carol))
///     .build()?;
/// ```
pub struct DealerBuilder {
    config: DealerConfig,
    seats: Vec<(Seat, Box<dyn DecisionMaker>)>,
    deck: Option<Deck>,
    water_hole: WaterHole,
    resumed: bool,
}

impl DealerBuilder {
    #[must_use]
    pub fn new(config: DealerConfig) -> Self {
        Self {
            config,
            seats: Vec::new(),
            deck: None,
            water_hole: WaterHole::default(),
            resumed: false,
        }
    }

    /// Continue from a snapshot. `makers` are matched to the snapshot's
    /// players in order.
    pub fn from_configuration(
        config: DealerConfig,
        snapshot: Configuration,
        makers: Vec<Box<dyn DecisionMaker>>,
    ) -> Result<Self> {
        if makers.len() != snapshot.players.len() {
            return Err(EvoError::InvalidDealer(format!(
                "{} decision makers for {} players",
                makers.len(),
                snapshot.players.len()
            )));
        }
        let seats = snapshot
            .players
            .into_iter()
            .map(Seat::Resumed)
            .zip(makers)
            .collect();
        Ok(Self {
            config,
            seats,
            deck: Some(snapshot.deck),
            water_hole: snapshot.water_hole,
            resumed: true,
        })
    }

    /// Seat a new player with the next free id.
    #[must_use]
    pub fn player(mut self, maker: Box<dyn DecisionMaker>) -> Self {
        let id = PlayerId::new(u32::try_from(self.seats.len() + 1).unwrap_or(u32::MAX));
        self.seats.push((Seat::Fresh(id), maker));
        self
    }

    /// Seat a player with existing state.
    #[must_use]
    pub fn seat(mut self, state: PlayerState, maker: Box<dyn DecisionMaker>) -> Self {
        self.seats.push((Seat::Resumed(state), maker));
        self
    }

    /// Use this deck as-is instead of a fresh shuffled one.
    #[must_use]
    pub fn deck(mut self, deck: Deck) -> Self {
        self.deck = Some(deck);
        self
    }

    #[must_use]
    pub fn water_hole(mut self, tokens: u32) -> Self {
        self.water_hole = WaterHole::new(tokens);
        self
    }

    pub fn build(self) -> Result<Dealer> {
        let count = self.seats.len();
        let fits = if self.resumed {
            count <= self.config.max_players
        } else {
            self.config.accepts_player_count(count)
        };
        if !fits {
            return Err(EvoError::InvalidDealer(format!(
                "{count} players, need {} to {}",
                self.config.min_players, self.config.max_players
            )));
        }

        let deck = self.deck.unwrap_or_else(|| {
            let mut deck = Deck::full();
            if self.config.shuffle_deck {
                deck.shuffle(&mut GameRng::new(self.config.seed));
            }
            deck
        });

        let mut players = Vec::with_capacity(count);
        let mut makers = Vec::with_capacity(count);
        for (seat, maker) in self.seats {
            let state = match seat {
                Seat::Fresh(id) => PlayerState::new(id)?,
                Seat::Resumed(state) => state,
            };
            players.push(state);
            makers.push(maker);
        }

        let table = Configuration {
            players,
            water_hole: self.water_hole,
            deck,
        };
        table.validate(self.config.max_players)?;

        let handles = table
            .players
            .iter()
            .zip(makers)
            .map(|(p, maker)| (p.id(), PlayerHandle::spawn(maker, self.config.response_timeout)))
            .collect();

        Ok(Dealer {
            config: self.config,
            players: table.players,
            handles,
            deck: table.deck,
            water_hole: table.water_hole,
            feed_order: FeedOrder::default(),
            phase: Phase::Action,
            round: 0,
            outcome: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DecisionError;
    use crate::feed::FeedDecision;

    /// Plays the first card as food and never feeds by choice.
    struct Idle;

    impl DecisionMaker for Idle {
        fn name(&self) -> String {
            "idle".into()
        }

        fn choose(
            &mut self,
            _before: &[SpeciesList],
            _after: &[SpeciesList],
        ) -> std::result::Result<TurnAction, DecisionError> {
            Ok(TurnAction::new(0))
        }

        fn feed_next(
            &mut self,
            _me: &PlayerState,
            _others: &[SpeciesList],
            _water_hole: u32,
        ) -> std::result::Result<FeedDecision, DecisionError> {
            Ok(FeedDecision::Nothing)
        }
    }

    fn table(n: usize) -> DealerBuilder {
        (0..n).fold(Dealer::builder(DealerConfig::default()), |b, _| b.player(Box::new(Idle)))
    }

    #[test]
    fn test_player_count_checked() {
        assert!(table(2).build().is_err());
        assert!(table(9).build().is_err());
        let dealer = table(3).build().unwrap();
        let ids: Vec<_> = dealer.players().iter().map(|p| p.id().raw()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(dealer.phase(), Phase::Action);
        assert_eq!(dealer.deck().len(), crate::cards::FULL_DECK_SIZE);
    }

    #[test]
    fn test_step_through_one_round() {
        let mut dealer = table(3).build().unwrap();
        assert_eq!(dealer.step(), Phase::Feeding);
        // Each player traded one card for food and kept three.
        for p in dealer.players() {
            assert_eq!(p.hand().len(), 3);
            assert_eq!(p.boards().len(), 1);
        }
        assert_eq!(dealer.deck().len(), crate::cards::FULL_DECK_SIZE - 12);

        while dealer.step() == Phase::Feeding {}
        assert_eq!(dealer.phase(), Phase::Cleanup);
        assert_eq!(dealer.step(), Phase::Action);
        assert_eq!(dealer.round(), 1);
        assert!(dealer.feed_order().is_empty());
    }

    #[test]
    fn test_run_game_terminates() {
        let mut dealer = table(4).build().unwrap();
        let outcome = dealer.run_game();
        assert_eq!(dealer.phase(), Phase::GameOver);
        assert_eq!(outcome.rankings().len(), 4);
        assert!(dealer.is_over());
        assert_eq!(dealer.step(), Phase::GameOver);
        assert_eq!(dealer.outcome(), Some(&outcome));
    }

    #[test]
    fn test_kick() {
        let mut dealer = table(3).build().unwrap();
        dealer.kick(PlayerId::new(2), &EvoError::ProtocolTimeout);
        assert_eq!(dealer.players().len(), 2);
        assert!(dealer.player(PlayerId::new(2)).is_none());
    }

    #[test]
    fn test_configuration_round_trip() {
        let dealer = table(3).build().unwrap();
        let snapshot = dealer.configuration();
        let makers: Vec<Box<dyn DecisionMaker>> = vec![Box::new(Idle), Box::new(Idle), Box::new(Idle)];
        let resumed = DealerBuilder::from_configuration(DealerConfig::default(), snapshot.clone(), makers)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(resumed.configuration(), snapshot);
    }

    #[test]
    fn test_configuration_needs_matching_makers() {
        let snapshot = table(3).build().unwrap().configuration();
        assert!(DealerBuilder::from_configuration(DealerConfig::default(), snapshot, vec![Box::new(Idle) as Box<dyn DecisionMaker>]).is_err());
    }
}
