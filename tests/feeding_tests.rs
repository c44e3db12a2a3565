//! Feeding phase tests driven through the dealer.
//!
//! Each test seats hand-built players, lines them up with
//! `start_feeding`, and walks the feed loop one `feed_step` at a time.

mod common;

use std::time::Duration;

use common::*;
use rust_evo::{Deck, FeedDecision, FeedStep, PlayerId, TraitName};

use TraitName::*;

fn ids(dealer: &rust_evo::Dealer) -> Vec<u32> {
    dealer.feed_order().iter().map(PlayerId::raw).collect()
}

fn fed(id: u32) -> rust_evo::PlayerState {
    player(id, vec![board(2, 0, 2, &[])])
}

#[test]
fn test_autofeed_single_vegetarian_rotates() {
    init_logging();
    // Player 1 would be kicked if it were asked anything.
    let mut dealer = dealer(
        vec![
            seat(player(1, vec![board(0, 0, 2, &[])]), Failing),
            seat(fed(2), Passive),
            seat(fed(3), Passive),
        ],
        5,
        Deck::default(),
    );
    dealer.start_feeding();
    assert_eq!(ids(&dealer), vec![1, 2, 3]);

    assert_eq!(dealer.feed_step(), FeedStep::AutoFed(PlayerId::new(1)));
    assert_eq!(ids(&dealer), vec![2, 3, 1]);
    assert_eq!(dealer.water_hole().tokens(), 4);
    assert_eq!(dealer.players()[0].boards()[0].food(), 1);

    assert_eq!(dealer.feed_step(), FeedStep::Finished(PlayerId::new(2)));
    assert_eq!(dealer.feed_step(), FeedStep::Finished(PlayerId::new(3)));
    assert_eq!(dealer.feed_step(), FeedStep::AutoFed(PlayerId::new(1)));
    assert_eq!(dealer.feed_step(), FeedStep::Finished(PlayerId::new(1)));
    assert_eq!(dealer.feed_step(), FeedStep::Idle);
    assert_eq!(dealer.water_hole().tokens(), 3);
    assert_eq!(dealer.players().len(), 3);
}

#[test]
fn test_cooperation_feeds_right_neighbor_once() {
    init_logging();
    let (maker, calls) = Scripted::new([FeedDecision::Vegetarian { board: 0 }]);
    let mut dealer = dealer(
        vec![
            seat(
                player(1, vec![board(0, 0, 3, &[Cooperation]), board(0, 0, 3, &[])]),
                maker,
            ),
            seat(fed(2), Passive),
            seat(fed(3), Passive),
        ],
        10,
        Deck::default(),
    );
    dealer.start_feeding();

    assert_eq!(dealer.feed_step(), FeedStep::Fed(PlayerId::new(1)));
    assert_eq!(calls.count(), 1);
    let boards = dealer.players()[0].boards();
    assert_eq!(boards[0].food(), 1);
    assert_eq!(boards[1].food(), 1);
    assert_eq!(dealer.water_hole().tokens(), 8);
}

#[test]
fn test_failing_feeder_is_kicked() {
    init_logging();
    let mut dealer = dealer(
        vec![
            seat(
                player(1, vec![board(0, 0, 2, &[]), board(0, 0, 2, &[])]),
                Failing,
            ),
            seat(player(2, vec![board(0, 0, 2, &[])]), Passive),
            seat(player(3, vec![board(0, 0, 2, &[])]), Passive),
        ],
        10,
        Deck::default(),
    );
    dealer.start_feeding();

    assert_eq!(dealer.feed_step(), FeedStep::Kicked(PlayerId::new(1)));
    assert!(dealer.player(PlayerId::new(1)).is_none());
    assert_eq!(ids(&dealer), vec![2, 3]);
    assert_eq!(dealer.water_hole().tokens(), 10);

    assert_eq!(dealer.feed_step(), FeedStep::AutoFed(PlayerId::new(2)));
    assert_eq!(dealer.feed_step(), FeedStep::AutoFed(PlayerId::new(3)));
    assert_eq!(ids(&dealer), vec![2, 3]);
}

#[test]
fn test_slow_feeder_is_kicked() {
    init_logging();
    let config = test_config().with_response_timeout(Duration::from_millis(50));
    let mut dealer = rust_evo::Dealer::builder(config)
        .seat(
            player(1, vec![board(0, 0, 2, &[]), board(0, 0, 2, &[])]),
            Box::new(Slow(Duration::from_secs(2))),
        )
        .seat(player(2, vec![board(0, 0, 2, &[])]), Box::new(Passive))
        .water_hole(4)
        .build()
        .unwrap();
    dealer.start_feeding();

    assert_eq!(dealer.feed_step(), FeedStep::Kicked(PlayerId::new(1)));
    assert_eq!(dealer.players().len(), 1);
}

#[test]
fn test_illegal_feed_is_kicked() {
    init_logging();
    // Board 1 does not exist.
    let (maker, _) = Scripted::new([FeedDecision::Vegetarian { board: 1 }]);
    let mut dealer = dealer(
        vec![
            seat(
                player(1, vec![board(0, 0, 2, &[Carnivore])]),
                maker,
            ),
            seat(player(2, vec![board(0, 0, 2, &[]), board(0, 0, 2, &[])]), Passive),
        ],
        4,
        Deck::default(),
    );
    dealer.start_feeding();

    assert_eq!(dealer.feed_step(), FeedStep::Kicked(PlayerId::new(1)));
    assert_eq!(dealer.water_hole().tokens(), 4);
    assert_eq!(dealer.players()[0].boards()[0].population(), 2);
}

#[test]
fn test_feed_nothing_leaves_order() {
    init_logging();
    let (maker, calls) = Scripted::new([]);
    let mut dealer = dealer(
        vec![
            seat(
                player(1, vec![board(0, 0, 2, &[]), board(0, 0, 2, &[])]),
                maker,
            ),
            seat(fed(2), Passive),
        ],
        4,
        Deck::default(),
    );
    dealer.start_feeding();

    assert_eq!(dealer.feed_step(), FeedStep::Declined(PlayerId::new(1)));
    assert_eq!(calls.count(), 1);
    assert_eq!(ids(&dealer), vec![2]);
    assert_eq!(dealer.players().len(), 2);
}

#[test]
fn test_carnivore_autofeed_with_scavenger() {
    init_logging();
    let mut dealer = dealer(
        vec![
            seat(
                player(1, vec![board(0, 3, 2, &[Carnivore])]),
                Failing,
            ),
            seat(player(2, vec![board(1, 0, 2, &[])]), Passive),
            seat(player(3, vec![board(0, 0, 2, &[Scavenger, Climbing])]), Passive),
        ],
        10,
        Deck::default(),
    );
    dealer.start_feeding();

    assert_eq!(dealer.feed_step(), FeedStep::AutoFed(PlayerId::new(1)));
    let players = dealer.players();
    assert_eq!(players[0].boards()[0].food(), 1);
    assert_eq!(players[1].boards()[0].population(), 1);
    assert_eq!(players[1].boards()[0].food(), 1);
    assert_eq!(players[2].boards()[0].food(), 1);
    assert_eq!(dealer.water_hole().tokens(), 8);
}

#[test]
fn test_kill_removes_extinct_board_and_deals_replacements() {
    init_logging();
    let mut dealer = dealer(
        vec![
            seat(
                player(1, vec![board(0, 3, 2, &[Carnivore])]),
                Failing,
            ),
            seat(player(2, vec![board(0, 0, 1, &[])]), Passive),
        ],
        3,
        small_deck(5),
    );
    dealer.start_feeding();

    assert_eq!(dealer.feed_step(), FeedStep::AutoFed(PlayerId::new(1)));
    let victim = dealer.player(PlayerId::new(2)).unwrap();
    assert!(victim.boards().is_empty());
    assert_eq!(victim.hand().len(), 2);
    assert_eq!(dealer.deck().len(), 3);
}

#[test]
fn test_horns_can_kill_the_attacker() {
    init_logging();
    let mut dealer = dealer(
        vec![
            seat(
                player(1, vec![board(0, 3, 1, &[Carnivore])]),
                Failing,
            ),
            seat(player(2, vec![board(0, 0, 3, &[Horns])]), Passive),
        ],
        3,
        small_deck(5),
    );
    dealer.start_feeding();

    assert_eq!(dealer.feed_step(), FeedStep::AutoFed(PlayerId::new(1)));
    let hunter = dealer.player(PlayerId::new(1)).unwrap();
    assert!(hunter.boards().is_empty());
    assert_eq!(hunter.hand().len(), 2);
    assert_eq!(dealer.player(PlayerId::new(2)).unwrap().boards()[0].population(), 2);
    assert_eq!(dealer.water_hole().tokens(), 3);
}

#[test]
fn test_round_start_effects() {
    init_logging();
    let fat = rust_evo::SpeciesBoard::builder()
        .population(3)
        .body(3)
        .trait_names([FatTissue])
        .fat_food(2)
        .build()
        .unwrap();
    let mut dealer = dealer(
        vec![
            seat(
                player(1, vec![board(0, 0, 2, &[Fertile]), board(0, 0, 2, &[LongNeck]), fat]),
                Passive,
            ),
            seat(fed(2), Passive),
        ],
        5,
        Deck::default(),
    );
    dealer.start_feeding();

    let boards = dealer.players()[0].boards();
    assert_eq!(boards[0].population(), 3);
    assert_eq!(boards[1].food(), 1);
    assert_eq!(boards[2].food(), 2);
    assert_eq!(boards[2].fat_food(), 0);
    assert_eq!(dealer.water_hole().tokens(), 4);
}

#[test]
fn test_feeding_stops_when_water_hole_is_dry() {
    init_logging();
    let mut dealer = dealer(
        vec![
            seat(player(1, vec![board(0, 0, 4, &[])]), Passive),
            seat(player(2, vec![board(0, 0, 4, &[])]), Passive),
        ],
        3,
        Deck::default(),
    );
    dealer.apply_turn_actions(Vec::new());

    assert_eq!(dealer.phase(), rust_evo::Phase::Cleanup);
    assert!(dealer.water_hole().is_empty());
    let food: u32 = dealer.players().iter().map(|p| p.boards()[0].food()).sum();
    assert_eq!(food, 3);
    assert_eq!(dealer.players()[0].boards()[0].food(), 2);
}

#[test]
fn test_zero_fat_request_fills_the_store() {
    init_logging();
    let fat = rust_evo::SpeciesBoard::builder()
        .population(1)
        .food(1)
        .body(3)
        .trait_names([FatTissue])
        .build()
        .unwrap();
    let (maker, calls) = Scripted::new([FeedDecision::FatTissue { board: 0, tokens: 0 }]);
    let mut dealer = dealer(vec![seat(player(1, vec![fat]), maker), seat(fed(2), Passive)], 10, Deck::default());
    dealer.start_feeding();

    assert_eq!(dealer.feed_step(), FeedStep::Fed(PlayerId::new(1)));
    assert_eq!(calls.count(), 1);
    assert_eq!(dealer.players().len(), 2);
    assert_eq!(dealer.players()[0].boards()[0].fat_food(), 3);
    assert_eq!(dealer.water_hole().tokens(), 7);
}
