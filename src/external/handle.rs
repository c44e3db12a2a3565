//! Deadline-bounded proxy around a decision maker.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use log::trace;

use super::DecisionMaker;
use crate::core::{DecisionError, EvoError, Result};
use crate::feed::FeedDecision;
use crate::player::PlayerState;
use crate::species::SpeciesList;
use crate::turn::TurnAction;

type Reply<T> = Sender<std::result::Result<T, DecisionError>>;

/// Messages to the worker thread.
enum Request {
    Start {
        water_hole: u32,
        me: PlayerState,
    },
    Choose {
        before: Vec<SpeciesList>,
        after: Vec<SpeciesList>,
        reply: Reply<TurnAction>,
    },
    FeedNext {
        me: PlayerState,
        others: Vec<SpeciesList>,
        water_hole: u32,
        reply: Reply<FeedDecision>,
    },
    GameOver,
}

/// Handle to a decision maker running on its own thread.
///
/// Requests are handled in order, so the deadline on a query also covers
/// any notifications still queued ahead of it: a slow `start` counts
/// against the next `choose`.
///
/// Dropping the handle closes the request channel; the worker exits once
/// its current call returns. A worker stuck inside a call is never joined.
pub struct PlayerHandle {
    name: String,
    requests: Sender<Request>,
    timeout: Duration,
}

impl PlayerHandle {
    /// Move `maker` onto a new worker thread.
    pub fn spawn(maker: Box<dyn DecisionMaker>, timeout: Duration) -> Self {
        let name = maker.name();
        let (requests, request_rx) = mpsc::channel();

        thread::spawn(move || {
            run_worker(maker, request_rx);
        });

        Self {
            name,
            requests,
            timeout,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Notify the player that a round is starting. Does not wait.
    pub fn start(&self, water_hole: u32, me: &PlayerState) -> Result<()> {
        self.requests
            .send(Request::Start {
                water_hole,
                me: me.clone(),
            })
            .map_err(|_| EvoError::Disconnected)
    }

    /// Ask for an action-phase decision.
    pub fn choose(&self, before: &[SpeciesList], after: &[SpeciesList]) -> Result<TurnAction> {
        self.ask(|reply| Request::Choose {
            before: before.to_vec(),
            after: after.to_vec(),
            reply,
        })
    }

    /// Ask for a feeding decision.
    pub fn feed_next(&self, me: &PlayerState, others: &[SpeciesList], water_hole: u32) -> Result<FeedDecision> {
        self.ask(|reply| Request::FeedNext {
            me: me.clone(),
            others: others.to_vec(),
            water_hole,
            reply,
        })
    }

    /// Notify the player that the game is over. Does not wait.
    pub fn game_over(&self) {
        let _ = self.requests.send(Request::GameOver);
    }

    fn ask<T>(&self, request: impl FnOnce(Reply<T>) -> Request) -> Result<T> {
        let (reply, answer) = mpsc::channel();
        self.requests
            .send(request(reply))
            .map_err(|_| EvoError::Disconnected)?;

        match answer.recv_timeout(self.timeout) {
            Ok(result) => result.map_err(EvoError::from),
            Err(RecvTimeoutError::Timeout) => Err(EvoError::ProtocolTimeout),
            Err(RecvTimeoutError::Disconnected) => Err(EvoError::Disconnected),
        }
    }
}

impl std::fmt::Debug for PlayerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerHandle")
            .field("name", &self.name)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Worker loop. Ends when the handle is dropped or the maker panics.
fn run_worker(mut maker: Box<dyn DecisionMaker>, requests: Receiver<Request>) {
    for request in requests {
        match request {
            Request::Start { water_hole, me } => maker.start(water_hole, &me),
            Request::Choose { before, after, reply } => {
                let _ = reply.send(maker.choose(&before, &after));
            }
            Request::FeedNext {
                me,
                others,
                water_hole,
                reply,
            } => {
                let _ = reply.send(maker.feed_next(&me, &others, water_hole));
            }
            Request::GameOver => {
                maker.game_over();
                break;
            }
        }
    }
    trace!("{} worker exiting", maker.name());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerId;

    struct Scripted {
        delay: Duration,
        panic_on_feed: bool,
    }

    impl DecisionMaker for Scripted {
        fn name(&self) -> String {
            "scripted".into()
        }

        fn choose(
            &mut self,
            _before: &[SpeciesList],
            _after: &[SpeciesList],
        ) -> std::result::Result<TurnAction, DecisionError> {
            thread::sleep(self.delay);
            Ok(TurnAction::new(0))
        }

        fn feed_next(
            &mut self,
            _me: &PlayerState,
            _others: &[SpeciesList],
            water_hole: u32,
        ) -> std::result::Result<FeedDecision, DecisionError> {
            if self.panic_on_feed {
                panic!("boom");
            }
            if water_hole == 0 {
                return Err(DecisionError::new("dry"));
            }
            Ok(FeedDecision::Nothing)
        }
    }

    fn handle(delay_ms: u64, panic_on_feed: bool, timeout_ms: u64) -> PlayerHandle {
        PlayerHandle::spawn(
            Box::new(Scripted {
                delay: Duration::from_millis(delay_ms),
                panic_on_feed,
            }),
            Duration::from_millis(timeout_ms),
        )
    }

    fn me() -> PlayerState {
        PlayerState::new(PlayerId::new(1)).unwrap()
    }

    #[test]
    fn test_answers_in_time() {
        let h = handle(0, false, 1000);
        assert_eq!(h.name(), "scripted");
        h.start(3, &me()).unwrap();
        assert_eq!(h.choose(&[], &[]), Ok(TurnAction::new(0)));
        assert_eq!(h.feed_next(&me(), &[], 2), Ok(FeedDecision::Nothing));
    }

    #[test]
    fn test_timeout() {
        let h = handle(500, false, 20);
        assert_eq!(h.choose(&[], &[]), Err(EvoError::ProtocolTimeout));
    }

    #[test]
    fn test_decision_error_is_declined() {
        let h = handle(0, false, 1000);
        assert_eq!(h.feed_next(&me(), &[], 0), Err(EvoError::Declined("dry".into())));
    }

    #[test]
    fn test_panic_is_disconnect() {
        let h = handle(0, true, 1000);
        assert_eq!(h.feed_next(&me(), &[], 2), Err(EvoError::Disconnected));
        assert_eq!(h.choose(&[], &[]), Err(EvoError::Disconnected));
    }

    #[test]
    fn test_requests_after_game_over_fail() {
        let h = handle(0, false, 1000);
        h.game_over();
        // The worker stops after game over; further queries fail fast.
        let result = h.choose(&[], &[]);
        assert!(matches!(result, Err(EvoError::Disconnected)));
    }
}
