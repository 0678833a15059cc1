//! Session runtime: wires an event feed into the game engine.
//!
//! One [`Session`] owns the engine, the feed, and the per-kind event
//! counters. `run` pumps feed events into engine operations until the
//! cancellation token fires, then releases the feed subscription and the
//! countdown task so nothing keeps mutating state after teardown.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::Result;
use crate::feed::{EventFeed, FeedEvent, FeedStats};
use crate::game::{GameEngine, Player};

/// A running table: engine plus its event source.
pub struct Session {
    engine: Arc<GameEngine>,
    feed: Box<dyn EventFeed>,
    stats: FeedStats,
    cancel: CancellationToken,
}

impl Session {
    /// Creates a session around an engine and a feed.
    #[must_use]
    pub fn new(engine: Arc<GameEngine>, feed: Box<dyn EventFeed>) -> Self {
        Self {
            engine,
            feed,
            stats: FeedStats::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Returns the engine, for operator controls and snapshots.
    #[must_use]
    pub const fn engine(&self) -> &Arc<GameEngine> {
        &self.engine
    }

    /// Returns the event counters.
    #[must_use]
    pub const fn stats(&self) -> &FeedStats {
        &self.stats
    }

    /// Returns a token that stops [`run`](Self::run) when cancelled.
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Runs the session until cancelled.
    ///
    /// If the feed channel closes (source gone for good), the engine is
    /// marked disconnected and keeps serving operator controls until the
    /// token fires.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed fails to start.
    pub async fn run(&self) -> Result<()> {
        let mut events = self.feed.start().await?;
        info!(feed = self.feed.feed_type(), "session started");

        let countdown = self.engine.start_countdown_task();

        loop {
            tokio::select! {
                () = self.cancel.cancelled() => {
                    debug!("session cancelled");
                    break;
                }
                event = events.recv() => match event {
                    Some(event) => self.dispatch(event),
                    None => {
                        info!("feed closed; continuing in operator-driven mode");
                        self.engine.set_connectivity(false);
                        self.cancel.cancelled().await;
                        break;
                    }
                }
            }
        }

        self.feed.stop().await;
        self.engine.shutdown();
        let _ = countdown.await;

        for (kind, count) in self.stats.totals() {
            debug!(kind, count, "feed events consumed");
        }
        info!("session stopped");
        Ok(())
    }

    fn dispatch(&self, event: FeedEvent) {
        self.stats.record(&event);
        match event {
            FeedEvent::Connected => self.engine.set_connectivity(true),
            FeedEvent::Disconnected => self.engine.set_connectivity(false),
            FeedEvent::ButtonPress { player, value } => {
                self.engine.submit_answer(player, value);
            }
            FeedEvent::Pulse { p1, p2 } => {
                self.engine.apply_pulse(Player::One, p1);
                self.engine.apply_pulse(Player::Two, p2);
            }
            FeedEvent::Status { message } => self.engine.record_status(message),
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("feed", &self.feed.feed_type())
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}
