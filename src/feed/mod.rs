//! Event source adapter boundary.
//!
//! The engine never talks to a transport directly; it consumes
//! [`FeedEvent`]s delivered by an [`EventFeed`] implementation. The host
//! picks a real feed (TCP, see [`tcp`]) or the no-hardware simulation
//! ([`simulated`]); the state machine is written against the trait only.

pub mod simulated;
pub mod tcp;
pub mod wire;

pub use simulated::SimulatedFeed;
pub use tcp::TcpFeed;

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tokio::sync::mpsc;

use crate::error::FeedError;
use crate::game::Player;

/// Result type alias for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;

/// Capacity of the feed event channel. Pulse readings arrive at ~1 Hz,
/// so a small buffer absorbs bursts without masking a stalled consumer.
pub const FEED_CHANNEL_CAPACITY: usize = 64;

/// One inbound event from the external real-time channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// The event source became reachable.
    Connected,
    /// The event source dropped away.
    Disconnected,
    /// A hardware button press carrying the player's answer.
    ButtonPress {
        /// The seat that pressed.
        player: Player,
        /// The answer value, already vocabulary-checked at the boundary.
        value: String,
    },
    /// A live pulse reading for both players.
    Pulse {
        /// Player 1 reading; 0 means "no signal".
        p1: u32,
        /// Player 2 reading; 0 means "no signal".
        p2: u32,
    },
    /// A free-form status line from the source, routed to the activity log.
    Status {
        /// The status message.
        message: String,
    },
}

impl FeedEvent {
    /// Stable kind label used for stats counters and logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Connected => "connect",
            Self::Disconnected => "disconnect",
            Self::ButtonPress { .. } => "hardware_input",
            Self::Pulse { .. } => "live_pulse",
            Self::Status { .. } => "status",
        }
    }
}

/// An asynchronous source of [`FeedEvent`]s with an explicit lifecycle.
///
/// `start` acquires the underlying subscription and returns the receiving
/// end of the event channel; at most one subscription may be active per
/// feed. `stop` releases it; implementations close the channel on stop or
/// when the source goes away for good.
#[async_trait::async_trait]
pub trait EventFeed: Send + Sync {
    /// Starts delivering events.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::AlreadyStarted`] on a second call without an
    /// intervening `stop`, or a connection error from the transport.
    async fn start(&self) -> Result<mpsc::Receiver<FeedEvent>>;

    /// Stops delivering events and releases the subscription.
    async fn stop(&self);

    /// Short label for logging (`"tcp"`, `"simulated"`).
    fn feed_type(&self) -> &'static str;
}

/// Per-kind counters of consumed feed events. Observational only.
#[derive(Debug, Default)]
pub struct FeedStats {
    counts: DashMap<&'static str, AtomicU64>,
}

impl FeedStats {
    /// Creates an empty stats table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one event of the given kind and returns the new total.
    pub fn record(&self, event: &FeedEvent) -> u64 {
        let prev = self
            .counts
            .entry(event.kind())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
        prev.saturating_add(1)
    }

    /// Returns the count for the given event kind.
    #[must_use]
    pub fn count(&self, kind: &str) -> u64 {
        self.counts
            .get(kind)
            .map_or(0, |v| v.load(Ordering::Relaxed))
    }

    /// Returns `(kind, count)` pairs for all kinds seen so far.
    #[must_use]
    pub fn totals(&self) -> Vec<(&'static str, u64)> {
        let mut totals: Vec<_> = self
            .counts
            .iter()
            .map(|entry| (*entry.key(), entry.value().load(Ordering::Relaxed)))
            .collect();
        totals.sort_unstable();
        totals
    }
}
