//! No-hardware feed: simulated pulse jitter.
//!
//! Stands in for the Arduino/serial chain when no hardware is attached.
//! Emits `Connected` on start and then one pulse reading per second: a
//! random walk of ±1 BPM around a per-player baseline, clamped to the
//! plausible 60–130 range.

use std::time::Duration;

use rand::Rng;
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::FeedError;

use super::{EventFeed, FEED_CHANNEL_CAPACITY, FeedEvent, Result};

/// Lowest simulated BPM.
const BPM_FLOOR: i64 = 60;
/// Highest simulated BPM.
const BPM_CEILING: i64 = 130;

/// Simulated event feed producing jittering pulse readings.
#[derive(Debug)]
pub struct SimulatedFeed {
    interval: Duration,
    cancel: Mutex<Option<CancellationToken>>,
}

impl SimulatedFeed {
    /// Creates a feed ticking once per second.
    #[must_use]
    pub fn new() -> Self {
        Self::with_interval(Duration::from_secs(1))
    }

    /// Creates a feed with a custom tick interval (used by tests).
    #[must_use]
    pub const fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            cancel: Mutex::const_new(None),
        }
    }
}

impl Default for SimulatedFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl EventFeed for SimulatedFeed {
    async fn start(&self) -> Result<mpsc::Receiver<FeedEvent>> {
        let mut guard = self.cancel.lock().await;
        if guard.is_some() {
            return Err(FeedError::AlreadyStarted);
        }
        let cancel = CancellationToken::new();
        *guard = Some(cancel.clone());
        drop(guard);

        let (tx, rx) = mpsc::channel(FEED_CHANNEL_CAPACITY);
        let interval = self.interval;
        tokio::spawn(async move {
            let _ = tx.send(FeedEvent::Connected).await;
            let mut p1 = 0;
            let mut p2 = 0;
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                tokio::select! {
                    () = cancel.cancelled() => {
                        debug!("simulated feed cancelled");
                        break;
                    }
                    _ = ticker.tick() => {
                        p1 = jitter(p1, 70);
                        p2 = jitter(p2, 75);
                        if tx.send(FeedEvent::Pulse { p1, p2 }).await.is_err() {
                            break;
                        }
                    }
                }
            }
        });
        Ok(rx)
    }

    async fn stop(&self) {
        if let Some(cancel) = self.cancel.lock().await.take() {
            cancel.cancel();
        }
    }

    fn feed_type(&self) -> &'static str {
        "simulated"
    }
}

/// One random-walk step; a previous reading of 0 snaps to the baseline.
fn jitter(prev: u32, base: u32) -> u32 {
    let current = if prev == 0 { base } else { prev };
    let delta: i64 = rand::rng().random_range(-1..=1);
    u32::try_from((i64::from(current) + delta).clamp(BPM_FLOOR, BPM_CEILING)).unwrap_or(base)
}
