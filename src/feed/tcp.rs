//! TCP event feed.
//!
//! Reads newline-delimited JSON wire messages (see [`super::wire`]) from a
//! TCP connection to the hardware bridge. Malformed lines are rejected and
//! logged without tearing the feed down; a clean EOF surfaces as
//! `Disconnected` so the engine degrades to operator-driven mode.

use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio::sync::{Mutex, mpsc};
use tokio_util::codec::{Framed, LinesCodec};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::FeedError;

use super::wire::parse_line;
use super::{EventFeed, FEED_CHANNEL_CAPACITY, FeedEvent, Result};

/// Maximum accepted line length in bytes. Wire messages are tiny; anything
/// longer is a misbehaving producer.
const MAX_LINE_LENGTH: usize = 4 * 1024;

/// Event feed reading line-framed JSON from a TCP bridge.
#[derive(Debug)]
pub struct TcpFeed {
    addr: String,
    vocabulary: Vec<String>,
    cancel: Mutex<Option<CancellationToken>>,
}

impl TcpFeed {
    /// Creates a feed that will connect to `addr` (`host:port`) on start,
    /// accepting answers from the given vocabulary.
    #[must_use]
    pub const fn new(addr: String, vocabulary: Vec<String>) -> Self {
        Self {
            addr,
            vocabulary,
            cancel: Mutex::const_new(None),
        }
    }
}

#[async_trait::async_trait]
impl EventFeed for TcpFeed {
    async fn start(&self) -> Result<mpsc::Receiver<FeedEvent>> {
        let mut guard = self.cancel.lock().await;
        if guard.is_some() {
            return Err(FeedError::AlreadyStarted);
        }

        let stream = TcpStream::connect(&self.addr)
            .await
            .map_err(|e| FeedError::ConnectionFailed(format!("{}: {e}", self.addr)))?;
        let cancel = CancellationToken::new();
        *guard = Some(cancel.clone());
        drop(guard);

        let (tx, rx) = mpsc::channel(FEED_CHANNEL_CAPACITY);
        let vocabulary = self.vocabulary.clone();
        let mut framed = Framed::new(stream, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));

        tokio::spawn(async move {
            let _ = tx.send(FeedEvent::Connected).await;
            loop {
                tokio::select! {
                    () = cancel.cancelled() => {
                        debug!("tcp feed cancelled");
                        break;
                    }
                    line = framed.next() => match line {
                        Some(Ok(line)) => match parse_line(&line, &vocabulary) {
                            Ok(event) => {
                                if tx.send(event).await.is_err() {
                                    break;
                                }
                            }
                            Err(e) => warn!(error = %e, "rejected feed message"),
                        },
                        Some(Err(e)) => {
                            warn!(error = %e, "feed framing error");
                            let _ = tx.send(FeedEvent::Disconnected).await;
                            break;
                        }
                        None => {
                            debug!("feed connection closed");
                            let _ = tx.send(FeedEvent::Disconnected).await;
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
        "tcp"
    }
}
