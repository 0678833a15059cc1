//! `run` command: start a game session.

use std::sync::Arc;

use tokio_stream::StreamExt;
use tokio_stream::wrappers::WatchStream;
use tracing::info;

use crate::cli::args::{FeedKind, RunArgs};
use crate::config;
use crate::error::TruthwireError;
use crate::feed::{EventFeed, SimulatedFeed, TcpFeed};
use crate::game::GameEngine;
use crate::session::Session;

/// Runs a session until Ctrl+C.
///
/// # Errors
///
/// Returns an error if configuration loading or the feed fails.
pub async fn run(args: &RunArgs) -> Result<(), TruthwireError> {
    let config = match &args.config {
        Some(path) => config::load(path)?,
        None => config::defaults(),
    };

    let feed: Box<dyn EventFeed> = match args.feed {
        FeedKind::Simulated => Box::new(SimulatedFeed::new()),
        FeedKind::Tcp => Box::new(TcpFeed::new(args.addr.clone(), config.answers.clone())),
    };

    let engine = Arc::new(GameEngine::new(config));
    let session = Session::new(Arc::clone(&engine), feed);

    let cancel = session.cancel_token();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutdown requested");
        cancel.cancel();
    });

    let printer = args.json.then(|| {
        let snapshots = engine.subscribe();
        tokio::spawn(async move {
            let mut stream = WatchStream::new(snapshots);
            while let Some(snapshot) = stream.next().await {
                if let Ok(line) = serde_json::to_string(&snapshot) {
                    println!("{line}");
                }
            }
        })
    });

    session.run().await?;

    if let Some(printer) = printer {
        printer.abort();
    }
    Ok(())
}
