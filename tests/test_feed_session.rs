//! Session against a real TCP feed: wire messages end to end.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

use truthwire::config::GameConfig;
use truthwire::feed::TcpFeed;
use truthwire::game::{GameEngine, Phase, Player};
use truthwire::session::Session;

async fn bridge(lines: Vec<String>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        for line in lines {
            socket.write_all(line.as_bytes()).await.unwrap();
            socket.write_all(b"\n").await.unwrap();
        }
        socket.shutdown().await.unwrap();
    });
    addr
}

#[tokio::test]
async fn wire_messages_drive_a_round() {
    let config = Arc::new(GameConfig {
        grace_delay: Duration::ZERO,
        ..GameConfig::default()
    });

    let addr = bridge(vec![
        r#"{"event":"status","msg":"ARDUINO_OK:ACM0"}"#.to_string(),
        r#"{"event":"live_pulse","p1":72,"p2":80}"#.to_string(),
        r#"{"event":"hardware_input","player":1,"val":"Ja"}"#.to_string(),
        r#"{"event":"hardware_input","player":2,"val":"Nein"}"#.to_string(),
    ])
    .await;

    let engine = Arc::new(GameEngine::new(Arc::clone(&config)));
    // Walk to Answering so the button presses arm the measurement
    engine.advance_phase(1);
    engine.advance_phase(1);

    let feed = TcpFeed::new(addr, config.answers.clone());
    let session = Session::new(Arc::clone(&engine), Box::new(feed));
    let cancel = session.cancel_token();
    let mut snapshots = engine.subscribe();

    let runner = tokio::spawn(async move { session.run().await });

    // Wait until both buttons landed and the measurement started
    loop {
        snapshots.changed().await.unwrap();
        if snapshots.borrow().phase == Phase::Measuring {
            break;
        }
    }

    let snap = engine.snapshot();
    assert_eq!(snap.p1.pulse, 72);
    assert_eq!(snap.p2.pulse, 80);
    assert_eq!(snap.p1.answer.as_deref(), Some("Ja"));
    assert_eq!(snap.p2.answer.as_deref(), Some("Nein"));
    assert_eq!(snap.countdown, 15);

    assert!(
        engine
            .log()
            .entries()
            .iter()
            .any(|e| e.message.contains("ARDUINO_OK")),
        "bridge status should reach the activity log"
    );

    cancel.cancel();
    runner.await.unwrap().unwrap();
}

#[tokio::test]
async fn malformed_wire_input_never_reaches_the_engine() {
    let config = Arc::new(GameConfig {
        grace_delay: Duration::ZERO,
        ..GameConfig::default()
    });

    let addr = bridge(vec![
        r#"{"event":"hardware_input","player":3,"val":"Ja"}"#.to_string(),
        r#"{"event":"hardware_input","player":1,"val":"Jein"}"#.to_string(),
        r#"{"event":"live_pulse","p1":68}"#.to_string(),
        "not even json".to_string(),
    ])
    .await;

    let engine = Arc::new(GameEngine::new(Arc::clone(&config)));
    engine.advance_phase(1);
    engine.advance_phase(1);

    let feed = TcpFeed::new(addr, config.answers.clone());
    let session = Session::new(Arc::clone(&engine), Box::new(feed));
    let cancel = session.cancel_token();
    let mut snapshots = engine.subscribe();

    let runner = tokio::spawn(async move { session.run().await });

    // The bridge hangs up after the garbage; wait for the disconnect
    loop {
        snapshots.changed().await.unwrap();
        if !snapshots.borrow().connected && snapshots.borrow().phase == Phase::Answering {
            break;
        }
    }

    let snap = engine.snapshot();
    assert_eq!(snap.phase, Phase::Answering);
    assert!(snap.p1.answer.is_none());
    assert!(snap.p2.answer.is_none());
    assert_eq!(snap.p1.pulse, 0);
    assert_eq!(snap.p2.pulse, 0);

    // Operator mode still works after the feed died
    engine.submit_answer(Player::One, "Ja");
    engine.submit_answer(Player::Two, "Nein");
    assert_eq!(engine.snapshot().phase, Phase::Measuring);

    cancel.cancel();
    runner.await.unwrap().unwrap();
}
