//! Game engine orchestration.
//!
//! The [`GameEngine`] applies transition rules to the shared [`RoundState`],
//! appends to the activity log, and publishes a [`GameSnapshot`] over a
//! watch channel after every mutation. Automatic transitions (both answers
//! in, countdown expiry) go through compare-and-exchange so a racing reset
//! or operator override cancels them; operator navigation always wins.

use std::sync::Arc;
use std::time::Duration;

use rand::seq::IndexedRandom;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::GameConfig;

use super::log::ActivityLog;
use super::phase::Phase;
use super::state::{GameSnapshot, Player, RoundState};

/// Phase state machine plus activity log for one table.
pub struct GameEngine {
    config: Arc<GameConfig>,
    state: RoundState,
    log: ActivityLog,
    snapshot_tx: watch::Sender<GameSnapshot>,
    cancel: CancellationToken,
}

impl GameEngine {
    /// Creates an engine at Disclaimer with the first question in play.
    #[must_use]
    pub fn new(config: Arc<GameConfig>) -> Self {
        let question = config
            .questions
            .first()
            .cloned()
            .unwrap_or_default();
        let state = RoundState::new(question, config.countdown_secs);
        let log = ActivityLog::new(config.log_cap);
        let (snapshot_tx, _) = watch::channel(state.snapshot());

        Self {
            config,
            state,
            log,
            snapshot_tx,
            cancel: CancellationToken::new(),
        }
    }

    /// Returns a receiver that observes every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    /// Returns the activity log.
    #[must_use]
    pub const fn log(&self) -> &ActivityLog {
        &self.log
    }

    /// Moves to the cyclically-adjacent phase (operator override).
    ///
    /// Always available regardless of answer completeness; never fails.
    /// Entering Measuring by this path resets the countdown like the
    /// automatic path does.
    pub fn advance_phase(&self, direction: i8) {
        let next = self.state.phase().step(direction);
        self.enter_phase(next);
        self.log.append(format!("Phase gewechselt zu: {next}"));
        info!(phase = %next, "phase changed");
    }

    /// Records the player's answer; last write wins within a round.
    ///
    /// Answers are accepted in any phase (the operator panel may inject
    /// them early), but the transition to Measuring is only armed while
    /// the round is in Answering.
    pub fn submit_answer(self: &Arc<Self>, player: Player, value: impl Into<String>) {
        let value = value.into();
        self.log.append(format!("{player} drückt: {value}"));
        self.state.set_answer(player, value);
        self.publish();
        self.arm_measurement();
    }

    /// Overwrites the player's pulse reading. No phase or answer effect.
    pub fn apply_pulse(&self, player: Player, value: u32) {
        self.state.set_pulse(player, value);
        self.publish();
    }

    /// Updates the connectivity flag and logs the change.
    pub fn set_connectivity(&self, connected: bool) {
        self.state.set_connected(connected);
        self.log.append(if connected {
            "Feed verbunden"
        } else {
            "Feed getrennt"
        });
        info!(connected, "feed connectivity changed");
        self.publish();
    }

    /// Appends an externally-supplied status line to the activity log.
    pub fn record_status(&self, message: impl Into<String>) {
        self.log.append(message);
    }

    /// Decrements the countdown by one second while Measuring.
    ///
    /// On reaching zero the round moves to Results within the same call;
    /// outside Measuring this is a no-op, so no tick is processed after
    /// the transition.
    pub fn tick_countdown(&self) {
        if self.state.phase() != Phase::Measuring {
            return;
        }
        let remaining = self.state.decrement_countdown();
        if remaining == 0 && self.state.try_transition(Phase::Measuring, Phase::Results) {
            self.log.append("Messung abgeschlossen");
            info!("measurement finished");
        }
        self.publish();
    }

    /// Draws a new random question without touching the rest of the round.
    pub fn next_question(&self) {
        let question = self.roll_question();
        self.log.append(format!("Neue Frage: {question}"));
        self.state.set_question(question);
        self.publish();
    }

    /// Returns the round to its initial state: Disclaimer, both answers
    /// cleared, countdown reset, question re-rolled.
    pub fn reset(&self) {
        self.state.set_phase(Phase::Disclaimer);
        self.state.clear_answers();
        self.state.reset_countdown(self.config.countdown_secs);
        self.state.set_question(self.roll_question());
        self.log.append("System Neustart...");
        info!("round reset");
        self.publish();
    }

    /// Starts the once-per-second countdown task.
    ///
    /// The task only mutates state while the round is Measuring and stops
    /// when [`shutdown`](Self::shutdown) cancels it.
    pub fn start_countdown_task(self: &Arc<Self>) -> JoinHandle<()> {
        let engine = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; consume it so the
            // countdown starts one full second after entry.
            interval.tick().await;
            loop {
                tokio::select! {
                    () = engine.cancel.cancelled() => {
                        debug!("countdown task cancelled");
                        break;
                    }
                    _ = interval.tick() => {
                        engine.tick_countdown();
                    }
                }
            }
        })
    }

    /// Cancels the countdown task and any pending grace-delay transition.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    fn enter_phase(&self, next: Phase) {
        if next == Phase::Measuring {
            self.state.reset_countdown(self.config.countdown_secs);
        }
        self.state.set_phase(next);
        self.publish();
    }

    /// Schedules the Answering→Measuring transition once both answers are
    /// in. With a zero grace delay the transition happens synchronously.
    fn arm_measurement(self: &Arc<Self>) {
        if self.state.phase() != Phase::Answering || !self.state.both_answered() {
            return;
        }
        let delay = self.config.grace_delay;
        if delay.is_zero() {
            self.begin_measurement();
            return;
        }
        let engine = Arc::clone(self);
        tokio::spawn(async move {
            tokio::select! {
                () = engine.cancel.cancelled() => {}
                () = tokio::time::sleep(delay) => engine.begin_measurement(),
            }
        });
    }

    fn begin_measurement(&self) {
        // Re-check: a reset during the grace window clears the answers.
        if !self.state.both_answered() {
            return;
        }
        // Only the winning transition touches the countdown. A manual
        // entry into Measuring during the grace window already reset it
        // and may have ticked since; a losing call must not clobber that.
        if self.state.try_transition(Phase::Answering, Phase::Measuring) {
            self.state.reset_countdown(self.config.countdown_secs);
            self.log.append("Beide Antworten erhalten! Starte Messung...");
            info!("both answers in, measurement started");
            self.publish();
        }
    }

    fn roll_question(&self) -> String {
        self.config
            .questions
            .choose(&mut rand::rng())
            .cloned()
            .unwrap_or_default()
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.state.snapshot());
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("phase", &self.state.phase())
            .field("countdown", &self.state.countdown())
            .finish_non_exhaustive()
    }
}
