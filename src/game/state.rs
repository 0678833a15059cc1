//! Shared round state.
//!
//! Lock-free atomic storage for the fields the timer task, the feed pump,
//! and operator calls all touch concurrently: current phase, per-player
//! pulse, countdown, and connectivity. Answers and the current question
//! change rarely and sit behind a `Mutex`.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};

use serde::Serialize;

use super::phase::Phase;

/// A player seat, either side of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// Player 1.
    One,
    /// Player 2.
    Two,
}

impl Player {
    /// Both seats, in display order.
    pub const ALL: [Self; 2] = [Self::One, Self::Two];

    /// Maps the wire-level player number (`1` or `2`) to a seat.
    ///
    /// Returns `None` for any other number; callers at the feed boundary
    /// turn that into a rejection rather than coercing.
    #[must_use]
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            _ => None,
        }
    }

    /// The wire-level player number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    const fn slot(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.number())
    }
}

/// Shared mutable state of one round.
///
/// Phase transitions come in two flavours: operator navigation stores the
/// new phase unconditionally, while automatic transitions (both answers in,
/// countdown expiry) use compare-and-exchange so exactly one caller wins
/// under concurrency.
pub struct RoundState {
    /// Current phase index, see [`Phase::index`].
    phase: AtomicUsize,
    /// Per-player pulse reading; 0 means "no signal".
    pulse: [AtomicU32; 2],
    /// Seconds remaining in the Measuring phase.
    countdown: AtomicU32,
    /// Whether the event feed is currently reachable.
    connected: AtomicBool,
    /// Per-player recorded answer for this round.
    answers: Mutex<[Option<String>; 2]>,
    /// The question currently in play.
    question: Mutex<String>,
}

impl RoundState {
    /// Creates a fresh round at Disclaimer with the given question and
    /// countdown start value.
    #[must_use]
    pub fn new(question: String, countdown_secs: u32) -> Self {
        Self {
            phase: AtomicUsize::new(Phase::Disclaimer.index()),
            pulse: [AtomicU32::new(0), AtomicU32::new(0)],
            countdown: AtomicU32::new(countdown_secs),
            connected: AtomicBool::new(false),
            answers: Mutex::new([None, None]),
            question: Mutex::new(question),
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        Phase::from_index(self.phase.load(Ordering::SeqCst))
    }

    /// Unconditionally moves to the given phase (operator override).
    pub fn set_phase(&self, phase: Phase) {
        self.phase.store(phase.index(), Ordering::SeqCst);
    }

    /// Attempts to atomically move from `from` to `to`.
    ///
    /// Returns `true` if this call performed the transition. Used for the
    /// Answering→Measuring and Measuring→Results automatic transitions so
    /// a racing reset or operator override cancels them.
    pub fn try_transition(&self, from: Phase, to: Phase) -> bool {
        self.phase
            .compare_exchange(from.index(), to.index(), Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Returns the player's last pulse reading.
    #[must_use]
    pub fn pulse(&self, player: Player) -> u32 {
        self.pulse[player.slot()].load(Ordering::SeqCst)
    }

    /// Overwrites the player's pulse reading.
    pub fn set_pulse(&self, player: Player, value: u32) {
        self.pulse[player.slot()].store(value, Ordering::SeqCst);
    }

    /// Returns the seconds remaining in the measurement window.
    #[must_use]
    pub fn countdown(&self) -> u32 {
        self.countdown.load(Ordering::SeqCst)
    }

    /// Resets the countdown to its start value.
    pub fn reset_countdown(&self, secs: u32) {
        self.countdown.store(secs, Ordering::SeqCst);
    }

    /// Decrements the countdown by one second, saturating at zero.
    ///
    /// Returns the value after the decrement.
    pub fn decrement_countdown(&self) -> u32 {
        self.countdown
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| {
                Some(v.saturating_sub(1))
            })
            .map_or(0, |prev| prev.saturating_sub(1))
    }

    /// Returns whether the event feed is reachable.
    #[must_use]
    pub fn connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Updates the connectivity flag.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    /// Records the player's answer; last write wins within a round.
    ///
    /// # Panics
    ///
    /// Panics if the answers lock is poisoned.
    pub fn set_answer(&self, player: Player, value: String) {
        let mut answers = self.answers.lock().expect("answers lock poisoned");
        answers[player.slot()] = Some(value);
    }

    /// Returns the player's answer, if set.
    ///
    /// # Panics
    ///
    /// Panics if the answers lock is poisoned.
    #[must_use]
    pub fn answer(&self, player: Player) -> Option<String> {
        let answers = self.answers.lock().expect("answers lock poisoned");
        answers[player.slot()].clone()
    }

    /// Returns whether both players have answered.
    ///
    /// # Panics
    ///
    /// Panics if the answers lock is poisoned.
    #[must_use]
    pub fn both_answered(&self) -> bool {
        let answers = self.answers.lock().expect("answers lock poisoned");
        answers.iter().all(Option::is_some)
    }

    /// Clears both answers.
    ///
    /// # Panics
    ///
    /// Panics if the answers lock is poisoned.
    pub fn clear_answers(&self) {
        let mut answers = self.answers.lock().expect("answers lock poisoned");
        *answers = [None, None];
    }

    /// Returns the question currently in play.
    ///
    /// # Panics
    ///
    /// Panics if the question lock is poisoned.
    #[must_use]
    pub fn question(&self) -> String {
        self.question.lock().expect("question lock poisoned").clone()
    }

    /// Replaces the question currently in play.
    ///
    /// # Panics
    ///
    /// Panics if the question lock is poisoned.
    pub fn set_question(&self, question: String) {
        *self.question.lock().expect("question lock poisoned") = question;
    }

    /// Takes a consistent-enough snapshot for the presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase(),
            p1: PlayerSnapshot {
                pulse: self.pulse(Player::One),
                answer: self.answer(Player::One),
            },
            p2: PlayerSnapshot {
                pulse: self.pulse(Player::Two),
                answer: self.answer(Player::Two),
            },
            countdown: self.countdown(),
            question: self.question(),
            connected: self.connected(),
        }
    }
}

impl std::fmt::Debug for RoundState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundState")
            .field("phase", &self.phase())
            .field("countdown", &self.countdown())
            .field("connected", &self.connected())
            .finish_non_exhaustive()
    }
}

/// One player's slice of a [`GameSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSnapshot {
    /// Last pulse reading; 0 means "no signal".
    pub pulse: u32,
    /// Recorded answer for the round, if any.
    pub answer: Option<String>,
}

/// Immutable view of the round handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// Current phase.
    pub phase: Phase,
    /// Player 1 state.
    pub p1: PlayerSnapshot,
    /// Player 2 state.
    pub p2: PlayerSnapshot,
    /// Seconds remaining in the measurement window.
    pub countdown: u32,
    /// The question currently in play.
    pub question: String,
    /// Whether the event feed is reachable.
    pub connected: bool,
}
