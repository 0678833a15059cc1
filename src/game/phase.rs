//! Round phases and cyclic navigation.
//!
//! A round walks Disclaimer → Selection → Answering → Measuring → Results.
//! Operator navigation treats the sequence as a cycle: advancing past
//! Results wraps to Disclaimer and retreating from Disclaimer wraps to
//! Results.

use serde::Serialize;

/// One discrete step of the guided round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Initial phase: system status and consent screen.
    #[default]
    Disclaimer,
    /// The current question is shown and confirmed.
    Selection,
    /// Waiting for both players to press a button.
    Answering,
    /// Timed biometric measurement window.
    Measuring,
    /// Verdicts are displayed; leaves only via reset or override.
    Results,
}

/// All phases in round order. Index positions are stable and used as the
/// atomic representation in [`RoundState`](super::state::RoundState).
pub const PHASES: [Phase; 5] = [
    Phase::Disclaimer,
    Phase::Selection,
    Phase::Answering,
    Phase::Measuring,
    Phase::Results,
];

impl Phase {
    /// Returns the stable index of this phase within [`PHASES`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the phase at the given index, wrapping modulo the cycle length.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        PHASES[index % PHASES.len()]
    }

    /// Returns the cyclically-adjacent phase in the given direction.
    ///
    /// `direction` is interpreted by sign only: non-negative advances,
    /// negative retreats.
    #[must_use]
    pub const fn step(self, direction: i8) -> Self {
        let len = PHASES.len();
        let idx = self as usize;
        let next = if direction < 0 {
            (idx + len - 1) % len
        } else {
            (idx + 1) % len
        };
        PHASES[next]
    }

    /// Human-readable name used in activity log entries.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Disclaimer => "DISCLAIMER",
            Self::Selection => "SELECTION",
            Self::Answering => "ANSWERING",
            Self::Measuring => "MEASURING",
            Self::Results => "RESULTS",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_initial_phase_is_disclaimer() {
        assert_eq!(Phase::default(), Phase::Disclaimer);
        assert_eq!(Phase::from_index(0), Phase::Disclaimer);
    }

    #[test]
    fn test_forward_order() {
        assert_eq!(Phase::Disclaimer.step(1), Phase::Selection);
        assert_eq!(Phase::Selection.step(1), Phase::Answering);
        assert_eq!(Phase::Answering.step(1), Phase::Measuring);
        assert_eq!(Phase::Measuring.step(1), Phase::Results);
        assert_eq!(Phase::Results.step(1), Phase::Disclaimer);
    }

    #[test]
    fn test_backward_wraps_from_disclaimer() {
        assert_eq!(Phase::Disclaimer.step(-1), Phase::Results);
    }

    #[test]
    fn test_index_round_trip() {
        for phase in PHASES {
            assert_eq!(Phase::from_index(phase.index()), phase);
        }
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Phase::Measuring.to_string(), "MEASURING");
        assert_eq!(Phase::Disclaimer.to_string(), "DISCLAIMER");
    }

    proptest! {
        #[test]
        fn prop_five_steps_close_the_cycle(start in 0usize..5) {
            let mut phase = Phase::from_index(start);
            for _ in 0..PHASES.len() {
                phase = phase.step(1);
            }
            prop_assert_eq!(phase, Phase::from_index(start));
        }

        #[test]
        fn prop_step_back_inverts_step_forward(start in 0usize..5) {
            let phase = Phase::from_index(start);
            prop_assert_eq!(phase.step(1).step(-1), phase);
        }
    }
}
