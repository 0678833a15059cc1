//! Game configuration schema.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// Default measurement window in seconds.
pub const DEFAULT_COUNTDOWN_SECS: u32 = 15;

/// Default delay between "both answered" and the start of measurement.
pub const DEFAULT_GRACE_DELAY: Duration = Duration::from_millis(500);

/// Stock question pool used when no configuration file is given.
pub fn default_questions() -> Vec<String> {
    [
        "Hast du heute schon einmal gelogen?",
        "Hast du KI für deine Hausaufgaben genutzt?",
        "Warst du gestern pünktlich?",
        "Denkst du, dein Teampartner lügt gerade?",
        "Bist du bereit für die Wahrheit?",
    ]
    .map(String::from)
    .to_vec()
}

/// Stock answer vocabulary matching the hardware button labels.
pub fn default_answers() -> Vec<String> {
    vec!["Ja".to_string(), "Nein".to_string()]
}

const fn default_countdown_secs() -> u32 {
    DEFAULT_COUNTDOWN_SECS
}

const fn default_grace_delay() -> Duration {
    DEFAULT_GRACE_DELAY
}

const fn default_log_cap() -> usize {
    crate::game::log::DEFAULT_CAP
}

/// Top-level game configuration, loaded from YAML.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    /// Question pool; one is drawn at random on start and on reset.
    #[serde(default = "default_questions")]
    pub questions: Vec<String>,

    /// Accepted answer values (the hardware button labels).
    #[serde(default = "default_answers")]
    pub answers: Vec<String>,

    /// Length of the measurement window in seconds.
    #[serde(default = "default_countdown_secs")]
    pub countdown_secs: u32,

    /// Delay between both answers arriving and the measurement starting,
    /// as a humantime string such as `"500ms"` or `"1s"`.
    #[serde(default = "default_grace_delay", deserialize_with = "parse_duration")]
    pub grace_delay: Duration,

    /// Maximum retained activity log entries.
    #[serde(default = "default_log_cap")]
    pub log_cap: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            questions: default_questions(),
            answers: default_answers(),
            countdown_secs: default_countdown_secs(),
            grace_delay: default_grace_delay(),
            log_cap: default_log_cap(),
        }
    }
}

fn parse_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(&s).map_err(serde::de::Error::custom)
}
