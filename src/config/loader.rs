//! Configuration loading pipeline: read, parse, validate, freeze.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::config::schema::GameConfig;
use crate::error::ConfigError;

/// Longest accepted grace delay. Anything above this is a typo, not a
/// design choice.
const MAX_GRACE_DELAY: Duration = Duration::from_secs(10);

/// Loads and validates a configuration file, returning it frozen.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file is missing or unreadable, the YAML
/// does not parse, or validation fails.
pub fn load(path: &Path) -> Result<Arc<GameConfig>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config: GameConfig =
        serde_yaml::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    validate(&config)?;
    Ok(Arc::new(config))
}

/// Returns the built-in default configuration, validated and frozen.
#[must_use]
pub fn defaults() -> Arc<GameConfig> {
    Arc::new(GameConfig::default())
}

/// Validates a parsed configuration.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] for the first violated constraint.
pub fn validate(config: &GameConfig) -> Result<(), ConfigError> {
    if config.questions.is_empty() || config.questions.iter().any(|q| q.trim().is_empty()) {
        return Err(ConfigError::InvalidValue {
            field: "questions".into(),
            value: format!("{} entries", config.questions.len()),
            expected: "at least one non-blank question".into(),
        });
    }

    if config.answers.len() < 2 || config.answers.iter().any(|a| a.trim().is_empty()) {
        return Err(ConfigError::InvalidValue {
            field: "answers".into(),
            value: format!("{:?}", config.answers),
            expected: "at least two non-blank answer values".into(),
        });
    }

    if config.countdown_secs == 0 {
        return Err(ConfigError::InvalidValue {
            field: "countdown_secs".into(),
            value: "0".into(),
            expected: "a value of 1 or more".into(),
        });
    }

    if config.grace_delay > MAX_GRACE_DELAY {
        return Err(ConfigError::InvalidValue {
            field: "grace_delay".into(),
            value: format!("{:?}", config.grace_delay),
            expected: format!("at most {MAX_GRACE_DELAY:?}"),
        });
    }

    if config.log_cap == 0 {
        return Err(ConfigError::InvalidValue {
            field: "log_cap".into(),
            value: "0".into(),
            expected: "a value of 1 or more".into(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_file() {
        let file = write_config("countdown_secs: 20\n");
        let config = load(file.path()).unwrap();
        assert_eq!(config.countdown_secs, 20);
        assert_eq!(config.answers, ["Ja", "Nein"]);
    }

    #[test]
    fn test_missing_file() {
        let err = load(Path::new("/nonexistent/game.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }

    #[test]
    fn test_parse_error() {
        let file = write_config("questions: [unterminated\n");
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_empty_questions_rejected() {
        let file = write_config("questions: []\n");
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "questions"));
    }

    #[test]
    fn test_single_answer_rejected() {
        let file = write_config("answers: [\"Ja\"]\n");
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "answers"));
    }

    #[test]
    fn test_zero_countdown_rejected() {
        let file = write_config("countdown_secs: 0\n");
        let err = load(file.path()).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "countdown_secs")
        );
    }

    #[test]
    fn test_oversized_grace_delay_rejected() {
        let file = write_config("grace_delay: 1h\n");
        let err = load(file.path()).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "grace_delay")
        );
    }

    #[test]
    fn test_defaults_validate() {
        assert!(validate(&GameConfig::default()).is_ok());
        let _ = defaults();
    }
}
