//! Wire format for inbound feed messages.
//!
//! One JSON object per line, dispatched on the `event` field:
//!
//! ```json
//! {"event":"connect"}
//! {"event":"disconnect"}
//! {"event":"hardware_input","player":1,"val":"Ja"}
//! {"event":"live_pulse","p1":72,"p2":80}
//! {"event":"status","msg":"ARDUINO_OK:ACM0"}
//! ```
//!
//! Anything malformed (unknown event kind, missing field, player index
//! outside 1/2, answer outside the vocabulary) is rejected here with a
//! typed error and never reaches the state machine.

use serde_json::Value;

use crate::error::FeedError;
use crate::game::Player;

use super::{FeedEvent, Result};

/// Parses one wire line into a [`FeedEvent`], validating against the
/// configured answer vocabulary.
///
/// # Errors
///
/// Returns a [`FeedError`] describing the first problem found.
pub fn parse_line(line: &str, vocabulary: &[String]) -> Result<FeedEvent> {
    let value: Value =
        serde_json::from_str(line).map_err(|e| FeedError::Malformed(e.to_string()))?;

    let event = value
        .get("event")
        .and_then(Value::as_str)
        .ok_or(FeedError::MissingField("event"))?;

    match event {
        "connect" => Ok(FeedEvent::Connected),
        "disconnect" => Ok(FeedEvent::Disconnected),
        "hardware_input" => parse_button(&value, vocabulary),
        "live_pulse" => parse_pulse(&value),
        "status" => {
            let message = value
                .get("msg")
                .and_then(Value::as_str)
                .ok_or(FeedError::MissingField("msg"))?;
            Ok(FeedEvent::Status {
                message: message.to_string(),
            })
        }
        other => Err(FeedError::UnknownEvent(other.to_string())),
    }
}

fn parse_button(value: &Value, vocabulary: &[String]) -> Result<FeedEvent> {
    let number = value
        .get("player")
        .ok_or(FeedError::MissingField("player"))?;
    let player = number
        .as_u64()
        .and_then(|n| u8::try_from(n).ok())
        .and_then(Player::from_number)
        .ok_or_else(|| FeedError::UnknownPlayer(number.to_string()))?;

    let answer = value
        .get("val")
        .and_then(Value::as_str)
        .ok_or(FeedError::MissingField("val"))?;
    if !vocabulary.iter().any(|v| v == answer) {
        return Err(FeedError::UnknownAnswer {
            value: answer.to_string(),
            vocabulary: vocabulary.to_vec(),
        });
    }

    Ok(FeedEvent::ButtonPress {
        player,
        value: answer.to_string(),
    })
}

fn parse_pulse(value: &Value) -> Result<FeedEvent> {
    let read = |field: &'static str| -> Result<u32> {
        let n = value
            .get(field)
            .and_then(Value::as_u64)
            .ok_or(FeedError::MissingField(field))?;
        u32::try_from(n).map_err(|_| FeedError::Malformed(format!("{field} out of range: {n}")))
    };
    Ok(FeedEvent::Pulse {
        p1: read("p1")?,
        p2: read("p2")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vec<String> {
        vec!["Ja".to_string(), "Nein".to_string()]
    }

    #[test]
    fn test_connect_disconnect() {
        assert_eq!(
            parse_line(r#"{"event":"connect"}"#, &vocab()).unwrap(),
            FeedEvent::Connected
        );
        assert_eq!(
            parse_line(r#"{"event":"disconnect"}"#, &vocab()).unwrap(),
            FeedEvent::Disconnected
        );
    }

    #[test]
    fn test_button_press() {
        let event =
            parse_line(r#"{"event":"hardware_input","player":2,"val":"Nein"}"#, &vocab()).unwrap();
        assert_eq!(
            event,
            FeedEvent::ButtonPress {
                player: Player::Two,
                value: "Nein".into()
            }
        );
    }

    #[test]
    fn test_live_pulse() {
        let event = parse_line(r#"{"event":"live_pulse","p1":72,"p2":80}"#, &vocab()).unwrap();
        assert_eq!(event, FeedEvent::Pulse { p1: 72, p2: 80 });
    }

    #[test]
    fn test_status() {
        let event = parse_line(r#"{"event":"status","msg":"ARDUINO_OK:ACM0"}"#, &vocab()).unwrap();
        assert_eq!(
            event,
            FeedEvent::Status {
                message: "ARDUINO_OK:ACM0".into()
            }
        );
    }

    #[test]
    fn test_unknown_player_rejected() {
        let err =
            parse_line(r#"{"event":"hardware_input","player":3,"val":"Ja"}"#, &vocab()).unwrap_err();
        assert!(matches!(err, FeedError::UnknownPlayer(ref n) if n == "3"));
    }

    #[test]
    fn test_answer_outside_vocabulary_rejected() {
        let err = parse_line(
            r#"{"event":"hardware_input","player":1,"val":"Vielleicht"}"#,
            &vocab(),
        )
        .unwrap_err();
        assert!(matches!(err, FeedError::UnknownAnswer { .. }));
    }

    #[test]
    fn test_missing_fields_rejected() {
        let err = parse_line(r#"{"event":"hardware_input","player":1}"#, &vocab()).unwrap_err();
        assert!(matches!(err, FeedError::MissingField("val")));

        let err = parse_line(r#"{"event":"live_pulse","p1":72}"#, &vocab()).unwrap_err();
        assert!(matches!(err, FeedError::MissingField("p2")));

        let err = parse_line(r#"{"player":1}"#, &vocab()).unwrap_err();
        assert!(matches!(err, FeedError::MissingField("event")));
    }

    #[test]
    fn test_unknown_event_rejected() {
        let err = parse_line(r#"{"event":"raw_data","p1":600}"#, &vocab()).unwrap_err();
        assert!(matches!(err, FeedError::UnknownEvent(ref e) if e == "raw_data"));
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = parse_line("not json", &vocab()).unwrap_err();
        assert!(matches!(err, FeedError::Malformed(_)));
    }

    #[test]
    fn test_negative_player_rejected() {
        // Present but out of range: reported as an unknown player, not
        // as a missing field
        let err =
            parse_line(r#"{"event":"hardware_input","player":-1,"val":"Ja"}"#, &vocab())
                .unwrap_err();
        assert!(matches!(err, FeedError::UnknownPlayer(ref n) if n == "-1"));
    }

    #[test]
    fn test_non_numeric_player_rejected() {
        let err =
            parse_line(r#"{"event":"hardware_input","player":"one","val":"Ja"}"#, &vocab())
                .unwrap_err();
        assert!(matches!(err, FeedError::UnknownPlayer(_)));
    }
}
