//! JSON-Kommando-Codec: ein JSON-Objekt pro Zeile
//!
//! Dekodieren schlägt nie fehl: nicht parsebarer Text wird als `raw`
//! weitergereicht, gültiges JSON ohne Objekt bleibt wirkungslos.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use log::warn;
use serde_json::{Map, Value};

use crate::frame::DELIMITER;
use crate::types::{ButtonEvent, Command, Message, RawColor};

/// Dekodiert einen Frame
///
/// `None` für leere Frames, sonst immer eine [`Message`].
pub fn decode(frame: &[u8]) -> Option<Message> {
    let trimmed = frame.trim_ascii();
    if trimmed.is_empty() {
        return None;
    }

    let message = match serde_json::from_slice::<Value>(trimmed) {
        Ok(Value::Object(map)) => Message::Command(command_from_map(&map)),
        Ok(other) => Message::Inert(other),
        Err(_) => Message::Raw(String::from_utf8_lossy(frame).into_owned()),
    };
    Some(message)
}

fn command_from_map(map: &Map<String, Value>) -> Command {
    let mut command = Command::default();

    if let Some(value) = map.get("color") {
        command.color = color_from_value(value);
        if command.color.is_none() {
            warn!("Command: ignoring malformed color {}", value);
        }
    }

    command.blink = map.contains_key("blink");

    if let Some(value) = map.get("id") {
        command.id = Some(text_from_value(value));
    }

    if let Some(value) = map.get("buttons") {
        match serde_json::from_value::<Vec<ButtonEvent>>(value.clone()) {
            Ok(events) => command.buttons = Some(events),
            Err(e) => warn!("Command: ignoring malformed buttons: {}", e),
        }
    }

    if let Some(value) = map.get("temperature") {
        command.temperature = value.as_f64();
        if command.temperature.is_none() {
            warn!("Command: ignoring malformed temperature {}", value);
        }
    }

    if let Some(value) = map.get("raw") {
        command.raw = Some(text_from_value(value));
    }

    command
}

fn color_from_value(value: &Value) -> Option<RawColor> {
    match value.as_array()?.as_slice() {
        [r, g, b] => Some(RawColor::new(r.as_i64()?, g.as_i64()?, b.as_i64()?)),
        _ => None,
    }
}

fn text_from_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Serialisiert ein Kommando als eine Zeile JSON inkl. `\n`
pub fn encode(command: &Command) -> Result<Vec<u8>, serde_json::Error> {
    let mut line = serde_json::to_vec(command)?;
    line.push(DELIMITER);
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ButtonStatus;
    use alloc::vec;
    use serde_json::json;

    fn decode_command(frame: &str) -> Command {
        match decode(frame.as_bytes()) {
            Some(Message::Command(command)) => command,
            other => panic!("Expected Command, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_color() {
        let command = decode_command(r#"{"color":[10,20,30]}"#);
        assert_eq!(command.color, Some(RawColor::new(10, 20, 30)));
        assert!(!command.blink);
    }

    #[test]
    fn test_decode_blink_value_is_ignored() {
        assert!(decode_command(r#"{"blink": true}"#).blink);
        assert!(decode_command(r#"{"blink": false}"#).blink);
        assert!(decode_command(r#"{"blink": null}"#).blink);
    }

    #[test]
    fn test_decode_multiple_keys() {
        let command = decode_command(r#"{"color":[1,2,3],"blink":1,"other":"x"}"#);
        assert_eq!(command.color, Some(RawColor::new(1, 2, 3)));
        assert!(command.blink);
    }

    #[test]
    fn test_decode_buttons() {
        let command =
            decode_command(r#"{"buttons":[{"status":"RELEASED","id":"BOOT"}],"id":"board-1"}"#);
        assert_eq!(
            command.buttons,
            Some(vec![ButtonEvent {
                status: ButtonStatus::Released,
                id: "BOOT".into(),
            }])
        );
        assert_eq!(command.id.as_deref(), Some("board-1"));
    }

    #[test]
    fn test_decode_malformed_known_key_is_dropped() {
        let command = decode_command(r#"{"color":"red","temperature":"hot","blink":true}"#);
        assert_eq!(command.color, None);
        assert_eq!(command.temperature, None);
        assert!(command.blink);
    }

    #[test]
    fn test_decode_not_json_is_raw() {
        assert_eq!(
            decode(b"not-json-text"),
            Some(Message::Raw("not-json-text".into()))
        );
    }

    #[test]
    fn test_raw_message_becomes_raw_command() {
        let command = decode(b"not-json-text").and_then(Message::into_command);
        assert_eq!(command, Some(Command::raw("not-json-text")));
    }

    #[test]
    fn test_decode_non_object_is_inert() {
        assert_eq!(decode(b"\"Hello\""), Some(Message::Inert(json!("Hello"))));
        assert_eq!(decode(b"[1,2,3]"), Some(Message::Inert(json!([1, 2, 3]))));
        assert_eq!(decode(b"42"), Some(Message::Inert(json!(42))));
        assert_eq!(decode(b"42").and_then(Message::into_command), None);
    }

    #[test]
    fn test_decode_empty_frame() {
        assert_eq!(decode(b""), None);
        assert_eq!(decode(b" \t"), None);
    }

    #[test]
    fn test_encode_buttons_line() {
        let command = Command::buttons(vec![ButtonEvent {
            status: ButtonStatus::Pressed,
            id: "BUTTON".into(),
        }]);
        assert_eq!(
            encode(&command).unwrap(),
            b"{\"buttons\":[{\"status\":\"PRESSED\",\"id\":\"BUTTON\"}]}\n".to_vec()
        );
    }

    #[test]
    fn test_encode_color_and_blink() {
        let command = Command {
            color: Some(RawColor::new(10, 20, 30)),
            blink: true,
            ..Command::default()
        };
        assert_eq!(
            encode(&command).unwrap(),
            b"{\"color\":[10,20,30],\"blink\":true}\n".to_vec()
        );
    }

    #[test]
    fn test_encode_then_decode() {
        let command = Command {
            temperature: Some(21.5),
            id: Some("kitchen".into()),
            ..Command::default()
        };
        let line = encode(&command).unwrap();
        assert_eq!(decode(&line), Some(Message::Command(command)));
    }
}
