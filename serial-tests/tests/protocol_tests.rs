//! Integration Tests für die Codecs
//!
//! Reine Daten-Tests ohne Hardware: Farblisten, Kommandos, Reports.

use serial_core::dispatch::{report, report_message};
use serial_core::{
    ButtonEvent, ButtonStatus, ColorGroup, ColorList, Command, FormatError, Message, RawColor,
};
use serial_core::{color_list, command, palette};

// ============================================================================
// Tests: Farblisten
// ============================================================================

#[test]
fn test_color_list_round_trip() {
    let frames = [
        "0,0,40:0,40,0:20,20,0:40,0,0",
        "255,255,255",
        "1,2,3:4,5,6",
        "-1,300,0",
        "1,2,3:4,5",
    ];
    for frame in frames {
        let colors = color_list::decode(frame.as_bytes()).unwrap();
        assert_eq!(color_list::encode(&colors), frame);
        assert_eq!(
            color_list::decode(color_list::encode(&colors).as_bytes()),
            Ok(colors)
        );
    }
}

#[test]
fn test_color_list_formatting_is_normalized() {
    let colors = color_list::decode(b" 1, 2 ,3 : 04,5,6 ").unwrap();
    assert_eq!(color_list::encode(&colors), "1,2,3:4,5,6");
}

#[test]
fn test_color_list_wrong_field_count_only_marks_its_group() {
    let colors = color_list::decode(b"1,2").unwrap();
    assert_eq!(colors.groups(), &[ColorGroup::Malformed(vec![1, 2])]);

    let colors = color_list::decode(b"1,2,3:4,5").unwrap();
    assert_eq!(colors.len(), 2);
    assert_eq!(
        colors.groups()[0],
        ColorGroup::Color(RawColor::new(1, 2, 3))
    );
    assert_eq!(colors.groups()[1], ColorGroup::Malformed(vec![4, 5]));
    assert_eq!(colors.colors(), None);
}

#[test]
fn test_color_list_non_numeric_fails_whole_frame() {
    assert_eq!(
        color_list::decode(b"1,2,3:a,5,6:7,8,9"),
        Err(FormatError::NotANumber)
    );
}

#[test]
fn test_color_list_empty_frame() {
    assert_eq!(color_list::decode(b""), Err(FormatError::Empty));
    assert!(ColorList::default().is_empty());
}

#[test]
fn test_color_list_from_iterator() {
    let colors: ColorList = [RawColor::new(1, 2, 3), RawColor::new(4, 5, 6)]
        .into_iter()
        .collect();
    assert_eq!(color_list::encode(&colors), "1,2,3:4,5,6");
}

// ============================================================================
// Tests: Kommandos
// ============================================================================

#[test]
fn test_objects_decode_to_commands() {
    let frames = [
        r#"{"color":[10,20,30]}"#,
        r#"{"blink":null}"#,
        r#"{"id":"b1","temperature":21.5}"#,
        r#"{}"#,
        r#"{"unknown":1}"#,
    ];
    for frame in frames {
        assert!(
            matches!(command::decode(frame.as_bytes()), Some(Message::Command(_))),
            "{}",
            frame
        );
    }
}

#[test]
fn test_non_json_decodes_to_raw() {
    assert_eq!(
        command::decode(b"not-json-text"),
        Some(Message::Raw("not-json-text".into()))
    );
    assert_eq!(
        command::decode(b"{\"color\":"),
        Some(Message::Raw("{\"color\":".into()))
    );
}

#[test]
fn test_non_object_json_is_inert() {
    for frame in ["\"Hello\"", "42", "[1,2,3]", "true", "null"] {
        let message = command::decode(frame.as_bytes()).unwrap();
        assert!(matches!(message, Message::Inert(_)), "{}", frame);
        assert_eq!(message.into_command(), None);
    }
}

#[test]
fn test_command_encode_is_one_line() {
    let command = Command::buttons(vec![ButtonEvent {
        status: ButtonStatus::Released,
        id: "BOOT".into(),
    }]);
    let line = command::encode(&command).unwrap();

    assert_eq!(line.iter().filter(|b| **b == b'\n').count(), 1);
    assert_eq!(line.last(), Some(&b'\n'));
    assert_eq!(
        serde_json::from_slice::<serde_json::Value>(&line).unwrap(),
        serde_json::json!({"buttons": [{"status": "RELEASED", "id": "BOOT"}]})
    );
}

#[test]
fn test_command_encode_decode() {
    let original = Command {
        color: Some(RawColor::new(1, 2, 3)),
        blink: true,
        id: Some("b1".into()),
        ..Command::default()
    };
    let line = command::encode(&original).unwrap();
    assert_eq!(command::decode(&line), Some(Message::Command(original)));
}

// ============================================================================
// Tests: Reports (Host)
// ============================================================================

#[test]
fn test_raw_text_is_reported() {
    let message = command::decode(b"not-json-text").unwrap();
    assert_eq!(
        report_message(message),
        vec!["Board ?? sent: not-json-text".to_string()]
    );
}

#[test]
fn test_heartbeat_is_not_reported() {
    let message = command::decode(b"\"Hello\"").unwrap();
    assert!(report_message(message).is_empty());
}

#[test]
fn test_report_with_id() {
    let command = Command {
        id: Some("board-7".into()),
        buttons: Some(vec![
            ButtonEvent {
                status: ButtonStatus::Pressed,
                id: "A".into(),
            },
            ButtonEvent {
                status: ButtonStatus::Released,
                id: "A".into(),
            },
        ]),
        temperature: Some(23.0),
        ..Command::default()
    };
    assert_eq!(
        report(&command),
        vec![
            "Button A clicked on board-7".to_string(),
            "Temperature board-7: 23°C".to_string(),
        ]
    );
}

// ============================================================================
// Tests: Palette
// ============================================================================

#[test]
fn test_palette_names_and_triples() {
    assert_eq!(palette::parse("orange"), Some(RawColor::new(255, 165, 0)));
    assert_eq!(palette::parse("PINK"), Some(RawColor::new(240, 32, 128)));
    assert_eq!(palette::parse("1,2,3"), Some(RawColor::new(1, 2, 3)));
    assert_eq!(palette::parse("1,2,3:4,5,6"), None);
    assert_eq!(palette::parse("mauve"), None);
}
