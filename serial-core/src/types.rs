//! Core Types für das Zeilen-Protokoll
//!
//! Datenstrukturen ohne Hardware-Dependencies

use alloc::string::String;
use alloc::vec::Vec;

use rgb::RGB8;
use serde::{Deserialize, Serialize};

/// RGB-Tripel wie es auf der Leitung steht
///
/// Werte werden nicht auf 0..=255 begrenzt, das prüft erst der LED-Treiber
/// beim Anwenden (siehe [`RawColor::to_rgb8`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawColor(pub [i64; 3]);

impl RawColor {
    pub const fn new(r: i64, g: i64, b: i64) -> Self {
        Self([r, g, b])
    }

    /// Konvertiert zu `RGB8`, `None` wenn eine Komponente nicht in ein Byte passt
    pub fn to_rgb8(self) -> Option<RGB8> {
        let [r, g, b] = self.0;
        Some(RGB8 {
            r: u8::try_from(r).ok()?,
            g: u8::try_from(g).ok()?,
            b: u8::try_from(b).ok()?,
        })
    }
}

impl From<RGB8> for RawColor {
    fn from(color: RGB8) -> Self {
        Self::new(color.r.into(), color.g.into(), color.b.into())
    }
}

/// Eine dekodierte Farbgruppe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorGroup {
    Color(RawColor),
    /// Gruppe mit falscher Feldanzahl, der Index wird beim Anwenden übersprungen
    Malformed(Vec<i64>),
}

/// Geordnete Liste von Farbgruppen, Position = LED-Index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorList(Vec<ColorGroup>);

impl ColorList {
    pub fn groups(&self) -> &[ColorGroup] {
        &self.0
    }

    /// Die Liste, falls jede Gruppe genau 3 Felder hat
    pub fn colors(&self) -> Option<Vec<RawColor>> {
        self.0
            .iter()
            .map(|group| match group {
                ColorGroup::Color(color) => Some(*color),
                ColorGroup::Malformed(_) => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ColorGroup> for ColorList {
    fn from_iter<I: IntoIterator<Item = ColorGroup>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromIterator<RawColor> for ColorList {
    fn from_iter<I: IntoIterator<Item = RawColor>>(iter: I) -> Self {
        Self(iter.into_iter().map(ColorGroup::Color).collect())
    }
}

/// Flanke eines Tasters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ButtonStatus {
    Pressed,
    Released,
}

/// Ein beobachteter Pegelwechsel eines Eingangs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonEvent {
    pub status: ButtonStatus,
    pub id: String,
}

/// Dekodiertes JSON-Objekt mit den erkannten Schlüsseln
///
/// Unbekannte Schlüssel werden beim Dekodieren verworfen. Serialisiert wird
/// in der Reihenfolge der Felder, fehlende Felder entfallen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Command {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<RawColor>,
    #[serde(skip_serializing_if = "is_false")]
    pub blink: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<ButtonEvent>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Command {
    /// `{"raw": text}` - Träger für nicht parsebare Frames
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            raw: Some(text.into()),
            ..Self::default()
        }
    }

    /// `{"buttons": [...]}`
    pub fn buttons(events: Vec<ButtonEvent>) -> Self {
        Self {
            buttons: Some(events),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Ergebnis des Dekodierens eines Frames
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// JSON-Objekt
    Command(Command),
    /// Kein gültiges JSON, Originaltext
    Raw(String),
    /// Gültiges JSON, aber kein Objekt - wird nie dispatcht
    Inert(serde_json::Value),
}

impl Message {
    /// Liefert das dispatchbare Kommando, `Raw` wird zu `{"raw": text}`
    pub fn into_command(self) -> Option<Command> {
        match self {
            Message::Command(command) => Some(command),
            Message::Raw(text) => Some(Command::raw(text)),
            Message::Inert(_) => None,
        }
    }
}
