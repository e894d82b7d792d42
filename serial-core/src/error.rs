//! Fehler-Taxonomie des Protokolls
//!
//! `FormatError` wird immer lokal behandelt (Frame verwerfen oder als `raw` verpacken),
//! `TransportError` schließt das Transport-Handle, `LedError` betrifft nur einen Index.

use core::fmt;

/// Fehlerhafter Frame (Farbliste oder JSON)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// Frame ist nach dem Trimmen leer
    Empty,
    /// Ein Feld ist keine Dezimalzahl
    NotANumber,
    /// Eine Farbgruppe hat nicht genau 3 Felder
    FieldCount { found: usize },
    /// Frame ist kein gültiges UTF-8
    NotUtf8,
    /// Zeile passt nicht in den Frame-Puffer
    FrameTooLong,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Empty => write!(f, "empty frame"),
            FormatError::NotANumber => write!(f, "field is not a base-10 integer"),
            FormatError::FieldCount { found } => {
                write!(f, "color group has {} fields, expected 3", found)
            }
            FormatError::NotUtf8 => write!(f, "frame is not valid UTF-8"),
            FormatError::FrameTooLong => write!(f, "frame exceeds buffer capacity"),
        }
    }
}

/// Verbindungsabbruch oder I/O-Fehler auf dem Transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Gegenstelle hat die Verbindung beendet
    Disconnected,
    /// Sonstiger Lese- oder Schreibfehler
    Io,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Disconnected => write!(f, "transport disconnected"),
            TransportError::Io => write!(f, "transport I/O failure"),
        }
    }
}

impl core::error::Error for FormatError {}
impl core::error::Error for TransportError {}
