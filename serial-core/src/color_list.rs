//! Farblisten-Codec: `R,G,B:R,G,B:...`
//!
//! Fail-closed: ein einziges nicht-numerisches Feld verwirft den ganzen Frame.
//! Eine Gruppe mit falscher Feldanzahl betrifft dagegen nur ihren Index und
//! wird wie ein ungültiger Wert erst beim Anwenden übersprungen.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use log::warn;

use crate::error::FormatError;
use crate::traits::{LedDriver, LedError};
use crate::types::{ColorGroup, ColorList, RawColor};

/// Trennt Farbgruppen
pub const GROUP_SEPARATOR: u8 = b':';
/// Trennt die Komponenten einer Gruppe
pub const FIELD_SEPARATOR: u8 = b',';

/// Dekodiert einen Frame in eine Farbliste
///
/// Leerzeichen am Rand des Frames und der Felder werden ignoriert.
///
/// ```
/// # use serial_core::{color_list, RawColor};
/// let colors = color_list::decode(b"0,0,40:0,40,0").unwrap();
/// assert_eq!(colors.colors(), Some(vec![RawColor::new(0, 0, 40), RawColor::new(0, 40, 0)]));
/// ```
pub fn decode(frame: &[u8]) -> Result<ColorList, FormatError> {
    let frame = frame.trim_ascii();
    if frame.is_empty() {
        return Err(FormatError::Empty);
    }

    frame
        .split(|&b| b == GROUP_SEPARATOR)
        .map(decode_group)
        .collect()
}

fn decode_group(group: &[u8]) -> Result<ColorGroup, FormatError> {
    let fields = group
        .split(|&b| b == FIELD_SEPARATOR)
        .map(decode_field)
        .collect::<Result<Vec<i64>, FormatError>>()?;

    Ok(match fields.as_slice() {
        &[r, g, b] => ColorGroup::Color(RawColor::new(r, g, b)),
        _ => ColorGroup::Malformed(fields),
    })
}

fn decode_field(field: &[u8]) -> Result<i64, FormatError> {
    core::str::from_utf8(field.trim_ascii())
        .map_err(|_| FormatError::NotANumber)?
        .parse()
        .map_err(|_| FormatError::NotANumber)
}

/// Inverse zu [`decode`]
pub fn encode(colors: &ColorList) -> String {
    let mut out = String::new();
    for (index, group) in colors.groups().iter().enumerate() {
        if index > 0 {
            out.push(GROUP_SEPARATOR as char);
        }
        let fields = match group {
            ColorGroup::Color(RawColor(fields)) => fields.as_slice(),
            ColorGroup::Malformed(fields) => fields.as_slice(),
        };
        for (position, field) in fields.iter().enumerate() {
            if position > 0 {
                out.push(FIELD_SEPARATOR as char);
            }
            // Schreiben in einen String schlägt nie fehl
            let _ = write!(out, "{}", field);
        }
    }
    out
}

/// Setzt jede Farbe auf den LED-Index ihrer Position
///
/// Fehler eines Index (zu groß, Wert außerhalb 0..=255, falsche Feldanzahl)
/// werden geloggt und übersprungen. Gibt die Anzahl tatsächlich gesetzter
/// LEDs zurück.
pub fn apply<L>(leds: &mut L, colors: &ColorList) -> usize
where
    L: LedDriver + ?Sized,
{
    let mut applied = 0;
    for (index, group) in colors.groups().iter().enumerate() {
        let raw = match group {
            ColorGroup::Color(raw) => raw,
            ColorGroup::Malformed(fields) => {
                let e = FormatError::FieldCount {
                    found: fields.len(),
                };
                warn!("Error: {} at index {} {:?}", e, index, fields);
                continue;
            }
        };
        let result = raw
            .to_rgb8()
            .ok_or(LedError::ValueOutOfRange { index })
            .and_then(|color| leds.set(index, color));

        match result {
            Ok(()) => applied += 1,
            Err(e) => warn!("Error: {} {:?}", e, raw.0),
        }
    }

    if let Err(e) = leds.show() {
        warn!("Error: {}", e);
    }
    applied
}

/// Dekodiert und wendet an, ein fehlerhafter Frame hat keine Wirkung
pub fn receive<L>(leds: &mut L, frame: &[u8]) -> usize
where
    L: LedDriver + ?Sized,
{
    match decode(frame) {
        Ok(colors) => apply(leds, &colors),
        Err(FormatError::Empty) => 0,
        Err(e) => {
            warn!("Error: {}", e);
            0
        }
    }
}
