//! Benannte Farben für Kommandos vom Host

use rgb::RGB8;

use crate::color_list;
use crate::types::RawColor;

pub const COLORS: [(&str, RGB8); 10] = [
    ("aqua", RGB8::new(0, 255, 255)),
    ("black", RGB8::new(0, 0, 0)),
    ("blue", RGB8::new(0, 0, 255)),
    ("green", RGB8::new(0, 128, 0)),
    ("orange", RGB8::new(255, 165, 0)),
    ("pink", RGB8::new(240, 32, 128)),
    ("purple", RGB8::new(128, 0, 128)),
    ("red", RGB8::new(255, 0, 0)),
    ("white", RGB8::new(255, 255, 255)),
    ("yellow", RGB8::new(255, 255, 0)),
];

/// Farbe nach Name, ohne Beachtung der Groß-/Kleinschreibung
pub fn named(name: &str) -> Option<RGB8> {
    COLORS
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|&(_, color)| color)
}

/// Name oder eine einzelne Gruppe `r,g,b`
pub fn parse(text: &str) -> Option<RawColor> {
    if let Some(color) = named(text.trim()) {
        return Some(color.into());
    }
    let colors = color_list::decode(text.as_bytes()).ok()?.colors()?;
    match colors.as_slice() {
        &[color] => Some(color),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named() {
        assert_eq!(named("orange"), Some(RGB8::new(255, 165, 0)));
        assert_eq!(named("Pink"), Some(RGB8::new(240, 32, 128)));
        assert_eq!(named("mauve"), None);
    }

    #[test]
    fn test_parse_name_or_triple() {
        assert_eq!(parse("red"), Some(RawColor::new(255, 0, 0)));
        assert_eq!(parse("10,20,30"), Some(RawColor::new(10, 20, 30)));
        assert_eq!(parse("1,2,3:4,5,6"), None);
        assert_eq!(parse("1,2"), None);
    }
}
