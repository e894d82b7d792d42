//! Board-Fähigkeiten: Kandidaten-Namen → Pin, einmal beim Start aufgelöst
//!
//! Jedes Board beschreibt seine Pins als Tabelle `(Name, Pin)`. Die
//! Kandidatenlisten werden in Reihenfolge gegen diese Tabelle geprüft,
//! der erste Treffer gewinnt.

/// Pin-Name des adressierbaren LED-Strips
pub const NEOPIXEL: &str = "NEOPIXEL";

/// Namen einer einfachen Status-LED
pub const STATUS_LED_CANDIDATES: [&str; 4] = ["LED", "L", "RED_LED", "BLUE_LED"];

/// Namen eines Tasters, in Prioritätsreihenfolge
pub const BUTTON_CANDIDATES: [&str; 10] = [
    "BUTTON",
    "BUTTON_USR",
    "BUTTON_USER",
    "BUTTON_A",
    "BUTTON_X",
    "BUTTON_UP",
    "BUTTON1",
    "BUTTON_1",
    "BOOT",
    "BOOT0",
];

/// Ausweich-Pins wenn kein Taster gefunden wurde (Pico, Feather)
pub const BUTTON_FALLBACKS: [&str; 2] = ["GP3", "A2"];

/// Ein aufgelöster Pin mit dem Namen, unter dem er gefunden wurde
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<T> {
    pub name: &'static str,
    pub pin: T,
}

/// Sucht den ersten Kandidaten, den das Board kennt
pub fn resolve<T: Copy>(board: &[(&'static str, T)], candidates: &[&str]) -> Option<Resolved<T>> {
    candidates.iter().find_map(|candidate| {
        board
            .iter()
            .find(|(name, _)| name == candidate)
            .map(|&(name, pin)| Resolved { name, pin })
    })
}

/// Alle Fähigkeiten eines Boards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities<T> {
    pub neopixel: Option<Resolved<T>>,
    pub status_led: Option<Resolved<T>>,
    pub button: Option<Resolved<T>>,
}

impl<T: Copy> Capabilities<T> {
    pub fn resolve(board: &[(&'static str, T)]) -> Self {
        Self {
            neopixel: resolve(board, &[NEOPIXEL]),
            status_led: resolve(board, &STATUS_LED_CANDIDATES),
            button: resolve(board, &BUTTON_CANDIDATES)
                .or_else(|| resolve(board, &BUTTON_FALLBACKS)),
        }
    }
}
