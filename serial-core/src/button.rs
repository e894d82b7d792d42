//! Flankenerkennung für Taster
//!
//! Jeder Eingang merkt sich nur seinen letzten Pegel. Es gibt kein Debouncing,
//! das Poll-Intervall der Hauptschleife wirkt als einziges Filter.

use alloc::string::String;
use alloc::vec::Vec;

use embedded_hal::digital::InputPin;
use log::warn;

use crate::types::{ButtonEvent, ButtonStatus};

/// Zwei-Zustands-Automat über dem Eingangspegel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeDetector {
    previous: bool,
    active_low: bool,
}

impl EdgeDetector {
    /// Startet mit dem tatsächlich gelesenen Pegel
    ///
    /// `active_low = true` für Taster mit Pull-Up (gedrückt = `false`).
    pub const fn new(initial: bool, active_low: bool) -> Self {
        Self {
            previous: initial,
            active_low,
        }
    }

    pub fn level(&self) -> bool {
        self.previous
    }

    /// Genau ein Ereignis pro Pegelwechsel, keins bei stabilem Pegel
    pub fn update(&mut self, level: bool) -> Option<ButtonStatus> {
        if level == self.previous {
            return None;
        }
        self.previous = level;

        if level != self.active_low {
            Some(ButtonStatus::Pressed)
        } else {
            Some(ButtonStatus::Released)
        }
    }
}

/// Benannter Eingang mit eigenem Flanken-Zustand
pub struct Button<P> {
    id: String,
    pin: P,
    edge: EdgeDetector,
}

impl<P: InputPin> Button<P> {
    /// Liest den Startpegel einmal vor der Hauptschleife
    pub fn new(id: impl Into<String>, mut pin: P, active_low: bool) -> Result<Self, P::Error> {
        let initial = pin.is_high()?;
        Ok(Self {
            id: id.into(),
            pin,
            edge: EdgeDetector::new(initial, active_low),
        })
    }

    /// Taster mit Pull-Up: gedrückt = Low
    pub fn pull_up(id: impl Into<String>, pin: P) -> Result<Self, P::Error> {
        Self::new(id, pin, true)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn poll(&mut self) -> Option<ButtonEvent> {
        let level = match self.pin.is_high() {
            Ok(level) => level,
            Err(e) => {
                warn!("Button {}: read failed: {:?}", self.id, e);
                return None;
            }
        };

        self.edge.update(level).map(|status| ButtonEvent {
            status,
            id: self.id.clone(),
        })
    }
}

/// Pollt alle Eingänge unabhängig voneinander
pub fn poll_all<P: InputPin>(buttons: &mut [Button<P>]) -> Vec<ButtonEvent> {
    buttons.iter_mut().filter_map(Button::poll).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockInput;

    #[test]
    fn test_stable_level_no_events() {
        let mut edge = EdgeDetector::new(true, true);
        for _ in 0..100 {
            assert_eq!(edge.update(true), None);
        }
    }

    #[test]
    fn test_pull_up_press_and_release() {
        let mut edge = EdgeDetector::new(true, true);
        assert_eq!(edge.update(false), Some(ButtonStatus::Pressed));
        assert!(!edge.level());
        assert_eq!(edge.update(false), None);
        assert_eq!(edge.update(true), Some(ButtonStatus::Released));
        assert_eq!(edge.update(true), None);
    }

    #[test]
    fn test_active_high_wiring() {
        let mut edge = EdgeDetector::new(false, false);
        assert_eq!(edge.update(true), Some(ButtonStatus::Pressed));
        assert_eq!(edge.update(false), Some(ButtonStatus::Released));
    }

    #[test]
    fn test_initial_level_is_read_from_pin() {
        // Startet gedrückt: kein Ereignis bis zum Loslassen
        let pin = MockInput::new(false);
        let mut button = Button::pull_up("BOOT", pin.clone()).unwrap();
        assert_eq!(button.id(), "BOOT");
        assert_eq!(button.poll(), None);

        pin.set(true);
        assert_eq!(
            button.poll(),
            Some(ButtonEvent {
                status: ButtonStatus::Released,
                id: "BOOT".into(),
            })
        );
    }

    #[test]
    fn test_buttons_are_independent() {
        let pin_b = MockInput::new(true);
        let mut buttons = [
            Button::pull_up("A", MockInput::new(true)).unwrap(),
            Button::pull_up("B", pin_b.clone()).unwrap(),
        ];

        pin_b.set(false);
        let events = poll_all(&mut buttons);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "B");
        assert_eq!(events[0].status, ButtonStatus::Pressed);

        assert!(poll_all(&mut buttons).is_empty());
    }
}
