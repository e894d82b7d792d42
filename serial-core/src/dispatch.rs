//! Dispatcher: führt dekodierte Kommandos aus
//!
//! Geräteseite: `color` und `blink` steuern LEDs.
//! Hostseite: `id`, `buttons`, `temperature` und `raw` werden nur als Text gemeldet.
//! Alle vorhandenen Schlüssel werden unabhängig voneinander behandelt.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{debug, info, warn};

use crate::traits::LedDriver;
use crate::types::{ButtonStatus, Command, Message, RawColor};

/// Pulsbreite eines Blinks (an und aus je)
pub const BLINK_PULSE_MS: u32 = 250;

/// Anzeige für einen Absender ohne `id`
pub const UNKNOWN_SENDER: &str = "??";

/// Wie ein `blink` ausgeführt wird
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlinkMode {
    /// An, warten, aus, warten - hält die Schleife für den ganzen Puls an
    #[default]
    Blocking,
    /// Puls läuft über [`Dispatcher::tick`] mit der Uhr der Schleife
    NonBlocking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pulse {
    On { until_ms: u64 },
    Off { until_ms: u64 },
}

/// Geräteseitiger Dispatcher
///
/// `leds` und `status_led` sind optional: ein Board ohne Neopixel oder
/// Status-LED ignoriert die entsprechenden Kommandos.
pub struct Dispatcher<L, O, D> {
    leds: Option<L>,
    status_led: Option<O>,
    delay: D,
    blink_mode: BlinkMode,
    pulse_ms: u32,
    pulse: Option<Pulse>,
}

impl<L, O, D> Dispatcher<L, O, D>
where
    L: LedDriver,
    O: OutputPin,
    D: DelayNs,
{
    pub fn new(leds: Option<L>, status_led: Option<O>, delay: D) -> Self {
        Self {
            leds,
            status_led,
            delay,
            blink_mode: BlinkMode::default(),
            pulse_ms: BLINK_PULSE_MS,
            pulse: None,
        }
    }

    pub fn with_blink_mode(mut self, mode: BlinkMode) -> Self {
        self.blink_mode = mode;
        self
    }

    pub fn with_pulse_ms(mut self, pulse_ms: u32) -> Self {
        self.pulse_ms = pulse_ms;
        self
    }

    pub fn leds(&self) -> Option<&L> {
        self.leds.as_ref()
    }

    pub fn status_led(&self) -> Option<&O> {
        self.status_led.as_ref()
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// `true` solange ein nicht-blockierender Puls läuft
    pub fn is_blinking(&self) -> bool {
        self.pulse.is_some()
    }

    /// Führt eine dekodierte Nachricht aus
    ///
    /// Nicht-Objekt-JSON (`Message::Inert`) hat keine Wirkung.
    pub fn dispatch(&mut self, message: Message, now_ms: u64) {
        match message.into_command() {
            Some(command) => self.execute(&command, now_ms),
            None => debug!("Dispatch: ignoring non-object message"),
        }
    }

    pub fn execute(&mut self, command: &Command, now_ms: u64) {
        if let Some(color) = command.color {
            info!("Color: {:?}", color.0);
            self.fill(color);
        }

        if command.blink {
            self.blink(now_ms);
        }
    }

    /// Treibt einen nicht-blockierenden Puls weiter
    pub fn tick(&mut self, now_ms: u64) {
        let Some(pulse) = self.pulse else {
            return;
        };

        match pulse {
            Pulse::On { until_ms } if now_ms >= until_ms => {
                self.set_status(false);
                self.pulse = Some(Pulse::Off {
                    until_ms: now_ms + u64::from(self.pulse_ms),
                });
            }
            Pulse::Off { until_ms } if now_ms >= until_ms => {
                self.pulse = None;
            }
            _ => {}
        }
    }

    fn fill(&mut self, color: RawColor) {
        let Some(leds) = self.leds.as_mut() else {
            return;
        };
        let Some(rgb) = color.to_rgb8() else {
            warn!("Error: color {:?} is outside 0..=255", color.0);
            return;
        };
        if let Err(e) = leds.fill(rgb).and_then(|()| leds.show()) {
            warn!("Error: {}", e);
        }
    }

    fn blink(&mut self, now_ms: u64) {
        if self.status_led.is_none() {
            return;
        }

        match self.blink_mode {
            BlinkMode::Blocking => {
                self.set_status(true);
                self.delay.delay_ms(self.pulse_ms);
                self.set_status(false);
                self.delay.delay_ms(self.pulse_ms);
            }
            BlinkMode::NonBlocking => {
                // laufender Puls wird nicht neu gestartet
                if self.pulse.is_none() {
                    self.set_status(true);
                    self.pulse = Some(Pulse::On {
                        until_ms: now_ms + u64::from(self.pulse_ms),
                    });
                }
            }
        }
    }

    fn set_status(&mut self, on: bool) {
        let Some(led) = self.status_led.as_mut() else {
            return;
        };
        let result = if on { led.set_high() } else { led.set_low() };
        if let Err(e) = result {
            warn!("Status LED: write failed: {:?}", e);
        }
    }
}

/// Hostseitige Auswertung: eine Textzeile pro meldenswertem Schlüssel
///
/// Nur losgelassene Taster werden als Klick gemeldet.
pub fn report(command: &Command) -> Vec<String> {
    let ident = command.id.as_deref().unwrap_or(UNKNOWN_SENDER);
    let mut lines = Vec::new();

    if let Some(buttons) = &command.buttons {
        lines.extend(
            buttons
                .iter()
                .filter(|button| button.status == ButtonStatus::Released)
                .map(|button| format!("Button {} clicked on {}", button.id, ident)),
        );
    }

    if let Some(temperature) = command.temperature {
        lines.push(format!("Temperature {}: {}°C", ident, temperature));
    }

    if let Some(raw) = &command.raw {
        lines.push(format!("Board {} sent: {}", ident, raw));
    }

    lines
}

/// Dekodierte Nachricht auswerten, `Inert` ergibt keine Zeilen
pub fn report_message(message: Message) -> Vec<String> {
    message
        .into_command()
        .map(|command| report(&command))
        .unwrap_or_default()
}
