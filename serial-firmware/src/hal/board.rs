// Board-Fähigkeiten: Pins aus der Tabelle in config.rs auflösen und öffnen

use esp_hal::gpio::{AnyPin, Input, InputConfig, Level, Output, OutputConfig, Pull};
use log::{info, warn};
use serial_core::{Button, Capabilities, Resolved};

use crate::config::BOARD_PINS;

/// Prüft die Kandidatenlisten gegen die Pin-Tabelle des Boards
pub fn capabilities() -> Capabilities<u8> {
    let caps = Capabilities::resolve(&BOARD_PINS);
    if caps.neopixel.is_none() {
        info!("This board is not equipped with a Neopixel.");
    }
    caps
}

/// Übernimmt einen GPIO per Nummer
///
/// # Safety
/// Jede Nummer darf während der Laufzeit nur einmal übernommen werden und
/// nicht gleichzeitig über `Peripherals` benutzt werden.
pub unsafe fn take_pin(gpio: u8) -> AnyPin<'static> {
    unsafe { AnyPin::steal(gpio) }
}

/// Status-LED als Ausgang, startet aus
pub fn status_led(resolved: Option<Resolved<u8>>) -> Option<Output<'static>> {
    let resolved = resolved?;
    info!("Status LED: {} (GPIO{})", resolved.name, resolved.pin);
    // SAFETY: BOARD_PINS enthält jede GPIO-Nummer nur einmal
    let pin = unsafe { take_pin(resolved.pin) };
    Some(Output::new(pin, Level::Low, OutputConfig::default()))
}

/// Taster als Eingang mit Pull-Up, Id = gefundener Pin-Name
pub fn button(resolved: Option<Resolved<u8>>) -> Option<Button<Input<'static>>> {
    let Some(resolved) = resolved else {
        warn!("No button found");
        return None;
    };
    info!("Button: {} (GPIO{})", resolved.name, resolved.pin);
    // SAFETY: BOARD_PINS enthält jede GPIO-Nummer nur einmal
    let pin = unsafe { take_pin(resolved.pin) };
    let input = Input::new(pin, InputConfig::default().with_pull(Pull::Up));

    match Button::pull_up(resolved.name, input) {
        Ok(button) => Some(button),
        Err(e) => {
            warn!("Button {}: {:?}", resolved.name, e);
            None
        }
    }
}
