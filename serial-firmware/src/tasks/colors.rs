// Farblisten-Task - Zeilen `R,G,B:R,G,B:...` auf den LED-Strip
use embassy_time::{Duration, Timer};
use esp_hal::gpio::AnyPin;
use esp_hal_smartled::smart_led_buffer;
use log::{info, warn};
use serial_core::device::{self, ColorDevice};
use serial_core::{ByteTransport, LedDriver};

use crate::config::{
    COLORS_INTERVAL_MS, COLORS_LED_COUNT, COLORS_RMT_BUFFER, FRAME_CAPACITY, RECONNECT_DELAY_MS,
    RMT_CLOCK_MHZ,
};
use crate::hal::RmtLedStrip;
use crate::tasks::Console;

/// Farblisten-Schleife ohne Hardware-Abhängigkeit
///
/// # Parameter
/// - `leds`: LED-Strip, `None` wenn das Board keinen hat
/// - `transport`: Verbindung zum Host
pub async fn colors_logic<L, T>(leds: Option<L>, transport: &mut T) -> !
where
    L: LedDriver,
    T: ByteTransport,
{
    let mut device = ColorDevice::<L, FRAME_CAPACITY>::new(leds);

    loop {
        match device.poll(transport) {
            Ok(0) => {}
            Ok(count) => info!("Colors: {} LEDs set", count),
            Err(e) => {
                warn!("Serial: {}", e);
                Timer::after(Duration::from_millis(RECONNECT_DELAY_MS)).await;
            }
        }

        Timer::after(Duration::from_millis(COLORS_INTERVAL_MS)).await;
    }
}

/// Farblisten-Task - initialisiert den Strip und startet die Schleife
///
/// # Parameter
/// - `neopixel`: Datenleitung des Strips, `None` wenn nicht vorhanden
/// - `rmt_peripheral`: RMT Peripheral für präzises Timing
/// - `console`: USB-Verbindung zum Host
#[embassy_executor::task]
pub async fn colors_task(
    neopixel: Option<AnyPin<'static>>,
    rmt_peripheral: esp_hal::peripherals::RMT<'static>,
    mut console: Console,
) {
    // Buffer für SmartLED Daten erstellen
    // Macro allokiert Speicher im richtigen Format für RMT
    let mut rmt_buffer = smart_led_buffer!(COLORS_LED_COUNT);

    let leds = match neopixel {
        Some(pin) => match RmtLedStrip::<COLORS_LED_COUNT, COLORS_RMT_BUFFER>::new(
            pin,
            rmt_peripheral,
            RMT_CLOCK_MHZ,
            &mut rmt_buffer,
        ) {
            Ok(mut strip) => {
                device::show_idle(&mut strip);
                Some(strip)
            }
            Err(e) => {
                warn!("Neopixel: {}", e);
                None
            }
        },
        None => None,
    };

    colors_logic(leds, &mut console).await
}
