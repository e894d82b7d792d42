// Kommando-Task - JSON-Kommandos ausführen, Tasterereignisse melden
use alloc::vec::Vec;

use embassy_time::{Duration, Instant, Timer};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use esp_hal::delay::Delay;
use esp_hal::gpio::{AnyPin, Input, Output};
use esp_hal_smartled::smart_led_buffer;
use log::warn;
use serial_core::device::{self, ExchangeDevice};
use serial_core::{Button, ByteTransport, Dispatcher, LedDriver};

use crate::config::{
    BLINK_PULSE_MS, EXCHANGE_INTERVAL_MS, EXCHANGE_LED_COUNT, EXCHANGE_RMT_BUFFER, FRAME_CAPACITY,
    RECONNECT_DELAY_MS, RMT_CLOCK_MHZ,
};
use crate::hal::RmtLedStrip;
use crate::tasks::Console;

/// Kommando-Schleife ohne Hardware-Abhängigkeit
///
/// Ein `blink` im Default-Modus hält die Schleife für zwei Pulse an.
pub async fn exchange_logic<L, O, D, P, T>(
    mut device: ExchangeDevice<L, O, D, P, FRAME_CAPACITY>,
    transport: &mut T,
) -> !
where
    L: LedDriver,
    O: OutputPin,
    D: DelayNs,
    P: InputPin,
    T: ByteTransport,
{
    loop {
        let now_ms = Instant::now().as_millis();
        if let Err(e) = device.poll(transport, now_ms) {
            warn!("Serial: {}", e);
            Timer::after(Duration::from_millis(RECONNECT_DELAY_MS)).await;
        }

        Timer::after(Duration::from_millis(EXCHANGE_INTERVAL_MS)).await;
    }
}

/// Kommando-Task - initialisiert Strip, Status-LED und Taster
///
/// # Parameter
/// - `neopixel`: Datenleitung des Strips, `None` wenn nicht vorhanden
/// - `rmt_peripheral`: RMT Peripheral für präzises Timing
/// - `status_led`: einfache LED für `blink`, `None` wenn nicht vorhanden
/// - `button`: Taster für Ereignisse, `None` wenn nicht vorhanden
/// - `console`: USB-Verbindung zum Host
#[embassy_executor::task]
pub async fn exchange_task(
    neopixel: Option<AnyPin<'static>>,
    rmt_peripheral: esp_hal::peripherals::RMT<'static>,
    status_led: Option<Output<'static>>,
    button: Option<Button<Input<'static>>>,
    mut console: Console,
) {
    let mut rmt_buffer = smart_led_buffer!(EXCHANGE_LED_COUNT);

    let leds = match neopixel {
        Some(pin) => match RmtLedStrip::<EXCHANGE_LED_COUNT, EXCHANGE_RMT_BUFFER>::new(
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

    let dispatcher = Dispatcher::new(leds, status_led, Delay::new()).with_pulse_ms(BLINK_PULSE_MS);
    let buttons: Vec<_> = button.into_iter().collect();

    exchange_logic(ExchangeDevice::new(dispatcher, buttons), &mut console).await
}
