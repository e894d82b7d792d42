//! Geräte-Schleifen als einzelne, testbare Iterationen
//!
//! Die Firmware ruft `poll()` in einer Endlosschleife auf und schläft
//! dazwischen. Der gesamte Zustand über Iterationen hinweg liegt in diesen
//! Structs: Zeilenpuffer, letzter Tasterpegel, laufender Blink-Puls.

use alloc::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;
use rgb::RGB8;

use crate::button::{self, Button};
use crate::color_list;
use crate::command;
use crate::dispatch::Dispatcher;
use crate::error::TransportError;
use crate::frame::FrameReader;
use crate::traits::{ByteTransport, LedDriver};
use crate::types::Command;

/// Farbe der LEDs direkt nach dem Start
pub const IDLE_COLOR: RGB8 = RGB8::new(32, 16, 0);

/// Füllt den Strip mit [`IDLE_COLOR`]
pub fn show_idle<L: LedDriver + ?Sized>(leds: &mut L) {
    if let Err(e) = leds.fill(IDLE_COLOR).and_then(|()| leds.show()) {
        warn!("Error: {}", e);
    }
}

/// Variante A: Farblisten `R,G,B:R,G,B:...` auf einen LED-Strip
pub struct ColorDevice<L, const N: usize> {
    leds: Option<L>,
    reader: FrameReader<N>,
}

impl<L: LedDriver, const N: usize> ColorDevice<L, N> {
    pub fn new(leds: Option<L>) -> Self {
        Self {
            leds,
            reader: FrameReader::new(),
        }
    }

    pub fn leds(&self) -> Option<&L> {
        self.leds.as_ref()
    }

    /// Eine Iteration: höchstens ein Frame, gibt die Anzahl gesetzter LEDs zurück
    pub fn poll<T>(&mut self, transport: &mut T) -> Result<usize, TransportError>
    where
        T: ByteTransport + ?Sized,
    {
        let Some(frame) = self.reader.poll(transport)? else {
            return Ok(0);
        };
        Ok(match self.leds.as_mut() {
            Some(leds) => color_list::receive(leds, &frame),
            None => 0,
        })
    }
}

/// Variante B: JSON-Kommandos rein, Tasterereignisse raus
pub struct ExchangeDevice<L, O, D, P, const N: usize> {
    dispatcher: Dispatcher<L, O, D>,
    buttons: Vec<Button<P>>,
    reader: FrameReader<N>,
}

impl<L, O, D, P, const N: usize> ExchangeDevice<L, O, D, P, N>
where
    L: LedDriver,
    O: OutputPin,
    D: DelayNs,
    P: InputPin,
{
    pub fn new(dispatcher: Dispatcher<L, O, D>, buttons: Vec<Button<P>>) -> Self {
        Self {
            dispatcher,
            buttons,
            reader: FrameReader::new(),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher<L, O, D> {
        &self.dispatcher
    }

    /// Eine Iteration: Frame lesen und ausführen, Taster pollen, Ereignisse senden
    pub fn poll<T>(&mut self, transport: &mut T, now_ms: u64) -> Result<(), TransportError>
    where
        T: ByteTransport + ?Sized,
    {
        if let Some(frame) = self.reader.poll(transport)? {
            if let Some(message) = command::decode(&frame) {
                self.dispatcher.dispatch(message, now_ms);
            }
        }
        self.dispatcher.tick(now_ms);

        let events = button::poll_all(&mut self.buttons);
        if events.is_empty() {
            return Ok(());
        }

        match command::encode(&Command::buttons(events)) {
            Ok(line) => transport.write(&line),
            Err(e) => {
                warn!("Error: {}", e);
                Ok(())
            }
        }
    }
}
