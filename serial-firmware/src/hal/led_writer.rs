// LED-Strip über das RMT Peripheral (WS2812/Neopixel)
//
// `set()` schreibt nur in den Pixel-Buffer, erst `show()` überträgt
// den ganzen Strip.

use esp_hal::Blocking;
use esp_hal::gpio::interconnect::PeripheralOutput;
use esp_hal::rmt::{PulseCode, Rmt};
use esp_hal::time::Rate;
use esp_hal_smartled::SmartLedsAdapter;
use rgb::RGB8;
use serial_core::{LedDriver, LedError};
use smart_leds_trait::SmartLedsWrite;

/// Real Hardware LED Strip mit `N` Pixeln
///
/// `BUF` ist die RMT-Buffer-Größe (`N * 24 + 1`, siehe `smart_led_buffer!`).
/// Der Buffer wird im Task erstellt und als Parameter übergeben, weil der
/// Adapter ihn für die gesamte Laufzeit ausleiht.
pub struct RmtLedStrip<'a, const N: usize, const BUF: usize> {
    led: SmartLedsAdapter<'a, BUF>,
    pixels: [RGB8; N],
}

impl<'a, const N: usize, const BUF: usize> RmtLedStrip<'a, N, BUF> {
    /// Erstellt einen neuen Strip, alle Pixel aus
    ///
    /// # Parameter
    /// - `pin`: Datenleitung des Strips
    /// - `rmt_peripheral`: RMT Peripheral
    /// - `rmt_clock_mhz`: RMT Clock Frequenz in MHz (z.B. 80)
    /// - `buffer`: Buffer für LED-Daten (erstellt mit smart_led_buffer!(N) Macro)
    pub fn new(
        pin: impl PeripheralOutput<'a>,
        rmt_peripheral: esp_hal::peripherals::RMT<'a>,
        rmt_clock_mhz: u32,
        buffer: &'a mut [PulseCode; BUF],
    ) -> Result<Self, LedError> {
        let rmt: Rmt<'a, Blocking> = Rmt::new(rmt_peripheral, Rate::from_mhz(rmt_clock_mhz))
            .map_err(|_| LedError::WriteFailed)?;
        let led = SmartLedsAdapter::new(rmt.channel0, pin, buffer);

        Ok(Self {
            led,
            pixels: [RGB8::default(); N],
        })
    }
}

impl<'a, const N: usize, const BUF: usize> LedDriver for RmtLedStrip<'a, N, BUF> {
    fn len(&self) -> usize {
        N
    }

    fn set(&mut self, index: usize, color: RGB8) -> Result<(), LedError> {
        let pixel = self
            .pixels
            .get_mut(index)
            .ok_or(LedError::IndexOutOfRange { index, len: N })?;
        *pixel = color;
        Ok(())
    }

    fn fill(&mut self, color: RGB8) -> Result<(), LedError> {
        self.pixels = [color; N];
        Ok(())
    }

    fn show(&mut self) -> Result<(), LedError> {
        self.led
            .write(self.pixels.iter().copied())
            .map_err(|_| LedError::WriteFailed)
    }
}
