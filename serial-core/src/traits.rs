//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung. Digitale Ein-/Ausgänge und Delays
//! kommen direkt aus `embedded-hal`, serielle Transporte aus `embedded-io`.

use core::fmt;

use embedded_io::{ErrorKind, ErrorType, Read, ReadReady, Write};
use rgb::RGB8;

use crate::error::TransportError;

/// Fehler-Typ für LED-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedError {
    WriteFailed,
    /// Index liegt hinter der letzten LED des Strips
    IndexOutOfRange { index: usize, len: usize },
    /// Farbkomponente liegt außerhalb von 0..=255
    ValueOutOfRange { index: usize },
}

impl fmt::Display for LedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedError::WriteFailed => write!(f, "LED write failed"),
            LedError::IndexOutOfRange { index, len } => {
                write!(f, "LED index {} out of range (strip has {})", index, len)
            }
            LedError::ValueOutOfRange { index } => {
                write!(f, "color for LED {} is outside 0..=255", index)
            }
        }
    }
}

impl core::error::Error for LedError {}

/// Trait für adressierbare RGB LEDs (WS2812/Neopixel)
///
/// # Implementierungen
/// - **Production:** `RmtLedStrip` (ESP32 RMT Peripheral)
/// - **Testing:** `MockLedStrip` (in-memory Mock)
pub trait LedDriver {
    /// Anzahl adressierbarer LEDs
    fn len(&self) -> usize;

    /// Setzt eine einzelne LED
    ///
    /// # Fehlerbehandlung
    /// Gibt `LedError::IndexOutOfRange` zurück wenn `index >= len()`
    fn set(&mut self, index: usize, color: RGB8) -> Result<(), LedError>;

    /// Setzt alle LEDs auf dieselbe Farbe
    fn fill(&mut self, color: RGB8) -> Result<(), LedError> {
        for index in 0..self.len() {
            self.set(index, color)?;
        }
        Ok(())
    }

    /// Überträgt gepufferte Farben auf die Hardware
    fn show(&mut self) -> Result<(), LedError> {
        Ok(())
    }
}

/// Byte-Transport mit nicht-blockierender Verfügbarkeitsabfrage
///
/// Jeder `embedded-io` Typ mit `Read + ReadReady + Write` (UART, USB-Serial-JTAG)
/// ist automatisch ein `ByteTransport`.
pub trait ByteTransport {
    /// `true` wenn mindestens ein Byte ohne Blockieren gelesen werden kann
    fn available(&mut self) -> Result<bool, TransportError>;

    /// Liest die verfügbaren Bytes (höchstens `buf.len()`)
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransportError>;

    /// Schreibt alle Bytes
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError>;
}

impl<T> ByteTransport for T
where
    T: Read + ReadReady + Write,
{
    fn available(&mut self) -> Result<bool, TransportError> {
        self.read_ready().map_err(transport_error::<T>)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        match Read::read(self, buf) {
            Ok(0) if !buf.is_empty() => Err(TransportError::Disconnected),
            Ok(n) => Ok(n),
            Err(e) => Err(transport_error::<T>(e)),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.write_all(bytes).map_err(transport_error::<T>)?;
        self.flush().map_err(transport_error::<T>)
    }
}

fn transport_error<T: ErrorType>(error: T::Error) -> TransportError {
    use embedded_io::Error;
    match error.kind() {
        ErrorKind::NotConnected
        | ErrorKind::BrokenPipe
        | ErrorKind::ConnectionReset
        | ErrorKind::ConnectionAborted => TransportError::Disconnected,
        _ => TransportError::Io,
    }
}
