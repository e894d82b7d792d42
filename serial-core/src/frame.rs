//! Zeilen-Framing über einem Byte-Transport
//!
//! Nicht-blockierend: ein `poll()` liest nur, was der Transport gerade
//! bereithält, dann aber bis zum nächsten Trennzeichen. Unvollständige Zeilen bleiben bis zum nächsten Aufruf im Puffer.

use alloc::vec::Vec;

use log::warn;

use crate::error::{FormatError, TransportError};
use crate::traits::ByteTransport;

/// Zeilen-Trennzeichen des Protokolls
pub const DELIMITER: u8 = b'\n';

const CHUNK_SIZE: usize = 32;

/// Sammelt Bytes bis zum nächsten `\n`
///
/// `N` ist die maximale Zeilenlänge inkl. Trennzeichen. Längere Zeilen
/// werden bis zum nächsten Trennzeichen verworfen.
pub struct FrameReader<const N: usize> {
    buffer: heapless::Vec<u8, N>,
    discarding: bool,
}

impl<const N: usize> Default for FrameReader<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FrameReader<N> {
    pub const fn new() -> Self {
        Self {
            buffer: heapless::Vec::new(),
            discarding: false,
        }
    }

    /// Bytes im Puffer, die noch keine vollständige Zeile bilden
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Pollt den Transport
    ///
    /// Liest so lange, wie der Transport Bytes bereithält und noch kein
    /// Trennzeichen im Puffer liegt, höchstens `N` Bytes pro Aufruf.
    /// Liefert `Ok(None)` wenn keine vollständige Zeile vorliegt, sonst den
    /// Frame ohne `\n` bzw. `\r\n` (kann leer sein). Transport-Fehler werden
    /// unverändert an den Aufrufer gegeben.
    pub fn poll<T>(&mut self, transport: &mut T) -> Result<Option<Vec<u8>>, TransportError>
    where
        T: ByteTransport + ?Sized,
    {
        let mut total = 0;
        loop {
            if let Some(frame) = self.take_frame() {
                return Ok(Some(frame));
            }

            if self.buffer.is_full() {
                warn!("Frame: {}, dropping {} bytes", FormatError::FrameTooLong, N);
                self.buffer.clear();
                self.discarding = true;
            }

            if total >= N || !transport.available()? {
                return Ok(None);
            }

            let mut chunk = [0u8; CHUNK_SIZE];
            let space = (N - self.buffer.len()).min(CHUNK_SIZE);
            let count = transport.read(&mut chunk[..space])?;
            if count == 0 {
                return Ok(None);
            }
            total += count;

            for &byte in &chunk[..count] {
                if self.discarding {
                    if byte == DELIMITER {
                        self.discarding = false;
                    }
                    continue;
                }
                // Platz ist durch `space` garantiert
                let _ = self.buffer.push(byte);
            }
        }
    }

    fn take_frame(&mut self) -> Option<Vec<u8>> {
        let end = self.buffer.iter().position(|&b| b == DELIMITER)?;
        let mut frame = self.buffer[..end].to_vec();
        if frame.last() == Some(&b'\r') {
            frame.pop();
        }

        let consumed = end + 1;
        let remaining = self.buffer.len() - consumed;
        self.buffer.rotate_left(consumed);
        self.buffer.truncate(remaining);

        Some(frame)
    }
}
