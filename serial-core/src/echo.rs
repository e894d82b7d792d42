//! Echo-Modus: Großschreibung, `\r` → `\r\n`, eingerahmt in `<...>`
//!
//! Nicht dekodierbare Blöcke werden roh in `[...]` eingerahmt. Die `[`-Klammer
//! bleibt über mehrere Aufrufe offen, bis ein gültiger Block oder eine
//! Leerlauf-Runde sie mit `]` schließt.

use alloc::vec::Vec;

use crate::error::TransportError;
use crate::traits::ByteTransport;

#[derive(Debug, Default)]
pub struct EchoSession {
    bad_code: bool,
}

impl EchoSession {
    pub const fn new() -> Self {
        Self { bad_code: false }
    }

    /// `true` solange eine `[`-Klammer offen ist
    pub fn in_error_mode(&self) -> bool {
        self.bad_code
    }

    /// Antwort auf einen empfangenen Block
    pub fn process(&mut self, received: &[u8]) -> Vec<u8> {
        match core::str::from_utf8(received) {
            Ok(text) => {
                let mut data = Vec::with_capacity(received.len() + 3);
                if self.bad_code {
                    data.push(b']');
                    self.bad_code = false;
                }
                data.push(b'<');
                for byte in text.bytes().map(|b| b.to_ascii_uppercase()) {
                    data.push(byte);
                    if byte == b'\r' {
                        data.push(b'\n');
                    }
                }
                data.push(b'>');
                data
            }
            Err(_) => {
                let mut data = Vec::with_capacity(received.len() + 1);
                if !self.bad_code {
                    data.push(b'[');
                }
                data.extend_from_slice(received);
                self.bad_code = true;
                data
            }
        }
    }

    /// Leerlauf-Runde: schließt eine offene `[`-Klammer
    pub fn idle(&mut self) -> Option<&'static [u8]> {
        if self.bad_code {
            self.bad_code = false;
            Some(b"]")
        } else {
            None
        }
    }

    /// Eine Runde der Echo-Schleife auf einem Transport
    pub fn poll<T>(&mut self, transport: &mut T, buf: &mut [u8]) -> Result<(), TransportError>
    where
        T: ByteTransport + ?Sized,
    {
        if transport.available()? {
            let count = transport.read(buf)?;
            let reply = self.process(&buf[..count]);
            transport.write(&reply)
        } else if let Some(close) = self.idle() {
            transport.write(close)
        } else {
            Ok(())
        }
    }
}
