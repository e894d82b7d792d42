//! Pass-Through: Bytes unverändert zwischen zwei Transporten kopieren
//!
//! Kein Framing, kein Puffer über die Runde hinaus.

use crate::error::TransportError;
use crate::traits::ByteTransport;

/// Kopiert die gerade verfügbaren Bytes von `from` nach `to`
pub fn pump<A, B>(from: &mut A, to: &mut B, buf: &mut [u8]) -> Result<usize, TransportError>
where
    A: ByteTransport + ?Sized,
    B: ByteTransport + ?Sized,
{
    if !from.available()? {
        return Ok(0);
    }
    let count = from.read(buf)?;
    to.write(&buf[..count])?;
    Ok(count)
}

/// Eine Runde in beide Richtungen: erst `a` → `b`, dann `b` → `a`
///
/// Gibt die Anzahl kopierter Bytes je Richtung zurück.
pub fn relay<A, B>(a: &mut A, b: &mut B, buf: &mut [u8]) -> Result<(usize, usize), TransportError>
where
    A: ByteTransport + ?Sized,
    B: ByteTransport + ?Sized,
{
    let forward = pump(a, b, buf)?;
    let backward = pump(b, a, buf)?;
    Ok((forward, backward))
}
