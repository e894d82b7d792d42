// In-memory Mocks für Unit Tests (nur cfg(test))

use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::Cell;
use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_io::{ErrorKind, ErrorType, Read, ReadReady, Write};
use rgb::RGB8;

use crate::traits::{LedDriver, LedError};

/// Serieller Port mit Eingabe-Queue und aufgezeichneter Ausgabe
#[derive(Default)]
pub struct MockPort {
    pub input: VecDeque<u8>,
    pub output: Vec<u8>,
    pub disconnected: bool,
}

impl MockPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(bytes: &[u8]) -> Self {
        let mut port = Self::new();
        port.push_input(bytes);
        port
    }

    pub fn push_input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }
}

impl ErrorType for MockPort {
    type Error = ErrorKind;
}

impl ReadReady for MockPort {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        if self.disconnected {
            return Err(ErrorKind::BrokenPipe);
        }
        Ok(!self.input.is_empty())
    }
}

impl Read for MockPort {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.disconnected {
            return Err(ErrorKind::BrokenPipe);
        }
        let count = buf.len().min(self.input.len());
        for slot in &mut buf[..count] {
            *slot = self.input.pop_front().unwrap_or_default();
        }
        Ok(count)
    }
}

impl Write for MockPort {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.disconnected {
            return Err(ErrorKind::BrokenPipe);
        }
        self.output.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// LED Strip mit fester Länge
pub struct MockLedStrip {
    pub pixels: Vec<RGB8>,
    pub fill_count: usize,
}

impl MockLedStrip {
    pub fn new(len: usize) -> Self {
        Self {
            pixels: alloc::vec![RGB8::default(); len],
            fill_count: 0,
        }
    }
}

impl LedDriver for MockLedStrip {
    fn len(&self) -> usize {
        self.pixels.len()
    }

    fn set(&mut self, index: usize, color: RGB8) -> Result<(), LedError> {
        let len = self.pixels.len();
        let pixel = self
            .pixels
            .get_mut(index)
            .ok_or(LedError::IndexOutOfRange { index, len })?;
        *pixel = color;
        Ok(())
    }

    fn fill(&mut self, color: RGB8) -> Result<(), LedError> {
        self.fill_count += 1;
        self.pixels.iter_mut().for_each(|p| *p = color);
        Ok(())
    }
}

/// Eingang mit frei setzbarem Pegel, Klone teilen den Pegel
#[derive(Clone)]
pub struct MockInput {
    level: Rc<Cell<bool>>,
}

impl MockInput {
    pub fn new(level: bool) -> Self {
        Self {
            level: Rc::new(Cell::new(level)),
        }
    }

    pub fn set(&self, level: bool) {
        self.level.set(level);
    }
}

impl digital::ErrorType for MockInput {
    type Error = Infallible;
}

impl InputPin for MockInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level.get())
    }
}

/// Ausgang, der alle Pegel aufzeichnet
#[derive(Default)]
pub struct MockOutput {
    pub levels: Vec<bool>,
}

impl digital::ErrorType for MockOutput {
    type Error = Infallible;
}

impl OutputPin for MockOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.push(true);
        Ok(())
    }
}

/// Delay, der nur die Summe der Wartezeit mitzählt
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
