//! Serial Core - Platform-agnostic Protocol and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert das Zeilen-Protokoll zwischen Host und Board,
//! die Traits für LEDs und Transporte und die Geräte-Schleifen.

#![no_std]

extern crate alloc;

pub mod button;
pub mod capability;
pub mod color_list;
pub mod command;
pub mod device;
pub mod dispatch;
pub mod echo;
pub mod error;
pub mod frame;
pub mod palette;
pub mod passthrough;
pub mod traits;
pub mod types;

#[cfg(test)]
mod mock;

// Re-exports für einfachen Zugriff
pub use button::{Button, EdgeDetector};
pub use capability::{Capabilities, Resolved};
pub use device::{ColorDevice, ExchangeDevice};
pub use dispatch::{BlinkMode, Dispatcher};
pub use echo::EchoSession;
pub use error::{FormatError, TransportError};
pub use frame::FrameReader;
pub use traits::{ByteTransport, LedDriver, LedError};
pub use types::{ButtonEvent, ButtonStatus, ColorGroup, ColorList, Command, Message, RawColor};
