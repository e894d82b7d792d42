// Hardware Abstraction Layer (HAL) Module
//
// Implementiert die Traits aus serial-core für die ESP32-C6 Hardware.

pub mod board;
pub mod led_writer;

pub use led_writer::RmtLedStrip;
