// Task-Modul: eine Embassy Task pro Geräte-Rolle
//
// Jede Rolle ist eine einzelne Endlosschleife mit fester Pause pro Iteration.
// Die Logik steckt in serial-core, die Tasks verbinden sie mit der Hardware.

pub mod colors;
pub mod echo;
pub mod exchange;
pub mod passthrough;

use esp_hal::Blocking;
use esp_hal::usb_serial_jtag::UsbSerialJtag;

/// USB-Serial-JTAG Konsole, Verbindung zum Host
pub type Console = UsbSerialJtag<'static, Blocking>;

// Re-export Tasks für einfachen Import
pub use colors::colors_task;
pub use echo::echo_task;
pub use exchange::exchange_task;
pub use passthrough::passthrough_task;
