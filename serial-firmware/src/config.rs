// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen

// ============================================================================
// Board-Pins
// ============================================================================

/// Pin-Tabelle des Boards (ESP32-C6-DevKitC-1)
///
/// Namen werden beim Start gegen die Kandidatenlisten aus
/// `serial_core::capability` geprüft. Fehlt ein Eintrag, läuft die Rolle
/// ohne diese Hardware weiter. Jede GPIO-Nummer darf nur einmal vorkommen.
pub const BOARD_PINS: [(&str, u8); 3] = [
    ("NEOPIXEL", 8), // WS2812 auf dem DevKit
    ("BOOT", 9),     // BOOT-Taster, extern mit Pull-Up
    ("LED", 15),     // externe Status-LED
];

// ============================================================================
// LED Konfiguration
// ============================================================================

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

/// Anzahl der LEDs im Strip für Farblisten
pub const COLORS_LED_COUNT: usize = 4;

/// RMT-Buffer für den Farblisten-Strip (24 Pulse pro LED + 1 Reset)
pub const COLORS_RMT_BUFFER: usize = COLORS_LED_COUNT * 24 + 1;

/// Anzahl der LEDs im Strip für JSON-Kommandos
pub const EXCHANGE_LED_COUNT: usize = 1;

/// RMT-Buffer für den Kommando-Strip
pub const EXCHANGE_RMT_BUFFER: usize = EXCHANGE_LED_COUNT * 24 + 1;

/// Länge eines Blink-Pulses (an und aus) in Millisekunden
pub const BLINK_PULSE_MS: u32 = serial_core::dispatch::BLINK_PULSE_MS;

// ============================================================================
// Schleifen
// ============================================================================

/// Pause pro Iteration der Farblisten-Schleife
pub const COLORS_INTERVAL_MS: u64 = 10;

/// Pause pro Iteration der Kommando-Schleife
pub const EXCHANGE_INTERVAL_MS: u64 = 100;

/// Pause pro Iteration von Echo und Pass-Through
pub const ECHO_INTERVAL_MS: u64 = 10;

/// Wartezeit nach einem Transport-Fehler
pub const RECONNECT_DELAY_MS: u64 = 1000;

// ============================================================================
// Serielle Schnittstellen
// ============================================================================

/// Maximale Zeilenlänge inkl. `\n`
pub const FRAME_CAPACITY: usize = 256;

/// Lese-Buffer für Echo und Pass-Through
pub const CHUNK_SIZE: usize = 64;

/// Baudrate der Hardware-UART (Pass-Through)
pub const UART_BAUDRATE: u32 = 115_200;

/// UART1 RX-Pin (GPIO-Nummer)
pub const UART_RX_GPIO: u8 = 17;

/// UART1 TX-Pin (GPIO-Nummer)
pub const UART_TX_GPIO: u8 = 16;

/// Heap-Größe in Bytes (Frames, JSON-Werte)
pub const HEAP_SIZE: usize = 32 * 1024;
