// Library-Root: Hardware-Anbindung der Geräte-Rollen
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Heap für Frames und JSON-Werte aus serial-core
extern crate alloc;

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// ============================================================================
// Testing-Strategie
// ============================================================================
//
// Dieses Crate kompiliert nur für riscv32imac-unknown-none-elf. Die gesamte
// Protokoll-Logik liegt deshalb in serial-core und wird dort bzw. in
// serial-tests auf dem Host mit Mock-Implementierungen getestet. Die
// `*_logic()` Funktionen in `tasks` sind generisch über die Traits aus
// serial-core und enthalten selbst nur Schleife und Pausen.
