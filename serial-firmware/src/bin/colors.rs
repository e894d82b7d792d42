// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Embassy Async Runtime
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;
use esp_hal::usb_serial_jtag::UsbSerialJtag;

// Backtrace bei Panic
use esp_backtrace as _;
use log::info;

// Projekt-Module und Konfiguration
use serial_firmware::config::HEAP_SIZE;
use serial_firmware::hal::board;
use serial_firmware::tasks::colors_task;

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
esp_bootloader_esp_idf::esp_app_desc!();

/// Farblisten-Rolle
///
/// Jede Zeile `R,G,B:R,G,B:...` vom Host setzt die LEDs ab Index 0.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // Logger über USB-Serial-JTAG (Level per ESP_LOG zur Build-Zeit)
    esp_println::logger::init_logger_from_env();

    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Heap Allocator initialisieren (Frames und JSON-Werte)
    esp_alloc::heap_allocator!(size: HEAP_SIZE);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    let caps = board::capabilities();
    // SAFETY: GPIO-Nummern aus BOARD_PINS werden nur hier übernommen
    let neopixel = caps.neopixel.map(|p| unsafe { board::take_pin(p.pin) });

    let console = UsbSerialJtag::new(peripherals.USB_DEVICE);

    info!("Colors: ready");
    spawner
        .spawn(colors_task(neopixel, peripherals.RMT, console))
        .unwrap();

    // Main-Loop: schläft (alle Arbeit läuft im Task)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
