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
use esp_hal::uart::{Config as UartConfig, Uart};
use esp_hal::usb_serial_jtag::UsbSerialJtag;

// Backtrace bei Panic
use esp_backtrace as _;

// Projekt-Module und Konfiguration
use serial_firmware::config::{HEAP_SIZE, UART_BAUDRATE, UART_RX_GPIO, UART_TX_GPIO};
use serial_firmware::hal::board;
use serial_firmware::tasks::passthrough_task;

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
esp_bootloader_esp_idf::esp_app_desc!();

/// Pass-Through Rolle: USB <-> UART1, Bytes unverändert
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // Kein Logger: USB-Serial-JTAG trägt ausschließlich die Nutzdaten

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

    let console = UsbSerialJtag::new(peripherals.USB_DEVICE);

    // SAFETY: UART-Pins kommen nicht in BOARD_PINS vor
    let (rx, tx) = unsafe { (board::take_pin(UART_RX_GPIO), board::take_pin(UART_TX_GPIO)) };
    let uart = Uart::new(
        peripherals.UART1,
        UartConfig::default().with_baudrate(UART_BAUDRATE),
    )
    .unwrap()
    .with_rx(rx)
    .with_tx(tx);

    spawner.spawn(passthrough_task(console, uart)).unwrap();

    // Main-Loop: schläft (alle Arbeit läuft im Task)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
