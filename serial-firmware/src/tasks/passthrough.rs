// Pass-Through Task - USB und Hardware-UART unverändert verbinden
use embassy_time::{Duration, Timer};
use esp_hal::Blocking;
use esp_hal::uart::Uart;
use log::warn;
use serial_core::{ByteTransport, passthrough};

use crate::config::{CHUNK_SIZE, ECHO_INTERVAL_MS, RECONNECT_DELAY_MS};
use crate::tasks::Console;

/// Kopiert in jeder Runde die verfügbaren Bytes in beide Richtungen
pub async fn passthrough_logic<A, B>(host: &mut A, device: &mut B) -> !
where
    A: ByteTransport,
    B: ByteTransport,
{
    let mut buf = [0u8; CHUNK_SIZE];

    loop {
        if let Err(e) = passthrough::relay(host, device, &mut buf) {
            warn!("Serial: {}", e);
            Timer::after(Duration::from_millis(RECONNECT_DELAY_MS)).await;
        }

        Timer::after(Duration::from_millis(ECHO_INTERVAL_MS)).await;
    }
}

#[embassy_executor::task]
pub async fn passthrough_task(mut console: Console, mut uart: Uart<'static, Blocking>) {
    passthrough_logic(&mut console, &mut uart).await
}
