// Echo-Task - Antwortet in Großbuchstaben, eingerahmt in <...>
use embassy_time::{Duration, Timer};
use log::warn;
use serial_core::{ByteTransport, EchoSession};

use crate::config::{CHUNK_SIZE, ECHO_INTERVAL_MS, RECONNECT_DELAY_MS};
use crate::tasks::Console;

pub async fn echo_logic<T: ByteTransport>(transport: &mut T) -> ! {
    let mut session = EchoSession::new();
    let mut buf = [0u8; CHUNK_SIZE];

    loop {
        if let Err(e) = session.poll(transport, &mut buf) {
            warn!("Serial: {}", e);
            Timer::after(Duration::from_millis(RECONNECT_DELAY_MS)).await;
        }

        Timer::after(Duration::from_millis(ECHO_INTERVAL_MS)).await;
    }
}

#[embassy_executor::task]
pub async fn echo_task(mut console: Console) {
    echo_logic(&mut console).await
}
