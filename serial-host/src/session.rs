// Pro Board zwei Tasks: Reader (Meldungen auswerten) und Heartbeat (senden)

use std::sync::Arc;

use log::{info, warn};
use serial_core::command;
use serial_core::dispatch::report_message;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt};
use tokio::time::{sleep, timeout};

use crate::config::HostConfig;
use crate::error::HostError;
use crate::link::{Connector, Link};

// ============================================================================
// Reader
// ============================================================================

/// Liest Zeilen vom Board und wandelt sie in Report-Zeilen um
pub struct Reader<C: Connector> {
    link: Arc<Link<C>>,
    config: Arc<HostConfig>,
    line: Vec<u8>,
}

impl<C: Connector> Reader<C> {
    pub fn new(link: Arc<Link<C>>, config: Arc<HostConfig>) -> Self {
        Self {
            link,
            config,
            line: Vec::new(),
        }
    }

    /// Eine Iteration inklusive der abschließenden Pause
    ///
    /// Fehler schließen den Port, nach dem Backoff wird neu geöffnet.
    pub async fn step(&mut self) -> Vec<String> {
        match self.read_frame().await {
            Ok(Some(frame)) => {
                sleep(self.config.poll_interval).await;
                command::decode(&frame)
                    .map(report_message)
                    .unwrap_or_default()
            }
            Ok(None) => {
                sleep(self.config.poll_interval).await;
                Vec::new()
            }
            Err(e) => {
                warn!(
                    "Exception on read, did the board disconnect ? ({}: {})",
                    self.link.name(),
                    e
                );
                self.line.clear();
                sleep(self.config.backoff).await;
                Vec::new()
            }
        }
    }

    /// Höchstens eine vollständige Zeile innerhalb des Lese-Timeouts
    ///
    /// Angefangene Zeilen bleiben im Puffer und werden beim nächsten Aufruf
    /// fortgesetzt.
    async fn read_frame(&mut self) -> Result<Option<Vec<u8>>, HostError> {
        let mut slot = self.link.lock().await;
        let result = match self.link.ensure_open(&mut slot) {
            Ok(port) => {
                match timeout(self.config.read_timeout, port.read_until(b'\n', &mut self.line)).await
                {
                    Err(_elapsed) => Ok(None),
                    Ok(Ok(0)) => Err(HostError::Disconnected),
                    Ok(Ok(_)) if self.line.last() == Some(&b'\n') => {
                        let mut frame = std::mem::take(&mut self.line);
                        frame.pop();
                        if frame.last() == Some(&b'\r') {
                            frame.pop();
                        }
                        Ok(Some(frame))
                    }
                    // EOF mitten in einer Zeile
                    Ok(Ok(_)) => Err(HostError::Disconnected),
                    Ok(Err(e)) => Err(e.into()),
                }
            }
            Err(e) => Err(e.into()),
        };

        if result.is_err() {
            self.link.close(&mut slot);
        }
        result
    }

    pub async fn run(mut self) {
        loop {
            for line in self.step().await {
                println!("{}", line);
            }
        }
    }
}

// ============================================================================
// Heartbeat
// ============================================================================

/// Sendet die Heartbeat-Zeile in festem Abstand
pub struct Heartbeat<C: Connector> {
    link: Arc<Link<C>>,
    config: Arc<HostConfig>,
}

impl<C: Connector> Heartbeat<C> {
    pub fn new(link: Arc<Link<C>>, config: Arc<HostConfig>) -> Self {
        Self { link, config }
    }

    /// Ein Sendeversuch inklusive Pause, `true` bei Erfolg
    pub async fn step(&mut self) -> bool {
        let sent = match self.send().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Could not send to {}: {}", self.link.name(), e);
                false
            }
        };
        let pause = if sent {
            self.config.heartbeat_interval
        } else {
            self.config.backoff
        };
        sleep(pause).await;
        sent
    }

    async fn send(&self) -> Result<(), HostError> {
        let mut slot = self.link.lock().await;
        let port = match self.link.ensure_open(&mut slot) {
            Ok(port) => port,
            Err(e) => return Err(e.into()),
        };

        info!("Sending Hello {}", self.link.name());
        let port = port.get_mut();
        let result = async {
            port.write_all(&self.config.heartbeat).await?;
            port.flush().await
        }
        .await;

        if result.is_err() {
            self.link.close(&mut slot);
        }
        Ok(result?)
    }

    pub async fn run(mut self) {
        loop {
            self.step().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, DuplexStream};

    /// Liefert vorbereitete Streams, danach schlägt `open` fehl
    struct MockConnector {
        ports: Mutex<VecDeque<DuplexStream>>,
        opened: Mutex<usize>,
    }

    impl MockConnector {
        fn new(ports: Vec<DuplexStream>) -> Self {
            Self {
                ports: Mutex::new(ports.into()),
                opened: Mutex::new(0),
            }
        }
    }

    impl Connector for MockConnector {
        type Port = DuplexStream;

        fn open(&self) -> io::Result<DuplexStream> {
            *self.opened.lock().unwrap() += 1;
            self.ports
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such port"))
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    fn config() -> Arc<HostConfig> {
        Arc::new(HostConfig {
            baud: 115_200,
            heartbeat_interval: Duration::from_secs(2),
            poll_interval: Duration::from_millis(100),
            backoff: Duration::from_secs(1),
            read_timeout: Duration::from_millis(50),
            heartbeat: b"\"Hello\"\n".to_vec(),
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_reader_reports_lines() {
        let (board, host) = tokio::io::duplex(256);
        let link = Arc::new(Link::new(MockConnector::new(vec![host])));
        let mut reader = Reader::new(link, config());
        let mut board = board;

        board
            .write_all(b"not-json-text\n{\"id\":\"x\",\"temperature\":20}\n")
            .await
            .unwrap();

        assert_eq!(reader.step().await, vec!["Board ?? sent: not-json-text"]);
        assert_eq!(reader.step().await, vec!["Temperature x: 20°C"]);
        assert!(reader.step().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reader_only_reports_released_buttons() {
        let (mut board, host) = tokio::io::duplex(256);
        let link = Arc::new(Link::new(MockConnector::new(vec![host])));
        let mut reader = Reader::new(link, config());

        board
            .write_all(
                b"{\"id\":\"b1\",\"buttons\":[{\"status\":\"PRESSED\",\"id\":\"BOOT\"},{\"status\":\"RELEASED\",\"id\":\"BOOT\"}]}\n",
            )
            .await
            .unwrap();

        assert_eq!(reader.step().await, vec!["Button BOOT clicked on b1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reader_joins_partial_lines() {
        let (mut board, host) = tokio::io::duplex(256);
        let link = Arc::new(Link::new(MockConnector::new(vec![host])));
        let mut reader = Reader::new(link, config());

        board.write_all(b"{\"temperature\":").await.unwrap();
        assert!(reader.step().await.is_empty());

        board.write_all(b"21.5}\r\n").await.unwrap();
        assert_eq!(reader.step().await, vec!["Temperature ??: 21.5°C"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reader_reconnects_after_eof() {
        let (board, first) = tokio::io::duplex(64);
        let (mut second_board, second) = tokio::io::duplex(64);
        let link = Arc::new(Link::new(MockConnector::new(vec![first, second])));
        let mut reader = Reader::new(link.clone(), config());

        drop(board);
        assert!(reader.step().await.is_empty());
        assert!(link.lock().await.is_none());

        second_board.write_all(b"hi\n").await.unwrap();
        assert_eq!(reader.step().await, vec!["Board ?? sent: hi"]);
        assert_eq!(*link.connector().opened.lock().unwrap(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_failure_waits_for_backoff() {
        let link = Arc::new(Link::new(MockConnector::new(Vec::new())));
        let mut reader = Reader::new(link, config());

        let start = tokio::time::Instant::now();
        assert!(reader.step().await.is_empty());
        assert!(start.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_heartbeat_writes_hello() {
        let (mut board, host) = tokio::io::duplex(64);
        let link = Arc::new(Link::new(MockConnector::new(vec![host])));
        let mut heartbeat = Heartbeat::new(link, config());

        assert!(heartbeat.step().await);
        assert!(heartbeat.step().await);

        let mut received = [0u8; 16];
        board.read_exact(&mut received).await.unwrap();
        assert_eq!(&received, b"\"Hello\"\n\"Hello\"\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_heartbeat_without_port() {
        let link = Arc::new(Link::new(MockConnector::new(Vec::new())));
        let mut heartbeat = Heartbeat::new(link, config());
        assert!(!heartbeat.step().await);
    }
}
