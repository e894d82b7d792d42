// Verbindung zu einem Board: Öffnen, Schließen, gemeinsamer Zugriff

use std::io;
use std::path::PathBuf;

use log::{debug, info};
use serial2_tokio::{CharSize, Parity, SerialPort, StopBits};
use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tokio::sync::{Mutex, MutexGuard};

/// Öffnet den Transport zu einem Board
///
/// Abstrahiert den seriellen Port, damit Tests In-Memory-Streams nutzen können.
pub trait Connector: Send + Sync + 'static {
    type Port: AsyncRead + AsyncWrite + Unpin + Send + 'static;

    fn open(&self) -> io::Result<Self::Port>;

    /// Name für Log-Ausgaben
    fn name(&self) -> &str;
}

/// Serieller Port, 8N1 im Raw-Modus
pub struct SerialConnector {
    path: PathBuf,
    name: String,
    baud: u32,
}

impl SerialConnector {
    pub fn new(path: impl Into<PathBuf>, baud: u32) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name, baud }
    }
}

impl Connector for SerialConnector {
    type Port = SerialPort;

    fn open(&self) -> io::Result<SerialPort> {
        SerialPort::open(&self.path, |mut settings: serial2_tokio::Settings| {
            settings.set_raw();
            settings.set_baud_rate(self.baud)?;
            settings.set_char_size(CharSize::Bits8);
            settings.set_stop_bits(StopBits::One);
            settings.set_parity(Parity::None);
            Ok(settings)
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Port-Handle, gemeinsam genutzt vom Reader- und Heartbeat-Task eines Boards
///
/// `None` heißt geschlossen: der nächste Zugriff öffnet neu.
pub struct Link<C: Connector> {
    connector: C,
    port: Mutex<Option<BufReader<C::Port>>>,
}

pub type PortGuard<'a, C> = MutexGuard<'a, Option<BufReader<<C as Connector>::Port>>>;

impl<C: Connector> Link<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            port: Mutex::new(None),
        }
    }

    #[cfg(test)]
    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn name(&self) -> &str {
        self.connector.name()
    }

    pub async fn lock(&self) -> PortGuard<'_, C> {
        self.port.lock().await
    }

    /// Öffnet den Port, falls er geschlossen ist
    pub fn ensure_open<'a>(
        &self,
        slot: &'a mut Option<BufReader<C::Port>>,
    ) -> io::Result<&'a mut BufReader<C::Port>> {
        if slot.is_none() {
            let port = self.connector.open()?;
            info!("Opened {}", self.name());
            *slot = Some(BufReader::new(port));
        }
        slot.as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "port not open"))
    }

    /// Verwirft das Handle, der Port wird beim Drop geschlossen
    pub fn close(&self, slot: &mut Option<BufReader<C::Port>>) {
        if slot.take().is_some() {
            debug!("Closed {}", self.name());
        }
    }
}
