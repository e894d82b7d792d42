use thiserror::Error;

/// Fehler auf der Host-Seite
#[derive(Error, Debug)]
pub enum HostError {
    #[error("serial port: {0}")]
    Port(#[from] std::io::Error),
    #[error("board closed the connection")]
    Disconnected,
    #[error("could not encode message: {0}")]
    Encode(#[from] serde_json::Error),
}
