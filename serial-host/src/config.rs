// Host-Konfiguration: Kommandozeile und abgeleitete Laufzeit-Werte

use std::time::Duration;

use clap::Parser;
use serial_core::{Command, RawColor, command, palette};

use crate::error::HostError;

/// Text des Standard-Heartbeats, gesendet als JSON-String
pub const HEARTBEAT_TEXT: &str = "Hello";

/// Verbindet sich mit Boards über serielle Ports, sendet periodisch einen
/// Heartbeat und gibt Tasterklicks, Temperaturen und Rohdaten aus.
#[derive(Parser, Debug)]
#[command(name = "serial-host", version, about, long_about = None)]
pub struct Cli {
    /// Serielle Ports, z.B. /dev/ttyACM0 /dev/ttyACM1
    #[arg(value_name = "SERIAL_PORTS")]
    pub serial_ports: Vec<String>,

    /// Baudrate aller Ports
    #[arg(long, default_value_t = 115_200)]
    pub baud: u32,

    /// Abstand zwischen zwei Heartbeats
    #[arg(long, default_value_t = 2000)]
    pub heartbeat_ms: u64,

    /// Pause nach jeder gelesenen Zeile
    #[arg(long, default_value_t = 100)]
    pub poll_ms: u64,

    /// Wartezeit vor erneutem Öffnen nach einem Fehler
    #[arg(long, default_value_t = 1000)]
    pub backoff_ms: u64,

    /// Maximale Wartezeit eines Lesevorgangs
    #[arg(long, default_value_t = 50)]
    pub read_timeout_ms: u64,

    /// Farbe statt "Hello" senden: Name (orange) oder r,g,b
    #[arg(long, value_parser = parse_color)]
    pub color: Option<RawColor>,

    /// Mit jedem Heartbeat einen Blink anfordern
    #[arg(long)]
    pub blink: bool,
}

fn parse_color(text: &str) -> Result<RawColor, String> {
    palette::parse(text).ok_or_else(|| {
        let names: Vec<&str> = palette::COLORS.iter().map(|(name, _)| *name).collect();
        format!("expected r,g,b or one of: {}", names.join(", "))
    })
}

/// Laufzeit-Konfiguration, geteilt von allen Tasks
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    pub baud: u32,
    pub heartbeat_interval: Duration,
    pub poll_interval: Duration,
    pub backoff: Duration,
    pub read_timeout: Duration,
    /// Fertig kodierte Heartbeat-Zeile inkl. `\n`
    pub heartbeat: Vec<u8>,
}

impl TryFrom<&Cli> for HostConfig {
    type Error = HostError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        Ok(Self {
            baud: cli.baud,
            heartbeat_interval: Duration::from_millis(cli.heartbeat_ms),
            poll_interval: Duration::from_millis(cli.poll_ms),
            backoff: Duration::from_millis(cli.backoff_ms),
            read_timeout: Duration::from_millis(cli.read_timeout_ms),
            heartbeat: heartbeat_line(cli.color, cli.blink)?,
        })
    }
}

/// `"Hello"` oder ein Kommando-Objekt, wenn Farbe/Blink gewünscht sind
pub fn heartbeat_line(color: Option<RawColor>, blink: bool) -> Result<Vec<u8>, HostError> {
    if color.is_none() && !blink {
        let mut line = serde_json::to_vec(HEARTBEAT_TEXT)?;
        line.push(b'\n');
        return Ok(line);
    }

    let command = Command {
        color,
        blink,
        ..Command::default()
    };
    Ok(command::encode(&command)?)
}
