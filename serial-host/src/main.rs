// serial-host: Begleitprogramm auf dem Rechner
//
// Pro Port laufen ein Reader- und ein Heartbeat-Task auf einem Thread.
// Fällt ein Board aus, öffnen beide Tasks den Port nach dem Backoff neu,
// die anderen Boards laufen unbeeinflusst weiter.

mod config;
mod error;
mod link;
mod session;

use std::sync::Arc;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use log::{error, info};

use crate::config::{Cli, HostConfig};
use crate::link::{Link, SerialConnector};
use crate::session::{Heartbeat, Reader};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if cli.serial_ports.is_empty() {
        Cli::command()
            .error(ErrorKind::MissingRequiredArgument, "No port specified")
            .exit();
    }

    let config = match HostConfig::try_from(&cli) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            error!("Error: {}", e);
            std::process::exit(1);
        }
    };

    for path in &cli.serial_ports {
        info!("Watching {} at {} baud", path, config.baud);
        let link = Arc::new(Link::new(SerialConnector::new(path, config.baud)));
        tokio::spawn(Reader::new(link.clone(), config.clone()).run());
        tokio::spawn(Heartbeat::new(link, config.clone()).run());
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Error: {}", e);
    }
    println!("Interrupted - quitting");
}
