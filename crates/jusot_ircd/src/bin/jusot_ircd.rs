use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use flexi_logger::{Duplicate, Logger};
use log::info;
use tokio::net::TcpListener;

use jusot_ircd::config::Config;
use jusot_ircd::handlers::client::handle_client;
use jusot_ircd::server_state::ServerState;

#[derive(Parser, Debug)]
#[command(name = "jusot_ircd", about = "An RFC 1459/2812 subset IRC server")]
struct Cli {
    /// Optional TOML configuration file; defaults apply without one.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured listen port.
    #[arg(long)]
    port: Option<u16>,

    /// Override the configured bind address.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    Logger::try_with_str("info")
        .and_then(|op| {
            op.log_to_stderr()
                .duplicate_to_stderr(Duplicate::All)
                .start()
        })
        .ok();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(port) = cli.port {
        config.network.port = port;
    }
    if let Some(bind) = cli.bind {
        config.network.bind_address = bind;
    }

    let listener =
        TcpListener::bind((config.network.bind_address.as_str(), config.network.port)).await?;
    info!(
        "Listening on {}:{}",
        config.network.bind_address, config.network.port
    );

    let server_state = Arc::new(ServerState::new(Arc::new(config)));

    loop {
        let (socket, addr) = listener.accept().await?;
        handle_client(socket, addr, Arc::clone(&server_state)).await;
    }
}
