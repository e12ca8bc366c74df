use std::net::SocketAddr;
use std::sync::Arc;

use log::{error, info};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;

use super::request::handle_request;
use crate::constants::DEFAULT_QUIT_MESSAGE;
use crate::message_models::IrcMessage;
use crate::server_state::ServerState;
use crate::types::ClientId;
use crate::user_state::{UserState, UserStatus, next_client_id};

// Size of the personal outbound channel a writer task drains.
const OUTBOUND_CHANNEL_SIZE: usize = 64;

/// Entry point for a new client connection: allocate the session slot and
/// split the socket into one reader and one writer task.
pub async fn handle_client(socket: TcpStream, addr: SocketAddr, server: Arc<ServerState>) {
    info!("Client connected: {addr:?}");

    let (tx_outbound, rx_outbound) = mpsc::channel::<IrcMessage>(OUTBOUND_CHANNEL_SIZE);
    let client_id = next_client_id();
    let user_state = UserState::new(client_id, tx_outbound);
    server.add_connecting_user(client_id, &user_state);

    let (read_half, write_half) = io::split(socket);

    tokio::spawn(client_reader_task(read_half, client_id, server, user_state));
    tokio::spawn(client_writer_task(write_half, client_id, rx_outbound));
}

async fn client_reader_task(
    reader: io::ReadHalf<TcpStream>,
    client_id: ClientId,
    server: Arc<ServerState>,
    user_state: UserState,
) {
    let mut buffered_reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut quit_message: Option<String> = None;

    loop {
        buf.clear();
        match buffered_reader.read_until(b'\n', &mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        // a line that is not UTF-8 cannot parse; drop it like an empty
        // command
        let Ok(line) = std::str::from_utf8(&buf) else {
            continue;
        };
        info!(">> incoming [{client_id}] # {}", line.trim_end());

        match handle_request(line, client_id, &server, &user_state).await {
            Ok(UserStatus::Active) => {}
            Ok(UserStatus::Leaving(message)) => {
                quit_message = message;
                break;
            }
            Err(e) => {
                error!("[{client_id}] dropping connection: {e}");
                break;
            }
        }
    }

    server
        .disconnect_cleanup(
            client_id,
            quit_message.as_deref().unwrap_or(DEFAULT_QUIT_MESSAGE),
        )
        .await;
    info!("[{client_id}] Client disconnected.");
}

// Drains the outbound queue onto the socket. When every sender is gone the
// queue closes and the socket is shut down, which is how a QUIT close is
// deferred until the ERROR line went out.
async fn client_writer_task(
    mut writer: io::WriteHalf<TcpStream>,
    client_id: ClientId,
    mut rx_outbound: mpsc::Receiver<IrcMessage>,
) {
    while let Some(message) = rx_outbound.recv().await {
        if let Err(e) = writer.write_all(message.raw_line.as_bytes()).await {
            error!("[{client_id}] failed to write: {e:?}");
            break;
        }
    }
    let _ = writer.shutdown().await;
}
