use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::RwLock;
use tokio::sync::mpsc::Sender;

use crate::constants::UNREGISTERED_NICK;
use crate::errors::InternalIrcError;
use crate::message_models::IrcMessage;
use crate::replies::IrcReply;
use crate::types::ClientId;

static NEXT_CLIENT_ID: AtomicUsize = AtomicUsize::new(1);

pub fn next_client_id() -> ClientId {
    NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Registration lifecycle. NICK-only and USER-only are the two half-way
/// states of the handshake; Away is a substate of Registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    None,
    Nick,
    User,
    Registered,
    Away,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub client_id: ClientId,
    pub state: SessionState,
    /// "*" until a nickname is claimed.
    pub nickname: String,
    pub username: String,
    pub realname: String,
}

impl Session {
    fn new(client_id: ClientId) -> Self {
        Self {
            client_id,
            state: SessionState::None,
            nickname: UNREGISTERED_NICK.to_owned(),
            username: String::new(),
            realname: String::new(),
        }
    }

    pub fn is_registered(&self) -> bool {
        matches!(self.state, SessionState::Registered | SessionState::Away)
    }
}

/// What the dispatcher tells the reader task after each command.
#[derive(Debug, Clone, PartialEq)]
pub enum UserStatus {
    Active,
    /// The user sent QUIT; the reader stops and cleanup runs with this
    /// quit message.
    Leaving(Option<String>),
}

/// Shared handle on one live connection: the session data plus the outbound
/// queue its writer task drains.
#[derive(Debug, Clone)]
pub struct UserState {
    pub session: Arc<RwLock<Session>>,
    pub tx_outbound: Sender<IrcMessage>,
}

impl UserState {
    pub fn new(client_id: ClientId, tx_outbound: Sender<IrcMessage>) -> Self {
        UserState {
            session: Arc::new(RwLock::new(Session::new(client_id))),
            tx_outbound,
        }
    }

    pub async fn get_caracs(&self) -> Session {
        self.session.read().await.clone()
    }

    pub async fn is_registered(&self) -> bool {
        self.session.read().await.is_registered()
    }

    /// Queue a reply for this client. Failure means the writer task is gone,
    /// which the caller treats as a disconnect.
    pub async fn send(&self, reply: IrcReply<'_>) -> Result<(), InternalIrcError> {
        let client_id = self.session.read().await.client_id;
        self.tx_outbound
            .send(IrcMessage::new(reply.format()))
            .await
            .map_err(|_| InternalIrcError::OutboundClosed(client_id))
    }

    /// Queue a reply for some other client; a closed peer queue is the
    /// peer's problem and is swallowed here.
    pub async fn relay(&self, reply: IrcReply<'_>) {
        let _ = self.tx_outbound.send(IrcMessage::new(reply.format())).await;
    }
}
