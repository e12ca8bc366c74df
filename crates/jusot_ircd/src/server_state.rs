use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use log::info;

use crate::channels_models::IrcChannel;
use crate::config::Config;
use crate::constants::UNREGISTERED_NICK;
use crate::replies::IrcReply;
use crate::types::{ChannelName, ClientId, Nickname};
use crate::user_state::UserState;

/// The global indices relating connections, nicknames, channels and away
/// state. `clients` owns the session handles; `nick_to_client` is the
/// non-owning routing index rebuilt on every nickname change.
#[derive(Debug)]
pub struct ServerState {
    pub clients: DashMap<ClientId, UserState>,
    pub nick_to_client: DashMap<Nickname, ClientId>,
    pub channels: DashMap<ChannelName, Arc<IrcChannel>>,
    pub away_messages: DashMap<Nickname, String>,
    /// Captured once at startup, rendered in RPL_CREATED.
    pub created_at: String,
    pub config: Arc<Config>,
}

impl ServerState {
    pub fn new(config: Arc<Config>) -> Self {
        ServerState {
            clients: DashMap::new(),
            nick_to_client: DashMap::new(),
            channels: DashMap::new(),
            away_messages: DashMap::new(),
            created_at: chrono::Local::now().to_rfc2822(),
            config,
        }
    }

    pub fn add_connecting_user(&self, client_id: ClientId, user_state: &UserState) {
        self.clients.insert(client_id, user_state.clone());
    }

    pub fn user_state_of(&self, client_id: ClientId) -> Option<UserState> {
        self.clients.get(&client_id).map(|entry| entry.value().clone())
    }

    pub fn client_of_nick(&self, nick: &str) -> Option<UserState> {
        let client_id = *self.nick_to_client.get(nick)?;
        self.user_state_of(client_id)
    }

    pub fn nick_exists(&self, nick: &str) -> bool {
        self.nick_to_client.contains_key(nick)
    }

    /// Atomically claim `nick` for `client_id`. The entry API keeps the
    /// at-most-one-binding invariant under concurrent NICK commands.
    pub fn try_claim_nick(&self, nick: &str, client_id: ClientId) -> bool {
        match self.nick_to_client.entry(nick.to_owned()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(vacant) => {
                vacant.insert(client_id);
                true
            }
        }
    }

    /// Release `nick` only while it still belongs to `client_id`.
    pub fn release_nick(&self, nick: &str, client_id: ClientId) {
        self.nick_to_client
            .remove_if(nick, |_, owner| *owner == client_id);
    }

    pub fn get_channel(&self, name: &str) -> Option<Arc<IrcChannel>> {
        self.channels.get(name).map(|entry| entry.value().clone())
    }

    /// Existing channel, or a fresh one founded (and operated) by `founder`.
    /// The second value is true when the channel was just created.
    pub fn get_or_create_channel(&self, name: &str, founder: &str) -> (Arc<IrcChannel>, bool) {
        match self.channels.entry(name.to_owned()) {
            Entry::Occupied(occupied) => (occupied.get().clone(), false),
            Entry::Vacant(vacant) => {
                let channel = Arc::new(IrcChannel::new(name.to_owned(), founder.to_owned()));
                vacant.insert(channel.clone());
                (channel, true)
            }
        }
    }

    /// A channel with no members does not exist.
    pub fn drop_channel_if_empty(&self, name: &str) {
        self.channels.remove_if(name, |_, channel| {
            channel
                .members
                .try_read()
                .map(|members| members.is_empty())
                .unwrap_or(false)
        });
    }

    pub fn channel_names(&self) -> Vec<ChannelName> {
        self.channels.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Nicknames currently bound to a connection, for the NAMES `*` listing.
    pub fn bound_nicknames(&self) -> Vec<Nickname> {
        self.nick_to_client
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// (registered, unknown) session counts for the LUSERS bundle.
    pub async fn session_counts(&self) -> (usize, usize) {
        let handles: Vec<UserState> = self
            .clients
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        let mut registered = 0;
        let mut unknown = 0;
        for handle in handles {
            if handle.is_registered().await {
                registered += 1;
            } else {
                unknown += 1;
            }
        }
        (registered, unknown)
    }

    /// Releases everything a closed connection held: the nickname binding,
    /// the away entry, and every channel membership. Cohabiting members see
    /// one relayed QUIT each; emptied channels are destroyed.
    pub async fn disconnect_cleanup(&self, client_id: ClientId, quit_message: &str) {
        let Some((_, user_state)) = self.clients.remove(&client_id) else {
            return;
        };
        let session = user_state.get_caracs().await;
        if session.nickname == UNREGISTERED_NICK {
            return;
        }
        info!("[{client_id}] releasing state of {}", session.nickname);

        self.release_nick(&session.nickname, client_id);
        self.away_messages.remove(&session.nickname);

        let quit = IrcReply::Quit {
            nick: &session.nickname,
            user: &session.username,
            message: quit_message,
        };
        let mut notified: HashSet<Nickname> = HashSet::new();
        for name in self.channel_names() {
            let Some(channel) = self.get_channel(&name) else {
                continue;
            };
            if channel.remove_member(&session.nickname).await {
                for member in channel.member_snapshot().await {
                    if notified.insert(member.clone()) {
                        if let Some(peer) = self.client_of_nick(&member) {
                            peer.relay(quit.clone()).await;
                        }
                    }
                }
                self.drop_channel_if_empty(&name);
            }
        }
    }
}
