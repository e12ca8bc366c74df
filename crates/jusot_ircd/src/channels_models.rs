use dashmap::DashSet;
use tokio::sync::RwLock;

use crate::types::{ChannelName, Nickname, Topic};

/// Channel flags. `m` and `t` are the only settable flags; the `v` marker
/// reported by RPL_CHANNELMODEIS is derived from the voiced set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelModes {
    pub moderated: bool,  // +m
    pub topic_lock: bool, // +t
}

#[derive(Debug)]
pub struct IrcChannel {
    pub name: ChannelName,
    /// Insertion order: the first entry is the founding operator, and every
    /// fan-out walks this order.
    pub members: RwLock<Vec<Nickname>>,
    pub operators: DashSet<Nickname>,
    pub voiced: DashSet<Nickname>,
    pub topic: RwLock<Option<Topic>>,
    pub modes: RwLock<ChannelModes>,
}

impl IrcChannel {
    /// A channel springs into existence on its first JOIN; the founder is
    /// its first member and only operator.
    pub fn new(name: ChannelName, founder: Nickname) -> Self {
        let operators = DashSet::new();
        operators.insert(founder.clone());
        IrcChannel {
            name,
            members: RwLock::new(vec![founder]),
            operators,
            voiced: DashSet::new(),
            topic: RwLock::new(None),
            modes: RwLock::new(ChannelModes::default()),
        }
    }

    pub async fn is_member(&self, nick: &str) -> bool {
        self.members.read().await.iter().any(|m| m == nick)
    }

    /// Appends the nickname; false if it was already a member.
    pub async fn add_member(&self, nick: &str) -> bool {
        let mut members = self.members.write().await;
        if members.iter().any(|m| m == nick) {
            return false;
        }
        members.push(nick.to_owned());
        true
    }

    /// Drops the nickname from members, operators and voiced; false if it
    /// was not a member.
    pub async fn remove_member(&self, nick: &str) -> bool {
        let mut members = self.members.write().await;
        let Some(pos) = members.iter().position(|m| m == nick) else {
            return false;
        };
        members.remove(pos);
        self.operators.remove(nick);
        self.voiced.remove(nick);
        true
    }

    /// Rewrites a nickname in place (member list, operator and voiced sets)
    /// when a member renames itself.
    pub async fn rename_member(&self, old: &str, new: &str) -> bool {
        let mut members = self.members.write().await;
        let Some(pos) = members.iter().position(|m| m == old) else {
            return false;
        };
        members[pos] = new.to_owned();
        if self.operators.remove(old).is_some() {
            self.operators.insert(new.to_owned());
        }
        if self.voiced.remove(old).is_some() {
            self.voiced.insert(new.to_owned());
        }
        true
    }

    pub async fn member_snapshot(&self) -> Vec<Nickname> {
        self.members.read().await.clone()
    }

    pub async fn member_count(&self) -> usize {
        self.members.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.members.read().await.is_empty()
    }

    pub fn is_operator(&self, nick: &str) -> bool {
        self.operators.contains(nick)
    }

    /// Member list in join order, `@` for operators else `+` for voiced
    /// (operator wins over voiced).
    pub async fn adorned_names(&self) -> Vec<String> {
        self.members
            .read()
            .await
            .iter()
            .map(|nick| {
                if self.operators.contains(nick) {
                    format!("@{nick}")
                } else if self.voiced.contains(nick) {
                    format!("+{nick}")
                } else {
                    nick.clone()
                }
            })
            .collect()
    }

    /// Flag string for RPL_CHANNELMODEIS: set flags in `mtv` order, the `v`
    /// marker present whenever someone holds voice.
    pub async fn flag_string(&self) -> String {
        let modes = *self.modes.read().await;
        let mut flags = String::new();
        if modes.moderated {
            flags.push('m');
        }
        if modes.topic_lock {
            flags.push('t');
        }
        if !self.voiced.is_empty() {
            flags.push('v');
        }
        flags
    }
}
