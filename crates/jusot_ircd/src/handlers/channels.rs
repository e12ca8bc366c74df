use std::collections::HashSet;

use crate::{
    errors::InternalIrcError,
    replies::IrcReply,
    server_state::ServerState,
    types::Nickname,
    user_state::{UserState, UserStatus},
};

// 3.2.1 Join message

//       Command: JOIN
//    Parameters: <channel>

//    If a JOIN is successful, the user receives a JOIN message as
//    confirmation and is then sent the channel's topic (using RPL_TOPIC) and
//    the list of users who are on the channel (using RPL_NAMREPLY), which
//    MUST include the user joining.

//    Channels are created implicitly on first JOIN; the first joiner
//    gets +o.

pub async fn handle_join(
    args: &[String],
    server: &ServerState,
    user_state: &UserState,
) -> Result<UserStatus, InternalIrcError> {
    let caracs = user_state.get_caracs().await;
    let nick = &caracs.nickname;

    let Some(channel_name) = args.first() else {
        user_state
            .send(IrcReply::ErrNeedMoreParams {
                nick,
                command: "JOIN",
            })
            .await?;
        return Ok(UserStatus::Active);
    };

    let (channel, created) = server.get_or_create_channel(channel_name, nick);
    if !created && !channel.add_member(nick).await {
        // already a member, nothing to do
        return Ok(UserStatus::Active);
    }

    let relay = IrcReply::Join {
        nick,
        user: &caracs.username,
        channel: channel_name,
    };
    for member in channel.member_snapshot().await {
        if member == *nick {
            user_state.send(relay.clone()).await?;
        } else if let Some(peer) = server.client_of_nick(&member) {
            peer.relay(relay.clone()).await;
        }
    }

    let topic = channel.topic.read().await.clone();
    if let Some(topic) = topic {
        if !topic.is_empty() {
            user_state
                .send(IrcReply::Topic {
                    nick,
                    channel: channel_name,
                    topic: &topic,
                })
                .await?;
        }
    }

    let names = channel.adorned_names().await;
    user_state
        .send(IrcReply::NamReply {
            nick,
            channel: channel_name,
            names: &names,
        })
        .await?;
    user_state
        .send(IrcReply::EndOfNames {
            nick,
            channel: channel_name,
        })
        .await?;

    Ok(UserStatus::Active)
}

// 3.2.2 Part message

//       Command: PART
//    Parameters: <channel> [ <Part Message> ]

//    Numeric Replies:

//            ERR_NEEDMOREPARAMS              ERR_NOSUCHCHANNEL
//            ERR_NOTONCHANNEL

pub async fn handle_part(
    args: &[String],
    server: &ServerState,
    user_state: &UserState,
) -> Result<UserStatus, InternalIrcError> {
    let caracs = user_state.get_caracs().await;
    let nick = &caracs.nickname;

    let Some(channel_name) = args.first() else {
        user_state
            .send(IrcReply::ErrNeedMoreParams {
                nick,
                command: "PART",
            })
            .await?;
        return Ok(UserStatus::Active);
    };
    let Some(channel) = server.get_channel(channel_name) else {
        user_state
            .send(IrcReply::ErrNoSuchChannel {
                nick,
                channel: channel_name,
            })
            .await?;
        return Ok(UserStatus::Active);
    };
    if !channel.is_member(nick).await {
        user_state
            .send(IrcReply::ErrNotOnChannel {
                nick,
                channel: channel_name,
            })
            .await?;
        return Ok(UserStatus::Active);
    }

    // relay while the leaver is still on the roster, then remove
    let relay = IrcReply::Part {
        nick,
        user: &caracs.username,
        channel: channel_name,
        message: args.get(1).map(String::as_str),
    };
    for member in channel.member_snapshot().await {
        if member == *nick {
            user_state.send(relay.clone()).await?;
        } else if let Some(peer) = server.client_of_nick(&member) {
            peer.relay(relay.clone()).await;
        }
    }

    channel.remove_member(nick).await;
    server.drop_channel_if_empty(channel_name);

    Ok(UserStatus::Active)
}

// 3.2.4 Topic message

//       Command: TOPIC
//    Parameters: <channel> [ <topic> ]

//    The TOPIC command is used to change or view the topic of a channel.

pub async fn handle_topic(
    args: &[String],
    server: &ServerState,
    user_state: &UserState,
) -> Result<UserStatus, InternalIrcError> {
    let caracs = user_state.get_caracs().await;
    let nick = &caracs.nickname;

    let Some(channel_name) = args.first() else {
        user_state
            .send(IrcReply::ErrNeedMoreParams {
                nick,
                command: "TOPIC",
            })
            .await?;
        return Ok(UserStatus::Active);
    };
    // an absent channel implies non-membership: both cases draw 442
    let channel = server.get_channel(channel_name);
    let is_member = match &channel {
        Some(channel) => channel.is_member(nick).await,
        None => false,
    };
    if !is_member {
        user_state
            .send(IrcReply::ErrNotOnChannel {
                nick,
                channel: channel_name,
            })
            .await?;
        return Ok(UserStatus::Active);
    }
    let Some(channel) = channel else {
        return Ok(UserStatus::Active);
    };

    match args.get(1) {
        None => {
            let topic = channel.topic.read().await.clone();
            match topic {
                Some(topic) if !topic.is_empty() => {
                    user_state
                        .send(IrcReply::Topic {
                            nick,
                            channel: channel_name,
                            topic: &topic,
                        })
                        .await?;
                }
                _ => {
                    user_state
                        .send(IrcReply::NoTopic {
                            nick,
                            channel: channel_name,
                        })
                        .await?;
                }
            }
        }
        Some(new_topic) => {
            *channel.topic.write().await = Some(new_topic.clone());
            let relay = IrcReply::TopicChange {
                nick,
                user: &caracs.username,
                channel: channel_name,
                topic: new_topic,
            };
            for member in channel.member_snapshot().await {
                if member == *nick {
                    user_state.send(relay.clone()).await?;
                } else if let Some(peer) = server.client_of_nick(&member) {
                    peer.relay(relay.clone()).await;
                }
            }
        }
    }

    Ok(UserStatus::Active)
}

// 3.2.5 Names message

//       Command: NAMES
//    Parameters: [ <channel> ]

//    If no <channel> parameter is given, a list of all channels and their
//    occupants is returned.  At the end of this list, a list of users who
//    are not on any channel are listed as being on `channel' "*".

pub async fn handle_names(
    args: &[String],
    server: &ServerState,
    user_state: &UserState,
) -> Result<UserStatus, InternalIrcError> {
    let caracs = user_state.get_caracs().await;
    let nick = &caracs.nickname;

    match args.first() {
        Some(channel_name) => {
            if let Some(channel) = server.get_channel(channel_name) {
                let names = channel.adorned_names().await;
                user_state
                    .send(IrcReply::NamReply {
                        nick,
                        channel: channel_name,
                        names: &names,
                    })
                    .await?;
            }
            user_state
                .send(IrcReply::EndOfNames {
                    nick,
                    channel: channel_name,
                })
                .await?;
        }
        None => {
            let mut in_channel: HashSet<Nickname> = HashSet::new();
            for name in server.channel_names() {
                let Some(channel) = server.get_channel(&name) else {
                    continue;
                };
                let names = channel.adorned_names().await;
                for member in channel.member_snapshot().await {
                    in_channel.insert(member);
                }
                user_state
                    .send(IrcReply::NamReply {
                        nick,
                        channel: &name,
                        names: &names,
                    })
                    .await?;
            }

            let stray: Vec<String> = server
                .bound_nicknames()
                .into_iter()
                .filter(|bound| !in_channel.contains(bound))
                .collect();
            if !stray.is_empty() {
                user_state
                    .send(IrcReply::NamReply {
                        nick,
                        channel: "*",
                        names: &stray,
                    })
                    .await?;
            }
            user_state
                .send(IrcReply::EndOfNames { nick, channel: "*" })
                .await?;
        }
    }

    Ok(UserStatus::Active)
}

// 3.2.6 List message

//       Command: LIST
//    Parameters: [ <channel> ]

//    The list command is used to list channels and their topics.

pub async fn handle_list(
    args: &[String],
    server: &ServerState,
    user_state: &UserState,
) -> Result<UserStatus, InternalIrcError> {
    let caracs = user_state.get_caracs().await;
    let nick = &caracs.nickname;

    match args.first() {
        Some(channel_name) => {
            if let Some(channel) = server.get_channel(channel_name) {
                send_list_entry(user_state, nick, channel_name, &channel).await?;
            }
        }
        None => {
            for name in server.channel_names() {
                let Some(channel) = server.get_channel(&name) else {
                    continue;
                };
                send_list_entry(user_state, nick, &name, &channel).await?;
            }
        }
    }
    user_state.send(IrcReply::ListEnd { nick }).await?;

    Ok(UserStatus::Active)
}

async fn send_list_entry(
    user_state: &UserState,
    nick: &str,
    channel_name: &str,
    channel: &crate::channels_models::IrcChannel,
) -> Result<(), InternalIrcError> {
    let topic = channel.topic.read().await.clone().unwrap_or_default();
    user_state
        .send(IrcReply::List {
            nick,
            channel: channel_name,
            visible: channel.member_count().await,
            topic: &topic,
        })
        .await
}

// 3.2.3 Channel mode message

//       Command: MODE
//    Parameters: <channel> [ ( "+" / "-" ) <flag> [ <nickname> ] ]

//    The MODE command is provided so that users may query and change the
//    characteristics of a channel.  Supported flags:

//         o - give/take channel operator privilege;
//         v - give/take the voice privilege;
//         m - toggle the moderated channel;
//         t - toggle the topic settable by channel operator only flag;

//    Numeric Replies:

//            ERR_NOSUCHCHANNEL               ERR_CHANOPRIVSNEEDED
//            ERR_USERNOTINCHANNEL            ERR_UNKNOWNMODE
//            RPL_CHANNELMODEIS

pub async fn handle_channel_mode(
    args: &[String],
    server: &ServerState,
    user_state: &UserState,
) -> Result<UserStatus, InternalIrcError> {
    let caracs = user_state.get_caracs().await;
    let nick = &caracs.nickname;
    let channel_name = &args[0];

    let Some(channel) = server.get_channel(channel_name) else {
        user_state
            .send(IrcReply::ErrNoSuchChannel {
                nick,
                channel: channel_name,
            })
            .await?;
        return Ok(UserStatus::Active);
    };

    // query form
    let Some(mode) = args.get(1) else {
        let flags = channel.flag_string().await;
        user_state
            .send(IrcReply::ChannelModeIs {
                nick,
                channel: channel_name,
                modes: &flags,
            })
            .await?;
        return Ok(UserStatus::Active);
    };

    match mode.as_str() {
        "+m" | "+t" => {
            if !channel.is_operator(nick) {
                user_state
                    .send(IrcReply::ErrChanOPrivsNeeded {
                        nick,
                        channel: channel_name,
                    })
                    .await?;
                return Ok(UserStatus::Active);
            }
            {
                let mut modes = channel.modes.write().await;
                if mode == "+m" {
                    modes.moderated = true;
                } else {
                    modes.topic_lock = true;
                }
            }
            let relay = IrcReply::ChannelMode {
                nick,
                user: &caracs.username,
                channel: channel_name,
                modes: mode,
                param: None,
            };
            for member in channel.member_snapshot().await {
                if member == *nick {
                    user_state.send(relay.clone()).await?;
                } else if let Some(peer) = server.client_of_nick(&member) {
                    peer.relay(relay.clone()).await;
                }
            }
        }
        // clearing is answered to the sender alone
        "-m" | "-t" => {
            {
                let mut modes = channel.modes.write().await;
                if mode == "-m" {
                    modes.moderated = false;
                } else {
                    modes.topic_lock = false;
                }
            }
            user_state
                .send(IrcReply::ChannelMode {
                    nick,
                    user: &caracs.username,
                    channel: channel_name,
                    modes: mode,
                    param: None,
                })
                .await?;
        }
        "+o" | "-o" | "+v" | "-v" => {
            let Some(target) = args.get(2) else {
                user_state
                    .send(IrcReply::ErrNeedMoreParams {
                        nick,
                        command: "MODE",
                    })
                    .await?;
                return Ok(UserStatus::Active);
            };
            if !channel.is_operator(nick) {
                user_state
                    .send(IrcReply::ErrChanOPrivsNeeded {
                        nick,
                        channel: channel_name,
                    })
                    .await?;
                return Ok(UserStatus::Active);
            }
            if !channel.is_member(target).await {
                user_state
                    .send(IrcReply::ErrUserNotInChannel {
                        nick,
                        target,
                        channel: channel_name,
                    })
                    .await?;
                return Ok(UserStatus::Active);
            }

            match mode.as_str() {
                "+o" => {
                    channel.operators.insert(target.clone());
                }
                "-o" => {
                    channel.operators.remove(target);
                }
                "+v" => {
                    channel.voiced.insert(target.clone());
                }
                _ => {
                    channel.voiced.remove(target);
                }
            }

            let relay = IrcReply::ChannelMode {
                nick,
                user: &caracs.username,
                channel: channel_name,
                modes: mode,
                param: Some(target),
            };
            for member in channel.member_snapshot().await {
                if member == *nick {
                    user_state.send(relay.clone()).await?;
                } else if let Some(peer) = server.client_of_nick(&member) {
                    peer.relay(relay.clone()).await;
                }
            }
        }
        other => {
            let flag = other
                .chars()
                .find(|c| *c != '+' && *c != '-')
                .or_else(|| other.chars().next())
                .unwrap_or('?');
            user_state.send(IrcReply::ErrUnknownMode { nick, flag }).await?;
        }
    }

    Ok(UserStatus::Active)
}
