use crate::{
    errors::InternalIrcError,
    replies::IrcReply,
    server_state::ServerState,
    user_state::{UserState, UserStatus},
};

// 3.3.1 Private messages

//       Command: PRIVMSG
//    Parameters: <msgtarget> <text to be sent>

//    PRIVMSG is used to send private messages between users, as well as to
//    send messages to channels.  <msgtarget> is usually the nickname of
//    the recipient of the message, or a channel name.

//    Numeric Replies:

//            ERR_NORECIPIENT                 ERR_NOTEXTTOSEND
//            ERR_CANNOTSENDTOCHAN            ERR_NOSUCHNICK
//            RPL_AWAY

pub async fn handle_privmsg(
    args: &[String],
    server: &ServerState,
    user_state: &UserState,
) -> Result<UserStatus, InternalIrcError> {
    route(args, server, user_state, true).await
}

// 3.3.2 Notice

//       Command: NOTICE
//    Parameters: <msgtarget> <text>

//    The NOTICE command is used similarly to PRIVMSG.  The difference
//    between NOTICE and PRIVMSG is that automatic replies MUST NEVER be
//    sent in response to a NOTICE message.

pub async fn handle_notice(
    args: &[String],
    server: &ServerState,
    user_state: &UserState,
) -> Result<UserStatus, InternalIrcError> {
    route(args, server, user_state, false).await
}

// Shared routing. NOTICE takes the identical path with every reply to the
// sender suppressed, including the away interception.
async fn route(
    args: &[String],
    server: &ServerState,
    user_state: &UserState,
    is_privmsg: bool,
) -> Result<UserStatus, InternalIrcError> {
    let caracs = user_state.get_caracs().await;
    let nick = &caracs.nickname;

    if args.is_empty() {
        if is_privmsg {
            user_state
                .send(IrcReply::ErrNoRecipient {
                    nick,
                    command: "PRIVMSG",
                })
                .await?;
        }
        return Ok(UserStatus::Active);
    }
    if args.len() == 1 {
        if is_privmsg {
            user_state.send(IrcReply::ErrNoTextToSend { nick }).await?;
        }
        return Ok(UserStatus::Active);
    }

    let target = &args[0];
    let text = &args[1];

    if target.starts_with('#') {
        let Some(channel) = server.get_channel(target) else {
            if is_privmsg {
                user_state.send(IrcReply::ErrNoSuchNick { nick, target }).await?;
            }
            return Ok(UserStatus::Active);
        };
        if !channel.is_member(nick).await {
            if is_privmsg {
                user_state
                    .send(IrcReply::ErrCannotSendToChan {
                        nick,
                        channel: target,
                    })
                    .await?;
            }
            return Ok(UserStatus::Active);
        }

        let relay = relayed(&caracs.nickname, &caracs.username, target, text, is_privmsg);
        // fan-out walks the member list in join order, skipping the sender
        for member in channel.member_snapshot().await {
            if member == *nick {
                continue;
            }
            if let Some(peer) = server.client_of_nick(&member) {
                peer.relay(relay.clone()).await;
            }
        }
    } else {
        // an away target answers with its stored message instead of
        // receiving anything
        if is_privmsg {
            let away = server.away_messages.get(target).map(|entry| entry.value().clone());
            if let Some(message) = away {
                user_state
                    .send(IrcReply::Away {
                        nick,
                        away_nick: target,
                        message: &message,
                    })
                    .await?;
                return Ok(UserStatus::Active);
            }
        }
        let Some(peer) = server.client_of_nick(target) else {
            if is_privmsg {
                user_state.send(IrcReply::ErrNoSuchNick { nick, target }).await?;
            }
            return Ok(UserStatus::Active);
        };
        peer.relay(relayed(&caracs.nickname, &caracs.username, target, text, is_privmsg))
            .await;
    }

    Ok(UserStatus::Active)
}

fn relayed<'a>(
    nick: &'a str,
    user: &'a str,
    target: &'a str,
    text: &'a str,
    is_privmsg: bool,
) -> IrcReply<'a> {
    if is_privmsg {
        IrcReply::PrivMsg {
            nick,
            user,
            target,
            text,
        }
    } else {
        IrcReply::Notice {
            nick,
            user,
            target,
            text,
        }
    }
}
