use std::collections::HashSet;

use crate::{
    constants::{DEFAULT_QUIT_MESSAGE, UNREGISTERED_NICK},
    errors::InternalIrcError,
    handlers::miscellanneous::{send_lusers, send_motd},
    replies::IrcReply,
    server_state::ServerState,
    types::{ClientId, Nickname},
    user_state::{SessionState, UserState, UserStatus},
};

// 3.1.2 Nick message

//       Command: NICK
//    Parameters: <nickname>

//    NICK command is used to give user a nickname or change the existing
//    one.

//    Numeric Replies:

//            ERR_NONICKNAMEGIVEN             ERR_NICKNAMEINUSE

pub async fn handle_nick(
    args: &[String],
    client_id: ClientId,
    server: &ServerState,
    user_state: &UserState,
) -> Result<UserStatus, InternalIrcError> {
    let Some(nick) = args.first() else {
        user_state.send(IrcReply::ErrNoNicknameGiven).await?;
        return Ok(UserStatus::Active);
    };

    let caracs = user_state.get_caracs().await;

    // Claim before anything else: the entry insert is the collision test,
    // so two racing NICKs cannot both win the name.
    if !server.try_claim_nick(nick, client_id) {
        user_state
            .send(IrcReply::ErrNicknameInUse {
                nick: &caracs.nickname,
                colliding: nick,
            })
            .await?;
        return Ok(UserStatus::Active);
    }

    match caracs.state {
        // USER already arrived: this NICK completes registration.
        SessionState::User => {
            if caracs.nickname != UNREGISTERED_NICK {
                server.release_nick(&caracs.nickname, client_id);
            }
            {
                let mut session = user_state.session.write().await;
                session.nickname = nick.clone();
                session.state = SessionState::Registered;
            }
            send_welcome_bundle(server, user_state).await?;
        }
        SessionState::None => {
            let mut session = user_state.session.write().await;
            session.nickname = nick.clone();
            session.state = SessionState::Nick;
        }
        // Pre-registration rename: swap the binding silently.
        SessionState::Nick => {
            server.release_nick(&caracs.nickname, client_id);
            user_state.session.write().await.nickname = nick.clone();
        }
        // Registered rename: rebind, rewrite the channel rosters and the
        // away key, and relay NICK to the user and everyone sharing a
        // channel with it.
        SessionState::Registered | SessionState::Away => {
            server.release_nick(&caracs.nickname, client_id);
            if let Some((_, away)) = server.away_messages.remove(&caracs.nickname) {
                server.away_messages.insert(nick.clone(), away);
            }
            user_state.session.write().await.nickname = nick.clone();

            let relay = IrcReply::NickChange {
                nick: &caracs.nickname,
                user: &caracs.username,
                new_nick: nick,
            };
            user_state.send(relay.clone()).await?;

            let mut notified: HashSet<Nickname> = HashSet::new();
            notified.insert(nick.clone());
            for name in server.channel_names() {
                let Some(channel) = server.get_channel(&name) else {
                    continue;
                };
                if channel.rename_member(&caracs.nickname, nick).await {
                    for member in channel.member_snapshot().await {
                        if notified.insert(member.clone()) {
                            if let Some(peer) = server.client_of_nick(&member) {
                                peer.relay(relay.clone()).await;
                            }
                        }
                    }
                }
            }
        }
    }

    Ok(UserStatus::Active)
}

// 3.1.3 User message

//       Command: USER
//    Parameters: <user> <mode> <unused> <realname>

//    The USER command is used at the beginning of connection to specify
//    the username, hostname and realname of a new user.

//    Numeric Replies:

//            ERR_NEEDMOREPARAMS              ERR_ALREADYREGISTRED

pub async fn handle_user(
    args: &[String],
    server: &ServerState,
    user_state: &UserState,
) -> Result<UserStatus, InternalIrcError> {
    let caracs = user_state.get_caracs().await;

    if caracs.is_registered() {
        user_state
            .send(IrcReply::ErrAlreadyRegistered {
                nick: &caracs.nickname,
            })
            .await?;
        return Ok(UserStatus::Active);
    }
    if args.len() != 4 {
        user_state
            .send(IrcReply::ErrNeedMoreParams {
                nick: &caracs.nickname,
                command: "USER",
            })
            .await?;
        return Ok(UserStatus::Active);
    }

    match caracs.state {
        // NICK already arrived: this USER completes registration.
        SessionState::Nick => {
            {
                let mut session = user_state.session.write().await;
                session.username = args[0].clone();
                session.realname = args[3].clone();
                session.state = SessionState::Registered;
            }
            send_welcome_bundle(server, user_state).await?;
        }
        _ => {
            let mut session = user_state.session.write().await;
            session.username = args[0].clone();
            session.realname = args[3].clone();
            session.state = SessionState::User;
        }
    }

    Ok(UserStatus::Active)
}

// 3.1.4 Oper message

//       Command: OPER
//    Parameters: <name> <password>

//    A normal user uses the OPER command to obtain operator privileges.

//    Numeric Replies:

//            ERR_NEEDMOREPARAMS              RPL_YOUREOPER
//            ERR_PASSWDMISMATCH

pub async fn handle_oper(
    args: &[String],
    server: &ServerState,
    user_state: &UserState,
) -> Result<UserStatus, InternalIrcError> {
    let caracs = user_state.get_caracs().await;
    let nick = &caracs.nickname;

    if args.len() < 2 {
        user_state
            .send(IrcReply::ErrNeedMoreParams {
                nick,
                command: "OPER",
            })
            .await?;
    } else if args[1] != server.config.server.oper_password {
        user_state.send(IrcReply::ErrPasswdMismatch { nick }).await?;
    } else {
        user_state.send(IrcReply::YoureOper { nick }).await?;
    }
    Ok(UserStatus::Active)
}

// 3.1.7 Quit

//       Command: QUIT
//    Parameters: [ <Quit Message> ]

//    A client session is terminated with a quit message.  The server
//    acknowledges this by sending an ERROR message to the client.

pub async fn handle_quit(
    args: &[String],
    user_state: &UserState,
) -> Result<UserStatus, InternalIrcError> {
    let message = args.first().cloned();
    user_state
        .relay(IrcReply::ClosingLink {
            message: message.as_deref().unwrap_or(DEFAULT_QUIT_MESSAGE),
        })
        .await;
    // The reader task stops on Leaving; cleanup and the deferred socket
    // close follow from there.
    Ok(UserStatus::Leaving(message))
}

/// 001-004, then the LUSERS counts, then the MOTD: the fixed sequence every
/// freshly registered client receives.
pub async fn send_welcome_bundle(
    server: &ServerState,
    user_state: &UserState,
) -> Result<(), InternalIrcError> {
    let caracs = user_state.get_caracs().await;
    let nick = &caracs.nickname;

    user_state
        .send(IrcReply::Welcome {
            nick,
            user: &caracs.username,
        })
        .await?;
    user_state.send(IrcReply::YourHost { nick }).await?;
    user_state
        .send(IrcReply::Created {
            nick,
            date: &server.created_at,
        })
        .await?;
    user_state.send(IrcReply::MyInfo { nick }).await?;

    send_lusers(server, user_state, nick).await?;
    send_motd(server, user_state, nick).await?;
    Ok(())
}
