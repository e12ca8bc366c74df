use crate::{
    errors::InternalIrcError,
    replies::IrcReply,
    server_state::ServerState,
    user_state::{SessionState, UserState, UserStatus},
};

// 3.7.2 Ping message

//       Command: PING
//    Parameters: <server1> [ <server2> ]

//    When a PING message is received, the appropriate PONG message MUST be
//    sent as reply as soon as possible.

pub async fn handle_ping(user_state: &UserState) -> Result<UserStatus, InternalIrcError> {
    user_state.send(IrcReply::Pong).await?;
    Ok(UserStatus::Active)
}

// 3.4.1 Motd message

//       Command: MOTD

//    The MOTD command is used to get the "Message Of The Day" of the
//    server.

//    Numeric Replies:

//            RPL_MOTDSTART                   RPL_MOTD
//            RPL_ENDOFMOTD                   ERR_NOMOTD

pub async fn handle_motd(
    server: &ServerState,
    user_state: &UserState,
) -> Result<UserStatus, InternalIrcError> {
    let caracs = user_state.get_caracs().await;
    send_motd(server, user_state, &caracs.nickname).await?;
    Ok(UserStatus::Active)
}

pub async fn send_motd(
    server: &ServerState,
    user_state: &UserState,
    nick: &str,
) -> Result<(), InternalIrcError> {
    match tokio::fs::read_to_string(&server.config.server.motd).await {
        Ok(content) => {
            user_state.send(IrcReply::MotdStart { nick }).await?;
            // one 372 per whitespace token; multi-word lines arrive split
            for token in content.split_whitespace() {
                user_state.send(IrcReply::Motd { nick, text: token }).await?;
            }
            user_state.send(IrcReply::EndOfMotd { nick }).await?;
        }
        Err(_) => {
            user_state.send(IrcReply::ErrNoMotd { nick }).await?;
        }
    }
    Ok(())
}

// 3.4.2 Lusers message

//       Command: LUSERS

//    The LUSERS command is used to get statistics about the size of the
//    IRC network.

pub async fn handle_lusers(
    server: &ServerState,
    user_state: &UserState,
) -> Result<UserStatus, InternalIrcError> {
    let caracs = user_state.get_caracs().await;
    send_lusers(server, user_state, &caracs.nickname).await?;
    Ok(UserStatus::Active)
}

pub async fn send_lusers(
    server: &ServerState,
    user_state: &UserState,
    nick: &str,
) -> Result<(), InternalIrcError> {
    let (registered, unknown) = server.session_counts().await;
    let channels = server.channels.len();

    user_state
        .send(IrcReply::LuserClient {
            nick,
            users: registered,
            services: 0,
            servers: 1,
        })
        .await?;
    user_state.send(IrcReply::LuserOp { nick, opers: 0 }).await?;
    user_state
        .send(IrcReply::LuserUnknown { nick, unknown })
        .await?;
    user_state
        .send(IrcReply::LuserChannels { nick, channels })
        .await?;
    user_state
        .send(IrcReply::LuserMe {
            nick,
            clients: registered + unknown,
            servers: 1,
        })
        .await?;
    Ok(())
}

// 3.6.2 Whois query

//       Command: WHOIS
//    Parameters: <nickname>

//    This command is used to query information about a particular user.

//    Numeric Replies:

//            ERR_NOSUCHNICK                  RPL_WHOISUSER
//            RPL_WHOISSERVER                 RPL_ENDOFWHOIS

pub async fn handle_whois(
    args: &[String],
    server: &ServerState,
    user_state: &UserState,
) -> Result<UserStatus, InternalIrcError> {
    // anything but exactly one argument is ignored
    if args.len() != 1 {
        return Ok(UserStatus::Active);
    }
    let caracs = user_state.get_caracs().await;
    let nick = &caracs.nickname;
    let target = &args[0];

    let Some(peer) = server.client_of_nick(target) else {
        user_state.send(IrcReply::ErrNoSuchNick { nick, target }).await?;
        return Ok(UserStatus::Active);
    };
    let peer_caracs = peer.get_caracs().await;

    user_state
        .send(IrcReply::WhoisUser {
            nick,
            target,
            user: &peer_caracs.username,
            realname: &peer_caracs.realname,
        })
        .await?;
    user_state.send(IrcReply::WhoisServer { nick, target }).await?;
    user_state.send(IrcReply::EndOfWhois { nick, target }).await?;
    Ok(UserStatus::Active)
}

// 4.1 Away

//       Command: AWAY
//    Parameters: [ <text> ]

//    With the AWAY command, clients can set an automatic reply string for
//    any PRIVMSG commands directed at them.  The AWAY command is used
//    either with one parameter, to set an AWAY message, or with no
//    parameters, to remove the AWAY message.

pub async fn handle_away(
    args: &[String],
    server: &ServerState,
    user_state: &UserState,
) -> Result<UserStatus, InternalIrcError> {
    let caracs = user_state.get_caracs().await;
    let nick = &caracs.nickname;

    match args.first() {
        Some(message) => {
            user_state.session.write().await.state = SessionState::Away;
            server
                .away_messages
                .insert(caracs.nickname.clone(), message.clone());
            user_state.send(IrcReply::NowAway { nick }).await?;
        }
        None => {
            user_state.session.write().await.state = SessionState::Registered;
            server.away_messages.remove(&caracs.nickname);
            user_state.send(IrcReply::UnAway { nick }).await?;
        }
    }
    Ok(UserStatus::Active)
}

// 3.1.5 User mode message

//       Command: MODE
//    Parameters: <nickname> *( ( "+" / "-" ) *( "o" / "a" ) )

//    A user MODE command MUST only be accepted if both the sender of the
//    message and the nickname given as a parameter are both the same.
//    "+o" is ignored (OPER is the way in); "-o" is always granted and
//    echoed back; "a" only toggles through AWAY.

pub async fn handle_user_mode(
    args: &[String],
    user_state: &UserState,
) -> Result<UserStatus, InternalIrcError> {
    let caracs = user_state.get_caracs().await;
    let nick = &caracs.nickname;

    if args.len() < 2 {
        user_state
            .send(IrcReply::ErrNeedMoreParams {
                nick,
                command: "MODE",
            })
            .await?;
        return Ok(UserStatus::Active);
    }
    if args[0] != *nick {
        user_state.send(IrcReply::ErrUsersDontMatch { nick }).await?;
        return Ok(UserStatus::Active);
    }

    let mode = &args[1];
    let mut flags = mode.chars();
    let sign = flags.next();
    if sign != Some('+') && sign != Some('-') {
        user_state.send(IrcReply::ErrUsersDontMatch { nick }).await?;
        return Ok(UserStatus::Active);
    }

    match flags.next() {
        Some('o') => {
            if sign == Some('-') {
                user_state.send(IrcReply::UserMode { nick, modes: mode }).await?;
            }
        }
        Some('a') => {}
        _ => {
            user_state.send(IrcReply::ErrUModeUnknownFlag { nick }).await?;
        }
    }
    Ok(UserStatus::Active)
}
