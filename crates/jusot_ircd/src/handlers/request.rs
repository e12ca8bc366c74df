use crate::{
    errors::InternalIrcError,
    handlers::{channels, messages, miscellanneous, registration},
    message::Message,
    replies::IrcReply,
    server_state::ServerState,
    types::ClientId,
    user_state::{UserStatus, UserStatus::Active, UserState},
};

/// Routes one inbound line. Commands from one client arrive here serially,
/// in order; commands from different clients run concurrently against the
/// shared state.
pub async fn handle_request(
    line: &str,
    client_id: ClientId,
    server: &ServerState,
    user_state: &UserState,
) -> Result<UserStatus, InternalIrcError> {
    let message = Message::parse(line);
    if message.is_empty() {
        return Ok(Active);
    }

    let command = message.command.to_ascii_uppercase();
    let args = &message.params;

    // NICK, USER, QUIT, PING, PONG and the empty command are the only ones a
    // connection may issue before registration completes.
    match command.as_str() {
        "NICK" => return registration::handle_nick(args, client_id, server, user_state).await,
        "USER" => return registration::handle_user(args, server, user_state).await,
        "QUIT" => return registration::handle_quit(args, user_state).await,
        "PING" => return miscellanneous::handle_ping(user_state).await,
        "PONG" => return Ok(Active),
        _ => {}
    }

    if !user_state.is_registered().await {
        return match command.as_str() {
            // a known command too early draws 451; anything else is dropped
            "PRIVMSG" | "NOTICE" | "MOTD" | "LUSERS" | "WHOIS" | "OPER" | "MODE" | "JOIN"
            | "PART" | "TOPIC" | "AWAY" | "NAMES" | "LIST" | "WHO" => {
                let caracs = user_state.get_caracs().await;
                user_state
                    .send(IrcReply::ErrNotRegistered {
                        nick: &caracs.nickname,
                    })
                    .await?;
                Ok(Active)
            }
            _ => Ok(Active),
        };
    }

    match command.as_str() {
        "PRIVMSG" => messages::handle_privmsg(args, server, user_state).await,
        "NOTICE" => messages::handle_notice(args, server, user_state).await,
        "JOIN" => channels::handle_join(args, server, user_state).await,
        "PART" => channels::handle_part(args, server, user_state).await,
        "TOPIC" => channels::handle_topic(args, server, user_state).await,
        "NAMES" => channels::handle_names(args, server, user_state).await,
        "LIST" => channels::handle_list(args, server, user_state).await,
        "MODE" => dispatch_mode(args, server, user_state).await,
        "MOTD" => miscellanneous::handle_motd(server, user_state).await,
        "LUSERS" => miscellanneous::handle_lusers(server, user_state).await,
        "WHOIS" => miscellanneous::handle_whois(args, server, user_state).await,
        "AWAY" => miscellanneous::handle_away(args, server, user_state).await,
        "OPER" => registration::handle_oper(args, server, user_state).await,
        // declared but answered with nothing
        "WHO" => Ok(Active),
        _ => {
            let caracs = user_state.get_caracs().await;
            user_state
                .send(IrcReply::ErrUnknownCommand {
                    nick: &caracs.nickname,
                    command: &message.command,
                })
                .await?;
            Ok(Active)
        }
    }
}

// Channel names begin with '#'; any other target is a nickname.
async fn dispatch_mode(
    args: &[String],
    server: &ServerState,
    user_state: &UserState,
) -> Result<UserStatus, InternalIrcError> {
    match args.first() {
        Some(target) if target.starts_with('#') => {
            channels::handle_channel_mode(args, server, user_state).await
        }
        Some(_) => miscellanneous::handle_user_mode(args, user_state).await,
        None => {
            let caracs = user_state.get_caracs().await;
            user_state
                .send(IrcReply::ErrNeedMoreParams {
                    nick: &caracs.nickname,
                    command: "MODE",
                })
                .await?;
            Ok(Active)
        }
    }
}
