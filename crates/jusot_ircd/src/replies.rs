use crate::constants::*;

/// Every wire line the server originates: one variant per numeric reply and
/// per relayed command form. `format()` renders the single CR-LF-terminated
/// line, truncated to the 512-byte protocol cap.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum IrcReply<'a> {
    // Connection registration
    Welcome {
        nick: &'a str,
        user: &'a str,
    },
    YourHost {
        nick: &'a str,
    },
    Created {
        nick: &'a str,
        date: &'a str,
    },
    MyInfo {
        nick: &'a str,
    },
    YoureOper {
        nick: &'a str,
    },

    // LUSERS bundle
    LuserClient {
        nick: &'a str,
        users: usize,
        services: usize,
        servers: usize,
    },
    LuserOp {
        nick: &'a str,
        opers: usize,
    },
    LuserUnknown {
        nick: &'a str,
        unknown: usize,
    },
    LuserChannels {
        nick: &'a str,
        channels: usize,
    },
    LuserMe {
        nick: &'a str,
        clients: usize,
        servers: usize,
    },

    // Away
    Away {
        nick: &'a str,
        away_nick: &'a str,
        message: &'a str,
    },
    UnAway {
        nick: &'a str,
    },
    NowAway {
        nick: &'a str,
    },

    // WHOIS / WHO
    WhoisUser {
        nick: &'a str,
        target: &'a str,
        user: &'a str,
        realname: &'a str,
    },
    WhoisServer {
        nick: &'a str,
        target: &'a str,
    },
    EndOfWho {
        nick: &'a str,
        name: &'a str,
    },
    EndOfWhois {
        nick: &'a str,
        target: &'a str,
    },

    // Channel queries
    List {
        nick: &'a str,
        channel: &'a str,
        visible: usize,
        topic: &'a str,
    },
    ListEnd {
        nick: &'a str,
    },
    ChannelModeIs {
        nick: &'a str,
        channel: &'a str,
        modes: &'a str,
    },
    NoTopic {
        nick: &'a str,
        channel: &'a str,
    },
    Topic {
        nick: &'a str,
        channel: &'a str,
        topic: &'a str,
    },
    NamReply {
        nick: &'a str,
        channel: &'a str,
        names: &'a [String],
    },
    EndOfNames {
        nick: &'a str,
        channel: &'a str,
    },

    // MOTD
    MotdStart {
        nick: &'a str,
    },
    Motd {
        nick: &'a str,
        text: &'a str,
    },
    EndOfMotd {
        nick: &'a str,
    },

    // Relayed client messages, client prefix :<nick>!<user>@jusot.com
    PrivMsg {
        nick: &'a str,
        user: &'a str,
        target: &'a str,
        text: &'a str,
    },
    Notice {
        nick: &'a str,
        user: &'a str,
        target: &'a str,
        text: &'a str,
    },
    Join {
        nick: &'a str,
        user: &'a str,
        channel: &'a str,
    },
    Part {
        nick: &'a str,
        user: &'a str,
        channel: &'a str,
        message: Option<&'a str>,
    },
    TopicChange {
        nick: &'a str,
        user: &'a str,
        channel: &'a str,
        topic: &'a str,
    },
    NickChange {
        nick: &'a str,
        user: &'a str,
        new_nick: &'a str,
    },
    Quit {
        nick: &'a str,
        user: &'a str,
        message: &'a str,
    },
    ChannelMode {
        nick: &'a str,
        user: &'a str,
        channel: &'a str,
        modes: &'a str,
        param: Option<&'a str>,
    },
    UserMode {
        nick: &'a str,
        modes: &'a str,
    },

    // Connection maintenance
    Pong,
    ClosingLink {
        message: &'a str,
    },

    // Errors
    ErrNoSuchNick {
        nick: &'a str,
        target: &'a str,
    },
    ErrNoSuchChannel {
        nick: &'a str,
        channel: &'a str,
    },
    ErrCannotSendToChan {
        nick: &'a str,
        channel: &'a str,
    },
    ErrNoRecipient {
        nick: &'a str,
        command: &'a str,
    },
    ErrNoTextToSend {
        nick: &'a str,
    },
    ErrUnknownCommand {
        nick: &'a str,
        command: &'a str,
    },
    ErrNoMotd {
        nick: &'a str,
    },
    ErrNoNicknameGiven,
    ErrNicknameInUse {
        nick: &'a str,
        colliding: &'a str,
    },
    ErrUserNotInChannel {
        nick: &'a str,
        target: &'a str,
        channel: &'a str,
    },
    ErrNotOnChannel {
        nick: &'a str,
        channel: &'a str,
    },
    ErrNotRegistered {
        nick: &'a str,
    },
    ErrNeedMoreParams {
        nick: &'a str,
        command: &'a str,
    },
    ErrAlreadyRegistered {
        nick: &'a str,
    },
    ErrPasswdMismatch {
        nick: &'a str,
    },
    ErrUnknownMode {
        nick: &'a str,
        flag: char,
    },
    ErrChanOPrivsNeeded {
        nick: &'a str,
        channel: &'a str,
    },
    ErrUModeUnknownFlag {
        nick: &'a str,
    },
    ErrUsersDontMatch {
        nick: &'a str,
    },
}

impl<'a> IrcReply<'a> {
    pub fn format(&self) -> String {
        let line = match self {
            // registration replies
            IrcReply::Welcome { nick, user } => format!(
                ":{SERVER_NAME} {RPL_WELCOME_NB:03} {nick} :{RPL_WELCOME_STR} {nick}!{user}@.{SERVER_NAME}"
            ),
            IrcReply::YourHost { nick } => format!(
                ":{SERVER_NAME} {RPL_YOURHOST_NB:03} {nick} :Your host is {SERVER_NAME}, running version {SERVER_VERSION}"
            ),
            IrcReply::Created { nick, date } => format!(
                ":{SERVER_NAME} {RPL_CREATED_NB:03} {nick} :This server was created {date}"
            ),
            IrcReply::MyInfo { nick } => format!(
                ":{SERVER_NAME} {RPL_MYINFO_NB:03} {nick} {SERVER_NAME} {SERVER_VERSION} {USER_MODES} {CHANNEL_MODES}"
            ),
            IrcReply::YoureOper { nick } => {
                format!(":{SERVER_NAME} {RPL_YOUREOPER_NB:03} {nick} :{RPL_YOUREOPER_STR}")
            }

            // LUSERS bundle
            IrcReply::LuserClient {
                nick,
                users,
                services,
                servers,
            } => format!(
                ":{SERVER_NAME} {RPL_LUSERCLIENT_NB} {nick} :There are {users} users and {services} services on {servers} servers"
            ),
            IrcReply::LuserOp { nick, opers } => {
                format!(":{SERVER_NAME} {RPL_LUSEROP_NB} {nick} {opers} :{RPL_LUSEROP_STR}")
            }
            IrcReply::LuserUnknown { nick, unknown } => format!(
                ":{SERVER_NAME} {RPL_LUSERUNKNOWN_NB} {nick} {unknown} :{RPL_LUSERUNKNOWN_STR}"
            ),
            IrcReply::LuserChannels { nick, channels } => format!(
                ":{SERVER_NAME} {RPL_LUSERCHANNELS_NB} {nick} {channels} :{RPL_LUSERCHANNELS_STR}"
            ),
            IrcReply::LuserMe {
                nick,
                clients,
                servers,
            } => format!(
                ":{SERVER_NAME} {RPL_LUSERME_NB} {nick} :I have {clients} clients and {servers} servers"
            ),

            // away
            IrcReply::Away {
                nick,
                away_nick,
                message,
            } => format!(":{SERVER_NAME} {RPL_AWAY_NB} {nick} {away_nick} :{message}"),
            IrcReply::UnAway { nick } => {
                format!(":{SERVER_NAME} {RPL_UNAWAY_NB} {nick} :{RPL_UNAWAY_STR}")
            }
            IrcReply::NowAway { nick } => {
                format!(":{SERVER_NAME} {RPL_NOWAWAY_NB} {nick} :{RPL_NOWAWAY_STR}")
            }

            // WHOIS / WHO
            IrcReply::WhoisUser {
                nick,
                target,
                user,
                realname,
            } => format!(
                ":{SERVER_NAME} {RPL_WHOISUSER_NB} {nick} {target} {user} {SERVER_NAME} * :{realname}"
            ),
            IrcReply::WhoisServer { nick, target } => format!(
                ":{SERVER_NAME} {RPL_WHOISSERVER_NB} {nick} {target} {SERVER_NAME} :{SERVER_NAME}"
            ),
            IrcReply::EndOfWho { nick, name } => {
                format!(":{SERVER_NAME} {RPL_ENDOFWHO_NB} {nick} {name} :{RPL_ENDOFWHO_STR}")
            }
            IrcReply::EndOfWhois { nick, target } => {
                format!(":{SERVER_NAME} {RPL_ENDOFWHOIS_NB} {nick} {target} :{RPL_ENDOFWHOIS_STR}")
            }

            // channel queries
            IrcReply::List {
                nick,
                channel,
                visible,
                topic,
            } => format!(":{SERVER_NAME} {RPL_LIST_NB} {nick} {channel} {visible} :{topic}"),
            IrcReply::ListEnd { nick } => {
                format!(":{SERVER_NAME} {RPL_LISTEND_NB} {nick} :{RPL_LISTEND_STR}")
            }
            IrcReply::ChannelModeIs {
                nick,
                channel,
                modes,
            } => format!(":{SERVER_NAME} {RPL_CHANNELMODEIS_NB} {nick} {channel} +{modes}"),
            IrcReply::NoTopic { nick, channel } => {
                format!(":{SERVER_NAME} {RPL_NOTOPIC_NB} {nick} {channel} :{RPL_NOTOPIC_STR}")
            }
            IrcReply::Topic {
                nick,
                channel,
                topic,
            } => format!(":{SERVER_NAME} {RPL_TOPIC_NB} {nick} {channel} :{topic}"),
            IrcReply::NamReply {
                nick,
                channel,
                names,
            } => format!(
                ":{SERVER_NAME} {RPL_NAMREPLY_NB} {nick} = {channel} :{}",
                names.join(" ")
            ),
            IrcReply::EndOfNames { nick, channel } => {
                format!(":{SERVER_NAME} {RPL_ENDOFNAMES_NB} {nick} {channel} :{RPL_ENDOFNAMES_STR}")
            }

            // MOTD
            IrcReply::MotdStart { nick } => format!(
                ":{SERVER_NAME} {RPL_MOTDSTART_NB} {nick} :- {SERVER_NAME} Message of the day - "
            ),
            IrcReply::Motd { nick, text } => {
                format!(":{SERVER_NAME} {RPL_MOTD_NB} {nick} :- {text}")
            }
            IrcReply::EndOfMotd { nick } => {
                format!(":{SERVER_NAME} {RPL_ENDOFMOTD_NB} {nick} :{RPL_ENDOFMOTD_STR}")
            }

            // relayed client messages
            IrcReply::PrivMsg {
                nick,
                user,
                target,
                text,
            } => format!(":{nick}!{user}@{SERVER_NAME} PRIVMSG {target} :{text}"),
            IrcReply::Notice {
                nick,
                user,
                target,
                text,
            } => format!(":{nick}!{user}@{SERVER_NAME} NOTICE {target} :{text}"),
            IrcReply::Join {
                nick,
                user,
                channel,
            } => format!(":{nick}!{user}@{SERVER_NAME} JOIN {channel}"),
            IrcReply::Part {
                nick,
                user,
                channel,
                message,
            } => match message {
                Some(message) => {
                    format!(":{nick}!{user}@{SERVER_NAME} PART {channel} :{message}")
                }
                None => format!(":{nick}!{user}@{SERVER_NAME} PART {channel}"),
            },
            IrcReply::TopicChange {
                nick,
                user,
                channel,
                topic,
            } => format!(":{nick}!{user}@{SERVER_NAME} TOPIC {channel} :{topic}"),
            IrcReply::NickChange {
                nick,
                user,
                new_nick,
            } => format!(":{nick}!{user}@{SERVER_NAME} NICK {new_nick}"),
            IrcReply::Quit {
                nick,
                user,
                message,
            } => format!(":{nick}!{user}@{SERVER_NAME} QUIT :{message}"),
            IrcReply::ChannelMode {
                nick,
                user,
                channel,
                modes,
                param,
            } => match param {
                Some(param) => {
                    format!(":{nick}!{user}@{SERVER_NAME} MODE {channel} {modes} {param}")
                }
                None => format!(":{nick}!{user}@{SERVER_NAME} MODE {channel} {modes}"),
            },
            IrcReply::UserMode { nick, modes } => format!(":{nick} MODE {nick} :{modes}"),

            // connection maintenance
            IrcReply::Pong => format!(":{SERVER_NAME} PONG :{SERVER_NAME}"),
            IrcReply::ClosingLink { message } => {
                format!(":{SERVER_NAME} ERROR :Closing Link: {SERVER_NAME} ({message})")
            }

            // errors
            IrcReply::ErrNoSuchNick { nick, target } => {
                format!(":{SERVER_NAME} {ERR_NOSUCHNICK_NB} {nick} {target} :{ERR_NOSUCHNICK_STR}")
            }
            IrcReply::ErrNoSuchChannel { nick, channel } => format!(
                ":{SERVER_NAME} {ERR_NOSUCHCHANNEL_NB} {nick} {channel} :{ERR_NOSUCHCHANNEL_STR}"
            ),
            IrcReply::ErrCannotSendToChan { nick, channel } => format!(
                ":{SERVER_NAME} {ERR_CANNOTSENDTOCHAN_NB} {nick} {channel} :{ERR_CANNOTSENDTOCHAN_STR}"
            ),
            IrcReply::ErrNoRecipient { nick, command } => format!(
                ":{SERVER_NAME} {ERR_NORECIPIENT_NB} {nick} :{ERR_NORECIPIENT_STR} ({command})"
            ),
            IrcReply::ErrNoTextToSend { nick } => {
                format!(":{SERVER_NAME} {ERR_NOTEXTTOSEND_NB} {nick} :{ERR_NOTEXTTOSEND_STR}")
            }
            IrcReply::ErrUnknownCommand { nick, command } => format!(
                ":{SERVER_NAME} {ERR_UNKNOWNCOMMAND_NB} {nick} {command} :{ERR_UNKNOWNCOMMAND_STR}"
            ),
            IrcReply::ErrNoMotd { nick } => {
                format!(":{SERVER_NAME} {ERR_NOMOTD_NB} {nick} :{ERR_NOMOTD_STR}")
            }
            // the client owns no nickname yet, so 431 always addresses "*"
            IrcReply::ErrNoNicknameGiven => format!(
                ":{SERVER_NAME} {ERR_NONICKNAMEGIVEN_NB} {UNREGISTERED_NICK} :{ERR_NONICKNAMEGIVEN_STR}"
            ),
            IrcReply::ErrNicknameInUse { nick, colliding } => format!(
                ":{SERVER_NAME} {ERR_NICKNAMEINUSE_NB} {nick} {colliding} :{ERR_NICKNAMEINUSE_STR}"
            ),
            IrcReply::ErrUserNotInChannel {
                nick,
                target,
                channel,
            } => format!(
                ":{SERVER_NAME} {ERR_USERNOTINCHANNEL_NB} {nick} {target} {channel} :{ERR_USERNOTINCHANNEL_STR}"
            ),
            IrcReply::ErrNotOnChannel { nick, channel } => format!(
                ":{SERVER_NAME} {ERR_NOTONCHANNEL_NB} {nick} {channel} :{ERR_NOTONCHANNEL_STR}"
            ),
            IrcReply::ErrNotRegistered { nick } => {
                format!(":{SERVER_NAME} {ERR_NOTREGISTERED_NB} {nick} :{ERR_NOTREGISTERED_STR}")
            }
            IrcReply::ErrNeedMoreParams { nick, command } => format!(
                ":{SERVER_NAME} {ERR_NEEDMOREPARAMS_NB} {nick} {command} :{ERR_NEEDMOREPARAMS_STR}"
            ),
            IrcReply::ErrAlreadyRegistered { nick } => format!(
                ":{SERVER_NAME} {ERR_ALREADYREGISTERED_NB} {nick} :{ERR_ALREADYREGISTERED_STR}"
            ),
            IrcReply::ErrPasswdMismatch { nick } => {
                format!(":{SERVER_NAME} {ERR_PASSWDMISMATCH_NB} {nick} :{ERR_PASSWDMISMATCH_STR}")
            }
            IrcReply::ErrUnknownMode { nick, flag } => {
                format!(":{SERVER_NAME} {ERR_UNKNOWNMODE_NB} {nick} {flag} :{ERR_UNKNOWNMODE_STR}")
            }
            IrcReply::ErrChanOPrivsNeeded { nick, channel } => format!(
                ":{SERVER_NAME} {ERR_CHANOPRIVSNEEDED_NB} {nick} {channel} :{ERR_CHANOPRIVSNEEDED_STR}"
            ),
            IrcReply::ErrUModeUnknownFlag { nick } => format!(
                ":{SERVER_NAME} {ERR_UMODEUNKNOWNFLAG_NB} {nick} :{ERR_UMODEUNKNOWNFLAG_STR}"
            ),
            IrcReply::ErrUsersDontMatch { nick } => format!(
                ":{SERVER_NAME} {ERR_USERSDONTMATCH_NB} {nick} :{ERR_USERSDONTMATCH_STR}"
            ),
        };

        terminate(line)
    }
}

// RFC 2812 2.3: 512 bytes max including CR-LF. Anything longer is cut at
// 510 bytes (on a char boundary) before the terminator goes on.
fn terminate(mut line: String) -> String {
    if line.len() > MAX_LINE_LEN {
        let mut cut = MAX_LINE_LEN;
        while !line.is_char_boundary(cut) {
            cut -= 1;
        }
        line.truncate(cut);
    }
    line.push_str("\r\n");
    line
}
