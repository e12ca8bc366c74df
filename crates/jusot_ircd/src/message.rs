use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::take_while1,
    character::complete::char,
    combinator::{opt, rest},
    multi::many0,
    sequence::{preceded, terminated},
};

use crate::constants::MAX_LINE_LEN;

// https://www.rfc-editor.org/rfc/rfc2812
// 2.3.1 Message format in Augmented BNF

//    The protocol messages must be extracted from the contiguous stream of
//    octets.  The current solution is to designate two characters, CR and
//    LF, as message separators.  Empty messages are silently ignored,
//    which permits use of the sequence CR-LF between messages without
//    extra problems.

//    The extracted message is parsed into the components <prefix>,
//    <command> and list of parameters (<params>).

//     The Augmented BNF representation for this is:

//     message    =  [ ":" prefix SPACE ] command [ params ] crlf
//     prefix     =  servername / ( nickname [ [ "!" user ] "@" host ] )
//     command    =  1*letter / 3digit
//     params     =  *14( SPACE middle ) [ SPACE ":" trailing ]
//                =/ 14( SPACE middle ) [ SPACE [ ":" ] trailing ]

//     middle     =  nospcrlfcl *( ":" / nospcrlfcl )
//     trailing   =  *( ":" / " " / nospcrlfcl )

//     SPACE      =  %x20        ; space character
//     crlf       =  %x0D %x0A   ; "carriage return" "linefeed"

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefix {
    pub source: String,
    pub nick: Option<String>,
    pub user: Option<String>,
    pub host: Option<String>,
}

impl Prefix {
    //     prefix = servername / ( nickname [ [ "!" user ] "@" host ] )
    //
    // A bare source ("irc.server.com" or "alice") keeps nick/user/host
    // empty; "alice!alice@host" fills all three.
    fn from_raw(raw: &str) -> Self {
        let source = raw.to_owned();
        if let Some((nick, user_host)) = raw.split_once('!') {
            match user_host.split_once('@') {
                Some((user, host)) => Prefix {
                    source,
                    nick: Some(nick.to_owned()),
                    user: Some(user.to_owned()),
                    host: Some(host.to_owned()),
                },
                None => Prefix {
                    source,
                    nick: Some(nick.to_owned()),
                    user: Some(user_host.to_owned()),
                    host: None,
                },
            }
        } else if let Some((nick, host)) = raw.split_once('@') {
            Prefix {
                source,
                nick: Some(nick.to_owned()),
                user: None,
                host: Some(host.to_owned()),
            }
        } else {
            Prefix {
                source,
                nick: None,
                user: None,
                host: None,
            }
        }
    }
}

/// One parsed inbound line. An unparseable or oversized line degrades to
/// the empty command, which the dispatcher ignores.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    pub prefix: Option<Prefix>,
    pub command: String,
    pub params: Vec<String>,
}

impl Message {
    pub fn parse(line: &str) -> Message {
        let line = line.trim_start_matches(' ');

        // The terminator must appear within 510 bytes; a line without one is
        // accepted as-is when it fits (the transport already framed it).
        let body = match line.find(['\r', '\n']) {
            Some(pos) if pos > MAX_LINE_LEN => return Message::default(),
            Some(pos) => &line[..pos],
            None if line.len() > MAX_LINE_LEN => return Message::default(),
            None => line,
        };
        if body.is_empty() {
            return Message::default();
        }

        match message_body_parser(body) {
            Ok((_rem, message)) => message,
            Err(_) => Message::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.command.is_empty()
    }
}

fn space(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c == ' ').parse(input)
}

// prefix = ":" <source> SPACE
fn prefix_parser(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), take_while1(|c: char| c != ' ')).parse(input)
}

// command = 1*letter / 3digit
fn command_parser(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c != ' ').parse(input)
}

// middle = one space-delimited token; trailing = ":" to end of line
fn param_parser(input: &str) -> IResult<&str, &str> {
    alt((preceded(char(':'), rest), take_while1(|c: char| c != ' '))).parse(input)
}

fn message_body_parser(input: &str) -> IResult<&str, Message> {
    let (rem, prefix) = opt(terminated(prefix_parser, space)).parse(input)?;
    let (rem, command) = opt(command_parser).parse(rem)?;
    let (rem, params) = many0(preceded(space, param_parser)).parse(rem)?;

    Ok((
        rem,
        Message {
            prefix: prefix.map(Prefix::from_raw),
            command: command.unwrap_or_default().to_owned(),
            params: params.into_iter().map(str::to_owned).collect(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(message: &Message) -> Vec<&str> {
        message.params.iter().map(String::as_str).collect()
    }

    #[test]
    fn plain_command_without_params() {
        let message = Message::parse("PING\r\n");
        assert_eq!(message.command, "PING");
        assert!(message.params.is_empty());
        assert!(message.prefix.is_none());
    }

    #[test]
    fn command_with_middles_and_trailing() {
        // Example:
        // USER guest 0 * :Ronnie Reagan ; User registering themselves with a
        // username of "guest" and real name "Ronnie Reagan".
        let message = Message::parse("USER guest 0 * :Ronnie Reagan\r\n");
        assert_eq!(message.command, "USER");
        assert_eq!(params(&message), ["guest", "0", "*", "Ronnie Reagan"]);
    }

    #[test]
    fn trailing_may_contain_colons_and_spaces() {
        let message = Message::parse("PRIVMSG #chan :see: this has spaces");
        assert_eq!(params(&message), ["#chan", "see: this has spaces"]);
    }

    #[test]
    fn trailing_may_be_empty() {
        let message = Message::parse("PART #chan :\r\n");
        assert_eq!(params(&message), ["#chan", ""]);
    }

    #[test]
    fn full_client_prefix_is_split() {
        let message = Message::parse(":alice!alice@jusot.com PRIVMSG #x :hi\r\n");
        let prefix = message.prefix.clone().unwrap();
        assert_eq!(prefix.source, "alice!alice@jusot.com");
        assert_eq!(prefix.nick.as_deref(), Some("alice"));
        assert_eq!(prefix.user.as_deref(), Some("alice"));
        assert_eq!(prefix.host.as_deref(), Some("jusot.com"));
        assert_eq!(message.command, "PRIVMSG");
        assert_eq!(params(&message), ["#x", "hi"]);
    }

    #[test]
    fn server_prefix_keeps_only_source() {
        let message = Message::parse(":tolsun.oulu.fi PONG tolsun.oulu.fi\r\n");
        let prefix = message.prefix.unwrap();
        assert_eq!(prefix.source, "tolsun.oulu.fi");
        assert!(prefix.nick.is_none());
        assert!(prefix.user.is_none());
        assert!(prefix.host.is_none());
    }

    #[test]
    fn nick_at_host_prefix() {
        let message = Message::parse(":alice@192.168.1.1 QUIT\r\n");
        let prefix = message.prefix.unwrap();
        assert_eq!(prefix.nick.as_deref(), Some("alice"));
        assert!(prefix.user.is_none());
        assert_eq!(prefix.host.as_deref(), Some("192.168.1.1"));
    }

    #[test]
    fn leading_spaces_are_stripped() {
        let message = Message::parse("   NICK Wiz\r\n");
        assert_eq!(message.command, "NICK");
        assert_eq!(params(&message), ["Wiz"]);
    }

    #[test]
    fn empty_and_blank_lines_yield_the_empty_command() {
        assert!(Message::parse("").is_empty());
        assert!(Message::parse("\r\n").is_empty());
        assert!(Message::parse("   \r\n").is_empty());
    }

    #[test]
    fn unterminated_oversized_line_yields_the_empty_command() {
        let line = "PRIVMSG #x :".to_owned() + &"a".repeat(600);
        assert!(Message::parse(&line).is_empty());

        let mut terminated_late = "PRIVMSG #x :".to_owned() + &"a".repeat(600);
        terminated_late.push_str("\r\n");
        assert!(Message::parse(&terminated_late).is_empty());
    }

    #[test]
    fn line_without_terminator_is_accepted_when_short() {
        let message = Message::parse("NICK alice");
        assert_eq!(message.command, "NICK");
        assert_eq!(params(&message), ["alice"]);
    }

    #[test]
    fn repeated_spaces_separate_params() {
        let message = Message::parse("MODE  #x   +o  bob\r\n");
        assert_eq!(params(&message), ["#x", "+o", "bob"]);
    }
}
