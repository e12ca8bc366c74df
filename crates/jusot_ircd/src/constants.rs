// Server identity. Replies carry the bare name after ':' as the prefix.
pub const SERVER_NAME: &'static str = "jusot.com";
pub const SERVER_VERSION: &'static str = "2";

// Advertised in RPL_MYINFO (004).
pub const USER_MODES: &'static str = "ao";
pub const CHANNEL_MODES: &'static str = "mtov";

// RFC 2812 2.3: messages SHALL NOT exceed 512 characters in length,
// counting all characters including the trailing CR-LF.
pub const MAX_LINE_LEN: usize = 510;

// Nickname sentinel of a session that has not claimed one yet.
pub const UNREGISTERED_NICK: &'static str = "*";

pub const DEFAULT_QUIT_MESSAGE: &'static str = "Client Quit";

//    001    RPL_WELCOME
//           "Welcome to the Internet Relay Network
//            <nick>!<user>@<host>"
pub const RPL_WELCOME_NB: u16 = 1;
pub const RPL_WELCOME_STR: &'static str = "Welcome to the Internet Relay Network";

//    002    RPL_YOURHOST
//           "Your host is <servername>, running version <ver>"
pub const RPL_YOURHOST_NB: u16 = 2;

//    003    RPL_CREATED
//           "This server was created <date>"
pub const RPL_CREATED_NB: u16 = 3;

//    004    RPL_MYINFO
//           "<servername> <version> <available user modes>
//            <available channel modes>"
pub const RPL_MYINFO_NB: u16 = 4;

//    251    RPL_LUSERCLIENT
//           ":There are <integer> users and <integer>
//            services on <integer> servers"
pub const RPL_LUSERCLIENT_NB: u16 = 251;

//    252    RPL_LUSEROP
//           "<integer> :operator(s) online"
pub const RPL_LUSEROP_NB: u16 = 252;
pub const RPL_LUSEROP_STR: &'static str = "operator(s) online";

//    253    RPL_LUSERUNKNOWN
//           "<integer> :unknown connection(s)"
pub const RPL_LUSERUNKNOWN_NB: u16 = 253;
pub const RPL_LUSERUNKNOWN_STR: &'static str = "unknown connection(s)";

//    254    RPL_LUSERCHANNELS
//           "<integer> :channels formed"
pub const RPL_LUSERCHANNELS_NB: u16 = 254;
pub const RPL_LUSERCHANNELS_STR: &'static str = "channels formed";

//    255    RPL_LUSERME
//           ":I have <integer> clients and <integer> servers"
pub const RPL_LUSERME_NB: u16 = 255;

//    301    RPL_AWAY
//           "<nick> :<away message>"
pub const RPL_AWAY_NB: u16 = 301;

//    305    RPL_UNAWAY
//           ":You are no longer marked as being away"
pub const RPL_UNAWAY_NB: u16 = 305;
pub const RPL_UNAWAY_STR: &'static str = "You are no longer marked as being away";

//    306    RPL_NOWAWAY
//           ":You have been marked as being away"
pub const RPL_NOWAWAY_NB: u16 = 306;
pub const RPL_NOWAWAY_STR: &'static str = "You have been marked as being away";

//    311    RPL_WHOISUSER
//           "<nick> <user> <host> * :<real name>"
pub const RPL_WHOISUSER_NB: u16 = 311;

//    312    RPL_WHOISSERVER
//           "<nick> <server> :<server info>"
pub const RPL_WHOISSERVER_NB: u16 = 312;

//    315    RPL_ENDOFWHO
//           "<name> :End of WHO list"
pub const RPL_ENDOFWHO_NB: u16 = 315;
pub const RPL_ENDOFWHO_STR: &'static str = "End of WHO list";

//    318    RPL_ENDOFWHOIS
//           "<nick> :End of WHOIS list"
pub const RPL_ENDOFWHOIS_NB: u16 = 318;
pub const RPL_ENDOFWHOIS_STR: &'static str = "End of WHOIS list";

//    322    RPL_LIST
//           "<channel> <# visible> :<topic>"
pub const RPL_LIST_NB: u16 = 322;

//    323    RPL_LISTEND
//           ":End of LIST"
pub const RPL_LISTEND_NB: u16 = 323;
pub const RPL_LISTEND_STR: &'static str = "End of LIST";

//    324    RPL_CHANNELMODEIS
//           "<channel> <mode> <mode params>"
pub const RPL_CHANNELMODEIS_NB: u16 = 324;

//    331    RPL_NOTOPIC
//           "<channel> :No topic is set"
pub const RPL_NOTOPIC_NB: u16 = 331;
pub const RPL_NOTOPIC_STR: &'static str = "No topic is set";

//    332    RPL_TOPIC
//           "<channel> :<topic>"
pub const RPL_TOPIC_NB: u16 = 332;

//    353    RPL_NAMREPLY
//           "( "=" / "*" / "@" ) <channel>
//            :[ "@" / "+" ] <nick> *( " " [ "@" / "+" ] <nick> )
pub const RPL_NAMREPLY_NB: u16 = 353;

//    366    RPL_ENDOFNAMES
//           "<channel> :End of NAMES list"
pub const RPL_ENDOFNAMES_NB: u16 = 366;
pub const RPL_ENDOFNAMES_STR: &'static str = "End of NAMES list";

//    372    RPL_MOTD
//           ":- <text>"
pub const RPL_MOTD_NB: u16 = 372;

//    375    RPL_MOTDSTART
//           ":- <server> Message of the day - "
pub const RPL_MOTDSTART_NB: u16 = 375;

//    376    RPL_ENDOFMOTD
//           ":End of MOTD command"
pub const RPL_ENDOFMOTD_NB: u16 = 376;
pub const RPL_ENDOFMOTD_STR: &'static str = "End of MOTD command";

//    381    RPL_YOUREOPER
//           ":You are now an IRC operator"
pub const RPL_YOUREOPER_NB: u16 = 381;
pub const RPL_YOUREOPER_STR: &'static str = "You are now an IRC operator";

//    401    ERR_NOSUCHNICK
//           "<nickname> :No such nick/channel"
pub const ERR_NOSUCHNICK_NB: u16 = 401;
pub const ERR_NOSUCHNICK_STR: &'static str = "No such nick/channel";

//    403    ERR_NOSUCHCHANNEL
//           "<channel name> :No such channel"
pub const ERR_NOSUCHCHANNEL_NB: u16 = 403;
pub const ERR_NOSUCHCHANNEL_STR: &'static str = "No such channel";

//    404    ERR_CANNOTSENDTOCHAN
//           "<channel name> :Cannot send to channel"
pub const ERR_CANNOTSENDTOCHAN_NB: u16 = 404;
pub const ERR_CANNOTSENDTOCHAN_STR: &'static str = "Cannot send to channel";

//    411    ERR_NORECIPIENT
//           ":No recipient given (<command>)"
pub const ERR_NORECIPIENT_NB: u16 = 411;
pub const ERR_NORECIPIENT_STR: &'static str = "No recipient given";

//    412    ERR_NOTEXTTOSEND
//           ":No text to send"
pub const ERR_NOTEXTTOSEND_NB: u16 = 412;
pub const ERR_NOTEXTTOSEND_STR: &'static str = "No text to send";

//    421    ERR_UNKNOWNCOMMAND
//           "<command> :Unknown command"
pub const ERR_UNKNOWNCOMMAND_NB: u16 = 421;
pub const ERR_UNKNOWNCOMMAND_STR: &'static str = "Unknown command";

//    422    ERR_NOMOTD
//           ":MOTD File is missing"
pub const ERR_NOMOTD_NB: u16 = 422;
pub const ERR_NOMOTD_STR: &'static str = "MOTD File is missing";

//    431    ERR_NONICKNAMEGIVEN
//           ":No nickname given"
pub const ERR_NONICKNAMEGIVEN_NB: u16 = 431;
pub const ERR_NONICKNAMEGIVEN_STR: &'static str = "No nickname given";

//    433    ERR_NICKNAMEINUSE
//           "<nick> :Nickname is already in use"
pub const ERR_NICKNAMEINUSE_NB: u16 = 433;
pub const ERR_NICKNAMEINUSE_STR: &'static str = "Nickname is already in use";

//    441    ERR_USERNOTINCHANNEL
//           "<nick> <channel> :They aren't on that channel"
pub const ERR_USERNOTINCHANNEL_NB: u16 = 441;
pub const ERR_USERNOTINCHANNEL_STR: &'static str = "They aren't on that channel";

//    442    ERR_NOTONCHANNEL
//           "<channel> :You're not on that channel"
pub const ERR_NOTONCHANNEL_NB: u16 = 442;
pub const ERR_NOTONCHANNEL_STR: &'static str = "You're not on that channel";

//    451    ERR_NOTREGISTERED
//           ":You have not registered"
pub const ERR_NOTREGISTERED_NB: u16 = 451;
pub const ERR_NOTREGISTERED_STR: &'static str = "You have not registered";

//    461    ERR_NEEDMOREPARAMS
//           "<command> :Not enough parameters"
pub const ERR_NEEDMOREPARAMS_NB: u16 = 461;
pub const ERR_NEEDMOREPARAMS_STR: &'static str = "Not enough parameters";

//    462    ERR_ALREADYREGISTRED
//           ":Unauthorized command (already registered)"
pub const ERR_ALREADYREGISTERED_NB: u16 = 462;
pub const ERR_ALREADYREGISTERED_STR: &'static str = "Unauthorized command (already registered)";

//    464    ERR_PASSWDMISMATCH
//           ":Password incorrect"
pub const ERR_PASSWDMISMATCH_NB: u16 = 464;
pub const ERR_PASSWDMISMATCH_STR: &'static str = "Password incorrect";

//    472    ERR_UNKNOWNMODE
//           "<char> :is unknown mode char to me"
pub const ERR_UNKNOWNMODE_NB: u16 = 472;
pub const ERR_UNKNOWNMODE_STR: &'static str = "is unknown mode char to me";

//    482    ERR_CHANOPRIVSNEEDED
//           "<channel> :You're not channel operator"
pub const ERR_CHANOPRIVSNEEDED_NB: u16 = 482;
pub const ERR_CHANOPRIVSNEEDED_STR: &'static str = "You're not channel operator";

//    501    ERR_UMODEUNKNOWNFLAG
//           ":Unknown MODE flag"
pub const ERR_UMODEUNKNOWNFLAG_NB: u16 = 501;
pub const ERR_UMODEUNKNOWNFLAG_STR: &'static str = "Unknown MODE flag";

//    502    ERR_USERSDONTMATCH
//           ":Cannot change mode for other users"
pub const ERR_USERSDONTMATCH_NB: u16 = 502;
pub const ERR_USERSDONTMATCH_STR: &'static str = "Cannot change mode for other users";
