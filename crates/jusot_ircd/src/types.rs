pub type ClientId = usize;
pub type Nickname = String;
pub type ChannelName = String;
pub type Topic = String;
