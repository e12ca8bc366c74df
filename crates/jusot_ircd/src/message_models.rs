/// One wire-ready line queued on a client's outbound channel.
#[derive(Debug, Clone)]
pub struct IrcMessage {
    pub raw_line: String,
}

impl IrcMessage {
    pub fn new(line: String) -> Self {
        let final_line = if line.ends_with("\r\n") {
            line
        } else {
            format!("{line}\r\n")
        };
        IrcMessage {
            raw_line: final_line,
        }
    }
}
