use thiserror::Error;

use crate::types::ClientId;

/// Faults that are not protocol events. Protocol failures are numeric
/// replies sent back to the client; the session keeps running.
#[derive(Error, Debug, Clone)]
pub enum InternalIrcError {
    /// The client's writer task is gone; the reader treats this as a
    /// disconnect.
    #[error("outbound queue closed for client {0}")]
    OutboundClosed(ClientId),
}
