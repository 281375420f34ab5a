use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("empty frame")]
    Empty,
    #[error("unknown engine packet type '{0}'")]
    UnknownPacket(char),
    #[error("unsupported socket packet '{0}'")]
    UnsupportedPacket(String),
    #[error("event frame is not a [name, payload] array")]
    MalformedEvent,
    #[error("unknown or malformed '{name}' event: {source}")]
    Event {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("socket url is empty")]
    EmptyUrl,
    #[error("failed to open websocket to {0}")]
    Open(String),
    #[error("socket is not connected")]
    NotConnected,
    #[error("failed to send frame")]
    Send,
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
