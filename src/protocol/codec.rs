//! Socket.IO v5 text frames over Engine.IO v4.
//!
//! Only the default namespace and text (non-binary) events are used by the server.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{ClientEvent, ServerEvent};
use crate::error::ProtocolError;

/// Socket.IO CONNECT for the default namespace, sent after the Engine.IO handshake.
pub const CONNECT_FRAME: &str = "40";
/// Engine.IO pong, the reply to every server ping.
pub const PONG_FRAME: &str = "3";

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub ping_interval: u32,
    #[serde(default)]
    pub ping_timeout: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
    Open(Handshake),
    Close,
    Ping,
    Pong,
    Noop,
    Connected,
    Disconnected,
    ConnectError(String),
    Event(ServerEvent),
}

pub fn decode_frame(text: &str) -> Result<Frame, ProtocolError> {
    let mut chars = text.chars();
    let packet = chars.next().ok_or(ProtocolError::Empty)?;
    let rest = chars.as_str();
    match packet {
        '0' => Ok(Frame::Open(serde_json::from_str(rest)?)),
        '1' => Ok(Frame::Close),
        '2' => Ok(Frame::Ping),
        '3' => Ok(Frame::Pong),
        '4' => decode_socket_packet(rest),
        '6' => Ok(Frame::Noop),
        other => Err(ProtocolError::UnknownPacket(other)),
    }
}

fn decode_socket_packet(body: &str) -> Result<Frame, ProtocolError> {
    let mut chars = body.chars();
    let kind = chars.next().ok_or(ProtocolError::Empty)?;
    let rest = chars.as_str();
    match kind {
        '0' => Ok(Frame::Connected),
        '1' => Ok(Frame::Disconnected),
        '2' => decode_event(rest).map(Frame::Event),
        '4' => {
            let message = serde_json::from_str::<Value>(rest)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| rest.to_string());
            Ok(Frame::ConnectError(message))
        }
        _ => Err(ProtocolError::UnsupportedPacket(body.to_string())),
    }
}

fn decode_event(body: &str) -> Result<ServerEvent, ProtocolError> {
    // Acknowledgement ids would sit between the packet type and the array.
    let start = body.find('[').ok_or(ProtocolError::MalformedEvent)?;
    let items: Vec<Value> = serde_json::from_str(&body[start..])?;
    let mut items = items.into_iter();
    let name = match items.next() {
        Some(Value::String(name)) => name,
        _ => return Err(ProtocolError::MalformedEvent),
    };
    let mut tagged = Map::new();
    tagged.insert("event".to_string(), Value::String(name.clone()));
    match items.next() {
        None | Some(Value::Null) => {}
        Some(data) => {
            tagged.insert("data".to_string(), data);
        }
    }
    serde_json::from_value(Value::Object(tagged))
        .map_err(|source| ProtocolError::Event { name, source })
}

pub fn encode_event(event: &ClientEvent) -> Result<String, ProtocolError> {
    let payload = match event {
        ClientEvent::Join { username, room } => serde_json::json!({
            "username": username,
            "room": room,
        }),
        other => serde_json::to_value(other)?,
    };
    let frame = serde_json::to_string(&(event.channel_name(), payload))?;
    Ok(format!("42{frame}"))
}
