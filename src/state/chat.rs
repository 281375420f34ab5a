//! Two-person chat room.

use crate::model::{RoomId, UserId, WireMessage};
use crate::protocol::{ClientEvent, Reply, ServerEvent};
use crate::state::Controller;
use crate::util::format_clock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Identities {
    pub me: UserId,
    pub them: UserId,
    pub room: RoomId,
}

/// One rendered line of the conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatRow {
    pub text: String,
    pub time: String,
    pub mine: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ChatRoom {
    who: Option<Identities>,
    /// History first (own then peer's), then live arrivals in order received.
    messages: Vec<WireMessage>,
}

impl ChatRoom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identities(&self) -> Option<Identities> {
        self.who
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Messages in chronological order. Equal timestamps keep their stored order.
    pub fn rows(&self) -> Vec<ChatRow> {
        let mut ordered: Vec<&WireMessage> = self.messages.iter().collect();
        ordered.sort_by_key(|WireMessage(_, at, _)| *at);
        let me = self.who.map(|w| w.me);
        ordered
            .into_iter()
            .map(|WireMessage(text, at, from)| ChatRow {
                text: text.clone(),
                time: format_clock(*at),
                mine: Some(*from) == me,
            })
            .collect()
    }

    pub fn send(&mut self, text: &str) -> Vec<Reply> {
        let text = text.trim();
        let Some(who) = self.who else {
            return Vec::new();
        };
        if text.is_empty() {
            return Vec::new();
        }
        // Not appended here; the server echoes new_message back to the whole room.
        vec![Reply::send(ClientEvent::SendMessage {
            mess: text.to_owned(),
            message_to: who.them,
            message_from: who.me,
        })]
    }
}

impl Controller for ChatRoom {
    fn on_open(&mut self) -> Vec<Reply> {
        vec![Reply::send(ClientEvent::WhoAreWe)]
    }

    fn on_event(&mut self, event: ServerEvent) -> Vec<Reply> {
        match event {
            ServerEvent::YouAre { you, them, room } => {
                self.who = Some(Identities { me: you, them, room });
                vec![
                    Reply::send(ClientEvent::Join { username: you.to_string(), room }),
                    Reply::send(ClientEvent::GetMessages { other: them }),
                ]
            }
            ServerEvent::RecvPrevious { yours, others } => {
                self.messages = yours;
                self.messages.extend(others);
                Vec::new()
            }
            ServerEvent::NewMessage { message } => {
                self.messages.push(message);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined() -> ChatRoom {
        let mut chat = ChatRoom::new();
        chat.on_event(ServerEvent::YouAre { you: UserId(1), them: UserId(2), room: RoomId(9) });
        chat
    }

    #[test]
    fn identities_trigger_join_and_history() {
        let mut chat = ChatRoom::new();
        assert_eq!(chat.on_open(), vec![Reply::send(ClientEvent::WhoAreWe)]);
        let replies = chat.on_event(ServerEvent::YouAre { you: UserId(1), them: UserId(2), room: RoomId(9) });
        assert_eq!(
            replies,
            vec![
                Reply::send(ClientEvent::Join { username: "1".into(), room: RoomId(9) }),
                Reply::send(ClientEvent::GetMessages { other: UserId(2) }),
            ]
        );
    }

    #[test]
    fn history_interleaves_by_time() {
        let mut chat = joined();
        chat.on_event(ServerEvent::RecvPrevious {
            yours: vec![WireMessage("hi".into(), 100, UserId(1)), WireMessage("ok".into(), 300, UserId(1))],
            others: vec![WireMessage("hey".into(), 200, UserId(2))],
        });
        let rows = chat.rows();
        let texts: Vec<&str> = rows.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["hi", "hey", "ok"]);
        assert!(rows[0].mine && !rows[1].mine);
    }

    #[test]
    fn rendering_twice_is_identical() {
        let mut chat = joined();
        chat.on_event(ServerEvent::RecvPrevious {
            yours: vec![WireMessage("a".into(), 50, UserId(1))],
            others: vec![WireMessage("b".into(), 50, UserId(2)), WireMessage("c".into(), 10, UserId(2))],
        });
        let first = chat.rows();
        assert_eq!(first, chat.rows());
        assert_eq!(first.len(), 3);
        assert_eq!(first[1].text, "a");
    }

    #[test]
    fn history_replaces_rather_than_appends() {
        let mut chat = joined();
        let history = ServerEvent::RecvPrevious {
            yours: vec![WireMessage("a".into(), 1, UserId(1))],
            others: vec![],
        };
        chat.on_event(history.clone());
        chat.on_event(history);
        assert_eq!(chat.message_count(), 1);
    }

    #[test]
    fn send_waits_for_echo() {
        let mut chat = joined();
        let replies = chat.send("  konnichiwa ");
        assert_eq!(
            replies,
            vec![Reply::send(ClientEvent::SendMessage {
                mess: "konnichiwa".into(),
                message_to: UserId(2),
                message_from: UserId(1),
            })]
        );
        assert_eq!(chat.message_count(), 0);
        chat.on_event(ServerEvent::NewMessage { message: WireMessage("konnichiwa".into(), 61, UserId(1)) });
        assert_eq!(chat.rows()[0].time, "00:01");
    }

    #[test]
    fn blank_or_early_messages_are_dropped() {
        let mut chat = ChatRoom::new();
        assert!(chat.send("hello").is_empty());
        let mut chat = joined();
        assert!(chat.send("   ").is_empty());
    }
}
