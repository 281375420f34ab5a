//! Data carried by the real-time channel.
//! Field names follow the server's payload keys; Python tuples arrive as JSON arrays.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub i64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A character to draw: the kana glyph, its romanised sound and the server's char id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub kana: String,
    pub sound: String,
    pub sound_num: u32,
}

impl Challenge {
    pub fn prompt(&self) -> String {
        format!("Draw the character for \"{}\"", self.sound)
    }
}

/// `(UserID, Username)` rows used by friend lists and user search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef(pub UserId, pub String);

impl UserRef {
    pub fn id(&self) -> UserId {
        self.0
    }

    pub fn username(&self) -> &str {
        &self.1
    }
}

/// `(Username, TotalPoints)` leaderboard rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderEntry(pub String, pub i64);

/// `(Message, DateTime, MessageFrom)`; DateTime is unix seconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage(pub String, pub i64, pub UserId);

/// Matching-game card: `[face, sound]`. Two cards pair when their sounds agree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPair(pub String, pub String);

/// `[sound, kana]` entries taught by a level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelChar(pub String, pub String);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    #[serde(rename = "PrimaryReading")]
    pub primary_reading: String,
    #[serde(rename = "Meanings", default)]
    pub meanings: Vec<String>,
    /// Words without alternative readings come back as `[null]`.
    #[serde(rename = "Readings", default)]
    pub readings: Vec<Option<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileData {
    pub points: i64,
    pub streak: i64,
    #[serde(default)]
    pub friends: Vec<UserRef>,
    #[serde(default)]
    pub friend_requests: Vec<UserRef>,
    #[serde(default)]
    pub awards: Vec<String>,
    pub characters: String,
    pub questions: String,
    pub next_steps: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSettings {
    pub username: String,
    pub email: String,
    pub info: bool,
    pub remind: bool,
    pub promo: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelContent {
    pub points: i64,
    #[serde(default)]
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub char_list: Vec<LevelChar>,
    #[serde(default)]
    pub char_audios: Vec<String>,
    #[serde(default)]
    pub animations: Vec<String>,
}
