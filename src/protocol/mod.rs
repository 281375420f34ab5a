//! Named events exchanged with the server.
//!
//! Outbound actions travel on the `message` event with an `EventType` discriminator;
//! inbound updates arrive as separately named events. Both sides are modelled as
//! tagged enums so every page dispatches on a closed set of variants.

pub mod codec;

use serde::{Deserialize, Serialize};

use crate::model::{
    AccountSettings, CardPair, Challenge, DictionaryEntry, LeaderEntry, LevelContent,
    ProfileData, RoomId, UserId, UserRef, WireMessage,
};

pub use codec::{decode_frame, encode_event, Frame, Handshake, CONNECT_FRAME, PONG_FRAME};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "EventType", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Asks the server for the session's room and user id (`info`).
    Connected,
    CheckAllowed,
    /// Presence probe for a multiplayer room.
    Waiting {
        room: RoomId,
        #[serde(rename = "UserID")]
        user_id: UserId,
    },
    ImageSubmit {
        #[serde(rename = "UserID")]
        user_id: UserId,
        image_data: String,
        room: RoomId,
        sound_num: u32,
    },
    ImageSubmitSingle {
        image_data: String,
        sound_num: u32,
    },
    ImageSubmitTrain {
        image_data: String,
        sound_num: u32,
    },
    AskForChallenge,
    UserReady {
        #[serde(rename = "UserID")]
        user_id: UserId,
        #[serde(rename = "OtherID")]
        other_id: UserId,
        both: bool,
        room: RoomId,
    },
    LeaveRoom {
        room: RoomId,
    },
    LoginData {
        username: String,
        password: String,
    },
    SignUpData {
        username: String,
        email: String,
        password: String,
        c_password: String,
    },
    ForgotPassword {
        username: String,
    },
    LoginOtp {
        username: String,
        otp: String,
    },
    CheckPwordChange,
    SubmitChange {
        password: String,
    },
    GetSettings,
    SettingsChange {
        username: String,
        email: String,
        password: String,
        c_password: String,
        reminder: bool,
        info: bool,
        promo: bool,
    },
    GetProfileData {
        #[serde(rename = "OtherUsername", skip_serializing_if = "Option::is_none")]
        other_username: Option<String>,
    },
    LookFor {
        name: String,
    },
    RequestUser {
        #[serde(rename = "UserID")]
        user_id: UserId,
    },
    ViewOtherProfile {
        #[serde(rename = "OtherUsername")]
        other_username: String,
    },
    Accept {
        #[serde(rename = "UserID")]
        user_id: UserId,
    },
    Reject {
        #[serde(rename = "UserID")]
        user_id: UserId,
    },
    GetLeaders,
    MatchConnect,
    DoneMatches,
    GetLevelData {
        #[serde(rename = "LevelNum")]
        level_num: u32,
    },
    FinishedLevel {
        #[serde(rename = "LevelNum")]
        level_num: u32,
    },
    SearchDictionary {
        search_term: String,
    },
    WhoAreWe,
    SendMessage {
        mess: String,
        #[serde(rename = "MessageTo")]
        message_to: UserId,
        #[serde(rename = "MessageFrom")]
        message_from: UserId,
    },
    GetMessages {
        #[serde(rename = "Other")]
        other: UserId,
    },
    /// Joins a server-side room. Sent on the `join` event instead of `message`.
    Join {
        username: String,
        room: RoomId,
    },
}

impl ClientEvent {
    /// Socket.IO event name the action is emitted on.
    pub fn channel_name(&self) -> &'static str {
        match self {
            ClientEvent::Join { .. } => "join",
            _ => "message",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    Info {
        #[serde(default)]
        room: Option<RoomId>,
        #[serde(rename = "UserID")]
        user_id: UserId,
    },
    AllowedCheck {
        allowed: bool,
    },
    /// The peer has not arrived yet.
    Wait,
    OtherConnection {
        #[serde(rename = "UserID")]
        user_id: UserId,
        username: String,
    },
    RecvChallenge(Challenge),
    RecvImg {
        #[serde(rename = "UserID")]
        user_id: UserId,
        image: String,
    },
    ResultImg {
        result: bool,
        #[serde(rename = "UserID")]
        user_id: UserId,
        points: i64,
    },
    OtherReady {
        #[serde(rename = "UserID")]
        user_id: UserId,
    },
    ResultSingle {
        result: bool,
        points: i64,
        #[serde(default)]
        mistaken_for: Vec<String>,
        #[serde(default)]
        incorrect_strokes: Vec<u32>,
        #[serde(default)]
        char_animation: Option<String>,
    },
    MoveUser {
        url: String,
    },
    LoginError {
        errors: Vec<String>,
    },
    SignupErrors {
        errors: Vec<String>,
    },
    ChangeErrors {
        errors: Vec<String>,
    },
    PasswordErrors {
        errors: Vec<String>,
    },
    CurrentSettings(AccountSettings),
    UserData(ProfileData),
    FoundUsers {
        people: Vec<UserRef>,
    },
    Leaderboard {
        leaders: Vec<LeaderEntry>,
    },
    CharacterList {
        list: Vec<CardPair>,
    },
    LevelData(LevelContent),
    DictionaryResults {
        results: Vec<DictionaryEntry>,
    },
    YouAre {
        you: UserId,
        them: UserId,
        room: RoomId,
    },
    NewMessage {
        message: WireMessage,
    },
    RecvPrevious {
        yours: Vec<WireMessage>,
        others: Vec<WireMessage>,
    },
}

/// What a page controller asks the transport to do after handling an event or intent.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    Send(ClientEvent),
    SendLater { event: ClientEvent, delay_ms: u32 },
    Navigate(String),
}

impl Reply {
    pub fn send(event: ClientEvent) -> Self {
        Reply::Send(event)
    }

    /// The event carried by this reply, if any.
    pub fn event(&self) -> Option<&ClientEvent> {
        match self {
            Reply::Send(event) | Reply::SendLater { event, .. } => Some(event),
            Reply::Navigate(_) => None,
        }
    }
}

impl ServerEvent {
    /// Server-driven redirects apply to every page, ahead of its controller.
    pub fn redirect(&self) -> Option<Reply> {
        match self {
            ServerEvent::MoveUser { url } => Some(Reply::Navigate(url.clone())),
            _ => None,
        }
    }
}
