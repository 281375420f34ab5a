//! Page controllers. Each owns the state of one page for the lifetime of the page,
//! consumes inbound server events and exposes the user's actions as methods.

pub mod chat;
pub mod dictionary;
pub mod duel;
pub mod forms;
pub mod leaderboard;
pub mod levels;
pub mod matching;
pub mod profile;
pub mod solo;
pub mod strokes;

pub use chat::ChatRoom;
pub use dictionary::DictionarySearch;
pub use duel::{DuelPhase, DuelSession};
pub use forms::{AccountForm, FormKind};
pub use leaderboard::Leaderboard;
pub use levels::LevelLesson;
pub use matching::MatchingGame;
pub use profile::{ProfilePage, ProfileTab};
pub use solo::{SoloChallenge, SoloMode, SoloPhase};
pub use strokes::StrokeRecorder;

use crate::protocol::{Reply, ServerEvent};

pub trait Controller {
    /// Requests sent once the channel is connected.
    fn on_open(&mut self) -> Vec<Reply>;

    /// Applies one inbound event. Events meant for other pages are ignored.
    fn on_event(&mut self, event: ServerEvent) -> Vec<Reply>;
}
