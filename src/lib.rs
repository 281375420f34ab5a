//! Browser client for a kana learning site: drawing challenges against the server's
//! classifier, two-player drawing rooms, a matching game, chat, lessons and profiles.
//!
//! Page logic lives in [`state`] and is plain Rust; [`components`] renders it with yew
//! and [`channel`] carries events to and from the server.

pub mod channel;
pub mod components;
pub mod config;
pub mod error;
pub mod model;
pub mod protocol;
pub mod route;
pub mod state;
pub mod surface;
pub mod util;
