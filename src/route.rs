use crate::model::RoomId;

/// Page selected from the URL path. Each page mounts exactly one controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Signup,
    Profile,
    OtherProfile(String),
    Friends,
    Settings,
    ChangePassword,
    Dictionary,
    SoloDrawing,
    Training,
    Matching,
    Duel(RoomId),
    Level(u32),
    Chat(RoomId),
    NotFound,
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] | ["home"] => Route::Home,
            ["login"] => Route::Login,
            ["signup"] => Route::Signup,
            ["profile"] | ["profile", "progress"] => Route::Profile,
            ["profile", "friends"] => Route::Friends,
            ["profile", "settings"] => Route::Settings,
            ["profile", "change-password"] => Route::ChangePassword,
            ["other-profile", name] => Route::OtherProfile(decode_segment(name)),
            ["dictionary"] => Route::Dictionary,
            ["games", "single", "drawing"] => Route::SoloDrawing,
            ["create-training"] => Route::Training,
            ["single", "match"] => Route::Matching,
            ["multiplayer", "game", room] => parse_id(room).map_or(Route::NotFound, |r| Route::Duel(RoomId(r))),
            ["level", n] => n.parse().map_or(Route::NotFound, Route::Level),
            ["chat", room] => parse_id(room).map_or(Route::NotFound, |r| Route::Chat(RoomId(r))),
            _ => Route::NotFound,
        }
    }

    pub fn current() -> Self {
        let path = web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default();
        Self::from_path(&path)
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

fn decode_segment(raw: &str) -> String {
    js_sys::decode_uri_component(raw)
        .ok()
        .and_then(|s| s.as_string())
        .unwrap_or_else(|| raw.to_string())
}
