//! Client configuration, persisted as JSON in localStorage.

use serde::{Deserialize, Serialize};

use crate::util::cwarn;

const STORAGE_KEY: &str = "kana_dojo_config";
const SOCKET_PATH: &str = "/socket.io/?EIO=4&transport=websocket";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Full websocket URL of the Socket.IO endpoint. Empty means derive from the page.
    pub socket_url: String,
    pub debug_log: bool,
    /// Delay before re-sending the presence probe after a `wait`.
    pub wait_probe_ms: u32,
    /// How long a mismatched pair of cards stays face up.
    pub match_reveal_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            socket_url: String::new(),
            debug_log: false,
            wait_probe_ms: 1500,
            match_reveal_ms: 700,
        }
    }
}

impl ClientConfig {
    pub fn load() -> Self {
        let mut config = read_stored().unwrap_or_default();
        if config.socket_url.trim().is_empty() {
            config.socket_url = default_socket_url().unwrap_or_default();
        }
        config
    }
}

fn read_stored() -> Option<ClientConfig> {
    let store = web_sys::window()?.local_storage().ok()??;
    let raw = store.get_item(STORAGE_KEY).ok()??;
    match serde_json::from_str(&raw) {
        Ok(config) => Some(config),
        Err(err) => {
            cwarn(&format!("ignoring stored config: {err}"));
            None
        }
    }
}

/// `ws(s)://host/socket.io/...`, from a build-time base or the page location.
pub fn default_socket_url() -> Option<String> {
    if let Some(raw) = option_env!("KANA_DOJO_WS_BASE").or(option_env!("TRUNK_PUBLIC_WS_BASE")) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return Some(socket_url_for_base(trimmed));
        }
    }
    let location = web_sys::window()?.location();
    let host = location.host().ok()?;
    if host.trim().is_empty() {
        return None;
    }
    let protocol = location.protocol().ok()?;
    Some(socket_url_for(&protocol, &host))
}

pub fn socket_url_for(page_protocol: &str, host: &str) -> String {
    let scheme = if page_protocol.eq_ignore_ascii_case("https:") { "wss" } else { "ws" };
    format!("{scheme}://{host}{SOCKET_PATH}")
}

fn socket_url_for_base(base: &str) -> String {
    let base = base.trim_end_matches('/');
    let base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        base.to_string()
    };
    format!("{base}{SOCKET_PATH}")
}
