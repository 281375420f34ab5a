// Console logging and small formatting helpers shared by the pages.

use std::cell::Cell;

thread_local! {
    static DEBUG_LOG: Cell<bool> = const { Cell::new(false) };
}

pub fn set_debug_logging(enabled: bool) {
    DEBUG_LOG.with(|flag| flag.set(enabled));
}

pub fn clog(msg: &str) {
    // Off unless enabled in the client config.
    if DEBUG_LOG.with(Cell::get) {
        #[cfg(target_arch = "wasm32")]
        gloo::console::log!(msg);
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("{msg}");
    }
}

pub fn cwarn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    gloo::console::warn!(msg);
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("warning: {msg}");
}

/// `HH:MM` (UTC) for a unix timestamp in seconds.
pub fn format_clock(unix_secs: i64) -> String {
    let day_secs = unix_secs.rem_euclid(86_400);
    let h = day_secs / 3600;
    let m = (day_secs % 3600) / 60;
    format!("{:02}:{:02}", h, m)
}

pub fn navigate(url: &str) {
    let Some(win) = web_sys::window() else {
        return;
    };
    if let Err(err) = win.location().set_href(url) {
        cwarn(&format!("navigation to {url} failed: {err:?}"));
    }
}

/// Reads the value of the `<input>` that fired an event.
pub fn input_value(e: &web_sys::Event) -> String {
    use wasm_bindgen::JsCast;
    e.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

pub fn input_checked(e: &web_sys::Event) -> bool {
    use wasm_bindgen::JsCast;
    e.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .map(|input| input.checked())
        .unwrap_or(false)
}
