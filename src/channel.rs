//! Browser WebSocket transport speaking Socket.IO, and the hook that binds a page
//! controller to it.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, ErrorEvent, Event, MessageEvent, WebSocket};
use yew::prelude::*;

use crate::config::ClientConfig;
use crate::error::ChannelError;
use crate::protocol::{decode_frame, encode_event, ClientEvent, Frame, Reply, ServerEvent, CONNECT_FRAME, PONG_FRAME};
use crate::state::Controller;
use crate::util::{clog, cwarn, navigate};

struct WsHandlers {
    _onopen: Closure<dyn FnMut(Event)>,
    _onmessage: Closure<dyn FnMut(MessageEvent)>,
    _onerror: Closure<dyn FnMut(ErrorEvent)>,
    _onclose: Closure<dyn FnMut(Event)>,
}

/// One socket per page. Cloning shares the connection.
#[derive(Clone, Default)]
pub struct SocketChannel {
    ws: Rc<RefCell<Option<WebSocket>>>,
    handlers: Rc<RefCell<Option<WsHandlers>>>,
    /// The Socket.IO namespace is connected, not merely the WebSocket.
    connected: Rc<Cell<bool>>,
}

impl SocketChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.connected.get()
    }

    pub fn connect(
        &self,
        url: &str,
        on_open: Rc<dyn Fn()>,
        on_event: Rc<dyn Fn(ServerEvent)>,
    ) -> Result<(), ChannelError> {
        self.disconnect();
        let url = url.trim();
        if url.is_empty() {
            return Err(ChannelError::EmptyUrl);
        }
        let ws = WebSocket::new(url).map_err(|_| ChannelError::Open(url.to_string()))?;
        *self.ws.borrow_mut() = Some(ws.clone());

        let onopen = {
            let url = url.to_string();
            Closure::wrap(Box::new(move |_event: Event| {
                clog(&format!("websocket open {url}"));
            }) as Box<dyn FnMut(Event)>)
        };
        let onmessage = {
            let ws = ws.clone();
            let connected = self.connected.clone();
            Closure::wrap(Box::new(move |event: MessageEvent| {
                let Some(text) = event.data().as_string() else {
                    return;
                };
                match decode_frame(&text) {
                    Ok(Frame::Open(handshake)) => {
                        clog(&format!("engine session {}", handshake.sid));
                        send_raw(&ws, CONNECT_FRAME);
                    }
                    Ok(Frame::Ping) => send_raw(&ws, PONG_FRAME),
                    Ok(Frame::Connected) => {
                        connected.set(true);
                        on_open();
                    }
                    Ok(Frame::Disconnected) | Ok(Frame::Close) => {
                        connected.set(false);
                        cwarn("server closed the session");
                    }
                    Ok(Frame::ConnectError(message)) => {
                        cwarn(&format!("socket connect refused: {message}"));
                    }
                    Ok(Frame::Event(server_event)) => {
                        clog(&format!("recv {server_event:?}"));
                        on_event(server_event);
                    }
                    Ok(Frame::Pong) | Ok(Frame::Noop) => {}
                    Err(err) => cwarn(&format!("dropping frame: {err}")),
                }
            }) as Box<dyn FnMut(MessageEvent)>)
        };
        let onerror = {
            let url = url.to_string();
            Closure::wrap(Box::new(move |_event: ErrorEvent| {
                cwarn(&format!("websocket error {url}"));
            }) as Box<dyn FnMut(ErrorEvent)>)
        };
        let onclose = {
            let connected = self.connected.clone();
            Closure::wrap(Box::new(move |event: Event| {
                connected.set(false);
                match event.dyn_ref::<CloseEvent>() {
                    Some(close) if !close.reason().is_empty() => {
                        cwarn(&format!("websocket closed ({}): {}", close.code(), close.reason()))
                    }
                    Some(close) => clog(&format!("websocket closed ({})", close.code())),
                    None => clog("websocket closed"),
                }
            }) as Box<dyn FnMut(Event)>)
        };

        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));

        *self.handlers.borrow_mut() = Some(WsHandlers {
            _onopen: onopen,
            _onmessage: onmessage,
            _onerror: onerror,
            _onclose: onclose,
        });
        Ok(())
    }

    /// Sends now or not at all; nothing is queued while disconnected.
    pub fn send(&self, event: &ClientEvent) -> Result<(), ChannelError> {
        if !self.connected.get() {
            return Err(ChannelError::NotConnected);
        }
        let ws = self.ws.borrow().clone().ok_or(ChannelError::NotConnected)?;
        let frame = encode_event(event)?;
        clog(&format!("send {frame}"));
        ws.send_with_str(&frame).map_err(|_| ChannelError::Send)
    }

    pub fn dispatch(&self, replies: Vec<Reply>) {
        for reply in replies {
            match reply {
                Reply::Send(event) => self.send_or_warn(&event),
                Reply::SendLater { event, delay_ms } => {
                    let channel = self.clone();
                    Timeout::new(delay_ms, move || channel.send_or_warn(&event)).forget();
                }
                Reply::Navigate(url) => navigate(&url),
            }
        }
    }

    /// Detaches the handlers and closes the socket.
    pub fn disconnect(&self) {
        self.connected.set(false);
        if let Some(ws) = self.ws.borrow_mut().take() {
            ws.set_onopen(None);
            ws.set_onmessage(None);
            ws.set_onerror(None);
            ws.set_onclose(None);
            let _ = ws.close();
        }
        self.handlers.borrow_mut().take();
    }

    fn send_or_warn(&self, event: &ClientEvent) {
        if let Err(err) = self.send(event) {
            cwarn(&format!("{} not sent: {err}", event.channel_name()));
        }
    }
}

fn send_raw(ws: &WebSocket, frame: &str) {
    if ws.send_with_str(frame).is_err() {
        cwarn(&format!("failed to send control frame {frame}"));
    }
}

/// A page controller bound to its socket. Intents go through [`ControllerHandle::act`].
pub struct ControllerHandle<C> {
    controller: Rc<RefCell<C>>,
    channel: SocketChannel,
    rerender: UseForceUpdateHandle,
}

impl<C> Clone for ControllerHandle<C> {
    fn clone(&self) -> Self {
        Self {
            controller: self.controller.clone(),
            channel: self.channel.clone(),
            rerender: self.rerender.clone(),
        }
    }
}

impl<C: Controller> ControllerHandle<C> {
    pub fn borrow(&self) -> Ref<'_, C> {
        self.controller.borrow()
    }

    pub fn act(&self, intent: impl FnOnce(&mut C) -> Vec<Reply>) {
        let replies = {
            let mut controller = self.controller.borrow_mut();
            intent(&mut *controller)
        };
        self.channel.dispatch(replies);
        self.rerender.force_update();
    }

    /// Mutates without re-rendering, for high-rate input such as pointer moves.
    pub fn with_mut(&self, f: impl FnOnce(&mut C)) {
        f(&mut *self.controller.borrow_mut());
    }

    pub fn is_connected(&self) -> bool {
        self.channel.is_connected()
    }
}

/// Owns the page controller and its socket for the lifetime of the component.
/// `move_user` redirects are followed here for every page.
#[hook]
pub fn use_controller<C, F>(init: F) -> ControllerHandle<C>
where
    C: Controller + 'static,
    F: FnOnce() -> C,
{
    let config = use_context::<ClientConfig>().unwrap_or_default();
    let controller = use_mut_ref(init);
    let channel = (*use_state(SocketChannel::new)).clone();
    let rerender = use_force_update();

    {
        let controller = controller.clone();
        let channel = channel.clone();
        let rerender = rerender.clone();
        use_effect_with(config.socket_url, move |url| {
            let on_open: Rc<dyn Fn()> = {
                let controller = controller.clone();
                let channel = channel.clone();
                let rerender = rerender.clone();
                Rc::new(move || {
                    let replies = controller.borrow_mut().on_open();
                    channel.dispatch(replies);
                    rerender.force_update();
                })
            };
            let on_event: Rc<dyn Fn(ServerEvent)> = {
                let channel = channel.clone();
                Rc::new(move |event: ServerEvent| {
                    if let Some(redirect) = event.redirect() {
                        channel.dispatch(vec![redirect]);
                        return;
                    }
                    let replies = controller.borrow_mut().on_event(event);
                    channel.dispatch(replies);
                    rerender.force_update();
                })
            };
            if let Err(err) = channel.connect(url, on_open, on_event) {
                cwarn(&format!("realtime channel unavailable: {err}"));
            }
            move || channel.disconnect()
        });
    }

    ControllerHandle { controller, channel, rerender }
}
