use super::drawing_pad::{DrawingPad, PadInput, PeerCanvas};
use super::overlay::Overlay;
use crate::channel::use_controller;
use crate::config::ClientConfig;
use crate::model::RoomId;
use crate::state::{DuelPhase, DuelSession};
use crate::surface::CanvasSurface;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct DuelViewProps {
    pub room: RoomId,
}

#[function_component]
pub fn DuelView(props: &DuelViewProps) -> Html {
    let config = use_context::<ClientConfig>().unwrap_or_default();
    let room = props.room;
    let duel = use_controller(move || DuelSession::new(room, config.wait_probe_ms));
    let canvas = use_node_ref();

    let on_input = {
        let duel = duel.clone();
        let canvas = canvas.clone();
        Callback::from(move |input: PadInput| {
            let Some(surface) = CanvasSurface::from_node(&canvas) else {
                return;
            };
            match input {
                PadInput::Down(p) => duel.with_mut(|d| d.pointer_down(p)),
                PadInput::Move(p) => duel.with_mut(|d| d.pointer_move(p, &surface)),
                PadInput::Up => duel.act(|d| {
                    d.pointer_up(&surface);
                    Vec::new()
                }),
            }
        })
    };
    let clear_cb = {
        let duel = duel.clone();
        Callback::from(move |_| {
            duel.act(|d| {
                d.clear();
                Vec::new()
            })
        })
    };
    let submit_cb = {
        let duel = duel.clone();
        Callback::from(move |_| duel.act(DuelSession::submit))
    };
    let ready_cb = {
        let duel = duel.clone();
        Callback::from(move |_| duel.act(DuelSession::ready))
    };
    let leave_cb = {
        let duel = duel.clone();
        Callback::from(move |_| duel.act(DuelSession::leave))
    };

    let d = duel.borrow();
    let colours = d.colours();
    let peer_name = d.peer().username.clone().unwrap_or_else(|| "Opponent".to_string());
    let status = match d.phase() {
        _ if !duel.is_connected() => "Connecting...",
        DuelPhase::Submitted => "Waiting for the other drawing...",
        DuelPhase::Ready => "Starting the next round...",
        DuelPhase::AwaitingPeerReady => "Waiting for the other player to be ready...",
        _ => "",
    };

    html! {
        <div style="display:flex; flex-direction:column; gap:12px; padding:16px;">
            <Overlay show={d.waiting_overlay()} title="Waiting for another player" message={Some(AttrValue::from("The game starts when both players have joined."))} />
            <Overlay show={d.blocked()} title="You can't play yet" message={Some(AttrValue::from("Finish a level to unlock characters."))} exit_href={Some(AttrValue::from("/home"))} />
            <h2 style="margin:0;">{ d.prompt() }</h2>
            <div style="display:flex; gap:16px; flex-wrap:wrap;">
                <div style="flex:1; min-width:260px;">
                    <p style="margin:4px 0;">{ format!("You: {} pts", d.me().score) }</p>
                    <DrawingPad canvas={canvas} epoch={d.local_epoch()} background={colours.map(|c| c.me)} on_input={on_input} />
                </div>
                <div style="flex:1; min-width:260px;">
                    <p style="margin:4px 0;">{ format!("{}: {} pts", peer_name, d.peer().score) }</p>
                    <PeerCanvas image={d.peer_image().map(str::to_string)} visible={d.peer_canvas_visible()} epoch={d.peer_epoch()} background={colours.map(|c| c.peer)} />
                </div>
            </div>
            <p style="margin:0; color:#8b949e;">{ status }</p>
            <div style="display:flex; gap:12px;">
                if d.controls_visible() {
                    <button onclick={clear_cb}>{"Clear"}</button>
                    <button onclick={submit_cb} disabled={d.strokes().is_empty()}>{"Submit"}</button>
                }
                if d.ready_visible() {
                    <button onclick={ready_cb}>{"Ready"}</button>
                }
                <button onclick={leave_cb}>{"Leave"}</button>
            </div>
        </div>
    }
}
