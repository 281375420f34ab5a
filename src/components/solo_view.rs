use super::drawing_pad::{DrawingPad, PadInput};
use super::overlay::Overlay;
use crate::channel::use_controller;
use crate::state::solo::Feedback;
use crate::state::{SoloChallenge, SoloMode, SoloPhase};
use crate::surface::{CanvasSurface, CORRECT_COLOUR, INCORRECT_COLOUR};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SoloViewProps {
    pub mode: SoloMode,
}

#[function_component]
pub fn SoloView(props: &SoloViewProps) -> Html {
    let mode = props.mode;
    let solo = use_controller(move || SoloChallenge::new(mode));
    let canvas = use_node_ref();

    let on_input = {
        let solo = solo.clone();
        let canvas = canvas.clone();
        Callback::from(move |input: PadInput| {
            let Some(surface) = CanvasSurface::from_node(&canvas) else {
                return;
            };
            match input {
                PadInput::Down(p) => solo.with_mut(|s| s.pointer_down(p)),
                PadInput::Move(p) => solo.with_mut(|s| s.pointer_move(p, &surface)),
                PadInput::Up => solo.act(|s| {
                    s.pointer_up(&surface);
                    Vec::new()
                }),
            }
        })
    };
    let clear_cb = {
        let solo = solo.clone();
        Callback::from(move |_| {
            solo.act(|s| {
                s.clear();
                Vec::new()
            })
        })
    };
    let submit_cb = {
        let solo = solo.clone();
        Callback::from(move |_| solo.act(SoloChallenge::submit))
    };
    let next_cb = {
        let solo = solo.clone();
        Callback::from(move |_| solo.act(SoloChallenge::next))
    };

    let s = solo.borrow();
    let background = match s.last_result() {
        Some(true) => Some(CORRECT_COLOUR),
        Some(false) => Some(INCORRECT_COLOUR),
        None => None,
    };
    let prompt = match s.challenge() {
        Some(ch) => ch.prompt(),
        None => "Fetching a character...".to_string(),
    };
    let header = match s.mode() {
        SoloMode::Game => format!("Score: {}", s.score()),
        SoloMode::Training => format!("Drawings collected: {}", s.submitted_count()),
    };

    html! {
        <div style="display:flex; flex-direction:column; gap:12px; padding:16px; max-width:440px;">
            <Overlay show={s.phase() == SoloPhase::Blocked} title="You can't play yet" message={Some(AttrValue::from("Finish a level to unlock characters."))} exit_href={Some(AttrValue::from("/home"))} />
            <h2 style="margin:0;">{ prompt }</h2>
            <p style="margin:0; color:#8b949e;">{ header }</p>
            <DrawingPad canvas={canvas} epoch={s.canvas_epoch()} background={background} on_input={on_input} />
            <div style="display:flex; gap:12px;">
                if s.phase() == SoloPhase::Drawing {
                    <button onclick={clear_cb}>{"Clear"}</button>
                    <button onclick={submit_cb} disabled={s.strokes().is_empty()}>{"Submit"}</button>
                }
                if s.phase() == SoloPhase::Resolved {
                    <button onclick={next_cb}>{"Next"}</button>
                }
            </div>
            if s.last_result() == Some(true) {
                <p style="margin:0; color:#7ee787;">{"Correct!"}</p>
            }
            if let Some(feedback) = s.feedback() {
                { feedback_view(feedback) }
            }
        </div>
    }
}

fn feedback_view(feedback: &Feedback) -> Html {
    let confusions = if feedback.mistaken_for.is_empty() {
        "Not quite.".to_string()
    } else {
        format!("That looked like: {}", feedback.mistaken_for.join(", "))
    };
    let strokes = feedback
        .incorrect_strokes
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    html! {
        <div style="border:1px solid #f85149; border-radius:8px; padding:8px 12px;">
            <p style="margin:4px 0;">{ confusions }</p>
            if !strokes.is_empty() {
                <p style="margin:4px 0;">{ format!("Check strokes: {strokes}") }</p>
            }
            if let Some(url) = &feedback.animation_url {
                <img src={url.clone()} alt="stroke order" style="width:160px;" />
            }
        </div>
    }
}
