use crate::surface::{CanvasSurface, DrawSurface, Point, CANVAS_COLOUR};
use yew::prelude::*;

pub const PAD_SIZE: u32 = 400;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PadInput {
    Down(Point),
    Move(Point),
    Up,
}

#[derive(Properties, PartialEq, Clone)]
pub struct DrawingPadProps {
    /// Shared with the page so it can build a surface for the controller.
    pub canvas: NodeRef,
    /// Any change wipes the canvas.
    pub epoch: u32,
    #[prop_or_default]
    pub background: Option<&'static str>,
    pub on_input: Callback<PadInput>,
}

#[function_component]
pub fn DrawingPad(props: &DrawingPadProps) -> Html {
    {
        let canvas = props.canvas.clone();
        use_effect_with(props.epoch, move |_| {
            if let Some(surface) = CanvasSurface::from_node(&canvas) {
                surface.clear();
            }
            || ()
        });
    }

    let to_point = {
        let canvas = props.canvas.clone();
        move |e: &PointerEvent| {
            CanvasSurface::from_node(&canvas)
                .map(|s| s.to_canvas_point(e.client_x() as f64, e.client_y() as f64))
        }
    };
    let on_down = {
        let cb = props.on_input.clone();
        let to_point = to_point.clone();
        Callback::from(move |e: PointerEvent| {
            e.prevent_default();
            if let Some(p) = to_point(&e) {
                cb.emit(PadInput::Down(p));
            }
        })
    };
    let on_move = {
        let cb = props.on_input.clone();
        Callback::from(move |e: PointerEvent| {
            if let Some(p) = to_point(&e) {
                cb.emit(PadInput::Move(p));
            }
        })
    };
    let on_up = {
        let cb = props.on_input.clone();
        Callback::from(move |_e: PointerEvent| cb.emit(PadInput::Up))
    };

    let bg = props.background.unwrap_or(CANVAS_COLOUR);
    html! {
        <canvas
            ref={props.canvas.clone()}
            width={PAD_SIZE.to_string()}
            height={PAD_SIZE.to_string()}
            style={format!("background:{bg}; border:1px solid #30363d; border-radius:8px; touch-action:none; width:100%; max-width:{PAD_SIZE}px;")}
            onpointerdown={on_down}
            onpointermove={on_move}
            onpointerup={on_up.clone()}
            onpointerleave={on_up}
        />
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct PeerCanvasProps {
    pub image: Option<String>,
    pub visible: bool,
    pub epoch: u32,
    #[prop_or_default]
    pub background: Option<&'static str>,
}

/// Read-only canvas showing the other player's drawing.
#[function_component]
pub fn PeerCanvas(props: &PeerCanvasProps) -> Html {
    let canvas = use_node_ref();
    {
        let canvas = canvas.clone();
        let deps = (props.image.clone(), props.visible, props.epoch);
        use_effect_with(deps, move |(image, visible, _)| {
            if let Some(surface) = CanvasSurface::from_node(&canvas) {
                surface.clear();
                if let (true, Some(url)) = (*visible, image) {
                    surface.draw_image_url(url);
                }
            }
            || ()
        });
    }
    let bg = props.background.unwrap_or(CANVAS_COLOUR);
    html! {
        <canvas
            ref={canvas}
            width={PAD_SIZE.to_string()}
            height={PAD_SIZE.to_string()}
            style={format!("background:{bg}; border:1px solid #30363d; border-radius:8px; width:100%; max-width:{PAD_SIZE}px;")}
        />
    }
}
