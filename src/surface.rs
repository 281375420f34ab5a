//! Drawing capability used by the stroke recorder.
//!
//! Controllers only see [`DrawSurface`]; the browser canvas implementation lives here
//! so the recording logic can be exercised without a DOM.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};
use yew::NodeRef;

use crate::util::cwarn;

pub const CORRECT_COLOUR: &str = "#7ee787";
pub const INCORRECT_COLOUR: &str = "#f85149";
pub const CANVAS_COLOUR: &str = "#ffffff";
const INK_COLOUR: &str = "#0d1117";
const INK_WIDTH: f64 = 8.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub trait DrawSurface {
    fn line(&self, from: Point, to: Point);
    fn clear(&self);
    /// Rasterises the current contents as a data URL.
    fn snapshot(&self) -> Option<String>;
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("missing 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        ctx.set_line_width(INK_WIDTH);
        ctx.set_stroke_style_str(INK_COLOUR);
        Ok(Self { canvas, ctx })
    }

    /// Resolves a mounted canvas node; absent nodes are a silent no-op for callers.
    pub fn from_node(node: &NodeRef) -> Option<Self> {
        let canvas = node.cast::<HtmlCanvasElement>()?;
        match Self::new(canvas) {
            Ok(surface) => Some(surface),
            Err(err) => {
                cwarn(&format!("canvas unavailable: {err:?}"));
                None
            }
        }
    }

    /// Maps client coordinates into canvas pixels, accounting for CSS scaling.
    pub fn to_canvas_point(&self, client_x: f64, client_y: f64) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        let sx = if rect.width() > 0.0 { self.canvas.width() as f64 / rect.width() } else { 1.0 };
        let sy = if rect.height() > 0.0 { self.canvas.height() as f64 / rect.height() } else { 1.0 };
        Point::new((client_x - rect.left()) * sx, (client_y - rect.top()) * sy)
    }

    /// Draws an image from a URL once it has loaded. Loads are not sequenced:
    /// if two are in flight the later `onload` wins.
    pub fn draw_image_url(&self, url: &str) {
        let image = match HtmlImageElement::new() {
            Ok(image) => image,
            Err(err) => {
                cwarn(&format!("image element unavailable: {err:?}"));
                return;
            }
        };
        let ctx = self.ctx.clone();
        let width = self.canvas.width() as f64;
        let height = self.canvas.height() as f64;
        let loaded = image.clone();
        let onload = Closure::once_into_js(move || {
            if let Err(err) = ctx.draw_image_with_html_image_element_and_dw_and_dh(&loaded, 0.0, 0.0, width, height) {
                cwarn(&format!("failed to draw image: {err:?}"));
            }
        });
        image.set_onload(Some(onload.unchecked_ref()));
        image.set_src(url);
    }
}

impl DrawSurface for CanvasSurface {
    fn line(&self, from: Point, to: Point) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn clear(&self) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn snapshot(&self) -> Option<String> {
        self.canvas.to_data_url().ok()
    }
}
