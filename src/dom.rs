use crate::constants::{CANVAS_ID, CANVAS_STYLE};
use crate::viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Current `innerWidth` x `innerHeight`, clamped to `max_dim`.
pub fn window_inner_size(max_dim: u32) -> (u32, u32) {
    let Some(w) = web::window() else {
        return viewport::surface_size(0.0, 0.0, max_dim);
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    viewport::surface_size(width, height, max_dim)
}

pub fn set_canvas_size(canvas: &web::HtmlCanvasElement, (width, height): (u32, u32)) {
    canvas.set_width(width);
    canvas.set_height(height);
}

/// Append a window-sized canvas to the page body.
pub fn create_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    canvas.set_id(CANVAS_ID);
    _ = canvas.set_attribute("style", CANVAS_STYLE);
    set_canvas_size(&canvas, window_inner_size(u32::MAX));

    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("document has no body"))?;
    body.append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("append canvas: {:?}", e))?;
    Ok(canvas)
}
