#![cfg(target_arch = "wasm32")]

use crate::create_app;
use eframe::WebRunner;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

/// Launch the egui app inside the canvas referenced by `index.html`.
#[wasm_bindgen]
pub async fn start() -> Result<(), JsValue> {
    use web_sys::HtmlCanvasElement;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let document = web_sys::window()
        .ok_or("No window")?
        .document()
        .ok_or("No document")?;

    let canvas = document
        .get_element_by_id("the_canvas_id")
        .ok_or("Canvas not found")?
        .dyn_into::<HtmlCanvasElement>()?;

    let web_options = eframe::WebOptions::default();

    WebRunner::new()
        .start(
            canvas,
            web_options,
            Box::new(|cc| Ok(Box::new(create_app(cc)))),
        )
        .await
}
