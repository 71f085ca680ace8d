//! WASM bindings for the plot viewer
//!
//! - `renderer`: forwards grids and view matrices to a JavaScript renderer
//! - `viewer`: `PlotViewer`, binding canvas/window events and
//!   `requestAnimationFrame` to the viewport controller

mod renderer;
mod viewer;

pub use renderer::JsRenderer;
pub use viewer::PlotViewer;

use wasm_bindgen::prelude::*;
use web_sys::console;

/// Initialize WASM module with panic hook for better error messages
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    console::log_1(&"Initializing plot viewer".into());
}

pub(crate) fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
