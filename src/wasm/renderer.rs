//! Renderer backed by JavaScript callbacks.

use js_sys::{Float32Array, Function, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, HtmlCanvasElement};

use crate::camera::ViewMatrix;
use crate::grid::{PlacedBlock, VoxelGrid};
use crate::viewport::Renderer;

/// What `setGrid` receives: the extent plus every written cell.
#[derive(Serialize)]
struct GridPayload<'a> {
    size: (i32, i32, i32),
    blocks: Vec<PlacedBlock<'a>>,
}

/// Drives a JS object exposing `setGrid(grid)`, `draw(matrix)` and
/// optionally `resize(width, height)`.
pub struct JsRenderer {
    canvas: HtmlCanvasElement,
    target: Object,
    set_grid: Function,
    draw: Function,
    resize: Option<Function>,
}

fn method(target: &Object, name: &str) -> Result<Option<Function>, JsValue> {
    let value = Reflect::get(target, &JsValue::from_str(name))?;
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    value
        .dyn_into::<Function>()
        .map(Some)
        .map_err(|_| JsValue::from_str(&format!("renderer.{} is not a function", name)))
}

fn report(result: Result<JsValue, JsValue>) {
    if let Err(e) = result {
        console::error_1(&e);
    }
}

impl JsRenderer {
    pub fn new(canvas: HtmlCanvasElement, target: Object) -> Result<Self, JsValue> {
        let required = |name: &str| -> Result<Function, JsValue> {
            method(&target, name)?
                .ok_or_else(|| JsValue::from_str(&format!("renderer.{} is required", name)))
        };
        let set_grid = required("setGrid")?;
        let draw = required("draw")?;
        let resize = method(&target, "resize")?;
        Ok(Self {
            canvas,
            target,
            set_grid,
            draw,
            resize,
        })
    }
}

impl Renderer for JsRenderer {
    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        if let Some(resize) = &self.resize {
            report(resize.call2(&self.target, &width.into(), &height.into()));
        }
    }

    fn set_grid(&mut self, grid: &VoxelGrid) {
        let payload = GridPayload {
            size: grid.size(),
            blocks: grid.iter_blocks().collect(),
        };
        match serde_wasm_bindgen::to_value(&payload) {
            Ok(value) => report(self.set_grid.call1(&self.target, &value)),
            Err(e) => console::error_1(&e.to_string().into()),
        }
    }

    fn draw(&mut self, view: &ViewMatrix) {
        let flat: Vec<f32> = view.iter().flatten().copied().collect();
        let matrix = Float32Array::from(flat.as_slice());
        report(self.draw.call1(&self.target, &matrix));
    }
}
