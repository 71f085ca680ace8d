//! Browser-facing plot viewer.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use js_sys::Object;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Event, EventTarget, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::renderer::JsRenderer;
use super::to_js_error;
use crate::camera::OrbitCamera;
use crate::catalog::{BlockDefinition, StaticResources};
use crate::config::PlotConfig;
use crate::grid::VoxelGrid;
use crate::session::PlotSession;
use crate::viewport::{FrameScheduler, ViewportController, ViewportEvent};

struct ViewerState {
    session: PlotSession,
    controller: ViewportController<JsRenderer>,
}

type SharedState = Rc<RefCell<ViewerState>>;

/// Schedules `on_frame` through `requestAnimationFrame`.
struct RafScheduler {
    state: Weak<RefCell<ViewerState>>,
}

impl RafScheduler {
    fn new(state: &SharedState) -> Self {
        Self {
            state: Rc::downgrade(state),
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) {
        let state = self.state.clone();
        let callback = Closure::once_into_js(move || {
            if let Some(state) = state.upgrade() {
                state.borrow_mut().controller.on_frame();
            }
        });
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.request_animation_frame(callback.unchecked_ref()) {
            console::error_1(&e);
        }
    }
}

fn window_size() -> Option<(u32, u32)> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width as u32, height as u32))
}

fn add_listener<E, F>(
    target: &EventTarget,
    kind: &str,
    state: &SharedState,
    decode: F,
) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
    F: Fn(&E) -> Option<ViewportEvent> + 'static,
{
    let weak = Rc::downgrade(state);
    let closure = Closure::<dyn FnMut(E)>::new(move |event: E| {
        let Some(event) = decode(&event) else {
            return;
        };
        let Some(state) = weak.upgrade() else {
            return;
        };
        let mut scheduler = RafScheduler::new(&state);
        state
            .borrow_mut()
            .controller
            .handle_event(event, &mut scheduler);
    });
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn bind_events(canvas: &HtmlCanvasElement, state: &SharedState) -> Result<(), JsValue> {
    let target: &EventTarget = canvas.as_ref();

    add_listener(target, "mousedown", state, |e: &MouseEvent| {
        Some(ViewportEvent::PointerDown {
            button: e.button().into(),
            x: e.client_x() as f32,
            y: e.client_y() as f32,
        })
    })?;
    add_listener(target, "mousemove", state, |e: &MouseEvent| {
        Some(ViewportEvent::PointerMove {
            x: e.client_x() as f32,
            y: e.client_y() as f32,
        })
    })?;
    add_listener(target, "mouseup", state, |e: &MouseEvent| {
        Some(ViewportEvent::PointerUp {
            button: e.button().into(),
        })
    })?;
    add_listener(target, "wheel", state, |e: &WheelEvent| {
        e.prevent_default();
        Some(ViewportEvent::Wheel {
            delta_y: e.delta_y() as f32,
        })
    })?;
    add_listener(target, "contextmenu", state, |e: &MouseEvent| {
        e.prevent_default();
        None
    })?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    add_listener(window.as_ref(), "resize", state, |_: &Event| {
        window_size().map(|(width, height)| ViewportEvent::Resize { width, height })
    })?;
    Ok(())
}

#[wasm_bindgen]
pub struct PlotViewer {
    state: SharedState,
}

impl PlotViewer {
    fn apply<F>(&self, command: F) -> bool
    where
        F: FnOnce(&mut PlotSession) -> crate::Result<&VoxelGrid>,
    {
        let mut scheduler = RafScheduler::new(&self.state);
        let mut guard = self.state.borrow_mut();
        let ViewerState {
            session,
            controller,
        } = &mut *guard;
        match command(session) {
            Ok(grid) => {
                controller.set_grid(grid, &mut scheduler);
                true
            }
            Err(e) => {
                console::warn_1(&format!("plot update rejected: {}", e).into());
                false
            }
        }
    }
}

#[wasm_bindgen]
impl PlotViewer {
    /// `blockDefinitions` is an mcmeta block-definition summary, `blockMap`
    /// maps catalog ids to block syntax lists, `renderer` provides
    /// `setGrid`, `draw` and optionally `resize`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        block_definitions: JsValue,
        block_map: JsValue,
        renderer: Object,
        config: JsValue,
    ) -> Result<PlotViewer, JsValue> {
        let config: PlotConfig = if config.is_undefined() || config.is_null() {
            PlotConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let definitions: HashMap<String, BlockDefinition> =
            serde_wasm_bindgen::from_value(block_definitions)?;
        let table: HashMap<String, Vec<String>> = serde_wasm_bindgen::from_value(block_map)?;

        let resources = StaticResources::from_definitions(definitions);
        let session = PlotSession::from_table(&config, &table, &resources).map_err(to_js_error)?;
        let camera = OrbitCamera::new(config.camera.clone(), session.grid().center());
        let controller = ViewportController::new(camera, JsRenderer::new(canvas.clone(), renderer)?);

        let state = Rc::new(RefCell::new(ViewerState {
            session,
            controller,
        }));
        bind_events(&canvas, &state)?;

        {
            let mut scheduler = RafScheduler::new(&state);
            let mut guard = state.borrow_mut();
            let ViewerState {
                session,
                controller,
            } = &mut *guard;
            if let Some((width, height)) = window_size() {
                controller.handle_event(ViewportEvent::Resize { width, height }, &mut scheduler);
            }
            controller.set_grid(session.grid(), &mut scheduler);
        }

        Ok(PlotViewer { state })
    }

    /// Replaces the plot with pasted data. Returns false and keeps the
    /// current plot when the text is rejected.
    #[wasm_bindgen(js_name = setPlotData)]
    pub fn set_plot_data(&self, text: &str) -> bool {
        self.apply(|session| session.apply_plot_data(text))
    }

    #[wasm_bindgen(js_name = layerUp)]
    pub fn layer_up(&self) -> bool {
        self.apply(PlotSession::layer_up)
    }

    #[wasm_bindgen(js_name = layerDown)]
    pub fn layer_down(&self) -> bool {
        self.apply(PlotSession::layer_down)
    }

    /// Moves to the next slice axis and returns its label, e.g. `"Z"`.
    #[wasm_bindgen(js_name = changeAxis)]
    pub fn change_axis(&self) -> String {
        self.apply(PlotSession::cycle_axis);
        self.axis().to_uppercase()
    }

    #[wasm_bindgen(js_name = setShowGround)]
    pub fn set_show_ground(&self, show: bool) -> bool {
        self.apply(|session| session.set_show_ground(show))
    }

    pub fn axis(&self) -> String {
        self.state.borrow().session.axis().to_string()
    }

    /// The selected layer, or undefined when every layer is shown.
    pub fn slice(&self) -> Option<i32> {
        self.state.borrow().session.filter().index
    }
}
