//! Pointer, wheel and resize handling for the plot canvas.
//!
//! The controller never draws from inside an input handler. Input mutates
//! the camera and asks the [`FrameScheduler`] for a frame; further requests
//! are dropped until [`ViewportController::on_frame`] runs, so any number of
//! events between two frames costs one draw.

use crate::camera::{CameraInput, CameraMode, OrbitCamera, ViewMatrix};
use crate::grid::VoxelGrid;

/// Mouse buttons as numbered by DOM `MouseEvent.button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
    Other(i16),
}

impl From<i16> for PointerButton {
    fn from(button: i16) -> Self {
        match button {
            0 => PointerButton::Primary,
            1 => PointerButton::Middle,
            2 => PointerButton::Secondary,
            other => PointerButton::Other(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    PointerDown { button: PointerButton, x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp { button: PointerButton },
    Wheel { delta_y: f32 },
    Resize { width: u32, height: u32 },
}

/// Drawing backend. The viewer only ever hands it grids and view matrices.
pub trait Renderer {
    /// Resizes the drawing surface's backing store.
    fn resize(&mut self, width: u32, height: u32);
    fn set_grid(&mut self, grid: &VoxelGrid);
    fn draw(&mut self, view: &ViewMatrix);
}

/// Display-synchronised frame callback, e.g. `requestAnimationFrame`.
pub trait FrameScheduler {
    /// Arranges for [`ViewportController::on_frame`] to run on the next frame.
    fn request_frame(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragKind {
    Rotate,
    Pan,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    kind: DragKind,
    button: PointerButton,
    last: (f32, f32),
}

pub struct ViewportController<R: Renderer> {
    camera: OrbitCamera,
    renderer: R,
    drag: Option<Drag>,
    frame_pending: bool,
    frames_drawn: u64,
}

impl<R: Renderer> ViewportController<R> {
    pub fn new(camera: OrbitCamera, renderer: R) -> Self {
        Self {
            camera,
            renderer,
            drag: None,
            frame_pending: false,
            frames_drawn: 0,
        }
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    fn drag_kind_for(&self, button: PointerButton) -> Option<DragKind> {
        match (self.camera.mode(), button) {
            (CameraMode::Orbit, PointerButton::Primary) => Some(DragKind::Rotate),
            (CameraMode::Pan, PointerButton::Secondary) => Some(DragKind::Rotate),
            (CameraMode::Pan, PointerButton::Middle) => Some(DragKind::Pan),
            _ => None,
        }
    }

    pub fn handle_event(&mut self, event: ViewportEvent, scheduler: &mut impl FrameScheduler) {
        match event {
            ViewportEvent::PointerDown { button, x, y } => {
                if let Some(kind) = self.drag_kind_for(button) {
                    self.drag = Some(Drag {
                        kind,
                        button,
                        last: (x, y),
                    });
                }
            }
            ViewportEvent::PointerMove { x, y } => {
                let Some(drag) = self.drag.as_mut() else {
                    return;
                };
                let (dx, dy) = (x - drag.last.0, y - drag.last.1);
                drag.last = (x, y);
                let input = match drag.kind {
                    DragKind::Rotate => CameraInput::Rotate { dx, dy },
                    DragKind::Pan => CameraInput::Pan { dx, dy },
                };
                if self.camera.update(input) {
                    self.request_redraw(scheduler);
                }
            }
            ViewportEvent::PointerUp { button } => {
                if self.drag.is_some_and(|d| d.button == button) {
                    self.drag = None;
                }
            }
            ViewportEvent::Wheel { delta_y } => {
                if self.camera.update(CameraInput::Zoom { delta: delta_y }) {
                    self.request_redraw(scheduler);
                }
            }
            ViewportEvent::Resize { width, height } => {
                self.renderer.resize(width, height);
                self.request_redraw(scheduler);
            }
        }
    }

    /// Swaps in a freshly built plot and orbits around its center.
    pub fn set_grid(&mut self, grid: &VoxelGrid, scheduler: &mut impl FrameScheduler) {
        self.camera.set_center(grid.center());
        self.renderer.set_grid(grid);
        self.request_redraw(scheduler);
    }

    pub fn request_redraw(&mut self, scheduler: &mut impl FrameScheduler) {
        if !self.frame_pending {
            self.frame_pending = true;
            scheduler.request_frame();
        }
    }

    /// Frame callback: draws once with the camera's current view.
    pub fn on_frame(&mut self) {
        self.frame_pending = false;
        let view = self.camera.current_view_matrix();
        self.renderer.draw(&view);
        self.frames_drawn += 1;
    }
}
