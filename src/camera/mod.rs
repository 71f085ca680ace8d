//! Input-driven camera producing the plot's view matrix.
//!
//! The view is built as
//! `T(view offset) * Rx(pitch) * Ry(yaw) * T(-center)`. In orbit mode the
//! view offset is `(0, 0, -distance)` and the camera always looks at the
//! plot's center; in pan mode it is a free focus offset the user drags
//! around.

pub mod math;

use math::{mat4_mul, rigid_inverse, rotation_x, rotation_y, transform_point, translation, Mat4};
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, TAU};

pub type ViewMatrix = Mat4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraMode {
    /// Primary drag rotates, wheel zooms a clamped orbit distance.
    #[default]
    Orbit,
    /// Secondary drag rotates, middle drag pans, wheel dollies unclamped.
    Pan,
}

/// Camera configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub mode: CameraMode,
    /// Initial rotation about the x axis, radians.
    pub pitch: f32,
    /// Initial rotation about the y axis, radians.
    pub yaw: f32,
    pub distance: f32,
    pub min_distance: f32,
    /// Pixels of drag per radian.
    pub rotate_sensitivity: f32,
    /// Pixels of drag per unit of pan.
    pub pan_sensitivity: f32,
    /// Wheel delta per unit of zoom.
    pub zoom_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            mode: CameraMode::Orbit,
            pitch: 0.8,
            yaw: 0.5,
            distance: 4.0,
            min_distance: 1.0,
            rotate_sensitivity: 100.0,
            pan_sensitivity: 100.0,
            zoom_sensitivity: 100.0,
        }
    }
}

/// One already-decoded camera gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraInput {
    Rotate { dx: f32, dy: f32 },
    Pan { dx: f32, dy: f32 },
    Zoom { delta: f32 },
}

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    config: CameraConfig,
    pitch: f32,
    yaw: f32,
    distance: f32,
    focus_offset: [f32; 3],
    center: [f32; 3],
}

impl OrbitCamera {
    pub fn new(config: CameraConfig, center: [f32; 3]) -> Self {
        let mut camera = Self {
            pitch: config.pitch,
            yaw: config.yaw,
            distance: config.distance,
            focus_offset: [0.0, 0.0, -config.distance],
            center,
            config,
        };
        camera.normalize();
        camera
    }

    pub fn mode(&self) -> CameraMode {
        self.config.mode
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Always in `[0, 2π)`.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn focus_offset(&self) -> [f32; 3] {
        self.focus_offset
    }

    pub fn center(&self) -> [f32; 3] {
        self.center
    }

    pub fn set_center(&mut self, center: [f32; 3]) {
        self.center = center;
    }

    /// Applies a gesture. Returns whether the view changed.
    pub fn update(&mut self, input: CameraInput) -> bool {
        let before = (self.pitch, self.yaw, self.distance, self.focus_offset);
        match (input, self.config.mode) {
            (CameraInput::Rotate { dx, dy }, _) => {
                self.yaw += dx / self.config.rotate_sensitivity;
                self.pitch += dy / self.config.rotate_sensitivity;
            }
            (CameraInput::Zoom { delta }, CameraMode::Orbit) => {
                self.distance += delta / self.config.zoom_sensitivity;
            }
            (CameraInput::Zoom { delta }, CameraMode::Pan) => {
                self.focus_offset[2] -= delta / self.config.zoom_sensitivity;
            }
            (CameraInput::Pan { dx, dy }, CameraMode::Pan) => {
                self.focus_offset[0] += dx / self.config.pan_sensitivity;
                self.focus_offset[1] -= dy / self.config.pan_sensitivity;
            }
            (CameraInput::Pan { .. }, CameraMode::Orbit) => {}
        }
        self.normalize();
        before != (self.pitch, self.yaw, self.distance, self.focus_offset)
    }

    fn normalize(&mut self) {
        self.pitch = self.pitch.clamp(-FRAC_PI_2, FRAC_PI_2);
        self.yaw = self.yaw.rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        if self.yaw >= TAU {
            self.yaw = 0.0;
        }
        self.distance = self.distance.max(self.config.min_distance);
    }

    fn view_offset(&self) -> [f32; 3] {
        match self.config.mode {
            CameraMode::Orbit => [0.0, 0.0, -self.distance],
            CameraMode::Pan => self.focus_offset,
        }
    }

    pub fn current_view_matrix(&self) -> ViewMatrix {
        let c = self.center;
        let view = translation(self.view_offset());
        let view = mat4_mul(view, rotation_x(self.pitch));
        let view = mat4_mul(view, rotation_y(self.yaw));
        mat4_mul(view, translation([-c[0], -c[1], -c[2]]))
    }

    /// Camera position in plot coordinates.
    pub fn eye_position(&self) -> [f32; 3] {
        transform_point(&rigid_inverse(&self.current_view_matrix()), [0.0, 0.0, 0.0])
    }
}
