use std::f32::consts::{FRAC_PI_2, TAU};

use plotview::camera::math::transform_point;
use plotview::{
    CameraConfig, CameraMode, FrameScheduler, OrbitCamera, PlotConfig, PlotSession, PointerButton,
    Renderer, ViewMatrix, ViewportController, ViewportEvent, VoxelGrid,
};

#[derive(Default)]
struct FrameQueue {
    requested: usize,
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) {
        self.requested += 1;
    }
}

#[derive(Default)]
struct RecordingRenderer {
    views: Vec<ViewMatrix>,
    grid_sizes: Vec<(i32, i32, i32)>,
    surface: (u32, u32),
}

impl Renderer for RecordingRenderer {
    fn resize(&mut self, width: u32, height: u32) {
        self.surface = (width, height);
    }

    fn set_grid(&mut self, grid: &VoxelGrid) {
        self.grid_sizes.push(grid.size());
    }

    fn draw(&mut self, view: &ViewMatrix) {
        self.views.push(*view);
    }
}

fn controller(mode: CameraMode) -> ViewportController<RecordingRenderer> {
    let camera = OrbitCamera::new(
        CameraConfig {
            mode,
            ..CameraConfig::default()
        },
        [8.0, 3.0, 8.0],
    );
    ViewportController::new(camera, RecordingRenderer::default())
}

fn drag(
    ctrl: &mut ViewportController<RecordingRenderer>,
    frames: &mut FrameQueue,
    button: PointerButton,
    moves: &[(f32, f32)],
) {
    ctrl.handle_event(ViewportEvent::PointerDown { button, x: 0.0, y: 0.0 }, frames);
    for &(x, y) in moves {
        ctrl.handle_event(ViewportEvent::PointerMove { x, y }, frames);
    }
    ctrl.handle_event(ViewportEvent::PointerUp { button }, frames);
}

#[test]
fn test_many_events_coalesce_into_one_frame() {
    let mut ctrl = controller(CameraMode::Orbit);
    let mut frames = FrameQueue::default();

    drag(&mut ctrl, &mut frames, PointerButton::Primary, &[(5.0, 0.0), (10.0, 3.0), (20.0, 8.0)]);
    ctrl.handle_event(ViewportEvent::Wheel { delta_y: 120.0 }, &mut frames);
    assert_eq!(frames.requested, 1);
    assert!(ctrl.renderer().views.is_empty());

    ctrl.on_frame();
    assert_eq!(ctrl.renderer().views.len(), 1);
    assert_eq!(ctrl.frames_drawn(), 1);
    assert!(!ctrl.frame_pending());

    ctrl.handle_event(ViewportEvent::Wheel { delta_y: 120.0 }, &mut frames);
    assert_eq!(frames.requested, 2);
}

#[test]
fn test_drawn_view_matches_camera() {
    let mut ctrl = controller(CameraMode::Orbit);
    let mut frames = FrameQueue::default();
    drag(&mut ctrl, &mut frames, PointerButton::Primary, &[(30.0, -10.0)]);
    ctrl.on_frame();

    let drawn = ctrl.renderer().views[0];
    assert_eq!(drawn, ctrl.camera().current_view_matrix());
    assert!((ctrl.camera().yaw() - 0.8).abs() < 1e-5);
    assert!((ctrl.camera().pitch() - 0.7).abs() < 1e-5);
}

#[test]
fn test_orbit_target_stays_on_view_axis() {
    let mut ctrl = controller(CameraMode::Orbit);
    let mut frames = FrameQueue::default();
    drag(&mut ctrl, &mut frames, PointerButton::Primary, &[(-340.0, 95.0), (120.0, -400.0)]);
    ctrl.handle_event(ViewportEvent::Wheel { delta_y: 300.0 }, &mut frames);

    let p = transform_point(&ctrl.camera().current_view_matrix(), [8.0, 3.0, 8.0]);
    assert!(p[0].abs() < 1e-4 && p[1].abs() < 1e-4);
    assert!((p[2] + ctrl.camera().distance()).abs() < 1e-4);
    assert!((ctrl.camera().distance() - 7.0).abs() < 1e-5);
}

#[test]
fn test_pitch_and_yaw_bounds_under_long_drags() {
    let mut ctrl = controller(CameraMode::Orbit);
    let mut frames = FrameQueue::default();
    let moves: Vec<(f32, f32)> = (1..200)
        .map(|i| {
            let i = i as f32;
            ((i * 37.0) % 900.0 - 450.0, (i * 53.0) % 700.0 - 350.0)
        })
        .collect();
    for &(x, y) in &moves {
        drag(&mut ctrl, &mut frames, PointerButton::Primary, &[(x, y), (-y, x)]);
        let pitch = ctrl.camera().pitch();
        let yaw = ctrl.camera().yaw();
        assert!((-FRAC_PI_2..=FRAC_PI_2).contains(&pitch), "pitch {}", pitch);
        assert!((0.0..TAU).contains(&yaw), "yaw {}", yaw);
    }
}

#[test]
fn test_pan_mode_buttons() {
    let mut ctrl = controller(CameraMode::Pan);
    let mut frames = FrameQueue::default();
    let start = ctrl.camera().focus_offset();

    drag(&mut ctrl, &mut frames, PointerButton::Primary, &[(100.0, 100.0)]);
    assert_eq!(frames.requested, 0);

    drag(&mut ctrl, &mut frames, PointerButton::Middle, &[(100.0, 100.0)]);
    let moved = ctrl.camera().focus_offset();
    assert_eq!(moved, [start[0] + 1.0, start[1] - 1.0, start[2]]);

    let yaw = ctrl.camera().yaw();
    drag(&mut ctrl, &mut frames, PointerButton::Secondary, &[(50.0, 0.0)]);
    assert!((ctrl.camera().yaw() - (yaw + 0.5)).abs() < 1e-5);
    assert_eq!(frames.requested, 1);
}

#[test]
fn test_release_of_other_button_keeps_drag() {
    let mut ctrl = controller(CameraMode::Orbit);
    let mut frames = FrameQueue::default();
    ctrl.handle_event(
        ViewportEvent::PointerDown { button: PointerButton::Primary, x: 0.0, y: 0.0 },
        &mut frames,
    );
    ctrl.handle_event(ViewportEvent::PointerUp { button: PointerButton::Secondary }, &mut frames);
    let yaw = ctrl.camera().yaw();
    ctrl.handle_event(ViewportEvent::PointerMove { x: 10.0, y: 0.0 }, &mut frames);
    assert!((ctrl.camera().yaw() - (yaw + 0.1)).abs() < 1e-5);
}

#[test]
fn test_session_grid_reaches_renderer() {
    let session = PlotSession::new(&PlotConfig::default(), Default::default()).unwrap();
    let mut ctrl = controller(CameraMode::Orbit);
    let mut frames = FrameQueue::default();

    ctrl.handle_event(ViewportEvent::Resize { width: 1280, height: 720 }, &mut frames);
    ctrl.set_grid(session.grid(), &mut frames);
    assert_eq!(frames.requested, 1);
    assert_eq!(ctrl.renderer().surface, (1280, 720));
    assert_eq!(ctrl.renderer().grid_sizes, vec![(16, 6, 16)]);
    assert_eq!(session.grid().center(), [8.0, 3.0, 8.0]);
}

#[test]
fn test_new_grid_recenters_orbit() {
    let mut ctrl = controller(CameraMode::Orbit);
    let mut frames = FrameQueue::default();
    let grid = VoxelGrid::new((4, 2, 10));

    ctrl.set_grid(&grid, &mut frames);
    assert_eq!(ctrl.camera().center(), [2.0, 1.0, 5.0]);

    let p = transform_point(&ctrl.camera().current_view_matrix(), [2.0, 1.0, 5.0]);
    assert!(p[0].abs() < 1e-4 && p[1].abs() < 1e-4);
}
