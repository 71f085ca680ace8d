//! Compositing and camera core for a browser voxel plot viewer.
//!
//! A plot is a fixed floor platform plus the machine blocks a user placed
//! on it. The crate turns a pasted block-entry list into one [`VoxelGrid`]
//! (optionally one slice of it) and turns pointer input into a view matrix
//! for whatever renderer draws that grid.

pub mod block_state;
pub mod camera;
pub mod catalog;
pub mod compositor;
pub mod config;
pub mod error;
pub mod grid;
pub mod input;
pub mod plot;
pub mod session;
pub mod viewport;

#[cfg(feature = "wasm")]
mod wasm;

pub use block_state::BlockState;
pub use camera::{CameraConfig, CameraInput, CameraMode, OrbitCamera, ViewMatrix};
pub use catalog::{BlockCatalog, BlockDefinition, ResourceProvider, StaticResources};
pub use compositor::{compose, GridLayer};
pub use config::PlotConfig;
pub use error::{PlotError, Result};
pub use grid::{GridError, VoxelGrid};
pub use input::{parse_plot_data, PlacedBlockEntry};
pub use plot::{Axis, LayerOrder, PlotBuilder, SliceFilter};
pub use session::PlotSession;
pub use viewport::{FrameScheduler, PointerButton, Renderer, ViewportController, ViewportEvent};

#[cfg(feature = "wasm")]
pub use wasm::*;
