//! Viewer configuration.
//!
//! Defaults reproduce the stock plot viewer: a 16x1x16 floor under a
//! 14x6x14 factory, viewed with an orbit camera.

use crate::camera::CameraConfig;
use crate::grid::GridSize;
use crate::plot::{Axis, LayerOrder};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
#[error("invalid viewer config: {0}")]
pub struct ConfigError(#[from] serde_json::Error);

/// Block syntax for the three floor rings, outermost first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorPalette {
    pub edge: String,
    pub border: String,
    pub interior: String,
}

impl Default for FloorPalette {
    fn default() -> Self {
        Self {
            edge: "minecraft:grass_block[snowy=false]".to_string(),
            border: "minecraft:polished_andesite".to_string(),
            interior: "minecraft:stone".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub floor_size: GridSize,
    pub factory_size: GridSize,
    pub floor: FloorPalette,
    pub layer_order: LayerOrder,
    /// Initial state of the "show ground" toggle.
    pub show_ground: bool,
    pub slice_axis: Axis,
    /// Slice selected when stepping down from "all layers".
    pub layer_down_reset: i32,
    pub camera: CameraConfig,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            floor_size: (16, 1, 16),
            factory_size: (14, 6, 14),
            floor: FloorPalette::default(),
            layer_order: LayerOrder::default(),
            show_ground: true,
            slice_axis: Axis::Y,
            layer_down_reset: 5,
            camera: CameraConfig::default(),
        }
    }
}

impl PlotConfig {
    /// Reads a config; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraMode;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = PlotConfig::from_json(r#"{"show_ground": false, "camera": {"mode": "pan"}}"#).unwrap();
        assert!(!config.show_ground);
        assert_eq!(config.camera.mode, CameraMode::Pan);
        assert_eq!(config.camera.rotate_sensitivity, 100.0);
        assert_eq!(config.floor_size, (16, 1, 16));
        assert_eq!(config.layer_down_reset, 5);
    }

    #[test]
    fn test_json_round_trip() {
        let config = PlotConfig::default();
        let back = PlotConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_bad_json_is_config_error() {
        assert!(PlotConfig::from_json(r#"{"floor_size": "big"}"#).is_err());
    }
}
