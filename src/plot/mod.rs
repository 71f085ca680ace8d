//! Turning placed-block records into the grid the viewer shows.
//!
//! A plot is a fixed floor platform with the user's factory composited onto
//! it. The floor is built once; the factory grid is rebuilt from the entry
//! list on every edit, filtered to the selected slice.

mod slice;

pub use slice::{Axis, SliceFilter};

use crate::catalog::BlockCatalog;
use crate::compositor::{compose, GridLayer};
use crate::config::{FloorPalette, PlotConfig};
use crate::error::Result;
use crate::grid::{GridSize, VoxelGrid};
use crate::input::PlacedBlockEntry;
use crate::BlockState;
use serde::{Deserialize, Serialize};

/// Which of floor and factory is composited last, and so wins where they
/// overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerOrder {
    /// Factory first, floor over it: layer 0 of the factory is ground.
    ///
    /// Default, and the reverse of the classic floor-then-machines paint
    /// order ([`LayerOrder::FloorBelowFactory`]). With the factory drawn
    /// last its air cells would blank out the floor under its footprint.
    #[default]
    FactoryBelowFloor,
    /// Floor first, factory over it, air cells included. The classic
    /// paint order; opt in through `layer_order` in the plot config.
    FloorBelowFactory,
}

/// The floor is drawn when the toggle is on, and always when the factory
/// has nothing to show.
pub fn floor_visible(show_ground: bool, factory: &VoxelGrid) -> bool {
    show_ground || factory.is_empty()
}

/// Element-wise maximum of two extents.
pub fn combined_size(a: GridSize, b: GridSize) -> GridSize {
    (a.0.max(b.0), a.1.max(b.1), a.2.max(b.2))
}

/// Builds the square floor platform. Cells are typed by their distance from
/// the nearest edge: 0 is `edge`, 1 is `border`, anything deeper `interior`.
pub fn build_floor(size: GridSize, palette: &FloorPalette) -> Result<VoxelGrid> {
    let edge: BlockState = palette.edge.parse()?;
    let border: BlockState = palette.border.parse()?;
    let interior: BlockState = palette.interior.parse()?;

    let mut floor = VoxelGrid::new(size);
    let (sx, sy, sz) = floor.size();
    for y in 0..sy {
        for z in 0..sz {
            for x in 0..sx {
                let ring = x.min(z).min(sx - 1 - x).min(sz - 1 - z);
                let block = match ring {
                    0 => &edge,
                    1 => &border,
                    _ => &interior,
                };
                floor.set((x, y, z), block)?;
            }
        }
    }
    Ok(floor)
}

pub struct PlotBuilder {
    floor: VoxelGrid,
    factory_size: GridSize,
    layer_order: LayerOrder,
}

impl PlotBuilder {
    pub fn new(config: &PlotConfig) -> Result<Self> {
        Ok(Self {
            floor: build_floor(config.floor_size, &config.floor)?,
            factory_size: config.factory_size,
            layer_order: config.layer_order,
        })
    }

    pub fn floor(&self) -> &VoxelGrid {
        &self.floor
    }

    pub fn factory_size(&self) -> GridSize {
        self.factory_size
    }

    pub fn plot_size(&self) -> GridSize {
        combined_size(self.floor.size(), self.factory_size)
    }

    pub fn layer_order(&self) -> LayerOrder {
        self.layer_order
    }

    /// Places every entry the filter lets through. Unknown ids and entries
    /// outside the factory abort the build.
    pub fn build_factory(
        &self,
        catalog: &BlockCatalog,
        entries: &[PlacedBlockEntry],
        filter: &SliceFilter,
    ) -> Result<VoxelGrid> {
        let mut factory = VoxelGrid::new(self.factory_size);
        for entry in entries.iter().filter(|e| filter.includes(e)) {
            let block = catalog.resolve(&entry.id, entry.direction)?;
            factory.set(entry.position(), block)?;
        }
        Ok(factory)
    }

    pub fn build(
        &self,
        catalog: &BlockCatalog,
        entries: &[PlacedBlockEntry],
        filter: &SliceFilter,
        show_ground: bool,
    ) -> Result<VoxelGrid> {
        let factory = self.build_factory(catalog, entries, filter)?;
        let floor = GridLayer::at_origin(&self.floor);
        let factory_layer = GridLayer::at_origin(&factory);

        let layers: Vec<GridLayer<'_>> = if !floor_visible(show_ground, &factory) {
            vec![factory_layer]
        } else {
            match self.layer_order {
                LayerOrder::FactoryBelowFloor => vec![factory_layer, floor],
                LayerOrder::FloorBelowFactory => vec![floor, factory_layer],
            }
        };

        let plot = compose(self.plot_size(), &layers)?;
        log::debug!(
            "built plot {:?} from {} entries ({} in slice {:?}={:?}), {} layer(s)",
            plot.size(),
            entries.len(),
            factory.count_non_air(),
            filter.axis,
            filter.index,
            layers.len()
        );
        Ok(plot)
    }
}
