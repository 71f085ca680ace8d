//! The plot viewer's state, owned in one place.
//!
//! A session holds the catalog, the floor, the last accepted entry list, the
//! slice filter and the grid on screen. Every command builds a complete new
//! grid first and only then commits it together with the state that
//! produced it; a failed command leaves everything as it was.

use crate::catalog::{BlockCatalog, ResourceProvider};
use crate::config::PlotConfig;
use crate::error::Result;
use crate::grid::VoxelGrid;
use crate::input::{parse_plot_data, PlacedBlockEntry};
use crate::plot::{Axis, PlotBuilder, SliceFilter};
use std::collections::HashMap;

pub struct PlotSession {
    catalog: BlockCatalog,
    builder: PlotBuilder,
    entries: Vec<PlacedBlockEntry>,
    filter: SliceFilter,
    show_ground: bool,
    layer_down_reset: i32,
    grid: VoxelGrid,
}

impl PlotSession {
    pub fn new(config: &PlotConfig, catalog: BlockCatalog) -> Result<Self> {
        let builder = PlotBuilder::new(config)?;
        let axis = config.slice_axis;
        let filter = SliceFilter::all(axis, axis.extent(config.factory_size));
        let grid = builder.build(&catalog, &[], &filter, config.show_ground)?;
        Ok(Self {
            catalog,
            builder,
            entries: Vec::new(),
            filter,
            show_ground: config.show_ground,
            layer_down_reset: config.layer_down_reset,
            grid,
        })
    }

    /// Resolves a raw `{ id: [block syntax, ...] }` table and starts a session.
    pub fn from_table(
        config: &PlotConfig,
        table: &HashMap<String, Vec<String>>,
        resources: &dyn ResourceProvider,
    ) -> Result<Self> {
        let catalog = BlockCatalog::from_table(table, resources)?;
        Self::new(config, catalog)
    }

    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    pub fn entries(&self) -> &[PlacedBlockEntry] {
        &self.entries
    }

    pub fn filter(&self) -> SliceFilter {
        self.filter
    }

    pub fn show_ground(&self) -> bool {
        self.show_ground
    }

    /// Replaces the entry list with the parsed `text`.
    pub fn apply_plot_data(&mut self, text: &str) -> Result<&VoxelGrid> {
        let entries = parse_plot_data(text).inspect_err(|e| {
            log::warn!("ignoring plot data: {}", e);
        })?;
        self.rebuild(Some(entries), self.filter, self.show_ground)
    }

    pub fn set_entries(&mut self, entries: Vec<PlacedBlockEntry>) -> Result<&VoxelGrid> {
        self.rebuild(Some(entries), self.filter, self.show_ground)
    }

    pub fn layer_up(&mut self) -> Result<&VoxelGrid> {
        self.rebuild(None, self.filter.layer_up(), self.show_ground)
    }

    pub fn layer_down(&mut self) -> Result<&VoxelGrid> {
        self.rebuild(None, self.filter.layer_down(self.layer_down_reset), self.show_ground)
    }

    pub fn cycle_axis(&mut self) -> Result<&VoxelGrid> {
        let filter = self.filter.next_axis(self.builder.factory_size());
        self.rebuild(None, filter, self.show_ground)
    }

    pub fn set_show_ground(&mut self, show_ground: bool) -> Result<&VoxelGrid> {
        self.rebuild(None, self.filter, show_ground)
    }

    pub fn axis(&self) -> Axis {
        self.filter.axis
    }

    fn rebuild(
        &mut self,
        entries: Option<Vec<PlacedBlockEntry>>,
        filter: SliceFilter,
        show_ground: bool,
    ) -> Result<&VoxelGrid> {
        let candidate = entries.as_deref().unwrap_or(&self.entries);
        let grid = self
            .builder
            .build(&self.catalog, candidate, &filter, show_ground)
            .inspect_err(|e| log::warn!("plot rebuild rejected: {}", e))?;

        if let Some(entries) = entries {
            self.entries = entries;
        }
        self.filter = filter;
        self.show_ground = show_ground;
        self.grid = grid;
        Ok(&self.grid)
    }
}
