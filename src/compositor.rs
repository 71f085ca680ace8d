//! Overlaying several grids into one coordinate space.

use crate::grid::{GridError, GridPos, GridSize, VoxelGrid};
use crate::BlockState;

/// One source grid and where its origin lands in the destination.
#[derive(Debug, Clone, Copy)]
pub struct GridLayer<'a> {
    pub grid: &'a VoxelGrid,
    pub offset: GridPos,
}

impl<'a> GridLayer<'a> {
    pub fn new(grid: &'a VoxelGrid, offset: GridPos) -> Self {
        Self { grid, offset }
    }

    pub fn at_origin(grid: &'a VoxelGrid) -> Self {
        Self::new(grid, (0, 0, 0))
    }

    fn fits_in(&self, dest: GridSize) -> bool {
        let (sx, sy, sz) = self.grid.size();
        let (ox, oy, oz) = self.offset;
        axis_fits(ox, sx, dest.0) && axis_fits(oy, sy, dest.1) && axis_fits(oz, sz, dest.2)
    }
}

fn axis_fits(offset: i32, extent: i32, dest: i32) -> bool {
    offset >= 0 && offset.checked_add(extent).is_some_and(|end| end <= dest)
}

/// Builds a grid of `dest_size` from `layers`, in order.
///
/// Every cell a layer covers is written, empty source cells as explicit
/// air, so a later layer replaces whatever an earlier one put there. All
/// layers are checked against `dest_size` before any cell is written.
pub fn compose(dest_size: GridSize, layers: &[GridLayer<'_>]) -> Result<VoxelGrid, GridError> {
    let mut dest = VoxelGrid::new(dest_size);
    let dest_size = dest.size();

    for (layer, source) in layers.iter().enumerate() {
        if !source.fits_in(dest_size) {
            return Err(GridError::LayerOutOfBounds {
                layer,
                offset: source.offset,
                extent: source.grid.size(),
                dest: dest_size,
            });
        }
    }

    let air = BlockState::air();
    for source in layers {
        let (sx, sy, sz) = source.grid.size();
        let (ox, oy, oz) = source.offset;
        for y in 0..sy {
            for z in 0..sz {
                for x in 0..sx {
                    let block = source.grid.get((x, y, z))?.unwrap_or(&air);
                    dest.set((x + ox, y + oy, z + oz), block)?;
                }
            }
        }
    }

    log::debug!(
        "composed {} layer(s) into {:?} ({} non-air blocks)",
        layers.len(),
        dest_size,
        dest.count_non_air()
    );
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(size: GridSize, name: &str) -> VoxelGrid {
        let mut grid = VoxelGrid::new(size);
        let block = BlockState::new(name);
        for y in 0..size.1 {
            for z in 0..size.2 {
                for x in 0..size.0 {
                    grid.set((x, y, z), &block).unwrap();
                }
            }
        }
        grid
    }

    #[test]
    fn test_later_layer_wins() {
        let stone = filled((2, 1, 2), "minecraft:stone");
        let dirt = filled((1, 1, 1), "minecraft:dirt");
        let out = compose(
            (2, 1, 2),
            &[GridLayer::at_origin(&stone), GridLayer::new(&dirt, (1, 0, 1))],
        )
        .unwrap();

        assert_eq!(out.get((1, 0, 1)).unwrap().unwrap().name, "minecraft:dirt");
        assert_eq!(out.get((0, 0, 0)).unwrap().unwrap().name, "minecraft:stone");
    }

    #[test]
    fn test_empty_source_cells_become_air() {
        let stone = filled((2, 1, 1), "minecraft:stone");
        let blank = VoxelGrid::new((1, 1, 1));
        let out = compose(
            (3, 1, 1),
            &[GridLayer::at_origin(&stone), GridLayer::at_origin(&blank)],
        )
        .unwrap();

        assert!(out.get((0, 0, 0)).unwrap().unwrap().is_air());
        assert_eq!(out.get((1, 0, 0)).unwrap().unwrap().name, "minecraft:stone");
        assert_eq!(out.get((2, 0, 0)).unwrap(), None);
    }

    #[test]
    fn test_rejects_layer_past_edge() {
        let stone = filled((2, 2, 2), "minecraft:stone");
        let err = compose((3, 3, 3), &[GridLayer::new(&stone, (0, 2, 0))]).unwrap_err();
        assert_eq!(
            err,
            GridError::LayerOutOfBounds {
                layer: 0,
                offset: (0, 2, 0),
                extent: (2, 2, 2),
                dest: (3, 3, 3)
            }
        );
    }

    #[test]
    fn test_rejects_negative_offset() {
        let stone = filled((1, 1, 1), "minecraft:stone");
        assert!(compose((3, 3, 3), &[GridLayer::new(&stone, (-1, 0, 0))]).is_err());
    }

    #[test]
    fn test_rejects_offset_near_i32_max() {
        let stone = filled((2, 1, 1), "minecraft:stone");
        for offset in [(i32::MAX, 0, 0), (0, i32::MAX, 0), (0, 0, i32::MAX - 1)] {
            let result = compose((4, 4, 4), &[GridLayer::new(&stone, offset)]);
            assert!(
                matches!(result, Err(GridError::LayerOutOfBounds { layer: 0, .. })),
                "offset {:?}",
                offset
            );
        }
    }

    #[test]
    fn test_no_layers_gives_empty_grid() {
        let out = compose((2, 2, 2), &[]).unwrap();
        assert_eq!(out.size(), (2, 2, 2));
        assert_eq!(out.iter_blocks().count(), 0);
    }
}
