use crate::BlockState;
use rustc_hash::FxHashMap;
use serde::Serialize;

pub type GridPos = (i32, i32, i32);
pub type GridSize = (i32, i32, i32);

/// Slot value for a cell nothing was ever written to.
const EMPTY: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("position {pos:?} is outside a grid of size {size:?}")]
    OutOfBounds { pos: GridPos, size: GridSize },
    #[error("layer {layer} at offset {offset:?} with extent {extent:?} does not fit in {dest:?}")]
    LayerOutOfBounds {
        layer: usize,
        offset: GridPos,
        extent: GridSize,
        dest: GridSize,
    },
}

/// A fixed-size box of block states.
///
/// Cells are palette indices stored x-fastest, then z, then y, the same
/// layout schematic regions use. A cell is either empty (never written) or
/// holds a palette entry, which may be explicit air.
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    size: GridSize,
    blocks: Vec<u32>,
    palette: Vec<BlockState>,
    palette_index: FxHashMap<BlockState, u32>,
    non_air_count: usize,
}

/// A non-empty cell, as handed to renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedBlock<'a> {
    pub pos: GridPos,
    pub state: &'a BlockState,
}

impl VoxelGrid {
    pub fn new(size: GridSize) -> Self {
        let size = (size.0.max(0), size.1.max(0), size.2.max(0));
        let volume = size.0 as usize * size.1 as usize * size.2 as usize;
        VoxelGrid {
            size,
            blocks: vec![EMPTY; volume],
            palette: Vec::new(),
            palette_index: FxHashMap::default(),
            non_air_count: 0,
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn volume(&self) -> usize {
        self.blocks.len()
    }

    #[inline(always)]
    pub fn contains(&self, (x, y, z): GridPos) -> bool {
        x >= 0 && y >= 0 && z >= 0 && x < self.size.0 && y < self.size.1 && z < self.size.2
    }

    #[inline(always)]
    fn coords_to_index(&self, (x, y, z): GridPos) -> usize {
        (x + z * self.size.0 + y * self.size.0 * self.size.2) as usize
    }

    #[inline(always)]
    fn index_to_coords(&self, index: usize) -> GridPos {
        let w = self.size.0 as usize;
        let wl = w * self.size.2 as usize;
        let x = (index % w) as i32;
        let y = (index / wl) as i32;
        let z = ((index / w) % self.size.2 as usize) as i32;
        (x, y, z)
    }

    fn check(&self, pos: GridPos) -> Result<usize, GridError> {
        if self.contains(pos) {
            Ok(self.coords_to_index(pos))
        } else {
            Err(GridError::OutOfBounds {
                pos,
                size: self.size,
            })
        }
    }

    fn get_or_insert_in_palette(&mut self, block: &BlockState) -> u32 {
        match self.palette_index.get(block) {
            Some(&slot) => slot,
            None => {
                self.palette.push(block.clone());
                let slot = self.palette.len() as u32;
                self.palette_index.insert(block.clone(), slot);
                slot
            }
        }
    }

    fn slot_is_air(&self, slot: u32) -> bool {
        slot == EMPTY || self.palette[slot as usize - 1].is_air()
    }

    pub fn set(&mut self, pos: GridPos, block: &BlockState) -> Result<(), GridError> {
        let index = self.check(pos)?;
        let slot = self.get_or_insert_in_palette(block);
        let old_is_air = self.slot_is_air(self.blocks[index]);
        let new_is_air = block.is_air();
        self.blocks[index] = slot;

        if old_is_air && !new_is_air {
            self.non_air_count += 1;
        } else if !old_is_air && new_is_air {
            self.non_air_count -= 1;
        }
        Ok(())
    }

    pub fn get(&self, pos: GridPos) -> Result<Option<&BlockState>, GridError> {
        let index = self.check(pos)?;
        Ok(self.block_at_index(index))
    }

    fn block_at_index(&self, index: usize) -> Option<&BlockState> {
        match self.blocks[index] {
            EMPTY => None,
            slot => Some(&self.palette[slot as usize - 1]),
        }
    }

    /// Distinct states written to this grid, in first-use order.
    pub fn palette(&self) -> &[BlockState] {
        &self.palette
    }

    /// True when the grid holds no block other than air.
    pub fn is_empty(&self) -> bool {
        self.non_air_count == 0
    }

    pub fn count_non_air(&self) -> usize {
        self.non_air_count
    }

    /// Every written cell, air included.
    pub fn iter_blocks(&self) -> impl Iterator<Item = PlacedBlock<'_>> + '_ {
        (0..self.blocks.len()).filter_map(move |index| {
            self.block_at_index(index).map(|state| PlacedBlock {
                pos: self.index_to_coords(index),
                state,
            })
        })
    }

    /// Midpoint of the grid's extent, the point cameras orbit around.
    pub fn center(&self) -> [f32; 3] {
        [
            self.size.0 as f32 / 2.0,
            self.size.1 as f32 / 2.0,
            self.size.2 as f32 / 2.0,
        ]
    }
}
