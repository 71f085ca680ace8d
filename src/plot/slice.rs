use crate::grid::{GridPos, GridSize};
use crate::input::PlacedBlockEntry;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// x, then y, then z, then back to x.
    pub fn next(self) -> Axis {
        Axis::ALL[(self.index() + 1) % 3]
    }

    pub fn coord(self, (x, y, z): GridPos) -> i32 {
        match self {
            Axis::X => x,
            Axis::Y => y,
            Axis::Z => z,
        }
    }

    pub fn extent(self, size: GridSize) -> i32 {
        self.coord(size)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which layer of the factory is shown. `index == None` shows all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceFilter {
    pub axis: Axis,
    pub index: Option<i32>,
    pub max_index: i32,
}

impl SliceFilter {
    pub fn all(axis: Axis, max_index: i32) -> Self {
        Self {
            axis,
            index: None,
            max_index,
        }
    }

    pub fn includes(&self, entry: &PlacedBlockEntry) -> bool {
        match self.index {
            None => true,
            Some(index) => self.axis.coord(entry.position()) == index,
        }
    }

    /// Steps one layer up. From "all" this selects layer 1; stepping onto
    /// `max_index` or past it goes back to "all".
    pub fn layer_up(self) -> Self {
        let next = self.index.map_or(1, |i| i + 1);
        Self {
            index: (next < self.max_index).then_some(next),
            ..self
        }
    }

    /// Steps one layer down. From "all" this selects `reset`; landing
    /// outside `1..max_index` goes back to "all".
    pub fn layer_down(self, reset: i32) -> Self {
        let next = self.index.map_or(reset, |i| i - 1);
        Self {
            index: (1..self.max_index).contains(&next).then_some(next),
            ..self
        }
    }

    /// Moves to the next axis. The vertical axis restarts at layer 1, the
    /// horizontal ones at layer 2.
    pub fn next_axis(self, factory_size: GridSize) -> Self {
        let axis = self.axis.next();
        Self {
            axis,
            index: Some(if axis == Axis::Y { 1 } else { 2 }),
            max_index: axis.extent(factory_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_up_from_all_starts_at_one() {
        let filter = SliceFilter::all(Axis::Y, 6).layer_up();
        assert_eq!(filter.index, Some(1));
    }

    #[test]
    fn test_layer_up_past_top_returns_to_all() {
        let mut filter = SliceFilter::all(Axis::Y, 6);
        let mut seen = Vec::new();
        for _ in 0..6 {
            filter = filter.layer_up();
            seen.push(filter.index);
        }
        assert_eq!(
            seen,
            vec![Some(1), Some(2), Some(3), Some(4), Some(5), None]
        );
    }

    #[test]
    fn test_layer_down_resets_and_bottoms_out() {
        let filter = SliceFilter::all(Axis::Y, 6).layer_down(5);
        assert_eq!(filter.index, Some(5));

        let bottom = SliceFilter {
            index: Some(1),
            ..filter
        };
        assert_eq!(bottom.layer_down(5).index, None);
    }

    #[test]
    fn test_layer_down_reset_above_top_is_all() {
        let short = SliceFilter::all(Axis::Y, 3);
        assert_eq!(short.layer_down(5).index, None);
        assert_eq!(short.layer_down(3).index, None);
        assert_eq!(short.layer_down(2).index, Some(2));
    }

    #[test]
    fn test_axis_cycle_resets_index_and_max() {
        let size = (14, 6, 12);
        let filter = SliceFilter::all(Axis::Y, 6).next_axis(size);
        assert_eq!(filter.axis, Axis::Z);
        assert_eq!(filter.index, Some(2));
        assert_eq!(filter.max_index, 12);

        let filter = filter.next_axis(size);
        assert_eq!((filter.axis, filter.index, filter.max_index), (Axis::X, Some(2), 14));

        let filter = filter.next_axis(size);
        assert_eq!((filter.axis, filter.index, filter.max_index), (Axis::Y, Some(1), 6));
    }

    #[test]
    fn test_includes_matches_axis_coordinate() {
        let entry = PlacedBlockEntry::new("belt", (3, 1, 7), 0);
        assert!(SliceFilter::all(Axis::X, 14).includes(&entry));
        let on_x = SliceFilter {
            index: Some(3),
            ..SliceFilter::all(Axis::X, 14)
        };
        assert!(on_x.includes(&entry));
        let on_z = SliceFilter {
            index: Some(3),
            ..SliceFilter::all(Axis::Z, 14)
        };
        assert!(!on_z.includes(&entry));
    }
}
