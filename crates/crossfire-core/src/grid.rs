//! Street lattice: the coordinates entities are allowed to travel along.

use crate::constants::{BLOCK_SIZE, CENTER_STREET_INDEX, GRID_EXTENT, STREET_COUNT, STREET_WIDTH};
use crate::types::Position;

/// Immutable street layout shared by both axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Street center coordinates, strictly increasing.
    streets: Vec<f64>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::standard()
    }
}

impl Grid {
    /// The 7x7 block city used by the game.
    pub fn standard() -> Self {
        let spacing = BLOCK_SIZE + STREET_WIDTH;
        let streets = (0..STREET_COUNT)
            .map(|i| STREET_WIDTH / 2.0 + i as f64 * spacing)
            .collect();
        Self { streets }
    }

    /// Ordered street coordinates (N + 1 entries for N blocks).
    pub fn street_positions(&self) -> &[f64] {
        &self.streets
    }

    /// Closest street coordinate to `pos`.
    pub fn snap_to_nearest_street(&self, pos: f64) -> f64 {
        self.streets[self.street_index(pos)]
    }

    /// Index of the closest street. Ties resolve to the lower index; input
    /// that cannot be compared (NaN) resolves to index 0.
    pub fn street_index(&self, pos: f64) -> usize {
        let mut nearest = 0;
        let mut min_dist = (pos - self.streets[0]).abs();
        for (i, street) in self.streets.iter().enumerate().skip(1) {
            let dist = (pos - street).abs();
            if dist < min_dist {
                min_dist = dist;
                nearest = i;
            }
        }
        nearest
    }

    /// Street coordinate at `index`, clamped to the last street.
    pub fn street(&self, index: usize) -> f64 {
        self.streets[index.min(self.last_index())]
    }

    pub fn last_index(&self) -> usize {
        self.streets.len() - 1
    }

    pub fn first_street(&self) -> f64 {
        self.streets[0]
    }

    pub fn last_street(&self) -> f64 {
        self.streets[self.last_index()]
    }

    pub fn center_index(&self) -> usize {
        CENTER_STREET_INDEX.min(self.last_index())
    }

    /// Home intersection of the player ship.
    pub fn center(&self) -> Position {
        let c = self.street(self.center_index());
        Position::new(c, c)
    }

    /// Edge length of the playfield bounding box.
    pub fn extent(&self) -> f64 {
        GRID_EXTENT
    }

    /// Whether `pos` lies inside `[0, extent]` on both axes.
    pub fn contains(&self, pos: &Position) -> bool {
        let extent = self.extent();
        (0.0..=extent).contains(&pos.x) && (0.0..=extent).contains(&pos.y)
    }

    /// Whether `pos` lies on some street along one axis.
    pub fn is_on_street(&self, pos: f64, tolerance: f64) -> bool {
        (self.snap_to_nearest_street(pos) - pos).abs() <= tolerance
    }

    /// Whether `pos` sits at a street intersection.
    pub fn is_intersection(&self, pos: &Position, tolerance: f64) -> bool {
        self.is_on_street(pos.x, tolerance) && self.is_on_street(pos.y, tolerance)
    }

    /// Snap both axes to the nearest streets.
    pub fn snap(&self, pos: &Position) -> Position {
        Position::new(
            self.snap_to_nearest_street(pos.x),
            self.snap_to_nearest_street(pos.y),
        )
    }

    /// Intersection at the given street indices (clamped).
    pub fn intersection(&self, x_index: usize, y_index: usize) -> Position {
        Position::new(self.street(x_index), self.street(y_index))
    }
}
