//! Build-grid tile coordinates.
//!
//! The map is a grid of square build tiles, [`TILE_SIZE`] pixels on a side.
//! Construction sites are addressed by the top-left tile of the footprint;
//! actors move in continuous pixel space ([`Vec2`]).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Width and height of one build tile, in pixels.
pub const TILE_SIZE: i32 = 32;

/// A position on the build grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePosition {
    /// Column, counted from the left edge of the map.
    pub x: i32,
    /// Row, counted from the top edge of the map.
    pub y: i32,
}

impl TilePosition {
    /// Create a tile position from grid coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Pixel position of the tile's top-left corner.
    #[must_use]
    pub fn to_pixels(self) -> Vec2 {
        Vec2::new((self.x * TILE_SIZE) as f32, (self.y * TILE_SIZE) as f32)
    }

    /// Pixel position of the tile's centre. Workers are routed here.
    #[must_use]
    pub fn center(self) -> Vec2 {
        let half = (TILE_SIZE / 2) as f32;
        self.to_pixels() + Vec2::splat(half)
    }

    /// The tile containing the given pixel position.
    #[must_use]
    pub fn containing(pixel: Vec2) -> Self {
        let size = TILE_SIZE as f32;
        Self {
            x: (pixel.x / size).floor() as i32,
            y: (pixel.y / size).floor() as i32,
        }
    }
}

impl std::fmt::Display for TilePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_center() {
        let tile = TilePosition::new(10, 0);
        assert_eq!(tile.to_pixels(), Vec2::new(320.0, 0.0));
        assert_eq!(tile.center(), Vec2::new(336.0, 16.0));
    }

    #[test]
    fn test_containing_rounds_down() {
        assert_eq!(
            TilePosition::containing(Vec2::new(63.9, 32.0)),
            TilePosition::new(1, 1)
        );
        assert_eq!(
            TilePosition::containing(Vec2::new(-1.0, 5.0)),
            TilePosition::new(-1, 0)
        );
    }

    #[test]
    fn test_center_is_inside_tile() {
        let tile = TilePosition::new(7, 3);
        assert_eq!(TilePosition::containing(tile.center()), tile);
    }

    #[test]
    fn test_deserialize_from_json() {
        let tile: TilePosition = serde_json::from_str(r#"{"x": 4, "y": -2}"#).unwrap();
        assert_eq!(tile, TilePosition::new(4, -2));
    }
}
