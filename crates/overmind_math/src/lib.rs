//! # overmind_math
//!
//! Spatial types for the production scheduler. Re-exports [`glam`] for the
//! pixel-space vectors actors move in and defines:
//!
//! - [`TilePosition`]: build-grid coordinates used as construction sites.
//! - [`DistanceMetric`]: the pluggable map-distance service.
//! - [`travel_frames`]: `distance / speed + margin`, in game frames.

pub mod tile;
pub mod travel;

// Re-export glam types for convenience.
pub use glam::Vec2;

pub use tile::{TILE_SIZE, TilePosition};
pub use travel::{DistanceMetric, StraightLine, travel_frames};
