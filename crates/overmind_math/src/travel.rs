//! Travel-time estimation.
//!
//! The scheduler needs to know how many frames a worker takes to reach a
//! construction site. Distance comes from a [`DistanceMetric`] (the map
//! analysis layer may supply a path-aware one); speed comes from the actor.
//!
//! ```text
//! travel = ceil(distance / top_speed) + margin
//! ```

use glam::Vec2;

/// A map-distance service, in pixels.
pub trait DistanceMetric: Send + Sync {
    /// Distance an actor must cover to get from `from` to `to`.
    fn distance(&self, from: Vec2, to: Vec2) -> f32;
}

/// Euclidean distance, ignoring terrain.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLine;

impl DistanceMetric for StraightLine {
    fn distance(&self, from: Vec2, to: Vec2) -> f32 {
        from.distance(to)
    }
}

/// Frames needed to cover `distance` pixels at `top_speed` pixels per frame,
/// plus a fixed `margin`.
///
/// A non-positive or non-finite speed cannot be estimated and yields
/// `u32::MAX`.
#[must_use]
pub fn travel_frames(distance: f32, top_speed: f32, margin: u32) -> u32 {
    if !(top_speed > 0.0) || !top_speed.is_finite() {
        return u32::MAX;
    }
    // Float-to-int `as` saturates, so huge distances clamp to u32::MAX.
    let moving = (distance.max(0.0) / top_speed).ceil() as u32;
    moving.saturating_add(margin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_line_distance() {
        let d = StraightLine.distance(Vec2::new(0.0, 0.0), Vec2::new(30.0, 40.0));
        assert!((d - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_travel_frames_adds_margin() {
        assert_eq!(travel_frames(300.0, 3.0, 250), 350);
    }

    #[test]
    fn test_travel_frames_rounds_up() {
        assert_eq!(travel_frames(10.0, 3.0, 0), 4);
    }

    #[test]
    fn test_zero_distance_is_margin_only() {
        assert_eq!(travel_frames(0.0, 5.0, 250), 250);
    }

    #[test]
    fn test_stationary_actor_saturates() {
        assert_eq!(travel_frames(100.0, 0.0, 250), u32::MAX);
        assert_eq!(travel_frames(100.0, f32::NAN, 250), u32::MAX);
    }
}
