//! The avatar's collision capsule.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A swept-sphere collision volume: every point within `radius` of the
/// segment from `start` to `end`.
///
/// For the avatar, `start` is the centre of the foot sphere and `end` the
/// centre of the head sphere. The segment length and radius never change
/// over the capsule's lifetime; only [`Capsule::translate`] moves it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Capsule {
    /// Foot point (centre of the lower cap).
    pub start: Vec3,
    /// Head point (centre of the upper cap).
    pub end: Vec3,
    /// Radius of the caps and the body.
    pub radius: f32,
}

impl Capsule {
    /// Create a capsule from its two end points and radius.
    pub fn new(start: Vec3, end: Vec3, radius: f32) -> Self {
        Self { start, end, radius }
    }

    /// The canonical spawn capsule for an avatar of the given size, standing
    /// on the origin: the foot sphere rests on `y = 0` and the head point sits
    /// at `height`.
    pub fn spawn(radius: f32, height: f32) -> Self {
        Self::new(
            Vec3::new(0.0, radius, 0.0),
            Vec3::new(0.0, height, 0.0),
            radius,
        )
    }

    /// Move both end points by `delta`.
    #[inline]
    pub fn translate(&mut self, delta: Vec3) {
        self.start += delta;
        self.end += delta;
    }

    /// Midpoint of the segment.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }

    /// Distance between the two end points.
    #[inline]
    pub fn segment_length(&self) -> f32 {
        (self.end - self.start).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_rests_on_origin() {
        let capsule = Capsule::spawn(0.35, 1.6);
        assert_eq!(capsule.start, Vec3::new(0.0, 0.35, 0.0));
        assert_eq!(capsule.end, Vec3::new(0.0, 1.6, 0.0));
        assert_eq!(capsule.start.y - capsule.radius, 0.0);
    }

    #[test]
    fn test_translate_preserves_shape() {
        let mut capsule = Capsule::spawn(0.35, 1.6);
        let length = capsule.segment_length();

        capsule.translate(Vec3::new(3.0, -2.0, 0.5));

        assert!(capsule.start.abs_diff_eq(Vec3::new(3.0, -1.65, 0.5), 1e-6));
        assert!(capsule.end.abs_diff_eq(Vec3::new(3.0, -0.4, 0.5), 1e-6));
        assert!((capsule.segment_length() - length).abs() < 1e-6);
        assert_eq!(capsule.radius, 0.35);
    }
}
