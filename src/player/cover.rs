//! Cover surfaces and the snap-to-cover placement math.

use bevy::prelude::*;

/// A vertical surface the character can press against.
///
/// `outward` is the surface's horizontal facing axis (unit length); the
/// surface extends `half_width` to either side of `origin` along the axis
/// perpendicular to `outward`.
#[derive(Debug, Clone, Copy)]
pub struct CoverSurface {
    pub origin: Vec3,
    pub outward: Vec3,
    pub half_width: f32,
}

impl CoverSurface {
    /// Closest point on the surface to `point`, at the query's height.
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let lateral = self.outward.cross(Vec3::Y).normalize_or_zero();
        let along = (point - self.origin)
            .dot(lateral)
            .clamp(-self.half_width, self.half_width);
        let on_surface = self.origin + lateral * along;
        Vec3::new(on_surface.x, point.y, on_surface.z)
    }

    /// Where the character should stand after grabbing this cover.
    ///
    /// Keeps the character on whichever side of the surface it already
    /// stands, offset outward by the collider radius plus a clearance
    /// margin, at its original height. Purely positional - snapping twice
    /// from the same spot lands on the same point.
    pub fn snap_point(&self, character_pos: Vec3, collider_radius: f32, margin: f32) -> Vec3 {
        let closest = self.closest_point(character_pos);
        let side = (character_pos - self.origin).dot(self.outward).signum();
        let standoff = collider_radius + margin;
        let snapped = closest + self.outward * (side * standoff);
        Vec3::new(snapped.x, character_pos.y, snapped.z)
    }

    /// Horizontal distance from `point` to the surface.
    pub fn distance_to(&self, point: Vec3) -> f32 {
        let closest = self.closest_point(point);
        Vec2::new(point.x - closest.x, point.z - closest.z).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall() -> CoverSurface {
        CoverSurface {
            origin: Vec3::new(0.0, 0.5, 5.0),
            outward: Vec3::NEG_Z,
            half_width: 2.0,
        }
    }

    #[test]
    fn snap_is_idempotent() {
        let surface = wall();
        let start = Vec3::new(0.7, 0.9, 3.1);

        let first = surface.snap_point(start, 0.3, 0.15);
        let second = surface.snap_point(first, 0.3, 0.15);

        assert!(first.distance(second) < 1e-5);
    }

    #[test]
    fn snap_preserves_side_and_height() {
        let surface = wall();

        // Character in front of the wall (negative-Z side).
        let front = surface.snap_point(Vec3::new(0.0, 0.9, 3.0), 0.3, 0.15);
        assert!(front.z < surface.origin.z);
        assert!((front.z - (5.0 - 0.45)).abs() < 1e-5);
        assert_eq!(front.y, 0.9);

        // Character behind the wall stays behind it.
        let behind = surface.snap_point(Vec3::new(0.0, 0.9, 7.0), 0.3, 0.15);
        assert!(behind.z > surface.origin.z);
    }

    #[test]
    fn closest_point_clamps_to_surface_extent() {
        let surface = wall();

        // Far off to the side: the closest point stops at the edge.
        let closest = surface.closest_point(Vec3::new(10.0, 0.9, 3.0));
        assert!((closest.x.abs() - 2.0).abs() < 1e-5);

        let distance = surface.distance_to(Vec3::new(10.0, 0.9, 5.0));
        assert!((distance - 8.0).abs() < 1e-4);
    }
}
