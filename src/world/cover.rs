//! Tagged cover geometry and the nearby-cover query.

use bevy::prelude::*;

use crate::player::CoverSurface;

/// Marks level geometry the character can take cover against.
///
/// The surface faces along the entity's local forward axis and extends
/// `half_width` to either side.
#[derive(Component)]
pub struct CoverVolume {
    pub half_width: f32,
}

/// Build the snap surface for a tagged cover entity.
pub fn surface_of(transform: &Transform, volume: &CoverVolume) -> CoverSurface {
    let outward = transform.forward().as_vec3();
    CoverSurface {
        origin: transform.translation,
        outward: Vec3::new(outward.x, 0.0, outward.z).normalize_or_zero(),
        half_width: volume.half_width,
    }
}

/// Closest cover surface within reach of `position`, if any.
///
/// No surface in range is not an error - the cover request simply no-ops.
pub fn find_nearby_cover<'a>(
    position: Vec3,
    max_distance: f32,
    covers: impl Iterator<Item = (&'a Transform, &'a CoverVolume)>,
) -> Option<CoverSurface> {
    let mut best: Option<(f32, CoverSurface)> = None;
    for (transform, volume) in covers {
        let surface = surface_of(transform, volume);
        if surface.outward == Vec3::ZERO {
            continue;
        }
        let distance = surface.distance_to(position);
        if distance > max_distance {
            continue;
        }
        if best.map(|(d, _)| distance < d).unwrap_or(true) {
            best = Some((distance, surface));
        }
    }
    best.map(|(_, surface)| surface)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_closest_surface_in_range() {
        let near = (
            Transform::from_xyz(0.0, 0.5, -2.0),
            CoverVolume { half_width: 1.0 },
        );
        let far = (
            Transform::from_xyz(0.0, 0.5, -6.0),
            CoverVolume { half_width: 1.0 },
        );
        let covers = [near, far];

        let found = find_nearby_cover(
            Vec3::ZERO,
            3.0,
            covers.iter().map(|(t, v)| (t, v)),
        )
        .expect("near wall is in range");
        assert!((found.origin.z - (-2.0)).abs() < 1e-5);

        // Out of range: nothing to grab.
        assert!(find_nearby_cover(
            Vec3::ZERO,
            1.0,
            covers.iter().map(|(t, v)| (t, v))
        )
        .is_none());
    }
}
