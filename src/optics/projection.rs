use glam::{DVec2, DVec3};
use log::warn;

use crate::optics::refraction::RefractedRay;

/// Rays whose z component is smaller than this never reach the plane.
pub const PARALLEL_EPSILON: f64 = 1e-9;

/// Point emitted for rays that cannot be intersected with the receiver plane.
pub const UNRESOLVED_POINT: DVec2 = DVec2::new(-9999.0, -9999.0);

/// Square `[0, size) x [0, size)` that world coordinates in `[-1, 1]` map onto.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayDomain {
    pub size: f64,
}

impl Default for DisplayDomain {
    fn default() -> Self {
        Self { size: 256.0 }
    }
}

impl DisplayDomain {
    pub fn to_domain(&self, world: DVec2) -> DVec2 {
        let half = self.size / 2.0;
        world * half + DVec2::splat(half)
    }

    pub fn contains(&self, point: DVec2) -> bool {
        (0.0..self.size).contains(&point.x) && (0.0..self.size).contains(&point.y)
    }
}

/// Intersect the ray leaving `origin` along `ray` with the plane `z = plane_depth`.
pub fn intersect(
    origin: DVec3,
    ray: &RefractedRay,
    plane_depth: f64,
    domain: &DisplayDomain,
) -> DVec2 {
    let dir = ray.direction();
    if dir.z.abs() < PARALLEL_EPSILON {
        return UNRESOLVED_POINT;
    }
    let t = (plane_depth - origin.z) / dir.z;
    let world = DVec2::new(origin.x + dir.x * t, origin.y + dir.y * t);
    domain.to_domain(world)
}

/// Project every ray onto the receiver plane.
///
/// Only the common prefix of `vertices` and `rays` is processed; a length
/// mismatch is logged but not treated as an error.
pub fn project(
    vertices: &[DVec3],
    rays: &[RefractedRay],
    plane_depth: f64,
    domain: &DisplayDomain,
) -> Vec<DVec2> {
    if vertices.len() != rays.len() {
        warn!(
            "Mismatch in size of vertices ({}) and refracted rays ({})",
            vertices.len(),
            rays.len()
        );
    }
    vertices
        .iter()
        .zip(rays)
        .map(|(origin, ray)| intersect(*origin, ray, plane_depth, domain))
        .collect()
}
