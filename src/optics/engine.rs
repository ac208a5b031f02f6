use glam::DVec2;
use log::debug;

use crate::optics::mesh::LensMesh;
use crate::optics::projection::{DisplayDomain, UNRESOLVED_POINT, project};
use crate::optics::refraction::{RefractedRay, RefractionParams, refract};

/// Counters shown in the overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CausticStats {
    pub samples: usize,
    pub total_internal_reflections: usize,
    pub unresolved: usize,
    pub in_domain: usize,
}

/// Owns the lens geometry and everything derived from it.
///
/// Refracted rays do not depend on the plane depth and are computed once;
/// intersections are replaced as a whole whenever the depth changes.
pub struct CausticEngine {
    mesh: LensMesh,
    refracted: Vec<RefractedRay>,
    domain: DisplayDomain,
    plane_depth: f64,
    intersections: Vec<DVec2>,
}

impl CausticEngine {
    pub fn new(
        mesh: LensMesh,
        params: &RefractionParams,
        domain: DisplayDomain,
        plane_depth: f64,
    ) -> Self {
        let refracted = refract(mesh.normals(), params);
        let intersections = project(mesh.vertices(), &refracted, plane_depth, &domain);

        let engine = Self {
            mesh,
            refracted,
            domain,
            plane_depth,
            intersections,
        };
        debug!(
            "Refracted {} rays with eta {}, {} totally reflected",
            engine.refracted().len(),
            params.eta,
            engine.stats().total_internal_reflections
        );
        engine
    }

    pub fn mesh(&self) -> &LensMesh {
        &self.mesh
    }

    pub fn refracted(&self) -> &[RefractedRay] {
        &self.refracted
    }

    pub fn domain(&self) -> &DisplayDomain {
        &self.domain
    }

    pub fn plane_depth(&self) -> f64 {
        self.plane_depth
    }

    pub fn intersections(&self) -> &[DVec2] {
        &self.intersections
    }

    pub fn set_plane_depth(&mut self, plane_depth: f64) {
        self.plane_depth = plane_depth;
        self.intersections = project(
            self.mesh.vertices(),
            &self.refracted,
            plane_depth,
            &self.domain,
        );
    }

    pub fn stats(&self) -> CausticStats {
        CausticStats {
            samples: self.mesh.sample_count(),
            total_internal_reflections: self
                .refracted
                .iter()
                .filter(|r| r.is_total_internal_reflection())
                .count(),
            unresolved: self
                .intersections
                .iter()
                .filter(|p| **p == UNRESOLVED_POINT)
                .count(),
            in_domain: self
                .intersections
                .iter()
                .filter(|p| self.domain.contains(**p))
                .count(),
        }
    }
}
