use glam::DVec3;

/// Refractive index of fused silica, the lens material the sample meshes were
/// generated for.
pub const FUSED_SILICA_ETA: f64 = 1.457;

/// Direction substituted for rays that undergo total internal reflection.
///
/// Nearly parallel to the receiver plane, so the ray lands far outside the
/// display domain. This is not a physical reflection.
pub const TIR_DIRECTION: DVec3 = DVec3::new(0.9999, 0.0, 0.0141418);

/// Optical setup of the refraction step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RefractionParams {
    /// direction of the beam before it reaches the lens surface
    pub incident: DVec3,
    /// index of the medium the light leaves over the index of the medium it enters
    pub eta: f64,
    /// normalize every normal before use instead of trusting the mesh
    pub normalize_normals: bool,
}

impl Default for RefractionParams {
    fn default() -> Self {
        Self {
            incident: DVec3::Z,
            eta: FUSED_SILICA_ETA,
            normalize_normals: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RefractedRay {
    Transmitted(DVec3),
    TotalInternalReflection,
}

impl RefractedRay {
    pub fn direction(&self) -> DVec3 {
        match self {
            Self::Transmitted(dir) => *dir,
            Self::TotalInternalReflection => TIR_DIRECTION,
        }
    }

    pub fn is_total_internal_reflection(&self) -> bool {
        matches!(self, Self::TotalInternalReflection)
    }
}

/// Refract the incident beam on a surface with the given normal.
///
/// Uses the vector form of Snell's law,
/// `T = eta * I - (eta * cos_i - sqrt(1 - sin2_t)) * N`. The result is not
/// renormalized.
pub fn refract_normal(normal: DVec3, params: &RefractionParams) -> RefractedRay {
    let n = if params.normalize_normals {
        normal.normalize_or_zero()
    } else {
        normal
    };
    let eta = params.eta;
    let cos_i = params.incident.dot(n);
    let sin2_t = eta * eta * (1.0 - cos_i * cos_i);

    if sin2_t <= 1.0 {
        let cos_t = (1.0 - sin2_t).sqrt();
        RefractedRay::Transmitted(eta * params.incident - (eta * cos_i - cos_t) * n)
    } else {
        RefractedRay::TotalInternalReflection
    }
}

/// Refract every normal, keeping index alignment with the input.
pub fn refract(normals: &[DVec3], params: &RefractionParams) -> Vec<RefractedRay> {
    normals.iter().map(|n| refract_normal(*n, params)).collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn params(eta: f64) -> RefractionParams {
        RefractionParams {
            eta,
            ..Default::default()
        }
    }

    #[test]
    fn default_params() {
        let params = RefractionParams::default();
        assert_eq!(params.incident, DVec3::Z);
        assert_eq!(params.eta, 1.457);
        assert!(!params.normalize_normals);
    }
    #[test]
    fn matched_indices_at_normal_incidence() {
        let ray = refract_normal(DVec3::Z, &params(1.0));
        assert_eq!(ray, RefractedRay::Transmitted(DVec3::Z));
    }
    #[test]
    fn normal_incidence_is_not_bent() {
        let ray = refract_normal(DVec3::Z, &params(1.5));
        assert_eq!(ray.direction(), DVec3::Z);
    }
    #[test]
    fn output_is_index_aligned() {
        let normals = vec![DVec3::Z, DVec3::new(0.0, 0.6, 0.8), DVec3::X];
        let rays = refract(&normals, &RefractionParams::default());
        assert_eq!(rays.len(), normals.len());
        assert!(refract(&[], &RefractionParams::default()).is_empty());
    }
    #[test]
    fn refraction_is_deterministic() {
        let normals: Vec<DVec3> = (0..32)
            .map(|i| {
                let a = f64::from(i) * 0.05;
                DVec3::new(a.sin(), 0.0, a.cos())
            })
            .collect();
        let params = RefractionParams::default();
        let first = refract(&normals, &params);
        let second = refract(&normals, &params);
        for (a, b) in first.iter().zip(&second) {
            let a = a.direction().to_array().map(f64::to_bits);
            let b = b.direction().to_array().map(f64::to_bits);
            assert_eq!(a, b);
        }
    }
    #[test]
    fn tilted_normal_follows_snell() {
        // 30 degrees between beam and normal, glass to air
        let (sin_i, cos_i) = 30f64.to_radians().sin_cos();
        let normal = DVec3::new(sin_i, 0.0, cos_i);
        let eta: f64 = 1.457;
        let dir = refract_normal(normal, &params(eta)).direction();
        let sin_t = eta * sin_i;
        let expected = eta * DVec3::Z - (eta * cos_i - (1.0 - sin_t * sin_t).sqrt()) * normal;
        assert_abs_diff_eq!(dir.x, expected.x, epsilon = 1e-12);
        assert_abs_diff_eq!(dir.y, 0.0);
        assert_abs_diff_eq!(dir.z, expected.z, epsilon = 1e-12);
        // the transmitted direction has unit length for a unit normal and beam
        assert_abs_diff_eq!(dir.length(), 1.0, epsilon = 1e-12);
        // angle to the normal matches Snell's law
        let sin_out = dir.cross(normal).length() / dir.length();
        assert_abs_diff_eq!(sin_out, sin_t, epsilon = 1e-12);
    }
    #[test]
    fn total_internal_reflection_beyond_critical_angle() {
        let eta: f64 = 1.457;
        let critical = (1.0 / eta).asin();
        let below = critical - 0.01;
        let above = critical + 0.01;
        let normal_at = |angle: f64| DVec3::new(angle.sin(), 0.0, angle.cos());

        assert!(!refract_normal(normal_at(below), &params(eta)).is_total_internal_reflection());
        for step in 0..20 {
            let angle = above + f64::from(step) * 0.05;
            let ray = refract_normal(normal_at(angle), &params(eta));
            assert_eq!(ray, RefractedRay::TotalInternalReflection);
            assert_eq!(ray.direction(), TIR_DIRECTION);
        }
    }
    #[test]
    fn grazing_normal_is_reflected_for_dense_medium() {
        let ray = refract_normal(DVec3::X, &params(1.457));
        assert!(ray.is_total_internal_reflection());
        let ray = refract_normal(DVec3::X, &params(1.0));
        assert_eq!(ray, RefractedRay::Transmitted(DVec3::Z));
    }
    #[test]
    fn normals_are_trusted_by_default() {
        let long = DVec3::new(0.0, 0.0, 2.0);
        let trusted = refract_normal(long, &params(1.0)).direction();
        // cos_i = 2 and sqrt(1 - sin2_t) = 2 cancel out
        assert_eq!(trusted, DVec3::Z);

        let normalized = refract_normal(
            DVec3::new(0.0, 3.0, 4.0),
            &RefractionParams {
                eta: 1.2,
                normalize_normals: true,
                ..Default::default()
            },
        )
        .direction();
        let reference = refract_normal(DVec3::new(0.0, 0.6, 0.8), &params(1.2)).direction();
        assert_abs_diff_eq!(normalized.y, reference.y, epsilon = 1e-12);
        assert_abs_diff_eq!(normalized.z, reference.z, epsilon = 1e-12);
    }
    #[test]
    fn zero_normal_survives_normalization() {
        let normalize = |eta| RefractionParams {
            eta,
            normalize_normals: true,
            ..Default::default()
        };
        let ray = refract_normal(DVec3::ZERO, &normalize(0.5));
        assert_eq!(ray, RefractedRay::Transmitted(DVec3::new(0.0, 0.0, 0.5)));
        assert_eq!(ray, refract_normal(DVec3::ZERO, &params(0.5)));
        assert!(!ray.direction().is_nan());
        let ray = refract_normal(DVec3::ZERO, &normalize(1.457));
        assert_eq!(ray, RefractedRay::TotalInternalReflection);
    }
    #[test]
    fn custom_incident_direction() {
        let params = RefractionParams {
            incident: DVec3::X,
            eta: 1.0,
            normalize_normals: false,
        };
        assert_eq!(refract_normal(DVec3::X, &params).direction(), DVec3::X);
    }
}
