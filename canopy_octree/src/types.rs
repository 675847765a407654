// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry values and the coincidence-snapping policy.

use glam::DVec3;

/// Grid pitch used to decide whether two sphere centers are coincident.
///
/// Each coordinate is snapped to the nearest multiple of this constant before
/// comparison; spheres whose snapped centers agree may share one leaf. The
/// original, unsnapped sphere is always kept for query purposes.
pub const COINCIDENCE_SNAP: f64 = 1e-8;

/// A bounding sphere in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    /// Center of the sphere.
    pub center: DVec3,
    /// Radius of the sphere; non-negative for meaningful bounds.
    pub radius: f64,
}

impl Sphere {
    /// Create a sphere from a center and radius.
    #[inline]
    pub const fn new(center: DVec3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Whether the radius and every center coordinate are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.center.is_finite() && self.radius.is_finite()
    }
}

/// A ray (half-line) in world space.
///
/// This is pure data: the tree never does ray math itself. Intersection
/// predicates are supplied by callers, e.g. from the `canopy_hit` crate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Starting point of the ray.
    pub origin: DVec3,
    /// Direction of the ray; not required to be normalized.
    pub direction: DVec3,
}

impl Ray {
    /// Create a ray from an origin and direction.
    #[inline]
    pub const fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }
}

/// Snap a point to the coincidence grid.
#[inline]
pub(crate) fn snap_to_grid(p: DVec3) -> DVec3 {
    (p / COINCIDENCE_SNAP).round() * COINCIDENCE_SNAP
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapping_groups_nearby_points() {
        let a = snap_to_grid(DVec3::new(1.0, 2.0, 3.0));
        let b = snap_to_grid(DVec3::new(1.0 + 1e-10, 2.0 - 1e-10, 3.0));
        assert_eq!(a, b);

        // A full grid step apart stays distinct.
        let c = snap_to_grid(DVec3::new(1.0 + 2e-8, 2.0, 3.0));
        assert_ne!(a, c);
    }

    #[test]
    fn snapping_is_idempotent() {
        let p = snap_to_grid(DVec3::new(0.1234567891234, -256.25, 1e-9));
        assert_eq!(p, snap_to_grid(p));
    }

    #[test]
    fn sphere_finiteness() {
        assert!(Sphere::new(DVec3::ZERO, 1.0).is_finite());
        assert!(!Sphere::new(DVec3::ZERO, f64::NAN).is_finite());
        assert!(!Sphere::new(DVec3::new(f64::INFINITY, 0.0, 0.0), 1.0).is_finite());
        assert!(!Sphere::new(DVec3::new(0.0, f64::NEG_INFINITY, 0.0), 1.0).is_finite());
    }
}
