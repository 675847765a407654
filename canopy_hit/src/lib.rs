// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry-level precise intersection predicates for Canopy.
//!
//! This crate provides the narrow-phase tests that `canopy_octree`
//! deliberately leaves to its callers: exact ray–sphere and sphere–sphere
//! intersection. It is intentionally decoupled from the tree — the functions
//! here are plain predicates over [`Ray`] and [`Sphere`] values, shaped so
//! they can be passed straight to
//! [`SphereOctree::visit_ray`][canopy_octree::SphereOctree::visit_ray] and
//! [`SphereOctree::visit_overlapping`][canopy_octree::SphereOctree::visit_overlapping].
//!
//! # Typical usage
//!
//! ```rust
//! use canopy_hit::ray_intersects_sphere;
//! use canopy_octree::{Ray, Sphere, SphereOctree};
//! use glam::DVec3;
//!
//! let mut tree: SphereOctree<u32> = SphereOctree::new();
//! tree.insert(7, Sphere::new(DVec3::new(3.0, 0.0, 0.0), 1.0));
//!
//! let ray = Ray::new(DVec3::ZERO, DVec3::X);
//! let mut hits = Vec::new();
//! tree.visit_ray(&ray, ray_intersects_sphere, |key, _| hits.push(key));
//! assert_eq!(hits, vec![7]);
//! ```
//!
//! Boolean tests are done entirely on squared distances. Only
//! [`ray_sphere_entry`], which reports a parametric distance for hit
//! ranking, takes a square root.
//!
//! Rays are half-lines: geometry behind the origin does not count as a hit.
//! A degenerate zero-length direction degrades to a point-in-sphere test of
//! the origin rather than panicking or dividing by zero.

#![no_std]

use canopy_octree::{Ray, Sphere};

#[cfg(feature = "std")]
#[inline]
fn sqrt(x: f64) -> f64 {
    f64::sqrt(x)
}

#[cfg(not(feature = "std"))]
#[inline]
fn sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

/// Whether `ray` touches `sphere`. Grazing contact counts as a hit.
pub fn ray_intersects_sphere(ray: &Ray, sphere: &Sphere) -> bool {
    let to_center = sphere.center - ray.origin;
    let len2 = ray.direction.length_squared();
    let r2 = sphere.radius * sphere.radius;
    if len2 == 0.0 {
        return to_center.length_squared() <= r2;
    }
    // Closest point on the half-line to the center, clamped to the origin so
    // spheres behind the ray do not count.
    let t = (to_center.dot(ray.direction) / len2).max(0.0);
    let closest = ray.origin + ray.direction * t;
    (sphere.center - closest).length_squared() <= r2
}

/// Parametric distance along `ray` to the point where it enters `sphere`,
/// in units of the direction vector's length.
///
/// Returns `None` on a miss. A ray starting inside the sphere reports
/// `Some(0.0)`: the "entry" is the origin itself. Useful for ranking the
/// hits produced by a tree query by proximity.
pub fn ray_sphere_entry(ray: &Ray, sphere: &Sphere) -> Option<f64> {
    let to_center = sphere.center - ray.origin;
    let len2 = ray.direction.length_squared();
    let r2 = sphere.radius * sphere.radius;
    if len2 == 0.0 {
        return (to_center.length_squared() <= r2).then_some(0.0);
    }
    let mid = to_center.dot(ray.direction) / len2;
    let closest = ray.origin + ray.direction * mid;
    let d2 = (sphere.center - closest).length_squared();
    if d2 > r2 {
        return None;
    }
    let span = sqrt((r2 - d2) / len2);
    let entry = mid - span;
    if entry >= 0.0 {
        Some(entry)
    } else if mid + span >= 0.0 {
        // The origin is inside (or on) the sphere.
        Some(0.0)
    } else {
        // The sphere lies entirely behind the origin.
        None
    }
}

/// Whether two spheres overlap. Touching surfaces count as an overlap.
pub fn spheres_intersect(a: &Sphere, b: &Sphere) -> bool {
    let reach = a.radius + b.radius;
    (b.center - a.center).length_squared() <= reach * reach
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn sphere(x: f64, y: f64, z: f64, radius: f64) -> Sphere {
        Sphere::new(DVec3::new(x, y, z), radius)
    }

    #[test]
    fn ray_through_center_hits() {
        let ray = Ray::new(DVec3::ZERO, DVec3::X);
        let s = sphere(10.0, 0.0, 0.0, 1.0);
        assert!(ray_intersects_sphere(&ray, &s));
        let entry = ray_sphere_entry(&ray, &s).expect("hit expected");
        assert!((entry - 9.0).abs() < 1e-12);
    }

    #[test]
    fn offset_ray_grazes_and_misses() {
        let s = sphere(10.0, 0.0, 0.0, 1.0);
        let graze = Ray::new(DVec3::new(0.0, 1.0, 0.0), DVec3::X);
        assert!(ray_intersects_sphere(&graze, &s));
        assert!(ray_sphere_entry(&graze, &s).is_some());

        let miss = Ray::new(DVec3::new(0.0, 1.1, 0.0), DVec3::X);
        assert!(!ray_intersects_sphere(&miss, &s));
        assert!(ray_sphere_entry(&miss, &s).is_none());
    }

    #[test]
    fn spheres_behind_the_origin_do_not_hit() {
        let ray = Ray::new(DVec3::ZERO, DVec3::X);
        let behind = sphere(-10.0, 0.0, 0.0, 1.0);
        assert!(!ray_intersects_sphere(&ray, &behind));
        assert!(ray_sphere_entry(&ray, &behind).is_none());
    }

    #[test]
    fn origin_inside_reports_zero_entry() {
        let ray = Ray::new(DVec3::new(0.5, 0.0, 0.0), DVec3::X);
        let s = sphere(0.0, 0.0, 0.0, 2.0);
        assert!(ray_intersects_sphere(&ray, &s));
        assert_eq!(ray_sphere_entry(&ray, &s), Some(0.0));
    }

    #[test]
    fn entry_scales_with_direction_length() {
        // The entry distance is parametric: doubling the direction halves it.
        let s = sphere(10.0, 0.0, 0.0, 1.0);
        let unit = Ray::new(DVec3::ZERO, DVec3::X);
        let double = Ray::new(DVec3::ZERO, DVec3::X * 2.0);
        let a = ray_sphere_entry(&unit, &s).expect("hit expected");
        let b = ray_sphere_entry(&double, &s).expect("hit expected");
        assert!((a - 2.0 * b).abs() < 1e-12);
    }

    #[test]
    fn degenerate_direction_degrades_to_point_test() {
        let stuck = Ray::new(DVec3::new(1.0, 0.0, 0.0), DVec3::ZERO);
        let near = sphere(0.0, 0.0, 0.0, 1.5);
        let far = sphere(0.0, 0.0, 0.0, 0.5);
        assert!(ray_intersects_sphere(&stuck, &near));
        assert_eq!(ray_sphere_entry(&stuck, &near), Some(0.0));
        assert!(!ray_intersects_sphere(&stuck, &far));
        assert!(ray_sphere_entry(&stuck, &far).is_none());
    }

    #[test]
    fn entry_agrees_with_the_boolean_test() {
        // A small deterministic sweep of configurations.
        for ox in [-4.0, 0.0, 3.0] {
            for cy in [-2.0, 0.0, 1.5] {
                for radius in [0.25, 1.0, 3.0] {
                    let ray = Ray::new(DVec3::new(ox, 0.5, -1.0), DVec3::new(1.0, 0.1, 0.2));
                    let s = sphere(2.0, cy, 0.0, radius);
                    assert_eq!(
                        ray_intersects_sphere(&ray, &s),
                        ray_sphere_entry(&ray, &s).is_some(),
                        "boolean and entry tests must agree"
                    );
                }
            }
        }
    }

    #[test]
    fn sphere_overlap_cases() {
        let a = sphere(0.0, 0.0, 0.0, 1.0);
        assert!(spheres_intersect(&a, &sphere(1.5, 0.0, 0.0, 1.0)));
        // Exactly touching counts.
        assert!(spheres_intersect(&a, &sphere(2.0, 0.0, 0.0, 1.0)));
        assert!(!spheres_intersect(&a, &sphere(2.1, 0.0, 0.0, 1.0)));
        // Containment counts.
        assert!(spheres_intersect(&a, &sphere(0.1, 0.0, 0.0, 0.2)));
        assert!(spheres_intersect(&a, &a));
    }
}
