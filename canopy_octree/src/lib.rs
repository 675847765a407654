// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Octree: a dynamic bounding-sphere octree for 3D scenes.
//!
//! Canopy Octree maintains a changing set of keyed bounding spheres and
//! answers "which spheres does this ray touch?" and "which spheres does this
//! sphere touch?" while examining only a small fraction of the stored set.
//!
//! - Insert, update, and remove spheres by an opaque key; every operation is
//!   incremental and proportional to tree depth, not to the number of spheres.
//! - Queries descend the tree with a conservative enclosing-sphere test at
//!   branches and run a caller-supplied precise predicate at leaves, so the
//!   intersection math itself stays out of this crate (see `canopy_hit` for
//!   ready-made predicates).
//! - [`SphereOctree::walk`] exposes the raw prunable traversal for
//!   diagnostics and ad hoc queries.
//!
//! The tree is optimized for the per-frame usage pattern of a scene system:
//! most spheres move a little or not at all between queries, so resubmitting
//! an unchanged or slightly-moved sphere is cheap.
//!
//! # Example
//!
//! ```rust
//! use canopy_octree::{Ray, Sphere, SphereOctree};
//! use glam::DVec3;
//!
//! let mut tree: SphereOctree<u32> = SphereOctree::new();
//! tree.insert(1, Sphere::new(DVec3::ZERO, 1.0));
//! tree.insert(2, Sphere::new(DVec3::new(8.0, 0.0, 0.0), 2.0));
//!
//! // The precise ray test is injected by the caller.
//! let hit = |ray: &Ray, sphere: &Sphere| {
//!     let t = (sphere.center - ray.origin).dot(ray.direction).max(0.0);
//!     let closest = ray.origin + ray.direction * t;
//!     (sphere.center - closest).length_squared() <= sphere.radius * sphere.radius
//! };
//!
//! let ray = Ray::new(DVec3::new(-4.0, 0.0, 0.0), DVec3::X);
//! let mut hits = Vec::new();
//! tree.visit_ray(&ray, hit, |key, _sphere| hits.push(key));
//! hits.sort_unstable();
//! assert_eq!(hits, vec![1, 2]);
//! ```
//!
//! ## Features
//!
//! - `std` *(default)*: uses `std` floating-point functions via `glam`.
//! - `libm`: enables `no_std` use by routing float functions through `libm`.
//!
//! ### Float semantics
//!
//! Coordinates are `f64` and assumed non-NaN; spheres with a non-finite
//! center or radius are rejected (with a logged diagnostic) rather than
//! stored. The structure is not internally synchronized; callers that share
//! a tree across threads must bring their own locking.

#![no_std]

extern crate alloc;

mod octant;
mod tree;
mod types;

pub use tree::{OctantView, SphereOctree};
pub use types::{COINCIDENCE_SNAP, Ray, Sphere};
