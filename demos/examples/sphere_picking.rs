// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Broad + narrow phase sphere picking: octree + `canopy_hit`.
//!
//! This example shows how to combine:
//! - `canopy_octree` for broad-phase culling of bounding spheres,
//! - `canopy_hit` for the precise ray–sphere tests and hit ranking.
//!
//! Run:
//! - `cargo run -p canopy_demos --example sphere_picking`

use canopy_hit::{ray_intersects_sphere, ray_sphere_entry, spheres_intersect};
use canopy_octree::{Ray, Sphere, SphereOctree};
use glam::DVec3;

fn main() {
    // Track a handful of objects by id, as a scene system would every frame.
    let mut tree: SphereOctree<u32> = SphereOctree::new();
    tree.insert_many([
        (1, Sphere::new(DVec3::new(0.0, 0.0, 0.0), 1.0)),
        (2, Sphere::new(DVec3::new(10.0, 2.0, 0.0), 2.0)),
        (3, Sphere::new(DVec3::new(10.0, 2.0, 0.0), 0.5)),
        (4, Sphere::new(DVec3::new(-6.0, 40.0, 12.0), 3.0)),
        (5, Sphere::new(DVec3::new(200.0, -80.0, 30.0), 5.0)),
    ]);

    // Object 4 moved this frame: resubmitting under the same id updates it.
    tree.insert(4, Sphere::new(DVec3::new(-6.0, 4.0, 1.0), 3.0));
    // Object 5 was deleted.
    tree.remove(5);

    println!("tracking {} spheres: {tree:?}", tree.len());

    for (label, ray) in [
        ("down the x axis", Ray::new(DVec3::new(-5.0, 0.0, 0.0), DVec3::X)),
        ("toward the pair", Ray::new(DVec3::new(10.0, 2.0, -20.0), DVec3::Z)),
        ("into empty space", Ray::new(DVec3::new(0.0, -50.0, 0.0), DVec3::NEG_Y)),
    ] {
        println!("\n== Ray {label}: {ray:?} ==");

        // Collect hits and rank them by entry distance along the ray.
        let mut hits: Vec<(u32, f64)> = Vec::new();
        tree.visit_ray(&ray, ray_intersects_sphere, |key, sphere| {
            if let Some(entry) = ray_sphere_entry(&ray, sphere) {
                hits.push((key, entry));
            }
        });
        hits.sort_by(|a, b| a.1.total_cmp(&b.1));

        if hits.is_empty() {
            println!("  no hits");
        }
        for (key, entry) in hits {
            println!("  hit object {key} at t = {entry:.3}");
        }
    }

    // Volume query: everything within 5 units of the first object.
    let probe = Sphere::new(DVec3::ZERO, 5.0);
    let mut nearby: Vec<u32> = Vec::new();
    tree.visit_overlapping(&probe, spheres_intersect, |key, _| nearby.push(key));
    nearby.sort_unstable();
    println!("\nobjects overlapping {probe:?}: {nearby:?}");
}
