// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Octree node storage: cube bounds, aggregates, and the leaf/branch split.

use core::hash::Hash;

use glam::DVec3;
use hashbrown::HashMap;

use crate::types::Sphere;

/// Index of a node in the tree's arena.
///
/// Ids are internal non-owning references; the tree structure is the single
/// owner of every node.
pub(crate) type OctantId = usize;

/// √3: the half-diagonal of a cube with unit half-width.
pub(crate) const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Members of a leaf. The single-member form stays unboxed; a map is only
/// allocated once a second coincident sphere arrives.
#[derive(Clone, Debug)]
pub(crate) enum Members<K> {
    /// Exactly one sphere.
    One(K, Sphere),
    /// Two or more spheres sharing a snapped center.
    Many(HashMap<K, Sphere>),
}

impl<K: Copy + Eq + Hash> Members<K> {
    pub(crate) fn len(&self) -> usize {
        match self {
            Self::One(..) => 1,
            Self::Many(map) => map.len(),
        }
    }

    pub(crate) fn get(&self, key: &K) -> Option<&Sphere> {
        match self {
            Self::One(k, sphere) => (k == key).then_some(sphere),
            Self::Many(map) => map.get(key),
        }
    }

    /// Insert or replace the sphere for `key`, promoting to the map form on a
    /// second member. Returns the previous sphere stored under `key`, if any.
    pub(crate) fn put(&mut self, key: K, sphere: Sphere) -> Option<Sphere> {
        match self {
            Self::One(k, stored) => {
                if *k == key {
                    return Some(core::mem::replace(stored, sphere));
                }
                let mut map = HashMap::with_capacity(2);
                map.insert(*k, *stored);
                map.insert(key, sphere);
                *self = Self::Many(map);
                None
            }
            Self::Many(map) => map.insert(key, sphere),
        }
    }

    /// Remove `key`, demoting back to the unboxed form when one member
    /// remains. Returns the removed sphere.
    ///
    /// Removal of a sole member is a structural change (the leaf goes away),
    /// handled by the tree rather than here.
    pub(crate) fn remove(&mut self, key: &K) -> Option<Sphere> {
        let Self::Many(map) = self else {
            unreachable!("sole members are detached with their leaf, not drained");
        };
        let removed = map.remove(key)?;
        if map.len() == 1 {
            let (k, sphere) = map.drain().next().expect("length checked above");
            *self = Self::One(k, sphere);
        }
        Some(removed)
    }

    /// Largest radius among the members.
    pub(crate) fn max_radius(&self) -> f64 {
        match self {
            Self::One(_, sphere) => sphere.radius,
            Self::Many(map) => map.values().fold(0.0, |acc, s| acc.max(s.radius)),
        }
    }
}

/// Payload distinguishing leaves from branches.
#[derive(Clone, Debug)]
pub(crate) enum OctantKind<K> {
    /// Holds one or more spheres whose snapped centers agree.
    Leaf {
        /// Snapped center shared by every member.
        point: DVec3,
        members: Members<K>,
    },
    /// Holds up to eight children, one per spatial octant of the cube.
    Branch { children: [Option<OctantId>; 8] },
}

/// One node of the octree.
///
/// `parent`/`slot` are non-owning back-references kept consistent with the
/// tree's actual shape after every structural change; `slot` is meaningless
/// for the root.
#[derive(Clone, Debug)]
pub(crate) struct Octant<K> {
    /// Cube center.
    pub(crate) center: DVec3,
    /// Cube half-width: the distance from the center to each face.
    pub(crate) half: f64,
    pub(crate) parent: Option<OctantId>,
    pub(crate) slot: u8,
    /// Total spheres in this subtree; a leaf counts its own members.
    pub(crate) sphere_count: usize,
    /// Total leaves in this subtree; 1 for a leaf.
    pub(crate) leaf_count: usize,
    /// Largest sphere radius anywhere in this subtree.
    pub(crate) max_radius: f64,
    pub(crate) kind: OctantKind<K>,
}

impl<K> Octant<K> {
    /// A detached leaf holding one sphere, with a degenerate cube at `point`.
    /// Attaching it under a branch assigns the real child-cube bounds.
    pub(crate) fn leaf(point: DVec3, key: K, sphere: Sphere) -> Self {
        Self {
            center: point,
            half: 0.0,
            parent: None,
            slot: 0,
            sphere_count: 1,
            leaf_count: 1,
            max_radius: sphere.radius,
            kind: OctantKind::Leaf {
                point,
                members: Members::One(key, sphere),
            },
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self.kind, OctantKind::Leaf { .. })
    }

    /// Child slot for a point: one bit per axis, low/high side of the center
    /// plane, with z as the highest bit. Points exactly on a plane go to the
    /// high side.
    #[inline]
    pub(crate) fn child_slot(&self, p: DVec3) -> usize {
        (usize::from(p.z >= self.center.z) << 2)
            | (usize::from(p.y >= self.center.y) << 1)
            | usize::from(p.x >= self.center.x)
    }

    /// Center of the child cube at `slot`.
    pub(crate) fn child_center(&self, slot: usize) -> DVec3 {
        let q = self.half * 0.5;
        DVec3::new(
            if slot & 1 != 0 { self.center.x + q } else { self.center.x - q },
            if slot & 2 != 0 { self.center.y + q } else { self.center.y - q },
            if slot & 4 != 0 { self.center.z + q } else { self.center.z - q },
        )
    }

    /// Whether the cube contains `p`, faces inclusive.
    pub(crate) fn contains(&self, p: DVec3) -> bool {
        let d = (p - self.center).abs();
        d.x <= self.half && d.y <= self.half && d.z <= self.half
    }

    /// Radius of a sphere centered on the cube that is guaranteed to enclose
    /// every sphere stored in this subtree: the cube's half-diagonal (worst
    /// case, a center in a corner) plus the largest member radius.
    #[inline]
    pub(crate) fn enclosing_radius(&self) -> f64 {
        self.half * SQRT_3 + self.max_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch() -> Octant<u32> {
        Octant {
            center: DVec3::new(10.0, -10.0, 4.0),
            half: 8.0,
            parent: None,
            slot: 0,
            sphere_count: 2,
            leaf_count: 2,
            max_radius: 0.0,
            kind: OctantKind::Branch {
                children: [None; 8],
            },
        }
    }

    #[test]
    fn child_slot_covers_all_octants() {
        let b = branch();
        let mut seen = [false; 8];
        for dz in [-1.0, 1.0] {
            for dy in [-1.0, 1.0] {
                for dx in [-1.0, 1.0] {
                    let p = b.center + DVec3::new(dx, dy, dz);
                    seen[b.child_slot(p)] = true;
                }
            }
        }
        assert_eq!(seen, [true; 8], "every octant must be reachable");
    }

    #[test]
    fn on_plane_points_go_to_the_high_side() {
        let b = branch();
        assert_eq!(b.child_slot(b.center), 0b111);
    }

    #[test]
    fn child_center_agrees_with_child_slot() {
        let b = branch();
        for slot in 0..8 {
            let c = b.child_center(slot);
            assert_eq!(b.child_slot(c), slot);
            assert!(b.contains(c));
        }
    }

    #[test]
    fn containment_is_face_inclusive() {
        let b = branch();
        assert!(b.contains(b.center + DVec3::splat(b.half)));
        assert!(!b.contains(b.center + DVec3::new(b.half * 1.01, 0.0, 0.0)));
    }

    #[test]
    fn members_promote_and_demote() {
        let s = |r| Sphere::new(DVec3::ZERO, r);
        let mut m = Members::One(1_u32, s(1.0));
        assert_eq!(m.len(), 1);
        assert_eq!(m.max_radius(), 1.0);

        assert!(m.put(2, s(3.0)).is_none());
        assert_eq!(m.len(), 2);
        assert_eq!(m.max_radius(), 3.0);
        assert!(matches!(m, Members::Many(_)));

        // Replacing an existing key reports the previous sphere.
        let old = m.put(2, s(0.5)).expect("key 2 present");
        assert_eq!(old.radius, 3.0);
        assert_eq!(m.max_radius(), 1.0);

        assert!(m.remove(&1).is_some());
        assert!(matches!(m, Members::One(2, _)));
        assert_eq!(m.get(&2).expect("key 2 present").radius, 0.5);
        assert!(m.get(&1).is_none());
    }

    #[test]
    fn enclosing_radius_covers_corner_spheres() {
        let mut b = branch();
        b.max_radius = 2.5;
        // A corner is half * √3 away from the center.
        let corner = b.center + DVec3::splat(b.half);
        let reach = (corner - b.center).length_squared();
        assert!(b.enclosing_radius() * b.enclosing_radius() >= reach);
        assert!(b.enclosing_radius() >= b.half * SQRT_3 + 2.5);
    }
}
