// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The octree: incremental maintenance and prunable queries.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use glam::DVec3;
use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::octant::{Members, Octant, OctantId, OctantKind};
use crate::types::{Ray, Sphere, snap_to_grid};

/// Slack added to computed root half-widths so seed points land strictly
/// inside the cube rather than exactly on a face.
const HALF_EPSILON: f64 = 1e-8;

/// A dynamic spatial index over keyed bounding spheres.
///
/// Spheres are upserted with [`SphereOctree::insert`], removed with
/// [`SphereOctree::remove`], and queried with [`SphereOctree::visit_ray`] /
/// [`SphereOctree::visit_overlapping`]. Each mutation touches only the path
/// between the root and the affected leaf, so the tree is cheap to keep in
/// sync with a scene where bounds change every frame.
///
/// Keys are opaque: any small copyable key type works (entity ids, handles,
/// integers). Spheres whose snapped centers agree share one leaf; see
/// [`COINCIDENCE_SNAP`][crate::COINCIDENCE_SNAP].
pub struct SphereOctree<K> {
    /// Arena slots. The tree structure is the sole owner of nodes; ids held
    /// in `root`, child arrays, and `index` are non-owning references.
    nodes: Vec<Option<Octant<K>>>,
    free_list: Vec<OctantId>,
    root: Option<OctantId>,
    /// Key → containing leaf, kept in sync with every structural change.
    index: HashMap<K, OctantId>,
}

impl<K> Debug for SphereOctree<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("SphereOctree")
            .field("spheres", &self.index.len())
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl<K> Default for SphereOctree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> SphereOctree<K> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free_list: Vec::new(),
            root: None,
            index: HashMap::new(),
        }
    }

    /// Number of spheres currently stored.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the tree holds no spheres.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Remove every sphere and drop the tree.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
        self.root = None;
        self.index.clear();
    }

    fn node(&self, id: OctantId) -> &Octant<K> {
        self.nodes[id]
            .as_ref()
            .expect("octree invariant violated: dangling octant id")
    }

    fn node_mut(&mut self, id: OctantId) -> &mut Octant<K> {
        self.nodes[id]
            .as_mut()
            .expect("octree invariant violated: dangling octant id")
    }
}

impl<K: Copy + Eq + Hash + Debug> SphereOctree<K> {
    /// Insert or update the bounding sphere for `key`.
    ///
    /// Safe to call whenever a tracked object's bounds *may* have changed,
    /// including unchanged resubmission. A sphere whose radius or center is
    /// not finite is rejected: nothing is mutated and a warning is logged.
    pub fn insert(&mut self, key: K, sphere: Sphere) {
        if !sphere.is_finite() {
            log::warn!("ignoring sphere with non-finite bounds for key {key:?}");
            return;
        }
        let point = snap_to_grid(sphere.center);
        if self.index.contains_key(&key) {
            self.update_existing(key, sphere, point);
            return;
        }
        let Some(root) = self.root else {
            let id = self.alloc(Octant::leaf(point, key, sphere));
            self.root = Some(id);
            self.index.insert(key, id);
            return;
        };
        let root_leaf_point = match &self.node(root).kind {
            OctantKind::Leaf { point, .. } => Some(*point),
            OctantKind::Branch { .. } => None,
        };
        match root_leaf_point {
            Some(existing) if existing == point => self.add_member(root, key, sphere),
            Some(_) => {
                let branch = self.grow_root_over(root, point);
                self.insert_at(branch, key, sphere, point);
            }
            None => {
                let mut top = root;
                while !self.node(top).contains(point) {
                    top = self.expand_root(point);
                }
                self.insert_at(top, key, sphere, point);
            }
        }
    }

    /// Insert or update many spheres. Equivalent to calling
    /// [`SphereOctree::insert`] once per entry.
    pub fn insert_many<I: IntoIterator<Item = (K, Sphere)>>(&mut self, spheres: I) {
        for (key, sphere) in spheres {
            self.insert(key, sphere);
        }
    }

    /// Remove the sphere stored for `key`. Unknown keys are ignored.
    pub fn remove(&mut self, key: K) {
        let Some(&leaf_id) = self.index.get(&key) else {
            return;
        };
        // Every ancestor loses one sphere regardless of what happens to the
        // leaf itself.
        let mut at = self.node(leaf_id).parent;
        while let Some(id) = at {
            let node = self.node_mut(id);
            node.sphere_count -= 1;
            at = node.parent;
        }

        let member_count = match &self.node(leaf_id).kind {
            OctantKind::Leaf { members, .. } => members.len(),
            OctantKind::Branch { .. } => {
                unreachable!("octree invariant violated: index entry points at a branch")
            }
        };
        if member_count > 1 {
            let node = self.node_mut(leaf_id);
            let OctantKind::Leaf { members, .. } = &mut node.kind else {
                unreachable!("shape checked above");
            };
            members.remove(&key);
            node.sphere_count -= 1;
            self.refresh_max_radius(leaf_id);
            self.index.remove(&key);
            return;
        }

        // Last member: the leaf itself goes away.
        let removed = self.free(leaf_id);
        let Some(parent) = removed.parent else {
            self.root = None;
            self.index.remove(&key);
            return;
        };
        self.set_child(parent, removed.slot as usize, None);

        // Drop any ancestor branches emptied by the detachment.
        let mut survivor = parent;
        while self.node(survivor).sphere_count == 0 {
            let empty = self.free(survivor);
            match empty.parent {
                Some(up) => {
                    self.set_child(up, empty.slot as usize, None);
                    survivor = up;
                }
                None => {
                    self.root = None;
                    self.index.remove(&key);
                    return;
                }
            }
        }

        // The removed leaf is gone from every surviving ancestor's subtree;
        // account for it and remember the highest ancestor left with a single
        // descendant leaf.
        let mut collapse = None;
        let mut at = Some(survivor);
        while let Some(id) = at {
            let node = self.node_mut(id);
            node.leaf_count -= 1;
            if node.leaf_count == 1 {
                collapse = Some(id);
            }
            at = node.parent;
        }
        match collapse {
            Some(ancestor) => self.collapse_into_leaf(ancestor),
            None => self.refresh_max_radius(survivor),
        }
        self.index.remove(&key);
    }

    /// Look up the sphere stored for `key`.
    pub fn get(&self, key: &K) -> Option<&Sphere> {
        let leaf_id = *self.index.get(key)?;
        match &self.node(leaf_id).kind {
            OctantKind::Leaf { members, .. } => members.get(key),
            OctantKind::Branch { .. } => {
                unreachable!("octree invariant violated: index entry points at a branch")
            }
        }
    }

    /// Whether a sphere is stored for `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Depth-first, pre-order traversal with pruning.
    ///
    /// Parents are visited before children. Returning `false` from the
    /// callback when visiting a branch skips that branch's children; return
    /// values for leaves are ignored since they have no children.
    pub fn walk<F: FnMut(OctantView<'_, K>) -> bool>(&self, mut visit: F) {
        let Some(root) = self.root else {
            return;
        };
        let mut stack: SmallVec<[OctantId; 32]> = SmallVec::new();
        stack.push(root);
        while let Some(id) = stack.pop() {
            let descend = visit(OctantView { tree: self, id });
            if descend && let OctantKind::Branch { children } = &self.node(id).kind {
                // `.rev()` so children pop in slot order.
                for &child in children.iter().rev().flatten() {
                    stack.push(child);
                }
            }
        }
    }

    /// Invoke `visitor` with `(key, sphere)` for every stored sphere that
    /// `hit` reports as intersecting `ray`.
    ///
    /// `hit` is the precise ray–sphere test, injected by the caller (see the
    /// `canopy_hit` crate). It is also applied to conservative enclosing
    /// spheres at branches to prune the descent, so it must be a true
    /// intersection test rather than an arbitrary filter.
    pub fn visit_ray<P, F>(&self, ray: &Ray, mut hit: P, mut visitor: F)
    where
        P: FnMut(&Ray, &Sphere) -> bool,
        F: FnMut(K, &Sphere),
    {
        self.visit_matching(|sphere| hit(ray, sphere), &mut visitor);
    }

    /// Invoke `visitor` with `(key, sphere)` for every stored sphere that
    /// `overlaps` reports as intersecting `query`.
    ///
    /// The same pruning contract as [`SphereOctree::visit_ray`] applies.
    pub fn visit_overlapping<P, F>(&self, query: &Sphere, mut overlaps: P, mut visitor: F)
    where
        P: FnMut(&Sphere, &Sphere) -> bool,
        F: FnMut(K, &Sphere),
    {
        self.visit_matching(|sphere| overlaps(query, sphere), &mut visitor);
    }

    /// Shared query driver: precise tests at leaf members, conservative
    /// enclosing-sphere tests at branches. Never misses a true intersection;
    /// branch-level false positives are filtered out at the leaves.
    fn visit_matching<P, F>(&self, mut matches: P, visitor: &mut F)
    where
        P: FnMut(&Sphere) -> bool,
        F: FnMut(K, &Sphere),
    {
        self.walk(|octant| {
            if octant.is_leaf() {
                for (key, sphere) in octant.members() {
                    if matches(sphere) {
                        visitor(key, sphere);
                    }
                }
                true
            } else {
                matches(&octant.enclosing_sphere())
            }
        });
    }

    // --- internals ---

    fn alloc(&mut self, octant: Octant<K>) -> OctantId {
        if let Some(id) = self.free_list.pop() {
            self.nodes[id] = Some(octant);
            id
        } else {
            self.nodes.push(Some(octant));
            self.nodes.len() - 1
        }
    }

    fn free(&mut self, id: OctantId) -> Octant<K> {
        let octant = self.nodes[id]
            .take()
            .expect("octree invariant violated: freeing a vacant slot");
        self.free_list.push(id);
        octant
    }

    fn set_child(&mut self, branch_id: OctantId, slot: usize, child: Option<OctantId>) {
        let OctantKind::Branch { children } = &mut self.node_mut(branch_id).kind else {
            unreachable!("octree invariant violated: child slot on a leaf");
        };
        children[slot] = child;
    }

    /// Link an existing node under `branch_id` in the slot implied by
    /// `point`, assigning it that slot's child-cube bounds.
    fn attach_child(&mut self, branch_id: OctantId, child_id: OctantId, point: DVec3) {
        let branch = self.node(branch_id);
        let slot = branch.child_slot(point);
        let center = branch.child_center(slot);
        let half = branch.half * 0.5;
        let child = self.node_mut(child_id);
        child.center = center;
        child.half = half;
        child.parent = Some(branch_id);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "child slots are 0..8 by construction"
        )]
        {
            child.slot = slot as u8;
        }
        let OctantKind::Branch { children } = &mut self.node_mut(branch_id).kind else {
            unreachable!("octree invariant violated: attaching under a leaf");
        };
        debug_assert!(children[slot].is_none(), "child slot already occupied");
        children[slot] = Some(child_id);
    }

    /// Descend from `start` (which must contain `point`) and place the
    /// sphere, splitting leaves and creating child leaves as needed.
    fn insert_at(&mut self, start: OctantId, key: K, sphere: Sphere, point: DVec3) {
        let mut id = start;
        loop {
            let node = self.node(id);
            match &node.kind {
                OctantKind::Leaf { point: leaf_point, .. } => {
                    if *leaf_point == point {
                        self.add_member(id, key, sphere);
                        return;
                    }
                    id = self.split_leaf(id);
                }
                OctantKind::Branch { children } => {
                    let slot = node.child_slot(point);
                    let child = children[slot];
                    self.node_mut(id).sphere_count += 1;
                    match child {
                        Some(next) => id = next,
                        None => {
                            let leaf = self.alloc(Octant::leaf(point, key, sphere));
                            self.attach_child(id, leaf, point);
                            self.index.insert(key, leaf);
                            self.bump_leaf_count(id);
                            self.raise_max_radius(Some(id), sphere.radius);
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Add a fresh key to an existing leaf whose snapped center matches.
    fn add_member(&mut self, leaf_id: OctantId, key: K, sphere: Sphere) {
        let radius = sphere.radius;
        let node = self.node_mut(leaf_id);
        let OctantKind::Leaf { members, .. } = &mut node.kind else {
            unreachable!("octree invariant violated: adding a member to a branch");
        };
        let previous = members.put(key, sphere);
        debug_assert!(previous.is_none(), "fresh keys must not already be members");
        node.sphere_count += 1;
        let parent = node.parent;
        if radius > node.max_radius {
            node.max_radius = radius;
            self.raise_max_radius(parent, radius);
        }
        self.index.insert(key, leaf_id);
    }

    /// Replace a leaf with a branch occupying the same cube and parent slot,
    /// reattaching the leaf as the child implied by its snapped center.
    /// Counts are untouched; the caller resumes insertion into the branch.
    fn split_leaf(&mut self, leaf_id: OctantId) -> OctantId {
        let leaf = self.node(leaf_id);
        let OctantKind::Leaf { point, .. } = leaf.kind else {
            unreachable!("octree invariant violated: splitting a branch");
        };
        let (center, half) = (leaf.center, leaf.half);
        let (parent, slot) = (leaf.parent, leaf.slot);
        let (sphere_count, leaf_count, max_radius) =
            (leaf.sphere_count, leaf.leaf_count, leaf.max_radius);
        let branch = self.alloc(Octant {
            center,
            half,
            parent,
            slot,
            sphere_count,
            leaf_count,
            max_radius,
            kind: OctantKind::Branch {
                children: [None; 8],
            },
        });
        match parent {
            Some(up) => self.set_child(up, slot as usize, Some(branch)),
            None => self.root = Some(branch),
        }
        self.attach_child(branch, leaf_id, point);
        branch
    }

    /// Replace a leaf root with a branch sized for both the leaf's point and
    /// a new, distinct point: the smallest cube centered at their snapped
    /// midpoint whose half-width is the ceiling of the larger per-axis
    /// offset, padded so neither point sits exactly on a face.
    fn grow_root_over(&mut self, leaf_id: OctantId, point: DVec3) -> OctantId {
        let leaf = self.node(leaf_id);
        let OctantKind::Leaf { point: leaf_point, .. } = leaf.kind else {
            unreachable!("octree invariant violated: growing over a branch root");
        };
        let mid = snap_to_grid((leaf_point + point) * 0.5);
        let spread = (leaf_point - mid).abs().max((point - mid).abs());
        let half = spread.ceil().max_element() + HALF_EPSILON;
        let (sphere_count, leaf_count, max_radius) =
            (leaf.sphere_count, leaf.leaf_count, leaf.max_radius);
        let branch = self.alloc(Octant {
            center: mid,
            half,
            parent: None,
            slot: 0,
            sphere_count,
            leaf_count,
            max_radius,
            kind: OctantKind::Branch {
                children: [None; 8],
            },
        });
        self.attach_child(branch, leaf_id, leaf_point);
        self.root = Some(branch);
        branch
    }

    /// Double the root cube toward `point`, making the old root the child in
    /// the corner where it already sits. The old root keeps its exact bounds.
    fn expand_root(&mut self, point: DVec3) -> OctantId {
        let old_id = self.root.expect("expand_root requires a root");
        let old = self.node(old_id);
        let step = old.half;
        let old_center = old.center;
        let center = DVec3::new(
            if point.x >= old_center.x { old_center.x + step } else { old_center.x - step },
            if point.y >= old_center.y { old_center.y + step } else { old_center.y - step },
            if point.z >= old_center.z { old_center.z + step } else { old_center.z - step },
        );
        let (sphere_count, leaf_count, max_radius) =
            (old.sphere_count, old.leaf_count, old.max_radius);
        let branch = self.alloc(Octant {
            center,
            half: step * 2.0,
            parent: None,
            slot: 0,
            sphere_count,
            leaf_count,
            max_radius,
            kind: OctantKind::Branch {
                children: [None; 8],
            },
        });
        let slot = self.node(branch).child_slot(old_center);
        let old_node = self.node_mut(old_id);
        old_node.parent = Some(branch);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "child slots are 0..8 by construction"
        )]
        {
            old_node.slot = slot as u8;
        }
        self.set_child(branch, slot, Some(old_id));
        self.root = Some(branch);
        branch
    }

    /// Re-submission of a key that is already indexed.
    fn update_existing(&mut self, key: K, sphere: Sphere, point: DVec3) {
        let leaf_id = *self
            .index
            .get(&key)
            .expect("octree invariant violated: update target not indexed");
        if !self.node(leaf_id).contains(point) {
            // The snapped center left the leaf's cube; rebuild from the top.
            self.remove(key);
            self.insert(key, sphere);
            return;
        }
        let (member_count, leaf_point) = match &self.node(leaf_id).kind {
            OctantKind::Leaf { point, members } => (members.len(), *point),
            OctantKind::Branch { .. } => {
                unreachable!("octree invariant violated: index entry points at a branch")
            }
        };
        if member_count > 1 && leaf_point != point {
            // The member no longer coincides with its leaf: extract it and
            // re-place it below the leaf's position, which splits the leaf.
            let node = self.node_mut(leaf_id);
            let OctantKind::Leaf { members, .. } = &mut node.kind else {
                unreachable!("shape checked above");
            };
            let extracted = members.remove(&key);
            debug_assert!(extracted.is_some(), "indexed member missing from its leaf");
            node.sphere_count -= 1;
            self.refresh_max_radius(leaf_id);
            self.insert_at(leaf_id, key, sphere, point);
            return;
        }
        // In place: move the shared center and store the new sphere.
        let node = self.node_mut(leaf_id);
        let OctantKind::Leaf { point: stored, members } = &mut node.kind else {
            unreachable!("shape checked above");
        };
        *stored = point;
        let previous = members
            .put(key, sphere)
            .expect("octree invariant violated: indexed member missing from its leaf");
        if previous.radius != sphere.radius {
            self.refresh_max_radius(leaf_id);
        }
    }

    /// Add one to `leaf_count` at `id` and every ancestor.
    fn bump_leaf_count(&mut self, id: OctantId) {
        let mut at = Some(id);
        while let Some(cur) = at {
            let node = self.node_mut(cur);
            node.leaf_count += 1;
            at = node.parent;
        }
    }

    /// Propagate a radius increase upward starting at `at`, stopping at the
    /// first node whose stored maximum already covers it.
    fn raise_max_radius(&mut self, mut at: Option<OctantId>, radius: f64) {
        while let Some(id) = at {
            let node = self.node_mut(id);
            if node.max_radius >= radius {
                break;
            }
            node.max_radius = radius;
            at = node.parent;
        }
    }

    /// Recompute `max_radius` at `id` from its members or children and
    /// reconcile ancestors. An increase propagates cheaply upward; a decrease
    /// forces fresh aggregation at each ancestor in turn, since the dropped
    /// value may have been the unique maximum.
    fn refresh_max_radius(&mut self, id: OctantId) {
        let mut at = Some(id);
        while let Some(cur) = at {
            let fresh = self.aggregate_max_radius(cur);
            let node = self.node_mut(cur);
            if fresh > node.max_radius {
                node.max_radius = fresh;
                let parent = node.parent;
                self.raise_max_radius(parent, fresh);
                return;
            }
            if fresh == node.max_radius {
                return;
            }
            node.max_radius = fresh;
            at = node.parent;
        }
    }

    fn aggregate_max_radius(&self, id: OctantId) -> f64 {
        match &self.node(id).kind {
            OctantKind::Leaf { members, .. } => members.max_radius(),
            OctantKind::Branch { children } => children
                .iter()
                .flatten()
                .fold(0.0, |acc, &child| acc.max(self.node(child).max_radius)),
        }
    }

    /// Splice the sole remaining descendant leaf of `ancestor` into the
    /// ancestor's position, dropping the chain of single-child branches
    /// between them. The leaf adopts the ancestor's cube, parent, and slot.
    fn collapse_into_leaf(&mut self, ancestor: OctantId) {
        let sole = self.sole_descendant_leaf(ancestor);
        let mut at = self.node(sole).parent;
        loop {
            let id = at.expect("octree invariant violated: collapse walked past the root");
            let branch = self.free(id);
            at = branch.parent;
            if id != ancestor {
                continue;
            }
            let leaf = self.node_mut(sole);
            leaf.center = branch.center;
            leaf.half = branch.half;
            leaf.parent = branch.parent;
            leaf.slot = branch.slot;
            match branch.parent {
                Some(up) => {
                    self.set_child(up, branch.slot as usize, Some(sole));
                    self.refresh_max_radius(up);
                }
                None => self.root = Some(sole),
            }
            return;
        }
    }

    /// The only leaf in `id`'s subtree. Callers guarantee `leaf_count == 1`,
    /// so this is a plain descent through single-child branches.
    fn sole_descendant_leaf(&self, id: OctantId) -> OctantId {
        match &self.node(id).kind {
            OctantKind::Leaf { .. } => id,
            OctantKind::Branch { children } => {
                let child = children
                    .iter()
                    .flatten()
                    .next()
                    .expect("octree invariant violated: branch with no children");
                self.sole_descendant_leaf(*child)
            }
        }
    }
}

/// Read-only view of one octant handed to [`SphereOctree::walk`] callbacks.
#[derive(Clone, Copy)]
pub struct OctantView<'a, K> {
    tree: &'a SphereOctree<K>,
    id: OctantId,
}

impl<K> Debug for OctantView<'_, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let node = self.tree.node(self.id);
        f.debug_struct("OctantView")
            .field("center", &node.center)
            .field("half", &node.half)
            .field("sphere_count", &node.sphere_count)
            .field("leaf_count", &node.leaf_count)
            .field("max_radius", &node.max_radius)
            .field("is_leaf", &node.is_leaf())
            .finish_non_exhaustive()
    }
}

impl<'a, K: Copy + Eq + Hash + Debug> OctantView<'a, K> {
    /// Cube center.
    pub fn center(&self) -> DVec3 {
        self.tree.node(self.id).center
    }

    /// Cube half-width (center-to-face distance).
    pub fn half_width(&self) -> f64 {
        self.tree.node(self.id).half
    }

    /// Total spheres stored in this subtree.
    pub fn sphere_count(&self) -> usize {
        self.tree.node(self.id).sphere_count
    }

    /// Total leaves in this subtree (1 if this is a leaf).
    pub fn leaf_count(&self) -> usize {
        self.tree.node(self.id).leaf_count
    }

    /// Largest sphere radius anywhere in this subtree.
    pub fn max_radius(&self) -> f64 {
        self.tree.node(self.id).max_radius
    }

    /// Whether this octant is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.tree.node(self.id).is_leaf()
    }

    /// Shared snapped center of a leaf's members; `None` for branches.
    pub fn leaf_point(&self) -> Option<DVec3> {
        match &self.tree.node(self.id).kind {
            OctantKind::Leaf { point, .. } => Some(*point),
            OctantKind::Branch { .. } => None,
        }
    }

    /// Iterate a leaf's `(key, sphere)` members; empty for branches.
    pub fn members(&self) -> impl Iterator<Item = (K, &'a Sphere)> + 'a {
        let tree = self.tree;
        let members = match &tree.node(self.id).kind {
            OctantKind::Leaf { members, .. } => Some(members),
            OctantKind::Branch { .. } => None,
        };
        let (one, many) = match members {
            Some(Members::One(key, sphere)) => (Some((*key, sphere)), None),
            Some(Members::Many(map)) => (None, Some(map.iter())),
            None => (None, None),
        };
        one.into_iter()
            .chain(many.into_iter().flatten().map(|(key, sphere)| (*key, sphere)))
    }

    /// Conservative sphere guaranteed to enclose every sphere stored in this
    /// subtree: the cube's half-diagonal plus the subtree's largest radius.
    pub fn enclosing_sphere(&self) -> Sphere {
        let node = self.tree.node(self.id);
        Sphere::new(node.center, node.enclosing_radius())
    }
}
