/*!
Octree broad-phase.

A recursive spatial index over world-space bounds. The whole tree is rebuilt
from scratch every physics update rather than maintained incrementally: the
rebuild is cheap at the entity counts this core targets and it removes all
stale-removal bookkeeping.

# Model
- A node is either a leaf holding items directly or an interior node with
  exactly 8 children, never both.
- A node splits only when it holds more than `max_objects` items and is above
  `max_depth`.
- All overlap tests are inclusive: an item exactly on a split plane is stored
  in both adjoining children.
- Items straddling a split boundary are stored in every overlapping child, so
  `query` can return the same item more than once. Callers tolerate or
  deduplicate redundant pairs.
*/

use super::shapes::Aabb;
use super::types::Vec3;
use crate::settings::{OCTREE_MAX_DEPTH, OCTREE_MAX_OBJECTS};
use crate::world::EntityId;

/// A stored candidate: world-space bounds plus the opaque entity handle.
/// Handles (not references) keep the tree free of ownership cycles with the
/// entity arena.
#[derive(Clone, Copy, Debug)]
pub struct OctreeItem {
    pub bounds: Aabb,
    pub entity: EntityId,
}

/// One octree node; the root doubles as the tree's public handle.
#[derive(Debug)]
pub struct Octree {
    bounds: Aabb,
    max_objects: usize,
    max_depth: u32,
    depth: u32,
    objects: Vec<OctreeItem>,
    children: Option<Box<[Octree; 8]>>,
}

impl Octree {
    /// Root node over `bounds` with the default capacity and depth limits.
    pub fn new(bounds: Aabb) -> Self {
        Self::with_limits(bounds, OCTREE_MAX_OBJECTS, OCTREE_MAX_DEPTH)
    }

    pub fn with_limits(bounds: Aabb, max_objects: usize, max_depth: u32) -> Self {
        Self {
            bounds,
            max_objects,
            max_depth,
            depth: 0,
            objects: Vec::new(),
            children: None,
        }
    }

    #[inline]
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Total stored item count. An item straddling a split boundary counts
    /// once per leaf it occupies.
    pub fn len(&self) -> usize {
        let mut count = self.objects.len();
        if let Some(children) = self.children.as_deref() {
            for child in children {
                count += child.len();
            }
        }
        count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store an item. Returns false when the item's bounds do not overlap
    /// this node's bounds (out-of-world entities are silently left out).
    ///
    /// A leaf with room (or at max depth) stores directly; otherwise the node
    /// subdivides and the item goes into every overlapping child.
    pub fn insert(&mut self, item: OctreeItem) -> bool {
        if !self.bounds.intersects(&item.bounds) {
            return false;
        }

        if self.children.is_none() {
            if self.objects.len() < self.max_objects || self.depth >= self.max_depth {
                self.objects.push(item);
                return true;
            }
            self.subdivide();
        }

        self.insert_into_children(item)
    }

    /// Insert into all overlapping children; true if at least one stored it.
    /// No ownership exclusivity: straddling items live in several children.
    fn insert_into_children(&mut self, item: OctreeItem) -> bool {
        let mut inserted = false;
        if let Some(children) = self.children.as_deref_mut() {
            for child in children {
                if child.insert(item) {
                    inserted = true;
                }
            }
        }
        inserted
    }

    /// Split into 8 octants at the midpoint and redistribute held items.
    /// Octant index bits select the halves: bit0 = upper X, bit1 = upper Y,
    /// bit2 = upper Z.
    fn subdivide(&mut self) {
        let min = self.bounds.min;
        let max = self.bounds.max;
        let center = self.bounds.center();

        let children = std::array::from_fn(|octant| {
            let child_min = Vec3::new(
                if octant & 1 != 0 { center.x } else { min.x },
                if octant & 2 != 0 { center.y } else { min.y },
                if octant & 4 != 0 { center.z } else { min.z },
            );
            let child_max = Vec3::new(
                if octant & 1 != 0 { max.x } else { center.x },
                if octant & 2 != 0 { max.y } else { center.y },
                if octant & 4 != 0 { max.z } else { center.z },
            );
            let mut child =
                Octree::with_limits(Aabb::new(child_min, child_max), self.max_objects, self.max_depth);
            child.depth = self.depth + 1;
            child
        });
        self.children = Some(Box::new(children));

        // After a split the node holds children XOR objects, never both.
        let held = std::mem::take(&mut self.objects);
        for item in held {
            self.insert_into_children(item);
        }
    }

    /// All stored items whose bounds overlap `bounds`. No deduplication.
    pub fn query(&self, bounds: &Aabb) -> Vec<OctreeItem> {
        let mut out = Vec::new();
        self.query_into(bounds, &mut out);
        out
    }

    /// Allocation-reusing variant of [`Octree::query`]; appends to `out`.
    pub fn query_into(&self, bounds: &Aabb, out: &mut Vec<OctreeItem>) {
        if !self.bounds.intersects(bounds) {
            return;
        }

        for item in &self.objects {
            if bounds.intersects(&item.bounds) {
                out.push(*item);
            }
        }

        if let Some(children) = self.children.as_deref() {
            for child in children {
                child.query_into(bounds, out);
            }
        }
    }

    /// Drop all items and children, returning the node to an empty leaf.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.children = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::EntityId;

    fn cube(center: Vec3, half: f32) -> Aabb {
        Aabb::new(center - Vec3::repeat(half), center + Vec3::repeat(half))
    }

    fn item(index: u32, center: Vec3, half: f32) -> OctreeItem {
        OctreeItem {
            bounds: cube(center, half),
            entity: EntityId::from_index(index),
        }
    }

    fn test_tree() -> Octree {
        Octree::with_limits(Aabb::centered_cube(10.0), 4, 3)
    }

    #[test]
    fn stays_a_leaf_at_or_below_capacity() {
        let mut tree = test_tree();
        for i in 0..4 {
            assert!(tree.insert(item(i, Vec3::new(i as f32 - 2.0, 0.0, 0.0), 0.25)));
        }
        assert!(tree.is_leaf());
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn splits_when_capacity_exceeded() {
        let mut tree = test_tree();
        // Five items in five distinct octants, none touching a split plane:
        // the root splits once and each lands in exactly one child.
        let centers = [
            Vec3::new(5.0, 5.0, 5.0),
            Vec3::new(-5.0, 5.0, 5.0),
            Vec3::new(5.0, -5.0, 5.0),
            Vec3::new(5.0, 5.0, -5.0),
            Vec3::new(-5.0, -5.0, -5.0),
        ];
        for (i, center) in centers.iter().enumerate() {
            assert!(tree.insert(item(i as u32, *center, 0.5)));
        }
        assert!(!tree.is_leaf());
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn rejects_items_outside_node_bounds() {
        let mut tree = test_tree();
        assert!(!tree.insert(item(0, Vec3::new(100.0, 0.0, 0.0), 1.0)));
        assert!(tree.is_empty());
    }

    #[test]
    fn disjoint_query_returns_nothing() {
        let mut tree = test_tree();
        tree.insert(item(0, Vec3::zeros(), 1.0));
        let far = cube(Vec3::new(500.0, 0.0, 0.0), 1.0);
        assert!(tree.query(&far).is_empty());
    }

    #[test]
    fn query_finds_overlapping_items_only() {
        let mut tree = test_tree();
        tree.insert(item(0, Vec3::new(-5.0, 0.0, 0.0), 1.0));
        tree.insert(item(1, Vec3::new(5.0, 0.0, 0.0), 1.0));

        let hits = tree.query(&cube(Vec3::new(5.0, 0.0, 0.0), 2.0));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].entity, EntityId::from_index(1));
    }

    #[test]
    fn straddling_item_is_returned_once_per_leaf() {
        let mut tree = test_tree();
        // Force a split with items confined to the +X/+Y/+Z octant.
        for i in 0..5 {
            tree.insert(item(i, Vec3::new(5.0, 5.0, 5.0 + 0.1 * i as f32), 0.05));
        }
        // This item sits on the split planes and lands in every child.
        tree.insert(item(99, Vec3::zeros(), 0.5));

        let hits = tree.query(&cube(Vec3::zeros(), 0.6));
        assert_eq!(hits.len(), 8);
        assert!(hits.iter().all(|h| h.entity == EntityId::from_index(99)));
    }

    #[test]
    fn clear_returns_tree_to_empty_leaf() {
        let mut tree = test_tree();
        for i in 0..10 {
            tree.insert(item(i, Vec3::new(5.0, 5.0, 0.1 * i as f32), 0.05));
        }
        assert!(!tree.is_leaf());
        tree.clear();
        assert!(tree.is_leaf());
        assert!(tree.is_empty());
    }

    #[test]
    fn depth_limit_stops_subdivision() {
        let mut tree = Octree::with_limits(Aabb::centered_cube(10.0), 1, 1);
        // All items in the same octant; depth 1 nodes must hold them all
        // directly instead of splitting further.
        for i in 0..8 {
            assert!(tree.insert(item(i, Vec3::new(5.0, 5.0, 5.0), 0.1)));
        }
        assert_eq!(tree.len(), 8);
    }
}
