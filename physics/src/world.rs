/*!
Entity arena consumed by the physics orchestrator.

This is the core's view of the scene collaborator: an ordered sequence of
entities, each exposing a world position, local-space bounds, an optional
collision shape, an optional rigid body, and an optional collision callback.
Components live in typed slots rather than string-keyed maps, so access is
checked at compile time.

Entities are identified by stable indices into the arena ([`EntityId`]), not
by references, which keeps the octree free of ownership cycles. Iteration is
always in spawn order; that order decides which side of a colliding pair is
"A" and therefore the sign conventions during resolution, so it must stay
deterministic for reproducible results.
*/

use crate::body::RigidBody;
use crate::collision::{Aabb, Shape, Vec3};

/// Stable handle for an entity: its spawn index in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityId(u32);

impl EntityId {
    #[inline]
    pub fn from_index(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Invoked with `(self, other)` once per detected overlapping pair occurrence.
/// This is the only hook the scripting collaborator gets into the core.
pub type CollisionCallback = Box<dyn FnMut(EntityId, EntityId)>;

/// One simulated entity. An entity participates in physics when it carries a
/// shape or a rigid body; a missing component downgrades the affected check
/// ("no collision" / "no integration") instead of failing.
pub struct Entity {
    /// World position; the physics core is its single writer during a tick.
    pub position: Vec3,
    /// Local-space bounds, translated by `position` for broad-phase queries.
    pub bounds: Aabb,
    pub shape: Option<Shape>,
    pub body: Option<RigidBody>,
    pub on_collision: Option<CollisionCallback>,
}

impl Entity {
    pub fn new(position: Vec3, bounds: Aabb) -> Self {
        Self {
            position,
            bounds,
            shape: None,
            body: None,
            on_collision: None,
        }
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn with_body(mut self, body: RigidBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_on_collision(mut self, callback: CollisionCallback) -> Self {
        self.on_collision = Some(callback);
        self
    }

    /// Current world-space bounds (translation only, no rotation/scale).
    #[inline]
    pub fn world_bounds(&self) -> Aabb {
        self.bounds.translated(self.position)
    }
}

/// Append-only arena of entities, iterated in spawn order.
#[derive(Default)]
pub struct World {
    entities: Vec<Entity>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = EntityId(self.entities.len() as u32);
        self.entities.push(entity);
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entity handles in spawn order. The iterator borrows nothing, so the
    /// world can be mutated while walking it.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + use<> {
        (0..self.entities.len() as u32).map(EntityId)
    }

    #[inline]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.index())
    }

    /// Mutable access to two distinct entities at once, for the resolver.
    /// Returns `None` for identical or out-of-range ids.
    pub fn pair_mut(&mut self, a: EntityId, b: EntityId) -> Option<(&mut Entity, &mut Entity)> {
        let (ai, bi) = (a.index(), b.index());
        if ai == bi || ai >= self.entities.len() || bi >= self.entities.len() {
            return None;
        }
        if ai < bi {
            let (left, right) = self.entities.split_at_mut(bi);
            Some((&mut left[ai], &mut right[0]))
        } else {
            let (left, right) = self.entities.split_at_mut(ai);
            Some((&mut right[0], &mut left[bi]))
        }
    }
}
