/*!
Fixed-timestep physics orchestrator.

`PhysicsSystem::update` is the sole entry point, called once per external
frame with the wall-clock delta. The core never schedules itself; an
externally owned loop drives it.

Per frame:
1. Rebuild the octree from every physics-enabled entity's current world
   bounds — once per `update` call, not once per sub-step.
2. Add the delta to the fixed-step accumulator.
3. Run whole fixed steps while the accumulator allows, carrying the remainder
   to the next frame.

The spatial index is deliberately not refreshed between sub-steps of the same
frame: fast movers may see slightly stale neighbor lists for a few ticks.
That trades accuracy for one rebuild per frame and is part of the contract,
not an oversight to fix in passing.

Fault boundary: the first error inside a fixed step abandons the rest of that
tick's work, is logged, and `update` returns normally. The accumulator keeps
the unspent time, so the next frame proceeds with state intact; skipped work
is not redone.
*/

use crate::collision::{self, Aabb, Octree, OctreeItem};
use crate::error::PhysicsError;
use crate::settings::{FIXED_TIME_STEP, WORLD_HALF_EXTENT};
use crate::world::{EntityId, World};

pub struct PhysicsSystem {
    octree: Octree,
    accumulator: f32,
    fixed_time_step: f32,
    /// Scratch list reused across broad-phase queries.
    candidates: Vec<OctreeItem>,
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsSystem {
    /// System over the default world volume (±`WORLD_HALF_EXTENT` per axis).
    pub fn new() -> Self {
        Self::with_bounds(Aabb::centered_cube(WORLD_HALF_EXTENT))
    }

    /// System over an explicit world volume. Entities outside it are not
    /// inserted into the spatial index and therefore never collide; that is a
    /// documented boundary condition, not an error.
    pub fn with_bounds(world_bounds: Aabb) -> Self {
        Self {
            octree: Octree::new(world_bounds),
            accumulator: 0.0,
            fixed_time_step: FIXED_TIME_STEP,
            candidates: Vec::new(),
        }
    }

    #[inline]
    pub fn fixed_time_step(&self) -> f32 {
        self.fixed_time_step
    }

    /// Advance the simulation by one frame's worth of wall-clock time.
    ///
    /// Any tick fault is absorbed here: it is logged and the call returns
    /// normally so the caller's frame loop continues on the next tick.
    pub fn update(&mut self, world: &mut World, delta_time: f32) {
        if !delta_time.is_finite() || delta_time < 0.0 {
            log::error!(
                "physics update rejected: {}",
                PhysicsError::InvalidTimeStep { dt: delta_time }
            );
            return;
        }

        log::debug!("physics update started (dt={delta_time})");

        self.rebuild_spatial_index(world);

        self.accumulator += delta_time;
        while self.accumulator >= self.fixed_time_step {
            if let Err(err) = self.fixed_step(world, self.fixed_time_step) {
                // The in-progress step is abandoned; its time stays in the
                // accumulator for the next frame.
                log::error!("physics update failed: {err}");
                return;
            }
            self.accumulator -= self.fixed_time_step;
        }

        log::debug!("physics update completed");
    }

    /// Clear and refill the octree from current world-space bounds.
    fn rebuild_spatial_index(&mut self, world: &World) {
        self.octree.clear();
        for id in world.ids() {
            let Some(entity) = world.get(id) else { continue };
            if entity.shape.is_none() && entity.body.is_none() {
                continue;
            }
            // Out-of-world entities are silently left out of the index.
            self.octree.insert(OctreeItem {
                bounds: entity.world_bounds(),
                entity: id,
            });
        }
    }

    /// One fixed tick: candidate checks then integration, entity by entity
    /// in spawn order.
    fn fixed_step(&mut self, world: &mut World, dt: f32) -> Result<(), PhysicsError> {
        for id in world.ids() {
            let Some(entity) = world.get(id) else { continue };
            if entity.shape.is_none() && entity.body.is_none() {
                continue;
            }

            // Configuration guard: a mass that cannot be inverted would turn
            // into NaN inside the resolver and the integrator. Fail the tick
            // instead; `update` absorbs and logs it.
            if let Some(body) = entity.body.as_ref()
                && !body.is_kinematic
                && !(body.mass.is_finite() && body.mass > 0.0)
            {
                return Err(PhysicsError::InvalidMass {
                    entity: id,
                    mass: body.mass,
                });
            }

            // The entity's bounds are current, but the octree contents are
            // from the start of the frame. Straddling items can repeat in the
            // result; the pair test simply runs again.
            let bounds = entity.world_bounds();
            self.candidates.clear();
            self.octree.query_into(&bounds, &mut self.candidates);

            for index in 0..self.candidates.len() {
                let other = self.candidates[index].entity;
                if other != id {
                    check_pair(world, id, other);
                }
            }

            if let Some(entity) = world.get_mut(id)
                && let Some(body) = entity.body.as_mut()
            {
                body.integrate(&mut entity.position, dt);
            }
        }
        Ok(())
    }
}

/// Narrow-phase test for one ordered candidate pair; on overlap, resolve and
/// notify both sides.
fn check_pair(world: &mut World, a: EntityId, b: EntityId) {
    let contact = {
        let (Some(entity_a), Some(entity_b)) = (world.get(a), world.get(b)) else {
            return;
        };
        let (Some(shape_a), Some(shape_b)) = (entity_a.shape.as_ref(), entity_b.shape.as_ref())
        else {
            return;
        };
        match collision::detect(shape_a, entity_a.position, shape_b, entity_b.position) {
            Some(contact) => contact,
            None => return,
        }
    };

    // Resolution needs a rigid body on both sides; detection alone still
    // counts as a collision for callback purposes.
    if let Some((entity_a, entity_b)) = world.pair_mut(a, b)
        && let (Some(body_a), Some(body_b)) = (entity_a.body.as_mut(), entity_b.body.as_mut())
    {
        collision::resolve(
            &contact,
            collision::Participant {
                body: body_a,
                position: &mut entity_a.position,
            },
            collision::Participant {
                body: body_b,
                position: &mut entity_b.position,
            },
        );
    }

    // Notify both participants, each from its own point of view.
    if let Some(entity) = world.get_mut(a)
        && let Some(callback) = entity.on_collision.as_mut()
    {
        callback(a, b);
    }
    if let Some(entity) = world.get_mut(b)
        && let Some(callback) = entity.on_collision.as_mut()
    {
        callback(b, a);
    }
}
