/*!
Real-time rigid-body physics core.

This crate advances object motion under forces, detects overlaps between
simple shapes, and resolves contacts so bodies do not interpenetrate. The
pieces, leaves first:

- `collision::shapes`:   AABB / bounding-sphere value types and the
                         narrow-phase overlap tests
- `collision::octree`:   broad-phase spatial index, rebuilt every frame
- `collision::resolver`: positional correction + impulse + Coulomb friction
- `body`:                per-entity linear dynamics (semi-implicit Euler)
- `world`:               entity arena with typed component slots
- `system`:              fixed-timestep orchestrator (`PhysicsSystem::update`)

The core is single-threaded and synchronous: one `update` call runs the whole
tick to completion, driven by an externally owned frame loop. Entities are
processed in spawn order, which makes collision-pair sign conventions (and
therefore results) reproducible.
*/

pub mod body;
pub mod collision;
pub mod error;
pub mod settings;
pub mod system;
pub mod world;

pub use body::RigidBody;
pub use collision::{Aabb, BoundingSphere, Contact, Octree, OctreeItem, Participant, Shape, Vec3};
pub use error::PhysicsError;
pub use system::PhysicsSystem;
pub use world::{CollisionCallback, Entity, EntityId, World};
