/*!
Narrow-phase contact resolution.

Given a [`Contact`] between two bodies, resolution runs three steps in order:
positional correction, a restitution impulse along the contact normal, and a
Coulomb-cone friction impulse along the tangent. All mutation is in place;
callback dispatch is the orchestrator's job.

Two quirks of this model are deliberate (see DESIGN.md before changing them):

- Position correction always moves each non-kinematic body by half the
  penetration, independent of whether the other body is kinematic. A
  dynamic/kinematic pair is therefore only corrected by half the overlap.
- Kinematic bodies keep their configured mass in the impulse denominator
  rather than acting as true infinite mass; they just skip the velocity
  application.
*/

use super::types::{Contact, Vec3};
use crate::body::RigidBody;
use crate::settings::FRICTION_EPS;

/// One side of a contact: the body plus the world position the correction
/// step writes through (the owning entity's transform).
pub struct Participant<'a> {
    pub body: &'a mut RigidBody,
    pub position: &'a mut Vec3,
}

/// Resolve a single contact between participants A and B.
///
/// `contact.normal` must be the unit direction pushing A out of B. Separating
/// pairs (relative velocity along the normal already positive) receive the
/// position correction but no impulses.
pub fn resolve(contact: &Contact, a: Participant<'_>, b: Participant<'_>) {
    let Participant {
        body: body_a,
        position: pos_a,
    } = a;
    let Participant {
        body: body_b,
        position: pos_b,
    } = b;

    resolve_position(contact, body_a, pos_a, body_b, pos_b);
    resolve_velocity(contact, body_a, body_b);
}

/// Displace each non-kinematic body by half the penetration along the normal.
fn resolve_position(
    contact: &Contact,
    body_a: &RigidBody,
    pos_a: &mut Vec3,
    body_b: &RigidBody,
    pos_b: &mut Vec3,
) {
    let correction = contact.normal * (contact.penetration_depth * 0.5);
    if !body_a.is_kinematic {
        *pos_a += correction;
    }
    if !body_b.is_kinematic {
        *pos_b -= correction;
    }
}

/// Restitution impulse along the normal, then friction along the tangent.
fn resolve_velocity(contact: &Contact, body_a: &mut RigidBody, body_b: &mut RigidBody) {
    let normal = contact.normal;
    let relative = body_a.velocity - body_b.velocity;
    let normal_velocity = relative.dot(&normal);

    // Already separating along the normal: no impulse this step.
    if normal_velocity > 0.0 {
        return;
    }

    let restitution = body_a.restitution.min(body_b.restitution);
    let inv_mass_sum = 1.0 / body_a.mass + 1.0 / body_b.mass;
    let j = -(1.0 + restitution) * normal_velocity / inv_mass_sum;

    if !body_a.is_kinematic {
        body_a.velocity += normal * (j / body_a.mass);
    }
    if !body_b.is_kinematic {
        body_b.velocity -= normal * (j / body_b.mass);
    }

    resolve_friction(contact, body_a, body_b, j, inv_mass_sum);
}

/// Coulomb friction: tangential impulse clamped to the cone `|jt| <= j * mu`.
/// The relative velocity is recomputed after the normal impulse so friction
/// acts on the post-bounce motion.
fn resolve_friction(
    contact: &Contact,
    body_a: &mut RigidBody,
    body_b: &mut RigidBody,
    normal_impulse: f32,
    inv_mass_sum: f32,
) {
    let normal = contact.normal;
    let relative = body_a.velocity - body_b.velocity;

    let mut tangent = relative - normal * relative.dot(&normal);
    let tangent_len = tangent.norm();
    // Below this there is no reliable tangent direction; skip friction.
    if tangent_len <= FRICTION_EPS {
        return;
    }
    tangent /= tangent_len;

    let friction = body_a.friction.min(body_b.friction);
    let max_friction = normal_impulse * friction;
    let jt = (-relative.dot(&tangent) / inv_mass_sum).clamp(-max_friction, max_friction);

    if !body_a.is_kinematic {
        body_a.velocity += tangent * (jt / body_a.mass);
    }
    if !body_b.is_kinematic {
        body_b.velocity -= tangent * (jt / body_b.mass);
    }
}
