/*!
Shape value types and the narrow-phase overlap tests.

Shapes are immutable value objects expressed in the owning entity's local
space; every test translates them by the entity's current world position
first. No rotation or scale is applied — a known approximation that keeps
boxes axis-aligned.

Only box–box and sphere–sphere pairs are supported. Mixed pairs report no
collision; a mixed-shape narrow-phase is out of scope.
*/

use super::types::{Contact, Vec3};
use crate::settings::DIST_EPS;

/// Axis-aligned bounding box. Invariant: `min <= max` component-wise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[inline]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Symmetric cube of the given half extent, centered at the origin.
    #[inline]
    pub fn centered_cube(half_extent: f32) -> Self {
        Self {
            min: Vec3::repeat(-half_extent),
            max: Vec3::repeat(half_extent),
        }
    }

    /// Min/max reduction over a point cloud. An empty input yields the
    /// degenerate `+inf / -inf` box, which intersects nothing.
    pub fn from_points(points: &[Vec3]) -> Self {
        let mut min = Vec3::repeat(f32::INFINITY);
        let mut max = Vec3::repeat(f32::NEG_INFINITY);
        for p in points {
            min = min.inf(p);
            max = max.sup(p);
        }
        Self { min, max }
    }

    /// Inclusive overlap test: the projections must overlap on all three
    /// axes, and touching faces count as overlap.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// World-space placement of a local box (translation only).
    #[inline]
    pub fn translated(&self, offset: Vec3) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_size(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }
}

/// Sphere given by center and non-negative radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    #[inline]
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Centroid sphere: center = mean of the points, radius = max distance
    /// from that center. This is not the minimal enclosing sphere.
    pub fn from_points(points: &[Vec3]) -> Self {
        if points.is_empty() {
            return Self::new(Vec3::zeros(), 0.0);
        }
        let mut center = Vec3::zeros();
        for p in points {
            center += *p;
        }
        center /= points.len() as f32;

        let mut max_radius_sq = 0.0f32;
        for p in points {
            max_radius_sq = max_radius_sq.max((p - center).norm_squared());
        }
        Self::new(center, max_radius_sq.sqrt())
    }
}

/// Tagged shape variant for the narrow-phase dispatch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Box(Aabb),
    Sphere(BoundingSphere),
}

/// Narrow-phase test between two placed shapes.
///
/// Each shape is local to its owner and placed at the owner's world position
/// before testing. Returns `None` for non-overlapping pairs and for mixed
/// box/sphere pairs (unsupported).
pub fn detect(shape_a: &Shape, pos_a: Vec3, shape_b: &Shape, pos_b: Vec3) -> Option<Contact> {
    match (shape_a, shape_b) {
        (Shape::Box(a), Shape::Box(b)) => {
            detect_box_box(&a.translated(pos_a), &b.translated(pos_b))
        }
        (Shape::Sphere(a), Shape::Sphere(b)) => {
            detect_sphere_sphere(a.center + pos_a, a.radius, b.center + pos_b, b.radius)
        }
        // Mixed-kind pairs are unsupported and never collide.
        (Shape::Box(_), Shape::Sphere(_)) | (Shape::Sphere(_), Shape::Box(_)) => None,
    }
}

/// Box–box contact: the normal is the axis of minimum overlap, signed so it
/// points from B toward A; the depth is that overlap; the point is the center
/// of the overlap region.
fn detect_box_box(a: &Aabb, b: &Aabb) -> Option<Contact> {
    if !a.intersects(b) {
        return None;
    }

    let overlap_min = a.min.sup(&b.min);
    let overlap_max = a.max.inf(&b.max);
    let overlap = overlap_max - overlap_min;

    // Pick the axis we can separate with the least displacement.
    let mut axis = 0;
    if overlap.y < overlap[axis] {
        axis = 1;
    }
    if overlap.z < overlap[axis] {
        axis = 2;
    }

    let delta = a.center() - b.center();
    let mut normal = Vec3::zeros();
    normal[axis] = if delta[axis] >= 0.0 { 1.0 } else { -1.0 };

    Some(Contact {
        normal,
        penetration_depth: overlap[axis],
        point: (overlap_min + overlap_max) * 0.5,
    })
}

/// Sphere–sphere contact. Rejects on squared distances so the common
/// non-overlapping case never takes a square root.
fn detect_sphere_sphere(
    center_a: Vec3,
    radius_a: f32,
    center_b: Vec3,
    radius_b: f32,
) -> Option<Contact> {
    let delta = center_a - center_b;
    let radius_sum = radius_a + radius_b;
    let distance_sq = delta.norm_squared();
    if distance_sq > radius_sum * radius_sum {
        return None;
    }

    let distance = distance_sq.sqrt();
    let normal = if distance > DIST_EPS {
        delta / distance
    } else {
        // Concentric centers give no direction; fall back to +Y.
        Vec3::y()
    };

    // Midpoint of the overlapping surface interval.
    let surface_a = center_a - normal * radius_a;
    let surface_b = center_b + normal * radius_b;

    Some(Contact {
        normal,
        penetration_depth: radius_sum - distance,
        point: (surface_a + surface_b) * 0.5,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aabb_from_points_is_min_max_reduction() {
        let points = [
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::new(-3.0, 4.0, 0.0),
            Vec3::new(2.0, 1.0, -1.0),
        ];
        let aabb = Aabb::from_points(&points);
        assert_eq!(aabb.min, Vec3::new(-3.0, -2.0, -1.0));
        assert_eq!(aabb.max, Vec3::new(2.0, 4.0, 0.5));
    }

    #[test]
    fn aabb_intersects_is_inclusive_at_touching_faces() {
        let a = Aabb::new(Vec3::zeros(), Vec3::repeat(1.0));
        let touching = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        let separated = Aabb::new(Vec3::new(1.001, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(a.intersects(&touching));
        assert!(touching.intersects(&a));
        assert!(!a.intersects(&separated));
    }

    #[test]
    fn sphere_from_points_uses_centroid_and_max_distance() {
        // Centroid of (+2, -2) on X is the origin; farthest point is 2 away.
        let points = [
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(-2.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
        ];
        let sphere = BoundingSphere::from_points(&points);
        assert!(sphere.center.norm() < 1.0e-6);
        assert!((sphere.radius - 2.0).abs() < 1.0e-6);
    }

    #[test]
    fn box_box_contact_uses_minimum_overlap_axis() {
        // Unit cubes offset 0.9 on X and 0.5 on Y: X has the smaller overlap.
        let shape = Shape::Box(Aabb::new(Vec3::repeat(-0.5), Vec3::repeat(0.5)));
        let contact = detect(
            &shape,
            Vec3::zeros(),
            &shape,
            Vec3::new(0.9, 0.5, 0.0),
        )
        .expect("boxes overlap");

        // A sits at lower X, so the push-A-out direction is -X.
        assert_eq!(contact.normal, Vec3::new(-1.0, 0.0, 0.0));
        assert!((contact.penetration_depth - 0.1).abs() < 1.0e-6);
    }

    #[test]
    fn sphere_sphere_contact_depth_and_normal() {
        let a = Shape::Sphere(BoundingSphere::new(Vec3::zeros(), 1.0));
        let b = Shape::Sphere(BoundingSphere::new(Vec3::zeros(), 1.0));
        let contact = detect(&a, Vec3::zeros(), &b, Vec3::new(1.5, 0.0, 0.0))
            .expect("spheres overlap");

        assert_eq!(contact.normal, Vec3::new(-1.0, 0.0, 0.0));
        assert!((contact.penetration_depth - 0.5).abs() < 1.0e-6);
        // Contact point sits midway between the two surfaces.
        assert!((contact.point - Vec3::new(0.75, 0.0, 0.0)).norm() < 1.0e-6);
    }

    #[test]
    fn sphere_sphere_rejects_beyond_radius_sum() {
        let a = Shape::Sphere(BoundingSphere::new(Vec3::zeros(), 1.0));
        assert!(detect(&a, Vec3::zeros(), &a, Vec3::new(2.001, 0.0, 0.0)).is_none());
        // Exactly touching counts as overlap with zero depth.
        let touching = detect(&a, Vec3::zeros(), &a, Vec3::new(2.0, 0.0, 0.0))
            .expect("touching spheres overlap");
        assert!(touching.penetration_depth.abs() < 1.0e-6);
    }

    #[test]
    fn mixed_shape_pairs_never_collide() {
        let sphere = Shape::Sphere(BoundingSphere::new(Vec3::zeros(), 10.0));
        let boxy = Shape::Box(Aabb::new(Vec3::repeat(-1.0), Vec3::repeat(1.0)));
        assert!(detect(&sphere, Vec3::zeros(), &boxy, Vec3::zeros()).is_none());
        assert!(detect(&boxy, Vec3::zeros(), &sphere, Vec3::zeros()).is_none());
    }
}
