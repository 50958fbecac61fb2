//! Intersection engine: every ray against every primitive.
//!
//! Kinds run in a fixed order per ray (spheres, then triangles, then
//! planes) because later passes read the running nearest distance written
//! by earlier ones. The per-kind formulas reproduce the original renderer,
//! including its non-physical sphere test; see the notes on each function.
//! The camera sits at [`crate::camera::CAMERA_ORIGIN`], which is why no
//! ray-origin term appears in any solve.

use glam::Vec3A;

use crate::ray::{Ray, SurfaceKind};
use crate::scene::{Plane, Scene, Sphere, Triangle};

/// Run the sphere, triangle, and plane passes for one ray, in that order.
pub fn trace(ray: &mut Ray, scene: &Scene) {
    for (index, sphere) in scene.spheres.iter().enumerate() {
        sphere_test(ray, sphere, index);
    }
    for (index, triangle) in scene.triangles.iter().enumerate() {
        triangle_test(ray, triangle, index);
    }
    for (index, plane) in scene.planes.iter().enumerate() {
        plane_test(ray, plane, index);
    }
}

/// Closest-approach sphere test.
///
/// Projects the center onto the view line and measures how far the
/// direction tip lands from that projection; a hit is a distance within the
/// radius. The `|d|^4` denominator and the distance-to-the-direction-tip
/// measurement match the original renderer rather than a textbook
/// ray/sphere quadratic, as does the reconstructed hit point.
fn sphere_test(ray: &mut Ray, sphere: &Sphere, index: usize) {
    let d = ray.direction;
    let proj = sphere.center.dot(d) / d.length_squared().powi(2);
    let distance = (d - proj * d).length();
    if distance <= sphere.radius {
        let point = d - Vec3A::splat(d.length() - distance);
        ray.offer(distance, SurfaceKind::Sphere, index, point);
    }
}

/// Cramer-rule triangle test.
///
/// Solves `[-d | e1 | e2] * (t, u, v) = -v0` with Sarrus determinants,
/// where `e1`/`e2` are the edge vectors from `v0`. There is no constraint
/// on the sign of `t`; validity is `u >= 0`, `v >= 0`, `u + v <= 1` alone.
/// A zero determinant (ray parallel to the triangle plane) is no hit.
fn triangle_test(ray: &mut Ray, triangle: &Triangle, index: usize) {
    let (e1, e2) = triangle.edges();
    let neg_dir = -ray.direction;
    let neg_v0 = -triangle.v0;

    let det = det3(neg_dir, e1, e2);
    if det == 0.0 {
        return;
    }
    let t = det3(neg_v0, e1, e2) / det;
    let u = det3(neg_dir, neg_v0, e2) / det;
    let v = det3(neg_dir, e1, neg_v0) / det;

    if u >= 0.0 && v >= 0.0 && u + v <= 1.0 {
        ray.offer(t, SurfaceKind::Triangle, index, t * ray.direction);
    }
}

/// Infinite plane test.
///
/// `t = dot(point, normal) / dot(d, normal)`, with both signs of `t`
/// accepted; planes are always considered in front. A zero denominator
/// (ray parallel to the plane) is no hit.
fn plane_test(ray: &mut Ray, plane: &Plane, index: usize) {
    let denom = ray.direction.dot(plane.normal);
    if denom == 0.0 {
        return;
    }
    let t = plane.point.dot(plane.normal) / denom;
    ray.offer(t, SurfaceKind::Plane, index, t * ray.direction);
}

/// Determinant of the 3x3 matrix with columns `c0`, `c1`, `c2`, expanded
/// along the first row (Sarrus rule).
fn det3(c0: Vec3A, c1: Vec3A, c2: Vec3A) -> f32 {
    c0.x * (c1.y * c2.z - c2.y * c1.z) - c1.x * (c0.y * c2.z - c2.y * c0.z)
        + c2.x * (c0.y * c1.z - c1.y * c0.z)
}
