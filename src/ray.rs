//! Per-ray state for nearest-hit resolution.
//!
//! One ray is cast per pixel from the fixed camera origin. The ray carries
//! its direction and the nearest intersection found so far; it is rebuilt
//! from scratch for every frame and never shared across frames.

use glam::Vec3A;

/// Kind of primitive that produced an intersection.
///
/// Kinds are always tested in this order: spheres, then triangles, then
/// planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Center-plus-radius sphere.
    Sphere,
    /// Three-vertex triangle, winding gives the outward normal.
    Triangle,
    /// Infinite plane given by a normal and a reference point.
    Plane,
}

/// Nearest intersection found for one ray.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    /// Distance parameter of the nearest intersection so far.
    pub distance: f32,
    /// Kind of the primitive that currently owns the surface.
    pub kind: SurfaceKind,
    /// Index of that primitive within its kind's collection.
    pub index: usize,
    /// Approximate intersection point consumed by shading.
    pub point: Vec3A,
}

/// One view ray from the camera origin.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Direction from the camera origin. Not unit length.
    pub direction: Vec3A,
    /// Nearest hit so far, `None` until the first valid intersection.
    pub hit: Option<Hit>,
}

impl Ray {
    /// Create a fresh ray with no hit recorded.
    pub fn new(direction: Vec3A) -> Self {
        Self {
            direction,
            hit: None,
        }
    }

    /// Offer an intersection result to this ray.
    ///
    /// A smaller distance replaces the current hit outright. An equal
    /// distance keeps the distance but hands the surface to the offering
    /// primitive, so the last primitive in iteration order to match the
    /// running minimum decides the shaded color. Non-finite distances from
    /// degenerate solves are rejected.
    pub fn offer(&mut self, distance: f32, kind: SurfaceKind, index: usize, point: Vec3A) {
        if !distance.is_finite() {
            return;
        }
        match &mut self.hit {
            None => {
                self.hit = Some(Hit {
                    distance,
                    kind,
                    index,
                    point,
                });
            }
            Some(hit) if distance < hit.distance => {
                *hit = Hit {
                    distance,
                    kind,
                    index,
                    point,
                };
            }
            Some(hit) if distance == hit.distance => {
                hit.kind = kind;
                hit.index = index;
                hit.point = point;
            }
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_offer_sets_hit() {
        let mut ray = Ray::new(Vec3A::new(0.0, 0.0, -2.0));
        assert!(ray.hit.is_none());

        ray.offer(3.0, SurfaceKind::Sphere, 0, Vec3A::ZERO);
        let hit = ray.hit.unwrap();
        assert_eq!(hit.distance, 3.0);
        assert_eq!(hit.kind, SurfaceKind::Sphere);
        assert_eq!(hit.index, 0);
    }

    #[test]
    fn test_closer_offer_wins() {
        let mut ray = Ray::new(Vec3A::new(0.0, 0.0, -2.0));
        ray.offer(3.0, SurfaceKind::Sphere, 0, Vec3A::ZERO);
        ray.offer(1.0, SurfaceKind::Triangle, 2, Vec3A::ONE);
        ray.offer(2.0, SurfaceKind::Plane, 1, Vec3A::ZERO);

        let hit = ray.hit.unwrap();
        assert_eq!(hit.distance, 1.0);
        assert_eq!(hit.kind, SurfaceKind::Triangle);
        assert_eq!(hit.index, 2);
    }

    #[test]
    fn test_equal_offer_reowns_surface() {
        // The distance stays, the surface moves to the later primitive.
        let mut ray = Ray::new(Vec3A::new(0.0, 0.0, -2.0));
        ray.offer(2.0, SurfaceKind::Sphere, 0, Vec3A::ZERO);
        ray.offer(2.0, SurfaceKind::Plane, 4, Vec3A::ONE);

        let hit = ray.hit.unwrap();
        assert_eq!(hit.distance, 2.0);
        assert_eq!(hit.kind, SurfaceKind::Plane);
        assert_eq!(hit.index, 4);
        assert_eq!(hit.point, Vec3A::ONE);
    }

    #[test]
    fn test_non_finite_offers_rejected() {
        let mut ray = Ray::new(Vec3A::new(0.0, 0.0, -2.0));
        ray.offer(f32::NAN, SurfaceKind::Plane, 0, Vec3A::ZERO);
        ray.offer(f32::INFINITY, SurfaceKind::Plane, 1, Vec3A::ZERO);
        assert!(ray.hit.is_none());

        ray.offer(1.0, SurfaceKind::Sphere, 0, Vec3A::ZERO);
        ray.offer(f32::NEG_INFINITY, SurfaceKind::Plane, 2, Vec3A::ZERO);
        assert_eq!(ray.hit.unwrap().distance, 1.0);
    }

    #[test]
    fn test_negative_distance_beats_positive() {
        // Plane and triangle distances carry their sign, negative values count.
        let mut ray = Ray::new(Vec3A::new(0.0, 0.0, -2.0));
        ray.offer(5.0, SurfaceKind::Sphere, 0, Vec3A::ZERO);
        ray.offer(-3.0, SurfaceKind::Plane, 0, Vec3A::ZERO);
        assert_eq!(ray.hit.unwrap().distance, -3.0);
    }
}
