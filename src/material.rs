//! Shading: per-preset style tables and the local illumination model.
//!
//! Primitives carry no material of their own. The albedo and specular
//! exponent of a hit are looked up from its preset id, primitive kind, and
//! index within the kind's collection, through explicit index-range
//! buckets. Preset 1 uses the original renderer's literals; presets 2 and 3
//! define tables of the same shape.

use glam::Vec3A;

use crate::ray::{Hit, SurfaceKind};
use crate::scene::Scene;

/// RGB color type using Vec3A for SIMD optimization.
pub type Color = Vec3A;

/// Color of rays that hit nothing.
pub const BACKGROUND: Color = Vec3A::ZERO;

/// Albedo and specular exponent for one index-range bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Base reflectance applied per channel.
    pub albedo: Color,
    /// Specular power, one of 10, 1000, or 10000.
    pub exponent: f32,
}

/// One entry of a style table: indices below `limit` not claimed by an
/// earlier bucket take `style`.
struct Bucket {
    limit: usize,
    style: Style,
}

const fn style(r: f32, g: f32, b: f32, exponent: f32) -> Style {
    Style {
        albedo: Vec3A::new(r, g, b),
        exponent,
    }
}

const fn bucket(limit: usize, style: Style) -> Bucket {
    Bucket { limit, style }
}

/// Fallback for indices past the last bucket of a table.
const DEFAULT_STYLE: Style = style(0.5, 0.5, 0.5, 1000.0);

// Preset 1: grey mirror sphere, blue pyramid, white ceiling, green and red
// walls, grey floor, grey back plane.
const SCENE1_SPHERES: &[Bucket] = &[bucket(50, style(0.5, 0.5, 0.5, 1000.0))];
const SCENE1_TRIANGLES: &[Bucket] = &[
    bucket(4, style(0.0, 0.0, 1.0, 10000.0)),
    bucket(6, style(1.0, 1.0, 1.0, 1000.0)),
    bucket(8, style(0.0, 1.0, 0.0, 10.0)),
    bucket(10, style(1.0, 0.0, 0.0, 10.0)),
    bucket(12, style(0.5, 0.5, 0.5, 1000.0)),
];
const SCENE1_PLANES: &[Bucket] = &[bucket(50, style(0.7, 0.7, 0.7, 10.0))];

// Preset 2: three feature spheres over a red box and a green cone fan.
const SCENE2_SPHERES: &[Bucket] = &[
    bucket(1, style(1.0, 0.8, 0.0, 1000.0)),
    bucket(2, style(0.6, 0.6, 0.6, 10000.0)),
    bucket(3, style(0.7, 0.2, 0.8, 1000.0)),
];
const SCENE2_TRIANGLES: &[Bucket] = &[
    bucket(12, style(0.9, 0.2, 0.1, 10.0)),
    bucket(32, style(0.0, 0.8, 0.2, 1000.0)),
];
const SCENE2_PLANES: &[Bucket] = &[bucket(50, style(0.8, 0.8, 0.8, 10.0))];

// Preset 3: paired blue and yellow spheres over orange and dark triangles.
const SCENE3_SPHERES: &[Bucket] = &[
    bucket(2, style(0.2, 0.4, 0.9, 10000.0)),
    bucket(4, style(0.9, 0.9, 0.2, 10.0)),
];
const SCENE3_TRIANGLES: &[Bucket] = &[
    bucket(6, style(1.0, 0.5, 0.0, 1000.0)),
    bucket(12, style(0.3, 0.3, 0.3, 10000.0)),
];
const SCENE3_PLANES: &[Bucket] = &[bucket(50, style(0.6, 0.7, 0.8, 1000.0))];

/// Look up the style of a primitive by preset, kind, and index.
pub fn style_for(preset: u32, kind: SurfaceKind, index: usize) -> Style {
    let table: &[Bucket] = match (preset, kind) {
        (1, SurfaceKind::Sphere) => SCENE1_SPHERES,
        (1, SurfaceKind::Triangle) => SCENE1_TRIANGLES,
        (1, SurfaceKind::Plane) => SCENE1_PLANES,
        (2, SurfaceKind::Sphere) => SCENE2_SPHERES,
        (2, SurfaceKind::Triangle) => SCENE2_TRIANGLES,
        (2, SurfaceKind::Plane) => SCENE2_PLANES,
        (3, SurfaceKind::Sphere) => SCENE3_SPHERES,
        (3, SurfaceKind::Triangle) => SCENE3_TRIANGLES,
        (3, SurfaceKind::Plane) => SCENE3_PLANES,
        _ => &[],
    };
    table
        .iter()
        .find(|bucket| index < bucket.limit)
        .map(|bucket| bucket.style)
        .unwrap_or(DEFAULT_STYLE)
}

/// Shade a resolved hit with the scene's first light.
///
/// Lights past index 0 are stored but never consulted.
pub fn shade_hit(scene: &Scene, hit: &Hit) -> Color {
    let style = style_for(scene.preset, hit.kind, hit.index);
    let normal = surface_normal(scene, hit);
    shade(
        style,
        normal,
        hit.point,
        scene.lights.first().map(|light| light.position),
    )
}

/// Unit surface normal of the primitive that owns the hit.
fn surface_normal(scene: &Scene, hit: &Hit) -> Vec3A {
    match hit.kind {
        SurfaceKind::Sphere => (hit.point - scene.spheres[hit.index].center).normalize(),
        SurfaceKind::Triangle => scene.triangles[hit.index].normal(),
        SurfaceKind::Plane => scene.planes[hit.index].normal.normalize(),
    }
}

/// Local illumination: `albedo * (0.5 + 0.5 * diffuse) + 0.5 * albedo * specular`.
///
/// The dot products are sign-inverted relative to the conventional model,
/// and the half vector is the normalized light position alone; the view
/// vector never enters it. Both quirks are the renderer's defined behavior.
/// Without a light, the diffuse and specular terms vanish and the ambient
/// floor of half the albedo remains.
pub fn shade(style: Style, normal: Vec3A, point: Vec3A, light: Option<Vec3A>) -> Color {
    let (diffuse, specular) = match light {
        Some(light_position) => {
            let l = (light_position - point).normalize();
            let h = light_position.normalize();
            let diffuse = (-normal.dot(l)).max(0.0);
            let specular = (-normal.dot(h)).max(0.0).powf(style.exponent);
            (diffuse, specular)
        }
        None => (0.0, 0.0),
    };
    style.albedo * (0.5 + 0.5 * diffuse) + 0.5 * style.albedo * specular
}
