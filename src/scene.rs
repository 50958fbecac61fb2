//! Scene description: primitives, bounded collections, and the text parser.
//!
//! Scenes are plain whitespace-tokenized text. Each primitive is a keyword
//! followed by a braced list of numbers:
//!
//! ```text
//! light    { x y z }
//! sphere   { cx cy cz r }
//! plane    { nx ny nz px py pz }
//! triangle { x1 y1 z1 x2 y2 z2 x3 y3 z3 }
//! ```
//!
//! A block whose first value token is one of the skip sentinels (`x`, `xn`,
//! `x1`) marks an intentionally empty slot and appends nothing. Unrecognized
//! tokens are ignored, which also disposes of the leftovers of skipped
//! blocks. Non-numeric tokens in a numeric slot parse to `0.0`.

use std::fs;
use std::path::Path;

use glam::Vec3A;
use log::{debug, warn};
use thiserror::Error;

/// Hard upper bound on the number of primitives of each kind.
pub const MAX_PRIMITIVES_PER_KIND: usize = 50;

/// Tokens that mark an intentionally empty block in the scene format.
const SKIP_SENTINELS: [&str; 3] = ["x", "xn", "x1"];

/// Sphere primitive defined by center and radius.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    /// Center point in world coordinates.
    pub center: Vec3A,
    /// Radius of the sphere.
    pub radius: f32,
}

/// Triangle primitive defined by three vertices.
///
/// The winding order determines the outward normal via the right-hand cross
/// product of the two edge vectors.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// First vertex, the shared origin of both edge vectors.
    pub v0: Vec3A,
    /// Second vertex.
    pub v1: Vec3A,
    /// Third vertex.
    pub v2: Vec3A,
}

impl Triangle {
    /// Edge vectors `v1 - v0` and `v2 - v0`.
    pub fn edges(&self) -> (Vec3A, Vec3A) {
        (self.v1 - self.v0, self.v2 - self.v0)
    }

    /// Geometric normal from the winding order, unit length.
    pub fn normal(&self) -> Vec3A {
        let (e1, e2) = self.edges();
        e1.cross(e2).normalize()
    }
}

/// Infinite plane defined by a normal and a reference point on the plane.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Plane normal. Stored as parsed, normalized at shading time.
    pub normal: Vec3A,
    /// Point on the plane, used in the distance formula.
    pub point: Vec3A,
}

/// Point light source.
///
/// All parsed lights are stored, but only the first one is consulted by
/// shading. This mirrors a capability limit of the renderer, not a parse
/// restriction.
#[derive(Debug, Clone, Copy)]
pub struct Light {
    /// Light position in world coordinates.
    pub position: Vec3A,
}

/// Error raised while building a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// A primitive kind exceeded [`MAX_PRIMITIVES_PER_KIND`] entries.
    #[error("scene holds more than {MAX_PRIMITIVES_PER_KIND} {kind} entries")]
    CapacityExceeded {
        /// Which collection overflowed.
        kind: &'static str,
    },
}

/// Aggregate of all primitives for one frame.
///
/// Collections are rebuilt from scratch on every load; nothing persists
/// between loads.
#[derive(Debug, Default)]
pub struct Scene {
    /// Preset id that selected this scene (1..=3), 0 for hand-built scenes.
    pub preset: u32,
    /// Sphere collection, parse order.
    pub spheres: Vec<Sphere>,
    /// Triangle collection, parse order.
    pub triangles: Vec<Triangle>,
    /// Plane collection, parse order.
    pub planes: Vec<Plane>,
    /// Light collection, parse order. Index 0 drives shading.
    pub lights: Vec<Light>,
}

impl Scene {
    /// Load one of the numbered scene presets from `scene_dir`.
    ///
    /// Preset N maps to `<scene_dir>/sceneN.txt`. An out-of-range preset
    /// loads nothing, and a missing or unreadable file yields an empty
    /// scene; neither is an error. Capacity overflow is.
    pub fn from_preset(preset: u32, scene_dir: &Path) -> Result<Self, SceneError> {
        if !(1..=3).contains(&preset) {
            warn!("Scene preset {} is out of range (1-3), nothing loaded", preset);
            return Ok(Self {
                preset,
                ..Self::default()
            });
        }

        let path = scene_dir.join(format!("scene{}.txt", preset));
        let source = match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(e) => {
                warn!("Could not read scene file {}: {}", path.display(), e);
                return Ok(Self {
                    preset,
                    ..Self::default()
                });
            }
        };

        let mut scene = Self::parse(&source)?;
        scene.preset = preset;
        debug!(
            "Loaded {}: {} spheres, {} triangles, {} planes, {} lights",
            path.display(),
            scene.spheres.len(),
            scene.triangles.len(),
            scene.planes.len(),
            scene.lights.len()
        );
        Ok(scene)
    }

    /// Parse a scene description from text.
    pub fn parse(source: &str) -> Result<Self, SceneError> {
        let mut scene = Self::default();
        let mut tokens = source.split_whitespace();

        while let Some(word) = tokens.next() {
            match word {
                "light" => {
                    if let Some([x, y, z]) = read_block(&mut tokens) {
                        scene.push_light(Light {
                            position: Vec3A::new(x, y, z),
                        })?;
                    }
                }
                "sphere" => {
                    if let Some([cx, cy, cz, r]) = read_block(&mut tokens) {
                        scene.push_sphere(Sphere {
                            center: Vec3A::new(cx, cy, cz),
                            radius: r,
                        })?;
                    }
                }
                "plane" => {
                    if let Some([nx, ny, nz, px, py, pz]) = read_block(&mut tokens) {
                        scene.push_plane(Plane {
                            normal: Vec3A::new(nx, ny, nz),
                            point: Vec3A::new(px, py, pz),
                        })?;
                    }
                }
                "triangle" => {
                    if let Some([x1, y1, z1, x2, y2, z2, x3, y3, z3]) = read_block(&mut tokens) {
                        scene.push_triangle(Triangle {
                            v0: Vec3A::new(x1, y1, z1),
                            v1: Vec3A::new(x2, y2, z2),
                            v2: Vec3A::new(x3, y3, z3),
                        })?;
                    }
                }
                // Anything else, including the delimiters of skipped blocks,
                // is ignored.
                _ => {}
            }
        }

        Ok(scene)
    }

    /// Append a sphere, failing fast on capacity overflow.
    pub fn push_sphere(&mut self, sphere: Sphere) -> Result<(), SceneError> {
        if self.spheres.len() == MAX_PRIMITIVES_PER_KIND {
            return Err(SceneError::CapacityExceeded { kind: "sphere" });
        }
        self.spheres.push(sphere);
        Ok(())
    }

    /// Append a triangle, failing fast on capacity overflow.
    pub fn push_triangle(&mut self, triangle: Triangle) -> Result<(), SceneError> {
        if self.triangles.len() == MAX_PRIMITIVES_PER_KIND {
            return Err(SceneError::CapacityExceeded { kind: "triangle" });
        }
        self.triangles.push(triangle);
        Ok(())
    }

    /// Append a plane, failing fast on capacity overflow.
    pub fn push_plane(&mut self, plane: Plane) -> Result<(), SceneError> {
        if self.planes.len() == MAX_PRIMITIVES_PER_KIND {
            return Err(SceneError::CapacityExceeded { kind: "plane" });
        }
        self.planes.push(plane);
        Ok(())
    }

    /// Append a light, failing fast on capacity overflow.
    pub fn push_light(&mut self, light: Light) -> Result<(), SceneError> {
        if self.lights.len() == MAX_PRIMITIVES_PER_KIND {
            return Err(SceneError::CapacityExceeded { kind: "light" });
        }
        self.lights.push(light);
        Ok(())
    }
}

/// Read one braced block of N numbers from the token stream.
///
/// Returns `None` when the keyword is not followed by `{`, when the first
/// value token is a skip sentinel, or when the stream ends mid-block. The
/// closing `}` is left in the stream and discarded by the caller's
/// unrecognized-token rule.
fn read_block<'a, const N: usize>(
    tokens: &mut impl Iterator<Item = &'a str>,
) -> Option<[f32; N]> {
    if tokens.next()? != "{" {
        return None;
    }
    let first = tokens.next()?;
    if SKIP_SENTINELS.contains(&first) {
        return None;
    }

    let mut values = [0.0f32; N];
    values[0] = parse_number(first);
    for slot in values.iter_mut().skip(1) {
        *slot = parse_number(tokens.next()?);
    }
    Some(values)
}

/// Parse one numeric token; malformed tokens parse to zero.
fn parse_number(token: &str) -> f32 {
    token.parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_sphere() {
        let scene = Scene::parse("sphere { 0 0 0 5 }").unwrap();
        assert_eq!(scene.spheres.len(), 1);
        assert_eq!(scene.spheres[0].center, Vec3A::ZERO);
        assert_eq!(scene.spheres[0].radius, 5.0);
        assert!(scene.triangles.is_empty());
        assert!(scene.planes.is_empty());
        assert!(scene.lights.is_empty());
    }

    #[test]
    fn test_parse_all_kinds() {
        let source = "
            light { 0 2.5 -7.75 }
            sphere { 0.9 -1.925 -6.69 0.825 }
            plane { 0 0 1 0 0 -10.5 }
            triangle { -0.4 -2.75 -9.55 -0.93 0.55 -8.51 0.11 -2.75 -7.98 }
        ";
        let scene = Scene::parse(source).unwrap();
        assert_eq!(scene.lights.len(), 1);
        assert_eq!(scene.spheres.len(), 1);
        assert_eq!(scene.planes.len(), 1);
        assert_eq!(scene.triangles.len(), 1);
        assert_eq!(scene.lights[0].position, Vec3A::new(0.0, 2.5, -7.75));
        assert_eq!(scene.planes[0].normal, Vec3A::new(0.0, 0.0, 1.0));
        assert_eq!(scene.planes[0].point, Vec3A::new(0.0, 0.0, -10.5));
    }

    #[test]
    fn test_skip_sentinels_leave_collections_unchanged() {
        let source = "sphere { x } plane { xn } triangle { x1 } light { x }";
        let scene = Scene::parse(source).unwrap();
        assert!(scene.spheres.is_empty());
        assert!(scene.planes.is_empty());
        assert!(scene.triangles.is_empty());
        assert!(scene.lights.is_empty());
    }

    #[test]
    fn test_sentinel_block_does_not_poison_later_blocks() {
        let source = "sphere { x } sphere { 1 2 3 4 }";
        let scene = Scene::parse(source).unwrap();
        assert_eq!(scene.spheres.len(), 1);
        assert_eq!(scene.spheres[0].center, Vec3A::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_malformed_numeric_parses_to_zero() {
        let scene = Scene::parse("sphere { 1 2 abc 4 }").unwrap();
        assert_eq!(scene.spheres.len(), 1);
        assert_eq!(scene.spheres[0].center, Vec3A::new(1.0, 2.0, 0.0));
        assert_eq!(scene.spheres[0].radius, 4.0);
    }

    #[test]
    fn test_unrecognized_keywords_ignored() {
        let scene = Scene::parse("cube { 1 2 3 } sphere { 0 0 -4 1 }").unwrap();
        assert_eq!(scene.spheres.len(), 1);
    }

    #[test]
    fn test_keyword_without_brace_contributes_nothing() {
        let scene = Scene::parse("sphere 1 2 3 4").unwrap();
        assert!(scene.spheres.is_empty());
    }

    #[test]
    fn test_truncated_block_dropped() {
        let scene = Scene::parse("sphere { 1 2").unwrap();
        assert!(scene.spheres.is_empty());
    }

    #[test]
    fn test_capacity_overflow_is_hard_error() {
        let mut source = String::new();
        for _ in 0..MAX_PRIMITIVES_PER_KIND + 1 {
            source.push_str("sphere { 0 0 0 1 }\n");
        }
        let err = Scene::parse(&source).unwrap_err();
        assert!(matches!(
            err,
            SceneError::CapacityExceeded { kind: "sphere" }
        ));
    }

    #[test]
    fn test_capacity_boundary_accepted() {
        let mut source = String::new();
        for _ in 0..MAX_PRIMITIVES_PER_KIND {
            source.push_str("triangle { 0 0 0 1 0 0 0 1 0 }\n");
        }
        let scene = Scene::parse(&source).unwrap();
        assert_eq!(scene.triangles.len(), MAX_PRIMITIVES_PER_KIND);
    }

    #[test]
    fn test_missing_file_gives_empty_scene() {
        let scene = Scene::from_preset(1, Path::new("no/such/dir")).unwrap();
        assert_eq!(scene.preset, 1);
        assert!(scene.spheres.is_empty());
        assert!(scene.triangles.is_empty());
        assert!(scene.planes.is_empty());
        assert!(scene.lights.is_empty());
    }

    #[test]
    fn test_out_of_range_preset_loads_nothing() {
        for preset in [0, 4, 99] {
            let scene = Scene::from_preset(preset, Path::new("scenes")).unwrap();
            assert_eq!(scene.preset, preset);
            assert!(scene.spheres.is_empty());
            assert!(scene.lights.is_empty());
        }
    }

    #[test]
    fn test_triangle_normal_follows_winding() {
        let triangle = Triangle {
            v0: Vec3A::new(0.0, 0.0, 0.0),
            v1: Vec3A::new(1.0, 0.0, 0.0),
            v2: Vec3A::new(0.0, 1.0, 0.0),
        };
        assert!((triangle.normal() - Vec3A::Z).length() < 1e-6);

        let flipped = Triangle {
            v0: triangle.v0,
            v1: triangle.v2,
            v2: triangle.v1,
        };
        assert!((flipped.normal() + Vec3A::Z).length() < 1e-6);
    }
}
