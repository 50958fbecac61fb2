//! Lumacast fixed-camera ray caster
//!
//! Casts one ray per pixel of a fixed grid against a small scene of
//! spheres, triangles, and planes, resolves the nearest hit per ray, and
//! shades it with a simple local illumination model. Three built-in scene
//! presets select both the description file and the material style tables.
//! Frames are written as PNG or EXR and can be streamed to a TEV viewer.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod cli;
pub mod frame;
pub mod intersect;
pub mod logger;
pub mod material;
pub mod output;
pub mod ray;
pub mod scene;
