//! Fixed pinhole camera: ray generation and per-frame rendering.

use glam::Vec3A;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;

use crate::frame::Frame;
use crate::intersect;
use crate::material::{self, Color, BACKGROUND};
use crate::ray::Ray;
use crate::scene::Scene;

/// The camera never moves. Every intersection formula assumes this origin,
/// so it is a named constant rather than an omitted term.
pub const CAMERA_ORIGIN: Vec3A = Vec3A::ZERO;

/// Focal offset along the view axis; rays look down negative z.
pub const FOCAL_OFFSET: f32 = -2.0;

/// Camera over a fixed pixel grid.
///
/// Pixel (column j, row i) maps to normalized screen coordinates
/// `row = 2*(j/width) - 1` and `col = 2*(i/height) - 1`, and its view ray
/// direction is `(row, col, FOCAL_OFFSET)`, deliberately left unnormalized.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Grid width in pixels.
    pub width: u32,
    /// Grid height in pixels.
    pub height: u32,
}

impl Camera {
    /// Create a camera over a `width` x `height` grid (at least 1x1).
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Normalized screen coordinates of pixel (column j, row i).
    pub fn screen_position(&self, j: u32, i: u32) -> [f32; 2] {
        let row = 2.0 * (j as f32 / self.width as f32) - 1.0;
        let col = 2.0 * (i as f32 / self.height as f32) - 1.0;
        [row, col]
    }

    /// View ray for pixel (column j, row i).
    pub fn ray(&self, j: u32, i: u32) -> Ray {
        let [row, col] = self.screen_position(j, i);
        let target = Vec3A::new(row, col, FOCAL_OFFSET);
        Ray::new(target - CAMERA_ORIGIN)
    }

    /// One fresh ray per pixel in raster order, the column index varying
    /// fastest. No jitter; generation is fully deterministic.
    pub fn generate_rays(&self) -> Vec<Ray> {
        let mut rays = Vec::with_capacity((self.width * self.height) as usize);
        for i in 0..self.height {
            for j in 0..self.width {
                rays.push(self.ray(j, i));
            }
        }
        rays
    }

    /// Render one frame of the scene.
    ///
    /// Rays are processed in parallel; each ray runs its sphere, triangle,
    /// and plane passes in order and is then shaded from its resolved hit.
    /// Rays that hit nothing take the background color.
    pub fn render(&self, scene: &Scene) -> Frame {
        info!(
            "Rendering {}x{} using {} CPU cores...",
            self.width,
            self.height,
            rayon::current_num_threads()
        );
        let start = std::time::Instant::now();
        let pb = ProgressBar::new((self.width * self.height) as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40} {pos}/{len} ETA: {eta}")
                .unwrap(),
        );

        let mut rays = self.generate_rays();
        let colors: Vec<Color> = rays
            .par_iter_mut()
            .map(|ray| {
                intersect::trace(ray, scene);
                pb.inc(1);
                match &ray.hit {
                    Some(hit) => material::shade_hit(scene, hit),
                    None => BACKGROUND,
                }
            })
            .collect();

        pb.finish();
        info!("Frame rendered in {:.2?}", start.elapsed());

        Frame::assemble(self, &colors)
    }
}
