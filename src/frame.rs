//! Frame assembly for the display and image-file collaborators.
//!
//! The external display surface consumes two parallel per-pixel arrays,
//! a 2-float screen position and a 3-float color, both in raster order.
//! The image writers address the same colors by (column, row). Assembly is
//! pure data marshaling; no shading or intersection state leaks in here.

use glam::Vec3A;
use image::{ImageBuffer, Rgb};

use crate::camera::Camera;

/// One assembled frame, ready for hand-off.
pub struct Frame {
    /// Grid width in pixels.
    pub width: u32,
    /// Grid height in pixels.
    pub height: u32,
    /// Normalized screen position per pixel, raster order.
    pub positions: Vec<[f32; 2]>,
    /// Shaded colors addressed by (column, row), linear f32.
    pub image: ImageBuffer<Rgb<f32>, Vec<f32>>,
}

impl Frame {
    /// Pack screen positions and shaded colors for one frame.
    ///
    /// `colors` is expected in raster order, one entry per pixel.
    pub fn assemble(camera: &Camera, colors: &[Vec3A]) -> Self {
        let (width, height) = (camera.width, camera.height);
        let mut positions = Vec::with_capacity((width * height) as usize);
        let mut image = ImageBuffer::new(width, height);

        for i in 0..height {
            for j in 0..width {
                positions.push(camera.screen_position(j, i));
                let color = colors[(i * width + j) as usize];
                image.put_pixel(j, i, Rgb([color.x, color.y, color.z]));
            }
        }

        Self {
            width,
            height,
            positions,
            image,
        }
    }

    /// Color of the pixel at (column, row).
    pub fn color_at(&self, column: u32, row: u32) -> Vec3A {
        let Rgb([r, g, b]) = *self.image.get_pixel(column, row);
        Vec3A::new(r, g, b)
    }

    /// Interleaved RGB colors in raster order, three floats per pixel.
    ///
    /// Together with [`Frame::positions`] this is the pair of parallel
    /// arrays a display surface uploads.
    pub fn colors(&self) -> &[f32] {
        self.image.as_raw()
    }

    /// Number of pixels in the frame.
    pub fn pixel_count(&self) -> usize {
        (self.width * self.height) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_addressing() {
        let camera = Camera::new(3, 2);
        let colors: Vec<Vec3A> = (0..6)
            .map(|n| Vec3A::new(n as f32, 0.0, 0.0))
            .collect();
        let frame = Frame::assemble(&camera, &colors);

        assert_eq!(frame.pixel_count(), 6);
        assert_eq!(frame.positions.len(), 6);
        assert_eq!(frame.colors().len(), 18);

        // Raster order: pixel (column 2, row 1) is entry 5.
        assert_eq!(frame.color_at(2, 1).x, 5.0);
        assert_eq!(frame.color_at(0, 0).x, 0.0);
        assert_eq!(frame.color_at(0, 1).x, 3.0);
    }

    #[test]
    fn test_positions_match_camera_mapping() {
        let camera = Camera::new(4, 4);
        let colors = vec![Vec3A::ZERO; 16];
        let frame = Frame::assemble(&camera, &colors);

        assert_eq!(frame.positions[0], camera.screen_position(0, 0));
        assert_eq!(frame.positions[0], [-1.0, -1.0]);
        // Entry 6 is pixel (column 2, row 1).
        assert_eq!(frame.positions[6], camera.screen_position(2, 1));
    }
}
