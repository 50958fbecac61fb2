//! Output collaborators: PNG and EXR writers plus a TEV live display.
//!
//! Everything in here consumes an assembled [`Frame`] and nothing else.
//! Failures are logged as warnings rather than panics, so a broken viewer
//! connection or an unwritable path never takes the render down with it.

use std::net::TcpStream;

use exr::prelude::*;
use image::{ImageBuffer, Rgb};
use log::{debug, info, warn};
use tev_client::{PacketCreateImage, PacketUpdateImage, TevClient};

use crate::frame::Frame;

/// Image name shown in the TEV tab list.
const TEV_IMAGE_NAME: &str = "lumacast_render";

/// Send a frame to a running TEV instance for live display.
///
/// TEV wants planar channel data (all R values, then G, then B), so the
/// interleaved frame colors are re-laid-out before the update packet goes
/// over the wire. `tev_address` may omit the port; 14158 is the default.
pub fn send_to_tev(frame: &Frame, tev_address: &str) {
    let tev_address = if tev_address.contains(':') {
        tev_address.to_string()
    } else {
        format!("{}:14158", tev_address)
    };

    debug!("Connecting to TEV at {}", tev_address);
    let stream = match TcpStream::connect(&tev_address) {
        Ok(stream) => stream,
        Err(e) => {
            warn!("Failed to connect to TEV on {}: {}", tev_address, e);
            return;
        }
    };
    if let Err(e) = stream.set_nodelay(true) {
        debug!("Failed to set TCP_NODELAY: {}", e);
    }

    let mut client = TevClient::wrap(stream);
    let create = PacketCreateImage {
        image_name: TEV_IMAGE_NAME,
        width: frame.width,
        height: frame.height,
        channel_names: &["R", "G", "B"],
        grab_focus: true,
    };
    if let Err(e) = client.send(create) {
        warn!("Failed to create image in TEV: {}", e);
        return;
    }

    // Interleaved RGB to planar RRR...GGG...BBB layout.
    let pixel_count = frame.pixel_count();
    let mut channel_data = Vec::with_capacity(pixel_count * 3);
    for channel in 0..3 {
        for pixel in frame.image.pixels() {
            channel_data.push(pixel[channel]);
        }
    }

    let start = std::time::Instant::now();
    let update = PacketUpdateImage {
        image_name: TEV_IMAGE_NAME,
        grab_focus: false,
        channel_names: &["R", "G", "B"],
        x: 0,
        y: 0,
        width: frame.width,
        height: frame.height,
        channel_offsets: &[0, pixel_count as u64, 2 * pixel_count as u64],
        channel_strides: &[1, 1, 1],
        data: &channel_data,
    };
    match client.send(update) {
        Ok(_) => info!(
            "Frame sent to TEV at {} in {:.2?}",
            tev_address,
            start.elapsed()
        ),
        Err(e) => warn!("Failed to send frame to TEV: {}", e),
    }
}

/// Save a frame as an 8-bit PNG with sRGB gamma correction.
///
/// Linear values are clamped to [0, 1] and pushed through the standard
/// sRGB transfer curve (linear segment below 0.0031308, power curve above)
/// before quantization to 8 bits.
pub fn save_png(frame: &Frame, output_path: &str) {
    let u8_image: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(frame.width, frame.height, |x, y| {
            let pixel = frame.image.get_pixel(x, y);
            Rgb([
                (linear_to_srgb(pixel[0].clamp(0.0, 1.0)) * 255.0) as u8,
                (linear_to_srgb(pixel[1].clamp(0.0, 1.0)) * 255.0) as u8,
                (linear_to_srgb(pixel[2].clamp(0.0, 1.0)) * 255.0) as u8,
            ])
        });

    match u8_image.save(output_path) {
        Ok(_) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save image: {}", e),
    }
}

/// Save a frame as a linear 32-bit float EXR, no tone mapping applied.
pub fn save_exr(frame: &Frame, output_path: &str) {
    let width = frame.width as usize;
    let result = write_rgb_file(output_path, width, frame.height as usize, |x, y| {
        let pixel = frame.image.get_pixel(x as u32, y as u32);
        (pixel[0], pixel[1], pixel[2])
    });

    match result {
        Ok(_) => info!("HDR image saved as EXR: {}", output_path),
        Err(e) => warn!("Failed to save EXR image: {}", e),
    }
}

/// sRGB transfer function with the linear portion for dark values.
fn linear_to_srgb(linear: f32) -> f32 {
    if linear <= 0.0 {
        0.0
    } else if linear <= 0.0031308 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_to_srgb_endpoints() {
        assert_eq!(linear_to_srgb(0.0), 0.0);
        assert!((linear_to_srgb(1.0) - 1.0).abs() < 1e-6);
        // Dark values follow the linear segment.
        assert!((linear_to_srgb(0.002) - 0.02584).abs() < 1e-4);
        // Negative inputs clamp to black.
        assert_eq!(linear_to_srgb(-0.5), 0.0);
    }
}
