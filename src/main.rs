use std::path::Path;

use clap::Parser;
use log::info;

mod camera;
mod cli;
mod frame;
mod intersect;
mod logger;
mod material;
mod output;
mod ray;
mod scene;

use camera::Camera;
use cli::Args;
use logger::init_logger;
use output::{save_exr, save_png, send_to_tev};
use scene::Scene;

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.into());

    // Log application startup with version information
    info!(
        "Lumacast - Git Version {} ({})",
        env!("GIT_HASH"),
        env!("GIT_DATE")
    );
    info!(
        "Image resolution: {}x{}, scene preset: {}",
        args.width, args.height, args.scene
    );

    let scene = match Scene::from_preset(args.scene, Path::new(&args.scene_dir)) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("Failed to load scene preset {}: {}", args.scene, e);
            std::process::exit(1);
        }
    };
    info!(
        "Scene: {} spheres, {} triangles, {} planes, {} lights",
        scene.spheres.len(),
        scene.triangles.len(),
        scene.planes.len(),
        scene.lights.len()
    );

    let camera = Camera::new(args.width, args.height);
    let frame = camera.render(&scene);

    // Send the frame to TEV if requested
    let should_send_to_tev = args.tev || args.tev_address.is_some();
    if should_send_to_tev {
        let tev_address = args.tev_address.as_deref().unwrap_or("localhost:14158");
        send_to_tev(&frame, tev_address);
    }

    // Save image based on file extension
    if args.output.ends_with(".exr") {
        save_exr(&frame, &args.output);
    } else if args.output.ends_with(".png") {
        save_png(&frame, &args.output);
    } else {
        log::error!(
            "Unsupported file extension '{}'. Only .png and .exr formats are supported.",
            Path::new(&args.output)
                .extension()
                .unwrap_or_default()
                .to_string_lossy()
        );
        std::process::exit(1);
    }
}
