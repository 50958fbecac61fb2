//! Command line interface.

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum.
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Errors and warnings.
    Warn,
    /// Normal operational output.
    Info,
    /// Verbose debugging output.
    Debug,
    /// Everything, including per-module trace output.
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments structure using clap derive macros.
#[derive(Parser)]
#[command(name = "lumacast")]
#[command(about = "A fixed-camera ray caster with three built-in scene presets")]
pub struct Args {
    /// Scene preset to render (1, 2, or 3; anything else renders empty)
    #[arg(short = 'p', long, default_value = "1", help = "Scene preset to render")]
    pub scene: u32,

    /// Directory holding the sceneN.txt preset files
    #[arg(long, default_value = "scenes", help = "Directory holding the sceneN.txt preset files")]
    pub scene_dir: String,

    /// Image width in pixels
    #[arg(long, default_value = "640", help = "Image width in pixels")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "640", help = "Image height in pixels")]
    pub height: u32,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Send the frame to TEV for real-time visualization
    #[arg(long, help = "Send the frame to TEV for real-time visualization")]
    pub tev: bool,

    /// TEV client IP address and port (automatically enables --tev)
    #[arg(long, help = "TEV client IP address and port (automatically enables --tev)")]
    pub tev_address: Option<String>,

    /// Output file path (.png for 8-bit with gamma correction, .exr for HDR linear)
    #[arg(
        short,
        long,
        default_value = "render.png",
        help = "Output file path (.png for 8-bit with gamma correction, .exr for HDR linear)"
    )]
    pub output: String,
}
