//! Logger setup.

use log::LevelFilter;

/// Initialize the logger with the specified level.
///
/// `RUST_LOG` still wins over the CLI level when set.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_target(false)
        .init();
}
