// check_vsphere Library - Public API

// Re-export error types
pub mod error;
pub use error::{CheckError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod source;
pub mod ui;

// Re-export commonly used types
pub use core::config::Config;

/// Initialize logging on stderr; stdout is reserved for the plugin output.
///
/// `RUST_LOG` takes precedence over the verbosity count.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}
