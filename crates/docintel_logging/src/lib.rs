#![deny(missing_docs)]
//! Shared logging utilities for the docintel workspace.
//!
//! This crate provides the `docintel_*` logging macros used across the
//! controller crates and a minimal test initializer for the global logger.
//! Every macro logs under [`TARGET`] so hosts can filter controller output
//! apart from HTTP stack noise.

/// Log target shared by all `docintel_*` macros.
pub const TARGET: &str = "docintel";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! docintel_trace {
    ($($arg:tt)*) => {{
        log::trace!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! docintel_debug {
    ($($arg:tt)*) => {{
        log::debug!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! docintel_info {
    ($($arg:tt)*) => {{
        log::info!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! docintel_warn {
    ($($arg:tt)*) => {{
        log::warn!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! docintel_error {
    ($($arg:tt)*) => {{
        log::error!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Installs a terminal logger for test binaries, limited to [`TARGET`].
///
/// Safe to call from every test: once a logger is installed, later calls do
/// nothing.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

    let config = ConfigBuilder::new()
        .add_filter_allow_str(TARGET)
        .set_time_level(log::LevelFilter::Off)
        .build();
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Info
    };
    // Another test in the same binary may have installed one already.
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Never);
}
