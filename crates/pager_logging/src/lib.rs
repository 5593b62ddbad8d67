#![deny(missing_docs)]
//! Shared logging utilities for the pager workspace.
//!
//! This crate provides the `pager_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every macro logs
//! under the [`TARGET`] target so pager output can be filtered as a unit.

#[doc(hidden)]
pub use log;

/// Log target shared by every `pager_*` macro.
pub const TARGET: &str = "pager";

/// Logs a trace-level message under the pager target.
#[macro_export]
macro_rules! pager_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message under the pager target.
#[macro_export]
macro_rules! pager_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an info-level message under the pager target.
#[macro_export]
macro_rules! pager_info {
    ($($arg:tt)*) => {{
        $crate::log::info!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message under the pager target.
#[macro_export]
macro_rules! pager_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an error-level message under the pager target.
#[macro_export]
macro_rules! pager_error {
    ($($arg:tt)*) => {{
        $crate::log::error!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, ConfigBuilder, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let config = ConfigBuilder::new().add_filter_allow_str(TARGET).build();

    // Another test may already own the global logger.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    #[test]
    fn macros_expand_without_importing_log() {
        super::initialize_for_tests();
        crate::pager_trace!("trace {}", 1);
        crate::pager_debug!("debug {}", 2);
        crate::pager_info!("info");
        crate::pager_warn!("warn {value}", value = 3);
        crate::pager_error!("error");
    }
}
