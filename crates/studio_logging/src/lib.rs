#![deny(missing_docs)]
//! Shared logging utilities for the studio workspace.
//!
//! Every crate logs through the `studio_*` macros below so the backend behind
//! the `log` facade can be swapped in one place. The binary installs the real
//! logger; tests call [`initialize_for_tests`].

/// Environment variable that overrides the level used by [`initialize_for_tests`].
pub const TEST_LEVEL_ENV: &str = "STUDIO_TEST_LOG";

#[doc(hidden)]
#[macro_export]
macro_rules! __studio_log {
    ($level:expr, $($arg:tt)*) => {{
        log::log!(target: "studio", $level, $($arg)*);
    }};
}

/// Logs a trace-level message under the `studio` target.
#[macro_export]
macro_rules! studio_trace {
    ($($arg:tt)*) => {
        $crate::__studio_log!(log::Level::Trace, $($arg)*)
    };
}

/// Logs a debug-level message under the `studio` target.
#[macro_export]
macro_rules! studio_debug {
    ($($arg:tt)*) => {
        $crate::__studio_log!(log::Level::Debug, $($arg)*)
    };
}

/// Logs an info-level message under the `studio` target.
#[macro_export]
macro_rules! studio_info {
    ($($arg:tt)*) => {
        $crate::__studio_log!(log::Level::Info, $($arg)*)
    };
}

/// Logs a warn-level message under the `studio` target.
#[macro_export]
macro_rules! studio_warn {
    ($($arg:tt)*) => {
        $crate::__studio_log!(log::Level::Warn, $($arg)*)
    };
}

/// Logs an error-level message under the `studio` target.
#[macro_export]
macro_rules! studio_error {
    ($($arg:tt)*) => {
        $crate::__studio_log!(log::Level::Error, $($arg)*)
    };
}

/// Parses a level name such as `debug` or `WARN`; `None` for anything else.
pub fn parse_level(raw: &str) -> Option<log::LevelFilter> {
    raw.trim().parse().ok()
}

/// Initializes a terminal logger for use in tests.
///
/// The level comes from [`TEST_LEVEL_ENV`] when set, else debug in debug
/// builds and info in release builds. Safe to call from every test: a second
/// initialization is ignored.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let fallback = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let level = std::env::var(TEST_LEVEL_ENV)
        .ok()
        .and_then(|raw| parse_level(&raw))
        .unwrap_or(fallback);

    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Never,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_names_case_insensitively() {
        assert_eq!(parse_level("warn"), Some(log::LevelFilter::Warn));
        assert_eq!(parse_level(" DEBUG "), Some(log::LevelFilter::Debug));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn macros_accept_format_arguments() {
        initialize_for_tests();
        let video = "clip1.mp4";
        studio_info!("selected {}", video);
        studio_debug!("poll tick {tick}", tick = 3);
        studio_warn!("{video} failed");
    }
}
