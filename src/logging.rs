//! Structured logging setup.
//!
//! Logs go to stderr through `tracing-subscriber`. `RUST_LOG` takes precedence
//! over the configured filter. Panics are routed into the log as well.

use std::panic;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `default_filter` is used when `RUST_LOG` is unset or unparsable. Calling this
/// more than once is harmless; later calls leave the first subscriber in place.
pub fn init(default_filter: &str) {
    let subscriber =
        tracing_subscriber::fmt().with_env_filter(build_filter(default_filter)).with_target(false);
    if subscriber.try_init().is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Pick the filter: `RUST_LOG`, then `default_filter`, then `info`.
fn build_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Extract the message from a panic payload.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}

/// Format a panic location for logging.
fn format_panic_location(location: Option<&panic::Location<'_>>) -> String {
    location.map_or_else(
        || "unknown".to_string(),
        |loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()),
    )
}

/// Install a panic hook that logs panics before running the previous hook.
///
/// This should be called after [`init`].
#[allow(deprecated)] // PanicInfo is deprecated but PanicHookInfo requires Rust 1.81+
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info: &panic::PanicInfo<'_>| {
        let location = format_panic_location(info.location());
        let message = panic_message(info.payload());
        tracing::error!(%location, "panic: {message}");

        // Backtrace::capture() is disabled unless RUST_BACKTRACE is set
        let backtrace = std::backtrace::Backtrace::capture();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            tracing::error!("backtrace:\n{backtrace}");
        }

        original_hook(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_str() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
    }

    #[test]
    fn test_panic_message_string() {
        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("kaboom"));
        assert_eq!(panic_message(payload.as_ref()), "kaboom");
    }

    #[test]
    fn test_panic_message_unknown() {
        let payload: Box<dyn std::any::Any + Send> = Box::new(42_u32);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic payload");
    }

    #[test]
    fn test_format_panic_location() {
        assert_eq!(format_panic_location(None), "unknown");

        let location = panic::Location::caller();
        let formatted = format_panic_location(Some(location));
        assert!(formatted.starts_with(file!()));
    }

    fn with_rust_log<T>(value: Option<&str>, f: impl FnOnce() -> T) -> T {
        let saved = std::env::var("RUST_LOG").ok();
        match value {
            Some(v) => std::env::set_var("RUST_LOG", v),
            None => std::env::remove_var("RUST_LOG"),
        }
        let result = f();
        match saved {
            Some(v) => std::env::set_var("RUST_LOG", v),
            None => std::env::remove_var("RUST_LOG"),
        }
        result
    }

    #[test]
    #[serial_test::serial]
    fn test_build_filter_prefers_rust_log() {
        let filter = with_rust_log(Some("warn"), || build_filter("debug"));
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    #[serial_test::serial]
    fn test_build_filter_uses_default() {
        let filter = with_rust_log(None, || build_filter("spaced_review=debug"));
        assert_eq!(filter.to_string(), "spaced_review=debug");
    }

    #[test]
    #[serial_test::serial]
    fn test_build_filter_falls_back_to_info() {
        let filter = with_rust_log(None, || build_filter("spaced_review=loud"));
        assert_eq!(filter.to_string(), "info");
    }

    #[test]
    #[serial_test::serial]
    fn test_init_twice_is_harmless() {
        init("debug");
        init("spaced_review=loud");
    }
}
