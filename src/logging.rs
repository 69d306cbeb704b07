/// Conditional logging module for development builds
///
/// The `debug_log!` macro forwards to `log::debug!` and is compiled out in
/// release builds by default. Warnings should keep using `log::warn!` directly.
///
/// Logging is enabled when either:
/// - Building in debug mode (`cfg(debug_assertions)`)
/// - The `console_logging` feature is explicitly enabled
///
/// The crate never installs a logger; binaries and tests choose the backend.
///
/// # Examples
///
/// ```rust,ignore
/// use line_sections::debug_log;
///
/// debug_log!("Removed station {} from line", "Gangnam");
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)+) => {
        #[cfg(any(debug_assertions, feature = "console_logging"))]
        {
            ::log::debug!($($arg)+);
        }
    };
}
