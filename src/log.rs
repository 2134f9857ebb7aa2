//! Utilities for logging messages from the converter.

use once_cell::sync::Lazy;

#[doc(hidden)]
#[macro_export]
macro_rules! convert_log {
    (
        $session:expr,
        $($arg:tt)+
    ) => {
        if $session.log_enabled() {
            println!("{}", format_args!($($arg)+));
        }
    };
}

/// Whether `SVG2CAIROXML_LOG` is set in the environment.
///
/// The environment is only consulted once per process.
pub(crate) fn log_enabled() -> bool {
    static ENABLED: Lazy<bool> =
        Lazy::new(|| ::std::env::var_os("SVG2CAIROXML_LOG").is_some());

    *ENABLED
}
