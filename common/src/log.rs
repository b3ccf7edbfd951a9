//! Thin wrappers around `tracing` so every crate logs through the same targets.
//!
//! The CLI formatter renders [`SUCCESS_TARGET`] events with a distinct marker and
//! prints [`PRINT_TARGET`] events verbatim.

pub const SUCCESS_TARGET: &str = "nxprof::success";
pub const PRINT_TARGET: &str = "nxprof::print";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "nxprof::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::tracing::error!($($arg)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::tracing::debug!($($arg)*)
    };
}
