//! Internal utilities.

pub mod log_sanitizer;
