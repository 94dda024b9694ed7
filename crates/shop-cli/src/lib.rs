//! Library components of the storefront CLI.

pub mod logging;
pub mod settings;
