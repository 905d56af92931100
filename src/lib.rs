pub mod core;

/// Crate semantic version (major.minor.patch), exposed for dependents.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
