//! Host-provided configuration for new flowers.

/// Named color palettes.
pub mod palette;
/// `Settings` and rotation direction.
pub mod settings;
