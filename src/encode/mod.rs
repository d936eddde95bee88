//! Output sinks.
//!
//! Sinks consume captured frames; the export engine decides which one receives them.

/// Looping GIF output via the `image` crate.
pub mod gif;
/// PNG still output via the `image` crate.
pub mod png;
/// Sink traits and in-memory sinks.
pub mod sink;
