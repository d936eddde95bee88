//! Flowers and the ordered collection that owns them.

/// One bloom: spec, state and draw routine.
pub mod entity;
/// Insertion-ordered flower registry.
pub mod registry;
