//! JSON session scripts: a recorded sequence of pointer, tick and settings events.

/// Session model, validation and replay.
pub mod script;
