//! Still and looping animated export.

/// Export job, outcomes and the still-image fallback.
pub mod engine;
