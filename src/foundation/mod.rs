/// Sizes, frames and geometry re-exports.
pub mod core;
/// Error taxonomy.
pub mod error;
/// Straight-alpha colors, hex and HSL.
pub mod color;
pub(crate) mod math;
