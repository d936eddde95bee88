//! The live canvas and the loop that ticks it.

/// `BloomCanvas`: settings, flowers, pointer state and surface.
pub mod bloom;
/// Frame sources and the render loop.
pub mod frame_loop;
