//! Drawing surfaces and the scene pass.

/// `vello_cpu` raster surface.
pub mod cpu;
/// Background and flower pass shared by the live loop and export.
pub mod scene;
/// Surface trait and the recording test surface.
pub mod surface;
