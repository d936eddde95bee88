//! opbloom is a procedural op-art flower canvas engine.
//!
//! Pointer input spawns flowers that bloom outward in wavy concentric layers and rotate
//! forever. The engine is host-driven:
//!
//! - Build a [`BloomCanvas`] over a [`Surface`] (the [`CpuSurface`] rasterizes with `vello_cpu`)
//! - Feed [`PointerEvent`]s and call [`BloomCanvas::tick`] once per frame (or drive it with a
//!   [`RenderLoop`])
//! - Export the current composition as a still or a seamless looping animation with
//!   [`export_still`] / [`export_animation`]
#![forbid(unsafe_code)]

mod foundation;

/// Live canvas and render loop.
pub mod canvas;
/// Settings and palettes.
pub mod config;
/// Output sinks.
pub mod encode;
/// Still and animated export.
pub mod export;
/// Flower entities and registry.
pub mod flower;
/// Wavy outline geometry.
pub mod geometry;
/// Pointer interaction.
pub mod interaction;
/// Drawing surfaces.
pub mod render;
/// Scripted sessions.
pub mod session;

pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{Affine, BezPath, Canvas, FrameRGBA, Point, Vec2};
pub use crate::foundation::error::{BloomError, BloomResult};

pub use crate::canvas::bloom::{BloomCanvas, TickStatus};
pub use crate::canvas::frame_loop::{FixedFrames, FrameSource, LoopStats, RenderLoop};
pub use crate::config::palette::{Palette, PaletteKey};
pub use crate::config::settings::{RotationDirection, Settings};
pub use crate::encode::gif::{GifSink, GifSinkOpts};
pub use crate::encode::png::PngSink;
pub use crate::encode::sink::{
    AnimationConfig, AnimationSink, InMemoryAnimation, InMemoryStill, StillSink,
};
pub use crate::export::engine::{
    EXPORT_FRAME_DELAY, EXPORT_FRAMES, ExportJob, ExportOutcome, export_animation, export_still,
};
pub use crate::flower::entity::{Flower, FlowerSpec};
pub use crate::flower::registry::FlowerRegistry;
pub use crate::interaction::controller::{
    InteractionController, InteractionState, PointerEvent, SpawnRequest, ViewportMapping,
};
pub use crate::render::cpu::CpuSurface;
pub use crate::render::surface::{DrawCall, GradientStop, RecordingSurface, Surface};
pub use crate::session::script::{ReplayStats, Session, SessionAction, SessionEvent};
