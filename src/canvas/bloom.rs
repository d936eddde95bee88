use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::palette::Palette;
use crate::config::settings::Settings;
use crate::flower::entity::{Flower, FlowerSpec};
use crate::flower::registry::FlowerRegistry;
use crate::foundation::core::{Canvas, FrameRGBA, Point};
use crate::foundation::error::BloomResult;
use crate::interaction::controller::{
    InteractionController, InteractionState, PointerEvent, ViewportMapping,
};
use crate::render::cpu::CpuSurface;
use crate::render::scene::paint_background;
use crate::render::surface::Surface;

/// Result of one render-loop tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickStatus {
    /// Flowers were advanced and the frame drawn.
    Rendered,
    /// No surface is attached; nothing changed.
    NoSurface,
    /// An export owns the flower rotations; nothing changed.
    Exporting,
    /// The canvas was shut down.
    Stopped,
}

/// The live canvas: settings, flowers, pointer state and the drawing surface.
///
/// Everything runs on one thread. Pointer events mutate state synchronously; [`BloomCanvas::tick`]
/// advances and draws one frame.
pub struct BloomCanvas {
    settings: Settings,
    flowers: FlowerRegistry,
    controller: InteractionController,
    rng: StdRng,
    surface: Option<Box<dyn Surface>>,
    canvas: Canvas,
    exporting: bool,
    shut_down: bool,
    frames: u64,
}

impl std::fmt::Debug for BloomCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BloomCanvas")
            .field("canvas", &self.canvas)
            .field("flowers", &self.flowers.len())
            .field("state", &self.controller.state())
            .field("has_surface", &self.surface.is_some())
            .field("exporting", &self.exporting)
            .field("shut_down", &self.shut_down)
            .finish()
    }
}

impl BloomCanvas {
    /// Attach to an existing surface. `seed` drives every per-flower random choice.
    pub fn new(surface: Box<dyn Surface>, settings: Settings, seed: u64) -> Self {
        let canvas = surface.canvas();
        Self::build(Some(surface), canvas, settings, seed)
    }

    /// Canvas backed by a fresh [`CpuSurface`].
    pub fn with_cpu(canvas: Canvas, settings: Settings, seed: u64) -> BloomResult<Self> {
        let surface = CpuSurface::new(canvas)?;
        Ok(Self::new(Box::new(surface), settings, seed))
    }

    /// Canvas whose drawing context is unavailable; frame work is skipped.
    pub fn detached(canvas: Canvas, settings: Settings, seed: u64) -> Self {
        Self::build(None, canvas, settings, seed)
    }

    fn build(
        surface: Option<Box<dyn Surface>>,
        canvas: Canvas,
        settings: Settings,
        seed: u64,
    ) -> Self {
        Self {
            settings,
            flowers: FlowerRegistry::new(),
            controller: InteractionController::new(ViewportMapping::identity(canvas)),
            rng: StdRng::seed_from_u64(seed),
            surface,
            canvas,
            exporting: false,
            shut_down: false,
            frames: 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the defaults for new flowers. Existing flowers keep their parameters; only a
    /// forced rotation direction reaches them, on the next tick.
    pub fn set_settings(&mut self, settings: Settings) {
        tracing::debug!(?settings, "settings updated");
        self.settings = settings;
    }

    pub fn palette(&self) -> &'static Palette {
        self.settings.palette()
    }

    pub fn flowers(&self) -> &FlowerRegistry {
        &self.flowers
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.controller.state()
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Ticks that actually rendered.
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// `true` only while an animated export is in flight.
    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Feed one pointer/touch event observed at host time `now`.
    ///
    /// Returns `true` when a flower was spawned.
    pub fn handle_pointer(&mut self, event: PointerEvent, now: Duration) -> bool {
        if self.shut_down {
            return false;
        }
        let Some(req) = self.controller.handle(event, now) else {
            return false;
        };
        if !req.keep_previous_active {
            self.flowers.deactivate_all();
        }
        self.spawn_at(req.at);
        true
    }

    fn spawn_at(&mut self, at: Point) {
        let spec = FlowerSpec::from_settings(at, &self.settings, &mut self.rng);
        tracing::debug!(
            x = at.x,
            y = at.y,
            radius = spec.base_radius,
            petals = spec.petal_count,
            color = %spec.color.to_hex(),
            "spawn flower"
        );
        self.flowers.push(Flower::new(spec));
    }

    /// One render-loop frame: background, then rotate, grow and draw every flower in order.
    #[tracing::instrument(level = "trace", skip(self), fields(flowers = self.flowers.len()))]
    pub fn tick(&mut self) -> TickStatus {
        if self.shut_down {
            return TickStatus::Stopped;
        }
        if self.exporting {
            return TickStatus::Exporting;
        }
        let Some(surface) = self.surface.as_deref_mut() else {
            tracing::trace!("no surface, tick skipped");
            return TickStatus::NoSurface;
        };

        paint_background(surface, self.settings.palette());

        let grow = self.settings.animation_enabled && self.controller.is_pointer_down();
        let direction = Some(self.settings.rotation_direction);
        for flower in self.flowers.iter_mut() {
            flower.advance_rotation(direction);
            if grow {
                flower.advance_growth();
            }
            flower.render(surface);
        }

        self.frames += 1;
        TickStatus::Rendered
    }

    /// Empty the registry. There is no undo; pointer state is left as is.
    pub fn clear_all(&mut self) {
        tracing::info!(removed = self.flowers.len(), "clear all flowers");
        self.flowers.clear();
    }

    /// Replace the backing size; the display mapping resets to 1:1.
    pub fn resize(&mut self, canvas: Canvas) -> BloomResult<()> {
        if let Some(surface) = self.surface.as_deref_mut() {
            surface.resize(canvas)?;
        }
        self.canvas = canvas;
        self.controller
            .set_mapping(ViewportMapping::identity(canvas));
        tracing::debug!(width = canvas.width, height = canvas.height, "resized");
        Ok(())
    }

    /// Describe where and how large the surface is displayed, for pointer scale correction.
    pub fn set_display(&mut self, origin: Point, width: f64, height: f64) -> BloomResult<()> {
        let mapping = ViewportMapping::new(origin, width, height, self.canvas)?;
        self.controller.set_mapping(mapping);
        Ok(())
    }

    /// Tear down: drop the surface and stop ticking.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.surface = None;
        tracing::info!(frames = self.frames, "canvas shut down");
    }

    /// Read back the surface's current content. `None` when no surface is attached.
    pub fn capture(&mut self) -> BloomResult<Option<FrameRGBA>> {
        match self.surface.as_deref_mut() {
            Some(surface) => surface.read_frame().map(Some),
            None => Ok(None),
        }
    }

    /// Split borrow used by the export engine.
    pub(crate) fn export_parts(
        &mut self,
    ) -> Option<(&mut dyn Surface, &'static Palette, &mut FlowerRegistry)> {
        let palette = self.settings.palette();
        let surface = self.surface.as_deref_mut()?;
        Some((surface, palette, &mut self.flowers))
    }

    pub(crate) fn set_exporting(&mut self, exporting: bool) {
        self.exporting = exporting;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/bloom.rs"]
mod tests;
