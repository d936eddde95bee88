//! Looping animated export of the current composition.
//!
//! Each flower turns exactly one revolution over [`EXPORT_FRAMES`] frames regardless of its live
//! speed, so the last frame flows into the first. The job is an explicit step sequence that owns
//! the flower rotations while it runs and always puts them back.

use std::f64::consts::TAU;
use std::time::Duration;

use crate::canvas::bloom::BloomCanvas;
use crate::config::palette::Palette;
use crate::encode::sink::{AnimationConfig, AnimationSink, StillSink};
use crate::flower::registry::FlowerRegistry;
use crate::foundation::core::Canvas;
use crate::foundation::error::{BloomError, BloomResult};
use crate::render::scene::draw_scene;
use crate::render::surface::Surface;

/// Frames in one exported loop.
pub const EXPORT_FRAMES: u32 = 40;
/// Display time of each exported frame (1000/15 ms).
pub const EXPORT_FRAME_DELAY: Duration = Duration::from_nanos(1_000_000_000 / 15);

/// What an export call produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Looping animation with this many frames.
    Animated { frames: u32 },
    /// Still image; the registry was empty.
    Still,
    /// Still image written after the animated path failed.
    StillFallback { reason: String },
    /// No surface is attached; nothing was written.
    Skipped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Begin,
    Frame(u32),
    Finish,
    Done,
}

/// Progress reported by [`ExportJob::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Complete,
}

/// One animated export in flight.
///
/// Rotations are snapshotted on creation. Every `Frame` step overwrites them and
/// [`ExportJob::restore`] writes the snapshot back.
#[derive(Clone, Debug)]
pub struct ExportJob {
    snapshot: Vec<f64>,
    directions: Vec<f64>,
    canvas: Canvas,
    frame_count: u32,
    delay: Duration,
    next: Step,
}

impl ExportJob {
    pub fn new(flowers: &FlowerRegistry, canvas: Canvas) -> Self {
        Self {
            snapshot: flowers.rotations(),
            directions: flowers.iter().map(|f| f.direction()).collect(),
            canvas,
            frame_count: EXPORT_FRAMES,
            delay: EXPORT_FRAME_DELAY,
            next: Step::Begin,
        }
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn is_done(&self) -> bool {
        self.next == Step::Done
    }

    /// Rotation of flower `index` at export frame `frame`.
    pub fn rotation_at(&self, index: usize, frame: u32) -> Option<f64> {
        let base = *self.snapshot.get(index)?;
        let dir = *self.directions.get(index)?;
        let increment = TAU / f64::from(self.frame_count);
        Some(base + f64::from(frame) * increment * dir)
    }

    /// Run the next step. Errors leave rotations modified; call [`ExportJob::restore`].
    pub fn step(
        &mut self,
        surface: &mut dyn Surface,
        palette: &Palette,
        flowers: &mut FlowerRegistry,
        sink: &mut dyn AnimationSink,
    ) -> BloomResult<StepStatus> {
        match self.next {
            Step::Begin => {
                sink.begin(AnimationConfig {
                    width: self.canvas.width,
                    height: self.canvas.height,
                    frame_count: self.frame_count,
                    looping: true,
                })?;
                self.next = if self.frame_count == 0 {
                    Step::Finish
                } else {
                    Step::Frame(0)
                };
                Ok(StepStatus::Pending)
            }
            Step::Frame(i) => {
                for (index, flower) in flowers.iter_mut().enumerate() {
                    if let Some(r) = self.rotation_at(index, i) {
                        flower.set_rotation(r);
                    }
                }
                draw_scene(surface, palette, flowers);
                let frame = surface.read_frame()?;
                sink.push_frame(&frame, self.delay)?;
                self.next = if i + 1 < self.frame_count {
                    Step::Frame(i + 1)
                } else {
                    Step::Finish
                };
                Ok(StepStatus::Pending)
            }
            Step::Finish => {
                self.restore(flowers);
                sink.end()?;
                self.next = Step::Done;
                Ok(StepStatus::Complete)
            }
            Step::Done => Ok(StepStatus::Complete),
        }
    }

    /// Put every snapshotted rotation back.
    pub fn restore(&self, flowers: &mut FlowerRegistry) {
        for (flower, rotation) in flowers.iter_mut().zip(&self.snapshot) {
            flower.set_rotation(*rotation);
        }
    }
}

/// Still-image export of the surface's current content.
pub fn export_still(
    canvas: &mut BloomCanvas,
    sink: &mut dyn StillSink,
) -> BloomResult<ExportOutcome> {
    let Some(frame) = canvas.capture()? else {
        tracing::warn!("no surface, still export skipped");
        return Ok(ExportOutcome::Skipped);
    };
    sink.write_still(&frame)?;
    tracing::info!(width = frame.width, height = frame.height, "exported still");
    Ok(ExportOutcome::Still)
}

/// Animated export with still-image fallback.
///
/// An empty registry takes the still path directly. Any failure while capturing or encoding is
/// logged and replaced by a still of the restored scene. The exporting flag is cleared on every
/// path.
#[tracing::instrument(skip_all, fields(flowers = canvas.flowers().len()))]
pub fn export_animation(
    canvas: &mut BloomCanvas,
    anim: &mut dyn AnimationSink,
    still: &mut dyn StillSink,
) -> BloomResult<ExportOutcome> {
    if canvas.is_exporting() {
        return Err(BloomError::validation("an export is already in progress"));
    }
    if !canvas.has_surface() {
        tracing::warn!("no surface, export skipped");
        return Ok(ExportOutcome::Skipped);
    }
    if canvas.flowers().is_empty() {
        tracing::info!("no flowers, exporting a still image");
        return export_still(canvas, still);
    }

    let size = canvas.canvas();
    let mut job = ExportJob::new(canvas.flowers(), size);
    tracing::info!(frames = job.frame_count(), "animated export started");

    canvas.set_exporting(true);
    let result = run_job(canvas, &mut job, anim);
    if let Some((_, _, flowers)) = canvas.export_parts() {
        job.restore(flowers);
    }
    canvas.set_exporting(false);

    match result {
        Ok(()) => {
            tracing::info!(frames = job.frame_count(), "animated export finished");
            Ok(ExportOutcome::Animated {
                frames: job.frame_count(),
            })
        }
        Err(err) => {
            tracing::warn!(error = %err, "animated export failed, falling back to still image");
            if let Some((surface, palette, flowers)) = canvas.export_parts() {
                draw_scene(surface, palette, flowers);
            }
            export_still(canvas, still)?;
            Ok(ExportOutcome::StillFallback {
                reason: err.to_string(),
            })
        }
    }
}

fn run_job(
    canvas: &mut BloomCanvas,
    job: &mut ExportJob,
    sink: &mut dyn AnimationSink,
) -> BloomResult<()> {
    let Some((surface, palette, flowers)) = canvas.export_parts() else {
        return Err(BloomError::surface("surface detached during export"));
    };
    while job.step(surface, palette, flowers, sink)? == StepStatus::Pending {}
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/engine.rs"]
mod tests;
