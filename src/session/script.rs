use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::canvas::bloom::BloomCanvas;
use crate::canvas::frame_loop::{FixedFrames, RenderLoop};
use crate::config::settings::Settings;
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{BloomError, BloomResult};
use crate::interaction::controller::PointerEvent;

/// Size the surface is displayed at, in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DisplayDef {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// One scripted host action.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SessionAction {
    Down {
        x: f64,
        y: f64,
    },
    Move {
        x: f64,
        y: f64,
    },
    Up,
    Leave,
    Blur,
    /// Run render-loop frames.
    Tick {
        #[serde(default = "one_frame")]
        frames: u64,
    },
    Clear,
    Settings {
        settings: Settings,
    },
}

fn one_frame() -> u64 {
    1
}

/// A scripted action at a host timestamp.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SessionEvent {
    /// Milliseconds since the session started; non-decreasing.
    #[serde(default)]
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: SessionAction,
}

/// A recorded interaction, replayable onto a [`BloomCanvas`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Session {
    pub canvas: Canvas,
    #[serde(default)]
    pub display: Option<DisplayDef>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub events: Vec<SessionEvent>,
}

/// Counters reported by [`Session::replay`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub events: usize,
    pub spawned: usize,
    pub frames_rendered: u64,
}

impl Session {
    pub fn from_json(s: &str) -> BloomResult<Self> {
        let session: Self = serde_json::from_str(s)
            .map_err(|e| BloomError::serde(format!("parse session JSON: {e}")))?;
        session.validate()?;
        Ok(session)
    }

    pub fn from_reader<R: std::io::Read>(r: R) -> BloomResult<Self> {
        let session: Self = serde_json::from_reader(r)
            .map_err(|e| BloomError::serde(format!("parse session JSON: {e}")))?;
        session.validate()?;
        Ok(session)
    }

    pub fn from_path(path: impl AsRef<Path>) -> BloomResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BloomError::validation(format!("open session JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> BloomResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| BloomError::serde(e.to_string()))
    }

    pub fn validate(&self) -> BloomResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        if let Some(d) = self.display {
            let valid = |v: f64| v.is_finite() && v > 0.0;
            if !valid(d.width) || !valid(d.height) {
                return Err(BloomError::validation(
                    "display width/height must be finite and > 0",
                ));
            }
        }
        let mut last = 0;
        for (i, ev) in self.events.iter().enumerate() {
            if ev.at_ms < last {
                return Err(BloomError::validation(format!(
                    "event {i}: at_ms {} goes back in time (previous {last})",
                    ev.at_ms
                )));
            }
            last = ev.at_ms;
            if let SessionAction::Down { x, y } | SessionAction::Move { x, y } = ev.action
                && (!x.is_finite() || !y.is_finite())
            {
                return Err(BloomError::validation(format!(
                    "event {i}: pointer coordinates must be finite"
                )));
            }
        }
        Ok(())
    }

    /// A CPU-backed canvas configured from this session's size, display, settings and seed.
    pub fn build_canvas(&self) -> BloomResult<BloomCanvas> {
        let canvas = Canvas::new(self.canvas.width, self.canvas.height)?;
        let mut bloom = BloomCanvas::with_cpu(canvas, self.settings.clamped(), self.seed)?;
        self.apply_display(&mut bloom)?;
        Ok(bloom)
    }

    fn apply_display(&self, bloom: &mut BloomCanvas) -> BloomResult<()> {
        if let Some(d) = self.display {
            bloom.set_display(Point::new(d.x, d.y), d.width, d.height)?;
        }
        Ok(())
    }

    /// Feed every event to `bloom`, in order.
    #[tracing::instrument(skip_all, fields(events = self.events.len()))]
    pub fn replay(&self, bloom: &mut BloomCanvas) -> BloomResult<ReplayStats> {
        let mut stats = ReplayStats::default();
        for ev in &self.events {
            let now = Duration::from_millis(ev.at_ms);
            let pointer = match &ev.action {
                SessionAction::Down { x, y } => Some(PointerEvent::Down { x: *x, y: *y }),
                SessionAction::Move { x, y } => Some(PointerEvent::Move { x: *x, y: *y }),
                SessionAction::Up => Some(PointerEvent::Up),
                SessionAction::Leave => Some(PointerEvent::Leave),
                SessionAction::Blur => Some(PointerEvent::Blur),
                SessionAction::Tick { frames } => {
                    let source = FixedFrames::starting_at(*frames, now);
                    stats.frames_rendered += RenderLoop::new(source).run(bloom).rendered;
                    None
                }
                SessionAction::Clear => {
                    bloom.clear_all();
                    None
                }
                SessionAction::Settings { settings } => {
                    bloom.set_settings(settings.clamped());
                    None
                }
            };
            if let Some(event) = pointer
                && bloom.handle_pointer(event, now)
            {
                stats.spawned += 1;
            }
            stats.events += 1;
        }
        tracing::info!(
            spawned = stats.spawned,
            frames = stats.frames_rendered,
            flowers = bloom.flowers().len(),
            "session replayed"
        );
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/script.rs"]
mod tests;
