//! Pointer/touch state machine that decides where flowers are spawned.
//!
//! ```text
//!   idle --down--> growing --move > 1 unit--> painting
//!     ^               |                          |
//!     +---- up / leave / blur (from any state) --+
//! ```

use std::time::Duration;

use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{BloomError, BloomResult};

/// Minimum distance between consecutive brush spawns, in surface units.
pub const BRUSH_SPACING: f64 = 8.0;
/// Minimum time between consecutive brush spawns; elapsed time must exceed it.
pub const BRUSH_THROTTLE: Duration = Duration::from_millis(30);
/// Displacement from the anchor that turns a hold into a brush stroke.
pub const PAINT_THRESHOLD: f64 = 1.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Pointer held, not yet moved past the threshold.
    Growing,
    /// Pointer held and dragged: brush mode.
    Painting,
}

/// Pointer input in display (client) coordinates.
///
/// Touch start/move/end map onto `Down`/`Move`/`Up`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointerEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
    /// Pointer left the drawing surface.
    Leave,
    /// The host window lost focus.
    Blur,
}

/// What the controller asks the canvas to do after an event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnRequest {
    /// Surface coordinates.
    pub at: Point,
    /// `false` in single-focus mode: every existing flower is deactivated first.
    pub keep_previous_active: bool,
}

/// Maps display coordinates onto the surface's backing resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportMapping {
    /// Top-left of the displayed surface in client coordinates.
    pub origin: Point,
    pub display_width: f64,
    pub display_height: f64,
    pub backing: Canvas,
}

impl ViewportMapping {
    /// Display size equal to the backing size, no offset.
    pub fn identity(backing: Canvas) -> Self {
        Self {
            origin: Point::ORIGIN,
            display_width: f64::from(backing.width),
            display_height: f64::from(backing.height),
            backing,
        }
    }

    pub fn new(
        origin: Point,
        display_width: f64,
        display_height: f64,
        backing: Canvas,
    ) -> BloomResult<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(display_width) || !valid(display_height) {
            return Err(BloomError::validation(
                "display width/height must be finite and > 0",
            ));
        }
        Ok(Self {
            origin,
            display_width,
            display_height,
            backing,
        })
    }

    pub fn scale(&self) -> (f64, f64) {
        (
            f64::from(self.backing.width) / self.display_width,
            f64::from(self.backing.height) / self.display_height,
        )
    }

    pub fn to_surface(&self, client: Point) -> Point {
        let (sx, sy) = self.scale();
        Point::new(
            (client.x - self.origin.x) * sx,
            (client.y - self.origin.y) * sy,
        )
    }
}

/// Tracks one pointer's press/drag lifecycle.
#[derive(Clone, Debug)]
pub struct InteractionController {
    state: InteractionState,
    mapping: ViewportMapping,
    anchor: Option<Point>,
    last_spawn_pos: Option<Point>,
    last_spawn_at: Option<Duration>,
}

impl InteractionController {
    pub fn new(mapping: ViewportMapping) -> Self {
        Self {
            state: InteractionState::Idle,
            mapping,
            anchor: None,
            last_spawn_pos: None,
            last_spawn_at: None,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// True while growth is enabled: the pointer is held down.
    pub fn is_pointer_down(&self) -> bool {
        self.state != InteractionState::Idle
    }

    pub fn anchor(&self) -> Option<Point> {
        self.anchor
    }

    pub fn last_spawn_position(&self) -> Option<Point> {
        self.last_spawn_pos
    }

    pub fn mapping(&self) -> &ViewportMapping {
        &self.mapping
    }

    pub fn set_mapping(&mut self, mapping: ViewportMapping) {
        self.mapping = mapping;
    }

    /// Feed one event observed at host time `now`.
    pub fn handle(&mut self, event: PointerEvent, now: Duration) -> Option<SpawnRequest> {
        match event {
            PointerEvent::Down { x, y } => {
                let at = self.mapping.to_surface(Point::new(x, y));
                self.state = InteractionState::Growing;
                self.anchor = Some(at);
                // Spacing starts here; the throttle clock only counts brush spawns.
                self.last_spawn_pos = Some(at);
                tracing::debug!(x = at.x, y = at.y, "pointer down, growing");
                Some(SpawnRequest {
                    at,
                    keep_previous_active: false,
                })
            }
            PointerEvent::Move { x, y } => self.on_move(Point::new(x, y), now),
            PointerEvent::Up | PointerEvent::Leave | PointerEvent::Blur => {
                if self.state != InteractionState::Idle {
                    tracing::debug!(?event, from = ?self.state, "pointer released");
                }
                self.release();
                None
            }
        }
    }

    fn on_move(&mut self, client: Point, now: Duration) -> Option<SpawnRequest> {
        let (Some(anchor), Some(last)) = (self.anchor, self.last_spawn_pos) else {
            return None;
        };
        if self.state == InteractionState::Idle {
            return None;
        }

        let at = self.mapping.to_surface(client);
        if self.state == InteractionState::Growing {
            if at.distance(anchor) <= PAINT_THRESHOLD {
                return None;
            }
            self.state = InteractionState::Painting;
            tracing::debug!("brush mode");
        }

        if at.distance(last) < BRUSH_SPACING {
            return None;
        }
        let throttled = self
            .last_spawn_at
            .is_some_and(|t| now.saturating_sub(t) <= BRUSH_THROTTLE);
        if throttled {
            return None;
        }

        self.last_spawn_pos = Some(at);
        self.last_spawn_at = Some(now);
        Some(SpawnRequest {
            at,
            keep_previous_active: true,
        })
    }

    fn release(&mut self) {
        self.state = InteractionState::Idle;
        self.anchor = None;
        self.last_spawn_pos = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/controller.rs"]
mod tests;
