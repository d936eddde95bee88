use std::time::Duration;

use crate::canvas::bloom::{BloomCanvas, TickStatus};

/// Host timing source: yields the timestamp of each frame callback.
pub trait FrameSource {
    /// Next frame time, or `None` once the host stops calling back.
    fn next_frame(&mut self) -> Option<Duration>;
}

/// A fixed number of evenly spaced frames, for headless hosts and tests.
#[derive(Clone, Debug)]
pub struct FixedFrames {
    remaining: u64,
    interval: Duration,
    now: Duration,
}

impl FixedFrames {
    /// Nominal display refresh interval.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_nanos(16_666_667);

    pub fn new(count: u64) -> Self {
        Self::starting_at(count, Duration::ZERO)
    }

    pub fn starting_at(count: u64, start: Duration) -> Self {
        Self {
            remaining: count,
            interval: Self::DEFAULT_INTERVAL,
            now: start,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl FrameSource for FixedFrames {
    fn next_frame(&mut self) -> Option<Duration> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let t = self.now;
        self.now += self.interval;
        Some(t)
    }
}

/// Counters reported by [`RenderLoop::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub rendered: u64,
    pub skipped: u64,
    /// Host time of the last frame, if any.
    pub last_frame_at: Option<Duration>,
}

/// Drives [`BloomCanvas::tick`] from a [`FrameSource`].
#[derive(Debug)]
pub struct RenderLoop<S> {
    source: S,
}

impl<S: FrameSource> RenderLoop<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Tick until the source runs dry or the canvas is shut down.
    pub fn run(&mut self, canvas: &mut BloomCanvas) -> LoopStats {
        let mut stats = LoopStats::default();
        while !canvas.is_shut_down() {
            let Some(at) = self.source.next_frame() else {
                break;
            };
            stats.last_frame_at = Some(at);
            match canvas.tick() {
                TickStatus::Rendered => stats.rendered += 1,
                TickStatus::Stopped => break,
                TickStatus::NoSurface | TickStatus::Exporting => stats.skipped += 1,
            }
        }
        if stats.skipped > 0 {
            tracing::warn!(skipped = stats.skipped, "frames skipped");
        }
        stats
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/frame_loop.rs"]
mod tests;
