//! Surface lifecycle: size tracking and the cancellable frame loop.
//!
//! The frame loop turns wall-clock time into whole simulation ticks of a
//! fixed length, so animation speed does not depend on how often the host
//! repaints. It is acquired when the engine is mounted and must be cancelled
//! on teardown; a cancelled loop never yields ticks again.

use std::time::{Duration, Instant};

/// Upper bound on ticks replayed in one frame after a stall.
pub const MAX_TICKS_PER_FRAME: u32 = 4;

/// Pixel size of the drawing surface, rounded to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    /// `None` for an absent (zero, negative or non-finite) surface.
    pub fn from_pixels(width: f64, height: f64) -> Option<Self> {
        if !width.is_finite() || !height.is_finite() {
            return None;
        }
        let width = width.round();
        let height = height.round();
        if width < 1.0 || height < 1.0 {
            return None;
        }
        Some(Self {
            width: width as u32,
            height: height as u32,
        })
    }

    pub fn width_f64(self) -> f64 {
        self.width as f64
    }

    pub fn height_f64(self) -> f64 {
        self.height as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Idle,
    Active,
    Cancelled,
}

/// Fixed-step frame loop handle.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    interval: Duration,
    state: LoopState,
    last: Option<Instant>,
    backlog: Duration,
}

impl FrameLoop {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            state: LoopState::Idle,
            last: None,
            backlog: Duration::ZERO,
        }
    }

    /// Start (or restart) ticking from `now`. A cancelled loop stays cancelled.
    pub fn start(&mut self, now: Instant) {
        if self.state == LoopState::Cancelled {
            return;
        }
        self.state = LoopState::Active;
        self.last = Some(now);
        self.backlog = Duration::ZERO;
    }

    /// Release the loop for good.
    pub fn cancel(&mut self) {
        if self.state != LoopState::Cancelled {
            log::debug!("Frame loop cancelled");
        }
        self.state = LoopState::Cancelled;
        self.last = None;
        self.backlog = Duration::ZERO;
    }

    pub fn is_active(&self) -> bool {
        self.state == LoopState::Active
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == LoopState::Cancelled
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of whole ticks that elapsed since the previous call.
    ///
    /// Capped at [`MAX_TICKS_PER_FRAME`]; time beyond the cap is discarded.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        if self.state != LoopState::Active {
            return 0;
        }
        let last = self.last.unwrap_or(now);
        self.backlog += now.saturating_duration_since(last);
        self.last = Some(now);

        let due = self.backlog.as_nanos() / self.interval.as_nanos();
        if due >= MAX_TICKS_PER_FRAME as u128 {
            self.backlog = Duration::ZERO;
            return MAX_TICKS_PER_FRAME;
        }
        let due = due as u32;
        self.backlog -= self.interval * due;
        due
    }
}
