//! Session clock: turns animation-frame timestamps into economy time.
//!
//! Every frame reports the real seconds since the previous one, however long
//! the gap (background tabs are throttled to about one frame a second). Whole
//! ticks are counted alongside so the session can schedule autosaves.

/// What one call to [`SessionClock::update`] covered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStep {
    /// Wall-clock seconds since the previous frame.
    pub seconds: f64,
    /// Ticks completed during the frame.
    pub ticks: u32,
}

impl FrameStep {
    const IDLE: FrameStep = FrameStep { seconds: 0.0, ticks: 0 };
}

pub struct SessionClock {
    ms_per_tick: f64,
    /// Part of a tick left over from earlier frames.
    carry_ms: f64,
    last_ms: Option<f64>,
}

impl SessionClock {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec.max(1) as f64,
            carry_ms: 0.0,
            last_ms: None,
        }
    }

    /// Feed the current timestamp (ms). The first call only sets the origin.
    /// Timestamps that go backwards or are not finite advance nothing.
    pub fn update(&mut self, now_ms: f64) -> FrameStep {
        if !now_ms.is_finite() {
            return FrameStep::IDLE;
        }
        let Some(prev) = self.last_ms.replace(now_ms) else {
            return FrameStep::IDLE;
        };
        let delta = now_ms - prev;
        if !(delta > 0.0) {
            return FrameStep::IDLE;
        }

        let total = self.carry_ms + delta;
        let ticks = (total / self.ms_per_tick).floor();
        self.carry_ms = total % self.ms_per_tick;
        FrameStep {
            seconds: delta / 1000.0,
            // saturating
            ticks: ticks as u32,
        }
    }

    /// Forget the previous frame, e.g. after a reset.
    pub fn restart(&mut self) {
        self.carry_ms = 0.0;
        self.last_ms = None;
    }
}
