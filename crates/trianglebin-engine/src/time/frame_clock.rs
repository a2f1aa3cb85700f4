use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,
    /// Exponentially smoothed `dt`, for on-screen readouts.
    pub smoothed_dt: f32,
    pub now: Instant,
    pub frame_index: u64,
}

impl FrameTime {
    /// Smoothed frame time in milliseconds.
    pub fn frame_ms(&self) -> f32 {
        self.smoothed_dt * 1000.0
    }

    /// Smoothed frames per second.
    pub fn fps(&self) -> f32 {
        if self.smoothed_dt > 0.0 { 1.0 / self.smoothed_dt } else { 0.0 }
    }
}

/// Produces `FrameTime` snapshots.
///
/// Delta time is clamped so stalls (debugger, minimised window) do not
/// produce pathological readouts.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    smoothed: Option<f32>,
    dt_min: Duration,
    dt_max: Duration,
}

/// Weight of the newest sample in the smoothed frame time.
const SMOOTHING: f32 = 0.1;

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(10), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            smoothed: None,
            dt_min,
            dt_max,
        }
    }

    /// Resets the baseline, e.g. after the surface was reconfigured.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        self.advance(elapsed, now)
    }

    fn advance(&mut self, elapsed: Duration, now: Instant) -> FrameTime {
        let dt = elapsed.clamp(self.dt_min, self.dt_max).as_secs_f32();
        let smoothed = match self.smoothed {
            Some(prev) => prev + (dt - prev) * SMOOTHING,
            None => dt,
        };
        self.smoothed = Some(smoothed);

        let ft = FrameTime {
            dt,
            smoothed_dt: smoothed,
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dt_is_clamped() {
        let mut clock = FrameClock::with_clamps(Duration::from_millis(1), Duration::from_millis(100));
        let now = Instant::now();
        assert_eq!(clock.advance(Duration::ZERO, now).dt, 0.001);
        assert_eq!(clock.advance(Duration::from_secs(5), now).dt, 0.1);
    }

    #[test]
    fn frame_index_increments() {
        let mut clock = FrameClock::new();
        let now = Instant::now();
        let a = clock.advance(Duration::from_millis(16), now);
        let b = clock.advance(Duration::from_millis(16), now);
        assert_eq!(a.frame_index + 1, b.frame_index);
    }

    #[test]
    fn smoothing_converges_towards_samples() {
        let mut clock = FrameClock::new();
        let now = Instant::now();
        let first = clock.advance(Duration::from_millis(10), now);
        assert!((first.frame_ms() - 10.0).abs() < 1e-3);

        let mut last = first;
        for _ in 0..200 {
            last = clock.advance(Duration::from_millis(20), now);
        }
        assert!((last.frame_ms() - 20.0).abs() < 0.01);
        assert!((last.fps() - 50.0).abs() < 0.1);
    }
}
