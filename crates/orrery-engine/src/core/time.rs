/// Frame clock with a fixed-timestep accumulator.
///
/// The browser hands us absolute `performance.now()` timestamps in
/// milliseconds; the clock turns them into frame deltas and then into a
/// whole number of fixed simulation ticks, so the scene advances at the
/// same rate regardless of display refresh.
pub struct FrameClock {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
    /// Upper bound on ticks per frame (spiral-of-death guard).
    max_steps: u32,
    /// Timestamp of the previous frame, if any.
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new(dt: f32) -> Self {
        Self {
            dt: dt.max(1e-4),
            accumulator: 0.0,
            max_steps: 10,
            last_ms: None,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Seconds elapsed since the previous timestamp.
    /// The first call, and any timestamp that runs backwards, yields 0.
    pub fn frame_delta(&mut self, now_ms: f64) -> f32 {
        let delta = match self.last_ms {
            Some(last) if now_ms > last => ((now_ms - last) / 1000.0) as f32,
            _ => 0.0,
        };
        self.last_ms = Some(now_ms);
        delta
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// `frame_delta` followed by `accumulate`.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let frame_dt = self.frame_delta(now_ms);
        self.accumulate(frame_dt)
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Forget the previous timestamp, e.g. after the tab was hidden.
    pub fn reset(&mut self) {
        self.last_ms = None;
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_has_zero_delta() {
        let mut clock = FrameClock::new(1.0 / 60.0);
        assert_eq!(clock.frame_delta(1234.0), 0.0);
        let d = clock.frame_delta(1234.0 + 500.0);
        assert!((d - 0.5).abs() < 1e-6, "d = {d}");
    }

    #[test]
    fn backwards_timestamp_is_ignored() {
        let mut clock = FrameClock::new(1.0 / 60.0);
        clock.frame_delta(1000.0);
        assert_eq!(clock.frame_delta(900.0), 0.0);
        let d = clock.frame_delta(1000.0);
        assert!((d - 0.1).abs() < 1e-6, "d = {d}");
    }

    #[test]
    fn one_step_exact() {
        let mut clock = FrameClock::new(1.0 / 60.0);
        assert_eq!(clock.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut clock = FrameClock::new(1.0 / 60.0);
        assert_eq!(clock.accumulate(0.008), 0); // half a tick
        assert_eq!(clock.accumulate(0.010), 1); // over one tick total
    }

    #[test]
    fn caps_at_max_steps() {
        let mut clock = FrameClock::new(1.0 / 60.0);
        assert_eq!(clock.accumulate(1.0), 10);
        let mut clock = FrameClock::new(1.0 / 60.0).with_max_steps(3);
        assert_eq!(clock.accumulate(1.0), 3);
    }

    #[test]
    fn advance_runs_from_timestamps() {
        let mut clock = FrameClock::new(0.01);
        assert_eq!(clock.advance(0.0), 0);
        assert_eq!(clock.advance(25.0), 2);
        let a = clock.alpha();
        assert!(a >= 0.0 && a <= 1.0, "alpha was {a}");
    }

    #[test]
    fn reset_forgets_last_timestamp() {
        let mut clock = FrameClock::new(1.0 / 60.0);
        clock.advance(0.0);
        clock.reset();
        assert_eq!(clock.advance(10_000.0), 0);
    }
}
