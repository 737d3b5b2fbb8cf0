use std::time::{Duration, Instant};

pub const DEFAULT_DURATION: Duration = Duration::from_millis(250);

const VISCOUS_FLUID_SCALE: f64 = 8.0;

/// Deferred value animator.
///
/// Tracks a single integer that moves from a start value toward a final
/// value over a fixed duration. Callers poll [`Scroller::compute_offset`]
/// once per frame and read [`Scroller::current`] afterwards.
#[derive(Debug, Clone)]
pub struct Scroller {
    start: i32,
    current: i32,
    final_value: i32,
    started_at: Option<Instant>,
    duration: Duration,
    finished: bool,
}

impl Default for Scroller {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

impl Scroller {
    pub fn new(duration: Duration) -> Self {
        Self {
            start: 0,
            current: 0,
            final_value: 0,
            started_at: None,
            duration,
            finished: true,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn final_value(&self) -> i32 {
        self.final_value
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn start_scroll(&mut self, start: i32, delta: i32, now: Instant) {
        self.start = start;
        self.final_value = start.saturating_add(delta);
        self.started_at = Some(now);
        self.finished = false;
    }

    /// Moves the target without restarting the clock. If the current run
    /// has already expired the next poll lands on `value` directly.
    pub fn set_final(&mut self, value: i32) {
        self.final_value = value;
        self.finished = false;
    }

    /// Stops where it is.
    pub fn force_finished(&mut self) {
        self.finished = true;
    }

    /// Stops on the final value.
    pub fn abort(&mut self) {
        self.current = self.final_value;
        self.finished = true;
    }

    /// Advances the animation to `now`. Returns `false` once finished;
    /// the poll that reaches the final value still returns `true`.
    pub fn compute_offset(&mut self, now: Instant) -> bool {
        if self.finished {
            return false;
        }

        let elapsed = self
            .started_at
            .map(|started| now.saturating_duration_since(started));

        match elapsed {
            Some(elapsed) if elapsed < self.duration => {
                let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
                let delta = f64::from(self.final_value) - f64::from(self.start);
                let offset = (interpolate(t) * delta).round();
                self.current = (f64::from(self.start) + offset) as i32;
            }
            _ => {
                self.current = self.final_value;
                self.finished = true;
            }
        }
        true
    }
}

/// Viscous fluid curve normalized so that `interpolate(1.0) == 1.0`.
pub fn interpolate(t: f64) -> f64 {
    viscous_fluid(t) / viscous_fluid(1.0)
}

fn viscous_fluid(x: f64) -> f64 {
    let x = x * VISCOUS_FLUID_SCALE;
    if x < 1.0 {
        x - (1.0 - (-x).exp())
    } else {
        // 1/e
        let start = 0.367_879_441_17;
        let x = 1.0 - (1.0 - x).exp();
        start + x * (1.0 - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolation_curve() {
        assert_eq!(interpolate(0.0), 0.0);
        assert!((interpolate(1.0) - 1.0).abs() < 1e-12);

        let mut last = 0.0;
        for i in 1..=100 {
            let value = interpolate(i as f64 / 100.0);
            assert!(value >= last);
            last = value;
        }
    }

    #[test]
    fn test_idle_scroller_reports_finished() {
        let mut scroller = Scroller::default();
        assert!(scroller.is_finished());
        assert!(!scroller.compute_offset(Instant::now()));
    }

    #[test]
    fn test_start_scroll_interpolates() {
        let t0 = Instant::now();
        let mut scroller = Scroller::default();
        scroller.start_scroll(0, 10_000, t0);

        assert!(scroller.compute_offset(t0 + Duration::from_millis(100)));
        let mid = scroller.current();
        assert!(mid > 0 && mid < 10_000, "mid = {mid}");
        assert!(!scroller.is_finished());

        assert!(scroller.compute_offset(t0 + Duration::from_millis(300)));
        assert_eq!(scroller.current(), 10_000);
        assert!(scroller.is_finished());
        assert!(!scroller.compute_offset(t0 + Duration::from_millis(400)));
    }

    #[test]
    fn test_set_final_without_clock_jumps() {
        let mut scroller = Scroller::default();
        scroller.set_final(4_500);
        assert!(!scroller.is_finished());
        assert!(scroller.compute_offset(Instant::now()));
        assert_eq!(scroller.current(), 4_500);
        assert!(scroller.is_finished());
    }

    #[test]
    fn test_force_finished_keeps_current() {
        let t0 = Instant::now();
        let mut scroller = Scroller::default();
        scroller.start_scroll(0, 1_000, t0);
        scroller.compute_offset(t0 + Duration::from_millis(50));
        let at = scroller.current();

        scroller.force_finished();
        assert!(scroller.is_finished());
        assert_eq!(scroller.current(), at);
        assert_eq!(scroller.final_value(), 1_000);
    }

    #[test]
    fn test_abort_lands_on_final() {
        let mut scroller = Scroller::default();
        scroller.start_scroll(200, 300, Instant::now());
        scroller.abort();
        assert_eq!(scroller.current(), 500);
        assert!(scroller.is_finished());
    }
}
