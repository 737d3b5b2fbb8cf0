/// Integer progress bounded by `min..=max`, with `min >= 0`.
///
/// Angles map onto `max - min` equal steps spread across the sweep of the
/// arc; a step is an offset from `min`, not an absolute progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressRange {
    min: i32,
    max: i32,
    progress: i32,
}

impl Default for ProgressRange {
    fn default() -> Self {
        Self {
            min: 0,
            max: 100,
            progress: 0,
        }
    }
}

impl ProgressRange {
    pub fn new(min: i32, max: i32, progress: i32) -> Self {
        let max = max.max(0);
        let min = min.clamp(0, max);
        Self {
            min,
            max,
            progress: progress.clamp(min, max),
        }
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn progress(&self) -> i32 {
        self.progress
    }

    pub fn steps(&self) -> i32 {
        self.max - self.min
    }

    /// Negative values pin to zero; values above `max` pin to `max`.
    pub fn set_min(&mut self, min: i32) {
        self.min = if min < 0 { 0 } else { min.min(self.max) };
        self.progress = self.clamp(self.progress);
    }

    pub fn set_max(&mut self, max: i32) {
        self.max = max.max(self.min);
        self.progress = self.clamp(self.progress);
    }

    pub fn set_progress(&mut self, progress: i32) -> i32 {
        self.progress = self.clamp(progress);
        self.progress
    }

    pub fn clamp(&self, progress: i32) -> i32 {
        progress.clamp(self.min, self.max)
    }

    /// Nearest step for `angle`, wrapping so an angle just past the end of
    /// the sweep cannot produce a step beyond `max`.
    pub fn step_from_angle(&self, sweep_angle: f64, angle: f64) -> i32 {
        let steps = self.steps();
        if steps <= 0 {
            return 0;
        }
        let rise = sweep_angle / steps as f64;
        if rise <= 0.0 {
            return 0;
        }
        let step = ((angle + rise / 2.0) / rise) % (steps as f64 + 1.0);
        step as i32
    }

    pub fn step_angle_from_step(&self, sweep_angle: f64, step: i32) -> f64 {
        let steps = self.steps();
        if steps <= 0 {
            return 0.0;
        }
        sweep_angle / steps as f64 * step as f64
    }

    /// Quantizes a free angle onto the angle of its nearest step.
    pub fn step_angle_from_angle(&self, sweep_angle: f64, angle: f64) -> f64 {
        self.step_angle_from_step(sweep_angle, self.step_from_angle(sweep_angle, angle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sanitizes_bounds() {
        let range = ProgressRange::new(-5, 10, 20);
        assert_eq!((range.min(), range.max(), range.progress()), (0, 10, 10));

        let range = ProgressRange::new(30, 10, 0);
        assert_eq!((range.min(), range.max(), range.progress()), (10, 10, 10));

        let range = ProgressRange::new(0, -4, 3);
        assert_eq!((range.min(), range.max(), range.progress()), (0, 0, 0));
    }

    #[test]
    fn test_setters_keep_progress_in_range() {
        let mut range = ProgressRange::new(0, 100, 50);
        for input in [-1000, -1, 0, 37, 100, 101, i32::MAX] {
            let progress = range.set_progress(input);
            assert!((range.min()..=range.max()).contains(&progress));
        }

        range.set_progress(80);
        range.set_max(60);
        assert_eq!(range.progress(), 60);

        range.set_min(70);
        assert_eq!(range.min(), 60);
        assert_eq!(range.progress(), 60);

        range.set_min(-3);
        assert_eq!(range.min(), 0);

        range.set_max(-10);
        assert_eq!(range.max(), 0);
    }

    #[test]
    fn test_step_angle_for_half_way() {
        let range = ProgressRange::new(0, 100, 50);
        let angle = range.step_angle_from_step(359.9, 50);
        assert!((angle - 179.95).abs() < 1e-9);
    }

    #[test]
    fn test_step_from_angle_rounds_to_nearest() {
        let range = ProgressRange::new(0, 10, 0);
        assert_eq!(range.step_from_angle(100.0, 0.0), 0);
        assert_eq!(range.step_from_angle(100.0, 4.9), 0);
        assert_eq!(range.step_from_angle(100.0, 5.0), 1);
        assert_eq!(range.step_from_angle(100.0, 54.0), 5);
        assert_eq!(range.step_from_angle(100.0, 100.0), 10);
    }

    #[test]
    fn test_step_from_angle_wraps_past_sweep() {
        let range = ProgressRange::new(0, 10, 0);
        // 11 steps worth of angle wrap back to the start.
        assert_eq!(range.step_from_angle(100.0, 107.0), 0);
    }

    #[test]
    fn test_requantization_is_stable() {
        let range = ProgressRange::new(3, 47, 3);
        let sweep = 270.0;
        let mut angle = 0.0;
        while angle < 360.0 {
            let step = range.step_from_angle(sweep, angle);
            let snapped = range.step_angle_from_step(sweep, step);
            assert_eq!(range.step_from_angle(sweep, snapped), step, "angle {angle}");
            angle += 0.37;
        }
    }

    #[test]
    fn test_empty_range_has_single_step() {
        let range = ProgressRange::new(5, 5, 5);
        assert_eq!(range.step_from_angle(359.9, 200.0), 0);
        assert_eq!(range.step_angle_from_step(359.9, 0), 0.0);
    }

    #[test]
    fn test_zero_sweep_has_single_step() {
        let range = ProgressRange::new(0, 10, 0);
        assert_eq!(range.step_from_angle(0.0, 45.0), 0);
    }
}
