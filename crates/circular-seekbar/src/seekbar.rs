use crate::config::{GapPolicy, ScrollMode, SeekBarConfig};
use crate::geometry::{Insets, Orb, Orbit, Point, Rect, Size, normalize_degrees};
use crate::input::{TouchAction, TouchEvent};
use crate::listener::ProgressListener;
use crate::measure::{self, MeasureSpec, dp_to_px};
use crate::range::ProgressRange;
use crate::render::{self, ArcStroke, Frame, ThumbFrame, ThumbPaint};
use crate::scroller::Scroller;
use crate::snapshot::{SavedState, from_fixed, to_fixed};
use crate::style::{Color, DrawableState, StatefulColor, Theme, ThumbVisual, default_thumb_layers};
use crate::widget::Widget;
use std::time::Instant;

/// Degrees past the end of the sweep that still count as on the arc.
const SWEEP_TOLERANCE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Gesture {
    #[default]
    Idle,
    Scrolling,
}

/// A seek bar bent around an ellipse.
///
/// Progress is stored as an integer in `min..=max`; what is painted is the
/// angle held by an internal [`Scroller`], which chases the finger
/// according to the [`ScrollMode`]. Progress is re-derived from that angle
/// on every draw tick while it moves.
pub struct CircularSeekBar {
    range: ProgressRange,
    start_angle: f64,
    sweep_angle: f64,
    stroke_width: f64,
    sweep_color: Color,
    progress_color: StatefulColor,
    thumb: ThumbVisual,
    thumb_radius: f64,
    scroll_mode: ScrollMode,
    gap_policy: GapPolicy,
    touch_inside: bool,
    enabled: bool,
    padding: Insets,
    density: f64,
    size: Size,
    orbit: Orbit,
    start_orb: Orb,
    end_orb: Orb,
    thumb_orb: Orb,
    scroller: Scroller,
    gesture: Gesture,
    last_update: Option<i32>,
    invalidated: bool,
    listener: Option<Box<dyn ProgressListener>>,
}

impl CircularSeekBar {
    pub fn new(config: &SeekBarConfig, theme: &Theme, density: f64) -> Self {
        let mut bar = Self {
            range: ProgressRange::new(config.min, config.max, config.progress),
            start_angle: normalize_degrees(config.start_angle),
            sweep_angle: normalize_degrees(config.sweep_angle),
            stroke_width: config.stroke_width * density,
            sweep_color: config.sweep_color_or(theme),
            progress_color: config.progress_color_or(theme),
            thumb: config.thumb.clone(),
            thumb_radius: config.thumb_radius * density,
            scroll_mode: config.scroll_mode,
            gap_policy: config.gap_policy,
            touch_inside: config.touch_inside,
            enabled: config.enabled,
            padding: config.padding.scaled(density),
            density,
            size: Size::default(),
            orbit: Orbit::default(),
            start_orb: Orb::default(),
            end_orb: Orb::default(),
            thumb_orb: Orb::default(),
            scroller: Scroller::default(),
            gesture: Gesture::Idle,
            last_update: None,
            invalidated: true,
            listener: None,
        };
        let target = bar.progress_angle(bar.range.progress());
        bar.scroller.set_final(to_fixed(target));
        bar.update_drawable_state();
        bar
    }

    /// Applies new settings while keeping the current progress, clamped
    /// into the new range.
    pub fn reconfigure(&mut self, config: &SeekBarConfig, theme: &Theme) {
        self.start_angle = normalize_degrees(config.start_angle);
        self.sweep_angle = normalize_degrees(config.sweep_angle);
        self.stroke_width = config.stroke_width * self.density;
        self.sweep_color = config.sweep_color_or(theme);
        self.progress_color = config.progress_color_or(theme);
        self.thumb = config.thumb.clone();
        self.thumb_radius = config.thumb_radius * self.density;
        self.scroll_mode = config.scroll_mode;
        self.gap_policy = config.gap_policy;
        self.touch_inside = config.touch_inside;
        self.enabled = config.enabled;
        self.padding = config.padding.scaled(self.density);
        self.range = ProgressRange::new(config.min, config.max, self.range.progress());
        self.set_progress(self.range.progress());
    }

    pub fn set_listener(&mut self, listener: Option<Box<dyn ProgressListener>>) {
        self.listener = listener;
    }

    pub fn progress(&self) -> i32 {
        self.range.progress()
    }

    pub fn min(&self) -> i32 {
        self.range.min()
    }

    pub fn max(&self) -> i32 {
        self.range.max()
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn sweep_angle(&self) -> f64 {
        self.sweep_angle
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn sweep_color(&self) -> Color {
        self.sweep_color
    }

    pub fn progress_color(&self) -> StatefulColor {
        self.progress_color
    }

    pub fn thumb(&self) -> &ThumbVisual {
        &self.thumb
    }

    pub fn thumb_radius(&self) -> f64 {
        self.thumb_radius
    }

    pub fn scroll_mode(&self) -> ScrollMode {
        self.scroll_mode
    }

    pub fn gap_policy(&self) -> GapPolicy {
        self.gap_policy
    }

    pub fn has_touch_inside(&self) -> bool {
        self.touch_inside
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_pressed(&self) -> bool {
        self.gesture == Gesture::Scrolling
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn drawable_state(&self) -> DrawableState {
        DrawableState {
            enabled: self.enabled,
            pressed: self.is_pressed(),
        }
    }

    pub fn start_orb(&self) -> Orb {
        self.start_orb
    }

    pub fn end_orb(&self) -> Orb {
        self.end_orb
    }

    /// Pixel position of `angle` degrees along the arc.
    pub fn point(&self, angle: f64) -> Orb {
        self.orbit.point(angle)
    }

    /// Angle along the arc of an arbitrary view coordinate, in `[0, 360)`.
    pub fn angle(&self, p: Point) -> f64 {
        self.orbit.angle(p)
    }

    pub fn is_inside_orbit(&self, p: Point) -> bool {
        self.orbit.contains(p, self.touch_inside)
    }

    /// Returns and clears the pending redraw request.
    pub fn take_invalidation(&mut self) -> bool {
        std::mem::take(&mut self.invalidated)
    }

    pub fn set_start_angle(&mut self, start_angle: f64) {
        self.start_angle = normalize_degrees(start_angle);
        self.update_drawable_state();
    }

    pub fn set_sweep_angle(&mut self, sweep_angle: f64) {
        self.sweep_angle = normalize_degrees(sweep_angle);
        self.set_progress(self.range.progress());
    }

    pub fn set_stroke_width(&mut self, stroke_width: f64) {
        self.stroke_width = stroke_width;
        self.update_drawable_state();
    }

    pub fn set_sweep_color(&mut self, color: Color) {
        self.sweep_color = color;
        self.update_drawable_state();
    }

    pub fn set_progress_color(&mut self, color: StatefulColor) {
        self.progress_color = color;
        self.update_drawable_state();
    }

    pub fn set_thumb(&mut self, thumb: ThumbVisual) {
        self.thumb = thumb;
        self.update_drawable_state();
    }

    pub fn set_thumb_radius(&mut self, thumb_radius: f64) {
        self.thumb_radius = thumb_radius;
        self.update_drawable_state();
    }

    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
        self.update_drawable_state();
    }

    /// Switching to `Gravity` or `Snap` pulls the displayed angle onto the
    /// current step.
    pub fn set_scroll_mode(&mut self, scroll_mode: ScrollMode, now: Instant) {
        self.scroll_mode = scroll_mode;
        match scroll_mode {
            ScrollMode::Gravity => self.set_progress_animated(self.range.progress(), now),
            ScrollMode::Snap => self.set_progress(self.range.progress()),
            ScrollMode::Drift => {}
        }
    }

    pub fn set_gap_policy(&mut self, gap_policy: GapPolicy) {
        self.gap_policy = gap_policy;
    }

    pub fn set_touch_inside(&mut self, touch_inside: bool) {
        self.touch_inside = touch_inside;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.update_drawable_state();
    }

    pub fn set_min(&mut self, min: i32) {
        self.range.set_min(min);
        self.set_progress(self.range.progress());
    }

    pub fn set_max(&mut self, max: i32) {
        self.range.set_max(max);
        self.set_progress(self.range.progress());
    }

    /// Clamps `progress` into range and moves the thumb there on the next
    /// draw without animating.
    pub fn set_progress(&mut self, progress: i32) {
        let progress = self.range.set_progress(progress);
        self.scroller
            .set_final(to_fixed(self.progress_angle(progress)));
        self.update_drawable_state();
    }

    pub fn set_progress_animated(&mut self, progress: i32, now: Instant) {
        let progress = self.range.set_progress(progress);
        self.scroller.compute_offset(now);
        let current = self.scroller.current();
        let target = to_fixed(self.progress_angle(progress));
        self.scroller.start_scroll(current, target - current, now);
        self.update_drawable_state();
    }

    fn progress_angle(&self, progress: i32) -> f64 {
        self.range
            .step_angle_from_step(self.sweep_angle, progress - self.range.min())
    }

    fn invalidate(&mut self) {
        self.invalidated = true;
    }

    fn update_drawable_state(&mut self) {
        let touch_radius = self.thumb_radius.max(self.stroke_width / 2.0);
        self.orbit = Orbit::new(self.size, self.padding, touch_radius, self.start_angle);
        self.start_orb = self.orbit.point(0.0);
        self.end_orb = self.orbit.point(self.sweep_angle);
        self.invalidate();
    }

    fn start_scroll(&mut self, p: Point, now: Instant) -> bool {
        self.last_update = None;
        let start = self.orbit.near(p, self.start_orb);
        let end = self.orbit.near(p, self.end_orb);

        let on_arc = self.touch_inside
            || self.orbit.angle(p) < self.sweep_angle + SWEEP_TOLERANCE
            || start
            || end;
        if self.is_inside_orbit(p) && on_arc {
            return self.update_scroll(p, now);
        }
        false
    }

    fn update_scroll(&mut self, p: Point, now: Instant) -> bool {
        let mut angle = self.orbit.angle(p);
        let thumb = self.orbit.near(p, self.thumb_orb);

        if angle > self.sweep_angle
            && !thumb
            && let Some(clamped) = self.clamp_gap(p, angle)
        {
            angle = clamped;
        }

        if angle < self.sweep_angle + SWEEP_TOLERANCE {
            if self.scroller.compute_offset(now) {
                self.scroller.force_finished();
            }

            let step = self.range.step_from_angle(self.sweep_angle, angle);
            if self.notify_changing(step + self.range.min()) {
                self.retarget(angle, now);
            } else {
                log::trace!("Progress change to step {} vetoed", step);
            }
            self.invalidate();
            return true;
        }

        if self.scroller.is_finished() {
            let current = self.scroller.current();
            self.scroller.set_final(current);
        }
        self.touch_inside || thumb
    }

    /// Where a touch in the gap between the end and the start of the arc
    /// should land, if anywhere.
    fn clamp_gap(&self, p: Point, angle: f64) -> Option<f64> {
        match self.gap_policy {
            GapPolicy::Split => {
                let midpoint = 360.0 - (360.0 - self.sweep_angle) / 2.0;
                Some(if angle > midpoint { 0.0 } else { self.sweep_angle })
            }
            GapPolicy::Reject if self.orbit.near(p, self.start_orb) => Some(0.0),
            GapPolicy::Reject if self.orbit.near(p, self.end_orb) => Some(self.sweep_angle),
            GapPolicy::Reject => None,
        }
    }

    fn retarget(&mut self, angle: f64, now: Instant) {
        let current = self.scroller.current();
        match self.scroll_mode {
            ScrollMode::Drift => {
                self.scroller
                    .start_scroll(current, to_fixed(angle) - current, now);
            }
            ScrollMode::Gravity => {
                let target = self.range.step_angle_from_angle(self.sweep_angle, angle);
                self.scroller
                    .start_scroll(current, to_fixed(target) - current, now);
            }
            ScrollMode::Snap => {
                let target = self.range.step_angle_from_angle(self.sweep_angle, angle);
                self.scroller.set_final(to_fixed(target));
            }
        }
    }

    fn finish_scroll(&mut self) {
        self.invalidate();
        self.notify_changed();
    }

    fn notify_changing(&mut self, progress: i32) -> bool {
        self.listener
            .as_mut()
            .is_none_or(|listener| listener.on_progress_changing(progress))
    }

    fn notify_changed(&mut self) {
        let finished = !self.is_pressed() && self.scroller.is_finished();
        let progress = self.range.progress();
        if let Some(listener) = self.listener.as_mut()
            && (self.last_update != Some(progress) || finished)
        {
            self.last_update = Some(progress);
            listener.on_progress_changed(progress, finished);
        }
    }

    fn thumb_frame(&self, angle: f64) -> Option<ThumbFrame> {
        let radius = self.thumb_radius.trunc();
        let left = f64::from(self.thumb_orb.x) - radius;
        let top = f64::from(self.thumb_orb.y) - radius;
        let bounds = Rect::new(left, top, left + radius * 2.0, top + radius * 2.0);

        let paint = match &self.thumb {
            ThumbVisual::None => return None,
            ThumbVisual::Default => ThumbPaint::Layers(render::stack_layers(
                bounds,
                &default_thumb_layers(),
                dp_to_px(1.0, self.density),
            )),
            ThumbVisual::Image(path) => ThumbPaint::Image(path.clone()),
        };

        Some(ThumbFrame {
            bounds,
            level: render::thumb_level(angle, self.sweep_angle),
            paint,
        })
    }
}

impl Widget for CircularSeekBar {
    fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Size {
        measure::measure(width, height, self.density)
    }

    fn layout(&mut self, width: f64, height: f64) {
        self.size = Size::new(width, height);
        self.update_drawable_state();
    }

    fn draw(&mut self, now: Instant) -> Frame {
        self.invalidated = false;

        let scrolling = self.scroller.compute_offset(now);
        let angle = from_fixed(self.scroller.current());
        if scrolling {
            let step = self.range.step_from_angle(self.sweep_angle, angle);
            self.range.set_progress(step + self.range.min());
            self.notify_changed();
        }

        self.thumb_orb = self.orbit.point(angle);

        Frame {
            bounds: self.orbit.bounds,
            start_angle: self.start_angle,
            track: ArcStroke {
                sweep: self.sweep_angle,
                color: self.sweep_color,
                width: self.stroke_width,
            },
            progress: ArcStroke {
                sweep: angle,
                color: self.progress_color.for_state(self.drawable_state()),
                width: self.stroke_width,
            },
            thumb: self.thumb_frame(angle),
            animating: scrolling,
        }
    }

    fn handle_input(&mut self, event: TouchEvent, now: Instant) -> bool {
        let p = event.position;
        match event.action {
            TouchAction::Down => {
                if !self.enabled {
                    return false;
                }
                let accepted = self.start_scroll(p, now);
                log::debug!(
                    "Press at ({:.1}, {:.1}) {}",
                    p.x,
                    p.y,
                    if accepted { "accepted" } else { "rejected" }
                );
                self.gesture = if accepted {
                    Gesture::Scrolling
                } else {
                    Gesture::Idle
                };
                self.invalidate();
                accepted
            }
            TouchAction::Move => {
                if self.gesture != Gesture::Scrolling {
                    return false;
                }
                self.update_scroll(p, now)
            }
            TouchAction::Up | TouchAction::Cancel => {
                if self.gesture != Gesture::Scrolling {
                    return false;
                }
                self.gesture = Gesture::Idle;
                self.finish_scroll();
                true
            }
        }
    }

    fn save_state(&self) -> SavedState {
        SavedState::new(self.scroller.final_value())
    }

    /// The saved angle may come from a run with a wider sweep, so it is
    /// pinned onto the current arc before it picks a step.
    fn restore_state(&mut self, state: SavedState) {
        let angle = state.angle().clamp(0.0, self.sweep_angle);
        let step = self.range.step_from_angle(self.sweep_angle, angle);
        let progress = self.range.set_progress(step + self.range.min());
        self.last_update = Some(progress);
        self.scroller.set_final(to_fixed(angle));
        self.scroller.abort();
        self.invalidate();

        if let Some(listener) = self.listener.as_mut() {
            listener.on_progress_changed(progress, true);
        }
    }
}
