use crate::geometry::Size;
use crate::input::TouchEvent;
use crate::measure::MeasureSpec;
use crate::render::Frame;
use crate::snapshot::SavedState;
use std::time::Instant;

/// What a host needs to embed a widget: it asks for a size, lays the
/// widget out, forwards input, pulls a frame per redraw and keeps the
/// snapshot across restarts.
pub trait Widget {
    fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Size;

    fn layout(&mut self, width: f64, height: f64);

    /// Advances animations to `now` and describes what to paint.
    fn draw(&mut self, now: Instant) -> Frame;

    /// Returns whether the event was consumed.
    fn handle_input(&mut self, event: TouchEvent, now: Instant) -> bool;

    fn save_state(&self) -> SavedState;

    fn restore_state(&mut self, state: SavedState);
}
