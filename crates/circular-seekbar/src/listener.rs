/// Receives progress updates from a [`CircularSeekBar`](crate::CircularSeekBar).
///
/// Both callbacks run synchronously inside input handling or a draw tick.
pub trait ProgressListener {
    /// Called while dragging, before the widget commits to `progress`.
    /// Returning `false` vetoes the change; the gesture carries on.
    fn on_progress_changing(&mut self, progress: i32) -> bool {
        let _ = progress;
        true
    }

    /// `finished` is set once the finger is up and any animation has settled.
    fn on_progress_changed(&mut self, progress: i32, finished: bool);
}
