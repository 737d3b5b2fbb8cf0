//! A circular seek bar: progress is picked by dragging a thumb around an
//! elliptical arc.
//!
//! The widget is toolkit agnostic. A host pushes [`TouchEvent`]s and render
//! ticks into a [`CircularSeekBar`] through the [`Widget`] trait and paints
//! the returned [`Frame`] with whatever backend it has.

pub mod config;
pub mod geometry;
pub mod input;
pub mod listener;
pub mod measure;
pub mod range;
pub mod render;
pub mod scroller;
pub mod seekbar;
pub mod snapshot;
pub mod style;
pub mod widget;

pub use config::{GapPolicy, ProgressColorConfig, ScrollMode, SeekBarConfig};
pub use geometry::{Insets, Orb, Orbit, Point, Rect, Size};
pub use input::{TouchAction, TouchEvent};
pub use listener::ProgressListener;
pub use measure::MeasureSpec;
pub use range::ProgressRange;
pub use render::{ArcStroke, Frame, OvalLayer, ThumbFrame, ThumbPaint};
pub use scroller::Scroller;
pub use seekbar::CircularSeekBar;
pub use snapshot::{SavedState, SnapshotError};
pub use style::{Color, ColorParseError, DrawableState, StatefulColor, Theme, ThumbVisual};
pub use widget::Widget;
