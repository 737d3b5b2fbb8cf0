use crate::geometry::{Insets, Rect};
use crate::style::{Color, ThumbLayer};
use std::path::PathBuf;

/// Level reported for a thumb sitting at the very end of the sweep.
pub const MAX_LEVEL: i32 = 10_000;

/// Everything a backend needs to paint one frame. Built fresh on every
/// draw tick; the widget keeps no reference to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Bounding box of the ellipse the arcs follow.
    pub bounds: Rect,
    /// Degrees clockwise from the positive x axis.
    pub start_angle: f64,
    pub track: ArcStroke,
    pub progress: ArcStroke,
    pub thumb: Option<ThumbFrame>,
    /// The animation is still running and the host should draw again.
    pub animating: bool,
}

/// A round-capped stroke along the ellipse from the start angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcStroke {
    pub sweep: f64,
    pub color: Color,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThumbFrame {
    pub bounds: Rect,
    /// Position along the sweep scaled to `0..=MAX_LEVEL`.
    pub level: i32,
    pub paint: ThumbPaint,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ThumbPaint {
    Layers(Vec<OvalLayer>),
    Image(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OvalLayer {
    pub bounds: Rect,
    pub color: Color,
}

/// Stacks `layers` inside `bounds`; each layer is inset by the padding of
/// every layer below it. `px` converts the dp paddings to pixels.
pub fn stack_layers(bounds: Rect, layers: &[ThumbLayer], px: f64) -> Vec<OvalLayer> {
    let mut inset = Insets::default();
    layers
        .iter()
        .map(|layer| {
            let oval = OvalLayer {
                bounds: bounds.inset(&inset),
                color: layer.color,
            };
            inset = inset + layer.padding.scaled(px);
            oval
        })
        .collect()
}

pub fn thumb_level(angle: f64, sweep_angle: f64) -> i32 {
    if sweep_angle <= 0.0 {
        return 0;
    }
    (angle / sweep_angle * MAX_LEVEL as f64 + 0.5) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::default_thumb_layers;

    #[test]
    fn test_default_layers_nest() {
        let bounds = Rect::new(0.0, 0.0, 24.0, 24.0);
        let ovals = stack_layers(bounds, &default_thumb_layers(), 2.0);

        assert_eq!(ovals.len(), 4);
        assert_eq!(ovals[0].bounds, bounds);
        assert_eq!(ovals[1].bounds, Rect::new(2.0, 2.0, 22.0, 24.0));
        assert_eq!(ovals[2].bounds, Rect::new(4.0, 4.0, 20.0, 22.0));
        assert_eq!(ovals[3].bounds, Rect::new(4.0, 4.0, 20.0, 20.0));
        assert_eq!(ovals[3].color, crate::style::DEFAULT_THUMB_COLOR);
    }

    #[test]
    fn test_thumb_level() {
        assert_eq!(thumb_level(0.0, 270.0), 0);
        assert_eq!(thumb_level(135.0, 270.0), 5_000);
        assert_eq!(thumb_level(270.0, 270.0), MAX_LEVEL);
        assert_eq!(thumb_level(10.0, 0.0), 0);
    }
}
