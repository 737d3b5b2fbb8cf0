use cairo::Context;
use circular_seekbar::{ArcStroke, Color, Frame, OvalLayer, Rect, ThumbFrame, ThumbPaint};
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Decoded thumb images keyed by path. A failed load is remembered so a
/// broken path is only reported once.
#[derive(Default)]
pub struct ThumbImages {
    images: HashMap<PathBuf, Option<Pixbuf>>,
}

impl ThumbImages {
    fn get(&mut self, path: &Path) -> Option<&Pixbuf> {
        self.images
            .entry(path.to_path_buf())
            .or_insert_with(|| match Pixbuf::from_file(path) {
                Ok(pixbuf) => Some(pixbuf),
                Err(e) => {
                    log::error!("Failed to load thumb image {}: {}", path.display(), e);
                    None
                }
            })
            .as_ref()
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }
}

fn set_source(cr: &Context, color: Color) {
    let (r, g, b, a) = color.to_rgba_f64().into_components();
    cr.set_source_rgba(r, g, b, a);
}

/// Adds the elliptical arc inscribed in `bounds` to the current path. The
/// transform only shapes the path; strokes keep an unscaled pen.
fn ellipse_arc(
    cr: &Context,
    bounds: &Rect,
    start: f64,
    sweep: f64,
) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.translate(bounds.center_x(), bounds.center_y());
    cr.scale(bounds.width() / 2.0, bounds.height() / 2.0);
    cr.new_sub_path();
    cr.arc(0.0, 0.0, 1.0, start.to_radians(), (start + sweep).to_radians());
    cr.restore()
}

fn draw_arc(
    cr: &Context,
    bounds: &Rect,
    start_angle: f64,
    stroke: &ArcStroke,
) -> Result<(), cairo::Error> {
    if bounds.is_empty() || stroke.sweep <= 0.0 || stroke.width <= 0.0 {
        return Ok(());
    }
    cr.new_path();
    ellipse_arc(cr, bounds, start_angle, stroke.sweep)?;
    set_source(cr, stroke.color);
    cr.set_line_width(stroke.width);
    cr.set_line_cap(cairo::LineCap::Round);
    cr.stroke()
}

fn draw_oval(cr: &Context, layer: &OvalLayer) -> Result<(), cairo::Error> {
    if layer.bounds.is_empty() {
        return Ok(());
    }
    cr.new_path();
    ellipse_arc(cr, &layer.bounds, 0.0, 360.0)?;
    cr.close_path();
    set_source(cr, layer.color);
    cr.fill()
}

fn draw_image(cr: &Context, bounds: &Rect, pixbuf: &Pixbuf) -> Result<(), cairo::Error> {
    if bounds.is_empty() || pixbuf.width() <= 0 || pixbuf.height() <= 0 {
        return Ok(());
    }
    // fit image into thumb
    let scale = (bounds.width() / pixbuf.width() as f64)
        .min(bounds.height() / pixbuf.height() as f64);
    let (iw, ih) = (
        pixbuf.width() as f64 * scale,
        pixbuf.height() as f64 * scale,
    );

    cr.save()?;
    cr.translate(bounds.center_x() - iw / 2.0, bounds.center_y() - ih / 2.0);
    cr.scale(scale, scale);
    cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
    cr.paint()?;
    cr.restore()
}

fn draw_thumb(
    cr: &Context,
    thumb: &ThumbFrame,
    images: &mut ThumbImages,
) -> Result<(), cairo::Error> {
    match &thumb.paint {
        ThumbPaint::Layers(layers) => {
            for layer in layers {
                draw_oval(cr, layer)?;
            }
            Ok(())
        }
        ThumbPaint::Image(path) => match images.get(path) {
            Some(pixbuf) => draw_image(cr, &thumb.bounds, pixbuf),
            None => Ok(()),
        },
    }
}

pub fn draw(cr: &Context, frame: &Frame, images: &mut ThumbImages) -> Result<(), cairo::Error> {
    draw_arc(cr, &frame.bounds, frame.start_angle, &frame.track)?;
    draw_arc(cr, &frame.bounds, frame.start_angle, &frame.progress)?;
    if let Some(thumb) = &frame.thumb {
        draw_thumb(cr, thumb, images)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use circular_seekbar::{CircularSeekBar, SeekBarConfig, Theme, Widget};
    use std::time::Instant;

    fn surface_context() -> (cairo::ImageSurface, Context) {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 64, 64).unwrap();
        let cr = Context::new(&surface).unwrap();
        (surface, cr)
    }

    #[test]
    fn test_draws_default_frame() {
        let (_surface, cr) = surface_context();
        let mut bar = CircularSeekBar::new(&SeekBarConfig::default(), &Theme::default(), 1.0);
        bar.layout(64.0, 64.0);
        bar.set_progress(40);
        let frame = bar.draw(Instant::now());

        let mut images = ThumbImages::default();
        assert!(draw(&cr, &frame, &mut images).is_ok());
    }

    #[test]
    fn test_skips_degenerate_frame() {
        let (_surface, cr) = surface_context();
        let mut bar = CircularSeekBar::new(&SeekBarConfig::default(), &Theme::default(), 1.0);
        let frame = bar.draw(Instant::now());
        assert!(frame.bounds.is_empty());

        let mut images = ThumbImages::default();
        assert!(draw(&cr, &frame, &mut images).is_ok());
    }

    #[test]
    fn test_missing_image_is_cached_as_absent() {
        let mut images = ThumbImages::default();
        let path = Path::new("/nonexistent/arcdial-thumb.png");
        assert!(images.get(path).is_none());
        assert_eq!(images.images.len(), 1);
        images.clear();
        assert!(images.images.is_empty());
    }
}
