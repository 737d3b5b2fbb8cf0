use circular_seekbar::{Color, Theme};
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

/// Fills the seek bar's unset colours from the active GTK theme.
pub fn theme_from_context(context: &gtk::StyleContext) -> Theme {
    let fallback = Theme::default();
    Theme {
        highlight: lookup_color(
            context,
            "theme_fg_color",
            fallback.highlight.to_rgba_f64(),
            Some(0.12),
        ),
        activated: lookup_color(
            context,
            "theme_selected_bg_color",
            fallback.activated.to_rgba_f64(),
            None,
        ),
    }
}

fn lookup_color(
    context: &gtk::StyleContext,
    name: &str,
    fallback: Srgba<f64>,
    alpha_override: Option<f64>,
) -> Color {
    let color = context
        .lookup_color(name)
        .map(|c| {
            let (r, g, b, a) = (
                c.red() as f64,
                c.green() as f64,
                c.blue() as f64,
                c.alpha() as f64,
            );
            Srgba::new(r, g, b, alpha_override.unwrap_or(a))
        })
        .unwrap_or(fallback);
    let (r, g, b, a) = color.into_components();
    Color::from_rgba_f64(r, g, b, a)
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.arcdial-drawing-area {
    background: none;
    background-color: transparent;
}

.arcdial-progress {
    font-size: 28px;
    font-weight: bold;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
