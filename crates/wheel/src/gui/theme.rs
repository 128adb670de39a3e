use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::{Srgb, Srgba, WithAlpha};
use std::str::FromStr;

pub struct ThemeColors {
    pub stroke: Srgba<f64>,
    pub axis: Srgba<f64>,
    pub knob: Srgba<f64>,
}

impl ThemeColors {
    /// Theme lookups, with `stroke` replacing the theme foreground when the
    /// config sets a colour.
    pub fn from_context(context: &gtk::StyleContext, stroke: Option<Srgba<f64>>) -> Self {
        let fg = Self::lookup_color(
            context,
            "theme_fg_color",
            Srgba::new(0.85, 0.85, 0.85, 1.0),
            None,
        );
        let stroke = stroke.unwrap_or(fg);
        Self {
            stroke,
            axis: stroke.with_alpha(0.25),
            knob: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.4, 0.4, 0.8, 0.9),
                Some(0.9),
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                Srgba::new(
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    alpha_override.unwrap_or(c.alpha() as f64),
                )
            })
            .unwrap_or(fallback)
    }
}

/// Parses `#rrggbb` or `#rgb`, with or without the hash.
pub fn parse_color(hex: &str) -> Option<Srgba<f64>> {
    match Srgb::<u8>::from_str(hex.trim()) {
        Ok(rgb) => Some(rgb.into_format::<f64>().with_alpha(1.0)),
        Err(e) => {
            log::warn!("Ignoring colour '{}': {}", hex, e);
            None
        }
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.wheel-window, .wheel-drawing-area {
    background: none;
    background-color: transparent;
}
.wheel-status {
    font-family: monospace;
    padding: 6px;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        let cases = vec![
            ("#ff0000", Some((1.0, 0.0, 0.0))),
            ("00ff00", Some((0.0, 1.0, 0.0))),
            ("#00f", Some((0.0, 0.0, 1.0))),
            ("purple", None),
            ("#12345", None),
        ];

        for (input, expected) in cases {
            let parsed = parse_color(input).map(|c| {
                let (r, g, b, a) = c.into_components();
                assert_eq!(a, 1.0);
                (r, g, b)
            });
            assert_eq!(parsed, expected, "{input}");
        }
    }
}
