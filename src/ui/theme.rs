use ratatui::style::Color;

/// Palette for the whole UI. Kept as a plain struct of resolved colors so
/// widgets never branch on the theme name.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub header_accent_fg: Color,
    pub header_accent_bg: Color,
    pub overlay_border: Color,
    pub gauge_filled: Color,
    pub gauge_unfilled: Color,
    pub sparkline_color: Color,
    pub table_header_fg: Color,
    pub row_selected_fg: Color,
    pub row_selected_bg: Color,
    pub pill_key_fg: Color,
    pub pill_key_bg: Color,
    pub pill_desc_fg: Color,
    pub surface_bg: Color,
    pub statusbar_bg: Color,
    pub status_err: Color,
    pub accent: Color,
}

impl Theme {
    pub fn from_config(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn next(&self) -> Self {
        match self.name {
            "dark" => Self::light(),
            _ => Self::dark(),
        }
    }

    fn dark() -> Self {
        Theme {
            name: "dark",
            text_primary: Color::Rgb(0xcd, 0xd6, 0xf4),
            text_secondary: Color::Rgb(0x9a, 0xa3, 0xc0),
            header_accent_fg: Color::Rgb(0x11, 0x11, 0x1b),
            header_accent_bg: Color::Rgb(0x89, 0xb4, 0xfa),
            overlay_border: Color::Rgb(0x58, 0x5b, 0x70),
            gauge_filled: Color::Rgb(0x89, 0xb4, 0xfa),
            gauge_unfilled: Color::Rgb(0x31, 0x32, 0x44),
            sparkline_color: Color::Rgb(0xa6, 0xe3, 0xa1),
            table_header_fg: Color::Rgb(0x89, 0xb4, 0xfa),
            row_selected_fg: Color::Rgb(0x11, 0x11, 0x1b),
            row_selected_bg: Color::Rgb(0x89, 0xb4, 0xfa),
            pill_key_fg: Color::Rgb(0x11, 0x11, 0x1b),
            pill_key_bg: Color::Rgb(0x89, 0xb4, 0xfa),
            pill_desc_fg: Color::Rgb(0x9a, 0xa3, 0xc0),
            surface_bg: Color::Rgb(0x1e, 0x1e, 0x2e),
            statusbar_bg: Color::Rgb(0x18, 0x18, 0x25),
            status_err: Color::Rgb(0xf3, 0x8b, 0xa8),
            accent: Color::Rgb(0xcb, 0xa6, 0xf7),
        }
    }

    fn light() -> Self {
        Theme {
            name: "light",
            text_primary: Color::Rgb(0x4c, 0x4f, 0x69),
            text_secondary: Color::Rgb(0x6c, 0x6f, 0x85),
            header_accent_fg: Color::Rgb(0xef, 0xf1, 0xf5),
            header_accent_bg: Color::Rgb(0x1e, 0x66, 0xf5),
            overlay_border: Color::Rgb(0x9c, 0xa0, 0xb0),
            gauge_filled: Color::Rgb(0x1e, 0x66, 0xf5),
            gauge_unfilled: Color::Rgb(0xcc, 0xd0, 0xda),
            sparkline_color: Color::Rgb(0x40, 0xa0, 0x2b),
            table_header_fg: Color::Rgb(0x1e, 0x66, 0xf5),
            row_selected_fg: Color::Rgb(0xef, 0xf1, 0xf5),
            row_selected_bg: Color::Rgb(0x1e, 0x66, 0xf5),
            pill_key_fg: Color::Rgb(0xef, 0xf1, 0xf5),
            pill_key_bg: Color::Rgb(0x1e, 0x66, 0xf5),
            pill_desc_fg: Color::Rgb(0x6c, 0x6f, 0x85),
            surface_bg: Color::Rgb(0xef, 0xf1, 0xf5),
            statusbar_bg: Color::Rgb(0xe6, 0xe9, 0xef),
            status_err: Color::Rgb(0xd2, 0x0f, 0x39),
            accent: Color::Rgb(0x88, 0x39, 0xef),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
