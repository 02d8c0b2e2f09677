use ratatui::style::{Color, Style};

pub(crate) const HEADER_BG: Color = Color::Rgb(30, 30, 46);
pub(crate) const ACCENT: Color = Color::Rgb(137, 180, 250);
pub(crate) const GREEN: Color = Color::Rgb(166, 227, 161);
pub(crate) const RED: Color = Color::Rgb(243, 139, 168);
pub(crate) const YELLOW: Color = Color::Rgb(249, 226, 175);
pub(crate) const MAUVE: Color = Color::Rgb(203, 166, 247);
pub(crate) const PEACH: Color = Color::Rgb(250, 179, 135);
pub(crate) const TEAL: Color = Color::Rgb(148, 226, 213);
pub(crate) const TEXT: Color = Color::Rgb(205, 214, 244);
pub(crate) const TEXT_DIM: Color = Color::Rgb(127, 132, 156);
pub(crate) const OVERLAY: Color = Color::Rgb(69, 71, 90);

const SLICES: [Color; 7] = [ACCENT, GREEN, YELLOW, RED, MAUVE, PEACH, TEAL];

/// Colour for the `i`th slice of a share chart, cycling.
pub(crate) fn slice_color(i: usize) -> Color {
    SLICES[i % SLICES.len()]
}

pub(crate) fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}
